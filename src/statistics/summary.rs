//! Performance totals computed in memory.

use crate::ids::ScoreId;

/// How much each subsequent play counts compared to the one before it.
pub const WEIGHT_DECAY: f64 = 0.95;

/// A picked play as it enters the weighted total.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BestPlay
{
	pub id: ScoreId,
	pub pp: f64,
	pub accuracy: f64,
}

/// The performance tier of a single user and mode.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Summary
{
	/// Sum of all plays' pp, each weighted by its rank.
	pub weighted: f64,

	/// Bonus pp for the number of plays.
	pub bonus: f64,

	/// Weighted average accuracy.
	pub accuracy: f64,

	/// Number of plays that went into the total.
	pub plays: usize,
}

impl Summary
{
	pub fn total(&self) -> f64
	{
		self.weighted + self.bonus
	}
}

/// Bonus pp awarded for having `count` picked plays.
pub fn bonus(count: usize) -> f64
{
	let count = i32::try_from(count).unwrap_or(i32::MAX);

	(1.0 - 0.9994_f64.powi(count)) * 416.6667
}

/// Computes the weighted total and accuracy of a user's picked plays.
///
/// Plays with no positive pp are ignored. The remaining ones are ranked by pp, then accuracy,
/// then id, all descending; the play at rank `n` (starting from 1) is weighted with
/// `0.95^(n-1)`.
pub fn summarize(plays: &[BestPlay]) -> Summary
{
	let mut plays = plays
		.iter()
		.filter(|play| play.pp > 0.0)
		.collect::<Vec<_>>();

	plays.sort_by(|lhs, rhs| {
		rhs.pp
			.total_cmp(&lhs.pp)
			.then(rhs.accuracy.total_cmp(&lhs.accuracy))
			.then(rhs.id.cmp(&lhs.id))
	});

	let mut summary = Summary { plays: plays.len(), ..Default::default() };
	let mut total_weight = 0.0;
	let mut weight = 1.0;

	for play in plays {
		summary.weighted += weight * play.pp;
		summary.accuracy += weight * play.accuracy;
		total_weight += weight;
		weight *= WEIGHT_DECAY;
	}

	if total_weight > 0.0 {
		summary.accuracy /= total_weight;
		summary.bonus = bonus(summary.plays);
	}

	summary
}

#[cfg(test)]
mod tests
{
	use super::{BestPlay, Summary, bonus, summarize};
	use crate::ids::ScoreId;

	fn play(id: u64, pp: f64, accuracy: f64) -> BestPlay
	{
		BestPlay { id: ScoreId::from(id), pp, accuracy }
	}

	#[test]
	fn weights_plays_by_rank()
	{
		let summary = summarize(&[play(1, 80.0, 90.0), play(2, 100.0, 100.0), play(3, 90.0, 95.0)]);
		let expected = 100.0 + 0.95 * 90.0 + 0.95 * 0.95 * 80.0 + bonus(3);

		assert_eq!(summary.plays, 3);
		assert!((summary.total() - expected).abs() < 1e-9);

		let expected_accuracy = (100.0 + 0.95 * 95.0 + 0.9025 * 90.0) / (1.0 + 0.95 + 0.9025);
		assert!((summary.accuracy - expected_accuracy).abs() < 1e-9);
	}

	#[test]
	fn bonus_grows_with_play_count()
	{
		assert_eq!(bonus(0), 0.0);
		assert!(bonus(1) > 0.0);
		assert!(bonus(1_000) > bonus(100));
		assert!(bonus(100_000) < 416.6667);
	}

	#[test]
	fn no_plays_no_performance()
	{
		assert_eq!(summarize(&[]), Summary::default());
		assert_eq!(summarize(&[play(1, 0.0, 100.0)]), Summary::default());
	}
}
