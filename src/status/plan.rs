//! The status rules, evaluated in memory.
//!
//! [`reconcile_statuses()`] does the same thing in a single statement; this module exists so a
//! run can be previewed without touching the database.
//!
//! [`reconcile_statuses()`]: crate::query::reconcile_statuses

use std::cmp::Ordering;

use bancho::{Grade, ScoreStatus};

use super::FailedPlays;
use crate::ids::ScoreId;

/// The columns of a play that decide its status.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayState
{
	pub id: ScoreId,
	pub pp: f64,
	pub score: i64,
	pub grade: Grade,
	pub status: ScoreStatus,
}

impl PlayState
{
	/// Whether this play may become the best play of its partition.
	pub fn is_eligible(&self) -> bool
	{
		self.pp > 0.0 && !self.grade.is_failing()
	}
}

/// A status change of a single play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition
{
	pub id: ScoreId,
	pub from: ScoreStatus,
	pub to: ScoreStatus,
}

/// Returns the best eligible play of a partition.
///
/// Plays are ranked by pp, then score, then id, all descending.
pub fn pick_best(partition: &[PlayState]) -> Option<ScoreId>
{
	partition
		.iter()
		.filter(|play| play.is_eligible())
		.max_by(|lhs, rhs| rank(lhs, rhs))
		.map(|play| play.id)
}

fn rank(lhs: &PlayState, rhs: &PlayState) -> Ordering
{
	lhs.pp
		.total_cmp(&rhs.pp)
		.then(lhs.score.cmp(&rhs.score))
		.then(lhs.id.cmp(&rhs.id))
}

/// Computes the status every play of a partition should have.
///
/// Plays whose status would not change are left out.
pub fn transitions(partition: &[PlayState], failed: FailedPlays) -> Vec<Transition>
{
	let best = pick_best(partition);

	partition
		.iter()
		.filter_map(|play| {
			let to = next_status(play, best == Some(play.id), failed)?;
			(to != play.status).then_some(Transition { id: play.id, from: play.status, to })
		})
		.collect()
}

/// Returns the status `play` should have, or `None` if it is not updated at all.
pub fn next_status(play: &PlayState, is_best: bool, failed: FailedPlays) -> Option<ScoreStatus>
{
	if play.grade.is_failing() {
		return match failed {
			FailedPlays::Include => Some(ScoreStatus::Dnf),
			FailedPlays::Exclude => None,
		};
	}

	Some(if is_best {
		ScoreStatus::Picked
	} else if play.pp <= 0.0 {
		ScoreStatus::Dnf
	} else if play.status.is_picked() {
		ScoreStatus::Normal
	} else {
		play.status
	})
}
