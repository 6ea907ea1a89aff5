//! Per-user statistics.
//!
//! Statistics are split into tiers that can be recomputed independently of each other:
//!
//! - performance: weighted pp and accuracy of the picked plays
//! - lifetime: total score, play time and grade counts of all plays
//! - ranked: total score of the picked plays on ranked and approved beatmaps

use bancho::GameMode;

use crate::database::{DatabaseResult, Pool};
use crate::filter::Filter;
use crate::ids::{ScoreId, UserId};
use crate::query;

pub mod summary;
pub use summary::{BestPlay, Summary};

/// Which tiers to recompute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tiers
{
	pub performance: bool,
	pub lifetime: bool,
	pub ranked: bool,
}

impl Tiers
{
	pub const ALL: Self = Self { performance: true, lifetime: true, ranked: true };
	pub const NONE: Self = Self { performance: false, lifetime: false, ranked: false };

	pub const fn is_empty(self) -> bool
	{
		!(self.performance || self.lifetime || self.ranked)
	}
}

impl Default for Tiers
{
	/// Only the performance tier.
	fn default() -> Self
	{
		Self { performance: true, ..Self::NONE }
	}
}

/// Recomputes the enabled `tiers` for every user and mode selected by `filter`.
///
/// Returns the number of affected rows; if no tier is enabled, nothing is executed.
#[instrument(skip(pool), err)]
pub async fn aggregate(pool: &Pool, filter: &Filter, tiers: Tiers) -> DatabaseResult<u64>
{
	let Some(sql) = query::aggregate_statistics(filter, tiers) else {
		debug!("no statistics tier enabled");
		return Ok(0);
	};

	let rows_affected = sql.query().execute(pool).await?.rows_affected();

	info!(rows_affected, "aggregated statistics");

	Ok(rows_affected)
}

/// The pp and accuracy currently stored for a user.
#[derive(Debug, Clone, Copy, PartialEq, sqlx::FromRow)]
pub struct StoredStatistics
{
	pub pp: u32,
	pub acc: f32,
}

/// A user's performance, computed from their picked plays and as currently stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Profile
{
	pub computed: Summary,
	pub stored: Option<StoredStatistics>,
}

#[derive(Debug, sqlx::FromRow)]
struct PickedRow
{
	id: ScoreId,
	pp: f32,
	acc: f32,
}

/// Computes the performance tier of a single user without writing anything.
#[instrument(skip(pool), err)]
pub async fn profile(pool: &Pool, user_id: UserId, mode: GameMode) -> DatabaseResult<Profile>
{
	let plays = query::picked_plays(user_id, mode)
		.query_as::<PickedRow>()
		.fetch_all(pool)
		.await?
		.into_iter()
		.map(|row| BestPlay { id: row.id, pp: f64::from(row.pp), accuracy: f64::from(row.acc) })
		.collect::<Vec<_>>();

	let stored = query::stored_statistics(user_id, mode)
		.query_as::<StoredStatistics>()
		.fetch_optional(pool)
		.await?;

	Ok(Profile { computed: summary::summarize(&plays), stored })
}

#[cfg(test)]
mod tests
{
	use super::Tiers;

	#[test]
	fn tiers()
	{
		assert!(Tiers::NONE.is_empty());
		assert!(!Tiers::ALL.is_empty());
		assert!(!Tiers::default().is_empty());
		assert!(!Tiers { ranked: true, ..Tiers::NONE }.is_empty());
	}
}
