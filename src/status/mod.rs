//! Status reconciliation.
//!
//! Every `(user, mode, beatmap)` partition gets at most one picked play, the one that counts
//! towards the user's statistics.

use std::collections::BTreeMap;

use bancho::{GameMode, Grade, ScoreStatus};
use futures_util::TryStreamExt as _;

use crate::database::{DatabaseError, DatabaseResult, Pool};
use crate::filter::Filter;
use crate::ids::{ScoreId, UserId};
use crate::query;
use crate::stream::TryStreamExt as _;

pub mod plan;
pub use plan::{PlayState, Transition};

/// Whether failed plays take part in a reconciliation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum FailedPlays
{
	/// Failed plays keep whatever status they have.
	#[default]
	Exclude,

	/// Failed plays are set to [`ScoreStatus::Dnf`].
	Include,
}

impl From<bool> for FailedPlays
{
	fn from(include: bool) -> Self
	{
		if include { Self::Include } else { Self::Exclude }
	}
}

/// Reconciles the statuses of every partition touched by `filter`.
///
/// Returns the number of affected rows.
#[instrument(skip(pool), err)]
pub async fn reconcile(pool: &Pool, filter: &Filter, failed: FailedPlays) -> DatabaseResult<u64>
{
	let rows_affected = query::reconcile_statuses(filter, failed)
		.query()
		.execute(pool)
		.await?
		.rows_affected();

	info!(rows_affected, "reconciled statuses");

	Ok(rows_affected)
}

/// The changes a reconciliation would make.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Preview
{
	/// Number of partitions that were looked at.
	pub partitions: u64,

	/// Number of plays that were looked at.
	pub plays: u64,

	/// Number of plays that would change, by their new status.
	pub changes: BTreeMap<ScoreStatus, u64>,
}

impl Preview
{
	fn add(&mut self, partition: &[PlayState], failed: FailedPlays)
	{
		self.partitions += 1;
		self.plays += partition.len() as u64;

		for transition in plan::transitions(partition, failed) {
			*self.changes.entry(transition.to).or_default() += 1;
		}
	}
}

#[derive(Debug, sqlx::FromRow)]
struct PartitionRow
{
	id: ScoreId,
	userid: UserId,
	mode: GameMode,
	map_md5: String,
	pp: f32,
	score: i64,
	grade: Grade,
	status: ScoreStatus,
}

impl PartitionRow
{
	fn state(&self) -> PlayState
	{
		PlayState {
			id: self.id,
			pp: f64::from(self.pp),
			score: self.score,
			grade: self.grade,
			status: self.status,
		}
	}
}

/// Computes what [`reconcile()`] would do without writing anything.
#[instrument(skip(pool), err)]
pub async fn preview(pool: &Pool, filter: &Filter, failed: FailedPlays) -> DatabaseResult<Preview>
{
	let sql = query::partition_plays(filter, failed);
	let preview = sql
		.query_as::<PartitionRow>()
		.fetch(pool)
		.map_err(DatabaseError::from)
		.try_group_by(|row| (row.userid, row.mode, row.map_md5.clone()))
		.try_fold(Preview::default(), |mut preview, (_, rows)| async move {
			let partition = rows.iter().map(PartitionRow::state).collect::<Vec<_>>();
			preview.add(&partition, failed);
			Ok(preview)
		})
		.await?;

	info!(
		partitions = preview.partitions,
		plays = preview.plays,
		changes = ?preview.changes,
		"previewed status reconciliation",
	);

	Ok(preview)
}
