use std::num::NonZero;

use crate::database::{DatabaseResult, Pool, QueryBuilder};
use crate::ids::ScoreId;

/// Where calculated performance values end up.
pub trait PerformanceSink: Send + Sync + 'static
{
	/// Writes the performance values of one group, all or nothing.
	///
	/// Returns the number of affected rows.
	fn write(
		&self,
		performance: &[(ScoreId, f64)],
	) -> impl Future<Output = DatabaseResult<u64>> + Send;
}

/// Updates `scores.pp` in bulk.
#[derive(Debug, Clone)]
pub struct DatabaseSink
{
	pool: Pool,
	chunk_size: NonZero<usize>,
}

impl DatabaseSink
{
	/// The default number of rows updated per statement.
	pub const DEFAULT_CHUNK_SIZE: NonZero<usize> = match NonZero::new(10_000) {
		Some(size) => size,
		None => unreachable!(),
	};

	/// The largest number of rows that fit into one statement.
	///
	/// Every row binds 3 parameters and MySQL accepts at most 65535 of them per statement.
	pub const MAX_CHUNK_SIZE: NonZero<usize> = match NonZero::new(21_845) {
		Some(size) => size,
		None => unreachable!(),
	};

	/// Creates a new sink; `chunk_size` is capped at [`DatabaseSink::MAX_CHUNK_SIZE`].
	pub fn new(pool: Pool, chunk_size: NonZero<usize>) -> Self
	{
		Self { pool, chunk_size: chunk_size.min(Self::MAX_CHUNK_SIZE) }
	}
}

/// Builds the `UPDATE` statement for one chunk of rows.
pub(super) fn bulk_update(chunk: &[(ScoreId, f64)]) -> QueryBuilder<'static>
{
	let mut query = QueryBuilder::new("UPDATE scores SET pp = CASE id");

	for &(score_id, pp) in chunk {
		query.push(" WHEN ").push_bind(score_id);
		query.push(" THEN ").push_bind(pp);
	}

	query.push(" END WHERE id IN (");

	let mut ids = query.separated(", ");

	for &(score_id, _) in chunk {
		ids.push_bind(score_id);
	}

	ids.push_unseparated(")");
	query
}

impl PerformanceSink for DatabaseSink
{
	#[instrument(level = "trace", skip_all, fields(plays = performance.len()), err)]
	async fn write(&self, performance: &[(ScoreId, f64)]) -> DatabaseResult<u64>
	{
		if performance.is_empty() {
			return Ok(0);
		}

		let mut txn = self.pool.begin().await?;
		let mut rows_affected = 0;

		for chunk in performance.chunks(self.chunk_size.get()) {
			rows_affected += bulk_update(chunk)
				.build()
				.persistent(false)
				.execute(&mut *txn)
				.await?
				.rows_affected();
		}

		txn.commit().await?;

		Ok(rows_affected)
	}
}
