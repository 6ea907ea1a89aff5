//! Performance recalculation.
//!
//! Plays matching a [`Filter`] are read grouped by beatmap and mode, calculated on a pool of
//! blocking workers, and written back one group per transaction.

use std::num::NonZero;
use std::sync::Arc;

use crate::database::{DatabaseResult, Pool};
use crate::filter::Filter;
use crate::performance::PerformanceCalculator;
use crate::progress::Progress;
use crate::query;

mod group;
pub use group::{Group, read_groups};

mod sink;
pub use sink::{DatabaseSink, PerformanceSink};

mod scheduler;
pub use scheduler::{Report, Scheduler};

#[cfg(test)]
mod tests;

/// Tuning knobs for [`recalculate()`].
#[derive(Debug, Clone, Copy, bon::Builder)]
pub struct Options
{
	/// How many groups are calculated at the same time.
	#[builder(default = Options::DEFAULT_WORKERS)]
	pub workers: NonZero<usize>,

	/// How many plays are processed between two progress messages.
	#[builder(default = Options::DEFAULT_PROGRESS_INTERVAL)]
	pub progress_interval: NonZero<u64>,
}

impl Options
{
	pub const DEFAULT_WORKERS: NonZero<usize> = match NonZero::new(4) {
		Some(workers) => workers,
		None => unreachable!(),
	};

	pub const DEFAULT_PROGRESS_INTERVAL: NonZero<u64> = match NonZero::new(10_000) {
		Some(interval) => interval,
		None => unreachable!(),
	};
}

impl Default for Options
{
	fn default() -> Self
	{
		Self::builder().build()
	}
}

/// Recalculates the performance of every play matching `filter`.
#[instrument(skip(pool, calculator, sink), err)]
pub async fn recalculate<C, S>(
	pool: &Pool,
	filter: &Filter,
	calculator: Arc<C>,
	sink: Arc<S>,
	options: Options,
) -> DatabaseResult<Report>
where
	C: PerformanceCalculator,
	S: PerformanceSink,
{
	let (total,) = query::count_plays(filter)
		.query_as::<(i64,)>()
		.fetch_one(pool)
		.await?;

	let total = u64::try_from(total).unwrap_or_default();

	info!(plays = total, workers = options.workers.get(), "recalculating performance");

	let progress = Arc::new(Progress::new("performance", total, options.progress_interval));
	let sql = query::group_plays(filter);
	let report = Scheduler::new(calculator, sink, options.workers, progress)
		.run(read_groups(pool, &sql))
		.await?;

	info!(
		groups = report.groups,
		skipped = report.skipped,
		failed = report.failed,
		rows_affected = report.rows_affected,
		"recalculated performance",
	);

	Ok(report)
}
