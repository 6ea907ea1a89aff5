//! Running every stage in order.

use std::error::Error;
use std::num::NonZero;
use std::sync::Arc;

use crate::database::{DatabaseError, DatabaseResult, Pool};
use crate::filter::Filter;
use crate::leaderboard::{self, CacheError, LeaderboardSink, PublishError};
use crate::performance::PerformanceCalculator;
use crate::recalc::{self, PerformanceSink, Report};
use crate::statistics::{self, Tiers};
use crate::status::{self, FailedPlays};

/// Options for [`run()`].
#[derive(Debug, Clone, Copy, bon::Builder)]
pub struct Options
{
	#[builder(default)]
	pub recalculation: recalc::Options,

	#[builder(default)]
	pub failed: FailedPlays,

	#[builder(default = Tiers::ALL)]
	pub tiers: Tiers,

	#[builder(default = leaderboard::DEFAULT_BATCH_SIZE)]
	pub batch_size: NonZero<usize>,
}

impl Default for Options
{
	fn default() -> Self
	{
		Self::builder().build()
	}
}

/// What every stage did.
///
/// A stage that failed, or did not run, is [`None`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Outcome
{
	pub performance: Option<Report>,
	pub statuses: Option<u64>,
	pub statistics: Option<u64>,
	pub leaderboard: Option<u64>,
}

/// An error that stopped the pipeline.
#[derive(Debug, Display, Error, From)]
pub enum PipelineError
{
	#[display("lost connection to the database: {_0}")]
	Database(DatabaseError),

	#[display("lost connection to the cache: {_0}")]
	Cache(CacheError),
}

/// Recalculates performance, reconciles statuses, aggregates statistics and, if `publisher` is
/// given, republishes the leaderboards.
///
/// A stage that fails is logged and the next one runs anyway. Only losing the connection to the
/// database or the cache stops the pipeline.
#[instrument(skip(pool, calculator, sink, publisher), err)]
pub async fn run<C, S, L>(
	pool: &Pool,
	filter: &Filter,
	calculator: Arc<C>,
	sink: Arc<S>,
	publisher: Option<&mut L>,
	options: Options,
) -> Result<Outcome, PipelineError>
where
	C: PerformanceCalculator,
	S: PerformanceSink,
	L: LeaderboardSink,
{
	let mut outcome = Outcome::default();

	let report = recalc::recalculate(pool, filter, calculator, sink, options.recalculation).await;
	outcome.performance = settle("performance", report)?;

	let reconciled = status::reconcile(pool, filter, options.failed).await;
	outcome.statuses = settle("statuses", reconciled)?;

	let aggregated = statistics::aggregate(pool, filter, options.tiers).await;
	outcome.statistics = settle("statistics", aggregated)?;

	if let Some(sink) = publisher {
		let published = leaderboard::republish(
			pool,
			filter,
			sink,
			options.batch_size,
			options.recalculation.progress_interval,
		)
		.await;

		outcome.leaderboard = match published {
			Ok(published) => Some(published),
			Err(PublishError::Database(error)) => settle("leaderboard", Err(error))?,
			Err(PublishError::Cache(error)) if error.is_connectivity() => {
				return Err(PipelineError::Cache(error));
			},
			Err(PublishError::Cache(error)) => {
				error!(stage = "leaderboard", error = &error as &dyn Error, "stage failed");
				None
			},
		};
	}

	info!(?outcome, "pipeline finished");

	Ok(outcome)
}

/// Turns the result of a stage into its outcome.
///
/// Connectivity errors are returned, anything else is logged.
fn settle<T>(stage: &'static str, result: DatabaseResult<T>) -> Result<Option<T>, PipelineError>
{
	match result {
		Ok(value) => Ok(Some(value)),
		Err(error) if error.is_connectivity() => Err(PipelineError::Database(error)),
		Err(error) => {
			error!(stage, error = &error as &dyn Error, "stage failed");
			Ok(None)
		},
	}
}
