use std::error::Error;
use std::num::NonZero;
use std::pin::pin;
use std::sync::Arc;

use futures_util::{Stream, StreamExt as _};
use tokio::task::{self, JoinError, JoinSet};

use super::{Group, PerformanceSink};
use crate::database::{DatabaseError, DatabaseResult};
use crate::performance::{self, PerformanceCalculator};
use crate::progress::Progress;

/// Summary of a recalculation run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Report
{
	/// Groups whose results were written.
	pub groups: u64,

	/// Groups whose beatmap was not available.
	pub skipped: u64,

	/// Groups that were dropped because of an error.
	pub failed: u64,

	/// Rows updated in the database.
	pub rows_affected: u64,
}

#[derive(Debug)]
enum Outcome
{
	Written(u64),
	Skipped,
	Failed,
	Aborted(DatabaseError),
}

/// Runs performance calculations for a stream of groups on a bounded number of workers.
#[derive(Debug)]
pub struct Scheduler<C, S>
{
	calculator: Arc<C>,
	sink: Arc<S>,
	workers: NonZero<usize>,
	progress: Arc<Progress>,
}

impl<C, S> Scheduler<C, S>
where
	C: PerformanceCalculator,
	S: PerformanceSink,
{
	pub(crate) fn new(
		calculator: Arc<C>,
		sink: Arc<S>,
		workers: NonZero<usize>,
		progress: Arc<Progress>,
	) -> Self
	{
		Self { calculator, sink, workers, progress }
	}

	/// Processes every group of `groups`.
	///
	/// At most `workers` groups are in flight at any time; the next group is only pulled from
	/// the stream once a worker is free. A failure to read from `groups`, or losing the
	/// connection to the database, stops the run. Groups that are already in flight are always
	/// finished before this function returns.
	pub async fn run<G>(&self, groups: G) -> DatabaseResult<Report>
	where
		G: Stream<Item = DatabaseResult<Group>>,
	{
		let mut groups = pin!(groups);
		let mut tasks = JoinSet::new();
		let mut report = Report::default();
		let mut fatal = None;

		while fatal.is_none() {
			while tasks.len() >= self.workers.get() {
				let Some(result) = tasks.join_next().await else {
					break;
				};

				report.record(result, &mut fatal);
			}

			if fatal.is_some() {
				break;
			}

			match groups.next().await {
				None => break,
				Some(Err(error)) => fatal = Some(error),
				Some(Ok(group)) => {
					tasks.spawn(process_group(
						Arc::clone(&self.calculator),
						Arc::clone(&self.sink),
						Arc::clone(&self.progress),
						group,
					));
				},
			}
		}

		while let Some(result) = tasks.join_next().await {
			report.record(result, &mut fatal);
		}

		match fatal {
			Some(error) => Err(error),
			None => Ok(report),
		}
	}
}

impl Report
{
	fn record(&mut self, result: Result<Outcome, JoinError>, fatal: &mut Option<DatabaseError>)
	{
		match result {
			Ok(Outcome::Written(rows_affected)) => {
				self.groups += 1;
				self.rows_affected += rows_affected;
			},
			Ok(Outcome::Skipped) => {
				self.skipped += 1;
			},
			Ok(Outcome::Failed) => {
				self.failed += 1;
			},
			Ok(Outcome::Aborted(error)) => {
				self.failed += 1;
				fatal.get_or_insert(error);
			},
			Err(error) => {
				error!(error = &error as &dyn Error, "recalculation task panicked");
				self.failed += 1;
			},
		}
	}
}

#[instrument(
	level = "debug",
	skip_all,
	fields(map_id = %group.map_id, mode = %group.mode, plays = group.plays.len()),
)]
async fn process_group<C, S>(
	calculator: Arc<C>,
	sink: Arc<S>,
	progress: Arc<Progress>,
	group: Group,
) -> Outcome
where
	C: PerformanceCalculator,
	S: PerformanceSink,
{
	let Group { map_id, map_md5, mode, plays } = group;
	let play_count = plays.len() as u64;

	let calculated = task::spawn_blocking(move || -> Result<_, C::Error> {
		let Some(beatmap) = calculator.load(map_id, &map_md5)? else {
			return Ok(None);
		};

		Ok(Some(performance::calculate_group(&*calculator, &beatmap, mode, &plays)))
	})
	.await;

	progress.advance(play_count);

	let performance = match calculated {
		Ok(Ok(Some(performance))) => performance,
		Ok(Ok(None)) => {
			debug!("beatmap is not available, skipping");
			return Outcome::Skipped;
		},
		Ok(Err(error)) => {
			error!(error = &error as &dyn Error, "failed to load beatmap");
			return Outcome::Failed;
		},
		Err(error) => {
			error!(error = &error as &dyn Error, "performance calculation panicked");
			return Outcome::Failed;
		},
	};

	match sink.write(&performance).await {
		Ok(rows_affected) => {
			trace!(rows_affected, "wrote performance values");
			Outcome::Written(rows_affected)
		},
		Err(error) if error.is_connectivity() => {
			error!(error = &error as &dyn Error, "lost connection to the database");
			Outcome::Aborted(error)
		},
		Err(error) => {
			error!(error = &error as &dyn Error, "failed to write performance values");
			Outcome::Failed
		},
	}
}
