use std::num::NonZero;
use std::sync::Arc;

use bancho::GameMode;
use futures_util::stream;

use super::group::{PlayRow, group_rows};
use super::sink::bulk_update;
use super::{DatabaseSink, Report, Scheduler};
use crate::database::{DatabaseError, DatabaseResult};
use crate::ids::{MapId, ScoreId};
use crate::progress::Progress;
use crate::testing::{FakeCalculator, RecordingSink};

fn row(map_id: i32, mode: GameMode, score_id: u64) -> DatabaseResult<PlayRow>
{
	Ok(PlayRow {
		map_id: MapId::from(map_id),
		map_md5: format!("{map_id:032x}"),
		mode,
		id: ScoreId::from(score_id),
		mods: 0,
		max_combo: 500,
		ngeki: 0,
		n300: 400,
		nkatu: 0,
		n100: 10,
		n50: 0,
		nmiss: 1,
	})
}

fn scheduler(
	calculator: FakeCalculator,
	sink: &Arc<RecordingSink>,
	workers: usize,
) -> Scheduler<FakeCalculator, RecordingSink>
{
	Scheduler::new(
		Arc::new(calculator),
		Arc::clone(sink),
		NonZero::new(workers).unwrap(),
		Arc::new(Progress::new("test", 0, NonZero::<u64>::MIN)),
	)
}

#[tokio::test]
async fn writes_one_batch_per_group()
{
	let calculator = FakeCalculator::with_values([(1, 42.0), (2, f64::NAN)]);
	let sink = Arc::new(RecordingSink::default());
	let rows = stream::iter([row(7, GameMode::VanillaOsu, 1), row(7, GameMode::VanillaOsu, 2)]);

	let report = scheduler(calculator, &sink, 4)
		.run(group_rows(rows))
		.await
		.unwrap();

	assert_eq!(report, Report { groups: 1, skipped: 0, failed: 0, rows_affected: 2 });
	assert_eq!(sink.batches(), [vec![(ScoreId::from(1), 42.0), (ScoreId::from(2), 0.0)]]);
}

#[tokio::test]
async fn same_map_in_different_modes_is_two_groups()
{
	let calculator = FakeCalculator::with_values([(1, 100.0), (2, 200.0), (3, 300.0)]);
	let sink = Arc::new(RecordingSink::default());
	let rows = stream::iter([
		row(7, GameMode::VanillaOsu, 1),
		row(7, GameMode::RelaxOsu, 2),
		row(8, GameMode::RelaxOsu, 3),
	]);

	let report = scheduler(calculator, &sink, 2)
		.run(group_rows(rows))
		.await
		.unwrap();

	assert_eq!(report.groups, 3);
	assert_eq!(sink.batches().len(), 3);
}

#[tokio::test]
async fn maps_sharing_an_id_are_kept_apart()
{
	let calculator = FakeCalculator::with_values([(1, 100.0), (2, 200.0)]);
	let sink = Arc::new(RecordingSink::default());
	let mut other_server = row(7, GameMode::VanillaOsu, 2);

	if let Ok(row) = other_server.as_mut() {
		row.map_md5 = "f".repeat(32);
	}

	let rows = stream::iter([row(7, GameMode::VanillaOsu, 1), other_server]);
	let report = scheduler(calculator, &sink, 1)
		.run(group_rows(rows))
		.await
		.unwrap();

	assert_eq!(report.groups, 2);
	assert_eq!(
		sink.batches(),
		[vec![(ScoreId::from(1), 100.0)], vec![(ScoreId::from(2), 200.0)]]
	);
}

#[tokio::test]
async fn nothing_to_do()
{
	let sink = Arc::new(RecordingSink::default());
	let rows = stream::iter(Vec::<DatabaseResult<PlayRow>>::new());

	let report = scheduler(FakeCalculator::default(), &sink, 4)
		.run(group_rows(rows))
		.await
		.unwrap();

	assert_eq!(report, Report::default());
	assert!(sink.batches().is_empty());
}

#[tokio::test]
async fn missing_beatmap_is_skipped()
{
	let mut calculator = FakeCalculator::with_values([(1, 100.0), (2, 200.0)]);
	calculator.missing_maps.insert(MapId::from(7));

	let sink = Arc::new(RecordingSink::default());
	let rows = stream::iter([row(7, GameMode::VanillaOsu, 1), row(8, GameMode::VanillaOsu, 2)]);

	let report = scheduler(calculator, &sink, 1)
		.run(group_rows(rows))
		.await
		.unwrap();

	assert_eq!(report.skipped, 1);
	assert_eq!(sink.batches(), [vec![(ScoreId::from(2), 200.0)]]);
}

#[tokio::test]
async fn failed_write_drops_only_that_group()
{
	let calculator = FakeCalculator::with_values([(1, 100.0), (2, 200.0), (3, 300.0)]);
	let sink = Arc::new(RecordingSink {
		fail_on: [ScoreId::from(2)].into_iter().collect(),
		..Default::default()
	});
	let rows = stream::iter([
		row(7, GameMode::VanillaOsu, 1),
		row(8, GameMode::VanillaOsu, 2),
		row(9, GameMode::VanillaOsu, 3),
	]);

	let report = scheduler(calculator, &sink, 2)
		.run(group_rows(rows))
		.await
		.unwrap();

	assert_eq!(report.groups, 2);
	assert_eq!(report.failed, 1);
	assert_eq!(
		sink.batches(),
		[vec![(ScoreId::from(1), 100.0)], vec![(ScoreId::from(3), 300.0)]]
	);
}

#[tokio::test]
async fn read_error_is_returned_after_in_flight_groups_finish()
{
	let calculator = FakeCalculator::with_values([(1, 100.0)]);
	let sink = Arc::new(RecordingSink::default());
	let rows = stream::iter([
		row(7, GameMode::VanillaOsu, 1),
		row(8, GameMode::VanillaOsu, 2),
		Err(DatabaseError::from(sqlx::Error::PoolClosed)),
	]);

	let result = scheduler(calculator, &sink, 4).run(group_rows(rows)).await;

	assert!(result.is_err_and(|error| error.is_connectivity()));

	// the group that was complete before the error still got written
	assert_eq!(sink.batches(), [vec![(ScoreId::from(1), 100.0)]]);
}

#[test]
fn bulk_update_binds_every_row_of_the_chunk()
{
	let chunk = [(ScoreId::from(1), 42.0), (ScoreId::from(2), 0.0)];
	let query = bulk_update(&chunk);

	assert_eq!(
		query.sql(),
		"UPDATE scores SET pp = CASE id WHEN ? THEN ? WHEN ? THEN ? END WHERE id IN (?, ?)",
	);
}

#[test]
fn chunks_fit_into_one_statement()
{
	assert_eq!(DatabaseSink::MAX_CHUNK_SIZE.get() * 3, 65_535);
	assert!(DatabaseSink::DEFAULT_CHUNK_SIZE <= DatabaseSink::MAX_CHUNK_SIZE);
}
