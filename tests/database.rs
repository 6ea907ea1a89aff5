//! Tests that run the generated statements against a real MySQL server.
//!
//! They need `DATABASE_URL` to point at a server `sqlx` may create test databases on, so they
//! are ignored by default: `cargo test -- --ignored`.

use std::convert::Infallible;
use std::num::NonZero;
use std::sync::Arc;

use bancho::{GameMode, ScoreStatus};
use nyamatrix::Filter;
use nyamatrix::database::Pool;
use nyamatrix::ids::{MapId, ScoreId, UserId};
use nyamatrix::performance::{PerformanceCalculator, PlayInput, Source};
use nyamatrix::recalc::{self, DatabaseSink, PerformanceSink};
use nyamatrix::statistics::{self, Tiers};
use nyamatrix::status::{self, FailedPlays};

const MAP_MD5: &str = "a5b99395a42bd55bc5eb1d2411cbdf8b";

/// Uses the combo of a play as its performance.
struct ComboCalculator;

impl PerformanceCalculator for ComboCalculator
{
	type Beatmap = ();
	type Attributes = f64;
	type Error = Infallible;

	fn load(&self, _map_id: MapId, _map_md5: &str) -> Result<Option<()>, Infallible>
	{
		Ok(Some(()))
	}

	fn calculate(
		&self,
		_source: Source<'_, (), f64>,
		_mode: GameMode,
		play: &PlayInput,
	) -> Result<f64, Infallible>
	{
		Ok(f64::from(play.combo))
	}

	fn performance(attributes: &f64) -> f64
	{
		*attributes
	}
}

/// A row of `scores`; everything not given is irrelevant to the test.
#[derive(Clone, Copy)]
struct Play
{
	id: u64,
	map_md5: &'static str,
	mode: u8,
	score: i64,
	pp: f32,
	acc: f32,
	max_combo: i32,
	grade: &'static str,
	status: u8,
}

impl Play
{
	const fn new(id: u64) -> Self
	{
		Self {
			id,
			map_md5: MAP_MD5,
			mode: 0,
			score: 1_000,
			pp: 0.0,
			acc: 98.5,
			max_combo: 100,
			grade: "A",
			status: 1,
		}
	}

	async fn insert(self, pool: &Pool)
	{
		sqlx::query(
			"INSERT INTO scores (id, map_md5, score, pp, acc, max_combo, mods, n300, n100, n50, \
			 nmiss, ngeki, nkatu, grade, status, mode, play_time, time_elapsed, userid) VALUES (?, \
			 ?, ?, ?, ?, ?, 0, 100, 0, 0, 0, 0, 0, ?, ?, ?, NOW(), 60000, 3)",
		)
		.bind(self.id)
		.bind(self.map_md5)
		.bind(self.score)
		.bind(self.pp)
		.bind(self.acc)
		.bind(self.max_combo)
		.bind(self.grade)
		.bind(self.status)
		.bind(self.mode)
		.execute(pool)
		.await
		.unwrap();
	}
}

async fn insert_map(pool: &Pool, id: i32, md5: &str)
{
	sqlx::query("INSERT INTO maps (id, set_id, status, md5, mode) VALUES (?, 1, 2, ?, 0)")
		.bind(id)
		.bind(md5)
		.execute(pool)
		.await
		.unwrap();
}

/// Inserts user 3, beatmap 75 and the given plays.
async fn seed_with(pool: &Pool, plays: &[Play])
{
	sqlx::query("INSERT INTO users (id, name, safe_name, priv, country) VALUES (3, 'nya', 'nya', 3, 'de')")
		.execute(pool)
		.await
		.unwrap();

	insert_map(pool, 75, MAP_MD5).await;

	sqlx::query("INSERT INTO stats (id, mode) VALUES (3, 0)")
		.execute(pool)
		.await
		.unwrap();

	for &play in plays {
		play.insert(pool).await;
	}
}

async fn seed(pool: &Pool)
{
	seed_with(pool, &[
		Play { score: 1_000, max_combo: 100, grade: "A", status: 1, ..Play::new(1) },
		Play { score: 2_000, max_combo: 300, grade: "S", status: 2, ..Play::new(2) },
		Play { score: 3_000, max_combo: 200, grade: "F", status: 1, ..Play::new(3) },
	])
	.await;
}

async fn pp(pool: &Pool) -> Vec<(ScoreId, f32)>
{
	sqlx::query_as("SELECT id, pp FROM scores ORDER BY id")
		.fetch_all(pool)
		.await
		.unwrap()
}

async fn statuses(pool: &Pool) -> Vec<(ScoreId, ScoreStatus)>
{
	sqlx::query_as("SELECT id, status FROM scores ORDER BY id")
		.fetch_all(pool)
		.await
		.unwrap()
}

#[ignore = "requires a MySQL server"]
#[sqlx::test(migrations = "database/migrations")]
async fn recalculates_matching_plays(pool: Pool)
{
	seed(&pool).await;

	let filter = Filter::builder().modes([GameMode::VanillaOsu]).build();
	let report = recalc::recalculate(
		&pool,
		&filter,
		Arc::new(ComboCalculator),
		Arc::new(DatabaseSink::new(pool.clone(), DatabaseSink::DEFAULT_CHUNK_SIZE)),
		recalc::Options::default(),
	)
	.await
	.unwrap();

	assert_eq!(report.groups, 1);
	assert_eq!(report.rows_affected, 3);

	assert_eq!(pp(&pool).await, [
		(ScoreId::from(1), 100.0),
		(ScoreId::from(2), 300.0),
		(ScoreId::from(3), 200.0)
	]);
}

#[ignore = "requires a MySQL server"]
#[sqlx::test(migrations = "database/migrations")]
async fn nothing_matches(pool: Pool)
{
	seed(&pool).await;

	let filter = Filter::builder().user_ids([UserId::from(4)]).build();
	let report = recalc::recalculate(
		&pool,
		&filter,
		Arc::new(ComboCalculator),
		Arc::new(DatabaseSink::new(pool.clone(), DatabaseSink::DEFAULT_CHUNK_SIZE)),
		recalc::Options::default(),
	)
	.await
	.unwrap();

	assert_eq!(report, recalc::Report::default());
}

#[ignore = "requires a MySQL server"]
#[sqlx::test(migrations = "database/migrations")]
async fn reconciles_statuses(pool: Pool)
{
	seed(&pool).await;

	sqlx::query("UPDATE scores SET pp = max_combo")
		.execute(&pool)
		.await
		.unwrap();

	let filter = Filter::default();
	let preview = status::preview(&pool, &filter, FailedPlays::Include)
		.await
		.unwrap();

	status::reconcile(&pool, &filter, FailedPlays::Include)
		.await
		.unwrap();

	// the failed play has more pp than the first one, but can never be picked
	let expected = [
		(ScoreId::from(1), ScoreStatus::Normal),
		(ScoreId::from(2), ScoreStatus::Picked),
		(ScoreId::from(3), ScoreStatus::Dnf),
	];

	assert_eq!(statuses(&pool).await, expected);
	assert_eq!(preview.plays, 3);
	assert_eq!(preview.changes.get(&ScoreStatus::Dnf), Some(&1));

	status::reconcile(&pool, &filter, FailedPlays::Include)
		.await
		.unwrap();

	assert_eq!(statuses(&pool).await, expected);
}

#[ignore = "requires a MySQL server"]
#[sqlx::test(migrations = "database/migrations")]
async fn ties_and_worthless_plays(pool: Pool)
{
	seed_with(&pool, &[
		// equal pp, the higher score wins
		Play { pp: 50.0, score: 1_000, ..Play::new(10) },
		Play { pp: 50.0, score: 2_000, ..Play::new(11) },
		// picked before, but worth nothing now
		Play { pp: 0.0, grade: "S", status: 2, ..Play::new(12) },
		// equal pp and score, the newer play wins
		Play { mode: 4, pp: 80.0, score: 500, ..Play::new(20) },
		Play { mode: 4, pp: 80.0, score: 500, ..Play::new(21) },
	])
	.await;

	let filter = Filter::default();
	let expected = [
		(ScoreId::from(10), ScoreStatus::Normal),
		(ScoreId::from(11), ScoreStatus::Picked),
		(ScoreId::from(12), ScoreStatus::Dnf),
		(ScoreId::from(20), ScoreStatus::Normal),
		(ScoreId::from(21), ScoreStatus::Picked),
	];

	let preview = status::preview(&pool, &filter, FailedPlays::Exclude)
		.await
		.unwrap();

	status::reconcile(&pool, &filter, FailedPlays::Exclude)
		.await
		.unwrap();

	assert_eq!(statuses(&pool).await, expected);
	assert_eq!(preview.partitions, 2);
	assert_eq!(preview.changes.get(&ScoreStatus::Picked), Some(&2));
	assert_eq!(preview.changes.get(&ScoreStatus::Dnf), Some(&1));
}

#[ignore = "requires a MySQL server"]
#[sqlx::test(migrations = "database/migrations")]
async fn writes_across_chunk_boundaries(pool: Pool)
{
	seed(&pool).await;

	let sink = DatabaseSink::new(pool.clone(), NonZero::new(2).unwrap());
	let rows_affected = sink
		.write(&[(ScoreId::from(1), 10.0), (ScoreId::from(2), 20.0), (ScoreId::from(3), 30.0)])
		.await
		.unwrap();

	assert_eq!(rows_affected, 3);
	assert_eq!(pp(&pool).await, [
		(ScoreId::from(1), 10.0),
		(ScoreId::from(2), 20.0),
		(ScoreId::from(3), 30.0)
	]);
}

#[ignore = "requires a MySQL server"]
#[sqlx::test(migrations = "database/migrations")]
async fn equal_pp_is_weighted_by_accuracy(pool: Pool)
{
	const OTHER_MD5: &str = "0cc175b9c0f1b6a831c399e269772661";

	seed_with(&pool, &[
		Play { pp: 100.0, acc: 90.0, status: 2, ..Play::new(30) },
		Play { map_md5: OTHER_MD5, pp: 100.0, acc: 100.0, status: 2, ..Play::new(31) },
	])
	.await;

	insert_map(&pool, 76, OTHER_MD5).await;

	statistics::aggregate(&pool, &Filter::default(), Tiers::default())
		.await
		.unwrap();

	let (acc,) = sqlx::query_as::<_, (f32,)>("SELECT acc FROM stats WHERE id = 3 AND mode = 0")
		.fetch_one(&pool)
		.await
		.unwrap();

	// (100 + 0.95 * 90) / 1.95
	assert!((acc - 95.128).abs() < 0.01, "acc = {acc}");
}

#[ignore = "requires a MySQL server"]
#[sqlx::test(migrations = "database/migrations")]
async fn aggregates_statistics(pool: Pool)
{
	seed(&pool).await;

	sqlx::query("UPDATE scores SET pp = 100 WHERE id = 2")
		.execute(&pool)
		.await
		.unwrap();

	let rows_affected = statistics::aggregate(&pool, &Filter::default(), Tiers::ALL)
		.await
		.unwrap();

	assert_eq!(rows_affected, 1);

	let (pp, tscore, rscore, s_count) = sqlx::query_as::<_, (u32, u64, u64, u32)>(
		"SELECT pp, tscore, rscore, s_count FROM stats WHERE id = 3 AND mode = 0",
	)
	.fetch_one(&pool)
	.await
	.unwrap();

	let profile = statistics::profile(&pool, UserId::from(3), GameMode::VanillaOsu)
		.await
		.unwrap();

	assert_eq!(f64::from(pp), profile.computed.total().round());
	assert_eq!(tscore, 6_000);
	assert_eq!(rscore, 2_000);
	assert_eq!(s_count, 1);
	assert_eq!(profile.stored.map(|stored| stored.pp), Some(pp));
}

#[ignore = "requires a MySQL server"]
#[sqlx::test(migrations = "database/migrations")]
async fn no_tiers_touch_nothing(pool: Pool)
{
	seed(&pool).await;

	let rows_affected = statistics::aggregate(&pool, &Filter::default(), Tiers::NONE)
		.await
		.unwrap();

	assert_eq!(rows_affected, 0);
}
