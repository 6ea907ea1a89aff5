//! Test doubles for the seams between the stages and the outside world.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{self, AtomicUsize};

use bancho::GameMode;

use crate::database::{DatabaseError, DatabaseResult};
use crate::ids::{MapId, ScoreId};
use crate::leaderboard::{CacheError, Entry, LeaderboardSink};
use crate::performance::{PerformanceCalculator, PlayInput, Source};
use crate::recalc::PerformanceSink;

#[derive(Debug, Display, Error)]
#[display("the engine gave up on score {_0}")]
pub(crate) struct FakeError(#[error(not(source))] pub(crate) ScoreId);

/// Returns a fixed performance value per score.
#[derive(Debug, Default)]
pub(crate) struct FakeCalculator
{
	pub(crate) values: HashMap<ScoreId, f64>,
	pub(crate) missing_maps: HashSet<MapId>,
	pub(crate) failing_scores: HashSet<ScoreId>,
	pub(crate) from_beatmap: AtomicUsize,
	pub(crate) from_attributes: AtomicUsize,
}

impl FakeCalculator
{
	pub(crate) fn with_values(values: impl IntoIterator<Item = (u64, f64)>) -> Self
	{
		Self {
			values: values
				.into_iter()
				.map(|(id, pp)| (ScoreId::from(id), pp))
				.collect(),
			..Default::default()
		}
	}
}

impl PerformanceCalculator for FakeCalculator
{
	type Beatmap = MapId;
	type Attributes = f64;
	type Error = FakeError;

	fn load(&self, map_id: MapId, _map_md5: &str) -> Result<Option<Self::Beatmap>, Self::Error>
	{
		Ok((!self.missing_maps.contains(&map_id)).then_some(map_id))
	}

	fn calculate(
		&self,
		source: Source<'_, Self::Beatmap, Self::Attributes>,
		_mode: GameMode,
		play: &PlayInput,
	) -> Result<Self::Attributes, Self::Error>
	{
		match source {
			Source::Beatmap(_) => self.from_beatmap.fetch_add(1, atomic::Ordering::SeqCst),
			Source::Attributes(_) => self.from_attributes.fetch_add(1, atomic::Ordering::SeqCst),
		};

		if self.failing_scores.contains(&play.id) {
			return Err(FakeError(play.id));
		}

		Ok(self.values.get(&play.id).copied().unwrap_or_default())
	}

	fn performance(attributes: &Self::Attributes) -> f64
	{
		*attributes
	}
}

/// Records every batch it receives.
#[derive(Debug, Default)]
pub(crate) struct RecordingSink
{
	pub(crate) batches: Mutex<Vec<Vec<(ScoreId, f64)>>>,
	pub(crate) fail_on: HashSet<ScoreId>,
}

impl RecordingSink
{
	pub(crate) fn batches(&self) -> Vec<Vec<(ScoreId, f64)>>
	{
		let mut batches = self.batches.lock().unwrap().clone();
		batches.sort_by_key(|batch| batch.first().map(|&(id, _)| id));
		batches
	}
}

impl PerformanceSink for RecordingSink
{
	async fn write(&self, performance: &[(ScoreId, f64)]) -> DatabaseResult<u64>
	{
		if performance.iter().any(|(id, _)| self.fail_on.contains(id)) {
			return Err(DatabaseError::from(sqlx::Error::RowNotFound));
		}

		self.batches.lock().unwrap().push(performance.to_vec());

		Ok(performance.len() as u64)
	}
}

/// Records every leaderboard entry it receives.
#[derive(Debug, Default)]
pub(crate) struct RecordingLeaderboard
{
	pub(crate) batches: Vec<Vec<Entry>>,
}

impl LeaderboardSink for RecordingLeaderboard
{
	async fn publish(&mut self, entries: &[Entry]) -> Result<(), CacheError>
	{
		self.batches.push(entries.to_vec());
		Ok(())
	}
}
