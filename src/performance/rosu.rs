use std::io;
use std::path::{Path, PathBuf};

use bancho::{GameMode, MapMode};
use rosu_pp::any::PerformanceAttributes;
use rosu_pp::{Beatmap, Performance};

use super::{PerformanceCalculator, PlayInput, Source};
use crate::ids::MapId;

/// An error returned by [`RosuCalculator`].
#[derive(Debug, Display, Error)]
pub enum CalculatorError
{
	#[display("failed to read beatmap file at {path:?}")]
	ReadBeatmap
	{
		path: PathBuf, source: io::Error
	},
}

/// A [`PerformanceCalculator`] backed by [`rosu_pp`].
///
/// Beatmaps are read from `<directory>/<id>.osu`, the layout bancho.py uses for its beatmap
/// cache.
#[derive(Debug, Clone)]
pub struct RosuCalculator
{
	directory: Box<Path>,
}

impl RosuCalculator
{
	pub fn new(directory: impl Into<Box<Path>>) -> Self
	{
		Self { directory: directory.into() }
	}

	pub fn beatmap_path(&self, map_id: MapId) -> PathBuf
	{
		self.directory.join(format!("{map_id}.osu"))
	}
}

impl PerformanceCalculator for RosuCalculator
{
	type Beatmap = Beatmap;
	type Attributes = PerformanceAttributes;
	type Error = CalculatorError;

	fn load(&self, map_id: MapId, _map_md5: &str) -> Result<Option<Self::Beatmap>, Self::Error>
	{
		let path = self.beatmap_path(map_id);

		match Beatmap::from_path(&path) {
			Ok(beatmap) => Ok(Some(beatmap)),
			Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
			Err(source) => Err(CalculatorError::ReadBeatmap { path, source }),
		}
	}

	fn calculate(
		&self,
		source: Source<'_, Self::Beatmap, Self::Attributes>,
		mode: GameMode,
		play: &PlayInput,
	) -> Result<Self::Attributes, Self::Error>
	{
		let performance = match source {
			Source::Beatmap(beatmap) => Performance::new(beatmap),
			Source::Attributes(attributes) => Performance::new(attributes.clone()),
		};

		let attributes = performance
			.mode_or_ignore(convert_mode(mode.map_mode()))
			.mods(play.mods)
			.combo(play.combo)
			.n_geki(play.hits.geki)
			.n300(play.hits.n300)
			.n_katu(play.hits.katu)
			.n100(play.hits.n100)
			.n50(play.hits.n50)
			.misses(play.hits.misses)
			.calculate();

		Ok(attributes)
	}

	fn performance(attributes: &Self::Attributes) -> f64
	{
		attributes.pp()
	}
}

fn convert_mode(mode: MapMode) -> rosu_pp::model::mode::GameMode
{
	match mode {
		MapMode::Osu => rosu_pp::model::mode::GameMode::Osu,
		MapMode::Taiko => rosu_pp::model::mode::GameMode::Taiko,
		MapMode::Catch => rosu_pp::model::mode::GameMode::Catch,
		MapMode::Mania => rosu_pp::model::mode::GameMode::Mania,
	}
}
