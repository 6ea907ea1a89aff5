//! Performance (pp) calculation.
//!
//! The actual difficulty and performance math lives in an external engine that is wrapped by
//! [`PerformanceCalculator`]. This module only decides what to feed it, what to cache, and what
//! to do with the numbers it returns.

use std::error::Error;

use bancho::GameMode;

use crate::ids::{MapId, ScoreId};

mod cache;
pub use cache::AttributeCache;

mod rosu;
pub use rosu::{CalculatorError, RosuCalculator};

#[cfg(test)]
mod tests;

/// The highest performance value that is considered legitimate.
///
/// Anything above is treated the same as a calculation that produced garbage.
pub const MAX_PERFORMANCE: f64 = 9999.0;

/// Hit statistics of a play.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HitCounts
{
	pub geki: u32,
	pub n300: u32,
	pub katu: u32,
	pub n100: u32,
	pub n50: u32,
	pub misses: u32,
}

/// Everything the engine needs to know about a single play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayInput
{
	pub id: ScoreId,
	pub mods: u32,
	pub combo: u32,
	pub hits: HitCounts,
}

/// What a calculation starts from.
#[derive(Debug)]
pub enum Source<'a, B, A>
{
	/// The parsed beatmap; the engine has to compute difficulty attributes first.
	Beatmap(&'a B),

	/// Attributes returned by an earlier calculation with the same mods.
	Attributes(&'a A),
}

/// An engine that turns beatmaps and play inputs into performance values.
pub trait PerformanceCalculator: Send + Sync + 'static
{
	/// A parsed beatmap.
	type Beatmap: Send;

	/// Intermediate results that can be reused for plays with the same mods.
	type Attributes: Send;

	type Error: Error + Send + Sync + 'static;

	/// Loads the beatmap with the given ID.
	///
	/// Returns `Ok(None)` if the beatmap is not available.
	fn load(&self, map_id: MapId, map_md5: &str) -> Result<Option<Self::Beatmap>, Self::Error>;

	/// Calculates a single play.
	fn calculate(
		&self,
		source: Source<'_, Self::Beatmap, Self::Attributes>,
		mode: GameMode,
		play: &PlayInput,
	) -> Result<Self::Attributes, Self::Error>;

	/// Extracts the performance value from the result of [`calculate()`].
	///
	/// [`calculate()`]: PerformanceCalculator::calculate
	fn performance(attributes: &Self::Attributes) -> f64;
}

/// Replaces values that are not a finite number, or that are larger than [`MAX_PERFORMANCE`],
/// with `0.0`.
pub fn sanitize(performance: f64) -> f64
{
	if performance.is_finite() && performance <= MAX_PERFORMANCE {
		performance
	} else {
		0.0
	}
}

/// Calculates every play of a group that shares one beatmap and mode.
///
/// Attributes of calculations that had to start from the beatmap are cached per mods value and
/// reused for later plays with the same mods. Plays the engine fails on are logged and left out.
pub fn calculate_group<C>(
	calculator: &C,
	beatmap: &C::Beatmap,
	mode: GameMode,
	plays: &[PlayInput],
) -> Vec<(ScoreId, f64)>
where
	C: PerformanceCalculator + ?Sized,
{
	let mut cache = AttributeCache::<C::Attributes>::default();
	let mut results = Vec::with_capacity(plays.len());

	for play in plays {
		let source = match cache.get(play.mods) {
			Some(attributes) => Source::Attributes(attributes),
			None => Source::Beatmap(beatmap),
		};

		let from_beatmap = matches!(source, Source::Beatmap(_));

		match calculator.calculate(source, mode, play) {
			Ok(attributes) => {
				let raw = C::performance(&attributes);
				let performance = sanitize(raw);

				if performance != raw {
					warn!(score_id = %play.id, raw, "discarding invalid performance value");
				}

				if from_beatmap {
					cache.insert(play.mods, attributes);
				}

				results.push((play.id, performance));
			},
			Err(error) => {
				warn!(
					error = &error as &dyn Error,
					score_id = %play.id,
					"failed to calculate performance",
				);
			},
		}
	}

	trace!(plays = plays.len(), cached = cache.len(), "calculated group");

	results
}
