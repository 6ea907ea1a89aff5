use std::num::NonZero;

use bancho::GameMode;
use nyamatrix::recalc::{self, DatabaseSink};
use serde::{Deserialize, Deserializer, de};

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub(crate) struct RecalculationConfig
{
	/// How many beatmaps are calculated at the same time.
	pub workers: NonZero<usize>,

	/// How many rows are updated per statement.
	#[serde(deserialize_with = "deserialize_chunk_size")]
	pub write_chunk_size: NonZero<usize>,

	/// How many processed rows to wait for between two progress messages.
	pub progress_interval: NonZero<u64>,

	/// The modes to operate on if none are given on the command line.
	pub default_modes: Vec<GameMode>,
}

impl RecalculationConfig
{
	pub(crate) fn options(&self) -> recalc::Options
	{
		recalc::Options::builder()
			.workers(self.workers)
			.progress_interval(self.progress_interval)
			.build()
	}
}

impl Default for RecalculationConfig
{
	fn default() -> Self
	{
		Self {
			workers: recalc::Options::DEFAULT_WORKERS,
			write_chunk_size: DatabaseSink::DEFAULT_CHUNK_SIZE,
			progress_interval: recalc::Options::DEFAULT_PROGRESS_INTERVAL,
			default_modes: GameMode::ALL.to_vec(),
		}
	}
}

fn deserialize_chunk_size<'de, D>(deserializer: D) -> Result<NonZero<usize>, D::Error>
where
	D: Deserializer<'de>,
{
	let size = NonZero::<usize>::deserialize(deserializer)?;

	if size > DatabaseSink::MAX_CHUNK_SIZE {
		return Err(de::Error::custom(format_args!(
			"`write-chunk-size` may be at most {}",
			DatabaseSink::MAX_CHUNK_SIZE,
		)));
	}

	Ok(size)
}

#[cfg(test)]
mod tests
{
	use super::RecalculationConfig;

	#[test]
	fn chunk_size_has_to_fit_into_one_statement()
	{
		let largest = toml::from_str::<RecalculationConfig>("write-chunk-size = 21845").unwrap();

		assert_eq!(largest.write_chunk_size.get(), 21_845);
		assert!(toml::from_str::<RecalculationConfig>("write-chunk-size = 21846").is_err());
		assert!(toml::from_str::<RecalculationConfig>("write-chunk-size = 0").is_err());
	}
}
