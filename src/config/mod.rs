#![allow(missing_copy_implementations, reason = "configs won't be copied around")]

mod beatmaps;
mod cache;
mod database;
mod leaderboard;
mod recalculation;
mod runtime;
pub(crate) mod tracing;

use std::fs;
use std::path::Path;

use color_eyre::Section;
use color_eyre::eyre::{self, WrapErr};
use serde::Deserialize;

pub(crate) use self::beatmaps::BeatmapsConfig;
pub(crate) use self::cache::CacheConfig;
pub(crate) use self::database::DatabaseConfig;
pub(crate) use self::leaderboard::LeaderboardConfig;
pub(crate) use self::recalculation::RecalculationConfig;
pub(crate) use self::runtime::RuntimeConfig;
pub(crate) use self::tracing::TracingConfig;

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub(crate) struct Config
{
	pub runtime: RuntimeConfig,
	pub tracing: TracingConfig,
	pub database: DatabaseConfig,
	pub cache: CacheConfig,
	pub beatmaps: BeatmapsConfig,
	pub recalculation: RecalculationConfig,
	pub leaderboard: LeaderboardConfig,
}

impl Config
{
	/// Loads the configuration file at `path`, or the defaults if there is none.
	pub(crate) fn load(path: Option<&Path>) -> eyre::Result<Self>
	{
		match path {
			Some(path) => Self::load_from_file(path),
			None => Ok(Self::default()),
		}
	}

	pub(crate) fn load_from_file(path: impl AsRef<Path>) -> eyre::Result<Self>
	{
		let file = fs::read_to_string(path.as_ref())
			.wrap_err_with(|| format!("failed to read configuration file at {:?}", path.as_ref()))
			.suggestion("create the file or run without `--config` to use the defaults")?;

		toml::from_str(&file).wrap_err("failed to parse configuration file")
	}
}
