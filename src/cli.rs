use std::collections::BTreeSet;
use std::num::NonZero;
use std::path::Path;

use bancho::{GameMode, MapMode, MapStatus, ScoreStatus};
use clap::Parser;
use nyamatrix::filter::{Filter, TimeWindow};
use nyamatrix::ids::UserId;
use nyamatrix::statistics::Tiers;
use time::OffsetDateTime;
use url::Url;

use crate::config::Config;

pub(crate) fn args() -> Args
{
	Args::parse()
}

/// Recalculates performance, statuses, statistics and leaderboards of a bancho.py server.
#[derive(Debug, Parser)]
#[command(version)]
pub(crate) struct Args
{
	/// Path to the configuration file.
	#[arg(long = "config", global = true)]
	pub config_path: Option<Box<Path>>,

	/// MySQL URL to connect to.
	///
	/// This option takes precedence over the configuration file.
	#[arg(short = 'm', long, env = "DATABASE_URL", global = true)]
	pub database_url: Option<Url>,

	/// Redis URL to connect to.
	///
	/// This option takes precedence over the configuration file.
	#[arg(short = 'r', long, global = true)]
	pub redis_url: Option<Url>,

	/// Directory containing the `.osu` files.
	///
	/// This option takes precedence over the configuration file.
	#[arg(short = 'b', long, global = true)]
	pub beatmap_path: Option<Box<Path>>,

	/// How many beatmaps to calculate at the same time.
	///
	/// This option takes precedence over the configuration file.
	#[arg(long, global = true)]
	pub workers: Option<NonZero<usize>>,

	#[command(flatten)]
	pub filter: FilterArgs,

	#[command(subcommand)]
	pub command: Command,
}

#[derive(Debug, clap::Subcommand)]
pub(crate) enum Command
{
	/// Recalculate the performance of every matching play.
	Performance,

	/// Pick the best play of every user, mode and beatmap.
	Statuses
	{
		/// Also update failed plays, marking them as not counting.
		#[arg(long)]
		include_failed: bool,

		/// Only report what would change.
		#[arg(long)]
		dry_run: bool,
	},

	/// Recompute user statistics.
	Statistics
	{
		#[command(flatten)]
		tiers: TierArgs,

		/// Republish the leaderboards afterwards.
		#[arg(long)]
		publish: bool,
	},

	/// Republish the leaderboards.
	Leaderboard,

	/// Run every stage in order.
	Recalc
	{
		/// Also update failed plays, marking them as not counting.
		#[arg(long)]
		include_failed: bool,

		#[command(flatten)]
		tiers: TierArgs,
	},

	/// Compute a single user's performance from their picked plays, without writing anything.
	Profile
	{
		user: UserId,

		/// Number (`4`) or name (`rx!std`).
		mode: GameMode,
	},
}

/// Which plays to operate on. Every flag can be given more than once, or with comma separated
/// values.
#[derive(Debug, Default, clap::Args)]
pub(crate) struct FilterArgs
{
	/// Modes the play was submitted in, as number (`4`) or name (`rx!std`).
	///
	/// Defaults to `recalculation.default-modes` from the configuration file.
	#[arg(long = "mode", value_delimiter = ',', global = true)]
	pub modes: Vec<GameMode>,

	/// Modes of the beatmap the play was set on.
	#[arg(long = "map-mode", value_delimiter = ',', global = true)]
	pub map_modes: Vec<MapMode>,

	/// Statuses of the play. Defaults to every status except "did not finish".
	#[arg(long = "status", value_delimiter = ',', global = true)]
	pub score_statuses: Vec<ScoreStatus>,

	/// Ranked statuses of the beatmap the play was set on.
	#[arg(long = "map-status", value_delimiter = ',', global = true)]
	pub map_statuses: Vec<MapStatus>,

	/// Users who submitted the play.
	#[arg(long = "user", value_delimiter = ',', global = true)]
	pub user_ids: Vec<UserId>,

	/// Only plays submitted at or after this unix timestamp.
	#[arg(long, value_parser = parse_timestamp, global = true)]
	pub after: Option<OffsetDateTime>,

	/// Only plays submitted before this unix timestamp.
	#[arg(long, value_parser = parse_timestamp, global = true)]
	pub before: Option<OffsetDateTime>,
}

#[derive(Debug, Clone, Copy, clap::Args)]
pub(crate) struct TierArgs
{
	/// Do not recompute pp and accuracy.
	#[arg(long)]
	no_performance: bool,

	/// Recompute total score, play time and grade counts.
	#[arg(long)]
	lifetime: bool,

	/// Recompute ranked score.
	#[arg(long)]
	ranked: bool,
}

impl Args
{
	/// Applies any config overrides specified as CLI flags to the given `config` object.
	pub(crate) fn apply_to_config(&self, config: &mut Config)
	{
		if let Some(url) = &self.database_url {
			config.database.url = Some(url.clone());
		}

		if let Some(url) = &self.redis_url {
			config.cache.url = url.clone();
		}

		if let Some(path) = &self.beatmap_path {
			config.beatmaps.directory = path.clone();
		}

		if let Some(workers) = self.workers {
			config.recalculation.workers = workers;
		}
	}
}

impl FilterArgs
{
	pub(crate) fn into_filter(self, default_modes: &[GameMode]) -> Filter
	{
		let modes = if self.modes.is_empty() { default_modes.to_vec() } else { self.modes };

		Filter::builder()
			.modes(BTreeSet::from_iter(modes))
			.map_modes(BTreeSet::from_iter(self.map_modes))
			.score_statuses(BTreeSet::from_iter(self.score_statuses))
			.map_statuses(BTreeSet::from_iter(self.map_statuses))
			.user_ids(BTreeSet::from_iter(self.user_ids))
			.played(TimeWindow { after: self.after, before: self.before })
			.build()
	}
}

impl From<TierArgs> for Tiers
{
	fn from(args: TierArgs) -> Self
	{
		Self { performance: !args.no_performance, lifetime: args.lifetime, ranked: args.ranked }
	}
}

fn parse_timestamp(value: &str) -> Result<OffsetDateTime, String>
{
	let seconds = value
		.parse::<i64>()
		.map_err(|err| format!("`{value}` is not a unix timestamp: {err}"))?;

	OffsetDateTime::from_unix_timestamp(seconds).map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests
{
	use bancho::{GameMode, ScoreStatus};
	use clap::Parser;
	use nyamatrix::statistics::Tiers;

	use super::{Args, Command};

	#[test]
	fn filter_flags_work_after_the_subcommand()
	{
		let args = Args::try_parse_from([
			"nyamatrix",
			"statuses",
			"--include-failed",
			"--mode",
			"0,rx!std",
			"--status",
			"2",
			"--after",
			"1700000000",
		])
		.unwrap();

		assert!(matches!(args.command, Command::Statuses { include_failed: true, dry_run: false }));

		let filter = args.filter.into_filter(&GameMode::ALL);

		assert_eq!(filter.modes.into_iter().collect::<Vec<_>>(), [
			GameMode::VanillaOsu,
			GameMode::RelaxOsu
		]);
		assert_eq!(filter.score_statuses.into_iter().collect::<Vec<_>>(), [ScoreStatus::Picked]);
		assert_eq!(filter.played.after.map(|after| after.unix_timestamp()), Some(1_700_000_000));
		assert_eq!(filter.played.before, None);
	}

	#[test]
	fn default_modes_apply_without_mode_flag()
	{
		let args = Args::try_parse_from(["nyamatrix", "performance"]).unwrap();
		let filter = args.filter.into_filter(&[GameMode::VanillaTaiko]);

		assert_eq!(filter.modes.into_iter().collect::<Vec<_>>(), [GameMode::VanillaTaiko]);
	}

	#[test]
	fn tier_flags()
	{
		let args = Args::try_parse_from(["nyamatrix", "statistics", "--no-performance", "--ranked"])
			.unwrap();

		let Command::Statistics { tiers, publish } = args.command else {
			panic!("expected `statistics` command");
		};

		assert!(!publish);
		assert_eq!(Tiers::from(tiers), Tiers { ranked: true, ..Tiers::NONE });
	}

	#[test]
	fn invalid_timestamps_are_rejected()
	{
		assert!(Args::try_parse_from(["nyamatrix", "performance", "--before", "yesterday"]).is_err());
	}

	#[test]
	fn cli_is_well_formed()
	{
		<Args as clap::CommandFactory>::command().debug_assert();
	}
}
