use std::num::NonZero;

use nyamatrix::leaderboard::DEFAULT_BATCH_SIZE;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub(crate) struct LeaderboardConfig
{
	/// How many rows are sent to the cache at once.
	pub batch_size: NonZero<usize>,
}

impl Default for LeaderboardConfig
{
	fn default() -> Self
	{
		Self { batch_size: DEFAULT_BATCH_SIZE }
	}
}
