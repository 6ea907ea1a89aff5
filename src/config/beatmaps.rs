use std::path::{Path, PathBuf};

use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub(crate) struct BeatmapsConfig
{
	/// Where the `<map id>.osu` files live.
	pub directory: Box<Path>,
}

impl Default for BeatmapsConfig
{
	fn default() -> Self
	{
		Self { directory: PathBuf::from(".data/osu").into_boxed_path() }
	}
}
