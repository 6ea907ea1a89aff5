use std::num::NonZero;

use color_eyre::Section;
use color_eyre::eyre::{self, OptionExt};
use nyamatrix::database::ConnectOptions;
use serde::{Deserialize, Deserializer};
use url::Url;

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub(crate) struct DatabaseConfig
{
	pub url: Option<Url>,

	#[serde(deserialize_with = "deserialize_option_u32")]
	pub min_connections: Option<NonZero<u32>>,

	#[serde(deserialize_with = "deserialize_option_u32")]
	pub max_connections: Option<NonZero<u32>>,
}

impl DatabaseConfig
{
	/// `workers` is the number of groups that may be written at the same time.
	pub(crate) fn connect_options(&self, workers: NonZero<usize>) -> eyre::Result<ConnectOptions<'_>>
	{
		let url = self
			.url
			.as_ref()
			.ok_or_eyre("missing database URL")
			.suggestion("set `database.url` in the configuration file or pass `--database-url`")?;

		Ok(ConnectOptions::builder()
			.url(url)
			.maybe_min_connections(self.min_connections.map(NonZero::get))
			.maybe_max_connections(self.max_connections)
			.concurrent_writers(workers.get())
			.build())
	}
}

fn deserialize_option_u32<'de, D>(deserializer: D) -> Result<Option<NonZero<u32>>, D::Error>
where
	D: Deserializer<'de>,
{
	<Option<u32> as Deserialize<'de>>::deserialize(deserializer)
		.map(|maybe_num| maybe_num.and_then(NonZero::new))
}
