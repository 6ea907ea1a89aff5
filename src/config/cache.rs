use nyamatrix::leaderboard::DEFAULT_KEY_PREFIX;
use serde::Deserialize;
use url::Url;

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub(crate) struct CacheConfig
{
	pub url: Url,
	pub key_prefix: Box<str>,
}

impl Default for CacheConfig
{
	fn default() -> Self
	{
		Self { url: default_url(), key_prefix: Box::from(DEFAULT_KEY_PREFIX) }
	}
}

fn default_url() -> Url
{
	Url::parse("redis://localhost:6379").unwrap_or_else(|err| {
		panic!("hard-coded URL should be valid\n{err}");
	})
}
