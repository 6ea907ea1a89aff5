//! Trait implementations for the [`serde`] crate.

use serde::{Deserialize, Deserializer, de};

use super::GameMode;

impl<'de> Deserialize<'de> for GameMode
{
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		#[derive(Debug, Deserialize)]
		#[serde(untagged)]
		enum Helper
		{
			U8(u8),
			Str(Box<str>),
		}

		Helper::deserialize(deserializer).and_then(|value| match value {
			Helper::U8(value) => Self::try_from(value).map_err(de::Error::custom),
			Helper::Str(value) => value.parse::<Self>().map_err(de::Error::custom),
		})
	}
}
