//! Database IDs.

use std::num::ParseIntError;
use std::str::FromStr;

/// The ID of a submitted score (`scores.id`).
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, From, sqlx::Type)]
#[sqlx(transparent)]
pub struct ScoreId(u64);

/// The ID of a user (`users.id`, `stats.id`, `scores.userid`).
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, From, sqlx::Type)]
#[sqlx(transparent)]
pub struct UserId(i32);

/// The ID of a beatmap (`maps.id`).
///
/// Beatmap files on disk are named after this ID.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, From, sqlx::Type)]
#[sqlx(transparent)]
pub struct MapId(i32);

impl ScoreId
{
	pub const fn get(self) -> u64
	{
		self.0
	}
}

impl UserId
{
	pub const fn get(self) -> i32
	{
		self.0
	}
}

impl MapId
{
	pub const fn get(self) -> i32
	{
		self.0
	}
}

impl FromStr for UserId
{
	type Err = ParseIntError;

	fn from_str(value: &str) -> Result<Self, Self::Err>
	{
		value.parse().map(Self)
	}
}
