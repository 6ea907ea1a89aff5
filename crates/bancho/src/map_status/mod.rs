//! The ranked status of a beatmap.

use std::fmt;
use std::str::FromStr;

mod errors;
pub use errors::{ParseMapStatusError, TryFromIntError};

cfg_sqlx! {
	mod sqlx;
}

/// The ranked status of a beatmap.
#[repr(i8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MapStatus
{
	/// The map is not submitted to the osu! servers.
	NotSubmitted = -1,

	/// The map is pending, WIP or graveyarded.
	Pending = 0,

	/// A newer version of the map is available.
	UpdateAvailable = 1,

	/// The map is ranked.
	Ranked = 2,

	/// The map is approved.
	Approved = 3,

	/// The map is qualified.
	Qualified = 4,

	/// The map is loved.
	Loved = 5,
}

impl MapStatus
{
	/// Checks if scores on this map count towards ranked score.
	pub const fn awards_ranked_score(self) -> bool
	{
		matches!(self, Self::Ranked | Self::Approved)
	}
}

impl fmt::Display for MapStatus
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		f.pad(match self {
			Self::NotSubmitted => "not-submitted",
			Self::Pending => "pending",
			Self::UpdateAvailable => "update-available",
			Self::Ranked => "ranked",
			Self::Approved => "approved",
			Self::Qualified => "qualified",
			Self::Loved => "loved",
		})
	}
}

impl From<MapStatus> for i8
{
	fn from(status: MapStatus) -> Self
	{
		status as Self
	}
}

impl From<MapStatus> for i32
{
	fn from(status: MapStatus) -> Self
	{
		Self::from(i8::from(status))
	}
}

impl TryFrom<i8> for MapStatus
{
	type Error = TryFromIntError;

	fn try_from(value: i8) -> Result<Self, Self::Error>
	{
		match value {
			-1 => Ok(Self::NotSubmitted),
			0 => Ok(Self::Pending),
			1 => Ok(Self::UpdateAvailable),
			2 => Ok(Self::Ranked),
			3 => Ok(Self::Approved),
			4 => Ok(Self::Qualified),
			5 => Ok(Self::Loved),
			_ => Err(TryFromIntError),
		}
	}
}

impl TryFrom<i32> for MapStatus
{
	type Error = TryFromIntError;

	fn try_from(value: i32) -> Result<Self, Self::Error>
	{
		i8::try_from(value)
			.map_err(|_| TryFromIntError)
			.and_then(Self::try_from)
	}
}

impl FromStr for MapStatus
{
	type Err = ParseMapStatusError;

	fn from_str(value: &str) -> Result<Self, Self::Err>
	{
		match value {
			"-1" | "not-submitted" => Ok(Self::NotSubmitted),
			"0" | "pending" => Ok(Self::Pending),
			"1" | "update-available" => Ok(Self::UpdateAvailable),
			"2" | "ranked" => Ok(Self::Ranked),
			"3" | "approved" => Ok(Self::Approved),
			"4" | "qualified" => Ok(Self::Qualified),
			"5" | "loved" => Ok(Self::Loved),
			_ => Err(ParseMapStatusError),
		}
	}
}
