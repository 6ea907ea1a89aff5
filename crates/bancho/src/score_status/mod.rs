//! The lifecycle status of a submitted score.

use std::fmt;
use std::str::FromStr;

mod errors;
pub use errors::{ParseScoreStatusError, TryFromIntError};

cfg_sqlx! {
	mod sqlx;
}

/// The lifecycle status of a submitted score.
///
/// Every `(user, mode, map)` has at most one [`Picked`] score: the one that counts towards the
/// player's statistics.
///
/// [`Picked`]: ScoreStatus::Picked
#[repr(i8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ScoreStatus
{
	/// The score was failed, quit, or does not count for anything.
	Dnf = 0,

	/// A regular score.
	Normal = 1,

	/// The player's best score on a map.
	Picked = 2,
}

impl ScoreStatus
{
	/// Checks if `self` is [Picked].
	///
	/// [Picked]: ScoreStatus::Picked
	pub const fn is_picked(self) -> bool
	{
		matches!(self, Self::Picked)
	}
}

impl fmt::Display for ScoreStatus
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		f.pad(match self {
			Self::Dnf => "dnf",
			Self::Normal => "normal",
			Self::Picked => "picked",
		})
	}
}

impl From<ScoreStatus> for i8
{
	fn from(status: ScoreStatus) -> Self
	{
		status as Self
	}
}

impl TryFrom<i8> for ScoreStatus
{
	type Error = TryFromIntError;

	fn try_from(value: i8) -> Result<Self, Self::Error>
	{
		match value {
			0 => Ok(Self::Dnf),
			1 => Ok(Self::Normal),
			2 => Ok(Self::Picked),
			_ => Err(TryFromIntError),
		}
	}
}

impl FromStr for ScoreStatus
{
	type Err = ParseScoreStatusError;

	fn from_str(value: &str) -> Result<Self, Self::Err>
	{
		match value {
			"0" | "dnf" | "DNF" | "failed" => Ok(Self::Dnf),
			"1" | "normal" | "submitted" => Ok(Self::Normal),
			"2" | "picked" | "best" => Ok(Self::Picked),
			_ => Err(ParseScoreStatusError),
		}
	}
}
