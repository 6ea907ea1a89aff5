//! Game modes.
//!
//! bancho.py distinguishes between the 4 modes a beatmap can be played in ([`MapMode`]) and the
//! modes a score can be submitted in ([`GameMode`]), which additionally split osu!, osu!taiko and
//! osu!catch into relax and autopilot variants.

use std::fmt;
use std::str::FromStr;

mod errors;
pub use errors::{ParseModeError, TryFromIntError};

cfg_serde! {
	mod serde;
}

cfg_sqlx! {
	mod sqlx;
}

/// The modes a score can be submitted in.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GameMode
{
	/// osu!standard
	VanillaOsu = 0,

	/// osu!taiko
	VanillaTaiko = 1,

	/// osu!catch
	VanillaCatch = 2,

	/// osu!mania
	VanillaMania = 3,

	/// osu!standard with the relax mod
	RelaxOsu = 4,

	/// osu!taiko with the relax mod
	RelaxTaiko = 5,

	/// osu!catch with the relax mod
	RelaxCatch = 6,

	/// osu!standard with the autopilot mod
	AutopilotOsu = 8,
}

/// The modes a beatmap can be played in.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MapMode
{
	/// osu!standard
	Osu = 0,

	/// osu!taiko
	Taiko = 1,

	/// osu!catch
	Catch = 2,

	/// osu!mania
	Mania = 3,
}

impl GameMode
{
	/// Every game mode, in ascending order.
	pub const ALL: [Self; 8] = [
		Self::VanillaOsu,
		Self::VanillaTaiko,
		Self::VanillaCatch,
		Self::VanillaMania,
		Self::RelaxOsu,
		Self::RelaxTaiko,
		Self::RelaxCatch,
		Self::AutopilotOsu,
	];

	/// Returns the mode the beatmap has to be converted to for this game mode.
	pub const fn map_mode(self) -> MapMode
	{
		match self {
			Self::VanillaOsu | Self::RelaxOsu | Self::AutopilotOsu => MapMode::Osu,
			Self::VanillaTaiko | Self::RelaxTaiko => MapMode::Taiko,
			Self::VanillaCatch | Self::RelaxCatch => MapMode::Catch,
			Self::VanillaMania => MapMode::Mania,
		}
	}

	/// The short name bancho.py uses for this mode.
	pub const fn as_str(self) -> &'static str
	{
		match self {
			Self::VanillaOsu => "vn!std",
			Self::VanillaTaiko => "vn!taiko",
			Self::VanillaCatch => "vn!catch",
			Self::VanillaMania => "vn!mania",
			Self::RelaxOsu => "rx!std",
			Self::RelaxTaiko => "rx!taiko",
			Self::RelaxCatch => "rx!catch",
			Self::AutopilotOsu => "ap!std",
		}
	}
}

impl MapMode
{
	/// The short name of this mode.
	pub const fn as_str(self) -> &'static str
	{
		match self {
			Self::Osu => "std",
			Self::Taiko => "taiko",
			Self::Catch => "catch",
			Self::Mania => "mania",
		}
	}
}

impl fmt::Display for GameMode
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		f.pad(self.as_str())
	}
}

impl fmt::Display for MapMode
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		f.pad(self.as_str())
	}
}

impl From<GameMode> for u8
{
	fn from(mode: GameMode) -> Self
	{
		mode as Self
	}
}

impl From<GameMode> for i8
{
	fn from(mode: GameMode) -> Self
	{
		mode as Self
	}
}

impl From<MapMode> for u8
{
	fn from(mode: MapMode) -> Self
	{
		mode as Self
	}
}

impl From<MapMode> for i8
{
	fn from(mode: MapMode) -> Self
	{
		mode as Self
	}
}

impl From<GameMode> for MapMode
{
	fn from(mode: GameMode) -> Self
	{
		mode.map_mode()
	}
}

impl TryFrom<u8> for GameMode
{
	type Error = TryFromIntError;

	fn try_from(value: u8) -> Result<Self, Self::Error>
	{
		match value {
			0 => Ok(Self::VanillaOsu),
			1 => Ok(Self::VanillaTaiko),
			2 => Ok(Self::VanillaCatch),
			3 => Ok(Self::VanillaMania),
			4 => Ok(Self::RelaxOsu),
			5 => Ok(Self::RelaxTaiko),
			6 => Ok(Self::RelaxCatch),
			8 => Ok(Self::AutopilotOsu),
			_ => Err(TryFromIntError),
		}
	}
}

impl TryFrom<i8> for GameMode
{
	type Error = TryFromIntError;

	fn try_from(value: i8) -> Result<Self, Self::Error>
	{
		u8::try_from(value)
			.map_err(|_| TryFromIntError)
			.and_then(Self::try_from)
	}
}

impl TryFrom<u8> for MapMode
{
	type Error = TryFromIntError;

	fn try_from(value: u8) -> Result<Self, Self::Error>
	{
		match value {
			0 => Ok(Self::Osu),
			1 => Ok(Self::Taiko),
			2 => Ok(Self::Catch),
			3 => Ok(Self::Mania),
			_ => Err(TryFromIntError),
		}
	}
}

impl TryFrom<i8> for MapMode
{
	type Error = TryFromIntError;

	fn try_from(value: i8) -> Result<Self, Self::Error>
	{
		u8::try_from(value)
			.map_err(|_| TryFromIntError)
			.and_then(Self::try_from)
	}
}

impl FromStr for GameMode
{
	type Err = ParseModeError;

	fn from_str(value: &str) -> Result<Self, Self::Err>
	{
		if let Ok(value) = value.parse::<u8>() {
			return Self::try_from(value).map_err(|_| ParseModeError);
		}

		Self::ALL
			.into_iter()
			.find(|mode| mode.as_str().eq_ignore_ascii_case(value))
			.ok_or(ParseModeError)
	}
}

impl FromStr for MapMode
{
	type Err = ParseModeError;

	fn from_str(value: &str) -> Result<Self, Self::Err>
	{
		match value {
			"0" | "std" | "osu" => Ok(Self::Osu),
			"1" | "taiko" => Ok(Self::Taiko),
			"2" | "catch" | "fruits" => Ok(Self::Catch),
			"3" | "mania" => Ok(Self::Mania),
			_ => Err(ParseModeError),
		}
	}
}
