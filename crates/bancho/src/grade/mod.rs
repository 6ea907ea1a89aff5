//! Score grades.

use std::fmt;
use std::str::FromStr;

mod errors;
pub use errors::ParseGradeError;

cfg_sqlx! {
	mod sqlx;
}

/// The letter grade of a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Grade
{
	/// SS with hidden or flashlight.
	XH,

	/// SS
	X,

	/// S with hidden or flashlight.
	SH,

	/// S
	S,

	/// A
	A,

	/// B
	B,

	/// C
	C,

	/// D
	D,

	/// The score was failed.
	F,

	/// No grade was recorded.
	N,
}

impl Grade
{
	/// Checks if `self` is [F].
	///
	/// [F]: Grade::F
	pub const fn is_failing(self) -> bool
	{
		matches!(self, Self::F)
	}

	/// The string stored in the database.
	pub const fn as_str(self) -> &'static str
	{
		match self {
			Self::XH => "XH",
			Self::X => "X",
			Self::SH => "SH",
			Self::S => "S",
			Self::A => "A",
			Self::B => "B",
			Self::C => "C",
			Self::D => "D",
			Self::F => "F",
			Self::N => "N",
		}
	}
}

impl fmt::Display for Grade
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		f.pad(self.as_str())
	}
}

impl FromStr for Grade
{
	type Err = ParseGradeError;

	fn from_str(value: &str) -> Result<Self, Self::Err>
	{
		match value {
			"XH" => Ok(Self::XH),
			"X" => Ok(Self::X),
			"SH" => Ok(Self::SH),
			"S" => Ok(Self::S),
			"A" => Ok(Self::A),
			"B" => Ok(Self::B),
			"C" => Ok(Self::C),
			"D" => Ok(Self::D),
			"F" => Ok(Self::F),
			"N" => Ok(Self::N),
			_ => Err(ParseGradeError),
		}
	}
}
