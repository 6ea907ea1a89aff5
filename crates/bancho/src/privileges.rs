//! User privileges.

use std::fmt;

/// The privilege bitflags of a user.
///
/// Only the bits this crate cares about have named constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type), sqlx(transparent))]
pub struct Privileges(i32);

impl Privileges
{
	/// The user is not restricted and shows up on leaderboards.
	pub const UNRESTRICTED: Self = Self(1 << 0);

	/// Creates a new [`Privileges`] from the raw bits.
	pub const fn from_bits(bits: i32) -> Self
	{
		Self(bits)
	}

	/// Checks if every bit of `other` is set in `self`.
	pub const fn contains(self, other: Self) -> bool
	{
		(self.0 & other.0) == other.0
	}

	/// Checks if the user should be visible on public leaderboards.
	pub const fn is_unrestricted(self) -> bool
	{
		self.contains(Self::UNRESTRICTED)
	}
}

impl fmt::Display for Privileges
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		write!(f, "{:#b}", self.0)
	}
}
