//! Error types used by the [`mode`] module.
//!
//! [`mode`]: crate::mode

use thiserror::Error;

/// Error returned from an integer to mode conversion.
#[non_exhaustive]
#[derive(Debug, PartialEq, Error)]
#[error("integer does not correspond to a known mode")]
pub struct TryFromIntError;

/// Error returned when parsing a string into a mode.
#[non_exhaustive]
#[derive(Debug, PartialEq, Error)]
#[error("unknown mode")]
pub struct ParseModeError;
