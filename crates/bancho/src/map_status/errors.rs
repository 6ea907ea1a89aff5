//! Error types used by the [`map_status`] module.
//!
//! [`map_status`]: crate::map_status

use thiserror::Error;

/// Error returned from an integer to [`MapStatus`] conversion.
///
/// [`MapStatus`]: super::MapStatus
#[non_exhaustive]
#[derive(Debug, PartialEq, Error)]
#[error("integer does not correspond to a known map status")]
pub struct TryFromIntError;

/// Error returned when parsing a string into a [`MapStatus`].
///
/// [`MapStatus`]: super::MapStatus
#[non_exhaustive]
#[derive(Debug, PartialEq, Error)]
#[error("unknown map status")]
pub struct ParseMapStatusError;
