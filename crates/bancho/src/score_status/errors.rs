//! Error types used by the [`score_status`] module.
//!
//! [`score_status`]: crate::score_status

use thiserror::Error;

/// Error returned from an `i8 -> ScoreStatus` conversion.
///
/// Only `0`, `1` and `2` are valid [`ScoreStatus`]es.
///
/// [`ScoreStatus`]: super::ScoreStatus
#[non_exhaustive]
#[derive(Debug, PartialEq, Error)]
#[error("integer does not correspond to a known score status")]
pub struct TryFromIntError;

/// Error returned when parsing a string into a [`ScoreStatus`].
///
/// [`ScoreStatus`]: super::ScoreStatus
#[non_exhaustive]
#[derive(Debug, PartialEq, Error)]
#[error("unknown score status")]
pub struct ParseScoreStatusError;
