//! Error types used by the [`grade`] module.
//!
//! [`grade`]: crate::grade

use thiserror::Error;

/// Error returned when parsing a string into a [`Grade`].
///
/// [`Grade`]: super::Grade
#[non_exhaustive]
#[derive(Debug, PartialEq, Error)]
#[error("unknown grade")]
pub struct ParseGradeError;
