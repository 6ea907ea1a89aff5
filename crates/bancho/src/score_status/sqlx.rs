//! Trait implementations for the [`sqlx`] crate.

use super::ScoreStatus;

impl_sqlx_integer!(ScoreStatus => i8);
