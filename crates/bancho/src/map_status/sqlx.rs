//! Trait implementations for the [`sqlx`] crate.
//!
//! `maps.status` is an `INT` column.

use super::MapStatus;

impl_sqlx_integer!(MapStatus => i32);
