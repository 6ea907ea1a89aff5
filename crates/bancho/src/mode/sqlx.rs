//! Trait implementations for the [`sqlx`] crate.
//!
//! Both modes are stored as `TINYINT`s.

use super::{GameMode, MapMode};

impl_sqlx_integer!(GameMode => i8);
impl_sqlx_integer!(MapMode => i8);
