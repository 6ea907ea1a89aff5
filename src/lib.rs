//! nyamatrix - bulk recalculation of scores and statistics for bancho.py servers.
//!
//! The crate is organized around the stages of a recalculation run:
//!
//! 1. [`recalc`] computes new performance values for every play matching a [`Filter`]
//! 2. [`status`] picks the best play per user, mode and map
//! 3. [`statistics`] aggregates best plays into per-user statistics
//! 4. [`leaderboard`] republishes the statistics to Redis
//!
//! [`pipeline`] runs all of them in order.

/*
 * nyamatrix
 *
 * Copyright (C) 2024  nyamatrix contributors
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program. If not, see https://www.gnu.org/licenses.
 */

#[macro_use]
extern crate tracing as _;

#[macro_use]
extern crate pin_project as _;

#[macro_use(Debug, Display, From, Error)]
extern crate derive_more as _;

mod progress;
mod stream;

#[cfg(test)]
mod testing;

pub mod database;
pub mod ids;

pub mod filter;
pub use filter::{Filter, TimeWindow};

pub mod query;

pub mod performance;
pub mod recalc;
pub mod status;
pub mod statistics;
pub mod leaderboard;
pub mod pipeline;
