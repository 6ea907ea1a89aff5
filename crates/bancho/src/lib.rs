// This crate is part of the nyamatrix project.
//
// Copyright (C) 2024  nyamatrix contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see https://www.gnu.org/licenses.

//! Types shared by everything that talks to a bancho.py database.

#[macro_use]
mod macros;

pub mod mode;

#[doc(inline)]
pub use mode::{GameMode, MapMode};

pub mod score_status;

#[doc(inline)]
pub use score_status::ScoreStatus;

pub mod map_status;

#[doc(inline)]
pub use map_status::MapStatus;

pub mod grade;

#[doc(inline)]
pub use grade::Grade;

pub mod privileges;

#[doc(inline)]
pub use privileges::Privileges;
