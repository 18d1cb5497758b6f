// Copyright (C) 2019-2025 Aleo Systems Inc.
// This file is part of the Radian library.

// The Radian library is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// The Radian library is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.

// You should have received a copy of the GNU General Public License
// along with the Radian library. If not, see <https://www.gnu.org/licenses/>.

//! Linearization of graph functions into three-address code.
//!
//! A post-order walk of a function's body turns each node into at most one
//! instruction; shared subexpressions get a register on first visit and are
//! reused afterward, so the sharing the pool established carries through to
//! the back end.

#![forbid(unsafe_code)]

pub mod address;
pub use address::*;

pub mod op;
pub use op::*;

pub mod linearizer;
pub use linearizer::*;
