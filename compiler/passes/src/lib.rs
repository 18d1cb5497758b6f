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

//! The semantic analyzer: lowers balanced statement lists into the
//! data-flow graph.
//!
//! The heart of the crate is the scope stack. Roots terminate symbol
//! lookup; closure scopes produce independently callable functions and
//! capture free variables as slots; block scopes inline their result into
//! the enclosing scope, synthesizing phi tuples for every variable they
//! reassign. A scope may further divide into asynchronous segments, one
//! per `yield` or `sync`, which package into iterator chains on exit.

#![forbid(unsafe_code)]

pub mod symbol_table;
pub use symbol_table::*;

pub mod segment;
pub use segment::*;

pub mod scope;
pub use scope::*;

pub mod member_dispatch;
pub use member_dispatch::*;

pub mod analyzer;
pub use analyzer::*;

pub mod engine;
pub use engine::*;

#[cfg(test)]
mod test;
