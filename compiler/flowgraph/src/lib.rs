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

//! The data-flow graph the semantic analyzer lowers programs into.
//!
//! Nodes live in a hash-consing [`Pool`]: each distinct (kind, operands)
//! combination exists at most once, so handle equality is structural
//! equality. Nodes are immutable once constructed; "mutation" of a graph
//! happens by building rewritten copies through [`Pool::rewrite`].

#![forbid(unsafe_code)]

pub mod node;
pub use node::*;

pub mod pool;
pub use pool::*;

pub mod dfs;
pub use dfs::*;

mod format;
