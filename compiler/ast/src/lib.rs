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

//! The abstract syntax tree (AST) for the Radian programming language.
//!
//! Two disjoint sums, [`Expression`] and [`Statement`], each variant carrying
//! a source span. The parser produces a flat list of statements; block
//! structure is recovered from indentation and begin/end statements by the
//! block balancer, not by tree nesting.

#![forbid(unsafe_code)]

pub mod common;
pub use common::*;

pub mod expressions;
pub use expressions::*;

pub mod statements;
pub use statements::*;

use serde::{Deserialize, Serialize};

/// The statement list for a single Radian compilation unit.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ast {
    pub statements: Vec<Statement>,
}

impl Ast {
    /// Creates a new AST from the given statement list.
    pub fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }

    /// Serializes the ast into a JSON string.
    pub fn to_json_string(&self) -> String {
        serde_json::to_string_pretty(&self).expect("ast serialization is infallible")
    }
}
