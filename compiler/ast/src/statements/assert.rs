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

use super::*;

/// An `assert condition` statement.
///
/// The condition gates the enclosing function's result: each assertion is
/// chained onto the previous ones so that the first failure dominates.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssertStatement {
    /// The condition that must hold.
    pub condition: Expression,
    /// The indent level of the statement's line.
    pub indent: u32,
    /// The span of the statement.
    pub span: Span,
}

simple_node_impl!(AssertStatement);

impl fmt::Display for AssertStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "assert {}", self.condition)
    }
}

/// A `debug_trace message` statement.
///
/// Prints to stderr as a side effect, bypassing the IO task system. The
/// trace call is wedged into the assert chain so it evaluates exactly once,
/// in statement order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebugTraceStatement {
    /// The message to print.
    pub expression: Expression,
    /// The indent level of the statement's line.
    pub indent: u32,
    /// The span of the statement.
    pub span: Span,
}

simple_node_impl!(DebugTraceStatement);

impl fmt::Display for DebugTraceStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "debug_trace {}", self.expression)
    }
}
