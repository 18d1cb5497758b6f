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

/// A `yield [from] value` statement, emitting a value from a sequence
/// generator. With `from`, the value is itself a sequence whose elements
/// are streamed out one by one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct YieldStatement {
    /// The value to emit.
    pub expression: Expression,
    /// Whether the value is a subsequence to stream from.
    pub from_subsequence: bool,
    /// The indent level of the statement's line.
    pub indent: u32,
    /// The span of the statement.
    pub span: Span,
}

simple_node_impl!(YieldStatement);

impl fmt::Display for YieldStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.from_subsequence {
            write!(f, "yield from {}", self.expression)
        } else {
            write!(f, "yield {}", self.expression)
        }
    }
}

/// A `sync value` statement, emitting a value from an asynchronous task
/// generator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncStatement {
    /// The value to emit.
    pub expression: Expression,
    /// The indent level of the statement's line.
    pub indent: u32,
    /// The span of the statement.
    pub span: Span,
}

simple_node_impl!(SyncStatement);

impl fmt::Display for SyncStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "sync {}", self.expression)
    }
}
