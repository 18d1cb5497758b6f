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

/// An `if condition:` statement opening a conditional block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IfThenStatement {
    /// The branch condition.
    pub condition: Expression,
    /// The indent level of the statement's line.
    pub indent: u32,
    /// The span of the statement.
    pub span: Span,
}

simple_node_impl!(IfThenStatement);

impl fmt::Display for IfThenStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "if {}:", self.condition)
    }
}

/// An `else:` or `else if condition:` statement partitioning the enclosing
/// if block into a new branch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElseStatement {
    /// The condition of the new branch; `None` for the unconditional else.
    pub condition: Option<Expression>,
    /// The indent level of the statement's line.
    pub indent: u32,
    /// The span of the statement.
    pub span: Span,
}

simple_node_impl!(ElseStatement);

impl fmt::Display for ElseStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.condition {
            Some(condition) => write!(f, "else if {condition}:"),
            None => write!(f, "else:"),
        }
    }
}
