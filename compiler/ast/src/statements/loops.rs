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

/// A `while condition:` statement opening a conditional loop block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhileStatement {
    /// The continuation condition.
    pub condition: Expression,
    /// The indent level of the statement's line.
    pub indent: u32,
    /// The span of the statement.
    pub span: Span,
}

simple_node_impl!(WhileStatement);

impl fmt::Display for WhileStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "while {}:", self.condition)
    }
}

/// A `for variable in sequence:` statement opening a loop block which
/// iterates the variable over the sequence.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForLoopStatement {
    /// The induction variable.
    pub variable: Identifier,
    /// The sequence to iterate over.
    pub sequence: Expression,
    /// The indent level of the statement's line.
    pub indent: u32,
    /// The span of the statement.
    pub span: Span,
}

simple_node_impl!(ForLoopStatement);

impl fmt::Display for ForLoopStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "for {} in {}:", self.variable, self.sequence)
    }
}
