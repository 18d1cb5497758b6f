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

/// A unary prefix operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOperation {
    /// Arithmetic negation `-x`, sugar for `0 - x`.
    Negate,
    /// Boolean inversion `not x`.
    Not,
}

impl fmt::Display for UnaryOperation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            UnaryOperation::Negate => write!(f, "-"),
            UnaryOperation::Not => write!(f, "not "),
        }
    }
}

/// A unary prefix expression. Prefix operators bind tighter than any
/// binary operator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnaryExpression {
    /// The operand.
    pub receiver: Box<Expression>,
    /// The operation being performed.
    pub op: UnaryOperation,
    /// The span of the entire expression.
    pub span: Span,
}

simple_node_impl!(UnaryExpression);

impl fmt::Display for UnaryExpression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.op, self.receiver)
    }
}
