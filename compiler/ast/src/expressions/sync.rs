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

/// A sync expression `sync(task)` or bare `sync`.
///
/// Yields the value back to the controlling process and resumes with
/// whatever the process supplies next. Each sync divides its scope into
/// asynchronous segments, so the analyzer processes syncs before the rest
/// of the expression graph.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncExpression {
    /// The value to deliver, if any.
    pub expression: Option<Box<Expression>>,
    /// The span of the entire expression.
    pub span: Span,
}

simple_node_impl!(SyncExpression);

impl fmt::Display for SyncExpression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.expression {
            Some(expression) => write!(f, "sync({expression})"),
            None => write!(f, "sync"),
        }
    }
}

/// A throw expression `throw(value)`: wraps the value in an exception which
/// contaminates any expression it participates in until caught.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThrowExpression {
    /// The value to wrap.
    pub expression: Box<Expression>,
    /// The span of the entire expression.
    pub span: Span,
}

simple_node_impl!(ThrowExpression);

impl fmt::Display for ThrowExpression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "throw({})", self.expression)
    }
}
