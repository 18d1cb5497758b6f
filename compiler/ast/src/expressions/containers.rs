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

/// An ordered list constructor, e.g. `[1, 2, 3]`.
/// The items are a comma chain, kept as parsed so that assignment targets
/// can reuse the same node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListExpression {
    /// The element expressions, a comma chain.
    pub items: Box<Expression>,
    /// The span from the opening to the closing bracket.
    pub span: Span,
}

simple_node_impl!(ListExpression);

impl fmt::Display for ListExpression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{}]", self.items)
    }
}

/// An associative map constructor, e.g. `{1 => "a", 2 => "b"}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapExpression {
    /// The element expressions, a comma chain of `=>` pairs.
    pub items: Box<Expression>,
    /// The span from the opening to the closing brace.
    pub span: Span,
}

simple_node_impl!(MapExpression);

impl fmt::Display for MapExpression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{{}}}", self.items)
    }
}

/// A parenthesized subexpression, kept as its own node so the printed form
/// round-trips.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParenExpression {
    /// The inner expression.
    pub inner: Box<Expression>,
    /// The span from the opening to the closing parenthesis.
    pub span: Span,
}

simple_node_impl!(ParenExpression);

impl fmt::Display for ParenExpression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({})", self.inner)
    }
}
