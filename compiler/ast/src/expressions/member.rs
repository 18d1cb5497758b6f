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

/// A member reference `base.name` or member call `base.name(args)`.
///
/// Member reference is sugar for method dispatch: the base object is
/// invoked with the member symbol to obtain a method reference, which is
/// then invoked with the base as its first argument.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberExpression {
    /// The object whose member is being referenced.
    pub base: Box<Expression>,
    /// The name of the member.
    pub name: Identifier,
    /// The subscripted arguments, when the member is called.
    pub arguments: Option<Vec<Expression>>,
    /// The span of the entire expression.
    pub span: Span,
}

simple_node_impl!(MemberExpression);

impl fmt::Display for MemberExpression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}.{}", self.base, self.name)?;
        if let Some(arguments) = &self.arguments {
            write!(f, "(")?;
            for (i, argument) in arguments.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                argument.fmt(f)?;
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}

/// A key lookup `base[key]`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupExpression {
    /// The container being subscripted.
    pub base: Box<Expression>,
    /// The key expression.
    pub index: Box<Expression>,
    /// The span of the entire expression.
    pub span: Span,
}

simple_node_impl!(LookupExpression);

impl fmt::Display for LookupExpression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}[{}]", self.base, self.index)
    }
}
