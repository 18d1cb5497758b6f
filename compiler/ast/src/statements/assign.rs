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

/// An assignment `target = value`.
///
/// The target may be an identifier, a member chain, or a parenthesized /
/// bracketed / braced tuple of targets for destructuring.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignStatement {
    /// The place to assign to.
    pub place: Expression,
    /// The value to assign.
    pub value: Expression,
    /// The indent level of the statement's line.
    pub indent: u32,
    /// The span of the statement.
    pub span: Span,
}

simple_node_impl!(AssignStatement);

impl fmt::Display for AssignStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} = {}", self.place, self.value)
    }
}

/// A mutation `target->method(args)`.
///
/// Sugar for calling a member function and assigning the result back to the
/// target: `target = target.method(args)` with the target threaded through
/// as the self argument.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationStatement {
    /// The member-reference target naming the mutator method.
    pub target: Expression,
    /// The arguments to the mutator, if a subscript was present.
    pub arguments: Option<Vec<Expression>>,
    /// The indent level of the statement's line.
    pub indent: u32,
    /// The span of the statement.
    pub span: Span,
}

simple_node_impl!(MutationStatement);

impl fmt::Display for MutationStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.target)?;
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
