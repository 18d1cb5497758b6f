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

/// A call of a named function, e.g. `f(a, b)`.
///
/// Naming a function always implies invocation, so the subscript is never
/// empty; a nullary function is called by its bare name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallExpression {
    /// The name of the function being called.
    pub function: Identifier,
    /// Expressions for the arguments passed to the function.
    pub arguments: Vec<Expression>,
    /// The span of the entire call.
    pub span: Span,
}

simple_node_impl!(CallExpression);

impl fmt::Display for CallExpression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}(", self.function)?;
        for (i, argument) in self.arguments.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            argument.fmt(f)?;
        }
        write!(f, ")")
    }
}

/// An explicit invocation of a function reference, e.g. `invoke(f: a, b)`.
///
/// Where a call requires a name, invoke accepts any expression yielding an
/// invokable. This is the operation the member-reference operator performs
/// implicitly.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvokeExpression {
    /// The expression yielding the invokable.
    pub callee: Box<Expression>,
    /// The argument expression following the colon, a comma chain.
    pub arguments: Option<Box<Expression>>,
    /// The span of the entire expression.
    pub span: Span,
}

simple_node_impl!(InvokeExpression);

impl fmt::Display for InvokeExpression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.arguments {
            Some(arguments) => write!(f, "invoke({}: {})", self.callee, arguments),
            None => write!(f, "invoke({})", self.callee),
        }
    }
}

/// A lambda capture, e.g. `capture(x: x * scale)`.
///
/// Creates a function object from the expression, capturing the current
/// values of any context symbols it uses. The optional parameter clause
/// names the lambda's own parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LambdaExpression {
    /// The parameter clause, an identifier or comma chain of identifiers.
    pub parameter: Option<Box<Expression>>,
    /// The body expression.
    pub body: Box<Expression>,
    /// The span of the entire expression.
    pub span: Span,
}

simple_node_impl!(LambdaExpression);

impl fmt::Display for LambdaExpression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.parameter {
            Some(parameter) => write!(f, "capture({}: {})", parameter, self.body),
            None => write!(f, "capture({})", self.body),
        }
    }
}
