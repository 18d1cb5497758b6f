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

/// A list comprehension: `each [output from] variable in input [where predicate]`.
///
/// Maps and/or filters a sequence lazily. The output and predicate clauses
/// are optional; the variable and input sequence are not. The parser cannot
/// tell while reading the first clause whether it is the output expression
/// or the variable, so the variable is validated during analysis.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComprehensionExpression {
    /// The optional output expression, mapped over the sequence.
    pub output: Option<Box<Expression>>,
    /// The induction variable.
    pub variable: Box<Expression>,
    /// The input sequence.
    pub input: Box<Expression>,
    /// The optional filter predicate.
    pub predicate: Option<Box<Expression>>,
    /// The span of the entire expression.
    pub span: Span,
}

simple_node_impl!(ComprehensionExpression);

impl fmt::Display for ComprehensionExpression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "each ")?;
        if let Some(output) = &self.output {
            write!(f, "{output} from ")?;
        }
        write!(f, "{} in {}", self.variable, self.input)?;
        if let Some(predicate) = &self.predicate {
            write!(f, " where {predicate}")?;
        }
        Ok(())
    }
}
