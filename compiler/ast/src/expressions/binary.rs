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

/// Operator precedence levels, lowest binding first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Precedence {
    Tuple,
    Pair,
    Assertion,
    IfElse,
    Logic,
    Compare,
    Bitwise,
    AddSubtract,
    MultiplyDivide,
    Exponent,
    Primary,
}

/// Operator associativity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Associativity {
    Left,
    Right,
}

/// A binary operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOperation {
    /// Tuple joining, i.e. the comma.
    Tuple,
    /// Key-value pairing `=>`.
    Pair,
    /// Conditional selection `if`; always paired with `Else` on its right.
    If,
    /// The alternative half of the conditional operator.
    Else,
    /// Equality `=`. In expression position the equals sign compares.
    Eq,
    /// Inequality `!=`.
    NotEq,
    /// Less than `<`.
    Lt,
    /// Less than or equal `<=`.
    LtEq,
    /// Greater than `>`.
    Gt,
    /// Greater than or equal `>=`.
    GtEq,
    /// Addition `+`.
    Add,
    /// Subtraction `-`.
    Subtract,
    /// Sequence concatenation `&`.
    Concat,
    /// Multiplication `*`.
    Multiply,
    /// Division `/`.
    Divide,
    /// Modulus `mod`.
    Modulus,
    /// Exponentiation `**`.
    Exponent,
    /// Logical conjunction `and`.
    And,
    /// Logical disjunction `or`.
    Or,
    /// Logical exclusive-or `xor`.
    Xor,
    /// Bitwise shift left `<<`.
    ShiftLeft,
    /// Bitwise shift right `>>`.
    ShiftRight,
    /// Containment test `has`.
    Has,
    /// Type assertion `as`.
    As,
}

impl BinaryOperation {
    /// The precedence level of the operator.
    pub fn precedence(self) -> Precedence {
        use BinaryOperation::*;
        match self {
            Tuple => Precedence::Tuple,
            Pair => Precedence::Pair,
            As => Precedence::Assertion,
            If | Else => Precedence::IfElse,
            And | Or | Xor => Precedence::Logic,
            Eq | NotEq | Lt | LtEq | Gt | GtEq | Has => Precedence::Compare,
            ShiftLeft | ShiftRight => Precedence::Bitwise,
            Add | Subtract | Concat => Precedence::AddSubtract,
            Multiply | Divide | Modulus => Precedence::MultiplyDivide,
            Exponent => Precedence::Exponent,
        }
    }

    /// The associativity of the operator.
    pub fn associativity(self) -> Associativity {
        use BinaryOperation::*;
        match self {
            Pair | If | Else | Exponent => Associativity::Right,
            _ => Associativity::Left,
        }
    }
}

impl fmt::Display for BinaryOperation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use BinaryOperation::*;
        let token = match self {
            Tuple => ",",
            Pair => "=>",
            If => "if",
            Else => "else",
            Eq => "=",
            NotEq => "!=",
            Lt => "<",
            LtEq => "<=",
            Gt => ">",
            GtEq => ">=",
            Add => "+",
            Subtract => "-",
            Concat => "&",
            Multiply => "*",
            Divide => "/",
            Modulus => "mod",
            Exponent => "**",
            And => "and",
            Or => "or",
            Xor => "xor",
            ShiftLeft => "<<",
            ShiftRight => ">>",
            Has => "has",
            As => "as",
        };
        write!(f, "{token}")
    }
}

/// A binary expression `left op right`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinaryExpression {
    /// The left operand of the expression.
    pub left: Box<Expression>,
    /// The right operand of the expression.
    pub right: Box<Expression>,
    /// The operand defining the meaning of the expression.
    pub op: BinaryOperation,
    /// The span from `left` to `right`.
    pub span: Span,
}

simple_node_impl!(BinaryExpression);

impl BinaryExpression {
    /// Rotates the tree so that precedence and associativity hold, assuming
    /// both operands are already correctly associated. The parser calls this
    /// after attaching each right operand, so the invariant is maintained
    /// inductively along the statement.
    pub(super) fn reassociate(mut self) -> Expression {
        let rotate = match &*self.left {
            Expression::Binary(left) => {
                self.op.precedence() > left.op.precedence()
                    || (self.op.precedence() == left.op.precedence()
                        && self.op.associativity() == Associativity::Right)
            }
            _ => false,
        };
        if rotate {
            let Expression::Binary(mut previous_root) = *self.left else { unreachable!() };
            self.left = previous_root.right;
            self.span = self.left.span() + self.right.span();
            previous_root.right = Box::new(self.reassociate());
            previous_root.span = previous_root.left.span() + previous_root.right.span();
            Expression::Binary(previous_root)
        } else {
            Expression::Binary(self)
        }
    }
}

impl fmt::Display for BinaryExpression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.op {
            BinaryOperation::Tuple => write!(f, "{}, {}", self.left, self.right),
            op => write!(f, "{} {} {}", self.left, op, self.right),
        }
    }
}
