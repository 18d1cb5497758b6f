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

use crate::{simple_node_impl, Identifier, Node};
use radian_span::Span;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

mod binary;
pub use binary::*;

mod call;
pub use call::*;

mod comprehension;
pub use comprehension::*;

mod containers;
pub use containers::*;

mod literal;
pub use literal::*;

mod member;
pub use member::*;

mod sync;
pub use sync::*;

mod unary;
pub use unary::*;

/// Expression that evaluates to a value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Expression {
    /// A binary expression, e.g. `x + 1`.
    Binary(BinaryExpression),
    /// A named function call, e.g. `f(x, y)`.
    Call(CallExpression),
    /// A list comprehension, e.g. `each x * x from x in seq where x > 0`.
    Comprehension(ComprehensionExpression),
    /// A placeholder produced by the parser for a broken production.
    /// An error has already been reported by the time one exists.
    Dummy(DummyExpression),
    /// An identifier expression.
    Identifier(Identifier),
    /// An explicit invocation of a function reference, e.g. `invoke(f: x)`.
    Invoke(InvokeExpression),
    /// A lambda capture, e.g. `capture(x: x + 1)`.
    Lambda(LambdaExpression),
    /// A list constructor, e.g. `[1, 2, 3]`.
    List(ListExpression),
    /// A literal expression.
    Literal(Literal),
    /// A key lookup, e.g. `box[k]`.
    Lookup(LookupExpression),
    /// A map constructor, e.g. `{1 => "a"}`.
    Map(MapExpression),
    /// A member reference, e.g. `point.x` or `point.moved(1, 2)`.
    Member(MemberExpression),
    /// A parenthesized subexpression.
    Paren(ParenExpression),
    /// A sync expression, e.g. `sync(task)`.
    Sync(SyncExpression),
    /// A throw expression, e.g. `throw(:oops)`.
    Throw(ThrowExpression),
    /// A unary prefix operation, e.g. `-x` or `not x`.
    Unary(UnaryExpression),
}

impl Expression {
    /// The precedence level of the expression: binary operators carry their
    /// own level, and everything else binds tightest.
    pub fn precedence(&self) -> Precedence {
        match self {
            Expression::Binary(bin) => bin.op.precedence(),
            _ => Precedence::Primary,
        }
    }

    /// Is this a tuple-join operation, i.e. the comma operator?
    pub fn is_tuple_op(&self) -> bool {
        matches!(self, Expression::Binary(bin) if bin.op == BinaryOperation::Tuple)
    }

    /// Is this a key-value pair operation, i.e. the `=>` operator?
    pub fn is_pair_op(&self) -> bool {
        matches!(self, Expression::Binary(bin) if bin.op == BinaryOperation::Pair)
    }

    /// Returns the identifier if the expression is one.
    pub fn as_identifier(&self) -> Option<&Identifier> {
        match self {
            Expression::Identifier(ident) => Some(ident),
            _ => None,
        }
    }

    /// Flattens a left-leaning comma chain into its elements, left to right.
    /// A non-tuple expression is its own single element.
    pub fn unpack_tuple(&self) -> SmallVec<[&Expression; 4]> {
        let mut list = SmallVec::new();
        let mut current = self;
        while let Expression::Binary(bin) = current {
            if bin.op != BinaryOperation::Tuple {
                break;
            }
            list.push(&*bin.right);
            current = &bin.left;
        }
        list.push(current);
        list.reverse();
        list
    }

    /// Consumes a left-leaning comma chain, yielding its elements in
    /// left-to-right order. A non-tuple expression is its own single element.
    pub fn into_tuple_elements(self) -> Vec<Expression> {
        let mut list = Vec::new();
        let mut current = self;
        loop {
            match current {
                Expression::Binary(bin) if bin.op == BinaryOperation::Tuple => {
                    list.push(*bin.right);
                    current = *bin.left;
                }
                other => {
                    list.push(other);
                    break;
                }
            }
        }
        list.reverse();
        list
    }

    /// Restores operator precedence after the parser attaches a right
    /// operand: rotates the tree while the top node binds tighter than its
    /// left child, or equally tight with right associativity.
    pub fn reassociate(self) -> Expression {
        match self {
            Expression::Binary(bin) => bin.reassociate(),
            other => other,
        }
    }

    /// Collects every sync subexpression in depth-first, left-to-right
    /// order. Syncs divide the evaluation context, so the analyzer must
    /// process them before the rest of the expression graph.
    pub fn collect_syncs<'a>(&'a self, list: &mut Vec<&'a SyncExpression>) {
        match self {
            Expression::Binary(bin) => {
                bin.left.collect_syncs(list);
                bin.right.collect_syncs(list);
            }
            Expression::Call(call) => {
                for argument in &call.arguments {
                    argument.collect_syncs(list);
                }
            }
            // Only the input sequence evaluates in the enclosing scope; the
            // output and predicate clauses become lambda bodies with their
            // own evaluation contexts.
            Expression::Comprehension(each) => each.input.collect_syncs(list),
            Expression::Dummy(_) | Expression::Identifier(_) | Expression::Literal(_) => {}
            Expression::Invoke(invoke) => {
                invoke.callee.collect_syncs(list);
                if let Some(arguments) = &invoke.arguments {
                    arguments.collect_syncs(list);
                }
            }
            // A lambda body evaluates in its own closure, at some later
            // time, so syncs inside it belong to that closure.
            Expression::Lambda(_) => {}
            Expression::List(l) => l.items.collect_syncs(list),
            Expression::Lookup(lookup) => {
                lookup.base.collect_syncs(list);
                lookup.index.collect_syncs(list);
            }
            Expression::Map(m) => m.items.collect_syncs(list),
            Expression::Member(member) => {
                member.base.collect_syncs(list);
                if let Some(arguments) = &member.arguments {
                    for argument in arguments {
                        argument.collect_syncs(list);
                    }
                }
            }
            Expression::Paren(paren) => paren.inner.collect_syncs(list),
            Expression::Sync(sync) => {
                if let Some(inner) = &sync.expression {
                    inner.collect_syncs(list);
                }
                list.push(sync);
            }
            Expression::Throw(throw) => throw.expression.collect_syncs(list),
            Expression::Unary(unary) => unary.receiver.collect_syncs(list),
        }
    }
}

impl Node for Expression {
    fn span(&self) -> Span {
        use Expression::*;
        match self {
            Binary(n) => n.span,
            Call(n) => n.span,
            Comprehension(n) => n.span,
            Dummy(n) => n.span,
            Identifier(n) => n.span,
            Invoke(n) => n.span,
            Lambda(n) => n.span,
            List(n) => n.span,
            Literal(n) => n.span,
            Lookup(n) => n.span,
            Map(n) => n.span,
            Member(n) => n.span,
            Paren(n) => n.span,
            Sync(n) => n.span,
            Throw(n) => n.span,
            Unary(n) => n.span,
        }
    }

    fn set_span(&mut self, span: Span) {
        use Expression::*;
        match self {
            Binary(n) => n.span = span,
            Call(n) => n.span = span,
            Comprehension(n) => n.span = span,
            Dummy(n) => n.span = span,
            Identifier(n) => n.span = span,
            Invoke(n) => n.span = span,
            Lambda(n) => n.span = span,
            List(n) => n.span = span,
            Literal(n) => n.span = span,
            Lookup(n) => n.span = span,
            Map(n) => n.span = span,
            Member(n) => n.span = span,
            Paren(n) => n.span = span,
            Sync(n) => n.span = span,
            Throw(n) => n.span = span,
            Unary(n) => n.span = span,
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use Expression::*;
        match self {
            Binary(n) => n.fmt(f),
            Call(n) => n.fmt(f),
            Comprehension(n) => n.fmt(f),
            Dummy(n) => n.fmt(f),
            Identifier(n) => n.fmt(f),
            Invoke(n) => n.fmt(f),
            Lambda(n) => n.fmt(f),
            List(n) => n.fmt(f),
            Literal(n) => n.fmt(f),
            Lookup(n) => n.fmt(f),
            Map(n) => n.fmt(f),
            Member(n) => n.fmt(f),
            Paren(n) => n.fmt(f),
            Sync(n) => n.fmt(f),
            Throw(n) => n.fmt(f),
            Unary(n) => n.fmt(f),
        }
    }
}
