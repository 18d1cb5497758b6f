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

use radian_errors::ParserError;

impl ParserContext<'_> {
    /// Main entrypoint for expression parsing.
    ///
    /// Ignoring precedence, the grammar is `term {binop term}*`. Rather than
    /// embedding precedence knowledge in the descent structure, each binary
    /// node is reassociated as soon as its right operand is attached, which
    /// keeps the whole tree correctly associated by induction.
    pub(crate) fn parse_expression(&mut self) -> Expression {
        let mut result = self.parse_term();
        while let Some(op) = self.peek_bin_op() {
            self.bump();
            self.skip_optional_linebreak();
            let right = self.parse_term();
            let span = result.span() + right.span();
            result = Expression::Binary(BinaryExpression {
                left: Box::new(result),
                right: Box::new(right),
                op,
                span,
            })
            .reassociate();
        }
        result
    }

    /// Is the current token a symbol for a two-operand operation?
    fn peek_bin_op(&self) -> Option<BinaryOperation> {
        Some(match &self.token.token {
            Token::Comma => BinaryOperation::Tuple,
            Token::FatArrow => BinaryOperation::Pair,
            Token::If => BinaryOperation::If,
            Token::Else => BinaryOperation::Else,
            Token::Eq => BinaryOperation::Eq,
            Token::NotEq => BinaryOperation::NotEq,
            Token::Lt => BinaryOperation::Lt,
            Token::LtEq => BinaryOperation::LtEq,
            Token::Gt => BinaryOperation::Gt,
            Token::GtEq => BinaryOperation::GtEq,
            Token::Add => BinaryOperation::Add,
            Token::Minus => BinaryOperation::Subtract,
            Token::Amp => BinaryOperation::Concat,
            Token::Mul => BinaryOperation::Multiply,
            Token::Div => BinaryOperation::Divide,
            Token::Mod => BinaryOperation::Modulus,
            Token::Exp => BinaryOperation::Exponent,
            Token::And => BinaryOperation::And,
            Token::Or => BinaryOperation::Or,
            Token::Xor => BinaryOperation::Xor,
            Token::Shl => BinaryOperation::ShiftLeft,
            Token::Shr => BinaryOperation::ShiftRight,
            Token::Has => BinaryOperation::Has,
            Token::As => BinaryOperation::As,
            _ => return None,
        })
    }

    /// The grammar is line-structured, but a line break is permitted after
    /// any binary operator and after any opening grouping token. Trailing
    /// indents on the continuation line are consumed without validation.
    pub(super) fn skip_optional_linebreak(&mut self) {
        if self.eat(&Token::Eol) {
            while self.eat(&Token::Indent) {}
        }
    }

    /// term: primary postfix*
    /// postfix: `[` expression `]` | `.` evaluation
    pub(super) fn parse_term(&mut self) -> Expression {
        let mut out = self.parse_primary();
        loop {
            if self.eat(&Token::LeftSquare) {
                let index = self.parse_expression();
                self.expect(&Token::RightSquare);
                let span = out.span() + self.prev_token.span;
                out = Expression::Lookup(LookupExpression {
                    base: Box::new(out),
                    index: Box::new(index),
                    span,
                });
            } else if self.eat(&Token::Period) {
                self.skip_optional_linebreak();
                match self.parse_member(out) {
                    Ok(member) => out = member,
                    Err(base) => return base,
                }
            } else if self.eat(&Token::Arrow) {
                // Not legal, but a common mistake which deserves a specific
                // message; we parse it as a member reference anyway so the
                // analyzer has something useful to work with.
                self.emit_err(ParserError::mutator_inside_expression(self.prev_token.span));
                self.skip_optional_linebreak();
                match self.parse_member(out) {
                    Ok(member) => out = member,
                    Err(base) => return base,
                }
            } else {
                break;
            }
        }
        out
    }

    /// The member half of a postfix `.` chain: an identifier with an
    /// optional argument subscript.
    fn parse_member(&mut self, base: Expression) -> Result<Expression, Expression> {
        match self.eat_identifier() {
            Some(name) => {
                let arguments = self.check(&Token::LeftParen).then(|| self.parse_call_arguments());
                let span = base.span() + self.prev_token.span;
                Ok(Expression::Member(MemberExpression { base: Box::new(base), name, arguments, span }))
            }
            None => {
                self.emit_err(ParserError::unknown_expression_token(self.token.token.clone(), self.token.span));
                Err(base)
            }
        }
    }

    /// An argument subscript: `(` expression `)` with the comma chain split
    /// into individual argument expressions.
    pub(crate) fn parse_call_arguments(&mut self) -> Vec<Expression> {
        self.expect(&Token::LeftParen);
        self.skip_optional_linebreak();
        let arguments = self.parse_expression();
        self.expect(&Token::RightParen);
        arguments.into_tuple_elements()
    }

    /// primary:
    ///   evaluation | literal | `-` term | `not` term
    ///   subexpression | list | map
    ///   invoke | capture | `sync` [`(` exp `)`] | `throw` `(` exp `)`
    ///   `each` comprehension
    fn parse_primary(&mut self) -> Expression {
        let SpannedToken { token, span } = self.token.clone();
        match token {
            Token::Identifier(name) => {
                self.bump();
                self.parse_evaluation(Identifier::new(name, span))
            }

            // Literals
            Token::SymbolLit(sym) => self.literal(LiteralVariant::Symbol(sym.to_string()), span),
            Token::Integer(value) => self.literal(LiteralVariant::Integer(value), span),
            Token::Real(value) => self.literal(LiteralVariant::Real(value), span),
            Token::Float(value) => self.literal(LiteralVariant::Float(value), span),
            Token::Hex(value) => self.literal(LiteralVariant::Hex(value), span),
            Token::Oct(value) => self.literal(LiteralVariant::Oct(value), span),
            Token::Bin(value) => self.literal(LiteralVariant::Bin(value), span),
            Token::StaticString(value) => self.literal(LiteralVariant::String(value), span),
            Token::True => self.literal(LiteralVariant::Boolean(true), span),
            Token::False => self.literal(LiteralVariant::Boolean(false), span),

            // Unary operators, which bind tighter than any binop.
            Token::Minus => {
                self.bump();
                let receiver = self.parse_term();
                let span = span + receiver.span();
                Expression::Unary(UnaryExpression { receiver: Box::new(receiver), op: UnaryOperation::Negate, span })
            }
            Token::Not => {
                self.bump();
                let receiver = self.parse_term();
                let span = span + receiver.span();
                Expression::Unary(UnaryExpression { receiver: Box::new(receiver), op: UnaryOperation::Not, span })
            }

            // Containers
            Token::LeftParen => {
                self.bump();
                self.skip_optional_linebreak();
                let inner = self.parse_expression();
                self.expect(&Token::RightParen);
                Expression::Paren(ParenExpression { inner: Box::new(inner), span: self.span_from(span) })
            }
            Token::LeftSquare => {
                self.bump();
                self.skip_optional_linebreak();
                let items = self.parse_expression();
                self.expect(&Token::RightSquare);
                Expression::List(ListExpression { items: Box::new(items), span: self.span_from(span) })
            }
            Token::LeftCurly => {
                self.bump();
                self.skip_optional_linebreak();
                let items = self.parse_expression();
                self.expect(&Token::RightCurly);
                Expression::Map(MapExpression { items: Box::new(items), span: self.span_from(span) })
            }

            // Compound non-precedential operators
            Token::Invoke => {
                self.bump();
                self.parse_invoke(span)
            }
            Token::Capture => {
                self.bump();
                self.parse_capture(span)
            }
            Token::Sync => {
                self.bump();
                let expression = self.eat(&Token::LeftParen).then(|| {
                    let inner = self.parse_expression();
                    self.expect(&Token::RightParen);
                    Box::new(inner)
                });
                Expression::Sync(SyncExpression { expression, span: self.span_from(span) })
            }
            Token::Throw => {
                self.bump();
                self.expect(&Token::LeftParen);
                let expression = self.parse_expression();
                self.expect(&Token::RightParen);
                Expression::Throw(ThrowExpression { expression: Box::new(expression), span: self.span_from(span) })
            }
            Token::Each => {
                self.bump();
                self.parse_list_comprehension(span)
            }

            // Error cases. The line break stays put, since it is the
            // statement parser's synchronization point.
            Token::Eol => {
                self.emit_err(ParserError::unexpected_eol(span));
                Expression::Dummy(DummyExpression { span })
            }
            Token::Eof => {
                self.emit_err(ParserError::unexpected_eof(span));
                Expression::Dummy(DummyExpression { span })
            }
            Token::RightParen => {
                self.bump();
                self.emit_err(ParserError::empty_subexpression(span));
                Expression::Dummy(DummyExpression { span })
            }
            Token::RightSquare => {
                self.bump();
                self.emit_err(ParserError::empty_list(span));
                Expression::Dummy(DummyExpression { span })
            }
            Token::RightCurly => {
                self.bump();
                self.emit_err(ParserError::empty_map(span));
                Expression::Dummy(DummyExpression { span })
            }
            token => {
                self.bump();
                self.emit_err(ParserError::unknown_expression_token(token, span));
                Expression::Dummy(DummyExpression { span })
            }
        }
    }

    /// evaluation: identifier [`(` arguments `)`]
    ///
    /// Unlike C-style languages the subscript may not be empty, since its
    /// presence does not distinguish between invocation and reference:
    /// naming a function always implies invocation.
    fn parse_evaluation(&mut self, function: Identifier) -> Expression {
        if self.check(&Token::LeftParen) {
            let arguments = self.parse_call_arguments();
            let span = function.span + self.prev_token.span;
            Expression::Call(CallExpression { function, arguments, span })
        } else {
            Expression::Identifier(function)
        }
    }

    /// A literal primary; consumes the current token.
    fn literal(&mut self, variant: LiteralVariant, span: radian_span::Span) -> Expression {
        self.bump();
        Expression::Literal(Literal { variant, span })
    }

    /// invoke: `invoke` `(` exp [`:` exp] `)`
    ///
    /// Invoke an object or function reference, with optional arguments.
    fn parse_invoke(&mut self, start: radian_span::Span) -> Expression {
        self.expect(&Token::LeftParen);
        self.skip_optional_linebreak();
        let callee = self.parse_expression();
        let arguments = self.eat(&Token::Colon).then(|| Box::new(self.parse_expression()));
        self.expect(&Token::RightParen);
        Expression::Invoke(InvokeExpression { callee: Box::new(callee), arguments, span: self.span_from(start) })
    }

    /// capture: `capture` `(` [exp `:`] exp `)`
    ///
    /// Create a function object from the expression, capturing the current
    /// values of any context symbols it uses. With a parameter clause, the
    /// expression can use those names as its parameters.
    fn parse_capture(&mut self, start: radian_span::Span) -> Expression {
        self.expect(&Token::LeftParen);
        self.skip_optional_linebreak();
        let first = self.parse_expression();
        let (parameter, body) = if self.eat(&Token::Colon) {
            (Some(Box::new(first)), self.parse_expression())
        } else {
            (None, first)
        };
        self.expect(&Token::RightParen);
        Expression::Lambda(LambdaExpression { parameter, body: Box::new(body), span: self.span_from(start) })
    }

    /// comprehension: `each` [exp `from`] exp `in` exp [`where` exp]
    ///
    /// Map and/or filter some sequence. We cannot know while parsing the
    /// first clause whether it is the output expression or the variable;
    /// that depends on whether a `from` follows.
    fn parse_list_comprehension(&mut self, start: radian_span::Span) -> Expression {
        let first = self.parse_expression();
        let (output, variable) = if self.eat(&Token::From) {
            (Some(Box::new(first)), self.parse_expression())
        } else {
            (None, first)
        };
        self.expect_with(&Token::In, ParserError::for_loop_expects_in_keyword);
        let input = self.parse_expression();
        let predicate = self.eat(&Token::Where).then(|| Box::new(self.parse_expression()));
        Expression::Comprehension(ComprehensionExpression {
            output,
            variable: Box::new(variable),
            input: Box::new(input),
            predicate,
            span: self.span_from(start),
        })
    }
}
