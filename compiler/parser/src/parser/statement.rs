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
use radian_span::Span;

impl ParserContext<'_> {
    /// Parses one statement line: zero or more indents, the statement
    /// production selected by the first token, and the closing line break.
    /// Anything left on the line after the production is discarded with an
    /// error, which is how the parser resynchronizes after a bad line.
    pub(crate) fn parse_statement(&mut self) -> Statement {
        let mut indent = 0u32;
        while self.eat(&Token::Indent) {
            indent += 1;
        }
        let start = self.token.span;

        let statement = match &self.token.token {
            Token::Assert => self.parse_assertion(indent, start),
            Token::DebugTrace => self.parse_debug_trace(indent, start),
            Token::Def => self.parse_definition(indent, start),
            Token::Else => self.parse_else(indent, start),
            Token::End => self.parse_block_end(indent, start),
            Token::For => self.parse_for_loop(indent, start),
            Token::Function => self.parse_function_declaration(indent, start),
            Token::If => self.parse_if_then(indent, start),
            Token::Import => self.parse_import(indent, start),
            Token::Method => self.parse_method_declaration(indent, start),
            Token::Object => self.parse_object_declaration(indent, start),
            Token::Sync => self.parse_sync(indent, start),
            Token::Var => self.parse_var_declaration(indent, start),
            Token::While => self.parse_while_loop(indent, start),
            Token::Yield => self.parse_yield(indent, start),
            Token::Eol | Token::Eof => {
                Statement::BlankLine(BlankLineStatement { indent, span: start })
            }
            _ => self.parse_expr_statement(indent, start),
        };

        self.synchronize_to_eol(ParserError::unknown_line_end);
        self.eat(&Token::Eol);
        statement
    }

    /// `assert` expression
    fn parse_assertion(&mut self, indent: u32, start: Span) -> Statement {
        self.bump();
        let condition = self.parse_expression();
        Statement::Assert(AssertStatement { condition, indent, span: self.span_from(start) })
    }

    /// `debug_trace` expression
    ///
    /// Print a message to stderr: a simple debugging tool, and a cheat out
    /// of the IO system since it does not require syncing from an IO task.
    fn parse_debug_trace(&mut self, indent: u32, start: Span) -> Statement {
        self.bump();
        let expression = self.parse_expression();
        Statement::DebugTrace(DebugTraceStatement { expression, indent, span: self.span_from(start) })
    }

    /// `def` identifier `=` expression
    ///
    /// The same grammar as `var`, except that a definition can't be updated
    /// once declared.
    fn parse_definition(&mut self, indent: u32, start: Span) -> Statement {
        self.bump();
        let name = self.expect_decl_identifier();
        let expression = self
            .expect_with(&Token::Eq, ParserError::unknown_declaration_value)
            .then(|| self.parse_expression());
        Statement::Definition(DefinitionStatement { name, expression, indent, span: self.span_from(start) })
    }

    /// `else` [`if` expression] `:`
    fn parse_else(&mut self, indent: u32, start: Span) -> Statement {
        self.bump();
        let condition = self.eat(&Token::If).then(|| self.parse_expression());
        self.expect_with(&Token::Colon, ParserError::unknown_declaration_value);
        Statement::Else(ElseStatement { condition, indent, span: self.span_from(start) })
    }

    /// `end` [identifier | `if` | `while` | `for`]
    ///
    /// Terminates a scope block. Naming the block being closed lets the
    /// balancer detect mismatches; a bare `end` matches any block.
    fn parse_block_end(&mut self, indent: u32, start: Span) -> Statement {
        self.bump();
        let name = match &self.token.token {
            Token::If | Token::While | Token::For => {
                let name = self.token.token.keyword_to_symbol().unwrap();
                let span = self.token.span;
                self.bump();
                Some(Identifier::new(name, span))
            }
            Token::Identifier(_) => self.eat_identifier(),
            _ => {
                if !self.at_line_end() {
                    self.emit_err(ParserError::end_expects_identifier(self.token.span));
                    self.bump();
                }
                None
            }
        };
        Statement::BlockEnd(BlockEndStatement { name, indent, span: self.span_from(start) })
    }

    /// `for` identifier `in` expression `:`
    fn parse_for_loop(&mut self, indent: u32, start: Span) -> Statement {
        self.bump();
        let variable = self.expect_decl_identifier();
        self.expect_with(&Token::In, ParserError::for_loop_expects_in_keyword);
        let sequence = self.parse_expression();
        self.expect_with(&Token::Colon, ParserError::for_loop_expects_block_begin);
        Statement::ForLoop(ForLoopStatement { variable, sequence, indent, span: self.span_from(start) })
    }

    /// `function` identifier [`(` expression `)`] {`:` | `=` expression}
    fn parse_function_declaration(&mut self, indent: u32, start: Span) -> Statement {
        self.bump();
        let name = self.expect_decl_identifier();
        let parameter = self.parse_optional_parens();
        let expression = if self.eat(&Token::Eq) {
            Some(self.parse_expression())
        } else {
            self.expect_with(&Token::Colon, ParserError::unknown_declaration_value);
            None
        };
        Statement::Function(FunctionDeclaration { name, parameter, expression, indent, span: self.span_from(start) })
    }

    /// `if` expression `:`
    fn parse_if_then(&mut self, indent: u32, start: Span) -> Statement {
        self.bump();
        let condition = self.parse_expression();
        self.expect_with(&Token::Colon, ParserError::unknown_declaration_value);
        Statement::IfThen(IfThenStatement { condition, indent, span: self.span_from(start) })
    }

    /// `import` identifier [`from` expression]
    fn parse_import(&mut self, indent: u32, start: Span) -> Statement {
        self.bump();
        let name = self.expect_decl_identifier();
        let source_dir = self.eat(&Token::From).then(|| self.parse_expression());
        Statement::Import(ImportDeclaration { name, source_dir, indent, span: self.span_from(start) })
    }

    /// `method` identifier [`(` expression `)`] `:`
    fn parse_method_declaration(&mut self, indent: u32, start: Span) -> Statement {
        self.bump();
        let name = self.expect_decl_identifier();
        let parameter = self.parse_optional_parens();
        self.expect_with(&Token::Colon, ParserError::unknown_declaration_value);
        Statement::Method(MethodDeclaration { name, parameter, indent, span: self.span_from(start) })
    }

    /// `object` identifier [`(` expression `)`] [`from` expression] `:`
    fn parse_object_declaration(&mut self, indent: u32, start: Span) -> Statement {
        self.bump();
        let name = self.expect_decl_identifier();
        let parameter = self.parse_optional_parens();
        let prototype = self.eat(&Token::From).then(|| self.parse_expression());
        self.expect_with(&Token::Colon, ParserError::unknown_declaration_value);
        Statement::Object(ObjectDeclaration { name, parameter, prototype, indent, span: self.span_from(start) })
    }

    /// `sync` expression
    fn parse_sync(&mut self, indent: u32, start: Span) -> Statement {
        self.bump();
        let expression = self.parse_expression();
        Statement::Sync(SyncStatement { expression, indent, span: self.span_from(start) })
    }

    /// `var` identifier [`=` expression]
    fn parse_var_declaration(&mut self, indent: u32, start: Span) -> Statement {
        self.bump();
        let name = self.expect_decl_identifier();
        let expression = self.eat(&Token::Eq).then(|| self.parse_expression());
        Statement::Var(VarDeclaration { name, expression, indent, span: self.span_from(start) })
    }

    /// `while` expression `:`
    fn parse_while_loop(&mut self, indent: u32, start: Span) -> Statement {
        self.bump();
        let condition = self.parse_expression();
        self.expect_with(&Token::Colon, ParserError::unknown_declaration_value);
        Statement::While(WhileStatement { condition, indent, span: self.span_from(start) })
    }

    /// `yield` [`from`] expression
    fn parse_yield(&mut self, indent: u32, start: Span) -> Statement {
        self.bump();
        let from_subsequence = self.eat(&Token::From);
        let expression = self.parse_expression();
        Statement::Yield(YieldStatement { expression, from_subsequence, indent, span: self.span_from(start) })
    }

    /// exprstatement:
    ///   target `=` expression
    ///   target [`(` arguments `)`]
    ///
    /// The line consists of an expression used as a statement: either an
    /// assignment to the target, or a mutation of it.
    fn parse_expr_statement(&mut self, indent: u32, start: Span) -> Statement {
        let place = self.parse_target();
        if self.eat(&Token::Eq) {
            let value = self.parse_expression();
            Statement::Assign(AssignStatement { place, value, indent, span: self.span_from(start) })
        } else {
            let arguments = self.check(&Token::LeftParen).then(|| self.parse_call_arguments());
            Statement::Mutation(MutationStatement { target: place, arguments, indent, span: self.span_from(start) })
        }
    }

    /// target: (item `,`)* item
    ///
    /// Assignable thing: an item, or a tuple of items for destructuring.
    fn parse_target(&mut self) -> Expression {
        let mut expression = self.parse_target_item();
        while self.eat(&Token::Comma) {
            let right = self.parse_target_item();
            let span = expression.span() + right.span();
            expression = Expression::Binary(BinaryExpression {
                left: Box::new(expression),
                right: Box::new(right),
                op: BinaryOperation::Tuple,
                span,
            });
        }
        expression
    }

    /// item:
    ///   identifier [`->` identifier]* [`[` expression `]`]
    ///   `(` target `)`   — assign to elements from a sequence
    ///   `[` target `]`   — assign by looking up numeric indexes
    ///   `{` target `}`   — assign to vars from a map
    fn parse_target_item(&mut self) -> Expression {
        let start = self.token.span;
        if let Some(ident) = self.eat_identifier() {
            let mut expression = Expression::Identifier(ident);
            while self.eat(&Token::Arrow) {
                match self.eat_identifier() {
                    Some(name) => {
                        let span = expression.span() + name.span;
                        expression = Expression::Member(MemberExpression {
                            base: Box::new(expression),
                            name,
                            arguments: None,
                            span,
                        });
                    }
                    None => {
                        self.emit_err(ParserError::statement_expects_identifier(self.token.span));
                        return expression;
                    }
                }
            }
            if self.eat(&Token::LeftSquare) {
                let index = self.parse_expression();
                self.expect(&Token::RightSquare);
                let span = self.span_from(start);
                expression = Expression::Lookup(LookupExpression {
                    base: Box::new(expression),
                    index: Box::new(index),
                    span,
                });
            }
            expression
        } else if self.eat(&Token::LeftParen) {
            let target = self.parse_target();
            self.expect(&Token::RightParen);
            target
        } else if self.eat(&Token::LeftSquare) {
            let target = self.parse_target();
            self.expect(&Token::RightSquare);
            Expression::List(ListExpression { items: Box::new(target), span: self.span_from(start) })
        } else if self.eat(&Token::LeftCurly) {
            let target = self.parse_target();
            self.expect(&Token::RightCurly);
            Expression::Map(MapExpression { items: Box::new(target), span: self.span_from(start) })
        } else {
            self.emit_err(ParserError::statement_expects_identifier(self.token.span));
            Expression::Dummy(DummyExpression { span: start })
        }
    }

    /// An optional parenthesized clause, e.g. a declaration's parameters.
    fn parse_optional_parens(&mut self) -> Option<Expression> {
        self.eat(&Token::LeftParen).then(|| {
            let expression = self.parse_expression();
            self.expect(&Token::RightParen);
            expression
        })
    }
}
