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

use crate::{SpannedToken, Token};

use radian_ast::Identifier;
use radian_errors::{emitter::Handler, ParserError};
use radian_span::{Span, Symbol};

use std::mem;

/// Stores a program in tokenized format plus additional context.
/// May be converted into a statement list by parsing all tokens.
pub(crate) struct ParserContext<'a> {
    /// Handler used to side-channel emit errors from the parser.
    pub(crate) handler: &'a Handler,
    /// All un-bumped tokens.
    tokens: Vec<SpannedToken>,
    /// The current token, i.e., if `p.tokens = ['3', *, '4']`,
    /// then after a `p.bump()`, we'll have `p.token = '3'`.
    pub(crate) token: SpannedToken,
    /// The previous token, i.e., if `p.tokens = ['3', *, '4']`,
    /// then after two `p.bump()`s, we'll have `p.token = '*'` and `p.prev_token = '3'`.
    pub(crate) prev_token: SpannedToken,
}

impl<'a> ParserContext<'a> {
    /// Returns a new [`ParserContext`] type given a vector of tokens.
    pub(crate) fn new(handler: &'a Handler, mut tokens: Vec<SpannedToken>) -> Self {
        // Strip out comments, and report the scanner's error tokens;
        // everything downstream of here sees clean input.
        tokens.retain(|t| match &t.token {
            Token::CommentLine(_) => false,
            Token::Error => {
                handler.emit_err(ParserError::bad_token(t.span));
                false
            }
            Token::Unknown(text) => {
                handler.emit_err(ParserError::unknown_token(text.clone(), t.span));
                false
            }
            _ => true,
        });
        // For performance we reverse so that we get cheap `.pop()`s.
        tokens.reverse();

        let token = SpannedToken::dummy();
        let mut p = Self { handler, prev_token: token.clone(), token, tokens };
        p.bump();
        p
    }

    /// Advances the parser cursor by one token.
    ///
    /// So e.g., if we had `previous = A`, `current = B`, and `tokens = [C, D, E]`,
    /// then after `p.bump()`, the state will be `previous = B`, `current = C`, and `tokens = [D, E]`.
    pub(crate) fn bump(&mut self) {
        // Probably a bug (infinite loop), as the previous token was already EOF.
        if let Token::Eof = self.prev_token.token {
            panic!("attempted to bump the parser past EOF (may be stuck in a loop)");
        }

        // Extract next token, or `Eof` if there was none.
        let next_token = self
            .tokens
            .pop()
            .unwrap_or_else(|| SpannedToken { token: Token::Eof, span: self.token.span });

        // Set the new token.
        self.prev_token = mem::replace(&mut self.token, next_token);
    }

    /// Checks whether the current token is `token`.
    pub(crate) fn check(&self, tok: &Token) -> bool {
        &self.token.token == tok
    }

    /// Removes the next token if it exists and returns it, or [None] if
    /// the next token does not exist.
    pub(crate) fn eat(&mut self, token: &Token) -> bool {
        self.check(token).then(|| self.bump()).is_some()
    }

    /// Eats any of the given `tokens`, returning `true` if anything was eaten.
    pub(crate) fn eat_any(&mut self, tokens: &[Token]) -> bool {
        tokens.iter().any(|x| self.check(x)).then(|| self.bump()).is_some()
    }

    /// Returns true if the next token exists.
    pub(crate) fn has_next(&self) -> bool {
        !matches!(self.token.token, Token::Eof)
    }

    /// Is the current token a line ending (or the end of the file)?
    pub(crate) fn at_line_end(&self) -> bool {
        matches!(self.token.token, Token::Eol | Token::Eof)
    }

    /// Emit the error `err`.
    pub(crate) fn emit_err(&self, err: ParserError) {
        self.handler.emit_err(err);
    }

    /// At the previous token, return and make an identifier with `name`.
    fn mk_ident_prev(&self, name: Symbol) -> Identifier {
        Identifier { name, span: self.prev_token.span }
    }

    /// Eats the next token if it is an identifier and returns it.
    pub(crate) fn eat_identifier(&mut self) -> Option<Identifier> {
        if let Token::Identifier(name) = self.token.token {
            self.bump();
            return Some(self.mk_ident_prev(name));
        }
        None
    }

    /// Expects an identifier naming a declaration. On mismatch, reports and
    /// substitutes an unspellable placeholder name so parsing can continue.
    pub(crate) fn expect_decl_identifier(&mut self) -> Identifier {
        self.eat_identifier().unwrap_or_else(|| {
            self.emit_err(ParserError::declaration_expects_identifier(self.token.span));
            Identifier { name: Symbol::intern("?"), span: self.token.span }
        })
    }

    /// Eats the expected `token`, or reports `err` about the current token.
    /// Never raises; the return value says whether the token was there.
    pub(crate) fn expect_with(&mut self, token: &Token, err: fn(Span) -> ParserError) -> bool {
        if self.eat(token) {
            true
        } else {
            self.emit_err(err(self.token.span));
            false
        }
    }

    /// Eats the expected `token`, reporting a generic error based on the
    /// token kind when it is missing.
    pub(crate) fn expect(&mut self, token: &Token) -> bool {
        let err = match token {
            Token::LeftParen => ParserError::missing_left_paren,
            Token::RightParen => ParserError::missing_right_paren,
            Token::RightSquare => ParserError::missing_right_bracket,
            Token::RightCurly => ParserError::missing_right_brace,
            _ => |span| ParserError::unknown_expression_token("<missing>", span),
        };
        self.expect_with(token, err)
    }

    /// Munches tokens up to the next line ending, reporting `err` once if
    /// anything had to be discarded. This is the parser's recovery point:
    /// whatever went wrong earlier in the line cannot leak past it.
    pub(crate) fn synchronize_to_eol(&mut self, err: fn(Span) -> ParserError) {
        if self.at_line_end() {
            return;
        }
        self.emit_err(err(self.token.span));
        while !self.at_line_end() {
            self.bump();
        }
    }

    /// The span from `start` through the previously eaten token.
    pub(crate) fn span_from(&self, start: Span) -> Span {
        start + self.prev_token.span
    }
}
