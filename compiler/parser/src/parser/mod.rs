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

//! The statement and expression parsers.
//!
//! Both are recursive descent over a shared [`ParserContext`] core. Errors
//! are reported through the handler and never abort: a broken production
//! becomes a dummy node and the statement parser resynchronizes on the next
//! line break, so the output is always structurally well-formed.

use crate::tokenizer::*;

use radian_ast::*;
use radian_errors::emitter::Handler;

mod context;
pub(crate) use context::ParserContext;

mod expression;
mod statement;

/// Parses the token stream into a list of statements.
pub fn parse(handler: &Handler, tokens: Vec<SpannedToken>) -> Vec<Statement> {
    let mut context = ParserContext::new(handler, tokens);
    let mut statements = Vec::new();
    while context.has_next() {
        statements.push(context.parse_statement());
    }
    statements
}
