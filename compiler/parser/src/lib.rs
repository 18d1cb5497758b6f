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

//! The parser to convert Radian code text into an [`Ast`] type.
//!
//! Parsing never fails: every malformed production is reported through the
//! handler, replaced with a placeholder node, and parsing resynchronizes on
//! the next line break. The statement list is then filtered through the
//! block balancer so that every block opener has exactly one matching end.

#![forbid(unsafe_code)]

pub(crate) mod tokenizer;
pub use tokenizer::KEYWORD_TOKENS;
pub(crate) use tokenizer::*;

pub mod parser;
pub use parser::*;

pub mod balancer;
pub use balancer::*;

use radian_ast::Ast;
use radian_errors::emitter::Handler;
use radian_span::span::{BytePos, Pos, Span};

#[cfg(test)]
mod test;

/// Creates a new AST from the given source code text, with block structure
/// balanced and every statement's indentation checked.
pub fn parse_ast(handler: &Handler, source: &str, start_pos: BytePos) -> Ast {
    let eof = start_pos + BytePos::from_usize(source.len());
    let statements = parse_statements(handler, source, start_pos);
    tracing::debug!(statements = statements.len(), "parsed statement list");
    let statements = balance_blocks(handler, statements, Span::new(eof, eof));
    Ast::new(statements)
}

/// Parses the source text into a raw statement list, without balancing.
pub fn parse_statements(handler: &Handler, source: &str, start_pos: BytePos) -> Vec<radian_ast::Statement> {
    let tokens = tokenizer::tokenize(source, start_pos);
    parser::parse(handler, tokens)
}
