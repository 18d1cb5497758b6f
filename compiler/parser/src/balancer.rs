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

//! The block balancer.
//!
//! A filter over the statement list which guarantees that every block
//! opener has exactly one matching end statement, synthesizing or
//! discarding ends as needed, and that every statement's indentation
//! matches its nesting level. The semantic analyzer downstream can then
//! trust block structure unconditionally.

use radian_ast::{BlankLineStatement, BlockEndStatement, Node, Statement};
use radian_errors::{emitter::Handler, ParserError};
use radian_span::{Span, Symbol};

/// One open block: its matching name and the span of its opening statement.
struct OpenBlock {
    name: Symbol,
    span: Span,
}

/// Rewrites `statements` so that block begins and ends pair up exactly.
///
/// Recovery behaviors, in order:
/// - an end matching the top of the stack passes through;
/// - an end with no open block becomes a blank line, with an error;
/// - an end naming a block further down the stack causes a synthetic end
///   to be emitted for each unclosed block above it, with an error at each
///   abandoned opener;
/// - an end naming nothing on the stack becomes a blank line, with an error;
/// - open blocks remaining at end of input get synthetic ends at `eof_span`.
pub fn balance_blocks(handler: &Handler, statements: Vec<Statement>, eof_span: Span) -> Vec<Statement> {
    let mut stack: Vec<OpenBlock> = Vec::new();
    let mut output = Vec::with_capacity(statements.len());

    let mut pending = statements.into_iter().peekable();
    while let Some(statement) = pending.peek() {
        check_indentation(handler, statement, stack.len());

        if let Some(name) = statement.block_name() {
            stack.push(OpenBlock { name, span: statement.span() });
            output.push(pending.next().unwrap());
            continue;
        }

        let Statement::BlockEnd(end) = statement else {
            output.push(pending.next().unwrap());
            continue;
        };

        match stack.last() {
            None => {
                // A spurious end with nothing open at all.
                handler.emit_err(ParserError::unmatched_end_block(end.span));
                output.push(Statement::BlankLine(BlankLineStatement { indent: end.indent, span: end.span }));
                pending.next();
            }
            Some(top) if end.ends_this_block(top.name) => {
                stack.pop();
                output.push(pending.next().unwrap());
            }
            Some(top) if stack_contains(&stack, end) => {
                // The end matches a block further down: the topmost block's
                // own end statement was omitted. Synthesize one and look at
                // this end again against the next block down.
                handler.emit_err(ParserError::unmatched_begin_block(top.span));
                output.push(Statement::BlockEnd(BlockEndStatement { name: None, indent: end.indent, span: end.span }));
                stack.pop();
            }
            Some(_) => {
                // Blocks are open, but none of them match this end.
                handler.emit_err(ParserError::unmatched_end_block(end.span));
                output.push(Statement::BlankLine(BlankLineStatement { indent: end.indent, span: end.span }));
                pending.next();
            }
        }
    }

    // Anything left open at end of input gets a synthetic end.
    while let Some(open) = stack.pop() {
        handler.emit_err(ParserError::unmatched_begin_block(open.span));
        output.push(Statement::BlockEnd(BlockEndStatement { name: None, indent: 0, span: eof_span }));
    }

    output
}

/// Does any open block match the name on this end statement?
fn stack_contains(stack: &[OpenBlock], end: &BlockEndStatement) -> bool {
    stack.iter().any(|open| end.ends_this_block(open.name))
}

/// A statement's indentation level must equal the current nesting depth,
/// one less if the statement itself closes or partitions the block.
/// Blank lines are exempt.
fn check_indentation(handler: &Handler, statement: &Statement, depth: usize) {
    if matches!(statement, Statement::BlankLine(_)) {
        return;
    }
    let mut target = depth as u32;
    if (statement.is_block_end() || statement.delimits_block()) && target > 0 {
        target -= 1;
    }
    let level = statement.indent_level();
    if level < target {
        handler.emit_err(ParserError::insufficient_indentation(statement.span()));
    }
    if level > target {
        handler.emit_err(ParserError::excessive_indentation(statement.span()));
    }
}
