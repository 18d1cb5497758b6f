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

use crate::{simple_node_impl, Expression, Identifier, Node};
use radian_span::{sym, Span, Symbol};

use serde::{Deserialize, Serialize};
use std::fmt;

mod assert;
pub use assert::*;

mod assign;
pub use assign::*;

mod block;
pub use block::*;

mod conditional;
pub use conditional::*;

mod declarations;
pub use declarations::*;

mod loops;
pub use loops::*;

mod segments;
pub use segments::*;

/// Program statement that defines some action to be carried out.
///
/// Statements are line-structured; each one records the count of leading
/// indent tokens, which the block balancer checks against the nesting level.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Statement {
    /// An assertion chained onto the enclosing function's result.
    Assert(AssertStatement),
    /// An assignment `target = value`, with destructuring targets.
    Assign(AssignStatement),
    /// A line holding no statement.
    BlankLine(BlankLineStatement),
    /// An `end` statement closing the current block.
    BlockEnd(BlockEndStatement),
    /// A `debug_trace` statement printing a message to stderr.
    DebugTrace(DebugTraceStatement),
    /// A `def` declaration of an immutable name.
    Definition(DefinitionStatement),
    /// An `else` or `else if` branch delimiter.
    Else(ElseStatement),
    /// A `for name in sequence:` loop opener.
    ForLoop(ForLoopStatement),
    /// A `function` declaration, either single-line or block.
    Function(FunctionDeclaration),
    /// An `if condition:` block opener.
    IfThen(IfThenStatement),
    /// An `import` declaration.
    Import(ImportDeclaration),
    /// A `method` declaration block opener.
    Method(MethodDeclaration),
    /// A mutation `target->method(args)`.
    Mutation(MutationStatement),
    /// An `object` declaration block opener.
    Object(ObjectDeclaration),
    /// A `sync` statement emitting a value from an async task.
    Sync(SyncStatement),
    /// A `var` declaration of a mutable name.
    Var(VarDeclaration),
    /// A `while condition:` loop opener.
    While(WhileStatement),
    /// A `yield` statement emitting a value from a generator.
    Yield(YieldStatement),
}

impl Statement {
    /// The number of leading indent tokens on the statement's line.
    pub fn indent_level(&self) -> u32 {
        use Statement::*;
        match self {
            Assert(s) => s.indent,
            Assign(s) => s.indent,
            BlankLine(s) => s.indent,
            BlockEnd(s) => s.indent,
            DebugTrace(s) => s.indent,
            Definition(s) => s.indent,
            Else(s) => s.indent,
            ForLoop(s) => s.indent,
            Function(s) => s.indent,
            IfThen(s) => s.indent,
            Import(s) => s.indent,
            Method(s) => s.indent,
            Mutation(s) => s.indent,
            Object(s) => s.indent,
            Sync(s) => s.indent,
            Var(s) => s.indent,
            While(s) => s.indent,
            Yield(s) => s.indent,
        }
    }

    /// Does this statement open a new scope block?
    pub fn is_block_begin(&self) -> bool {
        match self {
            Statement::Function(function) => function.is_block_begin(),
            Statement::ForLoop(_)
            | Statement::IfThen(_)
            | Statement::Method(_)
            | Statement::Object(_)
            | Statement::While(_) => true,
            _ => false,
        }
    }

    /// Does this statement close the current scope block?
    pub fn is_block_end(&self) -> bool {
        matches!(self, Statement::BlockEnd(_))
    }

    /// Does this statement partition the current block, like `else`?
    pub fn delimits_block(&self) -> bool {
        matches!(self, Statement::Else(_))
    }

    /// The name used to match this block opener against `end` statements.
    /// Declarations use their declared name; flow-control blocks use their
    /// introducing keyword.
    pub fn block_name(&self) -> Option<Symbol> {
        match self {
            Statement::ForLoop(_) => Some(sym::For),
            Statement::Function(function) if function.is_block_begin() => Some(function.name.name),
            Statement::IfThen(_) => Some(sym::If),
            Statement::Method(method) => Some(method.name.name),
            Statement::Object(object) => Some(object.name.name),
            Statement::While(_) => Some(sym::While),
            _ => None,
        }
    }
}

impl Node for Statement {
    fn span(&self) -> Span {
        use Statement::*;
        match self {
            Assert(s) => s.span,
            Assign(s) => s.span,
            BlankLine(s) => s.span,
            BlockEnd(s) => s.span,
            DebugTrace(s) => s.span,
            Definition(s) => s.span,
            Else(s) => s.span,
            ForLoop(s) => s.span,
            Function(s) => s.span,
            IfThen(s) => s.span,
            Import(s) => s.span,
            Method(s) => s.span,
            Mutation(s) => s.span,
            Object(s) => s.span,
            Sync(s) => s.span,
            Var(s) => s.span,
            While(s) => s.span,
            Yield(s) => s.span,
        }
    }

    fn set_span(&mut self, span: Span) {
        use Statement::*;
        match self {
            Assert(s) => s.span = span,
            Assign(s) => s.span = span,
            BlankLine(s) => s.span = span,
            BlockEnd(s) => s.span = span,
            DebugTrace(s) => s.span = span,
            Definition(s) => s.span = span,
            Else(s) => s.span = span,
            ForLoop(s) => s.span = span,
            Function(s) => s.span = span,
            IfThen(s) => s.span = span,
            Import(s) => s.span = span,
            Method(s) => s.span = span,
            Mutation(s) => s.span = span,
            Object(s) => s.span = span,
            Sync(s) => s.span = span,
            Var(s) => s.span = span,
            While(s) => s.span = span,
            Yield(s) => s.span = span,
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use Statement::*;
        match self {
            Assert(s) => s.fmt(f),
            Assign(s) => s.fmt(f),
            BlankLine(s) => s.fmt(f),
            BlockEnd(s) => s.fmt(f),
            DebugTrace(s) => s.fmt(f),
            Definition(s) => s.fmt(f),
            Else(s) => s.fmt(f),
            ForLoop(s) => s.fmt(f),
            Function(s) => s.fmt(f),
            IfThen(s) => s.fmt(f),
            Import(s) => s.fmt(f),
            Method(s) => s.fmt(f),
            Mutation(s) => s.fmt(f),
            Object(s) => s.fmt(f),
            Sync(s) => s.fmt(f),
            Var(s) => s.fmt(f),
            While(s) => s.fmt(f),
            Yield(s) => s.fmt(f),
        }
    }
}
