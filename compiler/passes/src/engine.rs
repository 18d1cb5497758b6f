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

//! The engine drives the analyzer over a statement list and yields the
//! finished functions as a pull stream.

use crate::Analyzer;

use radian_ast::Statement;
use radian_errors::emitter::Handler;
use radian_flowgraph::{NodeId, Pool};
use radian_span::Span;

use std::collections::VecDeque;

/// Receives the import references a compilation unit makes, so the host
/// can locate and compile the referenced modules. The contract is
/// fire-and-forget: the engine never waits for resolution.
pub trait Importer {
    fn import_module(&mut self, file_name: &str, source_dir: &str, span: Span);
}

/// An importer for hosts that resolve nothing.
#[derive(Default)]
pub struct NullImporter;

impl Importer for NullImporter {
    fn import_module(&mut self, _file_name: &str, _source_dir: &str, _span: Span) {}
}

/// The kind of compilation unit an engine builds.
pub enum SourceUnit {
    /// An executable program.
    Program,
    /// A library module. `library` marks modules of the radian standard
    /// library, which may bind the runtime builtins.
    Module { name: String, library: bool },
}

/// Drives semantic analysis statement by statement and yields Function
/// nodes in creation order. The last function yielded is the unit's
/// entry point.
pub struct Engine<'a> {
    analyzer: Analyzer<'a>,
    statements: std::vec::IntoIter<Statement>,
    output: VecDeque<NodeId>,
    imports: VecDeque<(NodeId, Span)>,
    done: bool,
}

impl<'a> Engine<'a> {
    /// Creates the engine for one compilation unit.
    pub fn new(handler: &'a Handler, file_path: &str, unit: SourceUnit, statements: Vec<Statement>) -> Self {
        let analyzer = match &unit {
            SourceUnit::Program => Analyzer::new_program(handler, file_path),
            SourceUnit::Module { name, library } => {
                let mut analyzer = Analyzer::new_module(handler, file_path, name);
                if *library {
                    analyzer.enable_builtins();
                }
                analyzer
            }
        };
        Self {
            analyzer,
            statements: statements.into_iter(),
            output: VecDeque::new(),
            imports: VecDeque::new(),
            done: false,
        }
    }

    /// Pulls the next finished function, processing statements until one
    /// appears. At end of input the unit's entry function is generated,
    /// and the pool is validated: if any invalid graph was constructed,
    /// at least one error must have been reported by now.
    pub fn next_function(&mut self, importer: &mut dyn Importer) -> Option<NodeId> {
        while self.output.is_empty() {
            let Some(statement) = self.statements.next() else {
                break;
            };
            self.analyzer.exec_stmt(&statement);
            self.drain(importer);
        }

        if self.output.is_empty() && !self.done {
            self.analyzer.finish();
            self.done = true;
            self.drain(importer);
            self.analyzer.pool.validate(self.analyzer.handler.had_errors());
        }

        self.output.pop_front()
    }

    /// Collects every function the engine produces.
    pub fn run_to_end(&mut self, importer: &mut dyn Importer) -> Vec<NodeId> {
        let mut functions = Vec::new();
        while let Some(function) = self.next_function(importer) {
            functions.push(function);
        }
        functions
    }

    /// Moves newly pooled functions and imports out to the consumers.
    fn drain(&mut self, importer: &mut dyn Importer) {
        self.output.extend(self.analyzer.pool.take_new_functions());
        self.imports.extend(self.analyzer.pool.take_new_imports());
        while let Some((import, span)) = self.imports.pop_front() {
            let Some(reference) = self.analyzer.pool.as_import(import) else {
                continue;
            };
            let file_name = self.analyzer.pool.contents(reference.file_name).to_string();
            let source_dir = self.analyzer.pool.contents(reference.source_dir).to_string();
            importer.import_module(&file_name, &source_dir, span);
        }
    }

    /// The pool holding everything the engine built. Only meaningful to
    /// enumerate after the stream has ended.
    pub fn pool(&self) -> &Pool {
        &self.analyzer.pool
    }

    /// Mutable pool access, for consumers that intern probe nodes to
    /// compare against the emitted graph.
    pub fn pool_mut(&mut self) -> &mut Pool {
        &mut self.analyzer.pool
    }
}
