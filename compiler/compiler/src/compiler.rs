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

use crate::BuildOptions;

use radian_ast::Ast;
use radian_errors::{emitter::Handler, CompilerError, Result};
use radian_flowgraph::{NodeId, Pool};
use radian_linear::LinearFunction;
use radian_passes::{Engine, Importer, SourceUnit};
use radian_span::{source_map::FileName, with_session_globals};

use sha2::{Digest, Sha256};
use std::path::PathBuf;

/// The primary entry point of the Radian compiler.
///
/// One compiler instance handles one compilation unit; the host's module
/// loader creates further instances for each unit an import announces.
pub struct Compiler<'a> {
    /// The handler used for error emissions.
    handler: &'a Handler,
    /// The path to the unit's source file.
    main_file_path: PathBuf,
    /// What kind of unit is being compiled.
    unit: SourceUnit,
    /// The balanced AST for the unit.
    pub ast: Ast,
    /// Compiler options on some optional diagnostic output.
    options: BuildOptions,
    /// The engine, once analysis has begun.
    engine: Option<Engine<'a>>,
}

impl<'a> Compiler<'a> {
    /// Returns a new Radian compiler.
    pub fn new(handler: &'a Handler, main_file_path: PathBuf, unit: SourceUnit, options: Option<BuildOptions>) -> Self {
        Self {
            handler,
            main_file_path,
            unit,
            ast: Ast::default(),
            options: options.unwrap_or_default(),
            engine: None,
        }
    }

    /// Returns a SHA256 checksum of the program file.
    pub fn checksum(&self) -> Result<String> {
        let unparsed_file = std::fs::read_to_string(&self.main_file_path)
            .map_err(|e| CompilerError::load_program_file_failed(self.main_file_path.display(), e))?;

        let mut hasher = Sha256::new();
        hasher.update(unparsed_file.as_bytes());
        let hash = hasher.finalize();

        Ok(format!("{hash:x}"))
    }

    /// Parses and stores a unit from a string, constructing the balanced
    /// syntax tree. Parsing never fails; errors surface on the handler.
    pub fn parse_program_from_string(&mut self, program_string: &str, name: FileName) {
        // Register the source in the source map.
        let source_file = with_session_globals(|s| s.source_map.new_source(program_string, name));

        // Use the parser to construct the balanced syntax tree.
        let ast = tracing::debug_span!("parse")
            .in_scope(|| radian_parser::parse_ast(self.handler, &source_file.src, source_file.start_pos));

        if self.options.dump_statements {
            for statement in &ast.statements {
                eprintln!("{statement}");
            }
        }

        self.ast = ast;
    }

    /// Loads, parses and stores the unit's source file.
    pub fn parse_program(&mut self) -> Result<()> {
        let program_string = std::fs::read_to_string(&self.main_file_path)
            .map_err(|e| CompilerError::load_program_file_failed(self.main_file_path.display(), e))?;
        self.parse_program_from_string(&program_string, FileName::Real(self.main_file_path.clone()));
        Ok(())
    }

    /// Runs semantic analysis to completion, returning every emitted
    /// function in creation order. The last one is the entry point.
    /// Imports are announced to `importer` as they are first constructed.
    pub fn compile(&mut self, importer: &mut dyn Importer) -> Vec<NodeId> {
        let unit = std::mem::replace(&mut self.unit, SourceUnit::Program);
        let statements = std::mem::take(&mut self.ast.statements);
        let mut engine =
            Engine::new(self.handler, &self.main_file_path.to_string_lossy(), unit, statements);
        let functions = tracing::debug_span!("analyze").in_scope(|| engine.run_to_end(importer));

        if self.options.dump_graph {
            for &function in &functions {
                eprintln!("{}", engine.pool().function_to_string(function));
            }
        }
        if self.options.dump_linear {
            for &function in &functions {
                eprintln!("{}", radian_linear::function_to_string(engine.pool(), function));
            }
        }

        self.engine = Some(engine);
        functions
    }

    /// Linearizes one emitted function for a back end.
    pub fn linearize(&self, function: NodeId) -> LinearFunction {
        tracing::debug_span!("linearize").in_scope(|| radian_linear::linearize(self.pool(), function))
    }

    /// The pool holding the compiled graph. Meaningful after `compile`.
    pub fn pool(&self) -> &Pool {
        self.engine.as_ref().expect("compile before inspecting the pool").pool()
    }

    /// Did this unit compile without errors? The process exit code is
    /// nonzero exactly when some unit reports.
    pub fn succeeded(&self) -> bool {
        !self.handler.had_errors()
    }
}
