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

use crate::{Compiler, NullImporter, SourceUnit};

use radian_errors::emitter::Handler;
use radian_linear::Code;
use radian_span::{source_map::FileName, symbol::create_session_if_not_set_then};

use std::path::PathBuf;

fn compile_string(source: &str) -> (usize, usize, bool) {
    create_session_if_not_set_then(|_| {
        let (handler, _buf) = Handler::new_with_buf();
        let mut compiler =
            Compiler::new(&handler, PathBuf::from("test.radian"), SourceUnit::Program, None);
        compiler.parse_program_from_string(source, FileName::Custom("test".into()));
        let functions = compiler.compile(&mut NullImporter);
        (functions.len(), handler.err_count(), compiler.succeeded())
    })
}

#[test]
fn pipeline_produces_a_function_stream() {
    let (functions, errors, succeeded) = compile_string("def x = 1 + 2\n");
    assert!(functions > 0);
    assert_eq!(errors, 0);
    assert!(succeeded);
}

#[test]
fn errors_fail_the_unit_but_not_the_pipeline() {
    let (functions, errors, succeeded) = compile_string("if a:\n\tx = 1\n");
    assert!(functions > 0);
    assert!(errors > 0);
    assert!(!succeeded);
}

#[test]
fn whole_program_linearizes() {
    create_session_if_not_set_then(|_| {
        let (handler, _buf) = Handler::new_with_buf();
        let source = "function f(a, b):\n\tresult = a + b\nend f\n";
        let mut compiler =
            Compiler::new(&handler, PathBuf::from("test.radian"), SourceUnit::Program, None);
        compiler.parse_program_from_string(source, FileName::Custom("test".into()));
        let functions = compiler.compile(&mut NullImporter);
        assert_eq!(handler.err_count(), 0);

        // Every emitted function lowers to linear code; the named one
        // exercises calls.
        let named = functions
            .iter()
            .find(|&&f| compiler.pool().as_function(f).unwrap().name == ".f")
            .copied()
            .expect("f was emitted");
        let linear = compiler.linearize(named);
        assert_eq!(linear.arity, 2);
        assert!(linear.ops.iter().any(|op| op.code == Code::Call));
        assert!(linear.ops.iter().any(|op| op.code == Code::Parameter));
    });
}

#[test]
fn missing_file_reports_loader_error() {
    create_session_if_not_set_then(|_| {
        let (handler, _buf) = Handler::new_with_buf();
        let mut compiler = Compiler::new(
            &handler,
            PathBuf::from("/no/such/file.radian"),
            SourceUnit::Program,
            None,
        );
        assert!(compiler.parse_program().is_err());
        assert!(compiler.checksum().is_err());
    });
}
