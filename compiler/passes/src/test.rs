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

use crate::{Engine, NullImporter, SourceUnit};

use radian_errors::emitter::Handler;
use radian_flowgraph::{Intrinsic, Node, NodeId, Pool, PostOrderDfs, ValueKind};
use radian_span::{source_map::FileName, symbol::create_session_if_not_set_then};

/// Compiles `source` as a program and hands the engine, the emitted
/// functions, and the error count to the continuation.
fn with_program<R>(source: &str, f: impl FnOnce(&mut Engine, Vec<NodeId>, usize) -> R) -> R {
    with_unit(source, SourceUnit::Program, f)
}

fn with_unit<R>(source: &str, unit: SourceUnit, f: impl FnOnce(&mut Engine, Vec<NodeId>, usize) -> R) -> R {
    create_session_if_not_set_then(|s| {
        let (handler, _buf) = Handler::new_with_buf();
        let sf = s.source_map.new_source(source, FileName::Custom("test".into()));
        let ast = radian_parser::parse_ast(&handler, &sf.src, sf.start_pos);
        let mut engine = Engine::new(&handler, "test.radian", unit, ast.statements);
        let functions = engine.run_to_end(&mut NullImporter);
        f(&mut engine, functions, handler.err_count())
    })
}

/// All the symbol spellings reachable from `root`, via the post-order
/// walk, descending through function bodies one level at a time.
fn reachable_symbols(pool: &Pool, root: NodeId) -> Vec<String> {
    let mut symbols = Vec::new();
    let mut pending = vec![root];
    let mut seen = Vec::new();
    while let Some(next) = pending.pop() {
        if seen.contains(&next) {
            continue;
        }
        seen.push(next);
        for node in PostOrderDfs::new(pool, next) {
            match pool.node(node) {
                Node::Value(value) if value.kind == ValueKind::Symbol => {
                    symbols.push(value.contents.clone());
                }
                Node::Function(function) => pending.push(function.body),
                _ => {}
            }
        }
    }
    symbols
}

/// Does the graph under `root` reference the given intrinsic?
fn references_intrinsic(pool: &Pool, root: NodeId, intrinsic: Intrinsic) -> bool {
    let mut pending = vec![root];
    let mut seen = Vec::new();
    while let Some(next) = pending.pop() {
        if seen.contains(&next) {
            continue;
        }
        seen.push(next);
        for node in PostOrderDfs::new(pool, next) {
            match pool.node(node) {
                Node::Intrinsic(found) if *found == intrinsic => return true,
                Node::Function(function) => pending.push(function.body),
                _ => {}
            }
        }
    }
    false
}

fn function_names(pool: &Pool, functions: &[NodeId]) -> Vec<String> {
    functions.iter().map(|&f| pool.as_function(f).unwrap().name.clone()).collect()
}

#[test]
fn simple_definition_lowers_to_method_addition() {
    with_program("def x = 1 + 2\n", |engine, functions, errors| {
        assert_eq!(errors, 0);
        assert!(!functions.is_empty());
        // The stream ends with the entry point: the program task of
        // arity 2 (io, argv).
        let entry = *functions.last().unwrap();
        assert_eq!(engine.pool().as_function(entry).unwrap().arity, 2);

        // Interning means the expected expression, rebuilt from scratch,
        // is the same node the analyzer produced.
        let pool = engine.pool_mut();
        let one = pool.number_str("1");
        let two = pool.number_str("2");
        let add = pool.sym_add();
        let method = pool.call1(one, add);
        let expected = pool.call2(method, one, two);
        // It already existed: rebuilding it must not have grown the pool
        // past the point where a fresh probe node would land.
        let probe = pool.number_str("1");
        assert_eq!(probe, one);
        assert!(expected.index() < pool.node_count());
        assert!(!pool.is_tainted());
    });
}

#[test]
fn named_function_chains_asserts_ahead_of_result() {
    let source = "function f(a, b):\n\tvar r = a + b\n\tresult = r\nend f\n";
    with_program(source, |engine, functions, errors| {
        assert_eq!(errors, 0);
        let names = function_names(engine.pool(), &functions);
        assert!(names.contains(&".f".to_string()), "function names: {names:?}");

        let f = functions[names.iter().position(|n| n == ".f").unwrap()];
        let header = engine.pool().as_function(f).unwrap().clone();
        assert_eq!(header.arity, 2);

        // The body is exactly Call2(Call1(param0, :add), param0, param1):
        // the assert chain head is true, which chains away to nothing.
        let pool = engine.pool_mut();
        let p0 = pool.parameter(0);
        let p1 = pool.parameter(1);
        let add = pool.sym_add();
        let method = pool.call1(p0, add);
        let expected = pool.call2(method, p0, p1);
        assert_eq!(header.body, expected);
    });
}

#[test]
fn if_else_synthesizes_phi_tuple() {
    let source = "var a = 5\nvar x = 0\nif a = 0:\n\tx = 1\nelse:\n\tx = 2\nend if\n";
    with_program(source, |engine, functions, errors| {
        assert_eq!(errors, 0);
        assert!(!engine.pool().is_tainted());
        // Both arms of the chain contribute an anonymous action function
        // over the captured parameters.
        let anonymous = function_names(engine.pool(), &functions)
            .iter()
            .filter(|name| name.starts_with("block_"))
            .count();
        assert!(anonymous >= 2, "expected branch actions among {functions:?}");
        // The comparison goes through the comparable protocol, inside one
        // of the emitted branch actions.
        let symbols: Vec<String> = functions
            .iter()
            .flat_map(|&f| {
                let body = engine.pool().as_function(f).unwrap().body;
                reachable_symbols(engine.pool(), body)
            })
            .collect();
        assert!(symbols.iter().any(|s| s == "compare_to"), "{symbols:?}");
    });
}

#[test]
fn if_without_else_gets_default_branch() {
    let source = "var x = 0\nif x = 0:\n\tx = 1\nend if\n";
    with_program(source, |engine, functions, errors| {
        assert_eq!(errors, 0);
        // The synthesized default branch returns the input unchanged, so
        // the chain still folds into callable actions.
        let anonymous = function_names(engine.pool(), &functions)
            .iter()
            .filter(|name| name.starts_with("block_"))
            .count();
        assert!(anonymous >= 2);
    });
}

#[test]
fn while_loop_threads_io_tuple() {
    let source = "var n = 10\nvar total = 0\nwhile n > 0:\n\ttotal = total + n\n\tn = n - 1\nend while\n";
    with_program(source, |engine, functions, errors| {
        assert_eq!(errors, 0);
        let names = function_names(engine.pool(), &functions);
        assert!(names.iter().any(|n| n.ends_with("-condition")), "{names:?}");
        assert!(names.iter().any(|n| n.ends_with("-operation")), "{names:?}");
        // No placeholder may survive the remap into an emitted body.
        for &f in &functions {
            let body = engine.pool().as_function(f).unwrap().body;
            for node in PostOrderDfs::new(engine.pool(), body) {
                assert!(!engine.pool().is_placeholder(node), "unrewritten placeholder escaped");
            }
        }
    });
}

#[test]
fn for_loop_specializer_hoists_induction_work() {
    let source = "function f(seq):\n\tvar y = 0\n\tfor i in seq:\n\t\ty = y + i * i\n\tend for\n\tresult = y\nend f\n";
    with_program(source, |engine, functions, errors| {
        assert_eq!(errors, 0);
        let names = function_names(engine.pool(), &functions);
        // The mapper computes i * i per element; the operation function is
        // reissued in its specialized form.
        assert!(names.iter().any(|n| n.contains(".mapper-")), "{names:?}");
        assert!(names.iter().any(|n| n.ends_with("-operationX")), "{names:?}");

        let f = functions[names.iter().position(|n| n == ".f").unwrap()];
        let body = engine.pool().as_function(f).unwrap().body;
        assert!(references_intrinsic(engine.pool(), body, Intrinsic::Parallelize));
        let symbols = reachable_symbols(engine.pool(), body);
        assert!(symbols.iter().any(|s| s == "map"), "core.map missing: {symbols:?}");
        // The loop reads elements back out of the mapped sequence.
        assert!(symbols.iter().any(|s| s == "current"));
    });
}

#[test]
fn plain_for_loop_still_parallelizes() {
    // The body accumulates the prime inductor itself, so there is nothing
    // worth hoisting, but the input sequence is still parallelized.
    let source = "function f(seq):\n\tvar y = 0\n\tfor i in seq:\n\t\ty = y + i\n\tend for\n\tresult = y\nend f\n";
    with_program(source, |engine, functions, errors| {
        assert_eq!(errors, 0);
        let names = function_names(engine.pool(), &functions);
        assert!(!names.iter().any(|n| n.contains(".mapper-")), "{names:?}");
        let f = functions[names.iter().position(|n| n == ".f").unwrap()];
        let body = engine.pool().as_function(f).unwrap().body;
        assert!(references_intrinsic(engine.pool(), body, Intrinsic::Parallelize));
    });
}

#[test]
fn generator_packages_yields_into_iterator_chain() {
    let source = "function gen:\n\tyield 1\n\tyield 2\nend gen\n";
    with_program(source, |engine, functions, errors| {
        assert_eq!(errors, 0);
        let names = function_names(engine.pool(), &functions);
        let gen = functions[names.iter().position(|n| n == ".gen").unwrap()];
        let body = engine.pool().as_function(gen).unwrap().body;
        let symbols = reachable_symbols(engine.pool(), body);
        let iterators = symbols.iter().filter(|s| s.as_str() == "make_iterator").count();
        assert_eq!(iterators, 2, "one iterator per yield: {symbols:?}");
        assert!(symbols.iter().any(|s| s == "make_terminator"));
        assert!(symbols.iter().any(|s| s == "make_seq_or_task"));
        // The generator streams through the core library.
        assert!(symbols.iter().any(|s| s == "core"));
    });
}

#[test]
fn single_yield_generator_terminates() {
    let source = "function gen:\n\tyield 1\nend gen\n";
    with_program(source, |engine, functions, errors| {
        assert_eq!(errors, 0);
        let names = function_names(engine.pool(), &functions);
        let gen = functions[names.iter().position(|n| n == ".gen").unwrap()];
        let body = engine.pool().as_function(gen).unwrap().body;
        let symbols = reachable_symbols(engine.pool(), body);
        assert_eq!(symbols.iter().filter(|s| s.as_str() == "make_iterator").count(), 1);
        assert_eq!(symbols.iter().filter(|s| s.as_str() == "make_terminator").count(), 1);
    });
}

#[test]
fn sync_divides_into_subtask_segments() {
    let source = "function t:\n\tvar x = sync(io)\n\tresult = x\nend t\n";
    with_program(source, |engine, functions, errors| {
        assert_eq!(errors, 0);
        let names = function_names(engine.pool(), &functions);
        let t = functions[names.iter().position(|n| n == ".t").unwrap()];
        let body = engine.pool().as_function(t).unwrap().body;
        let symbols = reachable_symbols(engine.pool(), body);
        assert!(symbols.iter().any(|s| s == "make_subtask"), "{symbols:?}");
        assert!(symbols.iter().any(|s| s == "make_seq_or_task"));
    });
}

#[test]
fn mixing_sync_into_a_generator_is_reported() {
    let source = "function g:\n\tyield 1\n\tsync 2\nend g\n";
    with_program(source, |_engine, _functions, errors| {
        assert_eq!(errors, 1);
    });
}

#[test]
fn yield_inside_object_is_reported() {
    let source = "object box:\n\tyield 1\nend box\n";
    with_program(source, |_engine, _functions, errors| {
        assert!(errors >= 1);
    });
}

#[test]
fn unclosed_block_reports_but_does_not_taint() {
    let source = "var x = 0\nif x = 0:\n\tx = 1\n";
    with_program(source, |engine, _functions, errors| {
        // The balancer synthesized the end and reported the open block.
        assert!(errors >= 1);
        assert!(!engine.pool().is_tainted());
    });
}

#[test]
fn object_members_dispatch_through_self() {
    let source = "object point:\n\tvar x = 1\n\tmethod bump:\n\t\tself->x = self.x + 1\n\tend bump\nend point\n";
    with_program(source, |engine, functions, errors| {
        assert_eq!(errors, 0, "names: {:?}", function_names(engine.pool(), &functions));
        let names = function_names(engine.pool(), &functions);
        assert!(names.contains(&"~object".to_string()));
        assert!(names.contains(&"~object.~assign".to_string()));
        assert!(names.contains(&"~object.~value_wrapper".to_string()));
        assert!(names.iter().any(|n| n.starts_with("~object.~assign.")), "{names:?}");
        assert!(names.contains(&".point.bump".to_string()), "{names:?}");
    });
}

#[test]
fn direct_member_reference_is_reported() {
    let source = "object box:\n\tdef width = 3\n\tfunction wide:\n\t\tresult = width\n\tend wide\nend box\n";
    with_program(source, |_engine, _functions, errors| {
        assert_eq!(errors, 1);
    });
}

#[test]
fn module_unit_produces_named_entrypoint() {
    let source = "def size = 4\nfunction grow(n):\n\tresult = n + 1\nend grow\n";
    let unit = SourceUnit::Module { name: "shapes".into(), library: false };
    with_unit(source, unit, |engine, functions, errors| {
        assert_eq!(errors, 0);
        let names = function_names(engine.pool(), &functions);
        assert_eq!(names.last().map(String::as_str), Some("module_shapes"));
        // Module-level functions carry the implicit self parameter.
        let grow = functions[names.iter().position(|n| n == "shapes.grow").unwrap()];
        assert_eq!(engine.pool().as_function(grow).unwrap().arity, 2);
    });
}

#[test]
fn library_modules_reach_builtins() {
    let source = "function blank:\n\tresult = _builtin_map_blank\nend blank\n";
    let unit = SourceUnit::Module { name: "maps".into(), library: true };
    with_unit(source, unit, |engine, functions, errors| {
        assert_eq!(errors, 0);
        let names = function_names(engine.pool(), &functions);
        let blank = functions[names.iter().position(|n| n == "maps.blank").unwrap()];
        let body = engine.pool().as_function(blank).unwrap().body;
        assert!(references_intrinsic(engine.pool(), body, Intrinsic::MapBlank));
    });
}

#[test]
fn imports_are_announced_once_with_location() {
    struct Recorder(Vec<(String, String)>);
    impl crate::Importer for Recorder {
        fn import_module(&mut self, file_name: &str, source_dir: &str, _span: radian_span::Span) {
            self.0.push((file_name.into(), source_dir.into()));
        }
    }

    create_session_if_not_set_then(|s| {
        let source = "import shapes from geometry\nimport shapes from geometry\n";
        let (handler, _buf) = Handler::new_with_buf();
        let sf = s.source_map.new_source(source, FileName::Custom("test".into()));
        let ast = radian_parser::parse_ast(&handler, &sf.src, sf.start_pos);
        let mut engine = Engine::new(&handler, "test.radian", SourceUnit::Program, ast.statements);
        let mut recorder = Recorder(Vec::new());
        engine.run_to_end(&mut recorder);
        // The second import is a redefinition error, but the reference
        // itself interns once and announces once.
        let shapes: Vec<_> = recorder.0.iter().filter(|(name, _)| name == "shapes").collect();
        assert_eq!(shapes.len(), 1);
        assert_eq!(shapes[0].1, "geometry");
        assert_eq!(handler.err_count(), 1);
    });
}

#[test]
fn reparsed_expression_hash_conses_identically() {
    // Round-trip: printing an expression and reparsing it must produce
    // the same graph, which interning makes directly observable.
    create_session_if_not_set_then(|s| {
        let (handler, _buf) = Handler::new_with_buf();
        let sf = s.source_map.new_source(
            "var a = 1\nvar b = 2\nvar c = 3\nvar first = a + b * c\n",
            FileName::Custom("test".into()),
        );
        let ast = radian_parser::parse_ast(&handler, &sf.src, sf.start_pos);
        let radian_ast::Statement::Var(var) = &ast.statements[3] else { panic!() };
        let printed = var.expression.as_ref().unwrap().to_string();

        let reparse_source = format!("var a = 1\nvar b = 2\nvar c = 3\nvar second = {printed}\n");
        let sf2 = s.source_map.new_source(&reparse_source, FileName::Custom("test2".into()));
        let ast2 = radian_parser::parse_ast(&handler, &sf2.src, sf2.start_pos);
        let radian_ast::Statement::Var(var2) = &ast2.statements[3] else { panic!() };

        let mut analyzer = crate::Analyzer::new_program(&handler, "test.radian");
        for statement in &ast.statements[..3] {
            analyzer.exec_stmt(statement);
        }
        let first = analyzer.eval(var.expression.as_ref().unwrap());
        let second = analyzer.eval(var2.expression.as_ref().unwrap());
        assert_eq!(first, second);
        assert_eq!(handler.err_count(), 0);
    });
}

#[test]
fn assignment_destructures_tuples_and_lists() {
    let source = "function f(pair):\n\tvar a = 0\n\tvar b = 0\n\t(a, b) = pair\n\tvar c = a + b\n\t[a, b] = pair\n\tresult = c + a + b\nend f\n";
    with_program(source, |engine, functions, errors| {
        assert_eq!(errors, 0);
        let names = function_names(engine.pool(), &functions);
        let f = functions[names.iter().position(|n| n == ".f").unwrap()];
        let body = engine.pool().as_function(f).unwrap().body;
        let symbols = reachable_symbols(engine.pool(), body);
        // Tuple targets pull through the iterator protocol; list targets
        // pull through indexed lookup.
        assert!(symbols.iter().any(|s| s == "iterate"), "{symbols:?}");
        assert!(symbols.iter().any(|s| s == "current"));
        assert!(symbols.iter().any(|s| s == "lookup"));
    });
}

#[test]
fn assigning_to_a_definition_is_reported() {
    let source = "def k = 1\nk = 2\n";
    with_program(source, |_engine, _functions, errors| {
        assert_eq!(errors, 1);
    });
}

#[test]
fn closures_cannot_rebind_context_vars() {
    let source = "var x = 1\nfunction bump:\n\tx = x + 1\nend bump\n";
    with_program(source, |_engine, _functions, errors| {
        assert_eq!(errors, 1);
    });
}
