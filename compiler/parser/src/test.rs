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

use crate::{balance_blocks, parse_ast, parse_statements};

use radian_ast::*;
use radian_errors::emitter::Handler;
use radian_span::{source_map::FileName, symbol::create_session_if_not_set_then, Span};

/// Parses `source` with a buffered handler, returning the balanced
/// statements and the number of errors reported.
fn parse(source: &str) -> (Vec<Statement>, usize) {
    let (handler, _buf) = Handler::new_with_buf();
    let sf = radian_span::with_session_globals(|s| s.source_map.new_source(source, FileName::Custom("test".into())));
    let ast = parse_ast(&handler, &sf.src, sf.start_pos);
    (ast.statements, handler.err_count())
}

#[test]
fn parses_definition_with_precedence() {
    create_session_if_not_set_then(|_| {
        let (statements, errors) = parse("def x = 1 + 2 * 3");
        assert_eq!(errors, 0);
        let [Statement::Definition(def)] = &statements[..] else {
            panic!("expected a single definition");
        };
        assert_eq!(def.name.name.to_string(), "x");
        // `+` at the root, `*` nested on the right.
        let Some(Expression::Binary(add)) = &def.expression else { panic!("expected binary value") };
        assert_eq!(add.op, BinaryOperation::Add);
        let Expression::Binary(mul) = &*add.right else { panic!("expected nested multiply") };
        assert_eq!(mul.op, BinaryOperation::Multiply);
    });
}

#[test]
fn exponent_is_right_associative() {
    create_session_if_not_set_then(|_| {
        let (statements, errors) = parse("def x = a ** b ** c");
        assert_eq!(errors, 0);
        let [Statement::Definition(def)] = &statements[..] else { panic!() };
        let Some(Expression::Binary(outer)) = &def.expression else { panic!() };
        assert_eq!(outer.op, BinaryOperation::Exponent);
        assert!(outer.left.as_identifier().is_some());
        let Expression::Binary(inner) = &*outer.right else { panic!("expected right-nested exponent") };
        assert_eq!(inner.op, BinaryOperation::Exponent);
    });
}

#[test]
fn if_operator_pairs_with_else() {
    create_session_if_not_set_then(|_| {
        let (statements, errors) = parse("def x = a if c else b");
        assert_eq!(errors, 0);
        let [Statement::Definition(def)] = &statements[..] else { panic!() };
        let Some(Expression::Binary(op_if)) = &def.expression else { panic!() };
        assert_eq!(op_if.op, BinaryOperation::If);
        let Expression::Binary(op_else) = &*op_if.right else { panic!("expected else on the right") };
        assert_eq!(op_else.op, BinaryOperation::Else);
    });
}

#[test]
fn member_chain_and_lookup() {
    create_session_if_not_set_then(|_| {
        let (statements, errors) = parse("x = point.moved(1, 2).coords[0]");
        assert_eq!(errors, 0);
        let [Statement::Assign(assign)] = &statements[..] else { panic!() };
        let Expression::Lookup(lookup) = &assign.value else { panic!("expected lookup at top") };
        let Expression::Member(coords) = &*lookup.base else { panic!("expected member below lookup") };
        assert_eq!(coords.name.name.to_string(), "coords");
        assert!(coords.arguments.is_none());
        let Expression::Member(moved) = &*coords.base else { panic!("expected call member") };
        assert_eq!(moved.arguments.as_ref().map(Vec::len), Some(2));
    });
}

#[test]
fn mutation_statement_keeps_arguments() {
    create_session_if_not_set_then(|_| {
        let (statements, errors) = parse("items->push(3)");
        assert_eq!(errors, 0);
        let [Statement::Mutation(mutation)] = &statements[..] else { panic!() };
        assert!(matches!(mutation.target, Expression::Member(_)));
        assert_eq!(mutation.arguments.as_ref().map(Vec::len), Some(1));
    });
}

#[test]
fn mutator_inside_expression_is_reported_but_parsed() {
    create_session_if_not_set_then(|_| {
        let (statements, errors) = parse("x = box->get");
        assert_eq!(errors, 1);
        let [Statement::Assign(assign)] = &statements[..] else { panic!() };
        assert!(matches!(assign.value, Expression::Member(_)));
    });
}

#[test]
fn destructuring_targets() {
    create_session_if_not_set_then(|_| {
        let (statements, errors) = parse("(a, b) = pair");
        assert_eq!(errors, 0);
        let [Statement::Assign(assign)] = &statements[..] else { panic!() };
        assert!(assign.place.is_tuple_op());
        assert_eq!(assign.place.unpack_tuple().len(), 2);
    });
}

#[test]
fn balancer_matches_blocks() {
    create_session_if_not_set_then(|_| {
        let source = "if a:\n\tx = 1\nend if\n";
        let (statements, errors) = parse(source);
        assert_eq!(errors, 0);
        assert!(matches!(statements[0], Statement::IfThen(_)));
        assert!(matches!(statements[2], Statement::BlockEnd(_)));
    });
}

#[test]
fn unmatched_end_becomes_blank_line() {
    create_session_if_not_set_then(|_| {
        let (statements, errors) = parse("end if\nvar x = 1\n");
        assert_eq!(errors, 1);
        assert!(matches!(statements[0], Statement::BlankLine(_)));
        // The next statement parses normally.
        assert!(matches!(statements[1], Statement::Var(_)));
    });
}

#[test]
fn missing_end_is_synthesized_at_eof() {
    create_session_if_not_set_then(|_| {
        let (statements, errors) = parse("if a:\n\tx = 1\n");
        assert_eq!(errors, 1);
        assert!(matches!(statements.last(), Some(Statement::BlockEnd(_))));
    });
}

#[test]
fn end_for_inner_block_skips_to_outer() {
    create_session_if_not_set_then(|_| {
        // The while block's end is missing; `end if` names the outer block,
        // so a synthetic end is inserted for the while.
        let source = "if a:\n\twhile b:\n\t\tx = 1\nend if\n";
        let (handler, _buf) = Handler::new_with_buf();
        let sf = radian_span::with_session_globals(|s| {
            s.source_map.new_source(source, FileName::Custom("test".into()))
        });
        let statements = parse_statements(&handler, &sf.src, sf.start_pos);
        let balanced = balance_blocks(&handler, statements, Span::dummy());
        assert!(handler.had_errors());
        let ends = balanced.iter().filter(|s| s.is_block_end()).count();
        let begins = balanced.iter().filter(|s| s.is_block_begin()).count();
        assert_eq!(ends, begins);
    });
}

#[test]
fn indentation_is_checked() {
    create_session_if_not_set_then(|_| {
        let (_, errors) = parse("if a:\nx = 1\nend if\n");
        // The body statement is not indented.
        assert_eq!(errors, 1);
    });
}

#[test]
fn comprehension_clauses() {
    create_session_if_not_set_then(|_| {
        let (statements, errors) = parse("def v = each n * n from n in ns where n > 0");
        assert_eq!(errors, 0);
        let [Statement::Definition(def)] = &statements[..] else { panic!() };
        let Some(Expression::Comprehension(each)) = &def.expression else { panic!() };
        assert!(each.output.is_some());
        assert!(each.predicate.is_some());
        assert!(each.variable.as_identifier().is_some());
    });
}

#[test]
fn continuation_lines_after_binop() {
    create_session_if_not_set_then(|_| {
        let (statements, errors) = parse("def x = 1 +\n\t\t2");
        assert_eq!(errors, 0);
        let [Statement::Definition(def)] = &statements[..] else { panic!() };
        assert!(matches!(def.expression, Some(Expression::Binary(_))));
    });
}

#[test]
fn broken_expression_recovers_on_next_line() {
    create_session_if_not_set_then(|_| {
        let (statements, errors) = parse("def x = +\nvar y = 2\n");
        assert!(errors >= 1);
        assert_eq!(statements.len(), 2);
        assert!(matches!(statements[1], Statement::Var(_)));
    });
}
