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

//! Lowering of statements into scope operations.

use super::Analyzer;
use crate::{ClosureSort, ScopeKind, SegmentType, SymbolKind};

use radian_ast::{
    AssertStatement, DebugTraceStatement, Expression, Identifier, ImportDeclaration, MutationStatement, Node,
    Statement, SyncStatement, YieldStatement,
};
use radian_errors::{RuntimeError, SemanticError};
use radian_flowgraph::{Intrinsic, NodeId};

impl Analyzer<'_> {
    /// Processes one statement in the current scope. Statements may open
    /// and close scopes, so the stack may look different afterward.
    pub fn exec_stmt(&mut self, statement: &Statement) {
        match statement {
            Statement::Assert(assertion) => self.gen_assertion(assertion),
            Statement::Assign(assign) => {
                let value = self.eval(&assign.value);
                self.assign_to_target(&assign.place, value);
            }
            // Blank lines mean nothing.
            Statement::BlankLine(_) => {}
            // The current block is finished. The balancer has already
            // rationalized the input, so the scope is really there.
            Statement::BlockEnd(end) => self.exit_scope(end.span),
            Statement::DebugTrace(trace) => self.gen_debug_trace(trace),
            Statement::Definition(definition) => {
                let sym = self.pool.symbol(&definition.name.name.to_string());
                // A missing value has already drawn a syntax error.
                let value = match &definition.expression {
                    Some(expression) => self.eval(expression),
                    None => self.pool.undefined(),
                };
                let top = self.top();
                self.define(top, sym, value, SymbolKind::Def, definition.span);
            }
            Statement::Else(alternative) => self.partition_else(alternative),
            Statement::ForLoop(for_loop) => self.enter_for_loop(for_loop),
            Statement::Function(function) => self.enter_function(function),
            Statement::IfThen(if_then) => self.enter_if_then(if_then),
            Statement::Import(import) => self.gen_import(import),
            Statement::Method(method) => self.enter_method(method),
            Statement::Mutation(mutation) => self.gen_mutation(mutation),
            Statement::Object(object) => self.enter_object(object),
            Statement::Sync(sync) => self.gen_sync(sync),
            Statement::Var(var) => {
                let sym = self.pool.symbol(&var.name.name.to_string());
                let value = match &var.expression {
                    Some(expression) => self.eval(expression),
                    None => self.pool.undefined(),
                };
                let top = self.top();
                self.define(top, sym, value, SymbolKind::Var, var.span);
            }
            Statement::While(while_loop) => self.enter_while_loop(while_loop),
            Statement::Yield(yielded) => self.gen_yield(yielded),
        }
    }

    /// Closes whatever scope the matched `end` statement refers to.
    pub(crate) fn exit_scope(&mut self, span: radian_span::Span) {
        let top = self.top();
        match &self.scopes[top].kind {
            ScopeKind::Closure(closure) => match &closure.sort {
                ClosureSort::Function { .. } => self.exit_function_scope(span),
                ClosureSort::Method { .. } => self.exit_method_scope(span),
                ClosureSort::Object { .. } => self.exit_object_scope(span),
                ClosureSort::Lambda => unreachable!("lambdas close with their expression"),
            },
            ScopeKind::Branch(_) => self.exit_if_block(span),
            ScopeKind::Loop(_) => self.exit_loop_block(span),
            // The balancer never emits an end without an open block, and
            // branches always sit above their if block.
            ScopeKind::IfElseBlock(_) | ScopeKind::Program | ScopeKind::Module(_) => {
                debug_assert!(false, "end statement reached a scope that cannot close");
            }
        }
    }

    /// An assertion gates the result of the current function: the value
    /// holds if and only if the condition is true. Assertions chain so the
    /// first failure dominates the following ones.
    fn gen_assertion(&mut self, assertion: &AssertStatement) {
        let chain = self.assert_chain(assertion.span);
        let condition = self.eval(&assertion.condition);
        let message =
            format!("{} ({})", RuntimeError::false_assertion(assertion.span), assertion.condition);
        let errtext = self.pool.string(&message);
        let checked = self.pool.assert(condition, errtext);
        let chain = self.pool.chain(chain, checked);
        let top = self.top();
        let assert_sym = self.pool.sym_assert();
        self.assign(top, assert_sym, chain, assertion.span);
    }

    /// Printing is a side effect, which a pure function cannot have; the
    /// trace intrinsic lies about that. It takes the current assert chain
    /// as an input and produces the next one as output, which wedges the
    /// print into the function's evaluation order exactly once.
    fn gen_debug_trace(&mut self, trace: &DebugTraceStatement) {
        let chain = self.assert_chain(trace.span);
        let location = self.pool.string(&trace.span.to_string());
        let value = self.eval(&trace.expression);
        let trace_func = self.pool.intrinsic(Intrinsic::DebugTrace);
        let chain = self.pool.call3(trace_func, location, value, chain);
        let top = self.top();
        let assert_sym = self.pool.sym_assert();
        self.assign(top, assert_sym, chain, trace.span);
    }

    /// The mechanism of assignment depends on the shape of the target;
    /// destructuring recurses.
    pub(crate) fn assign_to_target(&mut self, target: &Expression, value: NodeId) {
        match target {
            Expression::Identifier(ident) => self.assign_to_identifier(ident, value),
            Expression::Member(_) => self.assign_to_member(target, value),
            Expression::Binary(_) if target.is_tuple_op() => self.assign_to_tuple(target, value),
            Expression::List(list) => self.assign_to_list(&list.items, value),
            Expression::Paren(paren) => self.assign_to_target(&paren.inner, value),
            other => {
                self.report(SemanticError::assign_lhs_must_be_identifier(other.span()));
            }
        }
    }

    fn assign_to_identifier(&mut self, target: &Identifier, value: NodeId) {
        let sym = self.pool.symbol(&target.name.to_string());
        let top = self.top();
        self.assign(top, sym, value, target.span);
    }

    /// Assignment through a member chain `a->b->c = value`: each level is
    /// rewritten as a setter call whose result replaces the level below,
    /// until a single variable is left to reassign conventionally.
    fn assign_to_member(&mut self, target: &Expression, value: NodeId) {
        // Unpack the left-leaning chain of identifiers.
        let mut names: Vec<&Identifier> = Vec::new();
        let mut crawl = target;
        while let Expression::Member(member) = crawl {
            names.insert(0, &member.name);
            crawl = &member.base;
        }
        let Some(first) = crawl.as_identifier() else {
            self.report(SemanticError::assign_lhs_must_be_identifier(crawl.span()));
            return;
        };
        names.insert(0, first);

        // Work back down the chain, computing the intermediate values.
        let mut value = value;
        while names.len() > 1 {
            let target_name = names.pop().unwrap();
            let setter_sym = self.pool.setter_symbol(&target_name.name.to_string());
            // Resolve the base object by walking the getters, skipping the
            // first name, which takes a conventional assignment at the end.
            let mut base = self.eval_identifier(names[0]);
            for member in &names[1..] {
                let member_sym = self.pool.symbol(&member.name.to_string());
                let getter = self.pool.call1(base, member_sym);
                base = self.pool.call1(getter, base);
            }
            let setter = self.pool.call1(base, setter_sym);
            value = self.pool.call2(setter, base, value);
        }

        self.assign_to_identifier(names[0], value);
    }

    /// A syntactic tuple target treats the value as a sequence, assigning
    /// one element to each item in turn.
    fn assign_to_tuple(&mut self, target: &Expression, value: NodeId) {
        let iterate_sym = self.pool.sym_iterate();
        let iterate_func = self.pool.call1(value, iterate_sym);
        let mut iterator = self.pool.call1(iterate_func, value);
        for item in target.unpack_tuple() {
            let current_sym = self.pool.sym_current();
            let element_func = self.pool.call1(iterator, current_sym);
            let element = self.pool.call1(element_func, iterator);
            self.assign_to_target(item, element);
            // Advance, in case we go around again.
            let next_sym = self.pool.sym_next();
            let next_func = self.pool.call1(iterator, next_sym);
            iterator = self.pool.call1(next_func, iterator);
        }
    }

    /// A bracketed target assigns by index: the leftmost item gets
    /// `value[0]`, the next `value[1]`, and so on.
    fn assign_to_list(&mut self, items: &Expression, value: NodeId) {
        let lookup_sym = self.pool.sym_lookup();
        let lookup_func = self.pool.call1(value, lookup_sym);
        for (index, item) in items.unpack_tuple().iter().enumerate() {
            let key = self.pool.number(index as u32);
            let element = self.pool.call2(lookup_func, value, key);
            self.assign_to_target(item, element);
        }
    }

    /// Mutation is sugar for the member-function pattern plus an
    /// assignment: the mutator's return value replaces the base object.
    fn gen_mutation(&mut self, mutation: &MutationStatement) {
        let Expression::Member(member) = &mutation.target else {
            self.report(SemanticError::mutator_needs_member_identifier(mutation.target.span()));
            return;
        };

        let object = self.eval(&member.base);
        let method_sym = self.pool.symbol(&member.name.name.to_string());
        let method = self.pool.call1(object, method_sym);

        // The base object is always the first argument.
        let mut args = self.pool.args1(object);
        if let Some(arguments) = &mutation.arguments {
            args = self.eval_arguments(arguments, args);
        }

        let result = self.pool.call_n(method, args);
        self.assign_to_target(&member.base, result);
    }

    /// An import binds a module name in the current scope; the driver is
    /// told so the host can queue the referenced unit for compilation.
    fn gen_import(&mut self, import: &ImportDeclaration) {
        let source_dir = match &import.source_dir {
            Some(source) => match source.as_identifier() {
                Some(ident) => self.pool.symbol(&ident.name.to_string()),
                None => {
                    self.report(SemanticError::import_source_must_be_identifier(source.span()));
                    return;
                }
            },
            None => self.pool.nil(),
        };
        let name = import.name.name.to_string();
        let name_str = self.pool.string(&name);
        let name_sym = self.pool.symbol(&name);
        let value = self.pool.import_ref(name_str, source_dir, import.span);
        let top = self.top();
        self.define(top, name_sym, value, SymbolKind::Import, import.span);
    }

    /// `sync value`: emit a value from an asynchronous task generator.
    /// Assertions must resolve before the division, or an invalid value
    /// could escape.
    fn gen_sync(&mut self, sync: &SyncStatement) {
        let value = self.eval(&sync.expression);
        let chain = self.assert_chain(sync.span);
        let value = self.pool.chain(chain, value);
        let top = self.top();
        self.push_segment(top, value, SegmentType::Sync, sync.span);
    }

    /// `yield [from] value`: emit a value, or a whole subsequence, from a
    /// sequence generator.
    fn gen_yield(&mut self, yielded: &YieldStatement) {
        let value = self.eval(&yielded.expression);
        let ty = if yielded.from_subsequence { SegmentType::YieldFrom } else { SegmentType::Yield };
        let top = self.top();
        self.push_segment(top, value, ty, yielded.span);
    }
}
