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

//! The semantic analyzer proper: a scope stack over the node pool, with
//! `eval_expr` turning expressions into graph nodes and `exec_stmt`
//! mutating the stack.

mod blocks;
mod closures;
mod expression;
mod statement;

use crate::{
    package_segmented_result, propagate_captured_value, segment_resolve, MemberDispatch, ModuleRoot, Scope,
    ScopeKind, Segment, SegmentType, SymbolKind, SymbolTable, UpdateError, VariableSymbol,
};

use radian_errors::{emitter::Handler, SemanticError};
use radian_flowgraph::{Intrinsic, NodeId, Pool};
use radian_span::{with_session_globals, Span};

/// The analyzer owns the pool and the scope stack for one compilation
/// unit. Statements are fed in one at a time; finished functions surface
/// through the pool's emission queue.
pub struct Analyzer<'a> {
    /// The node pool being built into.
    pub pool: Pool,
    /// The error channel.
    pub handler: &'a Handler,
    /// The scope stack; index 0 is the root.
    pub(crate) scopes: Vec<Scope>,
}

impl<'a> Analyzer<'a> {
    /// Creates the analyzer for a program file.
    ///
    /// The program is an async task: the main function is a task
    /// generator which the IO loop runs to completion, with the final
    /// response value becoming the exit code. The implicit `io` and
    /// `argv` parameters carry the world-state handle and the argument
    /// vector.
    pub fn new_program(handler: &'a Handler, file_path: &str) -> Self {
        let mut analyzer = Self { pool: Pool::new(file_path), handler, scopes: Vec::new() };
        analyzer.scopes.push(Scope::new(ScopeKind::Program));
        let io = analyzer.pool.sym_io();
        let io_value = analyzer.pool.parameter(0);
        analyzer.define(0, io, io_value, SymbolKind::Def, Span::dummy());
        let argv = analyzer.pool.sym_argv();
        let argv_value = analyzer.pool.parameter(1);
        analyzer.define(0, argv, argv_value, SymbolKind::Def, Span::dummy());
        let assert_sym = analyzer.pool.sym_assert();
        let truth = analyzer.pool.true_value();
        analyzer.define(0, assert_sym, truth, SymbolKind::Var, Span::dummy());
        analyzer
    }

    /// Creates the analyzer for a module file: a parameterless
    /// constructor returning an object whose contents are the module's
    /// top-level declarations, as though the whole file were one object
    /// block named after the file.
    pub fn new_module(handler: &'a Handler, file_path: &str, name: &str) -> Self {
        let mut analyzer = Self { pool: Pool::new(file_path), handler, scopes: Vec::new() };
        let members = MemberDispatch::new(&mut analyzer.pool);
        let self_sym = analyzer.pool.symbol(name);
        analyzer.scopes.push(Scope::new(ScopeKind::Module(ModuleRoot {
            name: name.to_string(),
            self_sym,
            members,
        })));
        analyzer
    }

    /// The lowest-level parts of the support library are implemented
    /// outside the language, reached through intrinsics. Only modules in
    /// the radian library directory may link against them; enabling the
    /// `_builtin_*` names here keeps them unreachable from ordinary code.
    pub fn enable_builtins(&mut self) {
        self.builtin_def("map_blank", Intrinsic::MapBlank);
        self.builtin_def("list_blank", Intrinsic::ListEmpty);
        self.builtin_function("char_from_int", Intrinsic::CharFromInt);
        self.builtin_function("ffi_load_external", Intrinsic::FfiLoadExternal);
        self.builtin_function("ffi_describe_function", Intrinsic::FfiDescribeFunction);
        self.builtin_function("ffi_call", Intrinsic::FfiCall);
        self.builtin_function("read_bytes", Intrinsic::ReadFile);
        self.builtin_function("write_bytes", Intrinsic::WriteFile);
        self.builtin_function("sin", Intrinsic::MathSin);
        self.builtin_function("cos", Intrinsic::MathCos);
        self.builtin_function("tan", Intrinsic::MathTan);
        self.builtin_function("asin", Intrinsic::MathAsin);
        self.builtin_function("acos", Intrinsic::MathAcos);
        self.builtin_function("atan", Intrinsic::MathAtan);
        self.builtin_function("atan2", Intrinsic::MathAtan2);
        self.builtin_function("sinh", Intrinsic::MathSinh);
        self.builtin_function("cosh", Intrinsic::MathCosh);
        self.builtin_function("tanh", Intrinsic::MathTanh);
        self.builtin_function("asinh", Intrinsic::MathAsinh);
        self.builtin_function("acosh", Intrinsic::MathAcosh);
        self.builtin_function("atanh", Intrinsic::MathAtanh);
        self.builtin_function("to_float", Intrinsic::ToFloat);
        self.builtin_function("floor_float", Intrinsic::FloorFloat);
        self.builtin_function("ceiling_float", Intrinsic::CeilingFloat);
        self.builtin_function("truncate_float", Intrinsic::TruncateFloat);
    }

    fn builtin_function(&mut self, name: &str, intrinsic: Intrinsic) {
        self.builtin(name, intrinsic, SymbolKind::Function);
    }

    fn builtin_def(&mut self, name: &str, intrinsic: Intrinsic) {
        self.builtin(name, intrinsic, SymbolKind::Def);
    }

    fn builtin(&mut self, name: &str, intrinsic: Intrinsic, kind: SymbolKind) {
        let sym = self.pool.symbol(&format!("_builtin_{name}"));
        let value = self.pool.intrinsic(intrinsic);
        // Bypass member collection: builtins are bindings, not members.
        self.scopes[0].definitions.insert(sym, kind);
        self.scopes[0].symbols.insert(sym, VariableSymbol { kind, value });
    }

    /// The index of the scope statements currently execute in.
    pub(crate) fn top(&self) -> usize {
        self.scopes.len() - 1
    }

    pub(crate) fn report(&self, err: SemanticError) {
        self.handler.emit_err(err);
    }

    /// Removes the top scope. Whatever happened during its lifetime, its
    /// segment chain must have been packaged by now; an ignored chain
    /// would produce a meaningless function result.
    pub(crate) fn pop_scope(&mut self) -> Scope {
        let scope = self.scopes.pop().expect("scope stack underflow");
        assert!(scope.segments.is_empty(), "scope discarded an unpackaged segment chain");
        scope
    }

    // ------------------------------------------------------------------
    // Symbol resolution.

    /// Finds out whether a symbol is defined, retrieving its value and
    /// kind. Looks in the active table, then in earlier segments of the
    /// scope, then captures from the context.
    pub(crate) fn resolve(&mut self, depth: usize, name: NodeId) -> Option<VariableSymbol> {
        if let Some(symbol) = self.scopes[depth].symbols.lookup(name) {
            return Some(symbol);
        }
        if let Some(symbol) = self.retrieve_from_previous_segment(depth, name) {
            return Some(symbol);
        }
        self.retrieve_from_context(depth, name)
    }

    /// The symbol is not in the active table, but if this scope ever
    /// defined it, a previous segment can provide the value; pull it
    /// forward through the chain and stash it for next time.
    fn retrieve_from_previous_segment(&mut self, depth: usize, name: NodeId) -> Option<VariableSymbol> {
        if !self.scopes[depth].definitions.contains_key(&name) {
            return None;
        }
        let last = self.scopes[depth].segments.len().checked_sub(1)?;
        let symbol = segment_resolve(&mut self.pool, &mut self.scopes[depth].segments, last, name);
        self.scopes[depth].symbols.insert(name, symbol);
        Some(symbol)
    }

    /// The symbol has never been defined in this scope; capture it from
    /// the context, recording the capture so later assignments know to
    /// rebind outward.
    fn retrieve_from_context(&mut self, depth: usize, name: NodeId) -> Option<VariableSymbol> {
        let symbol = self.capture_from_context(depth, name)?;
        self.scopes[depth].was_captured.insert(name);
        self.scopes[depth].definitions.insert(name, symbol.kind);
        let symbol = if self.scopes[depth].is_segmented() {
            // The captured value is only available at initial invocation;
            // push it back to the head of the chain and read it through
            // the intervening segments.
            propagate_captured_value(&mut self.scopes[depth].segments, name, symbol);
            let last = self.scopes[depth].segments.len() - 1;
            segment_resolve(&mut self.pool, &mut self.scopes[depth].segments, last, name)
        } else {
            symbol
        };
        self.scopes[depth].symbols.insert(name, symbol);
        Some(symbol)
    }

    /// Resolves in the containing scope and wraps the value in whatever
    /// local reference this scope's kind requires.
    fn capture_from_context(&mut self, depth: usize, name: NodeId) -> Option<VariableSymbol> {
        if depth == 0 {
            // There is nothing above the root scope.
            return None;
        }
        let symbol = self.resolve(depth - 1, name)?;
        let value = self.create_local_reference(depth, name, symbol.value);
        Some(VariableSymbol { kind: symbol.kind, value })
    }

    /// How a captured context value is seen from inside this scope.
    fn create_local_reference(&mut self, depth: usize, name: NodeId, value: NodeId) -> NodeId {
        // Branches share the capture list of the if block containing
        // them; the block-level resolve just created the parameter, so
        // pass it through unmodified.
        if matches!(self.scopes[depth].kind, ScopeKind::Branch(_)) {
            let ScopeKind::IfElseBlock(block) = &self.scopes[depth - 1].kind else {
                unreachable!("branch scopes sit directly on their if block");
            };
            return block.parameters[&name];
        }
        match &mut self.scopes[depth].kind {
            // Constants need no capture; anything else takes a slot on the
            // closure instance.
            ScopeKind::Closure(closure) => {
                if self.pool.is_context_independent(value) {
                    return value;
                }
                closure.capture_list = self.pool.args_append(closure.capture_list, value);
                let slot = self.pool.slot(closure.capture_count);
                closure.capture_count += 1;
                slot
            }
            // Every branch receives all of the context values as
            // parameters of its branch function, in one shared order.
            ScopeKind::IfElseBlock(block) => {
                let reference = self.pool.parameter(block.parameters.len() as u32);
                block.parameters.insert(name, reference);
                block.initial_args = self.pool.args_append(block.initial_args, value);
                block.forwarding_args = self.pool.args_append(block.forwarding_args, reference);
                reference
            }
            ScopeKind::Branch(_) => unreachable!("handled above"),
            // We can't know yet whether the symbol will stay invariant or
            // be assigned, so refer to it through a placeholder and remap
            // once the loop body is complete.
            ScopeKind::Loop(looper) => {
                let reference = self.pool.placeholder(looper.placeholder_index);
                looper.placeholder_index += 1;
                looper.invariants.insert(name, reference);
                looper.start_values.insert(name, value);
                reference
            }
            ScopeKind::Program | ScopeKind::Module(_) => {
                unreachable!("roots do not capture")
            }
        }
    }

    // ------------------------------------------------------------------
    // Definition and assignment.

    /// Creates a symbol in the given scope. Shadowing a context symbol is
    /// fine; redefining a name within one scope is not.
    pub(crate) fn define(&mut self, depth: usize, name: NodeId, value: NodeId, kind: SymbolKind, span: Span) {
        // Inside a member block, declarations (other than imports) become
        // members of the result object, and the plain name is poisoned so
        // later code has to reach the member through `self`.
        let kind = match &mut self.scopes[depth].kind {
            ScopeKind::Module(module) if MemberDispatch::is_memberizable(kind) => {
                module.members.define(&mut self.pool, name, value, kind);
                SymbolKind::Member
            }
            ScopeKind::Closure(closure) => match &mut closure.sort {
                crate::ClosureSort::Object { members, declarations_become_members: true, .. }
                    if MemberDispatch::is_memberizable(kind) =>
                {
                    members.define(&mut self.pool, name, value, kind);
                    SymbolKind::Member
                }
                _ => kind,
            },
            _ => kind,
        };

        if self.scopes[depth].definitions.contains_key(&name) {
            let name = self.pool.contents(name).to_string();
            self.report(SemanticError::already_defined(name, span));
            return;
        }
        self.scopes[depth].definitions.insert(name, kind);
        self.scopes[depth].symbols.insert(name, VariableSymbol { kind, value });
    }

    /// Assigns a value to an existing binding, or reports why it cannot.
    /// Assigning to a name captured from context additionally queues the
    /// rebinding for the scope to deliver outward on exit.
    pub(crate) fn assign(&mut self, depth: usize, name: NodeId, value: NodeId, span: Span) {
        // Member blocks contain only definitions; no statement may alter
        // an existing binding.
        match &self.scopes[depth].kind {
            ScopeKind::Module(_) => {
                self.report(SemanticError::module_member_redefinition(span));
                return;
            }
            ScopeKind::Closure(closure)
                if matches!(closure.sort, crate::ClosureSort::Object { .. }) =>
            {
                self.report(SemanticError::object_member_redefinition(span));
                return;
            }
            _ => {}
        }

        let mut outcome = self.scopes[depth].symbols.update(&self.pool, name, value);
        if outcome == Err(UpdateError::Undefined) {
            outcome = self.assign_to_undefined(depth, name, value);
        }
        match outcome {
            Ok(()) => {
                if self.scopes[depth].was_captured.contains(&name) {
                    self.rebind_in_context(depth, name, value, span);
                }
            }
            Err(error) => self.report_update_error(name, error, span),
        }
    }

    /// The symbol has no binding in the active table. It may live in an
    /// earlier segment, or in a containing scope; only an outright
    /// undefined name remains an error.
    fn assign_to_undefined(&mut self, depth: usize, name: NodeId, value: NodeId) -> Result<(), UpdateError> {
        if let Some(&kind) = self.scopes[depth].definitions.get(&name) {
            // Defined in an earlier segment but never pulled up to this
            // one. We're replacing the value outright, so there is no
            // need to pull the old one forward at all.
            let nil = self.pool.nil();
            self.scopes[depth].symbols.insert(name, VariableSymbol { kind, value: nil });
        } else {
            // Never seen in this scope; capture from the context if it
            // exists at all.
            self.retrieve_from_context(depth, name);
        }
        self.scopes[depth].symbols.update(&self.pool, name, value)
    }

    fn report_update_error(&mut self, name: NodeId, error: UpdateError, span: Span) {
        let spelled = self.pool.contents(name).to_string();
        self.report(match error {
            UpdateError::Undefined => SemanticError::undefined(spelled, span),
            UpdateError::Constant => SemanticError::constant_redefinition(spelled, span),
            UpdateError::SelfConstant => SemanticError::self_constant_redefinition(span),
            UpdateError::Function => SemanticError::function_redefinition(spelled, span),
            UpdateError::Import => SemanticError::import_redefinition(spelled, span),
            UpdateError::Member => SemanticError::member_redefinition(spelled, span),
        });
    }

    /// A context variable was assigned through this scope; each scope
    /// kind has its own way of delivering the new value outward.
    fn rebind_in_context(&mut self, depth: usize, name: NodeId, value: NodeId, span: Span) {
        match &mut self.scopes[depth].kind {
            // A function can be called from any number of sites, so it
            // cannot promise the context variable even exists when it
            // runs.
            ScopeKind::Closure(_) => {
                self.report(SemanticError::context_var_redefinition(span));
            }
            // A branch delegates to the if block containing it, which
            // adds the symbol to the phi tuple.
            ScopeKind::Branch(_) => {
                self.assign(depth - 1, name, value, span);
            }
            ScopeKind::IfElseBlock(block) => {
                block.context_rebinds.insert(name);
            }
            // The symbol is no longer invariant: move it onto the IO
            // tuple and the exit-rebinding list.
            ScopeKind::Loop(looper) => {
                if let Some(placeholder) = looper.invariants.shift_remove(&name) {
                    looper.updates.insert(name, placeholder);
                    looper.context_rebinds.insert(name);
                }
            }
            // The source file is the root of the namespace; there is
            // nothing outside it to rebind.
            ScopeKind::Program | ScopeKind::Module(_) => {
                let spelled = self.pool.contents(name).to_string();
                self.report(SemanticError::undefined(spelled, span));
            }
        }
    }

    // ------------------------------------------------------------------
    // Segments.

    /// Divides the scope at `depth` into a new asynchronous segment
    /// carrying the given value. The active symbol table snapshots into
    /// the segment and clears: subsequent statements operate in a fresh
    /// evaluation context, retrieving existing symbols through the chain.
    pub(crate) fn push_segment(&mut self, depth: usize, value: NodeId, ty: SegmentType, span: Span) {
        if self.scopes[depth].needs_implicit_self() {
            self.report(SemanticError::yield_inside_member_dispatch(span));
            return;
        }
        if let Some(last) = self.scopes[depth].segments.last() {
            if ty == SegmentType::Sync && !last.synchronizes() {
                self.report(SemanticError::sync_inside_generator(span));
            }
            if last.synchronizes() && ty != SegmentType::Sync {
                self.report(SemanticError::yield_inside_async_task(span));
            }
        }
        let symbols = std::mem::take(&mut self.scopes[depth].symbols);
        self.scopes[depth].segments.push(Segment::new(symbols, value, ty));
    }

    /// Packages the scope's segment chain around its result, leaving the
    /// chain consumed so the scope can exit cleanly.
    pub(crate) fn package_scope_result(&mut self, depth: usize, result: NodeId) -> NodeId {
        let segments = std::mem::take(&mut self.scopes[depth].segments);
        package_segmented_result(&mut self.pool, segments, result)
    }

    // ------------------------------------------------------------------
    // Names.

    /// The globally unique name of the scope, qualified by its containing
    /// scopes. Nameless blocks use their source span as the unique part.
    pub(crate) fn fully_qualified_name(&self, depth: usize) -> String {
        match &self.scopes[depth].kind {
            ScopeKind::Program => String::new(),
            ScopeKind::Module(module) => module.name.clone(),
            ScopeKind::Closure(closure) => {
                let parent = self.fully_qualified_name(depth - 1);
                let name = match &closure.sort {
                    crate::ClosureSort::Function { name, .. }
                    | crate::ClosureSort::Method { name, .. }
                    | crate::ClosureSort::Object { name, .. } => name.clone(),
                    crate::ClosureSort::Lambda => format!("lambda-{}", span_text(closure.begin_span)),
                };
                format!("{parent}.{name}")
            }
            ScopeKind::IfElseBlock(block) => {
                format!("{}.if-{}", self.fully_qualified_name(depth - 1), span_text(block.begin_span))
            }
            // An ascending index identifies each branch of its if block.
            ScopeKind::Branch(branch) => {
                format!("{}-{}", self.fully_qualified_name(depth - 1), branch.index)
            }
            ScopeKind::Loop(looper) => {
                let keyword = if looper.for_loop.is_some() { "for" } else { "while" };
                format!("{}.{}-{}", self.fully_qualified_name(depth - 1), keyword, span_text(looper.begin_span))
            }
        }
    }
}

/// A compact, deterministic rendering of a span for generated names.
pub(crate) fn span_text(span: Span) -> String {
    with_session_globals(|s| match s.source_map.span_to_location(span) {
        Some(loc) => format!("{}.{}-{}.{}", loc.line_start, loc.col_start, loc.line_stop, loc.col_stop),
        None => format!("{}-{}", span.lo.0, span.hi.0),
    })
}
