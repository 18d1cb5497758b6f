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

//! Block scopes: the if/else chain, the loops, and the for-loop
//! specializer.
//!
//! A block does not define an independently invokable function; its
//! function is dedicated to a single call site. Statements inside may
//! assign to context variables, because those values form the implicit
//! return tuple of the block's function: an if/else chain folds its
//! branches into one action whose result tuple carries a new value for
//! every variable any branch reassigned, which is phi synthesis in SSA
//! terms, and a loop threads the same tuple through its iterations.

use super::{span_text, Analyzer};
use crate::{
    package_segmented_result, rewrite_captured_values, segment_resolve, BranchScope, FinishedBranch, ForLoopState,
    IfElseBlock, LoopScope, Scope, ScopeKind, SegmentType, SymbolKind,
};

use radian_ast::{ElseStatement, ForLoopStatement, IfThenStatement, Node, WhileStatement};
use radian_errors::SemanticError;
use radian_flowgraph::{Intrinsic, NodeId, OperationKind};
use radian_span::Span;

use indexmap::{IndexMap, IndexSet};
use std::collections::VecDeque;

impl Analyzer<'_> {
    // ------------------------------------------------------------------
    // If / else.

    /// `if condition:` opens the chain's containing block plus its first
    /// branch. The condition evaluates inside the branch scope, because
    /// that is where it will actually run: the context invokes the folded
    /// action function, and only the branch being considered performs its
    /// test. That is what makes the evaluation lazy.
    pub(crate) fn enter_if_then(&mut self, statement: &IfThenStatement) {
        let nil = self.pool.nil();
        self.scopes.push(Scope::new(ScopeKind::IfElseBlock(IfElseBlock::new(nil, statement.span))));
        self.scopes.push(Scope::new(ScopeKind::Branch(BranchScope { condition: nil, index: 0 })));
        let condition = self.eval(&statement.condition);
        let top = self.top();
        let ScopeKind::Branch(branch) = &mut self.scopes[top].kind else { unreachable!() };
        branch.condition = condition;
    }

    /// `else:` or `else if c:` splits off a new branch from the current
    /// one. Only one unconditional else is allowed, and it must come last.
    pub(crate) fn partition_else(&mut self, statement: &ElseStatement) {
        let top = self.top();
        if !matches!(self.scopes[top].kind, ScopeKind::Branch(_)) {
            self.report(SemanticError::else_statement_outside_if_block(statement.span));
            return;
        }
        let previous_index = {
            let ScopeKind::Branch(branch) = &self.scopes[top].kind else { unreachable!() };
            if self.pool.is_void(branch.condition) {
                self.report(SemanticError::else_statement_after_final(statement.span));
            }
            branch.index
        };
        self.finish_branch();

        let nil = self.pool.nil();
        self.scopes.push(Scope::new(ScopeKind::Branch(BranchScope {
            condition: nil,
            index: previous_index + 1,
        })));
        let condition = match &statement.condition {
            Some(condition) => self.eval(condition),
            None => nil,
        };
        let top = self.top();
        let ScopeKind::Branch(branch) = &mut self.scopes[top].kind else { unreachable!() };
        branch.condition = condition;
    }

    /// Retires the branch on top of the stack into its if block's chain,
    /// carrying its symbols and segments along for phi resolution.
    fn finish_branch(&mut self) {
        let top = self.top();
        let segments = std::mem::take(&mut self.scopes[top].segments);
        let scope = self.scopes.pop().expect("a branch is on top");
        let ScopeKind::Branch(branch) = scope.kind else { unreachable!() };

        let top = self.top();
        let ScopeKind::IfElseBlock(block) = &mut self.scopes[top].kind else {
            unreachable!("branches sit on their if block")
        };
        block.segmented |= !segments.is_empty();
        block.synchronizes |= segments.last().is_some_and(|segment| segment.synchronizes());
        block.branches.push(FinishedBranch {
            condition: branch.condition,
            symbols: scope.symbols,
            definitions: scope.definitions,
            segments,
        });
    }

    /// `end if`: finish the open branch, make sure the chain ends with an
    /// unconditional else — synthesizing the default one, which returns
    /// the original values unchanged, if the program did not supply it —
    /// then fold the chain and distribute the result tuple.
    pub(crate) fn exit_if_block(&mut self, span: Span) {
        self.finish_branch();

        let top = self.top();
        let nil = self.pool.nil();
        {
            let ScopeKind::IfElseBlock(block) = &mut self.scopes[top].kind else { unreachable!() };
            let needs_default = block
                .branches
                .last()
                .map_or(true, |branch| !self.pool.is_void(branch.condition));
            if needs_default {
                block.branches.push(FinishedBranch {
                    condition: nil,
                    symbols: Default::default(),
                    definitions: IndexMap::new(),
                    segments: Vec::new(),
                });
            }
        }

        let values = self.ifelse_exit_block(top);
        let scope = self.pop_scope();
        let ScopeKind::IfElseBlock(block) = scope.kind else { unreachable!() };
        self.make_context_assignments(values, &block.context_rebinds, span);
    }

    /// Collapses the branch chain into a single action function, invokes
    /// it with the captured initial values, and returns the result tuple
    /// expression. If any branch divided into segments, the whole block is
    /// contagiously segmented: the invocation itself becomes a segment of
    /// the containing scope, and the value arrives as parameter zero.
    fn ifelse_exit_block(&mut self, block_depth: usize) -> NodeId {
        let (branches, parameters, initial_args, forwarding_args, rebinds, segmented, synchronizes, begin_span) = {
            let ScopeKind::IfElseBlock(block) = &mut self.scopes[block_depth].kind else { unreachable!() };
            (
                std::mem::take(&mut block.branches),
                block.parameters.clone(),
                block.initial_args,
                block.forwarding_args,
                block.context_rebinds.iter().copied().collect::<Vec<_>>(),
                block.segmented,
                block.synchronizes,
                block.begin_span,
            )
        };

        let mut action = self.pool.nil();
        for mut branch in branches.into_iter().rev() {
            action = self.branch_result(
                &mut branch,
                &rebinds,
                &parameters,
                forwarding_args,
                segmented,
                action,
            );
        }
        let result = self.pool.call_n(action, initial_args);
        if segmented {
            let ty = if synchronizes { SegmentType::Sync } else { SegmentType::YieldFrom };
            self.push_segment(block_depth - 1, result, ty, begin_span);
            self.pool.parameter(0)
        } else {
            result
        }
    }

    /// One branch's contribution to the folded action: a function taking
    /// the captured values and producing the canonical result tuple, with
    /// each conditional branch testing its condition and falling through
    /// to the else action behind it.
    fn branch_result(
        &mut self,
        branch: &mut FinishedBranch,
        rebinds: &[NodeId],
        parameters: &IndexMap<NodeId, NodeId>,
        forwarding_args: NodeId,
        segmented: bool,
        else_branch: NodeId,
    ) -> NodeId {
        let mut tuple = self.pool.nil();
        for &sym in rebinds {
            let value = self.finished_branch_resolve(branch, parameters, sym);
            tuple = self.pool.tuple_append(tuple, value);
        }
        if segmented {
            // In asynchronous mode the branch returns the head of its
            // iterator chain rather than the bare tuple.
            let segments = std::mem::take(&mut branch.segments);
            tuple = package_segmented_result(&mut self.pool, segments, tuple);
        }
        let arity = parameters.len() as u32;
        let action = self.pool.function(tuple, arity);

        // The unconditional branch stands as it is.
        if self.pool.is_void(branch.condition) {
            return action;
        }

        // Test our condition to pick between this action and the else
        // action, forward the parameters to whichever side won, and wrap
        // the whole thing back up in the same function shape.
        let action = self.pool.branch(branch.condition, action, else_branch);
        let action = self.pool.call_n(action, forwarding_args);
        self.pool.function(action, arity)
    }

    /// Resolves a rebound symbol's final value within a finished branch:
    /// from its active symbols, through its segment chain, or — for a
    /// branch that never touched the symbol — passing the shared
    /// parameter straight through.
    fn finished_branch_resolve(
        &mut self,
        branch: &mut FinishedBranch,
        parameters: &IndexMap<NodeId, NodeId>,
        name: NodeId,
    ) -> NodeId {
        if let Some(symbol) = branch.symbols.lookup(name) {
            return symbol.value;
        }
        if branch.definitions.contains_key(&name) && !branch.segments.is_empty() {
            let last = branch.segments.len() - 1;
            let symbol = segment_resolve(&mut self.pool, &mut branch.segments, last, name);
            branch.symbols.insert(name, symbol);
            return symbol.value;
        }
        parameters[&name]
    }

    /// Distributes a block's result tuple into reassignments of the
    /// affected context variables, in the canonical rebind order.
    fn make_context_assignments(&mut self, values: NodeId, rebinds: &IndexSet<NodeId>, span: Span) {
        let top = self.top();
        for (index, &sym) in rebinds.iter().enumerate() {
            let key = self.pool.number(index as u32);
            let new_value = self.pool.call1(values, key);
            // Everything on the rebind list got there through a legal
            // assignment, so these cannot fail.
            self.assign(top, sym, new_value, span);
        }
    }

    // ------------------------------------------------------------------
    // Loops.

    /// `while condition:`. The condition evaluates inside the loop scope,
    /// since it re-evaluates on every iteration with the current IO
    /// tuple.
    pub(crate) fn enter_while_loop(&mut self, statement: &WhileStatement) {
        let nil = self.pool.nil();
        self.scopes.push(Scope::new(ScopeKind::Loop(LoopScope::new(nil, statement.span))));
        let condition = self.eval(&statement.condition);
        let top = self.top();
        let ScopeKind::Loop(looper) = &mut self.scopes[top].kind else { unreachable!() };
        looper.condition = condition;
    }

    /// `for variable in sequence:`.
    ///
    /// The sequence is evaluated and iterated in the context, with the
    /// iterator held by a uniquely named context variable so it can pass
    /// from one iteration to the next. Inside the loop, the induction
    /// variable is the iterator's current value, wrapped in the inductor
    /// marker so dataflow from it can be tracked; the condition asks the
    /// iterator whether it is still valid, and the body advances it.
    pub(crate) fn enter_for_loop(&mut self, statement: &ForLoopStatement) {
        // Context half: evaluate the sequence and begin iterating.
        let iterator_name = {
            let text = format!("each-{}", span_text(statement.span));
            // Not an identifier shape, so programs cannot collide with it.
            self.pool.symbol(&text)
        };
        let sequence = self.eval(&statement.sequence);
        let iterate_sym = self.pool.sym_iterate();
        let iterate_func = self.pool.call1(sequence, iterate_sym);
        let context_iterator = self.pool.call1(iterate_func, sequence);
        let top = self.top();
        self.define(top, iterator_name, context_iterator, SymbolKind::Var, statement.sequence.span());

        // Loop half.
        let nil = self.pool.nil();
        self.scopes.push(Scope::new(ScopeKind::Loop(LoopScope::new(nil, statement.span))));
        let top = self.top();
        let local_iterator = self
            .resolve(top, iterator_name)
            .expect("the iterator was just defined")
            .value;

        // The induction variable: the iterator's current value, marked.
        let current_sym = self.pool.sym_current();
        let current_func = self.pool.call1(local_iterator, current_sym);
        let current = self.pool.call1(current_func, local_iterator);
        let prime_inductor = self.pool.inductor(current);
        let variable_sym = self.pool.symbol(&statement.variable.name.to_string());
        self.define(top, variable_sym, prime_inductor, SymbolKind::Var, statement.variable.span);

        // Run the next iteration while the iterator remains valid.
        let valid_sym = self.pool.sym_is_valid();
        let valid_func = self.pool.call1(local_iterator, valid_sym);
        let condition = self.pool.call1(valid_func, local_iterator);

        // Advance the iterator as part of the output tuple, so the next
        // condition check and the next body both see the next iterator.
        let next_sym = self.pool.sym_next();
        let next_func = self.pool.call1(local_iterator, next_sym);
        let next_iterator = self.pool.call1(next_func, local_iterator);
        self.assign(top, iterator_name, next_iterator, statement.span);

        let ScopeKind::Loop(looper) = &mut self.scopes[top].kind else { unreachable!() };
        looper.condition = condition;
        looper.for_loop = Some(ForLoopState {
            sequence,
            context_iterator,
            iterator_name,
            local_iterator,
        });
    }

    /// `end while` / `end for`: generate the condition and operation
    /// functions, then make a loop and invoke it with the starting-values
    /// tuple; the final tuple redefines the affected context variables.
    /// A segmented loop becomes a sequencer or task intrinsic call and
    /// divides the containing scope instead.
    pub(crate) fn exit_loop_block(&mut self, span: Span) {
        let top = self.top();
        let segmented = self.scopes[top].is_segmented();
        let synchronizes = self.scopes[top].segments_synchronize();

        let captures = self.loop_remap_io(top, span);

        let fqn = self.fully_qualified_name(top);
        let (condition, begin_span, updates, start_values, rebinds) = {
            let ScopeKind::Loop(looper) = &self.scopes[top].kind else { unreachable!() };
            (
                looper.condition,
                looper.begin_span,
                looper.updates.clone(),
                looper.start_values.clone(),
                looper.context_rebinds.clone(),
            )
        };

        // The condition function.
        let mut condition_fn = self.pool.function_named(condition, 1, &format!("{fqn}-condition"));
        if !self.pool.is_void(captures) {
            condition_fn = self.pool.capture_n(condition_fn, captures);
        }

        // The operation function: the loop body, producing the next IO
        // tuple (or the loop result). All context information arrives
        // through the single tuple parameter.
        let mut result = self.pool.nil();
        for &sym in updates.keys() {
            let value = self.resolve(top, sym).expect("updates stay resolvable").value;
            result = self.pool.args_append(result, value);
        }
        let mut result = self.pool.tuple_n(result);
        if segmented {
            result = self.package_scope_result(top, result);
        }
        let mut operation_fn = self.pool.function_named(result, 1, &format!("{fqn}-operation"));
        if !self.pool.is_void(captures) {
            operation_fn = self.pool.capture_n(operation_fn, captures);
        }

        // The initial tuple passed in to the loop function.
        let mut start_args = self.pool.nil();
        for &sym in updates.keys() {
            let value = start_values[&sym];
            start_args = self.pool.args_append(start_args, value);
        }
        let start_tuple = self.pool.tuple_n(start_args);

        let values = if segmented {
            let loop_node = if synchronizes {
                self.pool.loop_task(condition_fn, operation_fn, start_tuple)
            } else {
                self.pool.loop_sequencer(condition_fn, operation_fn, start_tuple)
            };
            let ty = if synchronizes { SegmentType::Sync } else { SegmentType::YieldFrom };
            self.push_segment(top - 1, loop_node, ty, begin_span);
            self.pool.parameter(0)
        } else {
            self.generate_loop_operation(top, start_tuple, condition_fn, operation_fn)
        };

        self.pop_scope();
        self.make_context_assignments(values, &rebinds, span);
    }

    /// Separates the loop's captured symbols into invariants and updates,
    /// now that the body is finished and the lists can no longer change.
    /// Invariants leave the IO tuple — constants stand for themselves and
    /// complex values become slots captured on the loop closures — while
    /// updates become indexed reads of the tuple parameter. Every
    /// placeholder is rewritten away here. Returns the slot capture list.
    fn loop_remap_io(&mut self, depth: usize, span: Span) -> NodeId {
        // If the body assigned to the assert symbol, an assertion failure
        // must terminate the loop: wrap the condition in the chain so it
        // meets the exception and bails out.
        let assert_sym = self.pool.sym_assert();
        {
            let ScopeKind::Loop(looper) = &mut self.scopes[depth].kind else { unreachable!() };
            if let Some(&chain) = looper.updates.get(&assert_sym) {
                looper.condition = self.pool.chain(chain, looper.condition);
            }
        }

        let (updates, invariants, start_values) = {
            let ScopeKind::Loop(looper) = &self.scopes[depth].kind else { unreachable!() };
            (looper.updates.clone(), looper.invariants.clone(), looper.start_values.clone())
        };

        let mut remap = IndexMap::new();
        for (tuple_index, (&sym, &old_value)) in updates.iter().enumerate() {
            debug_assert!(self.pool.is_placeholder(old_value));
            let param_tuple = self.pool.parameter(0);
            let key = self.pool.number(tuple_index as u32);
            let new_value = self.pool.call1(param_tuple, key);
            remap.insert(old_value, new_value);
            self.apply_parameter_mapping(depth, sym, new_value);
        }

        let mut slot_count = 0u32;
        let mut captures = self.pool.nil();
        for (&sym, &old_value) in invariants.iter() {
            debug_assert!(self.pool.is_placeholder(old_value));
            let start_value = start_values[&sym];
            if self.pool.is_context_independent(start_value) {
                // No need to capture; the value stands in for itself.
                remap.insert(old_value, start_value);
            } else {
                // A complex value, calculated before the loop begins and
                // attached to the closures as a slot.
                let slot = self.pool.slot(slot_count);
                slot_count += 1;
                remap.insert(old_value, slot);
                captures = self.pool.args_append(captures, start_value);
            }
        }

        // Commit the rewrites: the update symbols now hold clean values
        // fit for the operation function's result tuple.
        for &sym in updates.keys() {
            let value = self.resolve(depth, sym).expect("updates stay resolvable").value;
            let value = self.pool.rewrite(value, &mut remap);
            self.assign(depth, sym, value, span);
        }
        let mut segments = std::mem::take(&mut self.scopes[depth].segments);
        rewrite_captured_values(&mut self.pool, &mut segments, &mut remap);
        self.scopes[depth].segments = segments;
        {
            let ScopeKind::Loop(looper) = &self.scopes[depth].kind else { unreachable!() };
            let condition = looper.condition;
            let condition = self.pool.rewrite(condition, &mut remap);
            let ScopeKind::Loop(looper) = &mut self.scopes[depth].kind else { unreachable!() };
            looper.condition = condition;
        }

        captures
    }

    /// The for loop tracks its iterator reference through the remap so
    /// the specializer can talk about the rewritten iterator.
    fn apply_parameter_mapping(&mut self, depth: usize, sym: NodeId, new_value: NodeId) {
        let ScopeKind::Loop(looper) = &mut self.scopes[depth].kind else { unreachable!() };
        if let Some(for_loop) = &mut looper.for_loop {
            if sym == for_loop.iterator_name {
                for_loop.local_iterator = new_value;
            }
        }
    }

    /// Builds the actual loop operation. A while loop is just the loop
    /// primitive; a for loop gets the specializer treatment.
    fn generate_loop_operation(
        &mut self,
        depth: usize,
        start_tuple: NodeId,
        condition: NodeId,
        operation: NodeId,
    ) -> NodeId {
        let is_for = {
            let ScopeKind::Loop(looper) = &self.scopes[depth].kind else { unreachable!() };
            looper.for_loop.is_some()
        };
        if is_for {
            self.specialize_for_loop(depth, start_tuple, condition, operation)
        } else {
            self.pool.loop_op(start_tuple, condition, operation)
        }
    }

    // ------------------------------------------------------------------
    // The for-loop specializer.

    /// Analyzes the finished loop body for induction variables: values
    /// which depend only on the prime inductor and loop invariants. Those
    /// subexpressions can be computed independently per element, so they
    /// are hoisted into a mapper applied to the input sequence through
    /// `core.map`, and the sequence is handed to the parallel dispatcher.
    /// The loop still runs sequentially, but its expensive pure
    /// computations become data-parallel work over the sequence.
    fn specialize_for_loop(
        &mut self,
        depth: usize,
        start_tuple: NodeId,
        condition: NodeId,
        operation: NodeId,
    ) -> NodeId {
        let (sequence, context_iterator, local_iterator) = {
            let ScopeKind::Loop(looper) = &self.scopes[depth].kind else { unreachable!() };
            let for_loop = looper.for_loop.as_ref().expect("for loops only");
            (for_loop.sequence, for_loop.context_iterator, for_loop.local_iterator)
        };

        // The operation may have been wrapped in a capture of invariant
        // slots; look through it.
        let (body_fn, captures) = match self.pool.as_operation(operation) {
            Some(op) if op.kind == OperationKind::Capture => (op.left, op.right),
            _ => (operation, self.pool.nil()),
        };
        let body_exp = self.pool.as_function(body_fn).expect("the operation is a function").body;
        let mut mappables = find_mappable_subexpressions(&self.pool, body_exp);

        // A mapping consisting of the prime inductor alone would be a
        // no-op, so it only counts when something else was found too.
        if mappables.len() == 1 && self.pool.is_prime_inductor(mappables[0]) {
            mappables.clear();
        }

        // With nothing to hoist, parallelizing the original sequence is
        // still worthwhile; its `current` function might do substantial
        // work of its own.
        if mappables.is_empty() {
            let start_tuple = self.parallelize_start_args(start_tuple, context_iterator, sequence);
            return self.pool.loop_op(start_tuple, condition, operation);
        }

        // Hoist the mappable subexpressions into a mapper function and
        // apply it over the sequence.
        let mapper = self.generate_mapper(depth, &mappables, captures);
        let core = self.pool.import_core();
        let map_sym = self.pool.sym_map();
        let core_map = self.pool.call1(core, map_sym);
        let mapped_sequence = self.pool.call3(core_map, core, sequence, mapper);

        // Iterate over the mapped sequence instead of the original.
        let start_tuple = self.parallelize_start_args(start_tuple, context_iterator, mapped_sequence);

        // Rewrite the body so each hoisted expression reads back out of
        // the element the mapper produced. The condition needs no rewrite:
        // it only asks whether the sequence is finished, and any kind of
        // sequence can answer that.
        let mut remap = IndexMap::new();
        let current_sym = self.pool.sym_current();
        let current_func = self.pool.call1(local_iterator, current_sym);
        let current_value = self.pool.call1(current_func, local_iterator);
        if mappables.len() > 1 {
            for (index, &subexp) in mappables.iter().enumerate() {
                let key = self.pool.number(index as u32);
                let element = self.pool.call1(current_value, key);
                remap.insert(subexp, element);
            }
        } else {
            // A single expression travels bare, with no tuple wrapper.
            remap.insert(mappables[0], current_value);
        }
        let body_exp = self.pool.rewrite(body_exp, &mut remap);
        let header = self.pool.as_function(body_fn).expect("still a function").clone();
        // A function name cannot be reused; mark the rewritten operation
        // as the specialized variant of the original.
        let mut operation = self.pool.function_named(body_exp, header.arity, &format!("{}X", header.name));
        if !self.pool.is_void(captures) {
            operation = self.pool.capture_n(operation, captures);
        }

        self.pool.loop_op(start_tuple, condition, operation)
    }

    /// Synthesizes the function `core.map` applies to each element: the
    /// hoisted subexpressions, computed from parameter zero in place of
    /// the prime inductor, tupled when there are several.
    fn generate_mapper(&mut self, depth: usize, mappables: &[NodeId], captures: NodeId) -> NodeId {
        let local_iterator = {
            let ScopeKind::Loop(looper) = &self.scopes[depth].kind else { unreachable!() };
            looper.for_loop.as_ref().expect("for loops only").local_iterator
        };

        let exp = if mappables.len() > 1 {
            let mut tuple_args = self.pool.nil();
            for &subexp in mappables {
                tuple_args = self.pool.args_append(tuple_args, subexp);
            }
            self.pool.tuple_n(tuple_args)
        } else {
            mappables[0]
        };

        // The mapper reads its element from parameter zero, where the
        // body read the iterator's current value.
        let mut remap = IndexMap::new();
        let current_sym = self.pool.sym_current();
        let current_func = self.pool.call1(local_iterator, current_sym);
        let current_value = self.pool.call1(current_func, local_iterator);
        let inductor = self.pool.inductor(current_value);
        let param0 = self.pool.parameter(0);
        remap.insert(inductor, param0);
        let exp = self.pool.rewrite(exp, &mut remap);

        let name = format!(
            "{}.mapper-{}",
            self.fully_qualified_name(depth - 1),
            span_text({
                let ScopeKind::Loop(looper) = &self.scopes[depth].kind else { unreachable!() };
                looper.begin_span
            })
        );
        let mut mapper = self.pool.function_named(exp, 1, &name);
        if !self.pool.is_void(captures) {
            mapper = self.pool.capture_n(mapper, captures);
        }
        mapper
    }

    /// Wraps the input sequence in the parallel dispatcher and swaps the
    /// resulting iterator into the start tuple in place of the original
    /// context iterator. The interface stays that of an ordinary
    /// sequence.
    fn parallelize_start_args(&mut self, start_tuple: NodeId, context_iterator: NodeId, sequence: NodeId) -> NodeId {
        let parallel_sequence = self.pool.parallelize(sequence);
        let iterate_sym = self.pool.sym_iterate();
        let iterate_func = self.pool.call1(parallel_sequence, iterate_sym);
        let parallel_iterator = self.pool.call1(iterate_func, parallel_sequence);

        // Dig into the tuple's argument chain until we find the original
        // iterator expression. Args store right to left.
        let tuple_op = self.pool.as_operation(start_tuple).copied().expect("the start value is a tuple");
        debug_assert!(self.pool.is_intrinsic(tuple_op.left, Intrinsic::MakeTuple));
        let mut trailing = Vec::new();
        let mut arg = tuple_op.right;
        while let Some(op) = self.pool.as_operation(arg).copied().filter(|op| op.kind == OperationKind::Arg) {
            if op.right == context_iterator {
                arg = self.pool.args_append(op.left, parallel_iterator);
                break;
            }
            trailing.push(op.right);
            arg = op.left;
        }
        // Reconstruct whatever sat to the right of the iterator.
        for value in trailing.into_iter().rev() {
            arg = self.pool.args_append(arg, value);
        }
        self.pool.tuple_n(arg)
    }
}

/// Walks the body expression collecting induction variables worth
/// extracting: complex enough to be operations, not argument links, and
/// not context-independent constants. Shared subexpressions are visited
/// once, and a collected expression's interior is not explored further.
fn find_mappable_subexpressions(pool: &radian_flowgraph::Pool, operation: NodeId) -> Vec<NodeId> {
    let mut mappables = IndexSet::new();
    let mut visited = IndexSet::new();
    let mut checkables = VecDeque::new();
    checkables.push_back(operation);
    while let Some(exp) = checkables.pop_front() {
        if !visited.insert(exp) {
            continue;
        }
        if pool.is_context_independent(exp) {
            continue;
        }
        if pool.is_induction_var(exp) && !pool.is_arg(exp) {
            mappables.insert(exp);
        } else if let Some(op) = pool.as_operation(exp) {
            checkables.push_back(op.left);
            checkables.push_back(op.right);
        }
    }
    mappables.into_iter().collect()
}
