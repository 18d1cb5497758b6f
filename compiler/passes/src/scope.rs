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

use crate::{MemberDispatch, Segment, SymbolKind, SymbolTable};

use radian_flowgraph::NodeId;
use radian_span::Span;

use indexmap::{IndexMap, IndexSet};

/// A scope: a domain in which symbols can be defined and resolved.
///
/// Scopes form a stack; the bottom entry is the root, which terminates
/// lookup, and each entry above captures from the one below it.
#[derive(Debug)]
pub struct Scope {
    /// Only the symbols active in the current segment. When the scope
    /// divides, this is snapshotted into the segment and cleared; values
    /// flow back in on demand through the segment chain.
    pub symbols: SymbolTable,
    /// Every name ever defined in this scope, across all segments.
    pub definitions: IndexMap<NodeId, SymbolKind>,
    /// Names captured from the context rather than defined here.
    pub was_captured: IndexSet<NodeId>,
    /// The asynchronous fragments of this scope, in creation order.
    pub segments: Vec<Segment>,
    /// What kind of scope this is, with its kind-specific state.
    pub kind: ScopeKind,
}

impl Scope {
    pub fn new(kind: ScopeKind) -> Self {
        Self {
            symbols: SymbolTable::default(),
            definitions: IndexMap::new(),
            was_captured: IndexSet::new(),
            segments: Vec::new(),
            kind,
        }
    }

    /// Has this scope divided into asynchronous segments?
    pub fn is_segmented(&self) -> bool {
        !self.segments.is_empty()
    }

    /// Does this scope contain synchronizing segments, from an async task?
    pub fn segments_synchronize(&self) -> bool {
        self.segments.last().is_some_and(Segment::synchronizes)
    }

    /// Scopes that dispatch their declarations as object members give
    /// nested function-like blocks an implicit `self` parameter.
    pub fn needs_implicit_self(&self) -> bool {
        match &self.kind {
            ScopeKind::Module(_) => true,
            ScopeKind::Closure(closure) => matches!(closure.sort, ClosureSort::Object { .. }),
            _ => false,
        }
    }
}

/// The kind-specific half of a scope.
#[derive(Debug)]
pub enum ScopeKind {
    /// The root of a program file: lookup ends here, and the file's
    /// statements accumulate into the entry-point task.
    Program,
    /// The root of a module file: like an object block covering the whole
    /// file, with the file's base name as the implicit self.
    Module(ModuleRoot),
    /// A closure: produces an independently callable function, capturing
    /// free variables as slots. Cannot rebind context variables.
    Closure(ClosureScope),
    /// The containing state of an if/else chain. Statements never execute
    /// here directly; they run in the branch scope stacked above.
    IfElseBlock(IfElseBlock),
    /// One branch of an if/else chain.
    Branch(BranchScope),
    /// A while or for loop block.
    Loop(LoopScope),
}

/// State of a module root.
#[derive(Debug)]
pub struct ModuleRoot {
    /// The module's name: the file base name, and the implicit self.
    pub name: String,
    /// The symbol naming the implicit self.
    pub self_sym: NodeId,
    /// The member dispatcher collecting the module's declarations.
    pub members: MemberDispatch,
}

/// The flavors of closure scope.
#[derive(Debug)]
pub enum ClosureSort {
    /// A named function; binds its own name to `self` for recursion and
    /// returns its `result` variable.
    Function { name: String, sym: NodeId, name_span: Span },
    /// A method; its implicit self is mutable and is also its result.
    Method { name: String, sym: NodeId, name_span: Span },
    /// An object constructor; declarations inside become members of the
    /// dispatcher, and the result is the dispatch closure.
    Object {
        name: String,
        sym: NodeId,
        name_span: Span,
        members: MemberDispatch,
        declarations_become_members: bool,
    },
    /// An anonymous lambda from `capture(...)` or a synthesized thunk.
    Lambda,
}

/// State of a closure scope.
#[derive(Debug)]
pub struct ClosureScope {
    pub sort: ClosureSort,
    /// The values captured from context, as a growing argument chain.
    pub capture_list: NodeId,
    /// How many slots the capture list holds.
    pub capture_count: u32,
    /// How many parameters have been defined.
    pub param_count: u32,
    /// Where the closure's source began; names anonymous closures.
    pub begin_span: Span,
}

impl ClosureScope {
    pub fn new(sort: ClosureSort, nil: NodeId, begin_span: Span) -> Self {
        Self { sort, capture_list: nil, capture_count: 0, param_count: 0, begin_span }
    }
}

/// State of the containing scope of an if/else chain.
///
/// Every branch receives all of the captured context values as parameters
/// of its branch function, in a canonical order shared by the whole chain;
/// the block tracks that order here along with the matching argument
/// lists.
#[derive(Debug)]
pub struct IfElseBlock {
    pub begin_span: Span,
    /// Captured symbol → the parameter reference every branch shares.
    pub parameters: IndexMap<NodeId, NodeId>,
    /// The captured values, for the initial invocation.
    pub initial_args: NodeId,
    /// The parameter references, for forwarding from branch to branch.
    pub forwarding_args: NodeId,
    /// The branches completed so far, in source order.
    pub branches: Vec<FinishedBranch>,
    /// Did any branch divide into segments?
    pub segmented: bool,
    /// Did any branch's segments synchronize?
    pub synchronizes: bool,
    /// Every context variable reassigned by any branch, in capture order;
    /// defines the layout of the phi tuple.
    pub context_rebinds: IndexSet<NodeId>,
}

impl IfElseBlock {
    pub fn new(nil: NodeId, begin_span: Span) -> Self {
        Self {
            begin_span,
            parameters: IndexMap::new(),
            initial_args: nil,
            forwarding_args: nil,
            branches: Vec::new(),
            segmented: false,
            synchronizes: false,
            context_rebinds: IndexSet::new(),
        }
    }
}

/// State of one live branch of an if/else chain.
#[derive(Debug)]
pub struct BranchScope {
    /// The branch condition; void for the unconditional else.
    pub condition: NodeId,
    /// Ascending branch number, for qualified names.
    pub index: u32,
}

/// A branch whose statements have all been analyzed. Enough of its scope
/// survives to resolve the phi tuple values at block exit.
#[derive(Debug)]
pub struct FinishedBranch {
    pub condition: NodeId,
    pub symbols: SymbolTable,
    pub definitions: IndexMap<NodeId, SymbolKind>,
    pub segments: Vec<Segment>,
}

/// State of a loop block: a starting value, a condition function and an
/// operation function. Captured context symbols start out as placeholders,
/// because we cannot know until the body is finished whether each one is a
/// loop invariant (a slot on the loop closures) or an update (a field of
/// the IO tuple threaded between iterations).
#[derive(Debug)]
pub struct LoopScope {
    pub begin_span: Span,
    /// The continuation condition expression.
    pub condition: NodeId,
    /// The next placeholder number to hand out.
    pub placeholder_index: u32,
    /// Symbols read but never assigned: symbol → placeholder.
    pub invariants: IndexMap<NodeId, NodeId>,
    /// Symbols assigned at least once: symbol → placeholder.
    pub updates: IndexMap<NodeId, NodeId>,
    /// The context value each captured symbol had before the loop began.
    pub start_values: IndexMap<NodeId, NodeId>,
    /// The symbols to reassign on exit; tracks `updates` in lockstep.
    pub context_rebinds: IndexSet<NodeId>,
    /// The extra machinery of a for loop; `None` for a while loop.
    pub for_loop: Option<ForLoopState>,
}

impl LoopScope {
    pub fn new(nil: NodeId, begin_span: Span) -> Self {
        Self {
            begin_span,
            condition: nil,
            placeholder_index: 0,
            invariants: IndexMap::new(),
            updates: IndexMap::new(),
            start_values: IndexMap::new(),
            context_rebinds: IndexSet::new(),
            for_loop: None,
        }
    }
}

/// The iterator plumbing a for loop threads through its context.
#[derive(Debug)]
pub struct ForLoopState {
    /// The input sequence expression, evaluated in the context.
    pub sequence: NodeId,
    /// The initial iterator over the sequence, owned by the context so it
    /// can pass from one iteration to the next.
    pub context_iterator: NodeId,
    /// The generated, uncollidable name of the iterator variable.
    pub iterator_name: NodeId,
    /// The loop body's current reference to the iterator; a placeholder
    /// until the IO remap pins it to the parameter tuple.
    pub local_iterator: NodeId,
}
