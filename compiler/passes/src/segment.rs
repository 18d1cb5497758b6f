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

use crate::{SymbolTable, VariableSymbol};

use radian_flowgraph::{NodeId, Pool};

use indexmap::IndexMap;

/// The kinds of asynchronous division.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SegmentType {
    /// `yield value`: emit one value from a generator.
    Yield,
    /// `yield from sequence`: stream a whole subsequence out.
    YieldFrom,
    /// `sync task`: emit a task from an async process and resume with its
    /// result.
    Sync,
}

/// One asynchronous fragment of a scope.
///
/// A segment snapshots the active symbol table at the moment of division
/// and remembers the value being yielded. Symbols the *next* segment needs
/// are pulled forward on demand: the current segment appends the value to
/// the capture list it will attach to the next segment's closure, and
/// hands back a slot reference for the next segment to use instead.
#[derive(Clone, Debug)]
pub struct Segment {
    /// The symbols as they stood when the scope divided.
    pub symbols: SymbolTable,
    /// The yielded expression.
    pub value: NodeId,
    /// The division kind. All segments of one scope must agree on
    /// synchronization.
    pub ty: SegmentType,
    /// Values the next segment's closure captures, in slot order.
    next_captures: Vec<NodeId>,
    /// Slot references already handed out for the next segment.
    next_slot_refs: SymbolTable,
}

impl Segment {
    pub fn new(symbols: SymbolTable, value: NodeId, ty: SegmentType) -> Self {
        Self { symbols, value, ty, next_captures: Vec::new(), next_slot_refs: SymbolTable::default() }
    }

    /// Does this segment synchronize, i.e. belong to an async task rather
    /// than a generator?
    pub fn synchronizes(&self) -> bool {
        self.ty == SegmentType::Sync
    }
}

/// Resolves `name` for the benefit of the segment *after* `index`,
/// walking backward through the chain as needed and recording captures
/// along the way.
pub fn segment_resolve(
    pool: &mut Pool,
    segments: &mut [Segment],
    index: usize,
    name: NodeId,
) -> VariableSymbol {
    // If we've already handed out a slot reference for this symbol, reuse it.
    if let Some(symbol) = segments[index].next_slot_refs.lookup(name) {
        return symbol;
    }

    // First request: find the value here, or pull it up from the previous
    // segment and remember it so we only go through this rigmarole once.
    let mut symbol = match segments[index].symbols.lookup(name) {
        Some(symbol) => symbol,
        None => {
            assert!(index > 0, "segment resolution is never speculative");
            let below = segment_resolve(pool, segments, index - 1, name);
            segments[index].symbols.insert(name, below);
            below
        }
    };

    if !pool.is_context_independent(symbol.value) {
        // The next segment will see this value through a slot on its own
        // closure; the slot number is the capture list position.
        let slot_index = segments[index].next_captures.len() as u32;
        segments[index].next_captures.push(symbol.value);
        symbol = VariableSymbol { kind: symbol.kind, value: pool.slot(slot_index) };
    }
    segments[index].next_slot_refs.insert(name, symbol);
    symbol
}

/// The scope captured a value from its context after segmentation began.
/// The value is only available at initial invocation, so the capture
/// belongs at the head of the chain.
pub fn propagate_captured_value(segments: &mut [Segment], name: NodeId, symbol: VariableSymbol) {
    if let Some(first) = segments.first_mut() {
        first.symbols.insert(name, symbol);
    }
}

/// The loop analyzer rewrote placeholders after the chain was built; the
/// captured values live in the first segment, so the rewrite applies there
/// and propagates down the chain of async closures naturally.
pub fn rewrite_captured_values(pool: &mut Pool, segments: &mut [Segment], remap: &mut IndexMap<NodeId, NodeId>) {
    if let Some(first) = segments.first_mut() {
        for value in first.next_captures.iter_mut() {
            *value = pool.rewrite(*value, remap);
        }
        first.value = pool.rewrite(first.value, remap);
    }
}

/// Wraps a finished scope's result in its chain of segments, producing a
/// sequence or task object whose iterator walks the yields in order.
///
/// Each segment's iterator carries its value plus a thunk of the next
/// iterator, capturing the previous symbols as slots; `yield from` and
/// `sync` segments interpose a sub-iterator so the value's own sequence is
/// streamed out. The chain ends at a terminator around the scope's result.
pub fn package_segmented_result(pool: &mut Pool, segments: Vec<Segment>, result: NodeId) -> NodeId {
    let core = pool.import_core();

    // Make a terminal iterator around the result value.
    let terminator_sym = pool.sym_make_terminator();
    let make_terminator = pool.call1(core, terminator_sym);
    let mut result = pool.call2(make_terminator, core, result);

    // Wrap from the last segment back to the first, so the outermost
    // iterator points at the first value of the sequence.
    for segment in segments.into_iter().rev() {
        // Thunk the next iterator so the chain evaluates lazily.
        let mut next_func = pool.function(result, 1);
        let mut captures = pool.nil();
        for value in &segment.next_captures {
            captures = pool.args_append(captures, *value);
        }
        if !pool.is_void(captures) {
            next_func = pool.capture_n(next_func, captures);
        }

        let mut value = segment.value;
        let maker_sym = match segment.ty {
            SegmentType::Yield => pool.sym_make_iterator(),
            // The value stands for a whole sequence of outputs, not a
            // single one, which calls for a different kind of iterator.
            SegmentType::YieldFrom => {
                let begin = pool.sym_iterate();
                let iterate_func = pool.call1(value, begin);
                value = pool.call1(iterate_func, value);
                pool.sym_make_subsequence()
            }
            SegmentType::Sync => {
                let begin = pool.sym_start();
                let start_func = pool.call1(value, begin);
                value = pool.call1(start_func, value);
                pool.sym_make_subtask()
            }
        };
        let make_iterator = pool.call1(core, maker_sym);
        result = pool.call3(make_iterator, core, value, next_func);
    }

    // Wrap the chain in a sequence object which can be iterated over.
    let seq_sym = pool.sym_make_seq_or_task();
    let make_sequence = pool.call1(core, seq_sym);
    pool.call2(make_sequence, core, result)
}
