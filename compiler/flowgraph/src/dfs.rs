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

use crate::{NodeId, Pool};

use fxhash::FxHashSet;

/// A post-order, depth-first traversal of an expression graph.
///
/// Each node is visited once, after both of its operands; since the visit
/// set deduplicates, shared subexpressions appear a single time. Function
/// references are leaves: the traversal does not descend into their bodies.
pub struct PostOrderDfs<'a> {
    pool: &'a Pool,
    root: Option<NodeId>,
    visited: FxHashSet<NodeId>,
    worklist: Vec<NodeId>,
}

impl<'a> PostOrderDfs<'a> {
    pub fn new(pool: &'a Pool, root: NodeId) -> Self {
        Self { pool, root: Some(root), visited: FxHashSet::default(), worklist: Vec::new() }
    }

    fn push(&mut self, mut item: NodeId) {
        while !self.visited.contains(&item) {
            self.worklist.push(item);
            let Some(op) = self.pool.as_operation(item).copied() else {
                break;
            };
            if !self.visited.contains(&op.left) {
                item = op.left;
            } else {
                item = op.right;
            }
        }
    }
}

impl Iterator for PostOrderDfs<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        if let Some(root) = self.root.take() {
            self.push(root);
        } else {
            // The caller has consumed the current top; discard it.
            self.worklist.pop()?;
        }
        // The new top may still have an unvisited right operand to dig into.
        let item = *self.worklist.last()?;
        if let Some(op) = self.pool.as_operation(item).copied() {
            self.push(op.right);
        }
        let current = *self.worklist.last()?;
        self.visited.insert(current);
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OperationKind;

    #[test]
    fn visits_operands_before_operations_without_repeats() {
        let mut pool = Pool::new("test.radian");
        let a = pool.number_str("1");
        let b = pool.number_str("2");
        let sum = pool.operation(OperationKind::Arg, pool.nil(), a);
        let args = pool.operation(OperationKind::Arg, sum, b);
        let call = pool.operation(OperationKind::Call, a, args);

        let order: Vec<NodeId> = PostOrderDfs::new(&pool, call).collect();
        // Each node exactly once.
        let mut dedup = order.clone();
        dedup.sort();
        dedup.dedup();
        assert_eq!(dedup.len(), order.len());
        // Operands come before the operations that use them.
        let position = |id: NodeId| order.iter().position(|&n| n == id).unwrap();
        assert!(position(a) < position(sum));
        assert!(position(sum) < position(args));
        assert!(position(args) < position(call));
        assert_eq!(*order.last().unwrap(), call);
    }
}
