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

//! Human-readable rendering of graph nodes, for dumps and tests.

use crate::{Intrinsic, Node, NodeId, OperationKind, Pool, ValueKind};

use std::collections::VecDeque;

/// Accumulates a nested s-expression-ish rendering. Innermost groups fit on
/// a single line; any group containing another group goes multiline.
#[derive(Default)]
struct NodeFormatter {
    items: VecDeque<String>,
    result: String,
    indent_level: usize,
}

impl NodeFormatter {
    /// Enters a new group. If a group is already open it becomes multiline,
    /// dumping each preceding element on its own line.
    fn begin(&mut self, id: &str) {
        if !self.items.is_empty() {
            let mut has_indented = false;
            while let Some(item) = self.items.pop_front() {
                self.result.push_str(&self.tabs());
                self.result.push_str(&item);
                self.result.push('\n');
                if !has_indented {
                    self.indent_level += 1;
                    has_indented = true;
                }
            }
        }
        self.items.push_back(format!("({id}"));
    }

    fn end(&mut self) {
        if self.items.is_empty() {
            // This block went multiline; all elements are already written.
            self.indent_level = self.indent_level.saturating_sub(1);
        }
        self.result.push_str(&self.tabs());
        let mut local = String::new();
        while let Some(item) = self.items.pop_front() {
            if !local.is_empty() {
                local.push(' ');
            }
            local.push_str(&item);
        }
        self.result.push_str(&local);
        self.result.push_str(")\n");
    }

    fn element(&mut self, value: String) {
        if !self.items.is_empty() {
            self.items.push_back(value);
        } else {
            self.result.push_str(&self.tabs());
            self.result.push_str(&value);
            self.result.push('\n');
        }
    }

    fn tabs(&self) -> String {
        "\t".repeat(self.indent_level)
    }
}

impl Pool {
    /// Renders a node as a human-readable string.
    pub fn node_to_string(&self, id: NodeId) -> String {
        let mut formatter = NodeFormatter::default();
        self.format_node(id, &mut formatter);
        formatter.result
    }

    /// Renders a function header and its body expression.
    pub fn function_to_string(&self, id: NodeId) -> String {
        let Some(function) = self.as_function(id) else {
            return self.node_to_string(id);
        };
        let mut formatter = NodeFormatter::default();
        formatter.begin(&format!("'{}'", function.name));
        self.format_node(function.body, &mut formatter);
        formatter.end();
        formatter.result
    }

    fn format_node(&self, id: NodeId, formatter: &mut NodeFormatter) {
        match self.node(id) {
            Node::Value(value) => formatter.element(match value.kind {
                ValueKind::Void => "nil".to_string(),
                ValueKind::Number => value.contents.clone(),
                ValueKind::Float => format!("{}f", value.contents),
                ValueKind::Str => format!("\"{}\"", value.contents),
                ValueKind::Symbol => format!(":{}", value.contents),
            }),
            Node::SelfRef => formatter.element("self".to_string()),
            Node::Parameter(index) => formatter.element(format!("param_{index}")),
            Node::Slot(index) => formatter.element(format!("slot_{index}")),
            Node::Placeholder(index) => formatter.element(format!("placeholder_{index}")),
            // Do not include the body; just print a reference.
            Node::Function(function) => formatter.element(format!("'{}'", function.name)),
            Node::Import(import) => {
                formatter.begin("import");
                self.format_node(import.file_name, formatter);
                self.format_node(import.source_dir, formatter);
                formatter.end();
            }
            Node::Intrinsic(intrinsic) => formatter.element(intrinsic.link().to_string()),
            Node::Inductor(inductor) => self.format_node(inductor.inner, formatter),
            Node::Operation(op) => {
                let opname = match op.kind {
                    OperationKind::Call => "call",
                    OperationKind::Capture => "lambda",
                    OperationKind::Arg => "",
                    OperationKind::Loop => "loop",
                    OperationKind::Assert => "assert",
                    OperationKind::Chain => "chain",
                };
                if !opname.is_empty() {
                    formatter.begin(opname);
                }
                if !self.format_method_call_pattern(op.kind, op.left, op.right, formatter) {
                    self.format_node(op.left, formatter);
                }
                self.format_node(op.right, formatter);
                if !opname.is_empty() {
                    formatter.end();
                }
            }
        }
    }

    /// Recognizes the look-up-a-method-and-invoke-it pattern and prints a
    /// simpler string for it: `method<name>`.
    fn format_method_call_pattern(
        &self,
        kind: OperationKind,
        left: NodeId,
        right: NodeId,
        formatter: &mut NodeFormatter,
    ) -> bool {
        // A method call is a call with at least one argument.
        if kind != OperationKind::Call || !self.is_arg(right) {
            return false;
        }
        // Find the first argument value.
        let mut walker = self.as_operation(right).unwrap();
        let mut first_arg = walker.right;
        while self.is_arg(walker.left) {
            walker = self.as_operation(walker.left).unwrap();
            first_arg = walker.right;
        }
        // The call's target must itself be a call with exactly one argument,
        // a symbol, whose target equals this call's first argument.
        let Some(target) = self.as_operation(left) else { return false };
        if target.kind != OperationKind::Call || !self.is_arg(target.right) {
            return false;
        }
        let selector = self.as_operation(target.right).unwrap();
        if !self.is_void(selector.left) || !self.is_symbol(selector.right) {
            return false;
        }
        if target.left != first_arg {
            return false;
        }
        formatter.element(format!("method<{}>", self.contents(selector.right)));
        true
    }
}

// Keep the intrinsic link-name table honest: these names are a contract
// with the runtime.
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_call_pattern_prints_compactly() {
        let mut pool = Pool::new("test.radian");
        let x = pool.symbol("x");
        let add = pool.sym_add();
        let method = pool.call1(x, add);
        let call = pool.call2(method, x, x);
        let printed = pool.node_to_string(call);
        assert!(printed.contains("method<add>"), "got: {printed}");
    }

    #[test]
    fn intrinsic_links_are_stable() {
        assert_eq!(Intrinsic::LoopSequencer.link(), "loop_sequencer");
        assert_eq!(Intrinsic::MakeTuple.link(), "make_tuple");
        assert_eq!(Intrinsic::Parallelize.link(), "parallelize");
        assert_eq!(Intrinsic::FfiLoadExternal.link(), "FFI_Load_External");
    }
}
