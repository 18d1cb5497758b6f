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

use crate::{Addr, Code, Op};

use radian_flowgraph::{Node, NodeId, OperationKind, Pool, PostOrderDfs, ValueKind};

use indexmap::IndexMap;

/// The linear rendition of one graph function.
#[derive(Clone, Debug)]
pub struct LinearFunction {
    /// The function's globally unique name.
    pub name: String,
    /// The number of parameters the function accepts.
    pub arity: u32,
    /// The instructions, in evaluation order.
    pub ops: Vec<Op>,
    /// The address holding the function's result.
    pub result: Addr,
}

/// Walks one function's body in post order and emits flat three-address
/// instructions for a back end.
struct Linearizer<'a> {
    pool: &'a Pool,
    ops: Vec<Op>,
    addr_map: IndexMap<NodeId, Addr>,
    reg_count: u32,
}

/// Linearizes the given function node.
pub fn linearize(pool: &Pool, function: NodeId) -> LinearFunction {
    let header = pool.as_function(function).cloned().expect("only functions can be linearized");
    let mut engine = Linearizer { pool, ops: Vec::new(), addr_map: IndexMap::new(), reg_count: 0 };
    // In valid code the result is never void, but we may pass through here
    // after errors were reported, so we don't insist.
    let mut result = Addr::Void;
    for node in PostOrderDfs::new(pool, header.body) {
        result = engine.find_addr(node);
        engine.process(node);
    }
    LinearFunction { name: header.name, arity: header.arity, ops: engine.ops, result }
}

/// Debug output formatter: the whole function with minimal formatting.
pub fn function_to_string(pool: &Pool, function: NodeId) -> String {
    let linear = linearize(pool, function);
    let mut out = format!("{}:\n", linear.name);
    for op in &linear.ops {
        out += &format!("    {op}\n");
    }
    out += &format!("    return {}\n", linear.result);
    out
}

impl Linearizer<'_> {
    /// Turns this node into at most one instruction.
    fn process(&mut self, id: NodeId) {
        let dest = self.find_addr(id);
        match self.pool.node(id) {
            // These have no instruction of their own: they appear only as
            // operands, through their link / intrinsic / void addresses.
            Node::Value(v) if v.kind == ValueKind::Void => {}
            Node::Intrinsic(_) | Node::Function(_) => {}

            Node::Value(value) => {
                let code = match value.kind {
                    ValueKind::Number => Code::NumberLiteral,
                    ValueKind::Float => Code::FloatLiteral,
                    ValueKind::Str => Code::StringLiteral,
                    ValueKind::Symbol => Code::SymbolLiteral,
                    ValueKind::Void => unreachable!(),
                };
                self.ops.push(Op::unary(dest, code, Addr::Data(value.contents.clone())));
            }
            Node::Parameter(index) => {
                self.ops.push(Op::unary(dest, Code::Parameter, Addr::Index(*index)));
            }
            Node::Slot(index) => {
                self.ops.push(Op::unary(dest, Code::Slot, Addr::Index(*index)));
            }
            Node::Import(import) => {
                let name = self.pool.contents(import.file_name).to_string();
                self.ops.push(Op::unary(dest, Code::Import, Addr::Data(name)));
            }
            Node::SelfRef => {
                self.ops.push(Op::unary(dest, Code::SelfRef, Addr::Void));
            }
            Node::Placeholder(_) => {
                // Placeholders must be rewritten away by the loop analyzer;
                // reaching one here means the pool is tainted and an error
                // has been reported. Emit nothing.
            }
            Node::Operation(_) | Node::Inductor(_) => {
                let op = *self.pool.as_operation(id).expect("operation payload");
                self.process_operation(dest, op.kind, op.left, op.right);
            }
        }
    }

    fn process_operation(&mut self, dest: Addr, kind: OperationKind, left: NodeId, right: NodeId) {
        match kind {
            OperationKind::Call => self.process_call(dest, left, right),
            OperationKind::Capture => {
                // Capture a function, yielding an invokable.
                let args = self.collect_args(right);
                let target = self.find_addr(left);
                self.ops.push(Op::targeted(dest, Code::Capture, target, args));
            }
            OperationKind::Loop => {
                // Nothing to do here; loops are rendered at the call that
                // drives them.
            }
            OperationKind::Arg => {
                // Args never exist on their own; they are consumed by the
                // operations that give them meaning.
            }
            OperationKind::Assert => {
                let condition = self.find_addr(left);
                let message = self.find_addr(right);
                self.ops.push(Op::binary(dest, Code::Assert, condition, message));
            }
            OperationKind::Chain => {
                let head = self.find_addr(left);
                let tail = self.find_addr(right);
                self.ops.push(Op::binary(dest, Code::Chain, head, tail));
            }
        }
    }

    fn process_call(&mut self, dest: Addr, target: NodeId, args: NodeId) {
        let loop_op = self
            .pool
            .as_operation(target)
            .copied()
            .filter(|op| op.kind == OperationKind::Loop);
        if let Some(loop_op) = loop_op {
            // Calling a loop directly: render it inline with the
            // LoopWhile / Call / Repeat sequence rather than as a closure.
            let condition = self.find_addr(loop_op.left);
            let operation = self.find_addr(loop_op.right);
            // The loop call always carries exactly one argument: the tuple
            // of starting values.
            let start = self.collect_args(args).pop().unwrap_or_default();
            let temp_a = self.alloc_register();
            let temp_b = self.alloc_register();
            self.ops.push(Op::binary(temp_a.clone(), Code::LoopWhile, start, condition));
            self.ops.push(Op::targeted(temp_b.clone(), Code::Call, operation, vec![temp_a]));
            self.ops.push(Op::unary(dest, Code::Repeat, temp_b));
        } else {
            let args = self.collect_args(args);
            let target = self.find_addr(target);
            self.ops.push(Op::targeted(dest, Code::Call, target, args));
        }
    }

    /// Unpacks a left-leaning argument chain into left-to-right addresses.
    fn collect_args(&mut self, mut args: NodeId) -> Vec<Addr> {
        let mut out = Vec::new();
        while let Some(op) = self.pool.as_operation(args).copied().filter(|op| op.kind == OperationKind::Arg) {
            out.push(self.find_addr(op.right));
            args = op.left;
        }
        out.reverse();
        out
    }

    /// The address of a node: a link for functions, an intrinsic reference
    /// for primitives, void for void, and a fresh register the first time
    /// anything else is seen.
    fn find_addr(&mut self, which: NodeId) -> Addr {
        if let Some(addr) = self.addr_map.get(&which) {
            return addr.clone();
        }
        let addr = match self.pool.node(which) {
            Node::Function(function) => Addr::Link(function.name.clone()),
            Node::Intrinsic(intrinsic) => Addr::Intrinsic(intrinsic.link().to_string()),
            Node::Value(value) if value.kind == ValueKind::Void => Addr::Void,
            _ => self.alloc_register(),
        };
        self.addr_map.insert(which, addr.clone());
        addr
    }

    fn alloc_register(&mut self) -> Addr {
        let register = Addr::Register(self.reg_count);
        self.reg_count += 1;
        register
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literals_and_calls_linearize() {
        let mut pool = Pool::new("test.radian");
        let one = pool.number_str("1");
        let two = pool.number_str("2");
        let add = pool.sym_add();
        let method = pool.call1(one, add);
        let sum = pool.call2(method, one, two);
        let function = pool.function_named(sum, 0, "entry");

        let linear = linearize(&pool, function);
        assert_eq!(linear.name, "entry");
        // Two number literals, one symbol literal, two calls.
        let calls = linear.ops.iter().filter(|op| op.code == Code::Call).count();
        assert_eq!(calls, 2);
        let numbers = linear.ops.iter().filter(|op| op.code == Code::NumberLiteral).count();
        assert_eq!(numbers, 2);
        // The result is the register of the last call.
        assert_eq!(&linear.result, &linear.ops.last().unwrap().dest);
    }

    #[test]
    fn directly_called_loop_inlines() {
        let mut pool = Pool::new("test.radian");
        let start = pool.tuple1(pool.nil());
        let p0 = pool.parameter(0);
        let condition = pool.function_named(p0, 1, "cond");
        let operation = pool.function_named(p0, 1, "op");
        let looped = pool.loop_op(start, condition, operation);
        let function = pool.function_named(looped, 0, "entry");

        let linear = linearize(&pool, function);
        let codes: Vec<Code> = linear.ops.iter().map(|op| op.code).collect();
        assert!(codes.contains(&Code::LoopWhile));
        assert!(codes.contains(&Code::Repeat));
        // The loop body is linked by name, not inlined as a register.
        assert!(linear
            .ops
            .iter()
            .any(|op| op.code == Code::Call && op.value == Addr::Link("op".into())));
    }
}
