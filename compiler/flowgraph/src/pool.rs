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

use crate::node::*;

use radian_span::Span;

use fxhash::FxHashMap;
use indexmap::IndexMap;
use std::collections::VecDeque;

// Don't use assertions to validate graph construction. Rather, use this
// check macro, a deferred assert that only fires if the semantics engine
// never gets around to reporting an error. It's OK to pass through invalid
// states when the input is invalid; it's only a bug if we don't also report
// an error to the user.
macro_rules! check {
    ($self:ident, $cond:expr) => {
        if !($cond) {
            $self.taint(stringify!($cond));
            return $self.nil();
        }
    };
}

/// Each compilation unit has a node pool. Always allocate graph nodes
/// through the pool: the pool interns nodes, which gives us common
/// subexpression elimination and makes handle equality structural.
pub struct Pool {
    /// All the nodes, addressed by `NodeId`.
    nodes: Vec<Node>,
    /// Interning table for constant values.
    values: FxHashMap<(ValueKind, String), NodeId>,
    /// Interning table for operations.
    operations: FxHashMap<(OperationKind, NodeId, NodeId), NodeId>,
    /// Interning table for inductors.
    inductors: FxHashMap<NodeId, NodeId>,
    /// Interning table for imports.
    imports: FxHashMap<(NodeId, NodeId), NodeId>,
    /// Functions created with an explicit, globally unique name.
    named_functions: FxHashMap<String, NodeId>,
    /// Anonymous block functions, keyed by body and arity.
    anonymous_functions: FxHashMap<(NodeId, u32), NodeId>,
    /// Dense index arrays.
    parameters: Vec<NodeId>,
    slots: Vec<NodeId>,
    placeholders: Vec<NodeId>,
    intrinsics: FxHashMap<Intrinsic, NodeId>,
    /// Place for the analyzer to bookmark functions it synthesizes at most
    /// once per compilation unit.
    pad: FxHashMap<String, NodeId>,
    /// The singletons.
    nil: NodeId,
    self_ref: NodeId,
    church_true: Option<NodeId>,
    church_false: Option<NodeId>,
    not_function: Option<NodeId>,
    /// Functions not yet drained by the driver, in creation order.
    new_functions: VecDeque<NodeId>,
    /// Imports not yet drained by the driver, with first-construction sites.
    new_imports: VecDeque<(NodeId, Span)>,
    /// The path of the unit this pool belongs to.
    file_path: String,
    /// Prefix applied to private symbols so they cannot collide with the
    /// "same" symbol mangled in any other compilation unit.
    privacy_id: String,
    /// The first failed construction check, if any.
    tainted: Option<String>,
}

impl Pool {
    /// Creates the pool for the compilation unit at `file_path`.
    ///
    /// The privacy prefix is derived from the unit path: referring to the
    /// "same" private symbol from another unit yields a different prefix,
    /// so the symbols are not actually equal.
    pub fn new(file_path: &str) -> Self {
        let mut pool = Self {
            nodes: Vec::new(),
            values: FxHashMap::default(),
            operations: FxHashMap::default(),
            inductors: FxHashMap::default(),
            imports: FxHashMap::default(),
            named_functions: FxHashMap::default(),
            anonymous_functions: FxHashMap::default(),
            parameters: Vec::new(),
            slots: Vec::new(),
            placeholders: Vec::new(),
            intrinsics: FxHashMap::default(),
            pad: FxHashMap::default(),
            nil: NodeId::new(0),
            self_ref: NodeId::new(0),
            church_true: None,
            church_false: None,
            not_function: None,
            new_functions: VecDeque::new(),
            new_imports: VecDeque::new(),
            file_path: file_path.to_string(),
            privacy_id: format!("{:x}", fxhash::hash64(file_path.as_bytes())),
            tainted: None,
        };
        pool.nil = pool.push(Node::Value(Value { kind: ValueKind::Void, contents: String::new() }));
        pool.self_ref = pool.push(Node::SelfRef);
        pool
    }

    /// The path of the unit this pool compiles.
    pub fn file_path(&self) -> &str {
        &self.file_path
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// The node a handle denotes.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// How many nodes the pool holds.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    // ------------------------------------------------------------------
    // Predicates.

    pub fn is_void(&self, id: NodeId) -> bool {
        matches!(self.node(id), Node::Value(v) if v.kind == ValueKind::Void)
    }

    pub fn is_symbol(&self, id: NodeId) -> bool {
        matches!(self.node(id), Node::Value(v) if v.kind == ValueKind::Symbol)
    }

    pub fn is_function(&self, id: NodeId) -> bool {
        matches!(self.node(id), Node::Function(_))
    }

    pub fn is_operation(&self, id: NodeId) -> bool {
        matches!(self.node(id), Node::Operation(_) | Node::Inductor(_))
    }

    pub fn is_placeholder(&self, id: NodeId) -> bool {
        matches!(self.node(id), Node::Placeholder(_))
    }

    pub fn is_arg(&self, id: NodeId) -> bool {
        matches!(self.as_operation(id), Some(op) if op.kind == OperationKind::Arg)
    }

    pub fn is_capture(&self, id: NodeId) -> bool {
        matches!(self.as_operation(id), Some(op) if op.kind == OperationKind::Capture)
    }

    pub fn is_intrinsic(&self, id: NodeId, intrinsic: Intrinsic) -> bool {
        matches!(self.node(id), Node::Intrinsic(i) if *i == intrinsic)
    }

    /// Is this node trivially hoistable, i.e. can it be evaluated
    /// independently of any particular execution context?
    pub fn is_context_independent(&self, id: NodeId) -> bool {
        matches!(self.node(id), Node::Value(_) | Node::Function(_) | Node::Import(_) | Node::Intrinsic(_))
    }

    /// Does this node depend only on loop invariants and on induction
    /// variables?
    pub fn is_induction_var(&self, id: NodeId) -> bool {
        match self.node(id) {
            Node::Inductor(_) => true,
            Node::Operation(op) => op.induction,
            _ => false,
        }
    }

    /// Is this node the loop's own induction variable marker?
    pub fn is_prime_inductor(&self, id: NodeId) -> bool {
        matches!(self.node(id), Node::Inductor(_))
    }

    /// The minimum number of parameters this expression depends on, i.e.
    /// the highest parameter index plus one.
    pub fn min_parameter_count(&self, id: NodeId) -> u32 {
        match self.node(id) {
            Node::Parameter(index) => index + 1,
            Node::Operation(op) => op.min_parameters,
            Node::Inductor(inductor) => self.min_parameter_count(inductor.inner),
            _ => 0,
        }
    }

    // ------------------------------------------------------------------
    // Structured accessors.

    /// The operation a handle denotes, looking through inductors, which are
    /// transparent.
    pub fn as_operation(&self, id: NodeId) -> Option<&Operation> {
        match self.node(id) {
            Node::Operation(op) => Some(op),
            Node::Inductor(inductor) => match self.node(inductor.inner) {
                Node::Operation(op) => Some(op),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn as_function(&self, id: NodeId) -> Option<&Function> {
        match self.node(id) {
            Node::Function(function) => Some(function),
            _ => None,
        }
    }

    pub fn as_import(&self, id: NodeId) -> Option<&Import> {
        match self.node(id) {
            Node::Import(import) => Some(import),
            _ => None,
        }
    }

    pub fn as_value(&self, id: NodeId) -> Option<&Value> {
        match self.node(id) {
            Node::Value(value) => Some(value),
            _ => None,
        }
    }

    /// The contents of a value node; empty for anything else.
    pub fn contents(&self, id: NodeId) -> &str {
        self.as_value(id).map_or("", |v| v.contents.as_str())
    }

    // ------------------------------------------------------------------
    // Terminals.

    /// The void value.
    pub fn nil(&self) -> NodeId {
        self.nil
    }

    /// The reference to the enclosing function itself.
    pub fn self_ref(&self) -> NodeId {
        self.self_ref
    }

    /// Every function may accept parameter values.
    pub fn parameter(&mut self, index: u32) -> NodeId {
        while self.parameters.len() <= index as usize {
            let id = self.push(Node::Parameter(self.parameters.len() as u32));
            self.parameters.push(id);
        }
        self.parameters[index as usize]
    }

    /// A closure instance is a function plus a list of context values
    /// evaluated at the point of reference; each value's storage space is a
    /// slot.
    pub fn slot(&mut self, index: u32) -> NodeId {
        while self.slots.len() <= index as usize {
            let id = self.push(Node::Slot(self.slots.len() as u32));
            self.slots.push(id);
        }
        self.slots[index as usize]
    }

    /// A stand-in for a context value which may or may not end up on a
    /// loop's IO tuple. We won't know until the loop body is finished, so
    /// the loop analyzer starts with placeholders and rewrites them later.
    /// A dedicated node type makes it easy to notice if an unrewritten
    /// placeholder ever leaks into the next phase of compilation.
    pub fn placeholder(&mut self, index: u32) -> NodeId {
        while self.placeholders.len() <= index as usize {
            let id = self.push(Node::Placeholder(self.placeholders.len() as u32));
            self.placeholders.push(id);
        }
        self.placeholders[index as usize]
    }

    /// A reference to a fixed runtime primitive.
    pub fn intrinsic(&mut self, intrinsic: Intrinsic) -> NodeId {
        if let Some(&id) = self.intrinsics.get(&intrinsic) {
            return id;
        }
        let id = self.push(Node::Intrinsic(intrinsic));
        self.intrinsics.insert(intrinsic, id);
        id
    }

    fn intern_value(&mut self, kind: ValueKind, contents: String) -> NodeId {
        if let Some(&id) = self.values.get(&(kind, contents.clone())) {
            return id;
        }
        let id = self.push(Node::Value(Value { kind, contents: contents.clone() }));
        self.values.insert((kind, contents), id);
        id
    }

    /// An exact number value, from its decimal text.
    pub fn number_str(&mut self, value: &str) -> NodeId {
        self.intern_value(ValueKind::Number, value.to_string())
    }

    /// An exact number value.
    pub fn number(&mut self, value: u32) -> NodeId {
        self.number_str(&value.to_string())
    }

    /// An approximate number value.
    pub fn float(&mut self, value: &str) -> NodeId {
        self.intern_value(ValueKind::Float, value.to_string())
    }

    /// A string value.
    pub fn string(&mut self, value: &str) -> NodeId {
        self.intern_value(ValueKind::Str, value.to_string())
    }

    /// A symbol value: an interned string, the semantic equivalent of an
    /// identifier token. Symbols serve as symbol-table keys, parameter
    /// names, and runtime method-dispatch selectors.
    ///
    /// This is also where private identifiers are mangled. Private idents
    /// begin with an underscore; prefixing them per compilation unit makes
    /// a module's internal data inaccessible from outside, which separates
    /// the module's interface from its implementation.
    pub fn symbol(&mut self, value: &str) -> NodeId {
        let value = match value.strip_prefix('_') {
            // The privatized symbol must be otherwise illegal, so that no
            // code will ever accidentally construct it.
            Some(rest) => format!("{}:{}", self.privacy_id, rest),
            None => value.to_string(),
        };
        self.intern_value(ValueKind::Symbol, value)
    }

    /// The conventional "undefined" exception value.
    pub fn undefined(&mut self) -> NodeId {
        let sym = self.sym_undefined();
        self.throw(sym)
    }

    // ------------------------------------------------------------------
    // Functions and imports.

    /// An anonymous block function. The name is synthesized from the arity
    /// and the handle, which is unique and deterministic.
    pub fn function(&mut self, body: NodeId, arity: u32) -> NodeId {
        check!(self, !self.is_placeholder(body));
        if let Some(&id) = self.anonymous_functions.get(&(body, arity)) {
            return id;
        }
        let name = format!("block_{}_{}", arity, NodeId::new(self.nodes.len()));
        let id = self.push(Node::Function(Function { body, arity, name }));
        self.anonymous_functions.insert((body, arity), id);
        self.new_functions.push_back(id);
        id
    }

    /// A named function. Functions created by name must be globally unique:
    /// requesting the same name twice with a different shape is a
    /// construction error.
    pub fn function_named(&mut self, body: NodeId, arity: u32, name: &str) -> NodeId {
        check!(self, !self.is_placeholder(body));
        if let Some(&id) = self.named_functions.get(name) {
            let existing = self.as_function(id).expect("named cache holds functions").clone();
            check!(self, existing.body == body);
            check!(self, existing.arity == arity);
            return id;
        }
        let id = self.push(Node::Function(Function { body, arity, name: name.to_string() }));
        self.named_functions.insert(name.to_string(), id);
        self.new_functions.push_back(id);
        id
    }

    /// A delayed-evaluation reference to a module in another source file.
    /// The driver is notified with the source location of the first
    /// construction, so the host can queue the module for compilation.
    pub fn import_ref(&mut self, file_name: NodeId, source_dir: NodeId, span: Span) -> NodeId {
        check!(self, !self.is_void(file_name));
        if let Some(&id) = self.imports.get(&(file_name, source_dir)) {
            return id;
        }
        let id = self.push(Node::Import(Import { file_name, source_dir }));
        self.imports.insert((file_name, source_dir), id);
        self.new_imports.push_back((id, span));
        id
    }

    /// The compiler delegates certain language features to the "core"
    /// library in the standard library. Its interface is undocumented and
    /// private to the compiler; this returns an import reference to it.
    pub fn import_core(&mut self) -> NodeId {
        let core = self.sym_core();
        let radian = self.sym_radian();
        self.import_ref(core, radian, Span::dummy())
    }

    // ------------------------------------------------------------------
    // Operations.

    /// All non-terminal nodes are operations over a left and a right
    /// operand. The pool guarantees each (kind, left, right) triplet is
    /// constructed once. Operand order implies evaluation order, so no
    /// commutative equivalence is offered.
    pub fn operation(&mut self, kind: OperationKind, left: NodeId, right: NodeId) -> NodeId {
        if let Some(&id) = self.operations.get(&(kind, left, right)) {
            return id;
        }
        let left_count = self.min_parameter_count(left);
        let right_count = self.min_parameter_count(right);
        let induction = if self.is_induction_var(left) {
            self.is_induction_var(right) || right_count == 0
        } else if self.is_induction_var(right) {
            left_count == 0
        } else {
            false
        };
        let id = self.push(Node::Operation(Operation {
            kind,
            left,
            right,
            induction,
            min_parameters: left_count.max(right_count),
        }));
        self.operations.insert((kind, left, right), id);
        id
    }

    /// Marks an expression as an induction variable. The inductor is
    /// transparent: it claims to be its operation when asked, differing
    /// only in always answering yes to the induction question.
    pub fn inductor(&mut self, exp: NodeId) -> NodeId {
        check!(self, self.is_operation(exp));
        if let Some(&id) = self.inductors.get(&exp) {
            return id;
        }
        let id = self.push(Node::Inductor(Inductor { inner: exp }));
        self.inductors.insert(exp, id);
        id
    }

    /// The expression parser generates a dummy node when it encounters a
    /// fatally broken production; its value is just nil. To ensure that
    /// some error was reported at some time we mark the pool as tainted,
    /// which `validate` checks at the end of compilation.
    pub fn dummy(&mut self) -> NodeId {
        check!(self, false);
        self.nil()
    }

    /// Make sure the condition is true. If so, the value is the condition;
    /// if not, an exception carrying the message.
    pub fn assert(&mut self, condition: NodeId, message: NodeId) -> NodeId {
        self.operation(OperationKind::Assert, condition, message)
    }

    /// Chain two values: if the head is an exception it wins, otherwise
    /// the value is the tail. This binds assertions into a sequence where
    /// the earliest failure dominates.
    pub fn chain(&mut self, head: NodeId, tail: NodeId) -> NodeId {
        if Some(head) == self.church_true {
            return tail;
        }
        self.operation(OperationKind::Chain, head, tail)
    }

    pub fn call_n(&mut self, object: NodeId, args: NodeId) -> NodeId {
        check!(self, self.is_void(args) || self.is_arg(args));
        self.operation(OperationKind::Call, object, args)
    }

    pub fn call0(&mut self, object: NodeId) -> NodeId {
        let nil = self.nil();
        self.call_n(object, nil)
    }

    pub fn call1(&mut self, object: NodeId, arg0: NodeId) -> NodeId {
        let args = self.args1(arg0);
        self.call_n(object, args)
    }

    pub fn call2(&mut self, object: NodeId, arg0: NodeId, arg1: NodeId) -> NodeId {
        let args = self.args2(arg0, arg1);
        self.call_n(object, args)
    }

    pub fn call3(&mut self, object: NodeId, arg0: NodeId, arg1: NodeId, arg2: NodeId) -> NodeId {
        let args = self.args3(arg0, arg1, arg2);
        self.call_n(object, args)
    }

    pub fn call4(&mut self, object: NodeId, arg0: NodeId, arg1: NodeId, arg2: NodeId, arg3: NodeId) -> NodeId {
        let args = self.args4(arg0, arg1, arg2, arg3);
        self.call_n(object, args)
    }

    pub fn args_append(&mut self, args: NodeId, value: NodeId) -> NodeId {
        check!(self, self.is_arg(args) || self.is_void(args));
        check!(self, !self.is_arg(value));
        self.operation(OperationKind::Arg, args, value)
    }

    pub fn args1(&mut self, arg0: NodeId) -> NodeId {
        let nil = self.nil();
        self.args_append(nil, arg0)
    }

    pub fn args2(&mut self, arg0: NodeId, arg1: NodeId) -> NodeId {
        let args = self.args1(arg0);
        self.args_append(args, arg1)
    }

    pub fn args3(&mut self, arg0: NodeId, arg1: NodeId, arg2: NodeId) -> NodeId {
        let args = self.args2(arg0, arg1);
        self.args_append(args, arg2)
    }

    pub fn args4(&mut self, arg0: NodeId, arg1: NodeId, arg2: NodeId, arg3: NodeId) -> NodeId {
        let args = self.args3(arg0, arg1, arg2);
        self.args_append(args, arg3)
    }

    pub fn capture_n(&mut self, function: NodeId, slots: NodeId) -> NodeId {
        check!(self, self.is_function(function));
        check!(self, self.is_arg(slots));
        self.operation(OperationKind::Capture, function, slots)
    }

    pub fn capture1(&mut self, function: NodeId, arg0: NodeId) -> NodeId {
        let slots = self.args1(arg0);
        self.capture_n(function, slots)
    }

    pub fn capture2(&mut self, function: NodeId, arg0: NodeId, arg1: NodeId) -> NodeId {
        let slots = self.args2(arg0, arg1);
        self.capture_n(function, slots)
    }

    /// A loop invokable built from a condition and an operation, called
    /// with a start value to iterate to a result. The graph could express
    /// a loop as a normal invokable, but the linearizer wants a specific
    /// block pattern, so loops are only ever called directly and never
    /// retained.
    pub fn loop_op(&mut self, start: NodeId, condition: NodeId, operation: NodeId) -> NodeId {
        let loop_node = self.operation(OperationKind::Loop, condition, operation);
        self.call1(loop_node, start)
    }

    /// The asynchronous generator rendition of a loop.
    pub fn loop_sequencer(&mut self, condition: NodeId, operation: NodeId, value: NodeId) -> NodeId {
        let intrinsic = self.intrinsic(Intrinsic::LoopSequencer);
        self.call3(intrinsic, condition, operation, value)
    }

    /// The asynchronous task rendition of a loop.
    pub fn loop_task(&mut self, condition: NodeId, operation: NodeId, value: NodeId) -> NodeId {
        let intrinsic = self.intrinsic(Intrinsic::LoopTask);
        self.call3(intrinsic, condition, operation, value)
    }

    // ------------------------------------------------------------------
    // Booleans, Church style.

    /// True is a function accepting a true-value and an else-value which
    /// returns the true value.
    pub fn true_value(&mut self) -> NodeId {
        if let Some(id) = self.church_true {
            return id;
        }
        let body = self.parameter(0);
        let id = self.function_named(body, 2, "true");
        self.church_true = Some(id);
        id
    }

    /// False is a function accepting a true-value and an else-value which
    /// returns the else value.
    pub fn false_value(&mut self) -> NodeId {
        if let Some(id) = self.church_false {
            return id;
        }
        let body = self.parameter(1);
        let id = self.function_named(body, 2, "false");
        self.church_false = Some(id);
        id
    }

    /// The condition expression resolves to one of the boolean selector
    /// functions; invoking it with the then- and else-values returns one
    /// of them.
    pub fn branch(&mut self, condition: NodeId, then_value: NodeId, else_value: NodeId) -> NodeId {
        self.call2(condition, then_value, else_value)
    }

    /// Inverts the sense of a boolean value.
    pub fn not(&mut self, value: NodeId) -> NodeId {
        let function = match self.not_function {
            Some(id) => id,
            None => {
                let true_value = self.parameter(0);
                let false_value = self.parameter(1);
                let exp = self.slot(0);
                let result = self.call2(exp, false_value, true_value);
                let id = self.function_named(result, 2, "not");
                self.not_function = Some(id);
                id
            }
        };
        self.capture1(function, value)
    }

    // ------------------------------------------------------------------
    // Containers.

    /// Appends a value to a tuple, or begins a new tuple when the head is
    /// void. Tuples build head to tail, i.e. left to right.
    pub fn tuple_append(&mut self, head: NodeId, tail: NodeId) -> NodeId {
        if self.is_void(head) {
            let tuple = self.intrinsic(Intrinsic::MakeTuple);
            return self.call1(tuple, tail);
        }
        let Some(op) = self.as_operation(head).copied() else {
            check!(self, self.is_operation(head));
            return self.nil();
        };
        check!(self, op.kind == OperationKind::Call);
        check!(self, self.is_intrinsic(op.left, Intrinsic::MakeTuple));
        let args = self.args_append(op.right, tail);
        self.call_n(op.left, args)
    }

    /// A tuple from an already-built argument list.
    pub fn tuple_n(&mut self, args: NodeId) -> NodeId {
        let tuple = self.intrinsic(Intrinsic::MakeTuple);
        self.call_n(tuple, args)
    }

    pub fn tuple1(&mut self, arg0: NodeId) -> NodeId {
        let tuple = self.intrinsic(Intrinsic::MakeTuple);
        self.call1(tuple, arg0)
    }

    pub fn tuple2(&mut self, arg0: NodeId, arg1: NodeId) -> NodeId {
        let tuple = self.intrinsic(Intrinsic::MakeTuple);
        self.call2(tuple, arg0, arg1)
    }

    /// The blank map, which inserts build up from.
    pub fn map_blank(&mut self) -> NodeId {
        self.intrinsic(Intrinsic::MapBlank)
    }

    /// An ordered list from a tuple of element values.
    pub fn list(&mut self, exp: NodeId) -> NodeId {
        let list = self.intrinsic(Intrinsic::List);
        self.call1(list, exp)
    }

    // ------------------------------------------------------------------
    // Exceptions and helpers.

    /// Wraps a value in an error condition which contaminates any
    /// expression it participates in until caught.
    pub fn throw(&mut self, exp: NodeId) -> NodeId {
        let intrinsic = self.intrinsic(Intrinsic::ThrowException);
        self.call1(intrinsic, exp)
    }

    pub fn catch(&mut self, exp: NodeId, handler: NodeId) -> NodeId {
        let intrinsic = self.intrinsic(Intrinsic::CatchException);
        self.call2(intrinsic, exp, handler)
    }

    /// Wraps a sequence in the dispatcher which spreads its work across
    /// available processors; the interface remains an ordinary sequence.
    pub fn parallelize(&mut self, exp: NodeId) -> NodeId {
        let intrinsic = self.intrinsic(Intrinsic::Parallelize);
        self.call1(intrinsic, exp)
    }

    pub fn is_not_void_of(&mut self, exp: NodeId) -> NodeId {
        let intrinsic = self.intrinsic(Intrinsic::IsNotVoid);
        self.call1(intrinsic, exp)
    }

    pub fn is_not_exceptional(&mut self, exp: NodeId) -> NodeId {
        let intrinsic = self.intrinsic(Intrinsic::IsNotExceptional);
        self.call1(intrinsic, exp)
    }

    /// Compares two values by retrieving the left operand's `compare_to`
    /// method and invoking it with both operands. The result is a trinary
    /// selector function choosing between less, equal and greater values.
    pub fn compare(&mut self, left: NodeId, right: NodeId) -> NodeId {
        let selector = self.sym_compare_to();
        let comparator = self.call1(left, selector);
        self.call2(comparator, left, right)
    }

    /// A mangled symbol naming the setter for a member variable. Appending
    /// an equals sign keeps it unconstructible from ordinary identifiers.
    pub fn setter_symbol(&mut self, name: &str) -> NodeId {
        self.intern_value(ValueKind::Symbol, format!("{name}="))
    }

    /// The setter symbol for an existing member symbol node.
    pub fn setter_symbol_node(&mut self, sym: NodeId) -> NodeId {
        check!(self, self.is_symbol(sym));
        let name = self.contents(sym).to_string();
        self.intern_value(ValueKind::Symbol, format!("{name}="))
    }

    // ------------------------------------------------------------------
    // Well-known symbols: names defined by the compiler or looked up in
    // the language-core module.

    pub fn sym_add(&mut self) -> NodeId {
        self.symbol("add")
    }

    pub fn sym_argv(&mut self) -> NodeId {
        self.symbol("argv")
    }

    pub fn sym_assign(&mut self) -> NodeId {
        self.symbol("assign")
    }

    pub fn sym_assert(&mut self) -> NodeId {
        self.symbol("assert")
    }

    pub fn sym_compare_to(&mut self) -> NodeId {
        self.symbol("compare_to")
    }

    pub fn sym_concatenate(&mut self) -> NodeId {
        self.symbol("concatenate")
    }

    pub fn sym_core(&mut self) -> NodeId {
        self.symbol("core")
    }

    pub fn sym_current(&mut self) -> NodeId {
        self.symbol("current")
    }

    pub fn sym_divide(&mut self) -> NodeId {
        self.symbol("divide")
    }

    pub fn sym_exponentiate(&mut self) -> NodeId {
        self.symbol("exponentiate")
    }

    pub fn sym_filter(&mut self) -> NodeId {
        self.symbol("filter")
    }

    pub fn sym_insert(&mut self) -> NodeId {
        self.symbol("insert")
    }

    pub fn sym_is_valid(&mut self) -> NodeId {
        self.symbol("is_valid")
    }

    pub fn sym_iterate(&mut self) -> NodeId {
        self.symbol("iterate")
    }

    pub fn sym_io(&mut self) -> NodeId {
        self.symbol("io")
    }

    pub fn sym_lookup(&mut self) -> NodeId {
        self.symbol("lookup")
    }

    pub fn sym_make_action(&mut self) -> NodeId {
        self.symbol("make_action")
    }

    pub fn sym_make_iterator(&mut self) -> NodeId {
        self.symbol("make_iterator")
    }

    pub fn sym_make_seq_or_task(&mut self) -> NodeId {
        self.symbol("make_seq_or_task")
    }

    pub fn sym_make_subsequence(&mut self) -> NodeId {
        self.symbol("make_subsequence")
    }

    pub fn sym_make_subtask(&mut self) -> NodeId {
        self.symbol("make_subtask")
    }

    pub fn sym_make_terminator(&mut self) -> NodeId {
        self.symbol("make_terminator")
    }

    pub fn sym_map(&mut self) -> NodeId {
        self.symbol("map")
    }

    pub fn sym_modulus(&mut self) -> NodeId {
        self.symbol("modulus")
    }

    pub fn sym_multiply(&mut self) -> NodeId {
        self.symbol("multiply")
    }

    pub fn sym_next(&mut self) -> NodeId {
        self.symbol("next")
    }

    pub fn sym_radian(&mut self) -> NodeId {
        self.symbol("radian")
    }

    pub fn sym_result(&mut self) -> NodeId {
        self.symbol("result")
    }

    pub fn sym_self(&mut self) -> NodeId {
        self.symbol("self")
    }

    pub fn sym_shift_left(&mut self) -> NodeId {
        self.symbol("shift_left")
    }

    pub fn sym_shift_right(&mut self) -> NodeId {
        self.symbol("shift_right")
    }

    pub fn sym_start(&mut self) -> NodeId {
        self.symbol("start")
    }

    pub fn sym_subtract(&mut self) -> NodeId {
        self.symbol("subtract")
    }

    pub fn sym_undefined(&mut self) -> NodeId {
        self.symbol("undefined")
    }

    /// The super-sneaky-secret wildcard selector which opens an object up
    /// for rebuild; not an identifier, so source code cannot spell it.
    pub fn sym_wildcard(&mut self) -> NodeId {
        self.intern_value(ValueKind::Symbol, "*".to_string())
    }

    // ------------------------------------------------------------------
    // Scratch pad.

    /// Looks for a node in the scratch pad, a bookmark system for compound
    /// expressions the analyzer synthesizes at most once per unit.
    pub fn pad_lookup(&self, key: &str) -> Option<NodeId> {
        self.pad.get(key).copied()
    }

    /// Lodges this key/expression pair in the scratchpad for later recall.
    pub fn pad_store(&mut self, key: &str, exp: NodeId) {
        let previous = self.pad.insert(key.to_string(), exp);
        assert!(previous.is_none(), "pad key '{key}' stored twice");
    }

    // ------------------------------------------------------------------
    // Rewriting.

    /// The sources of the values in this expression may have changed.
    /// Traverses the graph rebuilding any nodes that depend on remapped
    /// values, filling the map in along the way so shared subexpressions
    /// are only visited once.
    pub fn rewrite(&mut self, exp: NodeId, remap: &mut IndexMap<NodeId, NodeId>) -> NodeId {
        if let Some(&mapped) = remap.get(&exp) {
            return mapped;
        }
        let Some(op) = self.as_operation(exp).copied() else {
            return exp;
        };
        let left = self.rewrite(op.left, remap);
        let right = self.rewrite(op.right, remap);
        let mut new_exp = self.operation(op.kind, left, right);
        // A rewritten prime inductor keeps its induction marker.
        if self.is_induction_var(exp) && !op.induction {
            new_exp = self.inductor(new_exp);
        }
        remap.insert(exp, new_exp);
        new_exp
    }

    // ------------------------------------------------------------------
    // Driver interface.

    /// Functions constructed since the last drain, in creation order. Each
    /// function ever constructed appears in exactly one drain.
    pub fn take_new_functions(&mut self) -> Vec<NodeId> {
        self.new_functions.drain(..).collect()
    }

    /// Imports constructed since the last drain, with the source location
    /// of their first construction.
    pub fn take_new_imports(&mut self) -> Vec<(NodeId, Span)> {
        self.new_imports.drain(..).collect()
    }

    /// Compilation is finished. If any invalid node was constructed, some
    /// error must have been reported along the way; an unreported invalid
    /// graph indicates a bug in the compiler itself, not in the input.
    pub fn validate(&self, did_report_error: bool) {
        if let Some(message) = &self.tainted {
            if !did_report_error {
                panic!("flowgraph tainted without a reported error: {message}");
            }
        }
    }

    /// Has any construction check failed?
    pub fn is_tainted(&self) -> bool {
        self.tainted.is_some()
    }

    /// Records the first failed construction check. Invalid graphs are the
    /// ordinary consequence of invalid input; they only become a compiler
    /// bug if compilation ends without an error report.
    fn taint(&mut self, condition: &str) {
        if self.tainted.is_none() {
            self.tainted = Some(format!("failed flowgraph check `{condition}'"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_gives_structural_sharing() {
        let mut pool = Pool::new("test.radian");
        let one_a = pool.number_str("1");
        let one_b = pool.number_str("1");
        assert_eq!(one_a, one_b);

        let two = pool.number_str("2");
        let sum_a = pool.call2(one_a, one_a, two);
        let sum_b = pool.call2(one_b, one_b, two);
        assert_eq!(sum_a, sum_b);
        assert_ne!(one_a, two);
    }

    #[test]
    fn church_booleans_select_their_parameters() {
        let mut pool = Pool::new("test.radian");
        let t = pool.true_value();
        let f = pool.false_value();
        let true_function = pool.as_function(t).unwrap().clone();
        let false_function = pool.as_function(f).unwrap().clone();
        assert_eq!(true_function.arity, 2);
        assert_eq!(false_function.arity, 2);
        assert_eq!(*pool.node(true_function.body), Node::Parameter(0));
        assert_eq!(*pool.node(false_function.body), Node::Parameter(1));
        assert_eq!(true_function.name, "true");
        assert_eq!(false_function.name, "false");
    }

    #[test]
    fn branch_is_a_two_argument_call() {
        let mut pool = Pool::new("test.radian");
        let condition = pool.true_value();
        let a = pool.number_str("1");
        let b = pool.number_str("2");
        let branch = pool.branch(condition, a, b);
        let expected = pool.call2(condition, a, b);
        assert_eq!(branch, expected);
    }

    #[test]
    fn private_symbols_mangle_per_unit() {
        let mut pool_a = Pool::new("a.radian");
        let mut pool_b = Pool::new("b.radian");
        let a = pool_a.symbol("_secret");
        let b = pool_b.symbol("_secret");
        assert_ne!(pool_a.contents(a), pool_b.contents(b));
        // Public symbols keep their plain spelling.
        let plain = pool_a.symbol("secret");
        assert_eq!(pool_a.contents(plain), "secret");
    }

    #[test]
    fn functions_emit_once_in_creation_order() {
        let mut pool = Pool::new("test.radian");
        let body = pool.parameter(0);
        let first = pool.function_named(body, 1, "first");
        let second = pool.function(body, 2);
        // Re-requesting the same functions must not emit them again.
        pool.function_named(body, 1, "first");
        pool.function(body, 2);
        assert_eq!(pool.take_new_functions(), vec![first, second]);
        assert!(pool.take_new_functions().is_empty());
    }

    #[test]
    fn invalid_construction_taints_instead_of_panicking() {
        let mut pool = Pool::new("test.radian");
        let number = pool.number_str("1");
        // An argument list must be built from args or void.
        let bogus = pool.call_n(number, number);
        assert_eq!(bogus, pool.nil());
        assert!(pool.is_tainted());
        // An error was reported, so validation passes.
        pool.validate(true);
    }

    #[test]
    #[should_panic(expected = "flowgraph tainted")]
    fn unreported_taint_is_a_compiler_bug() {
        let mut pool = Pool::new("test.radian");
        pool.dummy();
        pool.validate(false);
    }

    #[test]
    fn rewrite_replaces_mapped_nodes() {
        let mut pool = Pool::new("test.radian");
        let placeholder = pool.placeholder(0);
        let sym = pool.sym_add();
        let method = pool.call1(placeholder, sym);
        let call = pool.call2(method, placeholder, placeholder);

        let replacement = pool.slot(3);
        let mut remap = IndexMap::new();
        remap.insert(placeholder, replacement);
        let rewritten = pool.rewrite(call, &mut remap);

        let expected_method = pool.call1(replacement, sym);
        let expected = pool.call2(expected_method, replacement, replacement);
        assert_eq!(rewritten, expected);
    }

    #[test]
    fn rewrite_keeps_induction_markers() {
        let mut pool = Pool::new("test.radian");
        let iterator = pool.placeholder(0);
        let current = pool.sym_current();
        let current_func = pool.call1(iterator, current);
        let current_val = pool.call1(current_func, iterator);
        let prime = pool.inductor(current_val);

        let mut remap = IndexMap::new();
        let tuple_param = pool.parameter(0);
        let index = pool.number(0);
        let io_value = pool.call1(tuple_param, index);
        remap.insert(iterator, io_value);
        let rewritten = pool.rewrite(prime, &mut remap);

        assert!(pool.is_prime_inductor(rewritten));
        // Derived expressions keep tracking induction through the marker.
        let multiply = pool.sym_multiply();
        let method = pool.call1(rewritten, multiply);
        let squared = pool.call2(method, rewritten, rewritten);
        assert!(pool.is_induction_var(squared));
    }
}
