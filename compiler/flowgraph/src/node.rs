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

use serde::{Deserialize, Serialize};
use std::fmt;

/// A handle to a node in a [`Pool`](crate::Pool).
///
/// The pool interns structurally: two handles are equal exactly when the
/// graphs they denote are identical.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(u32);

impl NodeId {
    pub(crate) fn new(index: usize) -> Self {
        Self(u32::try_from(index).expect("pool holds more than u32::MAX nodes"))
    }

    /// The dense index of the node within its pool.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// A node in the data-flow graph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    /// A context-independent constant.
    Value(Value),
    /// A reference to the enclosing function's own closure, for recursion.
    SelfRef,
    /// A positional parameter of the enclosing function.
    Parameter(u32),
    /// A captured free variable of the enclosing closure instance.
    Slot(u32),
    /// A temporary stand-in used only by the loop analyzer; always
    /// rewritten away before the pool is finalized.
    Placeholder(u32),
    /// A named, arity-fixed pure function whose result is its body.
    Function(Function),
    /// An unresolved reference to another compilation unit.
    Import(Import),
    /// A fixed runtime primitive.
    Intrinsic(Intrinsic),
    /// The only non-terminal node: some combination of two operands.
    Operation(Operation),
    /// A transparent wrapper marking an operation as depending only on the
    /// prime induction variable of its enclosing loop.
    Inductor(Inductor),
}

/// The kinds of constant values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    Void,
    /// An exact number.
    Number,
    /// An approximate number.
    Float,
    Str,
    Symbol,
}

/// A context-independent constant value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Value {
    pub kind: ValueKind,
    pub contents: String,
}

/// A pure function: calling it with `arity` arguments evaluates `body`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Function {
    pub body: NodeId,
    pub arity: u32,
    pub name: String,
}

/// A delayed-evaluation reference to a module in some other source file.
/// Cross-module references are resolved by the host after compilation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Import {
    /// The file base name; a string or symbol value.
    pub file_name: NodeId,
    /// The source directory symbol, or void.
    pub source_dir: NodeId,
}

/// The operation kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationKind {
    /// Call object, argument list.
    Call,
    /// Capture function, slot-value list, producing a closure instance.
    Capture,
    /// Argument list link: previous args, new argument.
    Arg,
    /// Loop condition, operation; invoked with a start tuple.
    Loop,
    /// Assert condition, message: the condition if true, else a throw.
    Assert,
    /// Chain head, tail: the head if it is an exception, else the tail.
    Chain,
}

/// A non-terminal node combining two operands.
///
/// Argument lists are left-leaning chains of `Arg` operations, so operand
/// order implies evaluation order; no commutative equivalence is offered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Operation {
    pub kind: OperationKind,
    pub left: NodeId,
    pub right: NodeId,
    /// Does this operation depend only on loop invariants and on other
    /// induction variables?
    pub(crate) induction: bool,
    /// The minimum number of parameters the expression depends on, i.e.
    /// the highest parameter index plus one.
    pub(crate) min_parameters: u32,
}

/// The transparent induction-variable marker. Claims to be an operation
/// when asked, so dataflow downstream of the prime inductor can be tracked
/// without extra graph traversal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Inductor {
    pub inner: NodeId,
}

/// The fixed runtime primitives the graph may reference by name.
///
/// Builtins may be referenced only from modules imported under the special
/// `radian` library directory; the link names are a contract with the
/// runtime and must stay stable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intrinsic {
    IsNotVoid,
    CatchException,
    ThrowException,
    IsNotExceptional,
    Parallelize,
    MakeTuple,
    MapBlank,
    List,
    ListEmpty,
    LoopSequencer,
    LoopTask,
    CharFromInt,
    FfiLoadExternal,
    FfiDescribeFunction,
    FfiCall,
    ReadFile,
    WriteFile,
    DebugTrace,
    MathSin,
    MathCos,
    MathTan,
    MathAsin,
    MathAcos,
    MathAtan,
    MathAtan2,
    MathSinh,
    MathCosh,
    MathTanh,
    MathAsinh,
    MathAcosh,
    MathAtanh,
    ToFloat,
    FloorFloat,
    CeilingFloat,
    TruncateFloat,
}

impl Intrinsic {
    /// The name the back end links this primitive by.
    pub fn link(self) -> &'static str {
        use Intrinsic::*;
        match self {
            IsNotVoid => "is_not_void",
            CatchException => "catch_exception",
            ThrowException => "throw_exception",
            IsNotExceptional => "is_not_exceptional",
            Parallelize => "parallelize",
            MakeTuple => "make_tuple",
            MapBlank => "map_blank",
            List => "list",
            ListEmpty => "list_empty",
            LoopSequencer => "loop_sequencer",
            LoopTask => "loop_task",
            CharFromInt => "char_from_int",
            FfiLoadExternal => "FFI_Load_External",
            FfiDescribeFunction => "FFI_Describe_Function",
            FfiCall => "FFI_Call",
            ReadFile => "Read_File",
            WriteFile => "Write_File",
            DebugTrace => "debug_trace",
            MathSin => "math_sin",
            MathCos => "math_cos",
            MathTan => "math_tan",
            MathAsin => "math_asin",
            MathAcos => "math_acos",
            MathAtan => "math_atan",
            MathAtan2 => "math_atan2",
            MathSinh => "math_sinh",
            MathCosh => "math_cosh",
            MathTanh => "math_tanh",
            MathAsinh => "math_asinh",
            MathAcosh => "math_acosh",
            MathAtanh => "math_atanh",
            ToFloat => "to_float",
            FloorFloat => "floor_float",
            CeilingFloat => "ceiling_float",
            TruncateFloat => "truncate_float",
        }
    }
}

impl fmt::Display for Intrinsic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.link())
    }
}
