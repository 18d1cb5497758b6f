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

//! The Radian compiler middle-end, re-exported as one crate.
//!
//! The pipeline turns a token stream into a pooled, hash-consed data-flow
//! graph of pure functions: the parser builds the statement list, the
//! block balancer rationalizes it, the semantic analyzer lowers it scope
//! by scope, and the linearizer renders any emitted function as
//! three-address code for a back end.

#![forbid(unsafe_code)]

pub use radian_ast as ast;
pub use radian_compiler as compiler;
pub use radian_errors as errors;
pub use radian_flowgraph as flowgraph;
pub use radian_linear as linear;
pub use radian_parser as parser;
pub use radian_passes as passes;
pub use radian_span as span;
