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

//! Source positions, spans over them, the global source map, and interned
//! symbols, shared by all phases of the Radian compiler.

#![forbid(unsafe_code)]

pub mod span;
pub use span::{BytePos, Pos, Span};

pub mod source_map;
pub use source_map::{FileName, SourceFile, SourceMap, SpanLocation};

pub mod symbol;
pub use symbol::{create_session_if_not_set_then, sym, with_session_globals, SessionGlobals, Symbol};
