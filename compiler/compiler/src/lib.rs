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

//! The compiler driver for Radian compilation units.
//!
//! The [`Compiler`] type strings the phases together: register the source
//! in the session source map, tokenize and parse it, balance its blocks,
//! run semantic analysis, and stream the resulting graph functions to the
//! caller, announcing imports to the host's [`Importer`] along the way.

#![forbid(unsafe_code)]

pub mod options;
pub use options::BuildOptions;

pub mod compiler;
pub use compiler::Compiler;

pub use radian_passes::{Importer, NullImporter, SourceUnit};

#[cfg(test)]
mod test;
