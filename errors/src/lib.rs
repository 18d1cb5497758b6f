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

//! The error types for the Radian compiler, plus the [`emitter::Handler`]
//! through which every phase reports them.
//!
//! Errors are reported and recovered locally: the reporting phase substitutes
//! a placeholder value and keeps going, so a single run surfaces as many
//! problems as it can find.

#![forbid(unsafe_code)]

/// Contains the common functionality for defining errors.
#[macro_use]
pub mod common;
pub use self::common::*;

/// Contains the error emitter and handler.
pub mod emitter;

/// Contains the errors for each phase of the Radian compiler.
pub mod errors;
pub use self::errors::*;

/// A `Result` type alias with the Radian error enum pre-applied.
pub type Result<T, E = RadianError> = core::result::Result<T, E>;
