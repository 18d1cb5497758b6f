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

/// Contains the compiler driver error definitions.
pub mod compiler;
pub use self::compiler::*;

/// Contains the parser error definitions.
pub mod parser;
pub use self::parser::*;

/// Contains the runtime error stubs embedded in generated throw values.
pub mod runtime;
pub use self::runtime::*;

/// Contains the semantic analyzer error definitions.
pub mod semantic;
pub use self::semantic::*;

/// The umbrella error type for all phases of the Radian compiler.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
pub enum RadianError {
    /// Represents a compiler driver error.
    #[error(transparent)]
    CompilerError(#[from] CompilerError),
    /// Represents a parser error.
    #[error(transparent)]
    ParserError(#[from] ParserError),
    /// Represents a runtime error stub.
    #[error(transparent)]
    RuntimeError(#[from] RuntimeError),
    /// Represents a semantic analyzer error.
    #[error(transparent)]
    SemanticError(#[from] SemanticError),
}

impl RadianError {
    /// The fully formatted error code.
    pub fn error_code(&self) -> String {
        match self {
            Self::CompilerError(error) => error.error_code(),
            Self::ParserError(error) => error.error_code(),
            Self::RuntimeError(error) => error.error_code(),
            Self::SemanticError(error) => error.error_code(),
        }
    }

    /// The exit code of the error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::CompilerError(error) => error.exit_code(),
            Self::ParserError(error) => error.exit_code(),
            Self::RuntimeError(error) => error.exit_code(),
            Self::SemanticError(error) => error.exit_code(),
        }
    }
}
