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

use backtrace::Backtrace;
use colored::Colorize;
use derivative::Derivative;
use std::fmt;

/// The error payload for errors that have no relevant source location.
/// Carries a backtrace captured at construction for `RUST_BACKTRACE` runs.
#[derive(Derivative)]
#[derivative(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Backtraced {
    /// The error message.
    pub message: String,
    /// The error help message, if it exists.
    pub help: Option<String>,
    /// The error exit code.
    pub code: i32,
    /// The characters preceding the error code number, e.g. `PAR`.
    pub code_prefix: String,
    /// The backtrace representing where the error occurred in the compiler.
    #[derivative(PartialEq = "ignore", Hash = "ignore", Debug = "ignore")]
    pub backtrace: Backtrace,
}

impl Backtraced {
    /// Creates a backtraced error from the given arguments.
    pub fn new_from_backtrace(
        message: impl fmt::Display,
        help: Option<String>,
        code: i32,
        code_prefix: impl fmt::Display,
    ) -> Self {
        Self {
            message: message.to_string(),
            help,
            code,
            code_prefix: code_prefix.to_string(),
            backtrace: Backtrace::new(),
        }
    }

    /// The fully formatted error code, e.g. `EPAR2017`.
    pub fn error_code(&self) -> String {
        format!("E{}{:0>4}", self.code_prefix, self.code)
    }

    /// The exit code of the error.
    pub fn exit_code(&self) -> i32 {
        self.code
    }
}

impl fmt::Display for Backtraced {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} [{}]: {}", "Error".bold().red(), self.error_code(), self.message)?;
        if let Some(help) = &self.help {
            write!(f, "\n |= {help}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Backtraced {}
