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

use crate::Backtraced;

use radian_span::{with_session_globals, Span};

use std::fmt;

/// The error payload for errors anchored at a source span.
///
/// Displays as one diagnostic line of the shape
/// `<path>, line L(C1-C2): <message>`, or `<path>, lines L1-L2: <message>`
/// when the span covers several lines.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Formatted {
    /// The formatted error span information.
    pub span: Span,
    /// The backtraced payload carrying message, code, and help.
    pub backtrace: Backtraced,
}

impl Formatted {
    /// Creates a formatted error from the given arguments.
    pub fn new_from_span(
        message: impl fmt::Display,
        help: Option<String>,
        code: i32,
        code_prefix: impl fmt::Display,
        span: Span,
    ) -> Self {
        Self { span, backtrace: Backtraced::new_from_backtrace(message, help, code, code_prefix) }
    }

    /// The fully formatted error code.
    pub fn error_code(&self) -> String {
        self.backtrace.error_code()
    }

    /// The exit code of the error.
    pub fn exit_code(&self) -> i32 {
        self.backtrace.exit_code()
    }
}

impl fmt::Display for Formatted {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let location = with_session_globals(|s| s.source_map.span_to_location(self.span));
        match location {
            Some(loc) => write!(f, "{}: {}", loc, self.backtrace.message)?,
            None => write!(f, "{}", self.backtrace.message)?,
        }
        if let Some(help) = &self.backtrace.help {
            write!(f, "\n |= {help}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Formatted {}
