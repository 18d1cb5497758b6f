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

/// Declares one error enum for a compiler phase.
///
/// Each `@formatted` message generates a constructor taking the declared
/// arguments plus a `span`; each `@backtraced` message generates one taking
/// only the declared arguments. Error codes are assigned by position on top
/// of the `code_mask`, so new messages must be appended, never reordered.
#[macro_export]
macro_rules! create_messages {
    (
        $(#[$error_type_docs:meta])*
        $type_:ident,
        code_mask: $code_mask:expr,
        code_prefix: $code_prefix:expr,
        $($rest:tt)*
    ) => {
        $(#[$error_type_docs])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
        pub enum $type_ {
            #[error(transparent)]
            Formatted(#[from] $crate::Formatted),
            #[error(transparent)]
            Backtraced(#[from] $crate::Backtraced),
        }

        impl $type_ {
            /// The fully formatted error code, e.g. `EPAR2017`.
            pub fn error_code(&self) -> String {
                match self {
                    Self::Formatted(formatted) => formatted.error_code(),
                    Self::Backtraced(backtraced) => backtraced.error_code(),
                }
            }

            /// The exit code of the error.
            pub fn exit_code(&self) -> i32 {
                match self {
                    Self::Formatted(formatted) => formatted.exit_code(),
                    Self::Backtraced(backtraced) => backtraced.exit_code(),
                }
            }
        }

        $crate::create_messages!(@step $type_, $code_mask, $code_prefix, 0i32, $($rest)*);
    };

    (@step $type_:ident, $code_mask:expr, $code_prefix:expr, $num:expr,) => {};

    (@step $type_:ident, $code_mask:expr, $code_prefix:expr, $num:expr,
        $(#[$docs:meta])*
        @formatted $name:ident {
            args: ($($arg_names:ident: $arg_types:ty),* $(,)?),
            msg: $message:expr,
            help: $help:expr,
        }
        $($rest:tt)*
    ) => {
        impl $type_ {
            $(#[$docs])*
            pub fn $name($($arg_names: $arg_types,)* span: radian_span::Span) -> Self {
                Self::Formatted($crate::Formatted::new_from_span(
                    $message,
                    $help,
                    $code_mask + $num,
                    $code_prefix,
                    span,
                ))
            }
        }

        $crate::create_messages!(@step $type_, $code_mask, $code_prefix, $num + 1i32, $($rest)*);
    };

    (@step $type_:ident, $code_mask:expr, $code_prefix:expr, $num:expr,
        $(#[$docs:meta])*
        @backtraced $name:ident {
            args: ($($arg_names:ident: $arg_types:ty),* $(,)?),
            msg: $message:expr,
            help: $help:expr,
        }
        $($rest:tt)*
    ) => {
        impl $type_ {
            $(#[$docs])*
            pub fn $name($($arg_names: $arg_types,)*) -> Self {
                Self::Backtraced($crate::Backtraced::new_from_backtrace(
                    $message,
                    $help,
                    $code_mask + $num,
                    $code_prefix,
                ))
            }
        }

        $crate::create_messages!(@step $type_, $code_mask, $code_prefix, $num + 1i32, $($rest)*);
    };
}
