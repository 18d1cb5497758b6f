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

use crate::create_messages;
use std::fmt::Display;

create_messages!(
    /// CompilerError enum that represents all the errors for the `radian-compiler` crate.
    CompilerError,
    code_mask: 1000i32,
    code_prefix: "CPL",

    @backtraced
    load_program_file_failed {
        args: (path: impl Display, error: impl Display),
        msg: format!("Program file '{path}' does not exist or could not be opened: {error}"),
        help: None,
    }

    @formatted
    import_failed {
        args: (name: impl Display),
        msg: format!("Import of '{name}' failed because the target file does not exist or could not be opened."),
        help: None,
    }
);
