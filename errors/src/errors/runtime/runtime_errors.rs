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

create_messages!(
    /// RuntimeError enum for the failure messages the analyzer embeds in
    /// generated throw values. These are never reported through the handler;
    /// their formatted text becomes a string constant in the data-flow graph.
    RuntimeError,
    code_mask: 6000i32,
    code_prefix: "RUN",

    @formatted
    false_assertion {
        args: (),
        msg: "This condition is not true.",
        help: None,
    }

    @formatted
    void_invocation {
        args: (),
        msg: "Value is void and cannot be invoked.",
        help: None,
    }

    @formatted
    invalid_type_assertion {
        args: (),
        msg: "This value does not have the specified type.",
        help: None,
    }

    @formatted
    missing_method {
        args: (),
        msg: "The object does not implement the requested method.",
        help: None,
    }
);
