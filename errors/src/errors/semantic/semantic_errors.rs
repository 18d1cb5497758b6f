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
    /// SemanticError enum that represents all the errors for the `radian-passes` crate.
    SemanticError,
    code_mask: 4000i32,
    code_prefix: "SEM",

    @formatted
    undefined {
        args: (name: impl Display),
        msg: format!("The name '{name}' is not defined."),
        help: None,
    }

    @formatted
    already_defined {
        args: (name: impl Display),
        msg: format!("The name '{name}' has already been defined."),
        help: None,
    }

    @formatted
    member_must_be_identifier {
        args: (),
        msg: "This should be the name of an object member, but it is not a legal identifier token.",
        help: None,
    }

    @formatted
    assign_lhs_must_be_identifier {
        args: (),
        msg: "Values can be assigned to variable names, but not to any other kind of expression.",
        help: None,
    }

    @formatted
    mutator_needs_member_identifier {
        args: (),
        msg: "This function call does not make sense; there should be some mutator method call here.",
        help: None,
    }

    @formatted
    param_expects_identifier {
        args: (),
        msg: "This should define the name of a parameter, but it is some other kind of expression.",
        help: None,
    }

    @formatted
    else_operator_without_if {
        args: (),
        msg: "There is no if to match this else.",
        help: None,
    }

    @formatted
    if_operator_without_else {
        args: (),
        msg: "This if operation does not have a matching else.",
        help: None,
    }

    @formatted
    else_statement_outside_if_block {
        args: (),
        msg: "Else statements only work inside an if block.",
        help: None,
    }

    @formatted
    else_statement_after_final {
        args: (),
        msg: "An if operation can only have one unconditional else.",
        help: None,
    }

    @formatted
    yield_inside_member_dispatch {
        args: (),
        msg: "Cannot yield inside an object constructor or module scope.",
        help: None,
    }

    @formatted
    object_member_redefinition {
        args: (),
        msg: "Objects may contain only definitions; assignments and actions are not allowed.",
        help: None,
    }

    @formatted
    module_member_redefinition {
        args: (),
        msg: "Modules may contain only definitions; assignments and actions are not allowed.",
        help: None,
    }

    @formatted
    function_redefinition {
        args: (name: impl Display),
        msg: format!("'{name}' is a function, not a variable, so its value cannot be changed."),
        help: None,
    }

    @formatted
    context_var_redefinition {
        args: (),
        msg: "This variable cannot be changed because it was defined outside the current function.",
        help: None,
    }

    @formatted
    constant_redefinition {
        args: (name: impl Display),
        msg: format!("'{name}' is a definition, not a variable, so its value cannot be changed."),
        help: None,
    }

    @formatted
    self_constant_redefinition {
        args: (),
        msg: "The self object is immutable inside this function; it can only be altered inside a method.",
        help: None,
    }

    @formatted
    import_redefinition {
        args: (name: impl Display),
        msg: format!("'{name}' is an import, not a variable, so its value cannot be changed."),
        help: None,
    }

    @formatted
    member_redefinition {
        args: (name: impl Display),
        msg: format!("The object member '{name}' has already been defined and cannot be changed."),
        help: None,
    }

    @formatted
    import_source_must_be_identifier {
        args: (),
        msg: "The source directory for this import must be an identifier.",
        help: None,
    }

    @formatted
    subscript_non_function {
        args: (name: impl Display),
        msg: format!("'{name}' is not a function, so it should not have an argument subscript."),
        help: None,
    }

    @formatted
    map_elements_must_be_pairs {
        args: (),
        msg: "Map elements must be key => value pairs.",
        help: None,
    }

    @formatted
    sync_inside_generator {
        args: (),
        msg: "Cannot sync inside a function which has already yielded.",
        help: None,
    }

    @formatted
    yield_inside_async_task {
        args: (),
        msg: "Cannot yield inside a function which has already synced.",
        help: None,
    }

    @formatted
    direct_member_reference {
        args: (name: impl Display),
        msg: format!("Refer to the object member '{name}' through \"self\" instead of using its name alone."),
        help: None,
    }
);
