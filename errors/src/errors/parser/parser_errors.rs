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
    /// ParserError enum that represents all the errors for the `radian-parser` crate.
    ParserError,
    code_mask: 2000i32,
    code_prefix: "PAR",

    @formatted
    bad_token {
        args: (),
        msg: "Malformed input character.",
        help: None,
    }

    @formatted
    unknown_token {
        args: (actual: impl Display),
        msg: format!("Unexpected character '{actual}'."),
        help: None,
    }

    @formatted
    unexpected_eof {
        args: (),
        msg: "Wait, we're not done yet! Did not expect the file to end already.",
        help: None,
    }

    @formatted
    unexpected_eol {
        args: (),
        msg: "The statement is not finished yet, which makes this linebreak hard to explain.",
        help: None,
    }

    @formatted
    unknown_line_end {
        args: (),
        msg: "Expected a line break here.",
        help: None,
    }

    @formatted
    unknown_declaration_value {
        args: (),
        msg: "This token does not make sense; only a colon or an equals-sign can go here.",
        help: None,
    }

    @formatted
    statement_expects_identifier {
        args: (),
        msg: "This is not a legal identifier token.",
        help: None,
    }

    @formatted
    declaration_expects_identifier {
        args: (),
        msg: "The declared name should go here, but this is not a legal identifier token.",
        help: None,
    }

    @formatted
    end_expects_identifier {
        args: (),
        msg: "Expected a block name here.",
        help: None,
    }

    @formatted
    unknown_expression_token {
        args: (actual: impl Display),
        msg: format!("The symbol '{actual}' does not stand for any value and does not make sense here."),
        help: None,
    }

    @formatted
    empty_subexpression {
        args: (),
        msg: "Empty subexpression is meaningless.",
        help: None,
    }

    @formatted
    empty_list {
        args: (),
        msg: "Empty list cannot be constructed.",
        help: None,
    }

    @formatted
    empty_map {
        args: (),
        msg: "Empty map cannot be constructed.",
        help: None,
    }

    @formatted
    missing_left_paren {
        args: (),
        msg: "Missing left parenthesis.",
        help: None,
    }

    @formatted
    missing_right_paren {
        args: (),
        msg: "Missing right parenthesis.",
        help: None,
    }

    @formatted
    missing_right_bracket {
        args: (),
        msg: "Missing right bracket.",
        help: None,
    }

    @formatted
    missing_right_brace {
        args: (),
        msg: "Missing right brace.",
        help: None,
    }

    @formatted
    unmatched_begin_block {
        args: (),
        msg: "This block does not have a matching end statement.",
        help: None,
    }

    @formatted
    unmatched_end_block {
        args: (),
        msg: "This end statement does not match the current open block.",
        help: None,
    }

    @formatted
    insufficient_indentation {
        args: (),
        msg: "This statement is not indented enough to match its block.",
        help: None,
    }

    @formatted
    excessive_indentation {
        args: (),
        msg: "This statement is indented too far for its block.",
        help: None,
    }

    @formatted
    for_loop_expects_in_keyword {
        args: (),
        msg: "The for statement expects to find the keyword 'in' here.",
        help: None,
    }

    @formatted
    for_loop_expects_block_begin {
        args: (),
        msg: "The for statement always begins a block, but this statement does not end in a colon.",
        help: None,
    }

    @formatted
    mutator_inside_expression {
        args: (),
        msg: "Can't modify an object as a side-effect of an expression; try this as a statement instead.",
        help: None,
    }
);
