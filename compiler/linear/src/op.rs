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

use crate::Addr;

use std::fmt;

/// The linear instruction codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Code {
    SelfRef,
    NumberLiteral,
    FloatLiteral,
    StringLiteral,
    SymbolLiteral,
    Parameter,
    Slot,
    Import,
    Repeat,
    LoopWhile,
    Assert,
    Chain,
    Call,
    Capture,
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Code::SelfRef => "self",
            Code::NumberLiteral => "number",
            Code::FloatLiteral => "float",
            Code::StringLiteral => "string",
            Code::SymbolLiteral => "symbol",
            Code::Parameter => "parameter",
            Code::Slot => "slot",
            Code::Import => "import",
            Code::Repeat => "repeat",
            Code::LoopWhile => "loop_while",
            Code::Assert => "assert",
            Code::Chain => "chain",
            Code::Call => "call",
            Code::Capture => "capture",
        };
        write!(f, "{name}")
    }
}

/// One three-address instruction: a destination, a code, and operands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Op {
    /// The register or other address the instruction defines.
    pub dest: Addr,
    /// The instruction code.
    pub code: Code,
    /// The primary operand, when the code takes one.
    pub value: Addr,
    /// The secondary operand, for two-operand codes.
    pub right: Addr,
    /// The argument list, for call and capture.
    pub args: Vec<Addr>,
}

impl Op {
    /// A one-operand instruction.
    pub fn unary(dest: Addr, code: Code, value: Addr) -> Self {
        Self { dest, code, value, right: Addr::Void, args: Vec::new() }
    }

    /// A two-operand instruction.
    pub fn binary(dest: Addr, code: Code, value: Addr, right: Addr) -> Self {
        Self { dest, code, value, right, args: Vec::new() }
    }

    /// A target-plus-arguments instruction, i.e. call or capture.
    pub fn targeted(dest: Addr, code: Code, value: Addr, args: Vec<Addr>) -> Self {
        Self { dest, code, value, right: Addr::Void, args }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} = {}", self.dest, self.code)?;
        if !self.value.is_void() {
            write!(f, " {}", self.value)?;
        }
        if !self.right.is_void() {
            write!(f, " {}", self.right)?;
        }
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}
