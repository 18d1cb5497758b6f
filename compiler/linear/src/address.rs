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

use std::fmt;

/// An operand of a three-address instruction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Addr {
    /// No operand; also the result of functions with no body to speak of.
    #[default]
    Void,
    /// Inline data, e.g. a literal's text.
    Data(String),
    /// A numbered virtual register.
    Register(u32),
    /// A link to another function, by its globally unique name.
    Link(String),
    /// A small constant index, e.g. a parameter or slot number.
    Index(u32),
    /// A runtime primitive, by link name.
    Intrinsic(String),
}

impl Addr {
    pub fn is_void(&self) -> bool {
        matches!(self, Addr::Void)
    }
}

impl fmt::Display for Addr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Addr::Void => write!(f, "_"),
            Addr::Data(data) => write!(f, "{data:?}"),
            Addr::Register(r) => write!(f, "%{r}"),
            Addr::Link(name) => write!(f, "@{name}"),
            Addr::Index(i) => write!(f, "{i}"),
            Addr::Intrinsic(name) => write!(f, "!{name}"),
        }
    }
}
