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

use super::*;

/// A line holding no statement. Blank lines mean nothing; the balancer also
/// substitutes one for each unmatched `end` it discards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlankLineStatement {
    /// The indent level of the line.
    pub indent: u32,
    /// The span of the line.
    pub span: Span,
}

simple_node_impl!(BlankLineStatement);

impl fmt::Display for BlankLineStatement {
    fn fmt(&self, _f: &mut fmt::Formatter) -> fmt::Result {
        Ok(())
    }
}

/// An `end` statement closing the current block, e.g. `end if` or a bare
/// `end` which matches any block. The balancer synthesizes anonymous ones
/// for blocks left open at end of input.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockEndStatement {
    /// The named block being closed, if the program named one.
    pub name: Option<Identifier>,
    /// The indent level of the statement's line.
    pub indent: u32,
    /// The span of the statement.
    pub span: Span,
}

simple_node_impl!(BlockEndStatement);

impl BlockEndStatement {
    /// Would this statement close a block with the given name?
    pub fn ends_this_block(&self, block: Symbol) -> bool {
        match self.name {
            Some(name) => name.name == block,
            None => true,
        }
    }
}

impl fmt::Display for BlockEndStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.name {
            Some(name) => write!(f, "end {name}"),
            None => write!(f, "end"),
        }
    }
}
