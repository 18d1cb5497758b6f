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

use radian_flowgraph::{NodeId, Pool};

use indexmap::IndexMap;
use std::fmt;

/// An enumeration of the different kinds of symbol binding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SymbolKind {
    /// Normal read/write symbol.
    Var,
    /// Read-only symbol definition.
    Def,
    /// Auto-invoke function reference.
    Function,
    /// Reference to another module.
    Import,
    /// Object member: illegal to use directly, reach it through `self`.
    Member,
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SymbolKind::Var => write!(f, "var"),
            SymbolKind::Def => write!(f, "def"),
            SymbolKind::Function => write!(f, "function"),
            SymbolKind::Import => write!(f, "import"),
            SymbolKind::Member => write!(f, "member"),
        }
    }
}

/// An entry for a name in the symbol table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VariableSymbol {
    /// The kind of binding.
    pub kind: SymbolKind,
    /// The graph node holding the binding's current value.
    pub value: NodeId,
}

/// The reason an update was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpdateError {
    Undefined,
    Constant,
    /// The constant was the implicit `self`: same refusal, friendlier
    /// diagnosis, since the user never wrote the definition down.
    SelfConstant,
    Function,
    Import,
    Member,
}

/// Maps name symbols to their bindings.
///
/// Symbol nodes are interned by the pool, so handle equality is string
/// equality and the handle itself serves as the key. Tables only search
/// their own items: capture from containing scopes must wrap values in
/// environment references, so resolution cannot be transparent.
#[derive(Clone, Debug, Default)]
pub struct SymbolTable {
    items: IndexMap<NodeId, VariableSymbol>,
}

impl SymbolTable {
    /// Creates a binding. The name must not already be bound here; scopes
    /// check their definition sets before inserting.
    pub fn insert(&mut self, name: NodeId, symbol: VariableSymbol) {
        self.items.insert(name, symbol);
    }

    /// Attempts to update the value of an existing binding. Bindings that
    /// do not accept updates refuse with the applicable error; bindings
    /// that do not exist refuse with `Undefined`, and the caller decides
    /// whether an outer scope can take the assignment instead.
    pub fn update(&mut self, pool: &Pool, name: NodeId, value: NodeId) -> Result<(), UpdateError> {
        let Some(found) = self.items.get_mut(&name) else {
            return Err(UpdateError::Undefined);
        };
        match found.kind {
            SymbolKind::Var => {
                found.value = value;
                Ok(())
            }
            // Special case: self inside a function is a def, but it is an
            // implicit parameter the user never sees, so give a more
            // specific error when the target happens to be named "self".
            SymbolKind::Def if pool.contents(name) == "self" => Err(UpdateError::SelfConstant),
            SymbolKind::Def => Err(UpdateError::Constant),
            SymbolKind::Function => Err(UpdateError::Function),
            SymbolKind::Import => Err(UpdateError::Import),
            SymbolKind::Member => Err(UpdateError::Member),
        }
    }

    /// Looks a name up in this table alone.
    pub fn lookup(&self, name: NodeId) -> Option<VariableSymbol> {
        self.items.get(&name).copied()
    }

    /// Forgets every binding. Used when a scope divides into a new
    /// segment: the values live on in the segment snapshot.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
