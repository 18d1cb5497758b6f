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

use crate::source_map::SourceMap;

use fxhash::FxBuildHasher;
use indexmap::IndexSet;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{cell::RefCell, fmt, num::NonZeroU32};

/// A helper for `symbols!` defining the next symbol index.
macro_rules! consts {
    ($next:expr, ) => {};
    ($next:expr, $name:ident $(: $string:literal)?, $($rest:ident $(: $rest_string:literal)?,)*) => {
        #[allow(non_upper_case_globals)]
        pub const $name: $crate::symbol::Symbol = $crate::symbol::Symbol::new($next);
        consts!($next + 1, $($rest $(: $rest_string)?,)*);
    };
}

/// A helper for `symbols!` listing the string form of each symbol.
macro_rules! strings {
    ($name:ident $(: $string:literal)?) => {
        strings!(@coalesce $name $(: $string)?)
    };
    (@coalesce $name:ident : $string:literal) => {
        $string
    };
    (@coalesce $name:ident) => {
        stringify!($name)
    };
}

/// Declares the set of pre-interned symbols.
/// Each entry is either a bare identifier, interned as its own spelling,
/// or `identifier: "string"` when the spelling is not a legal Rust identifier.
macro_rules! symbols {
    ($($name:ident $(: $string:literal)?,)*) => {
        /// The symbols that are pre-interned in a fresh session.
        const PRE_INTERNED: &[&str] = &[$(strings!($name $(: $string)?)),*];

        /// All the keywords and well-known names, pre-interned so they can be
        /// referred to as constants throughout the compiler.
        pub mod sym {
            consts!(1u32, $($name $(: $string)?,)*);
        }
    };
}

symbols! {
    // Statement and operator keywords.
    and,
    As: "as",
    assert,
    capture,
    debug_trace,
    def,
    each,
    Else: "else",
    end,
    False: "false",
    For: "for",
    from,
    function,
    has,
    If: "if",
    import,
    In: "in",
    invoke,
    method,
    module,
    Mod: "mod",
    not,
    object,
    or,
    sync,
    throw,
    True: "true",
    var,
    Where: "where",
    While: "while",
    xor,
    Yield: "yield",

    // Well-known names the analyzer defines or looks up.
    argv,
    core,
    io,
    radian,
    result,
    SelfLower: "self",
}

/// An interned string.
///
/// Represented as an index, with all operations going through the session
/// interner. Copy and comparison are therefore cheap; the spelling is only
/// consulted for display.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(NonZeroU32);

impl Symbol {
    /// Used in `symbols!`; always valid since the argument is `index + 1`.
    const fn new(index: u32) -> Self {
        Self(match NonZeroU32::new(index) {
            Some(nz) => nz,
            None => unreachable!(),
        })
    }

    /// Maps a string to its interned representation.
    pub fn intern(string: &str) -> Self {
        with_session_globals(|session_globals| session_globals.symbol_interner.intern(string))
    }

    /// Convert to effectively a `&'static str`, injected into the closure.
    pub fn with<R>(self, with: impl FnOnce(&str) -> R) -> R {
        with_session_globals(|session_globals| session_globals.symbol_interner.with(self, with))
    }

    /// The numeric identifier of the symbol.
    pub const fn as_u32(self) -> u32 {
        self.0.get()
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.with(|s| fmt::Debug::fmt(s, f))
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.with(|s| fmt::Display::fmt(s, f))
    }
}

impl Serialize for Symbol {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.with(|s| serializer.serialize_str(s))
    }
}

impl<'de> Deserialize<'de> for Symbol {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Symbol::intern(&String::deserialize(deserializer)?))
    }
}

/// All the strings interned in a session, addressed by `Symbol` index.
#[derive(Default)]
pub struct Interner {
    inner: RefCell<IndexSet<String, FxBuildHasher>>,
}

impl Interner {
    /// Creates the interner with the symbols predefined by `symbols!`.
    fn prefilled() -> Self {
        let inner = PRE_INTERNED.iter().map(|s| s.to_string()).collect();
        Self { inner: RefCell::new(inner) }
    }

    /// Interns `string`, returning its symbol.
    fn intern(&self, string: &str) -> Symbol {
        let mut inner = self.inner.borrow_mut();
        if let Some(index) = inner.get_index_of(string) {
            return Symbol::new(index as u32 + 1);
        }
        let (index, _) = inner.insert_full(string.to_string());
        Symbol::new(index as u32 + 1)
    }

    /// Runs `with` on the spelling of `symbol`.
    fn with<R>(&self, symbol: Symbol, with: impl FnOnce(&str) -> R) -> R {
        with(self.inner.borrow().get_index(symbol.as_u32() as usize - 1).expect("interned symbol"))
    }
}

/// Per-session global variables: the symbol interner and the source map.
/// This struct is stored in thread-local storage in such a way that it is
/// accessible without any kind of handle to all threads within the
/// compilation session, but can not be accessed outside the session.
pub struct SessionGlobals {
    /// The interner for `Symbol`s used in the session.
    symbol_interner: Interner,
    /// The source map used in the session.
    pub source_map: SourceMap,
}

impl Default for SessionGlobals {
    fn default() -> Self {
        Self { symbol_interner: Interner::prefilled(), source_map: SourceMap::default() }
    }
}

scoped_tls::scoped_thread_local!(static SESSION_GLOBALS: SessionGlobals);

/// Creates the session globals and then runs the closure `f`.
pub fn create_session_if_not_set_then<R>(f: impl FnOnce(&SessionGlobals) -> R) -> R {
    if SESSION_GLOBALS.is_set() {
        SESSION_GLOBALS.with(f)
    } else {
        let session_globals = SessionGlobals::default();
        SESSION_GLOBALS.set(&session_globals, || SESSION_GLOBALS.with(f))
    }
}

/// Gives access to the current session globals.
///
/// Panics if a session was not created.
/// The session should be created by using `create_session_if_not_set_then`.
pub fn with_session_globals<R>(f: impl FnOnce(&SessionGlobals) -> R) -> R {
    SESSION_GLOBALS.with(f)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_is_stable() {
        create_session_if_not_set_then(|_| {
            let a = Symbol::intern("widget");
            let b = Symbol::intern("widget");
            assert_eq!(a, b);
            assert_eq!(a.to_string(), "widget");
        });
    }

    #[test]
    fn preinterned_spellings() {
        create_session_if_not_set_then(|_| {
            assert_eq!(sym::If, Symbol::intern("if"));
            assert_eq!(sym::While, Symbol::intern("while"));
            assert_eq!(sym::SelfLower, Symbol::intern("self"));
            assert_eq!(sym::assert.to_string(), "assert");
        });
    }
}
