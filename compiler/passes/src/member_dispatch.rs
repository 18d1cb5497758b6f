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

use crate::SymbolKind;

use radian_flowgraph::{NodeId, Pool};

/// Collects an object's members and synthesizes its dispatch function.
///
/// An object is the closure of a function which looks up a member by its
/// selector symbol. Var members additionally get a setter bound to the
/// mangled `name=` symbol, which cracks the object open through the
/// wildcard selector, alters the member map, and wraps it back up.
#[derive(Debug)]
pub struct MemberDispatch {
    /// The member map expression built up so far.
    members: NodeId,
    /// Whether any member has been defined yet; prototypes can only be
    /// installed before that.
    any_members_defined: bool,
}

impl MemberDispatch {
    pub fn new(pool: &mut Pool) -> Self {
        Self { members: pool.map_blank(), any_members_defined: false }
    }

    /// Replaces the blank starting map with an existing object's member
    /// map. This is how inheritance works: start with the prototype's
    /// members, then add new ones and possibly override old ones.
    pub fn set_prototype(&mut self, pool: &mut Pool, prototype: NodeId) {
        // After members are defined there is no way to rewind to the
        // original map, so the prototype must come first.
        assert!(!self.any_members_defined, "prototype installed after members");
        let wildcard = pool.sym_wildcard();
        self.members = pool.call1(prototype, wildcard);
    }

    /// Some symbols can be turned into members and others cannot. It is
    /// illegal to define a non-memberizable symbol, so check first.
    pub fn is_memberizable(kind: SymbolKind) -> bool {
        matches!(kind, SymbolKind::Var | SymbolKind::Def | SymbolKind::Function)
    }

    /// Inserts a new entry into the member map. Functions stand for
    /// themselves; consts and vars are wrapped in a getter so that
    /// everything the map returns conforms to the object protocol; vars
    /// additionally get a setter method.
    ///
    /// This scheme assumes definitions in a member block are never
    /// altered, which holds for both objects and modules.
    pub fn define(&mut self, pool: &mut Pool, sym: NodeId, value: NodeId, kind: SymbolKind) {
        assert!(Self::is_memberizable(kind));
        self.any_members_defined = true;

        if kind == SymbolKind::Var {
            let setter = self.custom_setter(pool, sym);
            let setter_sym = pool.setter_symbol_node(sym);
            self.insert(pool, setter_sym, setter);
        }
        let value = match kind {
            SymbolKind::Var | SymbolKind::Def => self.wrap_getter(pool, value),
            _ => value,
        };
        self.insert(pool, sym, value);
    }

    fn insert(&mut self, pool: &mut Pool, key: NodeId, value: NodeId) {
        let insert_sym = pool.sym_insert();
        let inserter = pool.call1(self.members, insert_sym);
        self.members = pool.call3(inserter, self.members, key, value);
    }

    /// The finished object: a capture of the dispatch function over the
    /// member map.
    pub fn result(&self, pool: &mut Pool) -> NodeId {
        Self::wrap_object(pool, self.members)
    }

    fn wrap_object(pool: &mut Pool, members: NodeId) -> NodeId {
        let function = Self::object_function(pool);
        pool.capture1(function, members)
    }

    /// The dispatch function itself, synthesized at most once per unit.
    ///
    /// It looks its parameter up in the member map captured as slot 0,
    /// except that the wildcard selector returns the raw map; that is how
    /// setters open the object up for rebuild.
    fn object_function(pool: &mut Pool) -> NodeId {
        const KEY: &str = "~object";
        if let Some(out) = pool.pad_lookup(KEY) {
            return out;
        }
        let selector = pool.parameter(0);
        let members = pool.slot(0);
        let lookup_sym = pool.sym_lookup();
        let lookup = pool.call1(members, lookup_sym);
        let param0 = pool.parameter(0);
        let extractor = pool.function_named(param0, 2, "~object.~extract");
        let wildcard = pool.sym_wildcard();
        let relation = pool.compare(selector, wildcard);
        let actor = pool.call3(relation, lookup, extractor, lookup);
        let member = pool.call2(actor, members, selector);
        let out = pool.function_named(member, 1, KEY);
        pool.pad_store(KEY, out);
        out
    }

    /// The generic member-assignment function: opens the object through
    /// the wildcard, assigns into the map, and wraps up a new object.
    /// Supports the per-symbol setters; never exposed directly.
    fn standard_setter(pool: &mut Pool) -> NodeId {
        const KEY: &str = "~object.~assign";
        if let Some(out) = pool.pad_lookup(KEY) {
            return out;
        }
        let this = pool.parameter(0);
        let sym = pool.parameter(1);
        let new_value = pool.parameter(2);
        let wrapper = Self::wrap_getter_impl(pool, new_value);

        let wildcard = pool.sym_wildcard();
        let old_tree = pool.call1(this, wildcard);
        let assign_sym = pool.sym_assign();
        let setter = pool.call1(old_tree, assign_sym);

        let new_tree = pool.call3(setter, old_tree, sym, wrapper);
        let new_object = Self::wrap_object(pool, new_tree);

        let out = pool.function_named(new_object, 3, KEY);
        pool.pad_store(KEY, out);
        out
    }

    /// The setter the object returns for one specific symbol: the
    /// standard setter with the symbol baked in.
    fn custom_setter(&self, pool: &mut Pool, sym: NodeId) -> NodeId {
        let this = pool.parameter(0);
        let new_value = pool.parameter(1);
        let setter = Self::standard_setter(pool);
        let result = pool.call3(setter, this, sym, new_value);
        let name = format!("~object.~assign.{}", pool.contents(sym));
        pool.function_named(result, 2, &name)
    }

    /// Wraps a plain value in a getter function, so that any member
    /// called as a function yields its value.
    fn wrap_getter(&self, pool: &mut Pool, value: NodeId) -> NodeId {
        Self::wrap_getter_impl(pool, value)
    }

    fn wrap_getter_impl(pool: &mut Pool, value: NodeId) -> NodeId {
        let slot0 = pool.slot(0);
        let getter = pool.function_named(slot0, 1, "~object.~value_wrapper");
        pool.capture1(getter, value)
    }
}
