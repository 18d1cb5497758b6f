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

//! Closure scopes: functions, methods, objects, lambdas, and the roots.

use super::Analyzer;
use crate::{ClosureScope, ClosureSort, MemberDispatch, Scope, ScopeKind, SymbolKind};

use radian_ast::{
    Expression, FunctionDeclaration, MethodDeclaration, Node, ObjectDeclaration,
};
use radian_errors::SemanticError;
use radian_flowgraph::NodeId;
use radian_span::Span;

impl Analyzer<'_> {
    /// `function name(params): ...` or `function name(params) = expr`.
    pub(crate) fn enter_function(&mut self, declaration: &FunctionDeclaration) {
        let name = declaration.name.name.to_string();
        let sym = self.pool.symbol(&name);
        let nil = self.pool.nil();
        self.scopes.push(Scope::new(ScopeKind::Closure(ClosureScope::new(
            ClosureSort::Function { name, sym, name_span: declaration.name.span },
            nil,
            declaration.span,
        ))));

        // Bind the function's own name to self, in case it (or one of its
        // nested items) wants to recurse.
        let top = self.top();
        let self_ref = self.pool.self_ref();
        self.define(top, sym, self_ref, SymbolKind::Function, declaration.name.span);

        self.enter_function_body(declaration.parameter.as_ref(), declaration.expression.as_ref(), declaration.span);

        // A single-line function is complete already.
        if !declaration.is_block_begin() {
            self.exit_function_scope(declaration.span);
        }
    }

    /// The shared function-entry work: parameters, the assertion chain
    /// head, and the result variable the body will reassign.
    fn enter_function_body(&mut self, parameter: Option<&Expression>, expression: Option<&Expression>, span: Span) {
        self.define_parameters(parameter, span);

        // The assertion chain head may be any non-exceptional value, but
        // it is traditionally true, since that is what every successful
        // assertion check produces.
        let top = self.top();
        let assert_sym = self.pool.sym_assert();
        let truth = self.pool.true_value();
        self.define(top, assert_sym, truth, SymbolKind::Var, span);

        let value = match expression {
            Some(expression) => self.eval(expression),
            None => self.pool.undefined(),
        };
        let result_sym = self.pool.sym_result();
        self.define(top, result_sym, value, SymbolKind::Var, span);
    }

    /// Closes a function scope: chains the assertions ahead of the result
    /// and defines the finished function in the context.
    pub(crate) fn exit_function_scope(&mut self, _span: Span) {
        let value = self.exit_function_value();
        let scope = self.pop_scope();
        let ScopeKind::Closure(closure) = scope.kind else { unreachable!() };
        let ClosureSort::Function { sym, name_span, .. } = closure.sort else { unreachable!() };
        let top = self.top();
        self.define(top, sym, value, SymbolKind::Function, name_span);
    }

    /// The function's output: its result variable gated by its assertion
    /// chain, captured as a closure.
    fn exit_function_value(&mut self) -> NodeId {
        let top = self.top();
        let result_sym = self.pool.sym_result();
        let nil = self.pool.nil();
        let result = self.resolve(top, result_sym).map_or(nil, |s| s.value);
        let assert_sym = self.pool.sym_assert();
        let chain = self.resolve(top, assert_sym).map_or(nil, |s| s.value);
        let result = self.pool.chain(chain, result);
        self.closure_capture(result)
    }

    /// `method name(params): ...`
    pub(crate) fn enter_method(&mut self, declaration: &MethodDeclaration) {
        let name = declaration.name.name.to_string();
        let sym = self.pool.symbol(&name);
        let nil = self.pool.nil();
        self.scopes.push(Scope::new(ScopeKind::Closure(ClosureScope::new(
            ClosureSort::Method { name, sym, name_span: declaration.name.span },
            nil,
            declaration.span,
        ))));
        self.define_parameters(declaration.parameter.as_ref(), declaration.span);
        let top = self.top();
        let assert_sym = self.pool.sym_assert();
        let truth = self.pool.true_value();
        self.define(top, assert_sym, truth, SymbolKind::Var, declaration.span);
    }

    /// A method returns its (possibly mutated) self.
    pub(crate) fn exit_method_scope(&mut self, _span: Span) {
        let top = self.top();
        let self_sym = self.pool.sym_self();
        let nil = self.pool.nil();
        let result = self.resolve(top, self_sym).map_or(nil, |s| s.value);
        let assert_sym = self.pool.sym_assert();
        let chain = self.resolve(top, assert_sym).map_or(nil, |s| s.value);
        let result = self.pool.chain(chain, result);
        let function = self.closure_capture(result);

        let scope = self.pop_scope();
        let ScopeKind::Closure(closure) = scope.kind else { unreachable!() };
        let ClosureSort::Method { sym, name_span, .. } = closure.sort else { unreachable!() };
        let top = self.top();
        self.define(top, sym, function, SymbolKind::Function, name_span);
    }

    /// `object name(params) [from prototype]: ...`
    pub(crate) fn enter_object(&mut self, declaration: &ObjectDeclaration) {
        let name = declaration.name.name.to_string();
        let sym = self.pool.symbol(&name);
        let members = MemberDispatch::new(&mut self.pool);
        let nil = self.pool.nil();
        self.scopes.push(Scope::new(ScopeKind::Closure(ClosureScope::new(
            ClosureSort::Object {
                name,
                sym,
                name_span: declaration.name.span,
                members,
                declarations_become_members: false,
            },
            nil,
            declaration.span,
        ))));

        // Declared parameters bind before memberization begins.
        self.define_parameters(declaration.parameter.as_ref(), declaration.span);

        // With a prototype, the dispatcher starts from the prototype's
        // member map instead of a blank one.
        if let Some(prototype) = &declaration.prototype {
            let value = self.eval(prototype);
            let top = self.top();
            if let ScopeKind::Closure(closure) = &mut self.scopes[top].kind {
                if let ClosureSort::Object { members, .. } = &mut closure.sort {
                    members.set_prototype(&mut self.pool, value);
                }
            }
        }

        // Anything declared from here on becomes an object member.
        let top = self.top();
        if let ScopeKind::Closure(closure) = &mut self.scopes[top].kind {
            if let ClosureSort::Object { declarations_become_members, .. } = &mut closure.sort {
                *declarations_become_members = true;
            }
        }
    }

    /// Wraps the collected members into a dispatch closure and defines the
    /// constructor in the context.
    pub(crate) fn exit_object_scope(&mut self, _span: Span) {
        let top = self.top();
        let member_result = {
            let ScopeKind::Closure(closure) = &self.scopes[top].kind else { unreachable!() };
            let ClosureSort::Object { members, .. } = &closure.sort else { unreachable!() };
            members.result(&mut self.pool)
        };
        let result = self.closure_capture(member_result);

        let scope = self.pop_scope();
        let ScopeKind::Closure(closure) = scope.kind else { unreachable!() };
        let ClosureSort::Object { sym, name_span, .. } = closure.sort else { unreachable!() };
        let top = self.top();
        self.define(top, sym, result, SymbolKind::Function, name_span);
    }

    /// Evaluates an expression as a nullary or parameterized anonymous
    /// function, capturing the current values of any context symbols it
    /// uses. This drives `capture(...)`, comprehension clauses, and the
    /// thunks conditional evaluation needs.
    pub(crate) fn capture_lambda(&mut self, parameter: Option<&Expression>, body: &Expression) -> NodeId {
        let nil = self.pool.nil();
        self.scopes.push(Scope::new(ScopeKind::Closure(ClosureScope::new(
            ClosureSort::Lambda,
            nil,
            body.span(),
        ))));
        self.enter_function_body(parameter, Some(body), body.span());
        let value = self.exit_function_value();
        self.pop_scope();
        value
    }

    /// Evaluates an expression lazily by capturing it as a nullary
    /// function, so whether it runs at all can be decided at run time.
    pub(crate) fn generate_thunk(&mut self, expression: &Expression) -> NodeId {
        self.capture_lambda(None, expression)
    }

    /// Registers parameter variables, including the implicit self that
    /// member dispatchers hand their function-like blocks.
    fn define_parameters(&mut self, parameter: Option<&Expression>, span: Span) {
        let context = self.top() - 1;
        if self.scopes[context].needs_implicit_self() {
            // The caller always passes the self value first, so it must be
            // defined before the explicit parameters.
            let self_name = match &self.scopes[context].kind {
                ScopeKind::Module(module) => module.self_sym,
                _ => self.pool.sym_self(),
            };
            let kind = self.self_parameter_kind();
            self.define_one_parameter(self_name, kind, span);
        }
        if let Some(parameter) = parameter {
            self.process_param_list(parameter);
        }
    }

    /// Methods may mutate their self; everything else sees it read-only.
    fn self_parameter_kind(&self) -> SymbolKind {
        let top = self.top();
        match &self.scopes[top].kind {
            ScopeKind::Closure(closure) if matches!(closure.sort, ClosureSort::Method { .. }) => SymbolKind::Var,
            _ => SymbolKind::Def,
        }
    }

    fn define_one_parameter(&mut self, symbol: NodeId, kind: SymbolKind, span: Span) {
        let top = self.top();
        let index = {
            let ScopeKind::Closure(closure) = &mut self.scopes[top].kind else {
                unreachable!("parameters only exist on closures")
            };
            let index = closure.param_count;
            closure.param_count += 1;
            index
        };
        let value = self.pool.parameter(index);
        self.define(top, symbol, value, kind, span);
    }

    /// The parameter clause is empty, an identifier, or a tuple of
    /// identifiers.
    fn process_param_list(&mut self, parameter: &Expression) {
        match parameter {
            Expression::Binary(bin) if parameter.is_tuple_op() => {
                self.process_param_list(&bin.left);
                self.process_param_list(&bin.right);
            }
            Expression::Identifier(ident) => {
                let sym = self.pool.symbol(&ident.name.to_string());
                self.define_one_parameter(sym, SymbolKind::Var, ident.span);
            }
            other => {
                self.report(SemanticError::param_expects_identifier(other.span()));
            }
        }
    }

    /// Wraps the result in the closure's function node, attaching the
    /// captured context values so the instance's slots can be populated.
    pub(crate) fn closure_capture(&mut self, result_value: NodeId) -> NodeId {
        let top = self.top();
        let result_value = if self.scopes[top].is_segmented() {
            self.package_scope_result(top, result_value)
        } else {
            result_value
        };
        let name = self.fully_qualified_name(top);
        let ScopeKind::Closure(closure) = &self.scopes[top].kind else {
            unreachable!("only closures capture")
        };
        let param_count = closure.param_count;
        let capture_count = closure.capture_count;
        let capture_list = closure.capture_list;
        let function = self.pool.function_named(result_value, param_count, &name);
        if capture_count > 0 {
            self.pool.capture_n(function, capture_list)
        } else {
            function
        }
    }

    /// Finishes the root scope, emitting the unit's entry function.
    pub fn finish(&mut self) {
        debug_assert_eq!(self.scopes.len(), 1, "the balancer closes every block");
        while self.scopes.len() > 1 {
            // Defensive recovery for unbalanced input: close what remains.
            self.exit_scope(Span::dummy());
        }
        match &self.scopes[0].kind {
            // The program result code is zero unless it explicitly exits
            // earlier; the assert chain gates it, and the segment chain of
            // top-level syncs wraps it into the main task.
            ScopeKind::Program => {
                let zero = self.pool.number(0);
                let assert_sym = self.pool.sym_assert();
                let nil = self.pool.nil();
                let chain = self.resolve(0, assert_sym).map_or(nil, |s| s.value);
                let result = self.pool.chain(chain, zero);
                let result = self.package_scope_result(0, result);
                self.pool.function(result, 2);
            }
            ScopeKind::Module(_) => {
                let (object, name) = {
                    let ScopeKind::Module(module) = &self.scopes[0].kind else { unreachable!() };
                    (module.members.result(&mut self.pool), module.name.clone())
                };
                self.pool.function_named(object, 0, &format!("module_{name}"));
            }
            _ => unreachable!("the bottom scope is a root"),
        }
    }
}
