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

//! Lowering of expressions into graph nodes.

use super::Analyzer;
use crate::{SegmentType, SymbolKind};

use radian_ast::{
    BinaryExpression, BinaryOperation, Expression, Identifier, LiteralVariant, Node, UnaryOperation,
};
use radian_errors::{RuntimeError, SemanticError};
use radian_flowgraph::NodeId;

impl Analyzer<'_> {
    /// Evaluates an expression in the current scope, dividing the scope
    /// around any sync subexpressions first.
    pub(crate) fn eval(&mut self, expression: &Expression) -> NodeId {
        self.process_syncs(expression);
        self.eval_expr(expression)
    }

    /// Before diving into an expression graph, extract and process every
    /// sync operation. Each one implies a division of execution, so they
    /// must all be handled before the overall expression is evaluated.
    /// Left-to-right collection order matches evaluation order, which the
    /// statement analyzer is trusted to preserve.
    fn process_syncs(&mut self, expression: &Expression) {
        let mut syncs = Vec::new();
        expression.collect_syncs(&mut syncs);
        for sync in syncs {
            let value = match &sync.expression {
                Some(inner) => self.eval_expr(inner),
                None => self.pool.nil(),
            };
            // Collapse the assertions around the value before syncing, or
            // we might inadvertently deliver an invalid value.
            let chain = self.assert_chain(sync.span);
            let value = self.pool.chain(chain, value);
            self.push_segment(self.top(), value, SegmentType::Sync, sync.span);
        }
    }

    /// The current value of the scope's assertion chain.
    pub(crate) fn assert_chain(&mut self, span: radian_span::Span) -> NodeId {
        let top = self.top();
        let assert_sym = self.pool.sym_assert();
        match self.resolve(top, assert_sym) {
            Some(symbol) => symbol.value,
            None => {
                // No chain here means assertions make no sense in this
                // scope at all, e.g. directly inside an object block.
                self.report(SemanticError::undefined("assert", span));
                self.pool.true_value()
            }
        }
    }

    /// The value of an expression, resolving identifiers in the current
    /// scope.
    pub(crate) fn eval_expr(&mut self, expression: &Expression) -> NodeId {
        match expression {
            Expression::Identifier(ident) => self.eval_identifier(ident),
            Expression::Call(call) => {
                let sym = self.pool.symbol(&call.function.name.to_string());
                let top = self.top();
                match self.resolve(top, sym) {
                    None => {
                        self.report(SemanticError::undefined(call.function.name, call.function.span));
                        self.pool.nil()
                    }
                    Some(symbol) if symbol.kind == SymbolKind::Function => {
                        let nil = self.pool.nil();
                        let args = self.eval_arguments(&call.arguments, nil);
                        self.pool.call_n(symbol.value, args)
                    }
                    Some(_) => {
                        self.report(SemanticError::subscript_non_function(call.function.name, call.function.span));
                        self.pool.nil()
                    }
                }
            }
            Expression::Literal(literal) => match &literal.variant {
                LiteralVariant::Boolean(true) => self.pool.true_value(),
                LiteralVariant::Boolean(false) => self.pool.false_value(),
                LiteralVariant::Float(_) => {
                    let text = literal.to_decimal_string();
                    self.pool.float(&text)
                }
                LiteralVariant::String(text) => self.pool.string(text),
                LiteralVariant::Symbol(text) => self.pool.symbol(text),
                // Integer, real, hex, oct, bin: all exact numbers, with
                // the radix forms normalized to decimal.
                _ => {
                    let text = literal.to_decimal_string();
                    self.pool.number_str(&text)
                }
            },
            // The parser will have reported an error already; the dummy
            // taints the pool so that claim gets checked.
            Expression::Dummy(_) => self.pool.dummy(),
            Expression::Binary(binary) => self.eval_binary(binary),
            Expression::Unary(unary) => {
                match unary.op {
                    // Negation is zero minus the operand.
                    UnaryOperation::Negate => {
                        let zero = self.pool.number_str("0");
                        let value = self.eval_expr(&unary.receiver);
                        let subtract = self.pool.sym_subtract();
                        let method = self.pool.call1(zero, subtract);
                        self.pool.call2(method, zero, value)
                    }
                    UnaryOperation::Not => {
                        let value = self.eval_expr(&unary.receiver);
                        self.pool.not(value)
                    }
                }
            }
            Expression::Paren(paren) => self.eval_expr(&paren.inner),
            Expression::Member(member) => {
                // Member reference is sugar for method invocation: invoke
                // the object with the member symbol to get a method
                // reference, then invoke that with the object as the self
                // argument plus any subscripted arguments.
                let base = self.eval_expr(&member.base);
                let sym = self.pool.symbol(&member.name.name.to_string());
                let mut args = self.pool.args1(base);
                if let Some(arguments) = &member.arguments {
                    args = self.eval_arguments(arguments, args);
                }
                let method = self.pool.call1(base, sym);
                self.pool.call_n(method, args)
            }
            Expression::Lookup(lookup) => {
                let base = self.eval_expr(&lookup.base);
                let key = self.eval_expr(&lookup.index);
                let lookup_sym = self.pool.sym_lookup();
                let method = self.pool.call1(base, lookup_sym);
                self.pool.call2(method, base, key)
            }
            // Invoke a method reference explicitly; the same operation the
            // member-reference operator performs implicitly.
            Expression::Invoke(invoke) => {
                let callee = self.eval_expr(&invoke.callee);
                let nil = self.pool.nil();
                let args = match &invoke.arguments {
                    Some(arguments) => {
                        let mut list = nil;
                        for element in arguments.unpack_tuple() {
                            let value = self.eval_expr(element);
                            list = self.pool.args_append(list, value);
                        }
                        list
                    }
                    None => nil,
                };
                self.pool.call_n(callee, args)
            }
            Expression::Lambda(lambda) => self.capture_lambda(lambda.parameter.as_deref(), &lambda.body),
            Expression::Throw(throw) => {
                let value = self.eval_expr(&throw.expression);
                self.pool.throw(value)
            }
            Expression::List(list) => {
                // Group the values into an ordered, indexed container.
                let mut arg = self.eval_expr(&list.items);
                if !list.items.is_tuple_op() {
                    arg = self.pool.tuple1(arg);
                }
                self.pool.list(arg)
            }
            Expression::Map(map) => self.eval_map(map),
            Expression::Comprehension(each) => self.eval_comprehension(each),
            // Syncs were handled by the pre-pass; the value delivered by
            // the controlling process arrives as parameter zero of the
            // segment we are now in.
            Expression::Sync(_) => self.pool.parameter(0),
        }
    }

    /// A bare identifier: a simple variable reference, or the invocation
    /// of a function which accepts no parameters.
    pub(crate) fn eval_identifier(&mut self, ident: &Identifier) -> NodeId {
        let sym = self.pool.symbol(&ident.name.to_string());
        let top = self.top();
        match self.resolve(top, sym) {
            None => {
                self.report(SemanticError::undefined(ident.name, ident.span));
                self.pool.nil()
            }
            // Naming a function means evaluating it.
            Some(symbol) if symbol.kind == SymbolKind::Function => self.pool.call0(symbol.value),
            // Members must be reached through self; the kind exists so
            // this error can be raised.
            Some(symbol) if symbol.kind == SymbolKind::Member => {
                self.report(SemanticError::direct_member_reference(ident.name, ident.span));
                self.pool.nil()
            }
            Some(symbol) => symbol.value,
        }
    }

    /// Evaluates call arguments left to right onto an argument chain.
    pub(crate) fn eval_arguments(&mut self, arguments: &[Expression], prefix: NodeId) -> NodeId {
        let mut args = prefix;
        for argument in arguments {
            let value = self.eval_expr(argument);
            args = self.pool.args_append(args, value);
        }
        args
    }

    fn eval_binary(&mut self, binary: &BinaryExpression) -> NodeId {
        use BinaryOperation::*;
        match binary.op {
            // The comma joins operands into a tuple; a chain of commas
            // builds one tuple of the whole series, left to right.
            Tuple => {
                let mut left = self.eval_expr(&binary.left);
                if !binary.left.is_tuple_op() {
                    let nil = self.pool.nil();
                    left = self.pool.tuple_append(nil, left);
                }
                let right = self.eval_expr(&binary.right);
                self.pool.tuple_append(left, right)
            }
            // The pairing operator is a dedicated 2-tuple constructor for
            // the map literal syntax.
            Pair => {
                let left = self.eval_expr(&binary.left);
                let right = self.eval_expr(&binary.right);
                self.pool.tuple2(left, right)
            }
            If => self.eval_conditional(binary),
            Else => {
                // Else only means something inside an if; the if operator
                // consumes its else itself.
                self.report(SemanticError::else_operator_without_if(binary.span));
                self.pool.nil()
            }
            // The comparisons invoke the comparator, which is a trinary
            // selector choosing between less, equal and greater values.
            Eq => self.eval_comparison(binary, [false, true, false]),
            NotEq => self.eval_comparison(binary, [true, false, true]),
            Lt => self.eval_comparison(binary, [true, false, false]),
            LtEq => self.eval_comparison(binary, [true, true, false]),
            Gt => self.eval_comparison(binary, [false, false, true]),
            GtEq => self.eval_comparison(binary, [false, true, true]),
            // Arithmetic is method dispatch on the left operand.
            Add => self.eval_method_op(binary, "add"),
            Subtract => self.eval_method_op(binary, "subtract"),
            Multiply => self.eval_method_op(binary, "multiply"),
            Divide => self.eval_method_op(binary, "divide"),
            Modulus => self.eval_method_op(binary, "modulus"),
            Exponent => self.eval_method_op(binary, "exponentiate"),
            ShiftLeft => self.eval_method_op(binary, "shift_left"),
            ShiftRight => self.eval_method_op(binary, "shift_right"),
            Concat => self.eval_method_op(binary, "concatenate"),
            And => self.eval_logic(binary, "and"),
            Or => self.eval_logic(binary, "or"),
            Xor => self.eval_logic(binary, "xor"),
            // Does the container have a value for the key? Equivalent to
            // asking whether looking it up raises an exception.
            Has => {
                let value = self.eval_expr(&binary.left);
                let key = self.eval_expr(&binary.right);
                let result = self.pool.call1(value, key);
                self.pool.is_not_exceptional(result)
            }
            // The type-assertion operator guards its left operand with a
            // predicate function. Radian types are just functions which
            // filter values, so this is how type information is attached.
            As => {
                let value = self.eval_expr(&binary.left);
                let filter = self.eval_expr(&binary.right);
                let condition = self.pool.call1(filter, value);
                let message = RuntimeError::invalid_type_assertion(binary.span).to_string();
                let errtext = self.pool.string(&message);
                let error = self.pool.throw(errtext);
                self.pool.branch(condition, value, error)
            }
        }
    }

    /// `x if c else y`: only the selected side may ever be evaluated, so
    /// both results are wrapped as thunks and the condition picks which
    /// thunk to invoke.
    fn eval_conditional(&mut self, binary: &BinaryExpression) -> NodeId {
        let Expression::Binary(alternative) = &*binary.right else {
            self.report(SemanticError::if_operator_without_else(binary.span));
            return self.pool.nil();
        };
        if alternative.op != BinaryOperation::Else {
            self.report(SemanticError::if_operator_without_else(binary.span));
            return self.pool.nil();
        }

        let condition = self.eval_expr(&alternative.left);
        let then_value = self.generate_thunk(&binary.left);
        let else_value = self.generate_thunk(&alternative.right);
        let branch = self.pool.branch(condition, then_value, else_value);
        self.pool.call0(branch)
    }

    /// One of the six relational operators: invoke `compare_to` and select
    /// among the [less, equal, greater] outcomes.
    fn eval_comparison(&mut self, binary: &BinaryExpression, selections: [bool; 3]) -> NodeId {
        let left = self.eval_expr(&binary.left);
        let right = self.eval_expr(&binary.right);
        let relation = self.pool.compare(left, right);
        let values = selections.map(|pick| {
            if pick {
                self.pool.true_value()
            } else {
                self.pool.false_value()
            }
        });
        self.pool.call3(relation, values[0], values[1], values[2])
    }

    /// A binary operator that lowers to a method call on its left operand.
    fn eval_method_op(&mut self, binary: &BinaryExpression, selector: &str) -> NodeId {
        let left = self.eval_expr(&binary.left);
        let right = self.eval_expr(&binary.right);
        let sym = self.pool.symbol(selector);
        let method = self.pool.call1(left, sym);
        self.pool.call2(method, left, right)
    }

    /// The lazy boolean connectives, encoded as branches over Church
    /// booleans. Each connective's two-parameter selector function is
    /// synthesized once and reused through the scratch pad.
    fn eval_logic(&mut self, binary: &BinaryExpression, key: &str) -> NodeId {
        let function = match self.pool.pad_lookup(key) {
            Some(function) => function,
            None => {
                let true_value = self.pool.parameter(0);
                let false_value = self.pool.parameter(1);
                let left_exp = self.pool.slot(0);
                let right_exp = self.pool.slot(1);
                let result = match key {
                    "and" => {
                        let half_true = self.pool.branch(right_exp, true_value, false_value);
                        self.pool.branch(left_exp, half_true, false_value)
                    }
                    "or" => {
                        let half_true = self.pool.branch(right_exp, true_value, false_value);
                        self.pool.branch(left_exp, true_value, half_true)
                    }
                    _ => {
                        let left_true = self.pool.branch(right_exp, false_value, true_value);
                        let left_false = self.pool.branch(right_exp, true_value, false_value);
                        self.pool.branch(left_exp, left_true, left_false)
                    }
                };
                let function = self.pool.function_named(result, 2, key);
                self.pool.pad_store(key, function);
                function
            }
        };
        let left = self.eval_expr(&binary.left);
        let right = self.eval_expr(&binary.right);
        self.pool.capture2(function, left, right)
    }

    /// Map literals start from the blank map and insert each key-value
    /// pair of the element tuple.
    fn eval_map(&mut self, map: &radian_ast::MapExpression) -> NodeId {
        let mut result = self.pool.map_blank();
        for element in map.items.unpack_tuple().iter().rev() {
            let Expression::Binary(pair) = element else {
                self.report(SemanticError::map_elements_must_be_pairs(element.span()));
                return result;
            };
            if pair.op != BinaryOperation::Pair {
                self.report(SemanticError::map_elements_must_be_pairs(element.span()));
                return result;
            }
            let key = self.eval_expr(&pair.left);
            let value = self.eval_expr(&pair.right);
            let insert_sym = self.pool.sym_insert();
            let inserter = self.pool.call1(result, insert_sym);
            result = self.pool.call3(inserter, result, key, value);
        }
        result
    }

    /// `each [out from] x in seq [where pred]`: maps and/or filters a
    /// sequence lazily. Nothing happens here and now; the result is a
    /// sequence object that does the work per element as requested.
    fn eval_comprehension(&mut self, each: &radian_ast::ComprehensionExpression) -> NodeId {
        let mut sequence = self.eval_expr(&each.input);

        // The parser cannot tell while reading the first clause whether it
        // is the output expression or the variable, so the variable shape
        // is only checked now.
        if each.variable.as_identifier().is_none() {
            self.report(SemanticError::param_expects_identifier(each.variable.span()));
            return sequence;
        }

        let core = self.pool.import_core();

        if let Some(predicate) = &each.predicate {
            let function = self.capture_lambda(Some(&each.variable), predicate);
            let filter_sym = self.pool.sym_filter();
            let make_filter = self.pool.call1(core, filter_sym);
            sequence = self.pool.call3(make_filter, core, sequence, function);
        }

        if let Some(output) = &each.output {
            let function = self.capture_lambda(Some(&each.variable), output);
            let map_sym = self.pool.sym_map();
            let make_map = self.pool.call1(core, map_sym);
            sequence = self.pool.call3(make_map, core, sequence, function);
        }

        sequence
    }
}
