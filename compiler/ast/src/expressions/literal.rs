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

/// A literal expression.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Literal {
    /// The variant of the literal.
    pub variant: LiteralVariant,
    /// The span of the literal.
    pub span: Span,
}

simple_node_impl!(Literal);

/// The variants of literal values.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LiteralVariant {
    /// An exact decimal integer, e.g. `42`.
    Integer(String),
    /// An exact rational number, e.g. `3.25`.
    Real(String),
    /// An approximate floating-point number, e.g. `3.25f`.
    Float(String),
    /// A hexadecimal integer; the digits after the `0x` prefix.
    Hex(String),
    /// An octal integer; the digits after the `0o` prefix.
    Oct(String),
    /// A binary integer; the digits after the `0b` prefix.
    Bin(String),
    /// A string literal, with escapes already decoded.
    String(String),
    /// A symbol literal, e.g. `:name`; the text without the colon.
    Symbol(String),
    /// A boolean literal.
    Boolean(bool),
}

impl Literal {
    /// The numeric value of the literal normalized into decimal form, e.g.
    /// the hex literal `0x1234` yields `"4660"`. Only meaningful on the
    /// number variants.
    pub fn to_decimal_string(&self) -> String {
        fn from_radix(digits: &str, radix: u32) -> String {
            match u128::from_str_radix(digits, radix) {
                Ok(value) => value.to_string(),
                // Out of range for a machine integer; leave the digits alone
                // and let the runtime's arbitrary-precision numbers cope.
                Err(_) => digits.to_string(),
            }
        }
        match &self.variant {
            LiteralVariant::Integer(value) | LiteralVariant::Real(value) => value.clone(),
            LiteralVariant::Float(value) => value.trim_end_matches(['f', 'F']).to_string(),
            LiteralVariant::Hex(digits) => from_radix(digits, 16),
            LiteralVariant::Oct(digits) => from_radix(digits, 8),
            LiteralVariant::Bin(digits) => from_radix(digits, 2),
            _ => unreachable!("to_decimal_string used on a non-number literal"),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.variant {
            LiteralVariant::Integer(value) | LiteralVariant::Real(value) | LiteralVariant::Float(value) => {
                write!(f, "{value}")
            }
            LiteralVariant::Hex(digits) => write!(f, "0x{digits}"),
            LiteralVariant::Oct(digits) => write!(f, "0o{digits}"),
            LiteralVariant::Bin(digits) => write!(f, "0b{digits}"),
            LiteralVariant::String(value) => write!(f, "\"{value}\""),
            LiteralVariant::Symbol(value) => write!(f, ":{value}"),
            LiteralVariant::Boolean(value) => write!(f, "{value}"),
        }
    }
}

/// The placeholder the parser substitutes for a fatally broken production.
/// Evaluates as nil; the pool records the taint so that the reported syntax
/// error is known to cover it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DummyExpression {
    /// The span of the tokens the dummy stands in for.
    pub span: Span,
}

simple_node_impl!(DummyExpression);

impl fmt::Display for DummyExpression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "nil")
    }
}
