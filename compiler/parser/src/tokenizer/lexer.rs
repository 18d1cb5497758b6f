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

use crate::tokenizer::Token;

use radian_span::{Span, Symbol};

use indexmap::IndexMap;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::fmt;

lazy_static! {
    /// Maps the case-folded spelling of each keyword to its token.
    static ref KEYWORDS: IndexMap<&'static str, Token> = [
        ("and", Token::And),
        ("as", Token::As),
        ("assert", Token::Assert),
        ("capture", Token::Capture),
        ("debug_trace", Token::DebugTrace),
        ("def", Token::Def),
        ("each", Token::Each),
        ("else", Token::Else),
        ("end", Token::End),
        ("false", Token::False),
        ("for", Token::For),
        ("from", Token::From),
        ("function", Token::Function),
        ("has", Token::Has),
        ("if", Token::If),
        ("import", Token::Import),
        ("in", Token::In),
        ("invoke", Token::Invoke),
        ("method", Token::Method),
        ("mod", Token::Mod),
        ("not", Token::Not),
        ("object", Token::Object),
        ("or", Token::Or),
        ("sync", Token::Sync),
        ("throw", Token::Throw),
        ("true", Token::True),
        ("var", Token::Var),
        ("where", Token::Where),
        ("while", Token::While),
        ("xor", Token::Xor),
        ("yield", Token::Yield),
    ]
    .into_iter()
    .collect();
}

impl Token {
    /// Returns a tuple: [(token length, token)] if the next token can be eaten.
    ///
    /// The scanner never fails; malformed input becomes `Token::Error` and
    /// unrecognized characters become `Token::Unknown`, both of which the
    /// parser reports as lexical errors when it meets them.
    pub(crate) fn eat(input: &str) -> (usize, Token) {
        debug_assert!(!input.is_empty());
        let bytes = input.as_bytes();
        match bytes[0] {
            b'#' => Self::eat_comment(input),
            b'\t' => (1, Token::Indent),
            b'\r' => match bytes.get(1) {
                Some(b'\n') => (2, Token::Eol),
                _ => (1, Token::Eol),
            },
            b'\n' => (1, Token::Eol),
            b'"' | b'\'' => Self::eat_string(input),
            b'0'..=b'9' => Self::eat_number(input),
            b':' => match input[1..].chars().next() {
                Some(c) if is_ident_start(c) => {
                    let (len, text) = eat_identifier_text(&input[1..]);
                    (1 + len, Token::SymbolLit(Symbol::intern(&text)))
                }
                _ => (1, Token::Colon),
            },
            _ => {
                let c = input.chars().next().unwrap();
                if is_ident_start(c) {
                    Self::eat_identifier(input)
                } else if c != '\t' && c.is_whitespace() {
                    Self::eat_whitespace(input)
                } else {
                    Self::eat_operator(input, c)
                }
            }
        }
    }

    /// A comment runs from the comment character to the end of the line.
    fn eat_comment(input: &str) -> (usize, Token) {
        let len = input.find(['\r', '\n']).unwrap_or(input.len());
        (len, Token::CommentLine(input[1..len].to_string()))
    }

    /// A run of whitespace characters, excluding tabs and line breaks,
    /// which are structurally significant.
    fn eat_whitespace(input: &str) -> (usize, Token) {
        let len = input
            .char_indices()
            .find(|(_, c)| *c == '\t' || *c == '\r' || *c == '\n' || !c.is_whitespace())
            .map_or(input.len(), |(i, _)| i);
        (len, Token::WhiteSpace)
    }

    /// An identifier, case-folded as it is scanned so that the rest of the
    /// compiler can ignore letter case. Reserved words are picked out here.
    fn eat_identifier(input: &str) -> (usize, Token) {
        let (len, text) = eat_identifier_text(input);
        match KEYWORDS.get(text.as_str()) {
            Some(token) => (len, token.clone()),
            None => (len, Token::Identifier(Symbol::intern(&text))),
        }
    }

    /// Numeric literals:
    /// decimal integers, reals like `1.5`, floats like `1.5f`, and the
    /// `0x` / `0o` / `0b` radix forms. A decimal integer with a leading
    /// zero and more digits is not a legal literal.
    fn eat_number(input: &str) -> (usize, Token) {
        let bytes = input.as_bytes();

        // Radix-prefixed forms.
        if bytes[0] == b'0' {
            let radix: Option<(u32, fn(char) -> bool)> = match bytes.get(1) {
                Some(b'x') | Some(b'X') => Some((16, |c| c.is_ascii_hexdigit())),
                Some(b'o') | Some(b'O') => Some((8, |c| ('0'..='7').contains(&c))),
                Some(b'b') | Some(b'B') => Some((2, |c| c == '0' || c == '1')),
                _ => None,
            };
            if let Some((base, is_digit)) = radix {
                let digits: String = input[2..].chars().take_while(|c| is_digit(*c)).collect();
                let len = 2 + digits.len();
                let token = match (base, digits.is_empty()) {
                    (_, true) => Token::Unknown(input[..len].to_string()),
                    (16, _) => Token::Hex(digits),
                    (8, _) => Token::Oct(digits),
                    _ => Token::Bin(digits),
                };
                return (len, token);
            }
        }

        let mut len = input.bytes().take_while(|b| b.is_ascii_digit()).count();
        let mut real = false;
        if bytes.get(len) == Some(&b'.') && bytes.get(len + 1).is_some_and(|b| b.is_ascii_digit()) {
            real = true;
            len += 1;
            len += input[len..].bytes().take_while(|b| b.is_ascii_digit()).count();
        }
        let text = input[..len].to_string();

        // The optional suffix marks an approximate floating-point quantity
        // rather than an exact rational one.
        if matches!(bytes.get(len), Some(b'f') | Some(b'F')) {
            let mut text = text;
            text.push(bytes[len] as char);
            return (len + 1, Token::Float(text));
        }

        if real {
            (len, Token::Real(text))
        } else if text.len() > 1 && text.starts_with('0') {
            // A multi-digit integer starting with zero is some bogus literal.
            (len, Token::Unknown(text))
        } else {
            (len, Token::Integer(text))
        }
    }

    /// A string literal delimited by single or double quotes, with the
    /// usual backslash escapes. Line breaks are not permitted inside.
    fn eat_string(input: &str) -> (usize, Token) {
        let mut chars = input.char_indices();
        let (_, delimiter) = chars.next().unwrap();
        let mut value = String::new();
        while let Some((i, c)) = chars.next() {
            match c {
                c if c == delimiter => return (i + c.len_utf8(), Token::StaticString(value)),
                '\r' | '\n' => return (i, Token::Error),
                '\\' => match chars.next() {
                    Some((_, '\\')) => value.push('\\'),
                    Some((_, '\'')) => value.push('\''),
                    Some((_, '"')) => value.push('"'),
                    Some((_, 'a')) => value.push('\x07'),
                    Some((_, 'b')) => value.push('\x08'),
                    Some((_, 'f')) => value.push('\x0c'),
                    Some((_, 'n')) => value.push('\n'),
                    Some((_, 'r')) => value.push('\r'),
                    Some((_, 't')) => value.push('\t'),
                    Some((_, 'v')) => value.push('\x0b'),
                    Some((j, 'x')) => match string_char(input, j + 1, 2, &mut chars) {
                        Some(c) => value.push(c),
                        None => return (j, Token::Error),
                    },
                    Some((j, 'u')) => match string_char(input, j + 1, 4, &mut chars) {
                        Some(c) => value.push(c),
                        None => return (j, Token::Error),
                    },
                    Some((j, 'U')) => match string_char(input, j + 1, 6, &mut chars) {
                        Some(c) => value.push(c),
                        None => return (j, Token::Error),
                    },
                    Some((j, _)) => return (j, Token::Error),
                    None => return (i, Token::Error),
                },
                c => value.push(c),
            }
        }
        (input.len(), Token::Error)
    }

    /// An operator token. Two-character operators are matched first, so that
    /// `<=` is one token rather than `<` followed by `=`.
    fn eat_operator(input: &str, first: char) -> (usize, Token) {
        if input.len() >= 2 {
            let token = match &input[..2] {
                "!=" => Some(Token::NotEq),
                "<=" => Some(Token::LtEq),
                ">=" => Some(Token::GtEq),
                "<<" => Some(Token::Shl),
                ">>" => Some(Token::Shr),
                "**" => Some(Token::Exp),
                "->" => Some(Token::Arrow),
                "<-" => Some(Token::LeftArrow),
                "=>" => Some(Token::FatArrow),
                _ => None,
            };
            if let Some(token) = token {
                return (2, token);
            }
        }
        let token = match first {
            '(' => Token::LeftParen,
            ')' => Token::RightParen,
            '[' => Token::LeftSquare,
            ']' => Token::RightSquare,
            '{' => Token::LeftCurly,
            '}' => Token::RightCurly,
            '.' => Token::Period,
            ',' => Token::Comma,
            '=' => Token::Eq,
            '<' => Token::Lt,
            '>' => Token::Gt,
            '+' => Token::Add,
            '-' => Token::Minus,
            '*' => Token::Mul,
            '/' => Token::Div,
            '&' => Token::Amp,
            c => Token::Unknown(c.to_string()),
        };
        (first.len_utf8(), token)
    }
}

/// May an identifier begin with this character?
fn is_ident_start(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}

/// May an identifier continue with this character?
fn is_ident_continue(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}

/// Scans identifier characters, folding case as it goes.
fn eat_identifier_text(input: &str) -> (usize, String) {
    let len = input
        .char_indices()
        .find(|(_, c)| !is_ident_continue(*c))
        .map_or(input.len(), |(i, _)| i);
    (len, input[..len].to_lowercase())
}

/// Decodes a string escape character specified in `digits` hex digits.
fn string_char(
    input: &str,
    start: usize,
    digits: usize,
    chars: &mut std::str::CharIndices,
) -> Option<char> {
    let hex = input.get(start..start + digits)?;
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    // Advance the scan past the digits we just decoded.
    for _ in 0..digits {
        chars.next();
    }
    char::from_u32(u32::from_str_radix(hex, 16).ok()?)
}

/// A token with the span it occupies in the source map.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpannedToken {
    pub token: Token,
    pub span: Span,
}

impl SpannedToken {
    /// Returns a dummy token at a dummy span.
    pub const fn dummy() -> Self {
        Self { token: Token::Eof, span: Span { lo: radian_span::BytePos(0), hi: radian_span::BytePos(0) } }
    }
}

impl fmt::Display for SpannedToken {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "'{}' @ ", self.token)?;
        self.span.fmt(f)
    }
}
