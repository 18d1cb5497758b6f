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

//! The tokenizer to convert Radian code text into tokens.
//!
//! Whitespace is filtered out here; comments survive until the parser
//! strips them, so that other consumers of the token stream may keep them.
//! Indent tokens and line endings are real tokens, since the grammar is
//! line-structured and indentation-sensitive.

pub(crate) mod token;
use std::iter;

pub use self::token::KEYWORD_TOKENS;
pub(crate) use self::token::*;

pub(crate) mod lexer;
pub(crate) use self::lexer::*;

use radian_span::{
    span::{BytePos, Pos},
    Span,
};

/// Creates a new vector of spanned tokens from a given source code text.
pub(crate) fn tokenize(input: &str, start_pos: BytePos) -> Vec<SpannedToken> {
    tokenize_iter(input, start_pos).collect()
}

/// Yields spanned tokens from the given source code text.
///
/// The `lo` byte position determines where spans will start.
pub(crate) fn tokenize_iter(input: &str, mut lo: BytePos) -> impl '_ + Iterator<Item = SpannedToken> {
    let mut index = 0usize;
    iter::from_fn(move || {
        while input.len() > index {
            let (token_len, token) = Token::eat(&input[index..]);
            index += token_len;

            let span = Span::new(lo, lo + BytePos::from_usize(token_len));
            lo = span.hi;

            match token {
                Token::WhiteSpace => continue,
                _ => return Some(SpannedToken { token, span }),
            }
        }

        None
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use radian_span::{source_map::FileName, symbol::create_session_if_not_set_then};

    #[test]
    fn test_tokenizer() {
        create_session_if_not_set_then(|s| {
            let raw = r#"def total = 0x2A + count
	while total < 100:
yield from seq
x->push(3.5f)
each n in ns where n != 0
"hello world" :sym # trailing remark"#;
            let sf = s.source_map.new_source(raw, FileName::Custom("test".into()));
            let tokens = tokenize(&sf.src, sf.start_pos);
            let mut output = String::new();
            for SpannedToken { token, .. } in tokens.iter() {
                output += &format!("{token} ");
            }
            assert_eq!(
                output,
                "def total = 0x2A + count <eol> <indent> while total < 100 : <eol> \
                 yield from seq <eol> x -> push ( 3.5f ) <eol> \
                 each n in ns where n != 0 <eol> \"hello world\" :sym # trailing remark "
            );
        });
    }

    #[test]
    fn test_case_folding() {
        create_session_if_not_set_then(|s| {
            let sf = s.source_map.new_source("Widget WIDGET widget", FileName::Custom("test".into()));
            let tokens = tokenize(&sf.src, sf.start_pos);
            assert_eq!(tokens.len(), 3);
            assert!(tokens.windows(2).all(|w| w[0].token == w[1].token));
        });
    }

    #[test]
    fn test_spans() {
        create_session_if_not_set_then(|s| {
            let raw = "var x = 1\n\tx = x + 2\n";
            let sm = &s.source_map;
            let sf = sm.new_source(raw, FileName::Custom("test".into()));
            for token in tokenize(&sf.src, sf.start_pos) {
                let text = sm.contents_of_span(token.span).unwrap();
                match &token.token {
                    Token::Identifier(name) => assert_eq!(name.to_string(), text),
                    Token::Integer(digits) => assert_eq!(digits, &text),
                    _ => {}
                }
            }
        });
    }

    #[test]
    fn test_bad_literals() {
        create_session_if_not_set_then(|s| {
            let sf = s.source_map.new_source("007 0x", FileName::Custom("test".into()));
            let tokens = tokenize(&sf.src, sf.start_pos);
            assert!(matches!(tokens[0].token, Token::Unknown(_)));
            assert!(matches!(tokens[1].token, Token::Unknown(_)));
        });
    }
}
