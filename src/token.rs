// Copyright 2026 the vecpath Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Path data tokens and the string lexer that produces them.

use core::fmt;

use alloc::vec::Vec;

use crate::{SyntaxError, SyntaxErrorKind};

/// One lexical item of path data.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[expect(clippy::exhaustive_enums, reason = "path data has no other kinds of token")]
pub enum Token {
    /// A command letter. Any ASCII letter lexes as a command; the parser
    /// decides whether it is a known one.
    Command(char),
    /// A numeric operand.
    Number(f64),
    /// An arc flag.
    Flag(bool),
}

impl Token {
    /// The number carried by an operand token, if any.
    ///
    /// Flags read as `0` and `1`.
    #[inline]
    pub fn as_number(self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(n),
            Self::Flag(b) => Some(if b { 1.0 } else { 0.0 }),
            Self::Command(_) => None,
        }
    }

    /// Is this an operand (a number or a flag)?
    #[inline]
    pub fn is_operand(self) -> bool {
        !matches!(self, Self::Command(_))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Command(c) => write!(f, "{c}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Flag(b) => f.write_str(if b { "1" } else { "0" }),
        }
    }
}

/// Split path data into tokens.
///
/// Numbers may carry a sign, a fraction and an exponent; they can follow
/// each other without separators when unambiguous (`10-5`, `1.5.5`).
/// Whitespace and commas separate tokens. Command letters are passed through
/// uninterpreted, so flags come out as [`Token::Number`] and arc flags must
/// be written with separators.
///
/// Errors carry the byte offset at which lexing failed.
pub fn tokenize(data: &str) -> Result<Vec<Token>, SyntaxError> {
    let mut lexer = Lexer::new(data);
    let mut tokens = Vec::new();
    while let Some(token) = lexer.next_token()? {
        tokens.push(token);
    }
    Ok(tokens)
}

struct Lexer<'a> {
    data: &'a str,
    ix: usize,
}

impl<'a> Lexer<'a> {
    fn new(data: &'a str) -> Lexer<'a> {
        Lexer { data, ix: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.data.as_bytes().get(self.ix).copied()
    }

    fn skip_separators(&mut self) {
        while let Some(c) = self.peek() {
            if !matches!(c, b' ' | b'\t' | b'\n' | 12 | b'\r' | b',') {
                break;
            }
            self.ix += 1;
        }
    }

    fn skip_digits(&mut self) -> usize {
        let start = self.ix;
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.ix += 1;
        }
        self.ix - start
    }

    fn next_token(&mut self) -> Result<Option<Token>, SyntaxError> {
        self.skip_separators();
        let Some(c) = self.peek() else {
            return Ok(None);
        };
        match c {
            b'a'..=b'z' | b'A'..=b'Z' => {
                self.ix += 1;
                Ok(Some(Token::Command(c as char)))
            }
            b'+' | b'-' | b'.' | b'0'..=b'9' => self.number().map(Some),
            _ => {
                let ch = self.data[self.ix..].chars().next().unwrap_or('\u{fffd}');
                Err(SyntaxError::new(SyntaxErrorKind::UnexpectedChar(ch), self.ix))
            }
        }
    }

    fn number(&mut self) -> Result<Token, SyntaxError> {
        let start = self.ix;
        if matches!(self.peek(), Some(b'+' | b'-')) {
            self.ix += 1;
        }
        let mut digits = self.skip_digits();
        if self.peek() == Some(b'.') {
            self.ix += 1;
            digits += self.skip_digits();
        }
        if digits == 0 {
            return Err(SyntaxError::new(SyntaxErrorKind::InvalidNumber, start));
        }
        if matches!(self.peek(), Some(b'e' | b'E')) {
            self.ix += 1;
            if matches!(self.peek(), Some(b'+' | b'-')) {
                self.ix += 1;
            }
            if self.skip_digits() == 0 {
                return Err(SyntaxError::new(SyntaxErrorKind::InvalidNumber, start));
            }
        }
        self.data[start..self.ix]
            .parse()
            .map(Token::Number)
            .map_err(|_| {
                tracing::debug!(offset = start, "unparseable number in path data");
                SyntaxError::new(SyntaxErrorKind::InvalidNumber, start)
            })
    }
}
