// Copyright 2026 the vecpath Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for path data and matrix parsing.

use alloc::string::String;

/// What went wrong while lexing or parsing path data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum SyntaxErrorKind {
    /// The token stream has fewer than the three tokens of a minimal `M x y`.
    TooShort,
    /// The first command is not `M` or `m`.
    MissingMoveTo,
    /// A letter that is not a path command.
    UnknownCommand(char),
    /// The operands after the command ran out before its arity was satisfied.
    Truncated(char),
    /// An operand where a command letter is required, for example after `Z`.
    UnexpectedOperand,
    /// An arc flag that is neither `0` nor `1`.
    InvalidFlag,
    /// A character the lexer cannot start a token with.
    UnexpectedChar(char),
    /// A malformed number, such as a lone sign or exponent.
    InvalidNumber,
}

/// A path data syntax error.
///
/// `position` is a token index when produced by [`parse`](crate::parse) and
/// a byte offset when produced by [`tokenize`](crate::tokenize).
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{kind} (at {position})")]
pub struct SyntaxError {
    /// The kind of error.
    pub kind: SyntaxErrorKind,
    /// Where in the input the error was detected.
    pub position: usize,
}

impl SyntaxError {
    pub(crate) fn new(kind: SyntaxErrorKind, position: usize) -> Self {
        Self { kind, position }
    }
}

impl core::fmt::Display for SyntaxErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::TooShort => write!(f, "path data is too short"),
            Self::MissingMoveTo => write!(f, "path must start with M or m"),
            Self::UnknownCommand(c) => write!(f, "unknown path command \"{c}\""),
            Self::Truncated(c) => {
                write!(f, "not enough operands for path command \"{c}\"")
            }
            Self::UnexpectedOperand => {
                write!(f, "expected a path command, found a number")
            }
            Self::InvalidFlag => write!(f, "arc flags must be 0 or 1"),
            Self::UnexpectedChar(c) => write!(f, "unexpected character \"{c}\""),
            Self::InvalidNumber => write!(f, "malformed number"),
        }
    }
}

/// An error constructing or parsing a [`Matrix`](crate::Matrix).
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum MatrixError {
    /// The linear part cannot be inverted.
    #[error("singular matrix (determinant {determinant})")]
    Singular {
        /// The offending determinant.
        determinant: f64,
    },
    /// A matrix needs exactly six coefficients.
    #[error("matrix needs 6 coefficients, found {0}")]
    CoefficientCount(usize),
    /// A coefficient could not be read as a number.
    #[error("invalid matrix coefficient \"{0}\"")]
    InvalidNumber(String),
}
