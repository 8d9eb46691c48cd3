// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Lexical error types.
//!
//! Errors carry source locations ([`Span`]) for precise diagnostics.
//! They integrate with [`miette`] for error reporting in the CLI.

// Spurious warnings from miette derive macro expansion
#![allow(unused_assignments)]

use miette::Diagnostic;
use thiserror::Error;

use super::Span;

/// A lexical error: the source contains text that is not a SOL25 token.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("{kind}")]
#[diagnostic(code(sol25::lex))]
pub struct LexError {
    /// The kind of lexical error.
    pub kind: LexErrorKind,
    /// The source location of the error.
    #[label("here")]
    pub span: Span,
}

impl LexError {
    /// Creates a new lexical error.
    #[must_use]
    pub fn new(kind: LexErrorKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// The kind of lexical error.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
pub enum LexErrorKind {
    /// A character that cannot start any token.
    #[error("unexpected character '{0}'")]
    UnexpectedCharacter(char),

    /// A `+` or `-` that is not the sign of an integer literal.
    #[error("sign '{0}' must be followed by a digit")]
    DanglingSign(char),

    /// A string literal was not terminated.
    #[error("unterminated string literal")]
    UnterminatedString,

    /// A backslash inside a string with nothing escapable after it.
    #[error("escape sequence at end of line in string literal")]
    UnfinishedEscape,

    /// A comment was not terminated.
    #[error("unterminated comment")]
    UnterminatedComment,

    /// The input is not valid UTF-8.
    #[error("source is not valid UTF-8")]
    InvalidUtf8,
}
