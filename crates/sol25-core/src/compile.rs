// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! The whole SOL25 pipeline: source text in, XML document out.
//!
//! Each stage runs to completion before the next starts, and the first
//! failure ends the run. [`CompileError::exit_code`] maps failures onto the
//! process exit codes of the `sol25-parse` command.

// Spurious warnings from miette derive macro expansion
#![allow(unused_assignments)]

use miette::Diagnostic;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::document::{EmitError, SemanticError, emit, lower};
use crate::source_analysis::{
    LexError, LexErrorKind, Span, SyntaxError, first_comment, lex_with_eof, parse,
};

/// Any failure on the way from source text to document.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum CompileError {
    /// Malformed token.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Lex(#[from] LexError),

    /// Token sequence outside the grammar.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Syntax(#[from] SyntaxError),

    /// Well-formedness rule broken.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Semantic(#[from] SemanticError),

    /// The document could not be produced.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Emit(#[from] EmitError),
}

impl CompileError {
    /// Process exit code for this error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Lex(_) => 21,
            Self::Syntax(_) => 22,
            Self::Semantic(err) => err.exit_code(),
            Self::Emit(_) => 35,
        }
    }
}

/// Compiles SOL25 source text into its XML document.
///
/// The program description is the first `"comment"` anywhere in `source`.
///
/// # Errors
///
/// Returns the first lexical, syntax or semantic error, in that order of
/// stages.
#[instrument(skip_all, fields(bytes = source.len()))]
pub fn compile(source: &str) -> Result<String, CompileError> {
    let tokens = lex_with_eof(source)?;
    debug!(tokens = tokens.len(), "lexed");

    let program = parse(tokens)?;
    debug!(classes = program.classes.len(), "parsed");

    let root = lower(&program, first_comment(source))?;
    let document = emit(&root)?;
    debug!(bytes = document.len(), "emitted");
    Ok(document)
}

/// Compiles raw input bytes, which must be UTF-8.
///
/// # Errors
///
/// Invalid UTF-8 is a [`LexErrorKind::InvalidUtf8`] error at the first bad
/// byte; otherwise as [`compile`].
pub fn compile_bytes(input: &[u8]) -> Result<String, CompileError> {
    let source = std::str::from_utf8(input).map_err(|err| {
        let at = err.valid_up_to();
        debug!(at, "input is not UTF-8");
        LexError::new(LexErrorKind::InvalidUtf8, Span::from(at..at))
    })?;
    compile(source)
}
