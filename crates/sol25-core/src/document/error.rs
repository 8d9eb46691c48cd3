// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Semantic errors found while lowering a program.

use std::fmt;

use ecow::EcoString;
use miette::{Diagnostic, LabeledSpan};
use thiserror::Error;

use crate::source_analysis::Span;

/// A structural rule the program breaks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct SemanticError {
    /// What went wrong.
    pub kind: SemanticErrorKind,
    /// Where it went wrong.
    pub span: Span,
}

impl SemanticError {
    /// Creates a new semantic error.
    #[must_use]
    pub fn new(kind: SemanticErrorKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Process exit code for this error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self.kind {
            SemanticErrorKind::MissingEntryPoint => 31,
            SemanticErrorKind::ArityMismatch { .. } => 33,
            SemanticErrorKind::ParameterAssignment { .. } => 34,
        }
    }
}

/// The kinds of semantic error.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
pub enum SemanticErrorKind {
    /// No class `Main` answers the unary `run` message.
    #[error("program has no class `Main` with a unary `run` method")]
    MissingEntryPoint,

    /// A method block declares a different number of parameters than its selector takes.
    #[error(
        "method `{selector}` takes {expected} argument(s) but its block declares {found} parameter(s)"
    )]
    ArityMismatch {
        selector: EcoString,
        expected: usize,
        found: usize,
    },

    /// A statement assigns to a parameter of its own block.
    #[error("cannot assign to block parameter `{name}`")]
    ParameterAssignment { name: EcoString },
}

impl SemanticErrorKind {
    fn code(&self) -> &'static str {
        match self {
            Self::MissingEntryPoint => "sol25::semantic::entry_point",
            Self::ArityMismatch { .. } => "sol25::semantic::arity",
            Self::ParameterAssignment { .. } => "sol25::semantic::parameter_assignment",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::MissingEntryPoint => "in this program",
            Self::ArityMismatch { .. } => "selector declared here",
            Self::ParameterAssignment { .. } => "parameter assigned here",
        }
    }
}

impl Diagnostic for SemanticError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.kind.code()))
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        Some(Box::new(std::iter::once(LabeledSpan::new_with_span(
            Some(self.kind.label().to_string()),
            self.span,
        ))))
    }
}
