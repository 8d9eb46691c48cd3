// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! SOL25 front end.
//!
//! This crate turns SOL25 source text into an XML description of its
//! syntax tree:
//! - Lexical analysis (tokenization)
//! - Parsing (AST construction)
//! - Lowering (structural checks and the document tree)
//! - Emission (XML text)
//!
//! [`compile`](compile::compile) runs all four stages.

#![doc = include_str!("../../../README.md")]

pub mod ast;
pub mod compile;
pub mod document;
pub mod source_analysis;

/// Re-export commonly used types.
pub mod prelude {
    pub use crate::ast::{Block, Expression, Identifier, Literal, Program};
    pub use crate::compile::{CompileError, compile, compile_bytes};
    pub use crate::document::{Element, SemanticError};
    pub use crate::source_analysis::{LexError, Span, SyntaxError};
}
