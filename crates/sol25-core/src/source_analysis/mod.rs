// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Lexing and parsing for SOL25 source code.
//!
//! # Lexical Analysis
//!
//! The [`Lexer`] converts source text into a stream of [`Token`]s. Each token
//! carries its source location via [`Span`]. Whitespace and `"comments"` are
//! skipped.
//!
//! ```
//! use sol25_core::source_analysis::{Lexer, TokenKind};
//!
//! let tokens: Vec<_> = Lexer::new("x := 1.").collect();
//! assert_eq!(tokens.len(), 4); // x, :=, 1, .
//! ```
//!
//! # Parsing
//!
//! The [`parse`] function converts tokens into a [`Program`](crate::ast::Program).
//! See the grammar in the [`parser`] module docs.
//!
//! # Error Handling
//!
//! The [`Lexer`] iterator turns malformed input into [`TokenKind::Error`]
//! tokens and keeps going. [`lex_with_eof`] stops at the first one and returns
//! it as a [`LexError`], so a lexical error is always reported before any
//! syntax error. The parser stops at the first [`SyntaxError`].

mod error;
mod lexer;
pub mod parser;
mod span;
mod token;


pub use error::{LexError, LexErrorKind};
pub use lexer::{Lexer, first_comment, lex, lex_with_eof};
pub use parser::{SyntaxError, parse};
pub use span::Span;
pub use token::{Token, TokenKind};
