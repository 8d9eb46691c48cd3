// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Token types for SOL25 lexical analysis.
//!
//! Each token consists of a [`TokenKind`] and the [`Span`] of source it was
//! read from. Whitespace and comments never become tokens.
//!
//! # Syntax Coverage
//!
//! - Class headers: `class Main : Object { ... }`
//! - Unary and keyword selectors: `run`, `at:put:`
//! - Blocks with parameters: `[:x :y | z := x. ]`
//! - Message sends: `obj foo`, `Foo new: 1 with: 2`

use ecow::EcoString;

use super::{LexErrorKind, Span};

/// The kind of token, not including source location.
///
/// Tokens are cheap to clone (using [`EcoString`] for string data).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // === Names ===
    /// A variable name or selector part: `x`, `_tmp`, `self`, `at`
    Identifier(EcoString),

    /// A capitalised class name: `Main`, `Object`, `Integer`
    ClassName(EcoString),

    /// The `class` reserved word.
    Class,

    // === Literals ===
    /// An integer literal with optional sign: `42`, `-17`, `+3`
    Integer(EcoString),

    /// A single-quoted string, quotes and escapes kept verbatim: `'it\'s'`
    String(EcoString),

    // === Delimiters ===
    /// Left brace (class body start): `{`
    LeftBrace,

    /// Right brace: `}`
    RightBrace,

    /// Left bracket (block start): `[`
    LeftBracket,

    /// Right bracket (block end): `]`
    RightBracket,

    /// Left parenthesis: `(`
    LeftParen,

    /// Right parenthesis: `)`
    RightParen,

    // === Punctuation ===
    /// Colon, used after keyword parts, before block parameters and in class headers: `:`
    Colon,

    /// Assignment operator: `:=`
    Assign,

    /// Statement terminator: `.`
    Period,

    /// Block parameter separator: `|`
    Pipe,

    // === Special ===
    /// End of input
    Eof,

    /// Malformed input; lexing continues after it.
    Error(LexErrorKind),
}

impl TokenKind {
    /// Returns `true` if this token is a literal value.
    ///
    /// Class names are not included: whether a class name is a literal
    /// depends on where it appears.
    #[must_use]
    pub const fn is_literal(&self) -> bool {
        matches!(self, Self::Integer(_) | Self::String(_))
    }

    /// Returns `true` if this is the end-of-input marker.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self, Self::Eof)
    }

    /// Returns `true` if this is an error token.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// Returns the string content if this token carries one.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Identifier(s) | Self::ClassName(s) | Self::Integer(s) | Self::String(s) => {
                Some(s)
            }
            Self::Class
            | Self::LeftBrace
            | Self::RightBrace
            | Self::LeftBracket
            | Self::RightBracket
            | Self::LeftParen
            | Self::RightParen
            | Self::Colon
            | Self::Assign
            | Self::Period
            | Self::Pipe
            | Self::Eof
            | Self::Error(_) => None,
        }
    }

    /// A short description used in "expected X, found Y" messages.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Identifier(s) => format!("identifier '{s}'"),
            Self::ClassName(s) => format!("class name '{s}'"),
            Self::Integer(s) => format!("integer '{s}'"),
            Self::String(s) => format!("string {s}"),
            Self::Eof => "end of input".to_string(),
            Self::Error(kind) => kind.to_string(),
            other => format!("'{other}'"),
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Identifier(s) | Self::ClassName(s) | Self::Integer(s) | Self::String(s) => {
                write!(f, "{s}")
            }
            Self::Class => write!(f, "class"),
            Self::LeftBrace => write!(f, "{{"),
            Self::RightBrace => write!(f, "}}"),
            Self::LeftBracket => write!(f, "["),
            Self::RightBracket => write!(f, "]"),
            Self::LeftParen => write!(f, "("),
            Self::RightParen => write!(f, ")"),
            Self::Colon => write!(f, ":"),
            Self::Assign => write!(f, ":="),
            Self::Period => write!(f, "."),
            Self::Pipe => write!(f, "|"),
            Self::Eof => write!(f, "<eof>"),
            Self::Error(kind) => write!(f, "<error: {kind}>"),
        }
    }
}

/// A token with its source location.
///
/// # Examples
///
/// ```
/// use sol25_core::source_analysis::{Span, Token, TokenKind};
///
/// let token = Token::new(TokenKind::Identifier("foo".into()), Span::new(0, 3));
/// assert!(matches!(token.kind(), TokenKind::Identifier(_)));
/// assert_eq!(token.span().len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    kind: TokenKind,
    span: Span,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Returns the kind of this token.
    #[must_use]
    pub fn kind(&self) -> &TokenKind {
        &self.kind
    }

    /// Consumes the token and returns its kind.
    #[must_use]
    pub fn into_kind(self) -> TokenKind {
        self.kind
    }

    /// Returns the source span of this token.
    #[must_use]
    pub fn span(&self) -> Span {
        self.span
    }
}
