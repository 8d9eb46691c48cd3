// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Lexical analysis for SOL25 source code.
//!
//! This module converts source text into a stream of [`Token`]s. The lexer
//! is hand-written so that every malformed construct maps onto a precise
//! [`LexErrorKind`].
//!
//! # Design Principles
//!
//! - **No panics**: malformed input becomes a [`TokenKind::Error`] token
//! - **Precise spans**: every token carries its exact source location
//! - **Whole input first**: [`lex_with_eof`] tokenizes everything before the
//!   parser runs, so lexical errors win over syntax errors
//!
//! # Example
//!
//! ```
//! use sol25_core::source_analysis::{Lexer, TokenKind};
//!
//! let tokens: Vec<_> = Lexer::new("x := 1.").collect();
//! assert_eq!(tokens.len(), 4); // x, :=, 1, . (EOF excluded from iterator)
//! ```

use std::iter::Peekable;
use std::str::CharIndices;

use ecow::EcoString;

use super::{LexError, LexErrorKind, Span, Token, TokenKind};

/// A lexer that tokenizes SOL25 source code.
///
/// Whitespace and `"double-quoted"` comments are skipped. The lexer
/// implements [`Iterator`]; iteration ends before the EOF token.
pub struct Lexer<'src> {
    /// The source text being lexed.
    source: &'src str,
    /// Character iterator with byte positions.
    chars: Peekable<CharIndices<'src>>,
    /// Current byte position in source.
    position: usize,
    /// Set once EOF has been produced.
    finished: bool,
}

impl std::fmt::Debug for Lexer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lexer")
            .field("position", &self.position)
            .field("remaining", &self.source.get(self.position..).unwrap_or(""))
            .finish()
    }
}

impl<'src> Lexer<'src> {
    /// Creates a new lexer for the given source text.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            position: 0,
            finished: false,
        }
    }

    /// Peeks at the next character without consuming it.
    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, c)| c)
    }

    /// Peeks `n+1` characters ahead without consuming (n=0 is same as `peek_char`).
    fn peek_char_n(&self, n: usize) -> Option<char> {
        self.chars.clone().nth(n).map(|(_, c)| c)
    }

    /// Consumes the next character and returns it.
    fn advance(&mut self) -> Option<char> {
        let (pos, c) = self.chars.next()?;
        self.position = pos + c.len_utf8();
        Some(c)
    }

    /// Consumes characters while the predicate is true.
    fn advance_while(&mut self, predicate: impl Fn(char) -> bool) {
        while self.peek_char().is_some_and(&predicate) {
            self.advance();
        }
    }

    /// Returns the current byte position.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "source files over 4GB are not supported"
    )]
    fn current_position(&self) -> u32 {
        self.position as u32
    }

    /// Creates a span from start to current position.
    fn span_from(&self, start: u32) -> Span {
        Span::new(start, self.current_position())
    }

    /// Extracts source text for a span.
    fn text_for(&self, span: Span) -> &'src str {
        &self.source[span.as_range()]
    }

    /// Skips whitespace and comments.
    ///
    /// Returns an error token if a comment is left open at end of input.
    fn skip_trivia(&mut self) -> Option<Token> {
        loop {
            match self.peek_char() {
                Some(c) if is_whitespace(c) => self.advance_while(is_whitespace),
                Some('"') => {
                    let start = self.current_position();
                    self.advance(); // opening "
                    self.advance_while(|c| c != '"');
                    if self.advance().is_none() {
                        return Some(Token::new(
                            TokenKind::Error(LexErrorKind::UnterminatedComment),
                            self.span_from(start),
                        ));
                    }
                }
                _ => return None,
            }
        }
    }

    /// Lexes the next token.
    fn lex_token(&mut self) -> Token {
        if let Some(error) = self.skip_trivia() {
            return error;
        }

        let start = self.current_position();
        let kind = match self.peek_char() {
            None => TokenKind::Eof,
            Some(c) => self.lex_token_kind(c),
        };

        Token::new(kind, self.span_from(start))
    }

    /// Lexes a token kind based on the first character.
    fn lex_token_kind(&mut self, c: char) -> TokenKind {
        match c {
            'a'..='z' | '_' => self.lex_identifier(),
            'A'..='Z' => self.lex_class_name(),
            '0'..='9' => self.lex_integer(),
            '+' | '-' => self.lex_signed_integer(c),
            '\'' => self.lex_string(),
            ':' => self.lex_colon_or_assign(),
            '{' => self.single(TokenKind::LeftBrace),
            '}' => self.single(TokenKind::RightBrace),
            '[' => self.single(TokenKind::LeftBracket),
            ']' => self.single(TokenKind::RightBracket),
            '(' => self.single(TokenKind::LeftParen),
            ')' => self.single(TokenKind::RightParen),
            '.' => self.single(TokenKind::Period),
            '|' => self.single(TokenKind::Pipe),
            _ => {
                self.advance();
                TokenKind::Error(LexErrorKind::UnexpectedCharacter(c))
            }
        }
    }

    /// Consumes one character and yields `kind`.
    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.advance();
        kind
    }

    /// Lexes a lowercase identifier or the `class` reserved word.
    fn lex_identifier(&mut self) -> TokenKind {
        let start = self.current_position();
        self.advance_while(|c| c.is_ascii_alphanumeric() || c == '_');
        let text = self.text_for(self.span_from(start));
        if text == "class" {
            TokenKind::Class
        } else {
            TokenKind::Identifier(EcoString::from(text))
        }
    }

    /// Lexes a class name: an uppercase letter followed by letters and digits.
    fn lex_class_name(&mut self) -> TokenKind {
        let start = self.current_position();
        self.advance_while(|c| c.is_ascii_alphanumeric());
        TokenKind::ClassName(EcoString::from(self.text_for(self.span_from(start))))
    }

    /// Lexes an unsigned integer literal.
    fn lex_integer(&mut self) -> TokenKind {
        let start = self.current_position();
        self.advance_while(|c| c.is_ascii_digit());
        TokenKind::Integer(EcoString::from(self.text_for(self.span_from(start))))
    }

    /// Lexes `+`/`-` followed by digits as one integer literal.
    fn lex_signed_integer(&mut self, sign: char) -> TokenKind {
        if !self.peek_char_n(1).is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
            return TokenKind::Error(LexErrorKind::DanglingSign(sign));
        }
        let start = self.current_position();
        self.advance(); // sign
        self.advance_while(|c| c.is_ascii_digit());
        TokenKind::Integer(EcoString::from(self.text_for(self.span_from(start))))
    }

    /// Lexes a single-quoted string literal, keeping quotes and escapes.
    ///
    /// A backslash escapes any character except a line break.
    fn lex_string(&mut self) -> TokenKind {
        let start = self.current_position();
        self.advance(); // opening '

        loop {
            match self.advance() {
                None => return TokenKind::Error(LexErrorKind::UnterminatedString),
                Some('\'') => break,
                Some('\\') => match self.peek_char() {
                    None => return TokenKind::Error(LexErrorKind::UnterminatedString),
                    Some('\n') => return TokenKind::Error(LexErrorKind::UnfinishedEscape),
                    Some(_) => {
                        self.advance();
                    }
                },
                Some(_) => {}
            }
        }

        TokenKind::String(EcoString::from(self.text_for(self.span_from(start))))
    }

    /// Lexes `:` or `:=`.
    fn lex_colon_or_assign(&mut self) -> TokenKind {
        self.advance(); // :
        if self.peek_char() == Some('=') {
            self.advance();
            TokenKind::Assign
        } else {
            TokenKind::Colon
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let token = self.lex_token();
        if token.kind().is_eof() {
            self.finished = true;
            None
        } else {
            Some(token)
        }
    }
}

/// Whitespace as SOL25 understands it.
const fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n' | '\x0c')
}

/// Lexes source into tokens without the EOF marker, keeping error tokens.
#[must_use]
pub fn lex(source: &str) -> Vec<Token> {
    Lexer::new(source).collect()
}

/// Lexes the whole source, ending with an EOF token.
///
/// # Errors
///
/// Returns the first malformed token as a [`LexError`].
pub fn lex_with_eof(source: &str) -> Result<Vec<Token>, LexError> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.lex_token();
        if let TokenKind::Error(kind) = token.kind() {
            return Err(LexError::new(kind.clone(), token.span()));
        }
        let is_eof = token.kind().is_eof();
        tokens.push(token);
        if is_eof {
            return Ok(tokens);
        }
    }
}

/// Returns the text of the first `"comment"` in the source.
///
/// This is a flat scan over the raw text: it ignores token boundaries, so a
/// double quote inside a string literal counts as well.
///
/// ```
/// use sol25_core::source_analysis::first_comment;
///
/// assert_eq!(first_comment("\"hi\" class Main : Object {}"), Some("hi"));
/// assert_eq!(first_comment("class Main : Object {}"), None);
/// ```
#[must_use]
pub fn first_comment(source: &str) -> Option<&str> {
    let open = source.find('"')?;
    let rest = &source[open + 1..];
    let close = rest.find('"')?;
    Some(&rest[..close])
}
