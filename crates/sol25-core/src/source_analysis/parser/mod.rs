// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Recursive descent parser for SOL25 source code.
//!
//! This parser builds a [`Program`] from the token stream produced by
//! [`lex_with_eof`](super::lex_with_eof). It makes one left-to-right pass with
//! at most two tokens of lookahead and never backtracks.
//!
//! # Grammar
//!
//! ```text
//! program    := class+ EOF
//! class      := 'class' ClassName ':' ClassName '{' method* '}'
//! method     := selector block
//! selector   := Identifier | (Identifier ':')+
//! block      := '[' (':' Identifier)* '|' statement* ']'
//! statement  := Identifier ':=' expression '.'
//! expression := primary (Identifier | (Identifier ':' primary)+)?
//! primary    := Integer | String | ClassName | block | Identifier | '(' expression ')'
//! ```
//!
//! An identifier followed by `:` starts a keyword part; keyword parts are
//! consumed greedily for as long as that pattern continues.
//!
//! # Errors
//!
//! There is no error recovery: the first token the grammar cannot accept
//! becomes a [`SyntaxError`] and parsing stops.
//!
//! # Usage
//!
//! ```
//! use sol25_core::source_analysis::{lex_with_eof, parse};
//!
//! let tokens = lex_with_eof("class Main : Object { run [ | x := 1. ] }").unwrap();
//! let program = parse(tokens).unwrap();
//!
//! assert_eq!(program.classes.len(), 1);
//! assert!(program.has_entry_point());
//! ```

// Spurious warnings from miette derive macro expansion
#![allow(unused_assignments)]

use ecow::EcoString;
use miette::Diagnostic;
use thiserror::Error;

use crate::ast::{Identifier, Program};
use crate::source_analysis::{Span, Token, TokenKind};

// Submodules with additional impl blocks for Parser
mod declarations;
mod expressions;


/// Maximum nesting depth of blocks and parentheses.
///
/// Deeper input is rejected as a syntax error instead of exhausting the
/// stack. `stacker::maybe_grow` in expression parsing covers the frames
/// between two nesting levels.
const MAX_NESTING_DEPTH: usize = 256;

/// A syntax error: the token sequence is not a SOL25 program.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(sol25::syntax))]
pub struct SyntaxError {
    /// Human-readable description of what was expected.
    pub message: EcoString,
    /// Location of the offending token.
    #[label("here")]
    pub span: Span,
}

impl SyntaxError {
    /// Creates a new syntax error.
    #[must_use]
    pub fn new(message: impl Into<EcoString>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }
}

pub(super) type ParseResult<T> = Result<T, SyntaxError>;

/// Parse a token sequence into a program.
///
/// The sequence should end with an EOF token, as produced by
/// [`lex_with_eof`](super::lex_with_eof); one is assumed if missing.
///
/// # Errors
///
/// Returns a [`SyntaxError`] at the first token that does not fit the grammar.
pub fn parse(tokens: Vec<Token>) -> Result<Program, SyntaxError> {
    Parser::new(tokens).parse_program()
}

/// The parser state.
pub(super) struct Parser {
    /// The tokens being parsed, always ending with EOF.
    tokens: Vec<Token>,
    /// Current token index.
    current: usize,
    /// Current block/parenthesis nesting depth.
    nesting_depth: usize,
}

impl Parser {
    /// Creates a new parser for the given tokens.
    fn new(mut tokens: Vec<Token>) -> Self {
        if !tokens.last().is_some_and(|t| t.kind().is_eof()) {
            let end = tokens.last().map_or(0, |t| t.span().end());
            tokens.push(Token::new(TokenKind::Eof, Span::new(end, end)));
        }
        Self {
            tokens,
            current: 0,
            nesting_depth: 0,
        }
    }

    // ========================================================================
    // Token Management
    // ========================================================================

    /// Returns the current token.
    pub(super) fn current_token(&self) -> &Token {
        // `new` guarantees a trailing EOF, and `advance` never moves past it.
        &self.tokens[self.current]
    }

    /// Returns the current token kind.
    pub(super) fn current_kind(&self) -> &TokenKind {
        self.current_token().kind()
    }

    /// Peeks at the kind of the token after the current one.
    pub(super) fn peek_kind(&self) -> Option<&TokenKind> {
        self.tokens.get(self.current + 1).map(Token::kind)
    }

    /// Checks if we're at the end of input.
    pub(super) fn is_at_end(&self) -> bool {
        self.current_kind().is_eof()
    }

    /// Advances to the next token and returns the current one.
    pub(super) fn advance(&mut self) -> Token {
        let token = self.current_token().clone();
        if !self.is_at_end() {
            self.current += 1;
        }
        token
    }

    /// Checks if the current token has the same kind as `kind` (payload ignored).
    pub(super) fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(self.current_kind()) == std::mem::discriminant(kind)
    }

    /// Consumes the current token if it matches the given kind.
    pub(super) fn match_token(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes a token of the given kind or fails with "expected {what}".
    pub(super) fn expect(&mut self, kind: &TokenKind, what: &str) -> ParseResult<Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.error_expected(what))
        }
    }

    /// Builds an "expected X, found Y" error at the current token.
    pub(super) fn error_expected(&self, what: &str) -> SyntaxError {
        let token = self.current_token();
        SyntaxError::new(
            format!("expected {what}, found {}", token.kind().describe()),
            token.span(),
        )
    }

    /// Consumes a lowercase identifier.
    pub(super) fn parse_identifier(&mut self, what: &str) -> ParseResult<Identifier> {
        if let TokenKind::Identifier(name) = self.current_kind() {
            let ident = Identifier::new(name.clone(), self.current_token().span());
            self.advance();
            Ok(ident)
        } else {
            Err(self.error_expected(what))
        }
    }

    /// Consumes a capitalised class name.
    pub(super) fn parse_class_name(&mut self, what: &str) -> ParseResult<Identifier> {
        if let TokenKind::ClassName(name) = self.current_kind() {
            let ident = Identifier::new(name.clone(), self.current_token().span());
            self.advance();
            Ok(ident)
        } else {
            Err(self.error_expected(what))
        }
    }

    /// Returns `true` if the current token starts a keyword part (`name:`).
    pub(super) fn at_keyword_part(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Identifier(_))
            && matches!(self.peek_kind(), Some(TokenKind::Colon))
    }

    // ========================================================================
    // Nesting
    // ========================================================================

    /// Increments the nesting depth, failing past [`MAX_NESTING_DEPTH`].
    /// Pair every successful call with [`Self::leave_nesting`].
    pub(super) fn enter_nesting(&mut self, span: Span) -> ParseResult<()> {
        if self.nesting_depth >= MAX_NESTING_DEPTH {
            return Err(SyntaxError::new(
                format!("nesting is too deep (maximum {MAX_NESTING_DEPTH} levels)"),
                span,
            ));
        }
        self.nesting_depth += 1;
        Ok(())
    }

    /// Decrements the nesting depth (pair with [`Self::enter_nesting`]).
    pub(super) fn leave_nesting(&mut self) {
        debug_assert!(
            self.nesting_depth > 0,
            "leave_nesting called without matching enter_nesting"
        );
        self.nesting_depth = self.nesting_depth.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    //! Tests for the SOL25 recursive descent parser.
    use super::*;
    use crate::ast::{Literal, Message, MethodSelector, Primary};
    use crate::source_analysis::lex_with_eof;

    /// Helper to parse a string that must be valid.
    fn parse_ok(source: &str) -> Program {
        let tokens = lex_with_eof(source).expect("source should lex");
        match parse(tokens) {
            Ok(program) => program,
            Err(err) => panic!("Expected no errors, got: {err:?}"),
        }
    }

    /// Helper to parse a string expecting a syntax error.
    fn parse_err(source: &str) -> SyntaxError {
        let tokens = lex_with_eof(source).expect("source should lex");
        parse(tokens).expect_err("expected a syntax error")
    }

    /// Wraps statements in a `Main` class with a `run` method.
    fn in_run(statements: &str) -> String {
        format!("class Main : Object {{ run [ | {statements} ] }}")
    }

    /// Parses `in_run(statements)` and returns the first statement's value.
    fn first_value(statements: &str) -> crate::ast::Expression {
        let mut program = parse_ok(&in_run(statements));
        let mut method = program.classes.remove(0).methods.remove(0);
        method.body.body.remove(0).value
    }

    #[test]
    fn parse_minimal_program() {
        let program = parse_ok("class Main : Object { run [ | ] }");
        assert_eq!(program.classes.len(), 1);
        let class = &program.classes[0];
        assert_eq!(class.name.name, "Main");
        assert_eq!(class.superclass.name, "Object");
        assert_eq!(class.methods.len(), 1);
        assert!(class.methods[0].selector.is_unary("run"));
        assert!(class.methods[0].body.body.is_empty());
        assert_eq!(program.span, Span::new(0, 33));
    }

    #[test]
    fn parse_class_without_methods() {
        let program = parse_ok("class A : Object {} class B : A {}");
        assert_eq!(program.classes.len(), 2);
        assert!(program.classes[0].methods.is_empty());
        assert_eq!(program.classes[1].superclass.name, "A");
    }

    #[test]
    fn parse_keyword_method_selector() {
        let program = parse_ok("class Main : Object { at: put : [ :i :v | ] }");
        let method = &program.classes[0].methods[0];
        assert_eq!(method.selector.name(), "at:put:");
        assert_eq!(method.selector.arity(), 2);
        let params: Vec<_> = method.body.parameters.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(params, ["i", "v"]);
    }

    #[test]
    fn parse_assignment_of_integer() {
        let value = first_value("x := 1.");
        assert!(value.message.is_none());
        assert!(matches!(
            value.receiver,
            Primary::Literal(Literal::Integer(ref n), _) if n == "1"
        ));
    }

    #[test]
    fn parse_unary_message() {
        let value = first_value("x := self size.");
        assert!(matches!(value.receiver, Primary::Variable(ref id) if id.name == "self"));
        match value.message {
            Some(Message::Unary(id)) => assert_eq!(id.name, "size"),
            other => panic!("Expected unary message, got {other:?}"),
        }
    }

    #[test]
    fn parse_keyword_message() {
        let value = first_value("x := Foo new: 1 with: 'two'.");
        assert!(matches!(
            value.receiver,
            Primary::Literal(Literal::ClassReference(ref n), _) if n == "Foo"
        ));
        let message = value.message.expect("keyword message");
        assert_eq!(message.selector(), "new:with:");
        let args = message.arguments();
        assert!(matches!(args[0], Primary::Literal(Literal::Integer(n), _) if n == "1"));
        assert!(matches!(args[1], Primary::Literal(Literal::String(s), _) if s == "'two'"));
    }

    #[test]
    fn parse_keyword_arguments_are_primaries() {
        // `b` is an argument; `size` cannot follow it.
        let err = parse_err(&in_run("x := a at: b size."));
        assert_eq!(err.message, "expected '.' after statement, found identifier 'size'");
    }

    #[test]
    fn parse_only_one_unary_message() {
        let err = parse_err(&in_run("x := a foo bar."));
        assert_eq!(err.message, "expected '.' after statement, found identifier 'bar'");
    }

    #[test]
    fn parse_parenthesized_receiver() {
        let value = first_value("x := (a foo) bar: (b baz: 1).");
        match &value.receiver {
            Primary::Parenthesized(inner, _) => {
                assert!(matches!(inner.message, Some(Message::Unary(_))));
            }
            other => panic!("Expected parenthesized receiver, got {other:?}"),
        }
        let args = value.message.as_ref().map(Message::arguments).unwrap_or_default();
        assert!(matches!(args[0], Primary::Parenthesized(..)));
    }

    #[test]
    fn parse_block_literal_with_parameters() {
        let value = first_value("b := [:a :b | c := a plus: b. ].");
        match value.receiver {
            Primary::Literal(Literal::Block(block), _) => {
                assert_eq!(block.arity(), 2);
                assert_eq!(block.body.len(), 1);
                assert_eq!(block.body[0].target.name, "c");
            }
            other => panic!("Expected block literal, got {other:?}"),
        }
    }

    #[test]
    fn parse_block_as_keyword_argument() {
        let value = first_value("x := true ifTrue: [ | r := 1. ] ifFalse: [ | r := 2. ].");
        let message = value.message.expect("keyword message");
        assert_eq!(message.selector(), "ifTrue:ifFalse:");
        assert!(
            message
                .arguments()
                .iter()
                .all(|arg| matches!(arg, Primary::Literal(Literal::Block(_), _)))
        );
    }

    #[test]
    fn parse_reserved_words_as_variables() {
        for word in ["self", "super", "nil", "true", "false"] {
            let value = first_value(&format!("x := {word}."));
            assert!(matches!(value.receiver, Primary::Variable(ref id) if id.name == word));
        }
    }

    #[test]
    fn parse_error_empty_input() {
        let err = parse_err("");
        assert_eq!(err.message, "expected 'class', found end of input");
        assert_eq!(err.span, Span::new(0, 0));
    }

    #[test]
    fn parse_error_missing_superclass() {
        let err = parse_err("class Main { }");
        assert_eq!(err.message, "expected ':' after class name, found '{'");
    }

    #[test]
    fn parse_error_lowercase_class_name() {
        let err = parse_err("class main : Object { }");
        assert_eq!(err.message, "expected class name, found identifier 'main'");
        assert_eq!(err.span, Span::new(6, 10));
    }

    #[test]
    fn parse_error_missing_pipe() {
        let err = parse_err("class Main : Object { run [ x := 1. ] }");
        assert_eq!(
            err.message,
            "expected '|' after block parameters, found identifier 'x'"
        );
    }

    #[test]
    fn parse_error_missing_period() {
        let err = parse_err(&in_run("x := 1"));
        assert_eq!(err.message, "expected '.' after statement, found ']'");
    }

    #[test]
    fn parse_error_unclosed_class() {
        let err = parse_err("class Main : Object { run [ | ]");
        assert_eq!(err.message, "expected method selector, found end of input");
    }

    #[test]
    fn parse_error_keyword_selector_missing_colon() {
        let err = parse_err("class Main : Object { at: put [ :a | ] }");
        assert_eq!(err.message, "expected '[', found identifier 'put'");
    }

    #[test]
    fn parse_error_empty_parentheses() {
        let err = parse_err(&in_run("x := ()."));
        assert_eq!(err.message, "expected expression, found ')'");
    }

    #[test]
    fn parse_error_class_keyword_as_expression() {
        let err = parse_err(&in_run("x := class."));
        assert_eq!(err.message, "expected expression, found 'class'");
    }

    #[test]
    fn parse_error_trailing_tokens() {
        let err = parse_err("class Main : Object { } x");
        assert_eq!(err.message, "expected 'class', found identifier 'x'");
    }

    #[test]
    fn parse_rejects_excessive_nesting() {
        let depth = MAX_NESTING_DEPTH + 1;
        let source = in_run(&format!("x := {}1{}.", "(".repeat(depth), ")".repeat(depth)));
        let err = parse_err(&source);
        assert!(err.message.starts_with("nesting is too deep"), "{}", err.message);
    }

    #[test]
    fn parse_accepts_nesting_at_the_limit() {
        // The method body block takes one level.
        let depth = MAX_NESTING_DEPTH - 1;
        let source = in_run(&format!("x := {}1{}.", "(".repeat(depth), ")".repeat(depth)));
        parse_ok(&source);
    }

    #[test]
    fn parse_without_eof_token() {
        let mut tokens = lex_with_eof("class Main : Object {}").unwrap();
        tokens.pop();
        assert!(parse(tokens).is_ok());
    }
}
