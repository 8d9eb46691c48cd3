// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Declaration parsing for SOL25.
//!
//! This module handles the structural part of the grammar:
//! - The program as a sequence of classes
//! - Class declarations with their superclass
//! - Methods and their unary or keyword selectors
//! - Blocks with parameters and assignment statements

use crate::ast::{
    Block, ClassDeclaration, Identifier, KeywordPart, Method, MethodSelector, Program, Statement,
};
use crate::source_analysis::{Span, TokenKind};

use super::{ParseResult, Parser};

impl Parser {
    // ========================================================================
    // Program and Class Parsing
    // ========================================================================

    /// Parses a whole program: one or more classes, then end of input.
    pub(super) fn parse_program(&mut self) -> ParseResult<Program> {
        let mut classes = vec![self.parse_class()?];
        while !self.is_at_end() {
            classes.push(self.parse_class()?);
        }

        let span = classes[0].span.merge(classes[classes.len() - 1].span);
        Ok(Program::new(classes, span))
    }

    /// Parses a class declaration.
    ///
    /// Syntax:
    /// ```text
    /// class <ClassName> : <Superclass> { <method>* }
    /// ```
    fn parse_class(&mut self) -> ParseResult<ClassDeclaration> {
        let start = self.expect(&TokenKind::Class, "'class'")?.span();
        let name = self.parse_class_name("class name")?;
        self.expect(&TokenKind::Colon, "':' after class name")?;
        let superclass = self.parse_class_name("superclass name")?;
        self.expect(&TokenKind::LeftBrace, "'{' to open the class body")?;

        let mut methods = Vec::new();
        while !self.check(&TokenKind::RightBrace) {
            methods.push(self.parse_method()?);
        }
        let end = self.advance().span();

        Ok(ClassDeclaration {
            name,
            superclass,
            methods,
            span: start.merge(end),
        })
    }

    // ========================================================================
    // Method Parsing
    // ========================================================================

    /// Parses a method: a selector followed by its body block.
    fn parse_method(&mut self) -> ParseResult<Method> {
        let selector = self.parse_method_selector()?;
        let body = self.parse_block()?;
        let span = selector.span().merge(body.span);
        Ok(Method {
            selector,
            body,
            span,
        })
    }

    /// Parses a method selector: `name` or `part1:part2:...`.
    ///
    /// Whitespace may separate a keyword part from its colon.
    fn parse_method_selector(&mut self) -> ParseResult<MethodSelector> {
        let first = self.parse_identifier("method selector")?;
        if !self.check(&TokenKind::Colon) {
            return Ok(MethodSelector::Unary(first));
        }

        let colon = self.advance();
        let mut parts = vec![KeywordPart::new(first.name, first.span.merge(colon.span()))];
        while self.at_keyword_part() {
            let name = self.parse_identifier("keyword selector part")?;
            let colon = self.advance();
            parts.push(KeywordPart::new(name.name, name.span.merge(colon.span())));
        }
        Ok(MethodSelector::Keyword(parts))
    }

    // ========================================================================
    // Block Parsing
    // ========================================================================

    /// Parses a block.
    ///
    /// Syntax:
    /// ```text
    /// [ :param1 :param2 | target := expression. ... ]
    /// ```
    pub(super) fn parse_block(&mut self) -> ParseResult<Block> {
        let open = self.expect(&TokenKind::LeftBracket, "'['")?.span();
        self.enter_nesting(open)?;

        let result = self.parse_block_contents().map(|(parameters, body, close)| Block {
            parameters,
            body,
            span: open.merge(close),
        });

        self.leave_nesting();
        result
    }

    /// Parses everything after `[` up to and including `]`.
    fn parse_block_contents(&mut self) -> ParseResult<(Vec<Identifier>, Vec<Statement>, Span)> {
        let mut parameters = Vec::new();
        while self.match_token(&TokenKind::Colon) {
            parameters.push(self.parse_identifier("parameter name after ':'")?);
        }
        self.expect(&TokenKind::Pipe, "'|' after block parameters")?;

        let mut body = Vec::new();
        while !self.check(&TokenKind::RightBracket) {
            body.push(self.parse_statement()?);
        }
        let close = self.advance().span();

        Ok((parameters, body, close))
    }

    /// Parses an assignment statement: `target := expression.`
    fn parse_statement(&mut self) -> ParseResult<Statement> {
        let target = self.parse_identifier("assignment target or ']'")?;
        self.expect(&TokenKind::Assign, "':=' after assignment target")?;
        let value = self.parse_expression()?;
        let end = self.expect(&TokenKind::Period, "'.' after statement")?.span();

        let span = target.span.merge(end);
        Ok(Statement {
            target,
            value,
            span,
        })
    }
}
