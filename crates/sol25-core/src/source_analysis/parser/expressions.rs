// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Expression parsing for SOL25.
//!
//! An expression is a primary optionally followed by one message:
//!
//! - Unary messages (`obj size`)
//! - Keyword messages (`Foo new: 1 with: 2`), arguments being primaries
//!
//! Primaries are literals (integers, strings, class references, blocks),
//! variable references and parenthesised expressions.

use crate::ast::{Expression, Identifier, KeywordArgument, KeywordPart, Literal, Message, Primary};
use crate::source_analysis::TokenKind;

use super::{ParseResult, Parser};

impl Parser {
    // ========================================================================
    // Expression Parsing
    // ========================================================================

    /// Parses an expression: a primary and an optional message.
    ///
    /// Uses `stacker::maybe_grow` to extend the stack on the heap when
    /// blocks and parentheses nest deeply.
    pub(super) fn parse_expression(&mut self) -> ParseResult<Expression> {
        stacker::maybe_grow(32 * 1024, 256 * 1024, || {
            let receiver = self.parse_primary()?;

            let message = if self.at_keyword_part() {
                Some(self.parse_keyword_message()?)
            } else if let TokenKind::Identifier(name) = self.current_kind() {
                let selector = Identifier::new(name.clone(), self.current_token().span());
                self.advance();
                Some(Message::Unary(selector))
            } else {
                None
            };

            let end = match &message {
                Some(Message::Unary(selector)) => selector.span,
                Some(Message::Keyword(args)) => args
                    .last()
                    .map_or(receiver.span(), |arg| arg.argument.span()),
                None => receiver.span(),
            };
            let span = receiver.span().merge(end);

            Ok(Expression {
                receiver,
                message,
                span,
            })
        })
    }

    /// Parses keyword/argument pairs for as long as `name:` follows.
    fn parse_keyword_message(&mut self) -> ParseResult<Message> {
        let mut arguments = Vec::new();
        while self.at_keyword_part() {
            let name = self.parse_identifier("keyword selector part")?;
            let colon = self.advance();
            let keyword = KeywordPart::new(name.name, name.span.merge(colon.span()));
            let argument = self.parse_primary()?;
            arguments.push(KeywordArgument { keyword, argument });
        }
        Ok(Message::Keyword(arguments))
    }

    // ========================================================================
    // Primary Parsing
    // ========================================================================

    /// Parses a primary: literal, variable or parenthesised expression.
    pub(super) fn parse_primary(&mut self) -> ParseResult<Primary> {
        let span = self.current_token().span();
        let literal = match self.current_kind() {
            TokenKind::Integer(text) => Literal::Integer(text.clone()),
            TokenKind::String(text) => Literal::String(text.clone()),
            TokenKind::ClassName(name) => Literal::ClassReference(name.clone()),
            TokenKind::Identifier(name) => {
                let variable = Identifier::new(name.clone(), span);
                self.advance();
                return Ok(Primary::Variable(variable));
            }
            TokenKind::LeftBracket => {
                let block = self.parse_block()?;
                let span = block.span;
                return Ok(Primary::Literal(Literal::Block(block), span));
            }
            TokenKind::LeftParen => return self.parse_parenthesized(),
            _ => return Err(self.error_expected("expression")),
        };
        self.advance();
        Ok(Primary::Literal(literal, span))
    }

    /// Parses `( expression )`.
    fn parse_parenthesized(&mut self) -> ParseResult<Primary> {
        let open = self.advance().span();
        self.enter_nesting(open)?;

        let result = self.parse_expression().and_then(|inner| {
            let close = self.expect(&TokenKind::RightParen, "')'")?.span();
            Ok(Primary::Parenthesized(Box::new(inner), open.merge(close)))
        });

        self.leave_nesting();
        result
    }
}
