// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Lowering from the AST to the document tree.
//!
//! The walk is in source order and the first rule violation wins:
//!
//! - a method's selector arity must match its block's parameter count
//! - a statement must not assign to a parameter of its own block
//! - some class `Main` must define the unary method `run` (checked last)
//!
//! Statement, parameter and argument numbers come from each element's
//! position among its siblings, so every block and every send counts from 1.

use ecow::{EcoString, eco_format};
use tracing::{debug, instrument};

use super::{Element, SemanticError, SemanticErrorKind};
use crate::ast::{
    Block, ClassDeclaration, Expression, Literal, Message, Method, Primary, Program, Statement,
};

/// Value of the root `language` attribute.
pub const LANGUAGE: &str = "SOL25";

/// Lowers a parsed program into its document tree.
///
/// `description` becomes the root `description` attribute; an empty one is
/// left out.
///
/// # Errors
///
/// Returns the first [`SemanticError`] found in source order, or
/// [`SemanticErrorKind::MissingEntryPoint`] once the whole tree is lowered.
#[instrument(skip_all, fields(classes = program.classes.len()))]
pub fn lower(program: &Program, description: Option<&str>) -> Result<Element, SemanticError> {
    let mut root = Element::new("program").with_attribute("language", LANGUAGE);
    if let Some(text) = description.filter(|text| !text.is_empty()) {
        root = root.with_attribute("description", text);
    }

    for class in &program.classes {
        root.push_child(lower_class(class)?);
    }

    if !program.has_entry_point() {
        debug!("no entry point");
        return Err(SemanticError::new(
            SemanticErrorKind::MissingEntryPoint,
            program.span,
        ));
    }

    Ok(root)
}

fn lower_class(class: &ClassDeclaration) -> Result<Element, SemanticError> {
    let mut element = Element::new("class")
        .with_attribute("name", class.name.name.clone())
        .with_attribute("parent", class.superclass.name.clone());
    for method in &class.methods {
        element.push_child(lower_method(method)?);
    }
    Ok(element)
}

fn lower_method(method: &Method) -> Result<Element, SemanticError> {
    let selector = method.selector.name();
    let expected = method.selector.arity();
    let found = method.body.arity();
    if expected != found {
        debug!(%selector, expected, found, "arity mismatch");
        return Err(SemanticError::new(
            SemanticErrorKind::ArityMismatch {
                selector,
                expected,
                found,
            },
            method.selector.span(),
        ));
    }

    Ok(Element::new("method")
        .with_attribute("selector", selector)
        .with_child(lower_block(&method.body)?))
}

fn lower_block(block: &Block) -> Result<Element, SemanticError> {
    let mut element =
        Element::new("block").with_attribute("arity", eco_format!("{}", block.arity()));

    for (index, parameter) in block.parameters.iter().enumerate() {
        element.push_child(
            Element::new("parameter")
                .with_attribute("name", parameter.name.clone())
                .with_attribute("order", order(index)),
        );
    }

    for (index, statement) in block.body.iter().enumerate() {
        element.push_child(lower_statement(block, statement, index)?);
    }

    Ok(element)
}

fn lower_statement(
    block: &Block,
    statement: &Statement,
    index: usize,
) -> Result<Element, SemanticError> {
    let target = &statement.target;
    if block.has_parameter(&target.name) {
        debug!(name = %target.name, "assignment to parameter");
        return Err(SemanticError::new(
            SemanticErrorKind::ParameterAssignment {
                name: target.name.clone(),
            },
            target.span,
        ));
    }

    Ok(Element::new("assign")
        .with_attribute("order", order(index))
        .with_child(Element::new("var").with_attribute("name", target.name.clone()))
        .with_child(expr(lower_expression(&statement.value)?)))
}

/// Lowers an expression to the node an `expr` element wraps.
fn lower_expression(expression: &Expression) -> Result<Element, SemanticError> {
    let Some(message) = &expression.message else {
        return lower_primary(&expression.receiver);
    };

    let mut send = Element::new("send")
        .with_attribute("selector", message.selector())
        .with_child(expr(lower_primary(&expression.receiver)?));

    if let Message::Keyword(arguments) = message {
        for (index, argument) in arguments.iter().enumerate() {
            send.push_child(
                Element::new("arg")
                    .with_attribute("order", order(index))
                    .with_child(expr(lower_primary(&argument.argument)?)),
            );
        }
    }

    Ok(send)
}

fn lower_primary(primary: &Primary) -> Result<Element, SemanticError> {
    match primary {
        Primary::Literal(Literal::Block(block), _) => lower_block(block),
        Primary::Literal(Literal::Integer(text), _) => Ok(literal("Integer", text)),
        Primary::Literal(Literal::String(text), _) => Ok(literal("String", text)),
        Primary::Literal(Literal::ClassReference(name), _) => Ok(literal(name.clone(), name)),
        Primary::Variable(id) => Ok(Element::new("var").with_attribute("name", id.name.clone())),
        Primary::Parenthesized(inner, _) => lower_expression(inner),
    }
}

fn literal(class: impl Into<EcoString>, value: &EcoString) -> Element {
    Element::new("literal")
        .with_attribute("class", class)
        .with_attribute("value", value.clone())
}

fn expr(content: Element) -> Element {
    Element::new("expr").with_child(content)
}

/// 1-based position from a 0-based index.
fn order(index: usize) -> EcoString {
    eco_format!("{}", index + 1)
}
