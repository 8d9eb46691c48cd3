// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! The attributed document tree a SOL25 program lowers to.
//!
//! [`lower`] walks a parsed [`Program`](crate::ast::Program), checks the
//! structural rules the grammar cannot express, and builds an [`Element`]
//! tree. [`emit`] serialises that tree as XML.
//!
//! ```
//! use sol25_core::document::{emit, lower};
//! use sol25_core::source_analysis::{lex_with_eof, parse};
//!
//! let program = parse(lex_with_eof("class Main : Object { run [ | ] }").unwrap()).unwrap();
//! let root = lower(&program, None).unwrap();
//! assert_eq!(root.name(), "program");
//! assert!(emit(&root).unwrap().contains(r#"<method selector="run">"#));
//! ```

mod emitter;
mod error;
mod lowering;

#[cfg(test)]
mod property_tests;

use ecow::EcoString;

pub use emitter::{EmitError, HEADER, emit, write_document};
pub use error::{SemanticError, SemanticErrorKind};
pub use lowering::{LANGUAGE, lower};

/// One element of the document tree.
///
/// Attributes keep insertion order; the emitter writes them in that order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: &'static str,
    attributes: Vec<(&'static str, EcoString)>,
    children: Vec<Element>,
}

impl Element {
    /// Creates an element with no attributes or children.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Adds an attribute.
    #[must_use]
    pub fn with_attribute(mut self, key: &'static str, value: impl Into<EcoString>) -> Self {
        self.attributes.push((key, value.into()));
        self
    }

    /// Adds a child element.
    #[must_use]
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Appends a child element.
    pub fn push_child(&mut self, child: Element) {
        self.children.push(child);
    }

    /// The element name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the value of the attribute `key`, if set.
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// The attributes, in insertion order.
    #[must_use]
    pub fn attributes(&self) -> &[(&'static str, EcoString)] {
        &self.attributes
    }

    /// The child elements, in order.
    #[must_use]
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Returns the children named `name`, in order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.children.iter().filter(move |child| child.name == name)
    }
}
