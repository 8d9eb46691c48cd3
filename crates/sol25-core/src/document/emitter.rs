// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! XML serialisation of the document tree.
//!
//! Output is fully determined by the tree: a fixed header, one element per
//! line, two spaces of indentation per level, and childless elements written
//! as `<name attr="value" />`.

// Spurious warnings from miette derive macro expansion
#![allow(unused_assignments)]

use std::fmt::{self, Write};

use miette::Diagnostic;
use thiserror::Error;

use super::Element;

/// XML declaration written before the root element.
pub const HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

const INDENT: usize = 2;

/// The document could not be written.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("failed to write the output document")]
#[diagnostic(code(sol25::emit))]
pub struct EmitError {
    #[from]
    source: fmt::Error,
}

/// Serialises `root` into a string ending with a newline.
///
/// # Errors
///
/// Returns [`EmitError`] if formatting fails.
pub fn emit(root: &Element) -> Result<String, EmitError> {
    let mut output = String::new();
    write_document(&mut output, root)?;
    Ok(output)
}

/// Writes the header and `root` to `out`.
///
/// # Errors
///
/// Propagates any error from `out`.
pub fn write_document(out: &mut impl Write, root: &Element) -> fmt::Result {
    writeln!(out, "{HEADER}")?;
    write_element(out, root, 0)
}

fn write_element(out: &mut impl Write, element: &Element, depth: usize) -> fmt::Result {
    write!(out, "{:width$}<{}", "", element.name(), width = depth * INDENT)?;
    for (key, value) in element.attributes() {
        write!(out, " {key}=\"")?;
        write_escaped(out, value)?;
        out.write_char('"')?;
    }

    if element.children().is_empty() {
        return writeln!(out, " />");
    }

    writeln!(out, ">")?;
    for child in element.children() {
        write_element(out, child, depth + 1)?;
    }
    writeln!(out, "{:width$}</{}>", "", element.name(), width = depth * INDENT)
}

/// Writes an attribute value with XML special characters escaped.
///
/// Tab, line feed and carriage return are written as character references so
/// they survive attribute-value normalisation.
fn write_escaped(out: &mut impl Write, value: &str) -> fmt::Result {
    for c in value.chars() {
        match c {
            '&' => out.write_str("&amp;")?,
            '<' => out.write_str("&lt;")?,
            '>' => out.write_str("&gt;")?,
            '"' => out.write_str("&quot;")?,
            '\t' => out.write_str("&#9;")?,
            '\n' => out.write_str("&#10;")?,
            '\r' => out.write_str("&#13;")?,
            _ => out.write_char(c)?,
        }
    }
    Ok(())
}
