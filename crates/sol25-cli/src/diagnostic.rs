// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Error diagnostics using miette.
//!
//! Binds a [`CompileError`] to the text read from standard input so the
//! report shows:
//! - Source code context around the error
//! - A label pointing at the error location
//! - The diagnostic code (`sol25::lex`, `sol25::syntax`, `sol25::semantic::*`)

use miette::{NamedSource, Report};
use sol25_core::compile::CompileError;

/// Name the input is shown under in diagnostics.
pub const SOURCE_NAME: &str = "<stdin>";

/// Turns a compile error into a report carrying its source text.
pub fn report(err: CompileError, source: &str) -> Report {
    Report::new(err).with_source_code(NamedSource::new(SOURCE_NAME, source.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use miette::{GraphicalReportHandler, GraphicalTheme};
    use sol25_core::compile::compile;

    fn render(source: &str) -> String {
        let err = compile(source).expect_err("expected a compile error");
        let report = report(err, source);
        let mut out = String::new();
        GraphicalReportHandler::new_themed(GraphicalTheme::unicode_nocolor())
            .render_report(&mut out, &*report)
            .expect("rendering should succeed");
        out
    }

    #[test]
    fn syntax_error_report() {
        let out = render("class Main : Object { run [ | x := 1 ] }");
        assert!(out.contains("sol25::syntax"), "{out}");
        assert!(out.contains(SOURCE_NAME), "{out}");
        assert!(out.contains("found ']'"), "{out}");
    }

    #[test]
    fn lexical_error_report() {
        let out = render("class Main : Object { run [ | x := #. ] }");
        assert!(out.contains("sol25::lex"), "{out}");
        assert!(out.contains("unexpected character '#'"), "{out}");
    }

    #[test]
    fn semantic_error_report() {
        let out = render("class Main : Object { run [ | ] at: [ | ] }");
        assert!(out.contains("sol25::semantic::arity"), "{out}");
        assert!(out.contains("selector declared here"), "{out}");
    }
}
