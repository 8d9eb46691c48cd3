// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Property-based tests for lowering and emission.
//!
//! 1. **Numbering is local**: every block numbers its statements 1..N and
//!    every send numbers its arguments 1..N, however they nest
//! 2. **Emission is deterministic**

use proptest::prelude::*;

use super::{Element, emit, lower};
use crate::source_analysis::{lex_with_eof, parse};

/// A block literal with random statement counts at up to three levels.
fn block_source() -> impl Strategy<Value = String> {
    let leaf = (0usize..4).prop_map(|n| {
        let body: Vec<String> = (0..n).map(|i| format!("v{i} := {i}.")).collect();
        format!("[ | {} ]", body.join(" "))
    });
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop::collection::vec(inner, 0..4).prop_map(|blocks| {
            let body: Vec<String> = blocks
                .iter()
                .enumerate()
                .map(|(i, block)| format!("b{i} := obj with: {block} and: {i}."))
                .collect();
            format!("[ | {} ]", body.join(" "))
        })
    })
}

fn program_source() -> impl Strategy<Value = String> {
    block_source().prop_map(|block| format!("class Main : Object {{ run {block} }}"))
}

fn lower_source(source: &str) -> Element {
    let program = parse(lex_with_eof(source).unwrap()).unwrap();
    lower(&program, None).unwrap()
}

/// Checks that numbered children of every element count up from 1.
fn check_local_numbering(element: &Element) -> Result<(), TestCaseError> {
    for name in ["parameter", "assign", "arg"] {
        let orders: Vec<&str> = element
            .children_named(name)
            .filter_map(|child| child.attribute("order"))
            .collect();
        let expected: Vec<String> = (1..=orders.len()).map(|n| n.to_string()).collect();
        prop_assert_eq!(orders, expected, "in <{}>", element.name());
    }
    for child in element.children() {
        check_local_numbering(child)?;
    }
    Ok(())
}

fn proptest_config() -> ProptestConfig {
    let default = ProptestConfig::default();
    ProptestConfig {
        cases: default.cases.max(256),
        ..default
    }
}

proptest! {
    #![proptest_config(proptest_config())]

    #[test]
    fn numbering_is_local(source in program_source()) {
        check_local_numbering(&lower_source(&source))?;
    }

    #[test]
    fn emission_is_deterministic(source in program_source()) {
        let first = emit(&lower_source(&source)).unwrap();
        let second = emit(&lower_source(&source)).unwrap();
        prop_assert_eq!(first, second);
    }
}
