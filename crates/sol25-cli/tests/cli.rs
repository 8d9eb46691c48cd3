// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! End-to-end tests for the `sol25-parse` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;

fn sol25_parse() -> Command {
    let mut cmd = Command::cargo_bin("sol25-parse").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Runs the binary on `source` and checks it fails with `code` and no stdout.
fn assert_fails(source: impl Into<Vec<u8>>, code: i32, diagnostic_code: &str) {
    sol25_parse()
        .write_stdin(source)
        .assert()
        .code(code)
        .stdout(predicate::str::is_empty())
        .stderr(contains(diagnostic_code));
}

const ROUND_TRIP: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<program language="SOL25" description="desc">
  <class name="Main" parent="Object">
    <method selector="run">
      <block arity="0">
        <assign order="1">
          <var name="x" />
          <expr>
            <literal class="Integer" value="1" />
          </expr>
        </assign>
      </block>
    </method>
  </class>
</program>
"#;

#[test]
fn round_trip_document_is_byte_exact() {
    sol25_parse()
        .write_stdin("\"desc\"\nclass Main : Object {\n  run [ | x := 1. ]\n}\n")
        .assert()
        .success()
        .stdout(ROUND_TRIP)
        .stderr(predicate::str::is_empty());
}

#[test]
fn keyword_send_arguments_are_numbered() {
    sol25_parse()
        .write_stdin("class Main : Object { run [ | x := Foo new: 1 with: 2. ] }")
        .assert()
        .success()
        .stdout(
            contains(r#"<send selector="new:with:">"#)
                .and(contains(r#"<literal class="Foo" value="Foo" />"#))
                .and(contains(r#"<arg order="1">"#))
                .and(contains(r#"<arg order="2">"#))
                .and(contains(r#"<arg order="3">"#).not()),
        );
}

#[test]
fn nested_block_numbering_restarts() {
    let output = sol25_parse()
        .write_stdin("class Main : Object { run [ | a := [ | b := 1. c := 2. ]. d := 3. ] }")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(output).unwrap();
    let orders: Vec<&str> = text
        .lines()
        .filter_map(|line| line.trim().strip_prefix("<assign order=\""))
        .collect();
    assert_eq!(orders, ["1\">", "1\">", "2\">", "2\">"]);
}

#[test]
fn help_alone_succeeds() {
    sol25_parse()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("Usage"));
    sol25_parse().arg("-h").assert().success();
}

#[test]
fn help_with_other_arguments_fails() {
    sol25_parse()
        .args(["--help", "extra"])
        .assert()
        .code(10)
        .stdout(predicate::str::is_empty());
}

#[test]
fn unknown_arguments_fail() {
    sol25_parse().arg("--source=x.sol").assert().code(10);
    sol25_parse().arg("input.sol").assert().code(10);
}

#[test]
fn bare_separator_is_rejected() {
    sol25_parse()
        .arg("--")
        .write_stdin("class Main : Object { run [ | ] }")
        .assert()
        .code(10)
        .stdout(predicate::str::is_empty());
}

#[test]
fn lexical_errors_exit_21() {
    assert_fails("class Main : Object { run [ | x := 1 ! ] }", 21, "sol25::lex");
    assert_fails("class Main : Object { run [ | x := 'open. ] }", 21, "sol25::lex");
    assert_fails("\"unterminated comment", 21, "sol25::lex");
    assert_fails(b"class Main \xfe".to_vec(), 21, "sol25::lex");
}

#[test]
fn syntax_errors_exit_22() {
    assert_fails("class Main : Object { run [ | x := 1 ] }", 22, "sol25::syntax");
    assert_fails("", 22, "sol25::syntax");
    assert_fails("class Main : Object { run [ | x := (). ] }", 22, "sol25::syntax");
}

#[test]
fn missing_entry_point_exits_31() {
    assert_fails("class Foo : Object { run [ | ] }", 31, "sol25::semantic::entry_point");
    assert_fails(
        "class Main : Object { run: [ :x | ] }",
        31,
        "sol25::semantic::entry_point",
    );
}

#[test]
fn arity_mismatch_exits_33() {
    assert_fails(
        "class Main : Object { run [ | ] at:put: [ :a | ] }",
        33,
        "sol25::semantic::arity",
    );
}

#[test]
fn parameter_assignment_exits_34() {
    assert_fails(
        "class Main : Object { run [ | ] set: [ :x | x := 1. ] }",
        34,
        "sol25::semantic::parameter_assignment",
    );
}

#[test]
fn output_is_deterministic() {
    let source = "\"d\" class Main : Object { run [ | x := (self a: 1 b: [ :y | z := y. ]) c. ] }";
    let first = sol25_parse().write_stdin(source).assert().success().get_output().stdout.clone();
    let second = sol25_parse().write_stdin(source).assert().success().get_output().stdout.clone();
    assert_eq!(first, second);
}
