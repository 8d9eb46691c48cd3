// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for pipeline crash safety testing.
//!
//! Feeds arbitrary bytes through lexing, parsing, lowering and emission and
//! asserts that nothing panics. Every input must end in either a document
//! or a `CompileError` with one of the documented exit codes.

#![no_main]

use libfuzzer_sys::fuzz_target;
use sol25_core::compile::compile_bytes;

fuzz_target!(|data: &[u8]| {
    match compile_bytes(data) {
        Ok(document) => assert!(document.ends_with("</program>\n")),
        Err(err) => assert!(matches!(err.exit_code(), 21 | 22 | 31 | 33 | 34 | 35)),
    }
});
