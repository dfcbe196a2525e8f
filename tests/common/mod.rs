#![allow(dead_code)]

pub mod fixtures;

use quire::Parser;
use std::collections::HashMap;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A prefix map from `(prefix, uri)` pairs.
pub fn namespaces(bindings: &[(&str, &str)]) -> HashMap<String, String> {
    bindings
        .iter()
        .map(|(prefix, uri)| (prefix.to_string(), uri.to_string()))
        .collect()
}

/// Fails the test if the parser still owns any token strings.
pub fn assert_no_pending_strings(parser: &Parser) {
    assert_eq!(
        parser.pending_strings(),
        0,
        "parser left strings in its arena"
    );
}

