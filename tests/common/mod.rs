#![allow(dead_code)]

pub mod http;

use patterncraft::config::load_configuration_for_tests;

// Ensure configuration is loaded once for all tests in this binary
static INIT: std::sync::Once = std::sync::Once::new();

pub fn ensure_config() {
    INIT.call_once(|| {
        load_configuration_for_tests().expect("Failed to load configuration for tests");
    });
}

/// `n` rows of a single `value` column.
pub fn single_column_csv(values: impl IntoIterator<Item = f64>) -> String {
    let mut csv = String::from("value\n");
    for value in values {
        csv.push_str(&format!("{}\n", value));
    }
    csv
}
