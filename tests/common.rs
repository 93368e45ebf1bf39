//! Shared helpers for the integration suites

use jago::{translate_source, Config};

/// Initialize logging once per test binary
pub fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Translate a single Java source string, panicking on failure
pub fn translate(source: &str) -> String {
    init();
    translate_source(source, &Config::default()).expect("translation failed")
}

/// Collapse all whitespace to single spaces, for layout-insensitive
/// assertions
pub fn flat(source: &str) -> String {
    source.split_whitespace().collect::<Vec<_>>().join(" ")
}
