//! Per-test scratch directories for processor and writer tests

use std::sync::atomic::{AtomicU64, Ordering};
use tempfile::TempDir;

static TEMP_DIR_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Create a temp directory named after the test
///
/// The counter keeps names distinct when the same test name is used twice
/// in one run, which makes leftover directories easy to attribute.
pub fn unique_temp_dir(test_name: &str) -> TempDir {
    let counter = TEMP_DIR_COUNTER.fetch_add(1, Ordering::SeqCst);

    tempfile::Builder::new()
        .prefix(&format!("classmap_test_{}_{}", test_name, counter))
        .tempdir()
        .expect("Failed to create temp directory")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_dirs_are_distinct_and_named() {
        let first = unique_temp_dir("writer");
        let second = unique_temp_dir("writer");

        assert_ne!(first.path(), second.path());
        assert!(
            first
                .path()
                .to_string_lossy()
                .contains("classmap_test_writer"),
            "unexpected temp dir name: {}",
            first.path().display()
        );
    }
}
