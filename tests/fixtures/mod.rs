//! Shared test fixtures for decoder and CLI tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Directory holding the fixture documents.
pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

/// Full path to a fixture document.
pub fn fixture_path(name: &str) -> PathBuf {
    fixtures_dir().join(name)
}

/// Reads a fixture document as text.
pub fn fixture_text(name: &str) -> String {
    fs::read_to_string(fixture_path(name)).expect("Failed to read fixture")
}

/// Writes layout text to a file in a temp directory and returns the path.
///
/// Keep the returned `TempDir` alive for as long as the file is needed.
pub fn create_temp_layout_file(contents: impl AsRef<[u8]>) -> (PathBuf, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let layout_path = temp_dir.path().join("layout.json");
    fs::write(&layout_path, contents).expect("Failed to write layout file");
    (layout_path, temp_dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixtures_present() {
        for name in ["numpad.json", "rotated_cluster.json", "raw_pane.txt"] {
            assert!(fixture_path(name).exists(), "missing fixture {name}");
        }
    }
}
