//! Architectural Enforcement Integration Tests
//!
//! This package contains integration tests that enforce architectural principles:
//! - No sleep() calls in production code; time only advances through ticks
//! - The quote core stays headless (no terminal or runtime crates)
//!
//! These tests are designed to catch violations early in the development cycle.
//! The helpers below are shared by the test files under `tests/`.

use std::fs;
use std::path::{Path, PathBuf};

/// Workspace root, two levels above this package
pub fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("..")
}

/// A source file with its lines loaded
pub struct SourceFile {
    pub path: PathBuf,
    pub content: String,
}

impl SourceFile {
    pub fn lines(&self) -> Vec<&str> {
        self.content.lines().collect()
    }
}

/// All `.rs` files under `dir` (relative to the workspace root)
pub fn rust_files(dir: &str) -> Vec<SourceFile> {
    let path = workspace_root().join(dir);
    if !path.exists() {
        return Vec::new();
    }

    walkdir::WalkDir::new(path)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().and_then(|s| s.to_str()) == Some("rs"))
        .filter_map(|e| {
            let content = fs::read_to_string(e.path()).ok()?;
            Some(SourceFile {
                path: e.path().to_path_buf(),
                content,
            })
        })
        .collect()
}

/// The part of a line before any `//` comment
pub fn code_part(line: &str) -> &str {
    line.split("//").next().unwrap_or(line)
}

/// Check if line is inside a test function or a `#[cfg(test)]` module
pub fn is_in_test_code(lines: &[&str], current_idx: usize) -> bool {
    let mut checked_fn = false;

    // Scan backwards for #[cfg(test)], or #[test] on the enclosing fn
    for i in (0..current_idx).rev() {
        let line = lines[i].trim();

        if line.starts_with("#[cfg(test)]") {
            return true;
        }

        let is_fn = line.starts_with("fn ")
            || line.starts_with("pub fn ")
            || line.starts_with("async fn ");
        if is_fn && !checked_fn {
            checked_fn = true;
            let attr = i.checked_sub(1).map_or("", |j| lines[j].trim());
            if attr.starts_with("#[test]") || attr.starts_with("#[tokio::test") {
                return true;
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_part_strips_comments() {
        assert_eq!(code_part("let x = 1; // sleep(1)"), "let x = 1; ");
        assert_eq!(code_part("no comment"), "no comment");
    }

    #[test]
    fn test_test_module_detection() {
        let code = vec![
            "fn production() {}",
            "#[cfg(test)]",
            "mod tests {",
            "    fn helper() {",
            "        std::thread::sleep(d);",
            "    }",
            "}",
        ];
        assert!(is_in_test_code(&code, 4));
        assert!(!is_in_test_code(&code, 0));
    }

    #[test]
    fn test_workspace_root_has_members() {
        assert!(workspace_root().join("quotes/core/src/lib.rs").exists());
        assert!(workspace_root().join("tui/src/app.rs").exists());
    }
}
