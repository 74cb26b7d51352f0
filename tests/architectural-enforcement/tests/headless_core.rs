//! Integration Test: Headless Core
//!
//! **Policy**: `quotes-core` holds the quote rotation state and nothing
//! terminal- or runtime-specific. Surfaces own rendering, input and the
//! event loop.

use std::fs;

use architectural_enforcement::{code_part, rust_files, workspace_root};

/// Crates only a surface may depend on
const SURFACE_CRATES: &[&str] = &["ratatui", "crossterm", "tokio", "futures", "clap"];

#[test]
fn test_core_sources_do_not_use_surface_crates() {
    let mut violations = Vec::new();

    for file in rust_files("quotes/core/src") {
        for (idx, line) in file.lines().iter().enumerate() {
            let code = code_part(line);
            for krate in SURFACE_CRATES {
                if code.contains(&format!("{krate}::")) {
                    violations.push(format!(
                        "{}:{} - {}",
                        file.path.display(),
                        idx + 1,
                        line.trim()
                    ));
                }
            }
        }
    }

    assert!(
        violations.is_empty(),
        "surface crates used in quotes-core:\n{}",
        violations.join("\n")
    );
}

#[test]
fn test_core_manifest_has_no_surface_dependencies() {
    let manifest = fs::read_to_string(workspace_root().join("quotes/core/Cargo.toml"))
        .expect("read quotes-core manifest");

    let offenders: Vec<&str> = manifest
        .lines()
        .map(str::trim)
        .filter(|line| {
            SURFACE_CRATES
                .iter()
                .any(|krate| line.starts_with(&format!("{krate} ")) || line.starts_with(&format!("{krate}=")))
        })
        .collect();

    assert!(offenders.is_empty(), "quotes-core depends on {offenders:?}");
}

#[test]
fn test_core_does_not_read_the_clock() {
    // Time enters the core only as Tick(delta)
    for file in rust_files("quotes/core/src") {
        for (idx, line) in file.lines().iter().enumerate() {
            let code = code_part(line);
            assert!(
                !code.contains("Instant::now") && !code.contains("SystemTime::now"),
                "{}:{} reads the wall clock",
                file.path.display(),
                idx + 1
            );
        }
    }
}
