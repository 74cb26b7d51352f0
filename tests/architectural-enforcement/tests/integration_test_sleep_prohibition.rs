//! Integration Test: Sleep Prohibition
//!
//! **Policy**: Production code MUST NOT call sleep methods. The deferred quote
//! pick is a pending handle advanced by frame ticks, and the TUI paces frames
//! with `tokio::time::interval`.
//! **Exceptions**: test code

use architectural_enforcement::{code_part, is_in_test_code, rust_files};

/// Test that production code does not contain sleep() calls
#[test]
fn test_no_sleep_in_production_code() {
    let violations = find_sleep_violations();

    if !violations.is_empty() {
        eprintln!("\nCRITICAL: Sleep calls found in production code!\n");

        for violation in &violations {
            eprintln!("  {}", violation);
        }

        eprintln!("\nACCEPTABLE alternatives:");
        eprintln!("  - Schedule a pending transition and advance it with Tick(delta)");
        eprintln!("  - Periodic work using tokio::time::interval()");

        panic!(
            "\nFound {} sleep violation(s) in production code.\nFix these before merging!",
            violations.len()
        );
    }
}

/// Find all sleep() calls in production code
fn find_sleep_violations() -> Vec<String> {
    let mut violations = Vec::new();

    for dir in ["quotes/core/src", "tui/src"] {
        for file in rust_files(dir) {
            let lines = file.lines();
            for (idx, line) in lines.iter().enumerate() {
                let code = code_part(line);
                if !(code.contains("::sleep(") || code.contains(".sleep(")) {
                    continue;
                }
                if is_in_test_code(&lines, idx) {
                    continue;
                }
                violations.push(format!(
                    "{}:{} - {}",
                    file.path.display(),
                    idx + 1,
                    line.trim()
                ));
            }
        }
    }

    violations
}

#[test]
fn test_production_sources_found() {
    // An empty walk would make the prohibition pass vacuously
    assert!(!rust_files("quotes/core/src").is_empty());
    assert!(!rust_files("tui/src").is_empty());
}
