//! Fragment classification
//!
//! Maps an uncolored fragment to a [`StatusCategory`] using the literal,
//! prefix and suffix forms a pytest-style runner prints. Rules are checked
//! in a fixed order and the first match wins, since some predicates overlap
//! in what they could plausibly see (a summary line is checked as a failure
//! before anything looks for error text).

use serde::{Deserialize, Serialize};

/// Semantic category of a fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusCategory {
    Passed,
    Failed,
    Error,
    Skipped,
    ExpectedFail,
    /// No rule matched; the surface keeps its ambient color
    Normal,
}

impl StatusCategory {
    /// All categories in precedence order
    pub const ALL: [StatusCategory; 6] = [
        StatusCategory::Passed,
        StatusCategory::Failed,
        StatusCategory::Error,
        StatusCategory::Skipped,
        StatusCategory::ExpectedFail,
        StatusCategory::Normal,
    ];
}

/// Classify a fragment. Total: every string yields exactly one category.
pub fn classify(text: &str) -> StatusCategory {
    if is_passed(text) {
        StatusCategory::Passed
    } else if is_failed(text) {
        StatusCategory::Failed
    } else if is_error(text) {
        StatusCategory::Error
    } else if is_skipped(text) {
        StatusCategory::Skipped
    } else if is_xfail(text) {
        StatusCategory::ExpectedFail
    } else {
        StatusCategory::Normal
    }
}

fn is_passed(text: &str) -> bool {
    text == "PASSED" || text == "."
}

fn is_failed(text: &str) -> bool {
    match text {
        "FAILED" | "F" => true,
        // Summary banner, e.g. "=== 3 failed, 1 passed ==="
        _ if text.starts_with("===") && text.contains("failed") => true,
        // Section header of a failing test
        _ if text.starts_with("___") => true,
        // Traceback frame location. Heuristic: any fragment ending in ".py".
        _ => text.ends_with(".py"),
    }
}

fn is_error(text: &str) -> bool {
    text == "ERROR" || text == "E" || text.starts_with("E ")
}

fn is_skipped(text: &str) -> bool {
    text == "SKIPPED" || text == "s"
}

fn is_xfail(text: &str) -> bool {
    text == "XFAIL" || text == "x"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passed_literals() {
        assert_eq!(classify("PASSED"), StatusCategory::Passed);
        assert_eq!(classify("."), StatusCategory::Passed);
    }

    #[test]
    fn test_passed_is_exact() {
        assert_eq!(classify("PASSED "), StatusCategory::Normal);
        assert_eq!(classify(".."), StatusCategory::Normal);
        assert_eq!(classify("passed"), StatusCategory::Normal);
    }

    #[test]
    fn test_failed_literals() {
        assert_eq!(classify("FAILED"), StatusCategory::Failed);
        assert_eq!(classify("F"), StatusCategory::Failed);
    }

    #[test]
    fn test_failed_summary_banner() {
        assert_eq!(classify("=== 3 failed, 1 passed ==="), StatusCategory::Failed);
        assert_eq!(classify("=== 4 passed in 0.12s ==="), StatusCategory::Normal);
        // "failed" must appear after a leading banner, not anywhere
        assert_eq!(classify("1 failed ==="), StatusCategory::Normal);
    }

    #[test]
    fn test_failed_section_header() {
        assert_eq!(classify("___ test_addition ___"), StatusCategory::Failed);
        assert_eq!(classify("___"), StatusCategory::Failed);
    }

    #[test]
    fn test_failed_source_file_heuristic() {
        assert_eq!(classify("tests/test_math.py"), StatusCategory::Failed);
        assert_eq!(classify(".py"), StatusCategory::Failed);
        assert_eq!(classify("tests/test_math.py:12"), StatusCategory::Normal);
    }

    #[test]
    fn test_error_forms() {
        assert_eq!(classify("ERROR"), StatusCategory::Error);
        assert_eq!(classify("E"), StatusCategory::Error);
        assert_eq!(classify("E   assert False"), StatusCategory::Error);
        assert_eq!(classify("Error"), StatusCategory::Normal);
        assert_eq!(classify("EE"), StatusCategory::Normal);
    }

    #[test]
    fn test_skipped_and_xfail() {
        assert_eq!(classify("SKIPPED"), StatusCategory::Skipped);
        assert_eq!(classify("s"), StatusCategory::Skipped);
        assert_eq!(classify("XFAIL"), StatusCategory::ExpectedFail);
        assert_eq!(classify("x"), StatusCategory::ExpectedFail);
    }

    #[test]
    fn test_normal_fallback() {
        assert_eq!(classify(""), StatusCategory::Normal);
        assert_eq!(classify("collected 4 items"), StatusCategory::Normal);
        assert_eq!(classify("PASSED\n"), StatusCategory::Normal);
    }

    #[test]
    fn test_precedence_failed_before_error() {
        // Matches both the ".py" failure rule and the "E " error prefix
        assert_eq!(classify("E   in helpers.py"), StatusCategory::Failed);
    }
}
