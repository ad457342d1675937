//! Student-id extraction from OCR text.

use once_cell::sync::Lazy;
use regex::Regex;

/// Student-id card label followed by the digit run we want.
static STUDENT_ID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"เลขประจำตัวนักเรียน\s(\d+)").unwrap());

/// Extract a student id from recognized card text.
///
/// Returns the digit run after the first occurrence of the label, exactly
/// as it appears (no trimming of leading zeros). `None` when the label is
/// absent or the text is empty. Subsequent matches are ignored.
pub fn extract_student_id(text: &str) -> Option<&str> {
    STUDENT_ID_PATTERN
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
