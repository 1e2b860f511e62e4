//! Input normalization for verification requests

use once_cell::sync::Lazy;
use regex::Regex;

// Exactly six ASCII digits
static CODE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{6}$").expect("code pattern is valid")
});

/// Trim and lower-case a submitted email. No shape check is applied.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Trim a submitted code
pub fn normalize_code(code: &str) -> String {
    code.trim().to_string()
}

/// Check that a (normalized) code is exactly six decimal digits
pub fn is_six_digit_code(code: &str) -> bool {
    CODE_REGEX.is_match(code)
}
