//! Form input checks.

use std::sync::OnceLock;

use regex::Regex;

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"))
}

/// Loose email check: something, an `@`, a domain with a dot.
pub fn is_valid_email(input: &str) -> bool {
    email_pattern().is_match(input)
}
