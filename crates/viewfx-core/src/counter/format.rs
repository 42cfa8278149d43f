//! Display text helpers for counters.

/// Trailing marker kept on every displayed value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Suffix {
    #[default]
    None,
    /// "150+" style open-ended figures
    Plus,
}

impl Suffix {
    /// Detect the suffix from an element's original text
    pub fn detect(text: &str) -> Self {
        if text.contains('+') {
            Suffix::Plus
        } else {
            Suffix::None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Suffix::None => "",
            Suffix::Plus => "+",
        }
    }

    pub fn apply(&self, value: u64) -> String {
        format!("{}{}", value, self.as_str())
    }
}

/// Parse the leading integer of a target attribute.
///
/// Leading whitespace and a `+` sign are accepted and parsing stops at the
/// first non-digit, so `"150+"` reads as 150. Returns `None` for text that
/// does not start with a non-negative integer.
pub fn parse_target(text: &str) -> Option<u64> {
    let text = text.trim_start();
    let text = text.strip_prefix('+').unwrap_or(text);
    let digits = text
        .find(|c: char| !c.is_ascii_digit())
        .map_or(text, |end| &text[..end]);

    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}
