//! Live filtering of listed items by a search box.

/// Whether `text` should stay shown for the search `term`.
///
/// Case-insensitive substring match; an empty term shows everything.
pub fn matches(term: &str, text: &str) -> bool {
    text.to_lowercase().contains(&term.to_lowercase())
}

/// Visibility of each item for `term`, in input order
pub fn filter_items<S: AsRef<str>>(term: &str, items: &[S]) -> Vec<bool> {
    let term = term.to_lowercase();
    items
        .iter()
        .map(|item| item.as_ref().to_lowercase().contains(&term))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ITEMS: &[&str] = &[
        "Strength Training",
        "Yoga Basics",
        "HIIT: strength & cardio",
        "Nutrition Plans",
    ];

    #[test]
    fn test_filter_is_case_insensitive() {
        assert_eq!(filter_items("STRENGTH", ITEMS), vec![true, false, true, false]);
        assert_eq!(filter_items("yoga", ITEMS), vec![false, true, false, false]);
    }

    #[test]
    fn test_empty_term_shows_everything() {
        assert_eq!(filter_items("", ITEMS), vec![true; 4]);
        assert!(matches("", ""));
    }

    #[test]
    fn test_no_match_hides_everything() {
        assert_eq!(filter_items("pilates", ITEMS), vec![false; 4]);
        assert!(filter_items::<&str>("yoga", &[]).is_empty());
    }

    #[test]
    fn test_substring_not_word_match() {
        assert!(matches("tion", "Nutrition Plans"));
        assert!(matches("& c", "HIIT: strength & cardio"));
        assert!(!matches("yoga  basics", "Yoga Basics"));
    }
}
