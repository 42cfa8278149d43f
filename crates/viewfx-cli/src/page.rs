//! Page layout files for `viewfx simulate`.
//!
//! A page is a viewport height, a list of elements positioned in page
//! coordinates, and a scroll script:
//!
//! ```toml
//! viewport_height = 800
//!
//! [[element]]
//! name = "athletes"
//! kind = "counter"
//! top = 1200
//! height = 120
//! text = "0+"
//! target = "150"
//!
//! [[scroll]]
//! at_ms = 500
//! y = 900
//! ```

use std::collections::HashSet;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

pub const DEMO_PAGE: &str = r#"
viewport_height = 800

[[element]]
name = "hero-card"
kind = "fade"
top = 200
height = 300

[[element]]
name = "athletes"
kind = "counter"
top = 1100
height = 120
text = "0+"
target = "150"

[[element]]
name = "sessions"
kind = "counter"
top = 1100
height = 120
text = "0"
target = "9999"

[[element]]
name = "coaches"
kind = "counter"
top = 1100
height = 120
text = "0+"
target = "50"

[[element]]
name = "pillar-card"
kind = "fade"
top = 1600
height = 400

[[element]]
name = "news-card"
kind = "fade"
top = 2400
height = 400

[[scroll]]
at_ms = 0
y = 0

[[scroll]]
at_ms = 400
y = 300

[[scroll]]
at_ms = 450
y = 500

[[scroll]]
at_ms = 500
y = 700

[[scroll]]
at_ms = 1500
y = 1400

[[scroll]]
at_ms = 2200
y = 2000

[[scroll]]
at_ms = 2600
y = 0
"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Counter,
    Fade,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Element {
    pub name: String,
    pub kind: ElementKind,
    pub top: f64,
    pub height: f64,
    /// Initial display text (counters)
    #[serde(default)]
    pub text: String,
    /// Raw target value (counters)
    #[serde(default)]
    pub target: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ScrollStep {
    pub at_ms: u64,
    pub y: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Page {
    pub viewport_height: f64,
    #[serde(default, rename = "element")]
    pub elements: Vec<Element>,
    #[serde(default, rename = "scroll")]
    pub scroll: Vec<ScrollStep>,
}

impl Page {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read page file {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid page file {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let mut page: Page = toml::from_str(content)?;
        page.validate()?;
        page.scroll.sort_by_key(|step| step.at_ms);
        Ok(page)
    }

    fn validate(&self) -> Result<()> {
        if self.viewport_height <= 0.0 {
            bail!("viewport_height must be positive");
        }

        let mut names = HashSet::new();
        for element in &self.elements {
            if !names.insert(element.name.as_str()) {
                bail!("duplicate element name '{}'", element.name);
            }
            if element.height < 0.0 {
                bail!("element '{}' has a negative height", element.name);
            }
        }

        Ok(())
    }

    /// Time of the last scripted scroll
    pub fn duration_ms(&self) -> u64 {
        self.scroll.last().map(|step| step.at_ms).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_page_parses() {
        let page = Page::parse(DEMO_PAGE).unwrap();
        assert_eq!(page.viewport_height, 800.0);
        assert_eq!(page.elements.len(), 6);
        assert_eq!(page.elements[1].kind, ElementKind::Counter);
        assert_eq!(page.elements[1].target.as_deref(), Some("150"));
        assert_eq!(page.duration_ms(), 2600);
    }

    #[test]
    fn test_scroll_sorted() {
        let page = Page::parse(
            r#"
            viewport_height = 600
            [[scroll]]
            at_ms = 300
            y = 10
            [[scroll]]
            at_ms = 100
            y = 20
            "#,
        )
        .unwrap();
        let times: Vec<u64> = page.scroll.iter().map(|s| s.at_ms).collect();
        assert_eq!(times, vec![100, 300]);
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let result = Page::parse(
            r#"
            viewport_height = 600
            [[element]]
            name = "a"
            kind = "fade"
            top = 0
            height = 10
            [[element]]
            name = "a"
            kind = "fade"
            top = 20
            height = 10
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_empty_viewport() {
        assert!(Page::parse("viewport_height = 0").is_err());
    }
}
