//! Interaction tracking records.
//!
//! Events are emitted on the `viewfx::analytics` tracing target; whatever
//! subscriber is installed decides where they go.

use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsEvent {
    pub category: String,
    pub action: String,
    pub label: String,
    pub timestamp: DateTime<Utc>,
}

pub fn track_event(
    category: impl Into<String>,
    action: impl Into<String>,
    label: impl Into<String>,
) -> AnalyticsEvent {
    let event = AnalyticsEvent {
        category: category.into(),
        action: action.into(),
        label: label.into(),
        timestamp: Utc::now(),
    };

    tracing::info!(
        target: "viewfx::analytics",
        category = %event.category,
        action = %event.action,
        label = %event.label,
        "Tracked event"
    );

    event
}

/// Record a click on a button, labelled by its visible text
pub fn button_click(text: &str) -> AnalyticsEvent {
    track_event("Button", "Click", text.trim())
}

/// Record a form submission, labelled by the form's name
pub fn form_submit(name: Option<&str>) -> AnalyticsEvent {
    let name = name.filter(|n| !n.is_empty()).unwrap_or("unnamed_form");
    track_event("Form", "Submit", name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_click_trims_label() {
        let event = button_click("  Get Started \n");
        assert_eq!(event.category, "Button");
        assert_eq!(event.action, "Click");
        assert_eq!(event.label, "Get Started");
    }

    #[test]
    fn test_form_submit_defaults_name() {
        assert_eq!(form_submit(None).label, "unnamed_form");
        assert_eq!(form_submit(Some("")).label, "unnamed_form");
        assert_eq!(form_submit(Some("newsletter")).label, "newsletter");
    }

    #[test]
    fn test_event_serializes() {
        let json = serde_json::to_value(track_event("Video", "Play", "hero")).unwrap();
        assert_eq!(json["category"], "Video");
        assert_eq!(json["label"], "hero");
        assert!(json["timestamp"].is_string());
    }
}
