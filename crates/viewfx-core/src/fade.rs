//! Fade-in style states.
//!
//! A fade is two style writes: `hidden` (transparent, pushed down, with the
//! transition attached) and, after a short settle delay, `shown`. The
//! transition on the element animates between them.

use std::fmt;
use std::time::Duration;

use serde::Serialize;

use crate::config::FadeConfig;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FadeStyle {
    pub opacity: f64,
    pub translate_y_px: f64,
    pub transition: Duration,
}

impl FadeStyle {
    pub fn hidden(offset_px: f64, transition: Duration) -> Self {
        Self {
            opacity: 0.0,
            translate_y_px: offset_px,
            transition,
        }
    }

    pub fn shown(transition: Duration) -> Self {
        Self {
            opacity: 1.0,
            translate_y_px: 0.0,
            transition,
        }
    }

    pub fn hidden_from(config: &FadeConfig) -> Self {
        Self::hidden(config.offset_px, Duration::from_millis(config.transition_ms))
    }

    pub fn shown_from(config: &FadeConfig) -> Self {
        Self::shown(Duration::from_millis(config.transition_ms))
    }

    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0
    }

    /// Render as an inline `style` attribute value
    pub fn to_css(&self) -> String {
        let secs = self.transition.as_secs_f64();
        format!(
            "opacity: {}; transform: translateY({}px); transition: opacity {secs}s ease, transform {secs}s ease",
            self.opacity, self.translate_y_px
        )
    }
}

impl fmt::Display for FadeStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}
