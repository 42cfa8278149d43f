//! Viewport visibility detection
//!
//! - `trigger` - per-target state machine that turns a stream of
//!   `VisibilityEvent`s into at-most-once firings
//! - `polling` - geometry-based `ViewportObserver` that computes
//!   intersection ratios from element rectangles and a scroll position
//!
//! Anything that can report visibility changes (a native intersection
//! facility, a headless layout engine, a test harness) plugs in through the
//! `ViewportObserver` trait and delivers events over an mpsc channel.

mod polling;
mod trigger;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use polling::{intersection_ratio, PollingObserver, Rect, Viewport};
pub use trigger::{Trigger, TriggerMode, TriggerState, VisibilityTrigger};

/// Opaque identity of a renderable element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TargetId(pub u64);

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A visibility change reported for one observed target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityEvent {
    pub target: TargetId,
    /// Whether the visible fraction has reached the observation threshold
    pub is_visible: bool,
    /// Visible fraction of the element, in [0, 1]
    pub intersection_ratio: f64,
}

impl VisibilityEvent {
    pub fn new(target: TargetId, is_visible: bool, intersection_ratio: f64) -> Self {
        Self {
            target,
            is_visible,
            intersection_ratio: intersection_ratio.clamp(0.0, 1.0),
        }
    }
}

/// Observation parameters for a single target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserveOptions {
    /// Visible fraction at which the target counts as visible
    pub threshold: f64,
    /// Pixels added above and below the viewport
    pub root_margin_px: f64,
}

impl ObserveOptions {
    pub fn new(threshold: f64, root_margin_px: f64) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
            root_margin_px,
        }
    }

    /// Half the element on screen
    pub fn counter() -> Self {
        Self::new(0.5, 0.0)
    }

    /// A sliver of the element on screen
    pub fn fade() -> Self {
        Self::new(0.1, 0.0)
    }
}

impl Default for ObserveOptions {
    fn default() -> Self {
        Self::counter()
    }
}

/// A source of visibility events.
///
/// Implementations deliver `VisibilityEvent`s for observed targets in the
/// order they occur. `unobserve` must be idempotent.
pub trait ViewportObserver: Send + Sync {
    fn observe(&self, target: TargetId, options: ObserveOptions);

    fn unobserve(&self, target: TargetId);
}
