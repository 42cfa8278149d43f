//! Geometry-based viewport observer.
//!
//! Elements are laid out as vertical rectangles in page coordinates. Each
//! `poll` compares every observed element against the current viewport and
//! reports threshold crossings, the same way a native intersection observer
//! reports them: once on the first check, then only when visibility flips.

use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

use tokio::sync::mpsc;
use tracing::{trace, warn};

use super::{ObserveOptions, TargetId, ViewportObserver, VisibilityEvent};

/// Vertical extent of an element in page coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub top: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(top: f64, height: f64) -> Self {
        Self {
            top,
            height: height.max(0.0),
        }
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// The visible window onto the page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scroll_y: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(scroll_y: f64, height: f64) -> Self {
        Self {
            scroll_y,
            height: height.max(0.0),
        }
    }
}

/// Fraction of `rect` inside `viewport` grown by `margin` on both edges
pub fn intersection_ratio(rect: &Rect, viewport: &Viewport, margin: f64) -> f64 {
    let view_top = viewport.scroll_y - margin;
    let view_bottom = viewport.scroll_y + viewport.height + margin;

    if rect.height == 0.0 {
        return if rect.top >= view_top && rect.top <= view_bottom {
            1.0
        } else {
            0.0
        };
    }

    let overlap = rect.bottom().min(view_bottom) - rect.top.max(view_top);
    (overlap.max(0.0) / rect.height).clamp(0.0, 1.0)
}

#[derive(Debug)]
struct Observation {
    options: ObserveOptions,
    last_visible: Option<bool>,
}

#[derive(Debug, Default)]
struct Inner {
    layout: BTreeMap<TargetId, Rect>,
    observed: BTreeMap<TargetId, Observation>,
}

/// `ViewportObserver` driven by explicit `poll` calls
pub struct PollingObserver {
    inner: Mutex<Inner>,
    event_tx: mpsc::UnboundedSender<VisibilityEvent>,
}

impl PollingObserver {
    /// Create an observer and the receiving end of its event stream
    pub fn new() -> (Self, mpsc::UnboundedReceiver<VisibilityEvent>) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let observer = Self {
            inner: Mutex::new(Inner::default()),
            event_tx,
        };
        (observer, event_rx)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Place (or move) an element on the page
    pub fn set_layout(&self, target: TargetId, rect: Rect) {
        self.lock().layout.insert(target, rect);
    }

    pub fn is_observing(&self, target: TargetId) -> bool {
        self.lock().observed.contains_key(&target)
    }

    /// Check every observed element against `viewport`.
    ///
    /// Returns the number of events emitted. Observed targets without a
    /// layout are skipped until one is set.
    pub fn poll(&self, viewport: &Viewport) -> usize {
        let mut inner = self.lock();
        let Inner { layout, observed } = &mut *inner;
        let mut emitted = 0;

        for (target, observation) in observed.iter_mut() {
            let Some(rect) = layout.get(target) else {
                continue;
            };

            let ratio = intersection_ratio(rect, viewport, observation.options.root_margin_px);
            let is_visible = ratio > 0.0 && ratio >= observation.options.threshold;

            if observation.last_visible == Some(is_visible) {
                continue;
            }
            observation.last_visible = Some(is_visible);

            trace!(id = %target, ratio, is_visible, "Visibility changed");
            if self
                .event_tx
                .send(VisibilityEvent::new(*target, is_visible, ratio))
                .is_err()
            {
                warn!("Failed to send visibility event: receiver dropped");
                break;
            }
            emitted += 1;
        }

        emitted
    }
}

impl ViewportObserver for PollingObserver {
    fn observe(&self, target: TargetId, options: ObserveOptions) {
        self.lock().observed.insert(
            target,
            Observation {
                options,
                last_visible: None,
            },
        );
    }

    fn unobserve(&self, target: TargetId) {
        self.lock().observed.remove(&target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(rx: &mut mpsc::UnboundedReceiver<VisibilityEvent>) -> Vec<VisibilityEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    #[test]
    fn test_intersection_ratio() {
        let viewport = Viewport::new(0.0, 800.0);

        assert_eq!(intersection_ratio(&Rect::new(100.0, 100.0), &viewport, 0.0), 1.0);
        assert_eq!(intersection_ratio(&Rect::new(750.0, 100.0), &viewport, 0.0), 0.5);
        assert_eq!(intersection_ratio(&Rect::new(900.0, 100.0), &viewport, 0.0), 0.0);
        // Touching the bottom edge is not an overlap
        assert_eq!(intersection_ratio(&Rect::new(800.0, 100.0), &viewport, 0.0), 0.0);
        assert_eq!(intersection_ratio(&Rect::new(400.0, 0.0), &viewport, 0.0), 1.0);
    }

    #[test]
    fn test_intersection_ratio_with_root_margin() {
        let viewport = Viewport::new(0.0, 800.0);
        let below = Rect::new(850.0, 50.0);

        assert_eq!(intersection_ratio(&below, &viewport, 0.0), 0.0);
        // Margin grows the viewport to -100..900
        assert_eq!(intersection_ratio(&below, &viewport, 100.0), 1.0);
        assert_eq!(intersection_ratio(&Rect::new(900.0, 100.0), &viewport, 100.0), 0.0);
        assert_eq!(intersection_ratio(&Rect::new(850.0, 100.0), &viewport, 100.0), 0.5);
        assert_eq!(intersection_ratio(&Rect::new(-150.0, 100.0), &viewport, 100.0), 0.5);
    }

    #[test]
    fn test_first_poll_reports_initial_state() {
        let (observer, mut rx) = PollingObserver::new();
        observer.set_layout(TargetId(1), Rect::new(100.0, 100.0));
        observer.set_layout(TargetId(2), Rect::new(2000.0, 100.0));
        observer.observe(TargetId(1), ObserveOptions::counter());
        observer.observe(TargetId(2), ObserveOptions::counter());

        assert_eq!(observer.poll(&Viewport::new(0.0, 800.0)), 2);
        let events = drain(&mut rx);
        assert_eq!(events[0], VisibilityEvent::new(TargetId(1), true, 1.0));
        assert_eq!(events[1], VisibilityEvent::new(TargetId(2), false, 0.0));
    }

    #[test]
    fn test_only_crossings_are_reported() {
        let (observer, mut rx) = PollingObserver::new();
        observer.set_layout(TargetId(1), Rect::new(1000.0, 200.0));
        observer.observe(TargetId(1), ObserveOptions::counter());

        observer.poll(&Viewport::new(0.0, 800.0));
        // 25% visible, still under the 0.5 threshold
        assert_eq!(observer.poll(&Viewport::new(250.0, 800.0)), 0);
        // 75% visible
        assert_eq!(observer.poll(&Viewport::new(350.0, 800.0)), 1);
        assert_eq!(observer.poll(&Viewport::new(400.0, 800.0)), 0);
        assert_eq!(observer.poll(&Viewport::new(0.0, 800.0)), 1);

        let events = drain(&mut rx);
        let visible: Vec<bool> = events.iter().map(|e| e.is_visible).collect();
        assert_eq!(visible, vec![false, true, false]);
        assert_eq!(events[1].intersection_ratio, 0.75);
    }

    #[test]
    fn test_unobserve_stops_events() {
        let (observer, mut rx) = PollingObserver::new();
        observer.set_layout(TargetId(1), Rect::new(0.0, 100.0));
        observer.observe(TargetId(1), ObserveOptions::fade());

        observer.unobserve(TargetId(1));
        observer.unobserve(TargetId(1));

        assert!(!observer.is_observing(TargetId(1)));
        assert_eq!(observer.poll(&Viewport::new(0.0, 800.0)), 0);
        assert!(drain(&mut rx).is_empty());
    }

    #[test]
    fn test_missing_layout_is_skipped() {
        let (observer, _rx) = PollingObserver::new();
        observer.observe(TargetId(1), ObserveOptions::fade());
        assert_eq!(observer.poll(&Viewport::new(0.0, 800.0)), 0);

        observer.set_layout(TargetId(1), Rect::new(0.0, 100.0));
        assert_eq!(observer.poll(&Viewport::new(0.0, 800.0)), 1);
    }
}
