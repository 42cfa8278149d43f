//! Rate limiters for noisy event sources
//!
//! Two independent wrappers over an arbitrary callback:
//!
//! - `debounce` - delay until the caller goes quiet, then run once with the
//!   most recent arguments (trailing edge)
//! - `throttle` - run immediately, then drop every call until the cooldown
//!   expires (leading edge)
//!
//! Each wrapper owns its own state; cloning a wrapper shares that state the
//! same way a captured closure would.
//!
//! # Usage
//!
//! ```ignore
//! use std::time::Duration;
//! use viewfx_core::limiter::{debounce, throttle};
//!
//! let on_scroll_end = debounce(|y: f64| poll_viewport(y), Duration::from_millis(150));
//! on_scroll_end.call(480.0);
//!
//! let on_scroll = throttle(|y: f64| poll_viewport(y), Duration::from_millis(100));
//! on_scroll.call(480.0);
//! ```

mod debounce;
mod throttle;

pub use debounce::{debounce, Debounced};
pub use throttle::{throttle, Throttled};
