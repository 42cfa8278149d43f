//! Count-up animation for numeric stat displays
//!
//! - `format` - reading the target number and display suffix from element text
//! - `animation` - fixed-step interpolation from 0 to the target, plus an
//!   async driver that emits one display value per tick
//!
//! # Usage
//!
//! ```ignore
//! use std::time::Duration;
//! use viewfx_core::counter::{animate_counter, parse_target, CounterAnimation, Suffix};
//!
//! let end = parse_target("150").unwrap_or_default();
//! let animation = CounterAnimation::new(end, Duration::from_millis(2000), Duration::from_millis(16))
//!     .with_suffix(Suffix::detect("0+"));
//!
//! animate_counter(animation, Duration::from_millis(16), |text| render(&text)).await;
//! ```

mod animation;
mod format;

pub use animation::{animate_counter, CounterAnimation};
pub use format::{parse_target, Suffix};
