//! Fixed-step counter interpolation.
//!
//! The value advances by `end / (duration / tick)` per tick regardless of how
//! late the tick actually fires. Intermediate values are floored and always
//! below `end`; the tick that reaches or passes `end` shows exactly `end` and
//! finishes the animation.

use std::iter::FusedIterator;
use std::time::Duration;

use tokio::time::MissedTickBehavior;

use super::format::Suffix;

#[derive(Debug, Clone)]
pub struct CounterAnimation {
    current: f64,
    end: u64,
    increment: f64,
    suffix: Suffix,
    finished: bool,
}

impl CounterAnimation {
    /// Create an animation counting from 0 to `end` over roughly `duration`
    pub fn new(end: u64, duration: Duration, tick: Duration) -> Self {
        let steps = if tick.is_zero() {
            1.0
        } else {
            (duration.as_secs_f64() / tick.as_secs_f64()).max(1.0)
        };

        Self {
            current: 0.0,
            end,
            increment: end as f64 / steps,
            suffix: Suffix::None,
            finished: false,
        }
    }

    pub fn with_suffix(mut self, suffix: Suffix) -> Self {
        self.suffix = suffix;
        self
    }

    #[inline]
    pub fn end(&self) -> u64 {
        self.end
    }

    #[inline]
    pub fn suffix(&self) -> Suffix {
        self.suffix
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Advance one tick and return the numeric value to display
    pub fn step(&mut self) -> Option<u64> {
        if self.finished {
            return None;
        }

        self.current += self.increment;
        if self.current >= self.end as f64 {
            self.finished = true;
            Some(self.end)
        } else {
            Some(self.current.floor() as u64)
        }
    }
}

impl Iterator for CounterAnimation {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        self.step().map(|value| self.suffix.apply(value))
    }
}

impl FusedIterator for CounterAnimation {}

/// Drive `animation` on a timer, passing each display value to `emit`.
///
/// The first value is emitted one `tick` after the call. Returns the number
/// of ticks taken; the timer is dropped on the terminal tick.
pub async fn animate_counter<F>(mut animation: CounterAnimation, tick: Duration, mut emit: F) -> u32
where
    F: FnMut(String),
{
    let tick = tick.max(Duration::from_millis(1));
    let mut interval = tokio::time::interval(tick);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    // Skip the first tick (fires immediately)
    interval.tick().await;

    let mut ticks = 0;
    while !animation.is_finished() {
        interval.tick().await;
        let Some(text) = animation.next() else {
            break;
        };
        ticks += 1;
        emit(text);
    }

    ticks
}
