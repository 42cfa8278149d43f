//! One-shot trigger state machine.
//!
//! Each target moves `Unobserved -> Observing -> Triggered` and never leaves
//! `Triggered`. Only the first visible event for an observing target fires.

use std::collections::HashMap;

use super::{TargetId, VisibilityEvent};

/// What happens to the observation after a target fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerMode {
    /// Release the observation once fired (fade-ins, custom callbacks)
    OneShot,
    /// Keep observing; the triggered flag alone blocks re-firing (counters)
    Persistent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerState {
    Unobserved,
    Observing,
    Triggered,
}

/// Outcome of feeding one event to the trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Run the target's effect. When `release` is set the caller should stop
    /// observing the target.
    Fire { release: bool },
    Ignore,
}

#[derive(Debug, Default)]
pub struct VisibilityTrigger {
    targets: HashMap<TargetId, (TriggerMode, TriggerState)>,
}

impl VisibilityTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking a target.
    ///
    /// Returns `false` if the target is already tracked; its state is left
    /// untouched so a triggered target stays triggered.
    pub fn observe(&mut self, target: TargetId, mode: TriggerMode) -> bool {
        if self.targets.contains_key(&target) {
            return false;
        }
        self.targets.insert(target, (mode, TriggerState::Observing));
        true
    }

    pub fn handle(&mut self, event: &VisibilityEvent) -> Trigger {
        if !event.is_visible {
            return Trigger::Ignore;
        }

        match self.targets.get_mut(&event.target) {
            Some((mode, state)) if *state == TriggerState::Observing => {
                *state = TriggerState::Triggered;
                Trigger::Fire {
                    release: *mode == TriggerMode::OneShot,
                }
            }
            _ => Trigger::Ignore,
        }
    }

    pub fn state(&self, target: TargetId) -> TriggerState {
        self.targets
            .get(&target)
            .map(|(_, state)| *state)
            .unwrap_or(TriggerState::Unobserved)
    }

    #[inline]
    pub fn is_triggered(&self, target: TargetId) -> bool {
        self.state(target) == TriggerState::Triggered
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visible(id: u64) -> VisibilityEvent {
        VisibilityEvent::new(TargetId(id), true, 1.0)
    }

    fn hidden(id: u64) -> VisibilityEvent {
        VisibilityEvent::new(TargetId(id), false, 0.0)
    }

    #[test]
    fn test_visible_twice_fires_once() {
        let mut trigger = VisibilityTrigger::new();
        trigger.observe(TargetId(1), TriggerMode::Persistent);

        assert_eq!(trigger.handle(&visible(1)), Trigger::Fire { release: false });
        assert_eq!(trigger.handle(&visible(1)), Trigger::Ignore);
        assert!(trigger.is_triggered(TargetId(1)));
    }

    #[test]
    fn test_one_shot_requests_release() {
        let mut trigger = VisibilityTrigger::new();
        trigger.observe(TargetId(1), TriggerMode::OneShot);

        assert_eq!(trigger.handle(&visible(1)), Trigger::Fire { release: true });
    }

    #[test]
    fn test_hidden_events_do_not_fire() {
        let mut trigger = VisibilityTrigger::new();
        trigger.observe(TargetId(1), TriggerMode::Persistent);

        assert_eq!(trigger.handle(&hidden(1)), Trigger::Ignore);
        assert_eq!(trigger.state(TargetId(1)), TriggerState::Observing);

        assert_eq!(trigger.handle(&visible(1)), Trigger::Fire { release: false });
        assert_eq!(trigger.handle(&hidden(1)), Trigger::Ignore);
        assert_eq!(trigger.handle(&visible(1)), Trigger::Ignore);
    }

    #[test]
    fn test_unobserved_target_ignored() {
        let mut trigger = VisibilityTrigger::new();
        assert_eq!(trigger.handle(&visible(9)), Trigger::Ignore);
        assert_eq!(trigger.state(TargetId(9)), TriggerState::Unobserved);
    }

    #[test]
    fn test_reobserve_does_not_reset() {
        let mut trigger = VisibilityTrigger::new();
        assert!(trigger.observe(TargetId(1), TriggerMode::OneShot));
        trigger.handle(&visible(1));

        assert!(!trigger.observe(TargetId(1), TriggerMode::OneShot));
        assert!(trigger.is_triggered(TargetId(1)));
        assert_eq!(trigger.handle(&visible(1)), Trigger::Ignore);
    }

    #[test]
    fn test_targets_are_independent() {
        let mut trigger = VisibilityTrigger::new();
        trigger.observe(TargetId(1), TriggerMode::Persistent);
        trigger.observe(TargetId(2), TriggerMode::Persistent);

        trigger.handle(&visible(1));
        assert!(!trigger.is_triggered(TargetId(2)));
        assert_eq!(trigger.handle(&visible(2)), Trigger::Fire { release: false });
        assert_eq!(trigger.len(), 2);
    }
}
