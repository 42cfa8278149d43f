use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use crate::fade::FadeStyle;
use crate::visibility::TargetId;

/// Output side of the scheduler: where counter text and fade styles land.
///
/// Each target is only ever written by its own animation, but different
/// targets are written from different tasks, so implementations must be
/// thread-safe.
pub trait TargetSink: Send + Sync {
    fn set_text(&self, target: TargetId, text: &str);

    fn set_style(&self, target: TargetId, style: &FadeStyle);
}

/// A single recorded write
#[derive(Debug, Clone, PartialEq)]
pub enum SinkWrite {
    Text(String),
    Style(FadeStyle),
}

/// In-memory sink keeping the full write history per target
#[derive(Debug, Default)]
pub struct MemorySink {
    writes: Mutex<HashMap<TargetId, Vec<SinkWrite>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All writes to `target`, oldest first
    pub fn writes(&self, target: TargetId) -> Vec<SinkWrite> {
        self.writes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&target)
            .cloned()
            .unwrap_or_default()
    }

    /// Text writes to `target`, oldest first
    pub fn texts(&self, target: TargetId) -> Vec<String> {
        self.writes(target)
            .into_iter()
            .filter_map(|write| match write {
                SinkWrite::Text(text) => Some(text),
                SinkWrite::Style(_) => None,
            })
            .collect()
    }

    /// Most recent text written to `target`
    pub fn text(&self, target: TargetId) -> Option<String> {
        self.texts(target).pop()
    }

    /// Most recent style written to `target`
    pub fn style(&self, target: TargetId) -> Option<FadeStyle> {
        self.writes(target).into_iter().rev().find_map(|write| match write {
            SinkWrite::Style(style) => Some(style),
            SinkWrite::Text(_) => None,
        })
    }

    fn push(&self, target: TargetId, write: SinkWrite) {
        self.writes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(target)
            .or_default()
            .push(write);
    }
}

impl TargetSink for MemorySink {
    fn set_text(&self, target: TargetId, text: &str) {
        self.push(target, SinkWrite::Text(text.to_string()));
    }

    fn set_style(&self, target: TargetId, style: &FadeStyle) {
        self.push(target, SinkWrite::Style(style.clone()));
    }
}
