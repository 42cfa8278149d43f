mod service;
mod sink;

pub use service::{AnimationEvent, AnimationScheduler, ObservableTarget};
pub use sink::{MemorySink, SinkWrite, TargetSink};
