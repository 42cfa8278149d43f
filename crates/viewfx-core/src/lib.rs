pub mod analytics;
pub mod config;
pub mod consent;
pub mod counter;
pub mod error;
pub mod fade;
pub mod forms;
pub mod limiter;
pub mod scheduler;
pub mod search;
pub mod visibility;

pub use config::AppConfig;
pub use error::{Error, Result};
pub use scheduler::{AnimationEvent, AnimationScheduler, TargetSink};
pub use visibility::{TargetId, VisibilityEvent};
