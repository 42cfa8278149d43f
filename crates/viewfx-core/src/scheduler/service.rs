use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::counter::{animate_counter, parse_target, CounterAnimation, Suffix};
use crate::fade::FadeStyle;
use crate::visibility::{
    ObserveOptions, TargetId, Trigger, TriggerMode, ViewportObserver, VisibilityEvent,
    VisibilityTrigger,
};

use super::sink::TargetSink;

/// Events emitted by the scheduler as effects start and finish
#[derive(Debug, Clone, PartialEq)]
pub enum AnimationEvent {
    /// A target became visible for the first time
    Triggered { target: TargetId },
    /// A counter began counting toward `end`
    CounterStarted { target: TargetId, end: u64 },
    /// A counter wrote its final value
    CounterFinished { target: TargetId, value: String },
    /// The hidden style was applied
    FadeStarted { target: TargetId },
    /// The shown style was applied
    FadeFinished { target: TargetId },
    /// A triggered target had nothing usable to animate
    Skipped { target: TargetId, reason: String },
}

/// A counter element as found on the page
#[derive(Debug, Clone)]
pub struct ObservableTarget {
    pub id: TargetId,
    /// Text currently displayed, used to detect a "+" suffix
    pub text: String,
    /// Raw target value attribute
    pub data_target: Option<String>,
}

impl ObservableTarget {
    pub fn new(id: TargetId, text: impl Into<String>, data_target: Option<String>) -> Self {
        Self {
            id,
            text: text.into(),
            data_target,
        }
    }
}

type Callback = Box<dyn FnOnce(TargetId) + Send>;

enum Effect {
    Counter {
        text: String,
        data_target: Option<String>,
    },
    Fade,
    Callback(Callback),
}

fn notify(tx: Option<&mpsc::UnboundedSender<AnimationEvent>>, event: AnimationEvent) {
    if let Some(tx) = tx {
        if tx.send(event).is_err() {
            warn!("Failed to send animation event: receiver dropped");
        }
    }
}

/// Runs "animate once when scrolled into view" effects.
///
/// Register targets, then feed visibility events either one at a time with
/// `handle_event` or from a stream with `run`. Each triggered effect runs on
/// its own task and writes only to its own target.
///
/// Must be called from within a tokio runtime: counter and fade effects are
/// spawned as tasks. Targets registered with `on_trigger` alone run their
/// callback inline and need no runtime.
pub struct AnimationScheduler {
    observer: Arc<dyn ViewportObserver>,
    sink: Arc<dyn TargetSink>,
    config: Arc<AppConfig>,
    trigger: VisibilityTrigger,
    effects: HashMap<TargetId, Effect>,
    event_tx: Option<mpsc::UnboundedSender<AnimationEvent>>,
    running: Vec<JoinHandle<()>>,
}

impl AnimationScheduler {
    pub fn new(
        observer: Arc<dyn ViewportObserver>,
        sink: Arc<dyn TargetSink>,
        config: Arc<AppConfig>,
    ) -> Self {
        Self {
            observer,
            sink,
            config,
            trigger: VisibilityTrigger::new(),
            effects: HashMap::new(),
            event_tx: None,
            running: Vec::new(),
        }
    }

    /// Set the event sender for progress notifications
    pub fn with_event_sender(mut self, tx: mpsc::UnboundedSender<AnimationEvent>) -> Self {
        self.event_tx = Some(tx);
        self
    }

    fn send_event(&self, event: AnimationEvent) {
        notify(self.event_tx.as_ref(), event);
    }

    fn register(
        &mut self,
        id: TargetId,
        options: ObserveOptions,
        mode: TriggerMode,
        effect: Effect,
    ) -> bool {
        if !self.trigger.observe(id, mode) {
            debug!(id = %id, "Target already registered, ignoring");
            return false;
        }
        self.effects.insert(id, effect);
        self.observer.observe(id, options);
        true
    }

    /// Count up once the counter is half visible. The observation is kept;
    /// the triggered flag prevents a second run.
    pub fn register_counter(&mut self, target: ObservableTarget) -> bool {
        let options = self.config.counter.observe_options();
        self.register(
            target.id,
            options,
            TriggerMode::Persistent,
            Effect::Counter {
                text: target.text,
                data_target: target.data_target,
            },
        )
    }

    /// Fade in once a sliver of the element is visible, then stop observing
    pub fn register_fade(&mut self, id: TargetId) -> bool {
        let options = self.config.fade.observe_options();
        self.register(id, options, TriggerMode::OneShot, Effect::Fade)
    }

    /// Run `callback` the first time `id` becomes visible under `options`
    pub fn on_trigger<F>(&mut self, id: TargetId, options: ObserveOptions, callback: F) -> bool
    where
        F: FnOnce(TargetId) + Send + 'static,
    {
        self.register(
            id,
            options,
            TriggerMode::OneShot,
            Effect::Callback(Box::new(callback)),
        )
    }

    pub fn is_triggered(&self, id: TargetId) -> bool {
        self.trigger.is_triggered(id)
    }

    pub fn trigger(&self) -> &VisibilityTrigger {
        &self.trigger
    }

    /// Process one visibility event.
    ///
    /// Must be called from within a tokio runtime when the event fires a
    /// counter or fade.
    pub fn handle_event(&mut self, event: VisibilityEvent) {
        let Trigger::Fire { release } = self.trigger.handle(&event) else {
            return;
        };

        let id = event.target;
        debug!(id = %id, ratio = event.intersection_ratio, "Target triggered");
        self.send_event(AnimationEvent::Triggered { target: id });

        match self.effects.remove(&id) {
            Some(Effect::Counter { text, data_target }) => {
                self.start_counter(id, &text, data_target.as_deref());
            }
            Some(Effect::Fade) => self.start_fade(id),
            Some(Effect::Callback(callback)) => callback(id),
            None => {}
        }

        if release {
            self.observer.unobserve(id);
        }
    }

    fn start_counter(&mut self, id: TargetId, text: &str, data_target: Option<&str>) {
        let Some(end) = data_target.and_then(parse_target) else {
            debug!(id = %id, value = ?data_target, "Counter target is not a number, skipping");
            self.send_event(AnimationEvent::Skipped {
                target: id,
                reason: format!("invalid target value {:?}", data_target.unwrap_or_default()),
            });
            return;
        };

        let tick = self.config.counter.tick();
        let animation = CounterAnimation::new(end, self.config.counter.duration(), tick)
            .with_suffix(Suffix::detect(text));
        self.send_event(AnimationEvent::CounterStarted { target: id, end });

        let sink = Arc::clone(&self.sink);
        let event_tx = self.event_tx.clone();
        self.spawn(async move {
            let mut last = String::new();
            let ticks = animate_counter(animation, tick, |value| {
                sink.set_text(id, &value);
                last = value;
            })
            .await;

            debug!(id = %id, ticks, "Counter finished");
            notify(
                event_tx.as_ref(),
                AnimationEvent::CounterFinished {
                    target: id,
                    value: last,
                },
            );
        });
    }

    fn start_fade(&mut self, id: TargetId) {
        let hidden = FadeStyle::hidden_from(&self.config.fade);
        let shown = FadeStyle::shown_from(&self.config.fade);
        let settle = self.config.fade.settle_delay();

        self.sink.set_style(id, &hidden);
        self.send_event(AnimationEvent::FadeStarted { target: id });

        let sink = Arc::clone(&self.sink);
        let event_tx = self.event_tx.clone();
        self.spawn(async move {
            tokio::time::sleep(settle).await;
            sink.set_style(id, &shown);
            notify(event_tx.as_ref(), AnimationEvent::FadeFinished { target: id });
        });
    }

    fn spawn<F>(&mut self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.running.retain(|handle| !handle.is_finished());
        self.running.push(tokio::spawn(task));
    }

    /// Number of counters and fades still in flight
    pub fn active_animations(&self) -> usize {
        self.running
            .iter()
            .filter(|handle| !handle.is_finished())
            .count()
    }

    /// Wait until every started animation has written its final value
    pub async fn wait_for_animations(&mut self) {
        for handle in std::mem::take(&mut self.running) {
            if let Err(e) = handle.await {
                warn!("Animation task failed: {}", e);
            }
        }
    }

    /// Consume visibility events until the stream closes or shutdown is
    /// signalled. Animations already started keep running.
    pub async fn run(
        &mut self,
        mut events: mpsc::UnboundedReceiver<VisibilityEvent>,
        mut shutdown: watch::Receiver<bool>,
    ) {
        if *shutdown.borrow() {
            return;
        }

        info!("Animation scheduler started: {} targets", self.trigger.len());

        loop {
            tokio::select! {
                result = shutdown.changed() => {
                    if result.is_err() || *shutdown.borrow() {
                        info!("Animation scheduler received shutdown signal");
                        break;
                    }
                }

                event = events.recv() => match event {
                    Some(event) => self.handle_event(event),
                    None => {
                        debug!("Visibility event stream closed");
                        break;
                    }
                },
            }
        }

        info!("Animation scheduler stopped");
    }
}
