use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::sync::{mpsc, watch};
use tokio::time::Instant;
use tracing::debug;

use viewfx_core::{
    fade::FadeStyle,
    limiter::{debounce, throttle},
    scheduler::{AnimationEvent, AnimationScheduler, MemorySink, ObservableTarget, TargetSink},
    visibility::{PollingObserver, Rect, TargetId, Viewport},
    AppConfig,
};

use crate::page::{ElementKind, Page, DEMO_PAGE};

/// Sink that records every write and traces it under the element's name
struct ConsoleSink {
    names: HashMap<TargetId, String>,
    memory: MemorySink,
}

impl ConsoleSink {
    fn name(&self, target: TargetId) -> &str {
        self.names.get(&target).map(String::as_str).unwrap_or("?")
    }
}

impl TargetSink for ConsoleSink {
    fn set_text(&self, target: TargetId, text: &str) {
        debug!(element = self.name(target), text, "Text updated");
        self.memory.set_text(target, text);
    }

    fn set_style(&self, target: TargetId, style: &FadeStyle) {
        debug!(element = self.name(target), style = %style, "Style updated");
        self.memory.set_style(target, style);
    }
}

fn describe(event: &AnimationEvent) -> (TargetId, String) {
    match event {
        AnimationEvent::Triggered { target } => (*target, "visible".to_string()),
        AnimationEvent::CounterStarted { target, end } => (*target, format!("counting to {}", end)),
        AnimationEvent::CounterFinished { target, value } => {
            (*target, format!("counter done at {}", value))
        }
        AnimationEvent::FadeStarted { target } => (*target, "fade started".to_string()),
        AnimationEvent::FadeFinished { target } => (*target, "fade settled".to_string()),
        AnimationEvent::Skipped { target, reason } => (*target, format!("skipped: {}", reason)),
    }
}

fn print_event(names: &HashMap<TargetId, String>, start: Instant, event: &AnimationEvent) {
    let (target, description) = describe(event);
    let name = names.get(&target).map(String::as_str).unwrap_or("?");
    println!(
        "[{:>5}ms] {:<14} {}",
        start.elapsed().as_millis(),
        name,
        description
    );
}

pub async fn run(config: &AppConfig, page_path: Option<&Path>) -> Result<()> {
    let page = match page_path {
        Some(path) => Page::load(path)?,
        None => Page::parse(DEMO_PAGE)?,
    };

    let (observer, visibility_rx) = PollingObserver::new();
    let observer = Arc::new(observer);

    let names: HashMap<TargetId, String> = page
        .elements
        .iter()
        .enumerate()
        .map(|(index, element)| (TargetId(index as u64), element.name.clone()))
        .collect();
    let sink = Arc::new(ConsoleSink {
        names: names.clone(),
        memory: MemorySink::new(),
    });

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let mut scheduler =
        AnimationScheduler::new(observer.clone(), sink.clone(), Arc::new(config.clone()))
            .with_event_sender(event_tx);

    for (index, element) in page.elements.iter().enumerate() {
        let id = TargetId(index as u64);
        observer.set_layout(id, Rect::new(element.top, element.height));
        match element.kind {
            ElementKind::Counter => scheduler.register_counter(ObservableTarget::new(
                id,
                element.text.clone(),
                element.target.clone(),
            )),
            ElementKind::Fade => scheduler.register_fade(id),
        };
    }

    println!(
        "Simulating {} elements over {} scroll steps ({}ms)...\n",
        page.elements.len(),
        page.scroll.len(),
        page.duration_ms()
    );

    let start = Instant::now();
    let printer_names = names.clone();
    let printer = tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            print_event(&printer_names, start, &event);
        }
    });

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let runner = tokio::spawn(async move {
        scheduler.run(visibility_rx, shutdown_rx).await;
        scheduler
    });

    // Throttled checks while scrolling, plus one debounced check where the
    // scroll comes to rest so the final position is never dropped
    let viewport_height = page.viewport_height;
    let check = {
        let observer = observer.clone();
        Arc::new(move |y: f64| {
            let emitted = observer.poll(&Viewport::new(y, viewport_height));
            debug!(y, emitted, "Viewport checked");
        })
    };
    let during_scroll = {
        let check = Arc::clone(&check);
        throttle(move |y: f64| check(y), config.limiter.scroll_throttle())
    };
    let scroll_end = {
        let check = Arc::clone(&check);
        debounce(move |y: f64| check(y), config.limiter.scroll_settle())
    };

    for step in &page.scroll {
        tokio::time::sleep_until(start + Duration::from_millis(step.at_ms)).await;
        if !during_scroll.call(step.y) {
            debug!(y = step.y, "Viewport check throttled");
        }
        scroll_end.call(step.y);
    }

    tokio::time::sleep(scroll_end.wait() + Duration::from_millis(20)).await;
    shutdown_tx.send(true)?;

    let mut scheduler = runner.await?;
    scheduler.wait_for_animations().await;
    drop(scheduler);
    printer.await?;

    println!("\nFinal state:");
    for (index, element) in page.elements.iter().enumerate() {
        let id = TargetId(index as u64);
        let state = match element.kind {
            ElementKind::Counter => sink.memory.text(id),
            ElementKind::Fade => sink.memory.style(id).map(|style| style.to_css()),
        };
        println!(
            "  {:<14} {}",
            element.name,
            state.unwrap_or_else(|| "(never shown)".to_string())
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_events() {
        let finished = AnimationEvent::CounterFinished {
            target: TargetId(3),
            value: "150+".to_string(),
        };
        assert_eq!(
            describe(&finished),
            (TargetId(3), "counter done at 150+".to_string())
        );

        let started = AnimationEvent::CounterStarted {
            target: TargetId(3),
            end: 150,
        };
        assert_eq!(describe(&started).1, "counting to 150");

        let skipped = AnimationEvent::Skipped {
            target: TargetId(4),
            reason: "invalid target value \"abc\"".to_string(),
        };
        assert_eq!(describe(&skipped).1, "skipped: invalid target value \"abc\"");
    }
}
