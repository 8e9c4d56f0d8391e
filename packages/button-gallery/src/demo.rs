//! Simulated tap timeline against an action button.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use nr_buttons::operation::{self, Operation};
use nr_buttons::{ActionButton, ActivationOutcome, BusyIndicator, ButtonFrame};
use serde::Serialize;
use tokio::sync::Notify;
use tokio::time::Instant;

use crate::config::DemoConfig;

/// Parameters of one demo run.
#[derive(Debug, Clone)]
pub struct DemoOptions {
    pub label: String,
    pub delay: Duration,
    pub taps: u32,
    pub interval: Duration,
    pub fail: bool,
}

/// What happened at one instant.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Event {
    Tap { index: u32, outcome: &'static str },
    Completed,
    Failed { error: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct TimelineEntry {
    pub at_ms: u128,
    pub event: Event,
    pub frame: String,
}

/// Tallies and timeline of a finished run.
#[derive(Debug, Default, Serialize)]
pub struct DemoReport {
    pub accepted: u32,
    pub suppressed: u32,
    pub completed: u32,
    pub failed: u32,
    pub timeline: Vec<TimelineEntry>,
}

impl fmt::Display for DemoReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.timeline {
            let event = match &entry.event {
                Event::Tap { index, outcome } => format!("tap #{} {}", index, outcome),
                Event::Completed => "completed".to_string(),
                Event::Failed { error } => format!("failed: {}", error),
            };
            writeln!(f, "{:>6}ms  {:<24} {}", entry.at_ms, event, entry.frame)?;
        }
        write!(
            f,
            "accepted={} suppressed={} completed={} failed={}",
            self.accepted, self.suppressed, self.completed, self.failed
        )
    }
}

/// Drive an action button through `options.taps` taps.
///
/// Must run inside a `LocalSet`.
pub async fn run(options: &DemoOptions, config: &DemoConfig) -> nr_buttons::Result<DemoReport> {
    let start = Instant::now();
    let timeline: Rc<RefCell<Vec<TimelineEntry>>> = Rc::default();
    let completed = Rc::new(Cell::new(0u32));
    let failed = Rc::new(Cell::new(0u32));
    let settled = Rc::new(Notify::new());

    let content = nr_buttons::ButtonContent::from(options.label.as_str());
    let idle_frame = ButtonFrame::idle(&content, &config.style).to_string();

    let operation: Operation = if options.fail {
        operation::failing_after(options.delay, "simulated failure")
    } else {
        operation::delay(options.delay)
    };

    let on_complete = {
        let timeline = timeline.clone();
        let completed = completed.clone();
        let settled = settled.clone();
        let frame = idle_frame.clone();
        move || {
            completed.set(completed.get() + 1);
            timeline.borrow_mut().push(TimelineEntry {
                at_ms: start.elapsed().as_millis(),
                event: Event::Completed,
                frame: frame.clone(),
            });
            settled.notify_one();
        }
    };
    let on_error = {
        let timeline = timeline.clone();
        let failed = failed.clone();
        let settled = settled.clone();
        let frame = idle_frame;
        move |err: nr_buttons::OperationError| {
            failed.set(failed.get() + 1);
            timeline.borrow_mut().push(TimelineEntry {
                at_ms: start.elapsed().as_millis(),
                event: Event::Failed {
                    error: err.message,
                },
                frame: frame.clone(),
            });
            settled.notify_one();
        }
    };

    let button = ActionButton::builder(content)
        .style(config.style.clone())
        .busy_indicator(BusyIndicator {
            tint: config.busy_tint,
        })
        .on_activate(operation)
        .on_complete(on_complete)
        .on_error(on_error)
        .build()?;

    let mut report = DemoReport::default();
    for index in 1..=options.taps {
        if index > 1 {
            tokio::time::sleep(options.interval).await;
        }
        let outcome = button.activate();
        match outcome {
            ActivationOutcome::Started => report.accepted += 1,
            ActivationOutcome::Suppressed => report.suppressed += 1,
        }
        timeline.borrow_mut().push(TimelineEntry {
            at_ms: start.elapsed().as_millis(),
            event: Event::Tap {
                index,
                outcome: match outcome {
                    ActivationOutcome::Started => "started",
                    ActivationOutcome::Suppressed => "suppressed",
                },
            },
            frame: button.render().to_string(),
        });
    }

    // A stored permit may predate the last accepted tap, so re-check the state.
    while button.is_busy() {
        settled.notified().await;
    }

    report.completed = completed.get();
    report.failed = failed.get();
    report.timeline = timeline.take();
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::task::LocalSet;

    fn options(taps: u32, interval_ms: u64, fail: bool) -> DemoOptions {
        DemoOptions {
            label: "Submit".to_string(),
            delay: Duration::from_millis(1000),
            taps,
            interval: Duration::from_millis(interval_ms),
            fail,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_fast_taps_are_suppressed() {
        let report = LocalSet::new()
            .run_until(run(&options(4, 200, false), &DemoConfig::default()))
            .await
            .unwrap();

        assert_eq!(report.accepted, 1);
        assert_eq!(report.suppressed, 3);
        assert_eq!(report.completed, 1);
        assert_eq!(report.failed, 0);
        assert!(matches!(report.timeline.last().unwrap().event, Event::Completed));
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_taps_each_complete() {
        let report = LocalSet::new()
            .run_until(run(&options(3, 1500, false), &DemoConfig::default()))
            .await
            .unwrap();

        assert_eq!(report.accepted, 3);
        assert_eq!(report.suppressed, 0);
        assert_eq!(report.completed, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_returns_as_soon_as_last_action_settles() {
        let mut opts = options(2, 1500, false);
        opts.delay = Duration::from_millis(1005);

        let start = Instant::now();
        let report = LocalSet::new()
            .run_until(run(&opts, &DemoConfig::default()))
            .await
            .unwrap();

        assert_eq!(report.completed, 2);
        assert_eq!(report.timeline.last().unwrap().at_ms, 2505);
        assert!(start.elapsed() < Duration::from_millis(2510));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failures_are_reported() {
        let report = LocalSet::new()
            .run_until(run(&options(1, 0, true), &DemoConfig::default()))
            .await
            .unwrap();

        assert_eq!(report.completed, 0);
        assert_eq!(report.failed, 1);
        assert!(report.to_string().contains("failed: simulated failure"));
    }
}
