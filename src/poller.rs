//! Notification poller
//!
//! Runs `ChatController::poll_once` on a fixed interval in a background
//! task. The task is cancelled (aborted) through its `PollHandle`, and at
//! most one poll cycle is in flight at any time.

use crate::messaging::ChatController;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

/// Interval used when a zero interval is requested
pub const MIN_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Result of one poll cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// The gateway queue was empty
    Idle,
    /// A text message was appended to a conversation
    Appended {
        /// Conversation that received the message
        counterpart_id: String,
    },
    /// A text message was already in its conversation
    Duplicate {
        /// Conversation that already held the message
        counterpart_id: String,
    },
    /// A non-text notification was acknowledged without a store change
    Ignored,
    /// Another cycle was still running
    Skipped,
}

/// Holds the single in-flight slot for the duration of a poll cycle
///
/// The slot is released on drop, including when the cycle's future is
/// dropped by task cancellation.
pub(crate) struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlightGuard<'a> {
    /// Take the slot, or `None` if a cycle already holds it
    pub(crate) fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Recurring poll schedule for a controller
pub struct Poller {
    controller: ChatController,
    interval: Duration,
}

impl Poller {
    /// Create a poller; nothing runs until `start`
    ///
    /// A zero interval is raised to `MIN_POLL_INTERVAL`.
    pub fn new(controller: ChatController, interval: Duration) -> Self {
        let interval = if interval.is_zero() {
            warn!("Zero poll interval requested, using {:?}", MIN_POLL_INTERVAL);
            MIN_POLL_INTERVAL
        } else {
            interval
        };
        Self {
            controller,
            interval,
        }
    }

    /// Spawn the poll task on the current tokio runtime
    ///
    /// The first cycle runs one interval after start. Ticks missed while a
    /// cycle is running are skipped, not replayed.
    pub fn start(self) -> PollHandle {
        info!("Starting notification poller every {:?}", self.interval);

        let controller = self.controller;
        let interval = self.interval;

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first tick completes immediately
            ticker.tick().await;

            loop {
                ticker.tick().await;

                match controller.poll_once().await {
                    Ok(PollOutcome::Idle) => {}
                    Ok(outcome) => debug!("Poll cycle finished: {:?}", outcome),
                    Err(e) => warn!("Poll cycle failed: {}", e),
                }
            }
        });

        PollHandle { task }
    }
}

/// Handle to a running poll task; aborts the task when stopped or dropped
#[derive(Debug)]
pub struct PollHandle {
    task: JoinHandle<()>,
}

impl PollHandle {
    /// Cancel the poll task
    pub fn stop(&self) {
        if !self.task.is_finished() {
            info!("Stopping notification poller");
            self.task.abort();
        }
    }

    /// Whether the task has terminated
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
