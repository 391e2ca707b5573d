// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Verdict Authors

//! The timeout executor: runs a unit of work under a deadline.
//!
//! Cooperative mode runs the work on the calling thread and only measures
//! it; an over-budget run is flagged, never interrupted. Preemptive mode
//! races the work on a worker thread against the deadline and abandons it
//! on timeout, signalling a best-effort [`CancelToken`] the work is free
//! to ignore.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{RecvTimeoutError, bounded};

use crate::error::{ConfigError, TimeoutError, panic_message};

#[cfg(test)]
#[path = "timeout_tests.rs"]
mod tests;

/// How a deadline is enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeoutMode {
    /// Measure only; the work always runs to completion.
    Cooperative,
    /// Abandon the work when the deadline passes.
    Preemptive,
}

/// Best-effort cancellation signal handed to timed work.
///
/// Cancellation support is optional: work that never reads the token is
/// still legal, it just keeps running detached after a preemptive
/// timeout until it finishes on its own.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests the work to stop.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether a stop was requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// The result of running work under a deadline.
#[derive(Debug)]
pub enum TimeoutOutcome<T> {
    /// The work produced a value. In cooperative mode this is returned
    /// even when the deadline was breached; `exceeded` carries the
    /// breach as a side channel so callers can tell "finished slowly"
    /// from "finished within budget".
    Completed { value: T, elapsed: Duration, exceeded: bool },

    /// The work panicked before producing a value.
    Panicked { message: String, elapsed: Duration },

    /// Preemptive only: the deadline passed first. The work was
    /// abandoned and its eventual result, if any, is discarded.
    TimedOut { limit: Duration },
}

impl<T> TimeoutOutcome<T> {
    pub fn is_timed_out(&self) -> bool {
        matches!(self, TimeoutOutcome::TimedOut { .. })
    }
}

/// Runs `work` under `limit`, enforced per `mode`.
///
/// The limit is validated up front: a zero duration is a configuration
/// error, not a race that instantly times out.
pub fn run_with_timeout<T, F>(
    limit: Duration,
    mode: TimeoutMode,
    work: F,
) -> Result<TimeoutOutcome<T>, TimeoutError>
where
    T: Send + 'static,
    F: FnOnce(&CancelToken) -> T + Send + 'static,
{
    if limit.is_zero() {
        return Err(ConfigError::ZeroTimeout(limit).into());
    }

    match mode {
        TimeoutMode::Cooperative => Ok(run_cooperative(limit, work)),
        TimeoutMode::Preemptive => run_preemptive(limit, work),
    }
}

fn run_cooperative<T, F>(limit: Duration, work: F) -> TimeoutOutcome<T>
where
    F: FnOnce(&CancelToken) -> T,
{
    let token = CancelToken::new();
    let start = Instant::now();
    match catch_unwind(AssertUnwindSafe(|| work(&token))) {
        Ok(value) => {
            let elapsed = start.elapsed();
            TimeoutOutcome::Completed { value, elapsed, exceeded: elapsed > limit }
        }
        Err(payload) => TimeoutOutcome::Panicked {
            message: panic_message(payload),
            elapsed: start.elapsed(),
        },
    }
}

fn run_preemptive<T, F>(limit: Duration, work: F) -> Result<TimeoutOutcome<T>, TimeoutError>
where
    T: Send + 'static,
    F: FnOnce(&CancelToken) -> T + Send + 'static,
{
    let token = CancelToken::new();
    let worker_token = token.clone();
    let (sender, receiver) = bounded(1);

    let start = Instant::now();
    let handle = thread::Builder::new()
        .name("verdict-timeout".to_string())
        .spawn(move || {
            let result = catch_unwind(AssertUnwindSafe(|| work(&worker_token)));
            // The receiver may be gone if the caller already timed out.
            let _ = sender.send(result);
        })?;

    match receiver.recv_timeout(limit) {
        Ok(Ok(value)) => {
            let elapsed = start.elapsed();
            // The worker finished inside the window; joining it is quick.
            let _ = handle.join();
            Ok(TimeoutOutcome::Completed { value, elapsed, exceeded: false })
        }
        Ok(Err(payload)) => {
            let elapsed = start.elapsed();
            let _ = handle.join();
            Ok(TimeoutOutcome::Panicked { message: panic_message(payload), elapsed })
        }
        Err(RecvTimeoutError::Timeout) => {
            token.cancel();
            // Detach: dropping the handle leaves the worker to finish (or
            // observe the token) on its own. The OS reaps it.
            drop(handle);
            tracing::debug!(limit = ?limit, "work abandoned after preemptive timeout");
            Ok(TimeoutOutcome::TimedOut { limit })
        }
        Err(RecvTimeoutError::Disconnected) => {
            // Worker died without sending; only reachable if the send
            // itself failed, which we treat as a fault.
            let elapsed = start.elapsed();
            let _ = handle.join();
            Ok(TimeoutOutcome::Panicked {
                message: "timeout worker disappeared without a result".to_string(),
                elapsed,
            })
        }
    }
}
