//! Batch progress telemetry
//!
//! The dispatcher owns a `ProgressTracker` and pushes throttled
//! `ProgressSnapshot`s into whatever `ProgressSink` it was given.

use log::info;
use std::fmt;
use std::time::{Duration, Instant};

/// Point-in-time view of a running batch.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressSnapshot {
    pub completed: usize,
    pub total: usize,
    pub elapsed: Duration,
    /// Remaining time extrapolated from the average per-item latency
    pub estimated_remaining: Option<Duration>,
}

impl ProgressSnapshot {
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            self.completed as f64 * 100.0 / self.total as f64
        }
    }
}

impl fmt::Display for ProgressSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Completed {}/{} URLs in {:.1}s",
            self.completed,
            self.total,
            self.elapsed.as_secs_f64()
        )?;
        if let Some(remaining) = self.estimated_remaining {
            write!(f, ", ~{:.1}s remaining", remaining.as_secs_f64())?;
        }
        Ok(())
    }
}

/// Receiver of batch progress.
///
/// `on_progress` is called at a bounded cadence, never once per URL.
pub trait ProgressSink: Send + Sync {
    fn on_start(&self, _total: usize) {}

    fn on_progress(&self, snapshot: &ProgressSnapshot);

    fn on_finish(&self, _snapshot: &ProgressSnapshot) {}
}

/// Writes snapshots through the `log` facade.
#[derive(Debug, Default)]
pub struct LogProgressSink;

impl ProgressSink for LogProgressSink {
    fn on_start(&self, total: usize) {
        info!("Starting check of {total} URL(s)");
    }

    fn on_progress(&self, snapshot: &ProgressSnapshot) {
        info!("{snapshot}");
    }

    fn on_finish(&self, snapshot: &ProgressSnapshot) {
        info!(
            "Finished {}/{} URLs in {:.2}s",
            snapshot.completed,
            snapshot.total,
            snapshot.elapsed.as_secs_f64()
        );
    }
}

/// Discards everything.
#[derive(Debug, Default)]
pub struct NoopProgressSink;

impl ProgressSink for NoopProgressSink {
    fn on_progress(&self, _snapshot: &ProgressSnapshot) {}
}

/// Counts completions and decides when a snapshot is due.
#[derive(Debug)]
pub struct ProgressTracker {
    total: usize,
    completed: usize,
    started: Instant,
    last_emit: Instant,
    interval: Duration,
}

impl ProgressTracker {
    pub fn new(total: usize, interval: Duration) -> Self {
        Self::starting_at(total, interval, Instant::now())
    }

    fn starting_at(total: usize, interval: Duration, now: Instant) -> Self {
        Self {
            total,
            completed: 0,
            started: now,
            last_emit: now,
            interval,
        }
    }

    pub fn completed(&self) -> usize {
        self.completed
    }

    /// Record one finished URL; returns a snapshot when one is due.
    pub fn record_completion(&mut self) -> Option<ProgressSnapshot> {
        self.record_completion_at(Instant::now())
    }

    fn record_completion_at(&mut self, now: Instant) -> Option<ProgressSnapshot> {
        self.completed += 1;
        if now.duration_since(self.last_emit) < self.interval {
            return None;
        }
        self.last_emit = now;
        Some(self.snapshot_at(now))
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        self.snapshot_at(Instant::now())
    }

    fn snapshot_at(&self, now: Instant) -> ProgressSnapshot {
        let elapsed = now.duration_since(self.started);
        let estimated_remaining = if self.completed == 0 {
            None
        } else {
            let per_item = elapsed.as_secs_f64() / self.completed as f64;
            let remaining = self.total.saturating_sub(self.completed) as f64;
            Some(Duration::from_secs_f64(per_item * remaining))
        };

        ProgressSnapshot {
            completed: self.completed,
            total: self.total,
            elapsed,
            estimated_remaining,
        }
    }
}
