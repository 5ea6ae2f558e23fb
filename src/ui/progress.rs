use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::reporting::telemetry::{ProgressSink, ProgressSnapshot};

const BAR_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.yellow/red}] {pos}/{len} URLs checked ({eta})";

/// Terminal progress bar fed by the dispatcher.
///
/// When disabled the bar is hidden and every call is a no-op, so callers
/// never need to branch on it.
pub struct ProgressReporter {
    bar: ProgressBar,
    enabled: bool,
}

impl ProgressReporter {
    pub fn new(enabled: bool) -> Self {
        let bar = if enabled {
            let bar = ProgressBar::new(0);
            let style = ProgressStyle::default_bar()
                .template(BAR_TEMPLATE)
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-");
            bar.set_style(style);
            bar
        } else {
            ProgressBar::hidden()
        };

        Self { bar, enabled }
    }
}

impl ProgressSink for ProgressReporter {
    fn on_start(&self, total: usize) {
        self.bar.set_length(total as u64);
        self.bar.set_position(0);
        if self.enabled {
            self.bar.enable_steady_tick(Duration::from_millis(120));
        }
    }

    fn on_progress(&self, snapshot: &ProgressSnapshot) {
        self.bar.set_position(snapshot.completed as u64);
    }

    fn on_finish(&self, snapshot: &ProgressSnapshot) {
        self.bar.set_position(snapshot.completed as u64);
        self.bar.finish_and_clear();
    }
}
