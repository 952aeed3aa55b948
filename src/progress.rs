// Stage progress display
//
// One spinner per pipeline stage, all attached to a single MultiProgress so
// the concurrent renderers can draw at the same time.

use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

const TICK: Duration = Duration::from_millis(100);

/// Spinner group for a pipeline run
#[derive(Clone)]
pub struct Progress {
    multi: MultiProgress,
    enabled: bool,
}

impl Progress {
    /// Draw to stderr when `enabled`, otherwise draw nothing
    pub fn new(enabled: bool) -> Self {
        let target = if enabled {
            ProgressDrawTarget::stderr()
        } else {
            ProgressDrawTarget::hidden()
        };

        Self {
            multi: MultiProgress::with_draw_target(target),
            enabled,
        }
    }

    /// Progress that never draws
    pub fn hidden() -> Self {
        Self::new(false)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Start a spinner for a stage
    pub fn start(&self, message: impl Into<String>) -> StageSpinner {
        let bar = self.multi.add(ProgressBar::new_spinner());
        bar.set_style(spinner_style());
        bar.set_message(message.into());
        if self.enabled {
            bar.enable_steady_tick(TICK);
        }
        StageSpinner { bar }
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::hidden()
    }
}

/// Handle to one stage's spinner
pub struct StageSpinner {
    bar: ProgressBar,
}

impl StageSpinner {
    pub fn succeed(&self, message: impl Into<String>) {
        self.bar.set_style(finished_style());
        self.bar.finish_with_message(format!("✔ {}", message.into()));
    }

    pub fn fail(&self, message: impl Into<String>) {
        self.bar.set_style(finished_style());
        self.bar.abandon_with_message(format!("✖ {}", message.into()));
    }

    pub fn is_finished(&self) -> bool {
        self.bar.is_finished()
    }

    pub fn message(&self) -> String {
        self.bar.message()
    }
}

impl Drop for StageSpinner {
    // A renderer cancelled by a failed join never reports back
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.abandon();
        }
    }
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

fn finished_style() -> ProgressStyle {
    ProgressStyle::with_template("{msg}").unwrap_or_else(|_| ProgressStyle::default_spinner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_progress() {
        let progress = Progress::hidden();
        assert!(!progress.is_enabled());
    }

    #[test]
    fn test_succeed_finishes_spinner() {
        let progress = Progress::hidden();
        let spinner = progress.start("Scanning");
        assert!(!spinner.is_finished());

        spinner.succeed("Scanned 3 files");
        assert!(spinner.is_finished());
        assert_eq!(spinner.message(), "✔ Scanned 3 files");
    }

    #[test]
    fn test_fail_abandons_spinner() {
        let progress = Progress::hidden();
        let spinner = progress.start("Generating changelog");

        spinner.fail("Changelog failed");
        assert!(spinner.is_finished());
        assert!(spinner.message().starts_with("✖"));
    }
}
