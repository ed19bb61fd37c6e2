//! Progress reporting
//!
//! Purely observational: the runner behaves identically with or without a
//! reporter attached.

use indicatif::{ProgressBar, ProgressStyle};

/// Receives status updates between export steps
pub trait ProgressReporter {
    /// Number of steps about to run
    fn start(&mut self, _total: usize) {}

    /// Replaces the status line
    fn set_status(&mut self, text: &str);

    /// Marks one step done
    fn advance(&mut self) {}

    /// Closes the reporter; no further updates follow
    fn close(&mut self);
}

/// Terminal progress bar
///
/// Nothing is drawn until [`start`](ProgressReporter::start) runs, so a run
/// that aborts on a precondition leaves the terminal untouched.
#[derive(Default)]
pub struct ConsoleProgress {
    bar: Option<ProgressBar>,
}

impl ConsoleProgress {
    pub fn new() -> Self {
        Self::default()
    }

    fn styled_bar(total: usize) -> ProgressBar {
        let bar = ProgressBar::new(total as u64);
        let style = ProgressStyle::with_template("{spinner} {pos}/{len} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ");
        bar.set_style(style);
        bar
    }
}

impl ProgressReporter for ConsoleProgress {
    fn start(&mut self, total: usize) {
        match &self.bar {
            Some(bar) => {
                bar.set_length(total as u64);
                bar.set_position(0);
            }
            None => self.bar = Some(Self::styled_bar(total)),
        }
    }

    fn set_status(&mut self, text: &str) {
        if let Some(bar) = &self.bar {
            bar.set_message(text.to_string());
        }
    }

    fn advance(&mut self) {
        if let Some(bar) = &self.bar {
            bar.inc(1);
        }
    }

    fn close(&mut self) {
        if let Some(bar) = &self.bar {
            bar.finish_with_message("done");
        }
    }
}
