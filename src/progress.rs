//! Spinner display for long-running operations

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Spinner shown while a package is copied, linked or removed.
///
/// Draws to stderr and stays hidden when stderr is not a terminal.
pub struct ProgressDisplay {
    spinner: ProgressBar,
}

impl ProgressDisplay {
    /// Start a spinner with an initial message
    pub fn new(message: impl Into<String>) -> Self {
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ");

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(style);
        spinner.set_message(message.into());
        spinner.enable_steady_tick(Duration::from_millis(80));

        Self { spinner }
    }

    /// Replace the spinner message
    pub fn update(&self, message: impl Into<String>) {
        self.spinner.set_message(message.into());
    }

    /// Remove the spinner once the work is done
    pub fn finish(&self) {
        self.spinner.finish_and_clear();
    }

    /// Stop the spinner on error, leaving the last message visible
    pub fn abandon(&self) {
        self.spinner.abandon();
    }
}
