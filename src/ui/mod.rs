//! UI/Progress presentation layer
//!
//! This module handles:
//! - Status lines for each provisioning stage ([`Reporter`])
//! - Download progress using indicatif
//! - Silent progress for dry-run mode and tests
//! - The "press any key" prompt before exit

pub mod display;
pub mod prompt;

pub use display::Reporter;
pub use prompt::pause_for_key;

use indicatif::{ProgressBar, ProgressStyle};

/// Progress reporter trait for the installer download
///
/// This trait allows different progress reporting strategies:
/// - Interactive progress bar (default)
/// - Silent/no-op progress for dry-run mode and tests
pub trait ProgressReporter {
    /// Start reporting; `total_bytes` is `None` when the server sent no length
    fn start(&mut self, label: &str, total_bytes: Option<u64>);

    /// Record `bytes` more bytes received
    fn advance(&mut self, bytes: u64);

    /// Finish after a complete download
    fn finish(&mut self);

    /// Abandon on error
    fn abandon(&mut self);
}

/// Interactive progress reporter with a visual progress bar
///
/// Falls back to a byte-counting spinner when the download size is unknown.
#[derive(Default)]
pub struct InteractiveProgressReporter {
    pb: Option<ProgressBar>,
}

impl InteractiveProgressReporter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressReporter for InteractiveProgressReporter {
    fn start(&mut self, label: &str, total_bytes: Option<u64>) {
        let pb = match total_bytes {
            Some(total) => {
                let style = ProgressStyle::default_bar()
                    .template("  [{bar:40.cyan/blue}] {bytes}/{total_bytes} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("#>-");
                let pb = ProgressBar::new(total);
                pb.set_style(style);
                pb
            }
            None => {
                let style = ProgressStyle::default_spinner()
                    .template("  {spinner} {bytes} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner());
                let pb = ProgressBar::new_spinner();
                pb.set_style(style);
                pb
            }
        };
        pb.set_message(label.to_string());
        self.pb = Some(pb);
    }

    fn advance(&mut self, bytes: u64) {
        if let Some(ref pb) = self.pb {
            pb.inc(bytes);
        }
    }

    fn finish(&mut self) {
        if let Some(ref pb) = self.pb {
            pb.finish_and_clear();
        }
    }

    fn abandon(&mut self) {
        if let Some(ref pb) = self.pb {
            pb.abandon();
        }
    }
}

/// Silent progress reporter for dry-run mode
///
/// No-op implementation that does not display anything.
#[derive(Default)]
pub struct SilentProgressReporter;

impl ProgressReporter for SilentProgressReporter {
    fn start(&mut self, _label: &str, _total_bytes: Option<u64>) {}

    fn advance(&mut self, _bytes: u64) {}

    fn finish(&mut self) {}

    fn abandon(&mut self) {}
}
