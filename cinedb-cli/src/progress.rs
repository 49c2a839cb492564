//! Terminal progress for bootstrap loads.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use cinedb_import::{BootstrapPhase, BootstrapStats, ImportProgress};

/// Draws a progress bar while platform links are resolved.
///
/// The command prints the final summary itself.
pub(crate) struct BarProgress {
    bar: ProgressBar,
}

impl BarProgress {
    /// When `quiet` is true the bar is hidden.
    pub(crate) fn new(quiet: bool) -> Self {
        let bar = ProgressBar::new(0);
        if quiet {
            bar.set_draw_target(ProgressDrawTarget::hidden());
        }
        bar.set_style(
            ProgressStyle::with_template("  {spinner:.cyan} [{bar:30}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=> ")
                .tick_chars("/-\\|"),
        );
        Self { bar }
    }
}

impl ImportProgress for BarProgress {
    fn on_phase(&self, phase: BootstrapPhase, items: usize) {
        self.bar.println(format!("  {} ({})", phase, items));
    }

    fn on_record(&self, current: usize, total: usize, title: &str) {
        if self.bar.length() != Some(total as u64) {
            self.bar.set_length(total as u64);
        }
        self.bar.set_position(current as u64);
        self.bar.set_message(title.to_string());
    }

    fn on_complete(&self, _stats: &BootstrapStats) {
        self.bar.finish_and_clear();
    }
}
