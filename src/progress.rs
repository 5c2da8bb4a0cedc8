//! Progress display for the `run` command

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use sort_bench_core::{ProgressObserver, ProgressSnapshot};

/// Prints one `Progress:` line per poll
pub struct ConsoleProgress;

impl ProgressObserver for ConsoleProgress {
    fn on_progress(&mut self, snapshot: ProgressSnapshot) {
        println!("{snapshot}");
    }
}

/// Redraws a progress bar at each poll
pub struct BarProgress {
    bar: ProgressBar,
}

impl BarProgress {
    pub fn new(total: usize) -> Result<Self> {
        let bar = ProgressBar::new(total as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} trials")?
                .progress_chars("#>-"),
        );
        Ok(Self { bar })
    }
}

impl ProgressObserver for BarProgress {
    fn on_progress(&mut self, snapshot: ProgressSnapshot) {
        self.bar.set_position(snapshot.completed as u64);
        if snapshot.is_done() {
            self.bar.finish();
        }
    }
}
