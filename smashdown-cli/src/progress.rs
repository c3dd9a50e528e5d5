use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use smashdown_lib::SyncProgress;

/// Progress bar for batch commands. Hidden in quiet mode.
pub(crate) struct BarProgress {
    bar: ProgressBar,
}

impl BarProgress {
    pub(crate) fn new(quiet: bool) -> Self {
        let bar = ProgressBar::new(0);
        if quiet {
            bar.set_draw_target(ProgressDrawTarget::hidden());
        }
        bar.set_style(
            ProgressStyle::with_template("  {bar:30.cyan/blue} {pos}/{len} {msg}")
                .expect("static pattern")
                .progress_chars("=> "),
        );
        Self { bar }
    }
}

impl SyncProgress for BarProgress {
    fn start(&mut self, total: usize) {
        self.bar.set_length(total as u64);
        self.bar.set_position(0);
    }

    fn item(&mut self, description: &str) {
        self.bar.set_message(description.to_string());
    }

    fn advance(&mut self) {
        self.bar.inc(1);
    }

    fn finish(&mut self) {
        self.bar.finish_and_clear();
    }
}
