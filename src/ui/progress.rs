use crate::output::is_quiet;
use indicatif::{HumanDuration, ProgressBar};
use std::time::Duration;

/// Spinner shown while a load runs; hidden off-terminal and in quiet mode
pub struct Spinner {
    pb: ProgressBar,
}

impl Spinner {
    pub fn new(message: &str) -> Self {
        let pb = if is_quiet() || !console::Term::stdout().is_term() {
            ProgressBar::hidden()
        } else {
            let pb = ProgressBar::new_spinner();
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        };
        pb.set_message(message.to_string());
        Self { pb }
    }

    pub fn finish_and_clear(&self) {
        self.pb.finish_and_clear();
    }
}

pub fn human_duration(elapsed: Duration) -> String {
    HumanDuration(elapsed).to_string()
}
