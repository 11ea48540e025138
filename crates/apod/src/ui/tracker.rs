use std::time::Duration;

use apod_fetch::{FetchPhase, Progress, ProgressCallback};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use once_cell::sync::Lazy;

const SPINNER_STYLE: &str = "{spinner:.blue} {prefix:>8.cyan.bold} [{elapsed_precise}] {wide_msg}";

const TICK: &str = "⠁⠂⠄⡀⢀⠠⠐⠈ ";

static SPINNER_TEMPLATE: Lazy<Option<ProgressStyle>> = Lazy::new(|| {
    ProgressStyle::with_template(SPINNER_STYLE)
        .ok()
        .map(|style| style.tick_chars(TICK))
});

/// Spinner that mirrors pipeline progress reports.
#[derive(Clone)]
pub struct FetchTracker {
    pb: ProgressBar,
    visible: bool,
}

impl FetchTracker {
    pub fn new(visible: bool) -> Self {
        let pb = if visible {
            ProgressBar::new_spinner()
        } else {
            ProgressBar::hidden()
        };
        let pb = match SPINNER_TEMPLATE.as_ref() {
            Some(style) => pb.with_style(style.clone()),
            None => pb,
        };
        pb.set_prefix("apod");
        pb.set_message("Loading…");
        pb.enable_steady_tick(Duration::from_millis(100));
        Self { pb, visible }
    }

    pub fn step(&self, progress: &Progress) {
        let prefix = match progress.phase {
            FetchPhase::Retrying => "retry",
            FetchPhase::FallingBack => "mirror",
        };
        self.pb.set_prefix(prefix);
        self.pb.set_message(progress.to_string());
    }

    /// Callback that forwards every report to this spinner.
    pub fn callback(&self) -> ProgressCallback {
        let tracker = self.clone();
        std::sync::Arc::new(move |progress: &Progress| tracker.step(progress))
    }

    /// Stop drawing while another prompt owns the terminal.
    pub fn hide(&self) {
        self.pb.set_draw_target(ProgressDrawTarget::hidden());
    }

    /// Draw again after [`hide`](Self::hide) and reset the status line.
    pub fn restart(&self) {
        if self.visible {
            self.pb.set_draw_target(ProgressDrawTarget::stderr());
        }
        self.pb.set_prefix("apod");
        self.pb.set_message("Loading…");
    }

    pub fn finish(&self) {
        self.pb.finish_and_clear();
    }
}
