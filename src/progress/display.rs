//! Progress bar display management and coordination.
//!
//! [`ProgressDisplay`] owns the main bar and hands out one child bar per file.
//! Notices printed while bars are drawn must go through
//! [`ProgressDisplay::reporter`] so the bars are suspended around them.
//!
//! ```rust,no_run
//! use precache::progress::{ProgressDisplay, StyleOptions};
//!
//! let progress_display = ProgressDisplay::new(StyleOptions::default(), 3);
//!
//! let file_progress = progress_display.create_child_progress(Some(1024), "a.mp4");
//! file_progress.set_position(512);
//! progress_display.finish_child(file_progress);
//!
//! progress_display.increment_main();
//! progress_display.finish();
//! ```

use crate::progress::StyleOptions;
use crate::report::{Level, Reporter};

use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget};
use std::sync::Arc;

/// Progress display manager that coordinates multiple progress bars.
pub struct ProgressDisplay {
    /// The multi-progress instance for coordinating multiple progress bars.
    multi: Arc<MultiProgress>,
    /// The main progress bar, counting entries.
    main: Arc<ProgressBar>,
    /// Style options for progress bars.
    style_options: StyleOptions,
}

impl ProgressDisplay {
    /// Create a new progress display manager for `total_entries` files.
    pub fn new(style_options: StyleOptions, total_entries: usize) -> Self {
        let multi = match style_options.is_enabled() {
            true => Arc::new(MultiProgress::new()),
            false => Arc::new(MultiProgress::with_draw_target(ProgressDrawTarget::hidden())),
        };

        let main = Arc::new(multi.add(style_options.main().to_progress_bar(total_entries as u64)));
        main.tick();

        Self {
            multi,
            main,
            style_options,
        }
    }

    /// Get the main progress bar.
    pub fn main(&self) -> Arc<ProgressBar> {
        self.main.clone()
    }

    /// Create a child progress bar for one file.
    ///
    /// With a declared `total` the bar shows a percentage, otherwise a
    /// spinner counting bytes.
    pub fn create_child_progress(&self, total: Option<u64>, name: &str) -> ProgressBar {
        let child = self.style_options.child();
        let pb = match total {
            Some(len) => child.to_progress_bar(len),
            None => child.to_spinner(),
        };
        let pb = self.multi.add(pb);
        pb.set_message(name.to_string());
        pb
    }

    /// Increment the main progress bar by one.
    pub fn increment_main(&self) {
        self.main.inc(1);
    }

    /// Run `f` with the bars hidden, so it can print.
    pub fn suspend<F: FnOnce() -> R, R>(&self, f: F) -> R {
        self.multi.suspend(f)
    }

    /// Wrap `inner` so its notices do not tear the bars.
    pub fn reporter<'a>(&'a self, inner: &'a dyn Reporter) -> SuspendingReporter<'a> {
        SuspendingReporter {
            display: self,
            inner,
        }
    }

    /// Finish the progress display, clearing or keeping bars based on configuration.
    pub fn finish(self) {
        if self.style_options.main().clear {
            self.main.finish_and_clear();
        } else {
            self.main.finish();
        }
    }

    /// Finish a child progress bar based on configuration.
    pub fn finish_child(&self, pb: ProgressBar) {
        if self.style_options.child().clear {
            pb.finish_and_clear();
        } else {
            pb.finish();
        }
        self.multi.remove(&pb);
    }
}

/// A [`Reporter`] that suspends the bars of a [`ProgressDisplay`] while it prints.
pub struct SuspendingReporter<'a> {
    display: &'a ProgressDisplay,
    inner: &'a dyn Reporter,
}

impl Reporter for SuspendingReporter<'_> {
    fn report(&self, level: Level, message: &str) {
        self.display.suspend(|| self.inner.report(level, message));
    }
}
