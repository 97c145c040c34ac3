//! Progress bar styling and configuration options.
//!
//! There are two kinds of bars: the main bar counts playlist entries, and a
//! child bar follows the file currently being written. A child bar shows a
//! percentage when the server declared the file size and falls back to a
//! byte counter with a spinner when it did not.
//!
//! # Examples
//!
//! ```rust
//! use precache::progress::{ProgressBarOpts, StyleOptions};
//!
//! // Main bar stays visible, child bars clear on completion.
//! let style_options = StyleOptions::default();
//! assert!(style_options.is_enabled());
//!
//! let hidden = StyleOptions::new(ProgressBarOpts::hidden(), ProgressBarOpts::hidden());
//! assert!(!hidden.is_enabled());
//! ```

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tracing::warn;

/// Define the downloader style options.
///
/// By default, the main progress bar will stay on the screen upon completion,
/// but the child ones will be cleared once complete.
#[derive(Debug, Clone)]
pub struct StyleOptions {
    /// Style options for the main progress bar.
    pub(crate) main: ProgressBarOpts,
    /// Style options for the child progress bar(s).
    pub(crate) child: ProgressBarOpts,
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self {
            main: ProgressBarOpts {
                template: Some(ProgressBarOpts::TEMPLATE_BAR_WITH_POSITION.into()),
                progress_chars: Some(ProgressBarOpts::CHARS_FINE.into()),
                enabled: true,
                clear: false,
            },
            child: ProgressBarOpts::with_percent_style(),
        }
    }
}

impl StyleOptions {
    /// Create new [`StyleOptions`].
    pub fn new(main: ProgressBarOpts, child: ProgressBarOpts) -> Self {
        Self { main, child }
    }

    /// Style options with every bar hidden, for quiet runs and tests.
    pub fn hidden() -> Self {
        Self::new(ProgressBarOpts::hidden(), ProgressBarOpts::hidden())
    }

    /// Return `false` if neither the main nor the child bar is enabled.
    pub fn is_enabled(&self) -> bool {
        self.main.enabled || self.child.enabled
    }

    /// Get a reference to the main progress bar options.
    pub fn main(&self) -> &ProgressBarOpts {
        &self.main
    }

    /// Get a reference to the child progress bar options.
    pub fn child(&self) -> &ProgressBarOpts {
        &self.child
    }
}

/// Define the options for a progress bar.
#[derive(Debug, Clone)]
pub struct ProgressBarOpts {
    /// Progress bar template string.
    template: Option<String>,
    /// Progression characters set.
    ///
    /// There must be at least 3 characters for the following states:
    /// "filled", "current", and "to do".
    progress_chars: Option<String>,
    /// Enable or disable the progress bar.
    pub(crate) enabled: bool,
    /// Clear the progress bar once completed.
    pub(crate) clear: bool,
}

impl Default for ProgressBarOpts {
    fn default() -> Self {
        Self {
            template: None,
            progress_chars: None,
            enabled: true,
            clear: true,
        }
    }
}

impl ProgressBarOpts {
    /// Template representing the bar and its position.
    ///
    ///`███████████████████████████████████████ 11/12 (99%) eta 00:00:02`
    pub const TEMPLATE_BAR_WITH_POSITION: &'static str =
        "{bar:40.blue} {pos:>}/{len} ({percent}%) eta {eta_precise:.blue}";
    /// Template for a file of known size, led by its percentage.
    ///
    /// ` 42% ━━━━━━━━━━━━━━━━╾─────────────────────── 88.10 MiB/211.23 MiB 10.31 MiB/s a.mp4`
    pub const TEMPLATE_PERCENT: &'static str =
        "{percent:>3.bold}% {bar:40.green/black} {bytes:>11.green}/{total_bytes:<11.green} {bytes_per_sec:>13.red} {msg}";
    /// Template for a file of unknown size.
    ///
    /// `⠙ 88.10 MiB 10.31 MiB/s a.mp4`
    pub const TEMPLATE_SPINNER: &'static str =
        "{spinner:.green} {bytes:>11.green} {bytes_per_sec:>13.red} {msg}";
    /// Use fine blocks as progress characters: `"█▉▊▋▌▍▎▏  "`.
    pub const CHARS_FINE: &'static str = "█▉▊▋▌▍▎▏  ";
    /// Use a line as progress characters: `"━╾─"`.
    pub const CHARS_LINE: &'static str = "━╾╴─";

    /// Create a new [`ProgressBarOpts`].
    pub fn new(
        template: Option<String>,
        progress_chars: Option<String>,
        enabled: bool,
        clear: bool,
    ) -> Self {
        Self {
            template,
            progress_chars,
            enabled,
            clear,
        }
    }

    /// Create a [`ProgressStyle`] based on the provided options.
    ///
    /// An invalid template is logged and replaced by the default bar.
    pub fn to_progress_style(&self) -> ProgressStyle {
        let mut style = ProgressStyle::default_bar();
        if let Some(template) = &self.template {
            match ProgressStyle::with_template(template) {
                Ok(custom) => style = custom,
                Err(e) => warn!("Ignoring progress template {:?}: {}", template, e),
            }
        }
        if let Some(progress_chars) = &self.progress_chars {
            style = style.progress_chars(progress_chars);
        }
        style
    }

    /// Create a [`ProgressBar`] of length `len` based on the provided options.
    pub fn to_progress_bar(&self, len: u64) -> ProgressBar {
        // Hidden, but still tracking its length.
        if !self.enabled {
            return ProgressBar::with_draw_target(Some(len), ProgressDrawTarget::hidden());
        }

        ProgressBar::new(len).with_style(self.to_progress_style())
    }

    /// Create a spinner counting bytes, for transfers of unknown size.
    pub fn to_spinner(&self) -> ProgressBar {
        if !self.enabled {
            return ProgressBar::hidden();
        }

        let style = ProgressStyle::with_template(Self::TEMPLATE_SPINNER)
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        ProgressBar::new_spinner().with_style(style)
    }

    /// Create a new [`ProgressBarOpts`] led by the transfer percentage.
    pub fn with_percent_style() -> Self {
        Self {
            template: Some(ProgressBarOpts::TEMPLATE_PERCENT.into()),
            progress_chars: Some(ProgressBarOpts::CHARS_LINE.into()),
            enabled: true,
            clear: true,
        }
    }

    /// Set to `true` to clear the progress bar upon completion.
    pub fn set_clear(&mut self, clear: bool) {
        self.clear = clear;
    }

    /// Create a new [`ProgressBarOpts`] which hides the progress bars.
    pub fn hidden() -> Self {
        Self {
            enabled: false,
            ..ProgressBarOpts::default()
        }
    }
}
