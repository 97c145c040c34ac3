//! Configuration for the downloader.
//!
//! [`DownloaderConfig`] is normally assembled through
//! [`DownloaderBuilder`](super::DownloaderBuilder):
//!
//! ```rust
//! use precache::downloader::DownloaderConfig;
//!
//! let config = DownloaderConfig::default();
//! assert!(config.style_options.is_enabled());
//! ```

use crate::report::{ConsoleReporter, Reporter};
use crate::StyleOptions;

use std::env::current_dir;
use std::path::PathBuf;
use std::sync::Arc;

/// Configuration structure for the downloader
#[derive(Clone)]
pub struct DownloaderConfig {
    /// Directory where to store the downloaded files. Must exist.
    pub directory: PathBuf,
    /// Downloader style options.
    pub style_options: StyleOptions,
    /// Receives the per-entry notices.
    pub reporter: Arc<dyn Reporter>,
}

impl std::fmt::Debug for DownloaderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DownloaderConfig")
            .field("directory", &self.directory)
            .field("style_options", &self.style_options)
            .finish_non_exhaustive()
    }
}

impl Default for DownloaderConfig {
    fn default() -> Self {
        Self {
            directory: current_dir().unwrap_or_default(),
            style_options: StyleOptions::default(),
            reporter: Arc::new(ConsoleReporter::new()),
        }
    }
}
