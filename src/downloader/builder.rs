//! Builder pattern implementation for creating Downloader instances.
//!
//! ```rust
//! use precache::downloader::DownloaderBuilder;
//! use precache::report::ConsoleReporter;
//! use std::path::PathBuf;
//! use std::sync::Arc;
//!
//! let downloader = DownloaderBuilder::new()
//!     .directory(PathBuf::from("./MovieNight"))
//!     .reporter(Arc::new(ConsoleReporter::new()))
//!     .build();
//! ```
//!
//! ## Hidden Progress Bars
//!
//! ```rust
//! use precache::downloader::DownloaderBuilder;
//!
//! let downloader = DownloaderBuilder::hidden().build();
//! ```

use super::{config::DownloaderConfig, downloader::Downloader};
use crate::report::Reporter;
use crate::StyleOptions;

use std::{path::PathBuf, sync::Arc};

/// A builder used to create a [`Downloader`].
#[derive(Default)]
pub struct DownloaderBuilder {
    config: DownloaderConfig,
}

impl DownloaderBuilder {
    /// Creates a builder with the default options.
    pub fn new() -> Self {
        DownloaderBuilder::default()
    }

    /// Convenience function to hide the progress bars.
    pub fn hidden() -> Self {
        let mut builder = DownloaderBuilder::default();
        builder.config.style_options = StyleOptions::hidden();
        builder
    }

    /// Sets the directory where to store the downloads.
    pub fn directory(mut self, directory: PathBuf) -> Self {
        self.config.directory = directory;
        self
    }

    /// Set the downloader style options.
    pub fn style_options(mut self, style_options: StyleOptions) -> Self {
        self.config.style_options = style_options;
        self
    }

    /// Set the receiver of per-entry notices.
    pub fn reporter(mut self, reporter: Arc<dyn Reporter>) -> Self {
        self.config.reporter = reporter;
        self
    }

    /// Create the [`Downloader`] with the specified options.
    pub fn build(self) -> Downloader {
        Downloader::new(self.config)
    }
}
