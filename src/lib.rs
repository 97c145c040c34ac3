//! Precache downloads the files of a server-provided playlist into a local
//! directory ahead of time, so playback later does not depend on the network.
//!
//! A run reads two INI files (a server one naming the playlist and a local
//! one naming the cache directory), fetches the playlist, a JSON array of
//! file references, and downloads every entry in order. A failed entry is
//! cleaned up and skipped; configuration and playlist problems stop the run.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use precache::app::{self, Options};
//! use precache::report::ConsoleReporter;
//! use std::sync::Arc;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), precache::Error> {
//! let summary = app::run(&Options::default(), Arc::new(ConsoleReporter::new())).await?;
//! println!("{} of {} cached", summary.succeeded(), summary.total());
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`app`] - one run, from configuration files to the final tally
//! - [`config`] - encoding-tolerant INI loading and the run [`Settings`]
//! - [`playlist`] - playlist retrieval and URL resolution
//! - [`download`] - per-entry state machine and summaries
//! - [`downloader`] - the sequential [`Downloader`] and its builder
//! - [`error`] - centralized error handling with the [`Error`] enum
//! - [`http`] - HTTP client construction
//! - [`progress`] - progress bar styling and display management
//! - [`report`] - user-facing notices
//! - [`utils`] - shared utility functions

pub mod app;
pub mod config;
pub mod download;
pub mod downloader;
pub mod error;
pub mod http;
pub mod playlist;
pub mod progress;
pub mod report;
pub mod utils;

pub use config::{ConfigStore, Settings};
pub use download::{RunSummary, Status, Summary};
pub use downloader::{Downloader, DownloaderBuilder};
pub use error::{Error, ErrorKind, Result};
pub use http::{create_http_client, HttpClientConfig};
pub use playlist::{PlaylistEntry, PlaylistResolver};
pub use progress::{ProgressBarOpts, StyleOptions};
pub use report::{ConsoleReporter, Level, Reporter};
