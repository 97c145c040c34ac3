//! The downloader: builder, configuration and the sequential download loop.
//!
//! - `downloader` - the [`Downloader`] and its per-entry fetch logic
//! - `builder` - [`DownloaderBuilder`] for configuring a [`Downloader`]
//! - `config` - [`DownloaderConfig`] and its defaults

pub mod builder;
pub mod config;
pub mod downloader;

pub use builder::DownloaderBuilder;
pub use config::DownloaderConfig;
pub use downloader::{Downloader, WRITE_BUFFER_SIZE};
