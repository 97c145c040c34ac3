//! Core downloader implementation with fetch logic.
//!
//! Entries are processed strictly one after another. Each one goes through a
//! [`Transfer`]; a failure is recorded and the loop moves on.
//!
//! ```rust,no_run
//! use precache::downloader::DownloaderBuilder;
//! use precache::http::{create_http_client, HttpClientConfig};
//! use precache::playlist::PlaylistResolver;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = create_http_client(HttpClientConfig::default())?;
//! let entries = PlaylistResolver::new("http://localhost:8000/files")
//!     .resolve(&client, "playlist.json")
//!     .await?;
//!
//! let downloader = DownloaderBuilder::new()
//!     .directory(PathBuf::from("./MovieNight"))
//!     .build();
//! let summary = downloader.run(&client, &entries).await;
//! println!("Successfully downloaded {} into cache.", summary);
//! # Ok(())
//! # }
//! ```

use super::config::DownloaderConfig;
use crate::download::{RunSummary, Summary, Transfer};
use crate::error::{Error, Result};
use crate::playlist::PlaylistEntry;
use crate::progress::{ProgressDisplay, StyleOptions};
use crate::utils::declared_length;

use futures::StreamExt;
use indicatif::ProgressBar;
use reqwest::{Response, StatusCode};
use reqwest_middleware::ClientWithMiddleware;
use std::fmt;
use std::path::{Path, PathBuf};
use tokio::{
    fs::File,
    io::{AsyncWriteExt, BufWriter},
};
use tracing::debug;

/// Size of the write buffer in front of each cached file.
pub const WRITE_BUFFER_SIZE: usize = 4096;

/// Represents the download controller.
///
/// A downloader can be created via its builder:
///
/// ```rust
/// use precache::downloader::DownloaderBuilder;
///
/// let d = DownloaderBuilder::new().build();
/// ```
#[derive(Clone)]
pub struct Downloader {
    config: DownloaderConfig,
}

impl fmt::Debug for Downloader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Downloader")
            .field("config", &self.config)
            .finish()
    }
}

impl Downloader {
    /// Creates a new Downloader with the given configuration.
    pub(crate) fn new(config: DownloaderConfig) -> Self {
        Self { config }
    }

    /// Gets the directory where files will be downloaded.
    pub fn directory(&self) -> &PathBuf {
        &self.config.directory
    }

    /// Gets the style options of the progress bars.
    pub fn style_options(&self) -> &StyleOptions {
        &self.config.style_options
    }

    /// Download every entry, in order, into the cache directory.
    pub async fn run(
        &self,
        client: &ClientWithMiddleware,
        entries: &[PlaylistEntry],
    ) -> RunSummary {
        let progress_display =
            ProgressDisplay::new(self.config.style_options.clone(), entries.len());

        let mut summaries = Vec::with_capacity(entries.len());
        for entry in entries {
            summaries.push(self.fetch(client, entry, &progress_display).await);
            progress_display.increment_main();
        }

        progress_display.finish();
        RunSummary::new(summaries)
    }

    /// Takes one entry to a terminal state.
    async fn fetch(
        &self,
        client: &ClientWithMiddleware,
        entry: &PlaylistEntry,
        progress_display: &ProgressDisplay,
    ) -> Summary {
        let reporter = progress_display.reporter(self.config.reporter.as_ref());
        let mut transfer = Transfer::new(entry, &self.config.directory, &reporter);

        let outcome = match transfer.begin() {
            Ok(output) => self.transfer(client, entry, &output, progress_display).await,
            Err(e) => Err(e),
        };

        match outcome {
            Ok((status, size)) => transfer.complete(status, size),
            Err(e) => transfer.fail(e).await,
        }
    }

    /// Request `entry` and write its body to `output`.
    async fn transfer(
        &self,
        client: &ClientWithMiddleware,
        entry: &PlaylistEntry,
        output: &Path,
        progress_display: &ProgressDisplay,
    ) -> Result<(StatusCode, u64)> {
        debug!("Fetching {}", &entry.url);
        let res = client
            .get(entry.url.as_str())
            .send()
            .await
            .map_err(|source| Error::DownloadRequest { source })?;

        let status = res.status();
        if status != StatusCode::OK {
            return Err(Error::DownloadStatus(status));
        }

        let pb = progress_display.create_child_progress(declared_length(&res), &entry.name);
        let written = write_body(res, output, &pb).await;
        progress_display.finish_child(pb);

        written.map(|size| (status, size))
    }
}

/// Stream the body of `res` into `output`, truncating it first.
///
/// The file is closed when this returns, whatever the outcome.
async fn write_body(res: Response, output: &Path, pb: &ProgressBar) -> Result<u64> {
    debug!("Creating destination file {:?}", output);
    let file = File::create(output).await?;
    let mut writer = BufWriter::with_capacity(WRITE_BUFFER_SIZE, file);

    let written = copy_chunks(res, &mut writer, pb).await;

    // Waits for in-flight background writes before the handle is dropped.
    drop(writer.into_inner().into_std().await);

    let written = written?;
    debug!("Wrote {} bytes to {:?}", written, output);
    Ok(written)
}

async fn copy_chunks(res: Response, writer: &mut BufWriter<File>, pb: &ProgressBar) -> Result<u64> {
    let mut written: u64 = 0;
    debug!("Retrieving chunks...");
    let mut stream = res.bytes_stream();
    while let Some(item) = stream.next().await {
        let chunk = item.map_err(|source| Error::Transfer { source })?;
        writer.write_all(&chunk).await?;

        let chunk_size = chunk.len() as u64;
        written += chunk_size;
        pb.inc(chunk_size);
    }

    writer.flush().await?;
    Ok(written)
}
