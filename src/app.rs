//! One pre-caching run, from configuration files to the final tally.

use crate::config::settings::{
    DEFAULT_DOWNLOAD_DIRECTORY, LOCAL_CONFIG_FILE_NAME, SERVER_CONFIG_FILE_NAME,
};
use crate::config::{ensure_local_config, ConfigStore, Settings};
use crate::download::RunSummary;
use crate::downloader::DownloaderBuilder;
use crate::error::{Error, Result};
use crate::http::{create_http_client, HttpClientConfig};
use crate::playlist::PlaylistResolver;
use crate::progress::StyleOptions;
use crate::report::Reporter;

use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

/// What a run needs besides the configuration files' contents.
#[derive(Debug, Clone)]
pub struct Options {
    /// Server configuration: `DownloadServer` and `Playlist`.
    pub server_config: PathBuf,
    /// Local configuration: `DownloadDirectory`. Created when missing.
    pub local_config: PathBuf,
    pub style_options: StyleOptions,
    pub http: HttpClientConfig,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            server_config: PathBuf::from(SERVER_CONFIG_FILE_NAME),
            local_config: PathBuf::from(LOCAL_CONFIG_FILE_NAME),
            style_options: StyleOptions::default(),
            http: HttpClientConfig::default(),
        }
    }
}

/// Load the configuration, fetch the playlist and download every entry.
///
/// Configuration and playlist problems are returned as errors before any
/// file is downloaded. Per-file failures only show up in the summary.
pub async fn run(options: &Options, reporter: Arc<dyn Reporter>) -> Result<RunSummary> {
    if !options.server_config.exists() {
        return Err(Error::ServerConfigRequired {
            path: options.server_config.clone(),
        });
    }

    if ensure_local_config(&options.local_config)? {
        reporter.info(&format!(
            "Cannot find {}, generating file. Using default path \"{}\"",
            options.local_config.display(),
            DEFAULT_DOWNLOAD_DIRECTORY
        ));
    }

    let store = ConfigStore::load(&[&options.server_config, &options.local_config])?;
    let settings = Settings::from_store(&store)?;
    debug!("Settings: {:?}", settings);

    // Nothing touches the network until the playlist reference is known to resolve.
    let resolver = PlaylistResolver::new(settings.download_server());
    let playlist_url = resolver.resolve_reference(settings.playlist())?;
    info!("Playlist at {}", playlist_url);

    let client =
        create_http_client(options.http.clone()).map_err(|source| Error::HttpClient { source })?;
    let entries = resolver.resolve(&client, settings.playlist()).await?;
    info!("{} entries to pre-cache", entries.len());

    let downloader = DownloaderBuilder::new()
        .directory(settings.download_directory().to_path_buf())
        .style_options(options.style_options.clone())
        .reporter(reporter.clone())
        .build();
    let summary = downloader.run(&client, &entries).await;

    reporter.ok(&format!("Successfully downloaded {} into cache.", summary));
    Ok(summary)
}
