//! Error handling for precache.
//!
//! Every failure the tool can hit is a variant of [`Error`]. Variants fall
//! into three groups, reported by [`Error::kind`]:
//!
//! - [`ErrorKind::Configuration`] - the config files are missing, unreadable
//!   or incomplete. Always fatal, raised before any network activity.
//! - [`ErrorKind::Resolution`] - the playlist cannot be located, fetched or
//!   trusted. Always fatal, raised before any file is downloaded.
//! - [`ErrorKind::Download`] - a single entry failed. The downloader records
//!   it in that entry's summary and moves on.

use reqwest::StatusCode;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can happen while pre-caching a playlist.
#[derive(Error, Debug)]
pub enum Error {
    /// The server configuration given on the command line does not exist.
    #[error("The server source configuration is required. \"{}\" does not exist (default file is \"{}\")", .path.display(), crate::config::settings::SERVER_CONFIG_FILE_NAME)]
    ServerConfigRequired { path: PathBuf },

    /// The configuration file does not exist.
    #[error("The configuration file \"{}\" was not found", .path.display())]
    ConfigNotFound { path: PathBuf },

    /// The configuration file exists but could not be read.
    #[error("Unable to read the configuration file \"{}\"", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// None of the candidate encodings could decode the configuration file.
    #[error("Unable to read the configuration file \"{}\" with any supported encoding", .path.display())]
    Undecodable { path: PathBuf },

    /// A line of the configuration file is not valid INI.
    #[error("Malformed configuration in \"{}\" at line {line}: {reason}", .path.display())]
    Syntax {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    /// The configuration could not be written back to disk.
    #[error("Unable to write the configuration file \"{}\"", .path.display())]
    ConfigWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A required key is absent or empty.
    #[error("{key} is not optional in the [{section}] section of a configuration file")]
    MissingKey { section: String, key: String },

    /// The download directory does not exist.
    #[error("The directory \"{}\" does not exist. Create it or point DownloadDirectory at an existing directory", .path.display())]
    MissingDirectory { path: PathBuf },

    /// A reference cannot be located without a usable download server.
    #[error("A fully qualified url is required for \"{0}\" when DownloadServer is empty or not fully qualified")]
    UnqualifiedReference(String),

    /// Error from the underlying URL parser or the expected URL format.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The HTTP client could not be built.
    #[error("Unable to create the HTTP client")]
    HttpClient {
        #[source]
        source: reqwest::Error,
    },

    /// The playlist request did not get a response.
    #[error("Unable to retrieve the playlist at \"{url}\"")]
    PlaylistRequest {
        url: String,
        #[source]
        source: reqwest_middleware::Error,
    },

    /// The playlist server answered with something other than 200.
    #[error("Unable to find the playlist at \"{url}\" ({status})")]
    PlaylistStatus { url: String, status: StatusCode },

    /// The playlist body is not JSON.
    #[error("Unexpected server response for the playlist: the body is not JSON")]
    PlaylistJson {
        #[source]
        source: serde_json::Error,
    },

    /// The playlist body is JSON but not a non-empty array of strings.
    #[error("Unexpected server response for the playlist: {0}. Expected an array of strings")]
    PlaylistShape(String),

    /// No usable local file name can be derived from an entry URL.
    #[error("Cannot derive a file name from \"{0}\"")]
    InvalidFileName(String),

    /// The request for a file did not get a response.
    #[error("Request failed")]
    DownloadRequest {
        #[source]
        source: reqwest_middleware::Error,
    },

    /// The file server answered with something other than 200.
    #[error("Server responded with {0}")]
    DownloadStatus(StatusCode),

    /// The body stream broke off before completion.
    #[error("Transfer interrupted")]
    Transfer {
        #[source]
        source: reqwest::Error,
    },

    /// I/O Error.
    #[error("I/O error")]
    IOError {
        #[from]
        source: io::Error,
    },
}

/// The broad category of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Configuration files are missing, unreadable or incomplete.
    Configuration,
    /// The playlist cannot be located, fetched or validated.
    Resolution,
    /// A single entry failed to download.
    Download,
}

impl Error {
    /// Returns the category this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::ServerConfigRequired { .. }
            | Error::ConfigNotFound { .. }
            | Error::ConfigRead { .. }
            | Error::Undecodable { .. }
            | Error::Syntax { .. }
            | Error::ConfigWrite { .. }
            | Error::MissingKey { .. }
            | Error::MissingDirectory { .. } => ErrorKind::Configuration,
            Error::UnqualifiedReference(_)
            | Error::InvalidUrl(_)
            | Error::HttpClient { .. }
            | Error::PlaylistRequest { .. }
            | Error::PlaylistStatus { .. }
            | Error::PlaylistJson { .. }
            | Error::PlaylistShape(_) => ErrorKind::Resolution,
            Error::InvalidFileName(_)
            | Error::DownloadRequest { .. }
            | Error::DownloadStatus(_)
            | Error::Transfer { .. }
            | Error::IOError { .. } => ErrorKind::Download,
        }
    }

    /// Returns the HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::PlaylistStatus { status, .. } => Some(*status),
            Error::DownloadStatus(status) => Some(*status),
            _ => None,
        }
    }

    /// The message followed by each underlying cause, joined by `": "`.
    pub fn chain(&self) -> String {
        let mut message = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            let text = cause.to_string();
            if !message.contains(&text) {
                message.push_str(": ");
                message.push_str(&text);
            }
            source = std::error::Error::source(cause);
        }
        message
    }
}

/// Result type alias for operations that can fail with a precache error.
pub type Result<T> = std::result::Result<T, Error>;
