//! Download summary functionality.
//!
//! A [`Summary`] records what happened to one playlist entry; a
//! [`RunSummary`] collects them in playlist order.
//!
//! ```rust
//! use precache::download::{RunSummary, Status, Summary};
//! use precache::playlist::PlaylistEntry;
//! use reqwest::{StatusCode, Url};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let entry = PlaylistEntry::new("a.mp4", Url::parse("http://host/files/a.mp4")?);
//! let summary = Summary::new(entry, Some(StatusCode::OK), 2048).with_status(Status::Completed);
//! let run = RunSummary::new(vec![summary]);
//! assert_eq!(run.to_string(), "1 of 1");
//! # Ok(())
//! # }
//! ```

use crate::playlist::PlaylistEntry;

use reqwest::StatusCode;
use std::fmt;

/// Lifecycle of one playlist entry.
///
/// `Pending -> InFlight -> Completed | Failed`. Both outcomes are terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// Not started yet.
    Pending,
    /// Request sent, body being written.
    InFlight,
    /// The file is in the cache.
    Completed,
    /// The entry failed with the given reason; nothing is left at its path.
    Failed(String),
}

impl Status {
    /// Whether the entry reached a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Status::Completed | Status::Failed(_))
    }
}

/// Represents the outcome of one playlist entry.
#[derive(Debug, Clone)]
pub struct Summary {
    /// The entry.
    entry: PlaylistEntry,
    /// HTTP status code, if a response was received.
    statuscode: Option<StatusCode>,
    /// Bytes written to disk.
    size: u64,
    /// Status.
    status: Status,
}

impl Summary {
    /// Create a new [`Summary`] in the [`Status::Pending`] state.
    pub fn new(entry: PlaylistEntry, statuscode: Option<StatusCode>, size: u64) -> Self {
        Self {
            entry,
            statuscode,
            size,
            status: Status::Pending,
        }
    }

    /// Attach a status to a [`Summary`].
    pub fn with_status(self, status: Status) -> Self {
        Self { status, ..self }
    }

    /// Mark the summary as failed with a message.
    pub fn fail(self, msg: impl fmt::Display) -> Self {
        Self {
            status: Status::Failed(msg.to_string()),
            ..self
        }
    }

    /// Get the HTTP status code, if any.
    pub fn statuscode(&self) -> Option<StatusCode> {
        self.statuscode
    }

    /// Get the number of bytes written.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Get a reference to the entry.
    pub fn entry(&self) -> &PlaylistEntry {
        &self.entry
    }

    /// Get a reference to the status.
    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Whether the entry completed.
    pub fn is_success(&self) -> bool {
        self.status == Status::Completed
    }
}

/// The ordered outcomes of a whole run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    summaries: Vec<Summary>,
}

impl RunSummary {
    pub fn new(summaries: Vec<Summary>) -> Self {
        Self { summaries }
    }

    /// Number of entries that completed.
    pub fn succeeded(&self) -> usize {
        self.summaries.iter().filter(|s| s.is_success()).count()
    }

    /// Number of entries that failed.
    pub fn failed(&self) -> usize {
        self.total() - self.succeeded()
    }

    /// Number of entries processed.
    pub fn total(&self) -> usize {
        self.summaries.len()
    }

    /// Per-entry summaries in playlist order.
    pub fn summaries(&self) -> &[Summary] {
        &self.summaries
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {}", self.succeeded(), self.total())
    }
}
