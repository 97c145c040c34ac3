//! The per-entry transfer state machine.
//!
//! A [`Transfer`] walks one playlist entry from [`Status::Pending`] through
//! [`Status::InFlight`] to a terminal state. Every failure path funnels
//! through [`Transfer::fail`], which removes whatever sits at the target path
//! so no partial or stale file survives a failed entry.

use super::summary::{Status, Summary};
use crate::error::{Error, Result};
use crate::playlist::PlaylistEntry;
use crate::report::Reporter;

use reqwest::StatusCode;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// One entry on its way into the cache.
pub struct Transfer<'a> {
    entry: &'a PlaylistEntry,
    directory: &'a Path,
    path: Option<PathBuf>,
    status: Status,
    reporter: &'a dyn Reporter,
}

impl<'a> Transfer<'a> {
    /// A pending transfer of `entry` into `directory`.
    pub fn new(entry: &'a PlaylistEntry, directory: &'a Path, reporter: &'a dyn Reporter) -> Self {
        Self {
            entry,
            directory,
            path: None,
            status: Status::Pending,
            reporter,
        }
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Target path, known once the transfer has begun with a valid file name.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Move to [`Status::InFlight`] and return the target path.
    ///
    /// An entry whose URL yields no usable file name is still in flight
    /// afterwards and must be failed by the caller.
    pub fn begin(&mut self) -> Result<PathBuf> {
        debug_assert_eq!(self.status, Status::Pending);
        self.status = Status::InFlight;
        let file_name = self.entry.file_name();
        let shown = file_name.as_deref().unwrap_or(self.entry.name.as_str());
        self.reporter.info(&format!("Downloading \"{}\"", shown));

        let path = self.directory.join(file_name?);
        self.path = Some(path.clone());
        Ok(path)
    }

    /// Finish successfully.
    pub fn complete(mut self, statuscode: StatusCode, size: u64) -> Summary {
        debug_assert_eq!(self.status, Status::InFlight);
        self.status = Status::Completed;
        self.reporter.ok("Complete.");

        Summary::new(self.entry.clone(), Some(statuscode), size).with_status(self.status)
    }

    /// Finish with `error`, removing any file at the target path.
    pub async fn fail(mut self, error: Error) -> Summary {
        debug_assert_eq!(self.status, Status::InFlight);
        let reason = error.chain();
        self.reporter.error(&format!("Failed to download file: {}", reason));

        if let Some(path) = self.path.take() {
            self.remove_leftover(&path).await;
        }

        self.status = Status::Failed(reason);
        Summary::new(self.entry.clone(), error.status(), 0).with_status(self.status)
    }

    async fn remove_leftover(&self, path: &Path) {
        match tokio::fs::try_exists(path).await {
            Ok(true) => {}
            Ok(false) => return,
            Err(e) => {
                warn!("Could not inspect {:?}: {}", path, e);
                return;
            }
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.entry.name.clone());
        self.reporter.notice(&format!("Deleting previous pre-cached file \"{}\"", name));

        if let Err(e) = tokio::fs::remove_file(path).await {
            debug!("Removing {:?} failed: {}", path, e);
            self.reporter.warn(&format!("Could not delete \"{}\": {}", name, e));
        }
    }
}
