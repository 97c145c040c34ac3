//! Playlist location, retrieval and validation.

use super::entry::PlaylistEntry;
use crate::error::{Error, Result};

use reqwest::{StatusCode, Url};
use reqwest_middleware::ClientWithMiddleware;
use serde_json::Value;
use tracing::{debug, warn};

/// Resolves playlist and file references against an optional download server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistResolver {
    base: Option<Url>,
}

impl PlaylistResolver {
    /// Creates a resolver for `download_server`.
    ///
    /// A non-empty server is treated as a directory: a trailing `/` is added
    /// when absent. A server that is empty or not an absolute URL with a host
    /// leaves the resolver without a base, so every reference must then be
    /// fully qualified.
    pub fn new(download_server: &str) -> Self {
        let server = download_server.trim();
        if server.is_empty() {
            return Self { base: None };
        }

        let prefix = if server.ends_with('/') {
            server.to_string()
        } else {
            format!("{}/", server)
        };
        match Url::parse(&prefix) {
            Ok(base) if base.has_host() => Self { base: Some(base) },
            _ => {
                warn!("Ignoring download server {:?}: not fully qualified", server);
                Self { base: None }
            }
        }
    }

    /// The directory-like base URL, if a usable download server is configured.
    pub fn base(&self) -> Option<&Url> {
        self.base.as_ref()
    }

    /// Resolve `reference` against the base.
    ///
    /// A fully qualified reference overrides the base. Without a base, a
    /// reference that is not fully qualified is rejected.
    pub fn resolve_reference(&self, reference: &str) -> Result<Url> {
        match &self.base {
            Some(base) => base.join(reference).map_err(|e| {
                Error::InvalidUrl(format!(
                    "\"{}\" cannot be resolved against \"{}\": {}",
                    reference, base, e
                ))
            }),
            None => match Url::parse(reference) {
                Ok(url) if url.has_host() => Ok(url),
                _ => Err(Error::UnqualifiedReference(reference.to_string())),
            },
        }
    }

    /// Fetch the playlist named by `playlist` and resolve every entry.
    ///
    /// The playlist reference is validated before any request is sent.
    pub async fn resolve(
        &self,
        client: &ClientWithMiddleware,
        playlist: &str,
    ) -> Result<Vec<PlaylistEntry>> {
        let url = self.resolve_reference(playlist)?;
        let names = fetch_playlist(client, &url).await?;

        names
            .into_iter()
            .map(|name| -> Result<PlaylistEntry> {
                let url = self.resolve_reference(&name)?;
                debug!("Resolved {:?} to {}", name, url);
                Ok(PlaylistEntry { name, url })
            })
            .collect()
    }
}

/// GET the playlist at `url` and validate its body.
pub async fn fetch_playlist(client: &ClientWithMiddleware, url: &Url) -> Result<Vec<String>> {
    debug!("Fetching playlist {}", url);
    let res = client
        .get(url.as_str())
        .send()
        .await
        .map_err(|source| Error::PlaylistRequest {
            url: url.to_string(),
            source,
        })?;

    let status = res.status();
    if status != StatusCode::OK {
        return Err(Error::PlaylistStatus {
            url: url.to_string(),
            status,
        });
    }

    let body = res.bytes().await.map_err(|source| Error::PlaylistRequest {
        url: url.to_string(),
        source: source.into(),
    })?;
    parse_playlist(&body)
}

/// Parse a playlist body: a non-empty JSON array of non-empty strings.
pub fn parse_playlist(body: &[u8]) -> Result<Vec<String>> {
    let value: Value =
        serde_json::from_slice(body).map_err(|source| Error::PlaylistJson { source })?;

    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(Error::PlaylistShape(format!(
                "got {} instead of an array",
                describe(&other)
            )))
        }
    };
    if items.is_empty() {
        return Err(Error::PlaylistShape("the array is empty".into()));
    }

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::String(name) if !name.trim().is_empty() => Ok(name),
            Value::String(_) => Err(Error::PlaylistShape(format!(
                "element {} is an empty string",
                index
            ))),
            other => Err(Error::PlaylistShape(format!(
                "element {} is {}",
                index,
                describe(&other)
            ))),
        })
        .collect()
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
