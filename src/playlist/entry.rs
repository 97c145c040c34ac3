//! A single playlist entry.

use crate::error::{Error, Result};

use percent_encoding::percent_decode_str;
use reqwest::Url;
use std::fmt;

/// A file named by the playlist, with the URL it resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistEntry {
    /// The string as it appeared in the playlist.
    pub name: String,
    /// Absolute URL of the file.
    pub url: Url,
}

impl PlaylistEntry {
    /// Creates a new [`PlaylistEntry`].
    pub fn new(name: &str, url: Url) -> Self {
        Self {
            name: name.to_string(),
            url,
        }
    }

    /// The local file name: the final path segment of the URL, decoded.
    ///
    /// Query and fragment are ignored. Names that are empty, `.`/`..`, or
    /// that would escape the cache directory are rejected.
    pub fn file_name(&self) -> Result<String> {
        let invalid = || Error::InvalidFileName(self.url.to_string());

        let segment = self
            .url
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .ok_or_else(invalid)?;

        let name = percent_decode_str(segment)
            .decode_utf8()
            .map_err(|_| invalid())?;

        if name.is_empty()
            || name == "."
            || name == ".."
            || name.contains(|c: char| matches!(c, '/' | '\\' | '\0'))
        {
            return Err(invalid());
        }
        Ok(name.into_owned())
    }
}

impl fmt::Display for PlaylistEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(url: &str) -> PlaylistEntry {
        PlaylistEntry::new("entry", Url::parse(url).unwrap())
    }

    #[test]
    fn test_file_name_from_last_segment() {
        assert_eq!(
            entry("http://host/files/a.mp4").file_name().unwrap(),
            "a.mp4"
        );
        assert_eq!(
            entry("http://host/files/a.mp4?token=1#t=30").file_name().unwrap(),
            "a.mp4"
        );
    }

    #[test]
    fn test_file_name_is_percent_decoded() {
        assert_eq!(
            entry("http://host/files/My%20Movie.mp4").file_name().unwrap(),
            "My Movie.mp4"
        );
    }

    #[test]
    fn test_file_name_rejects_directories() {
        assert!(matches!(
            entry("http://host/files/").file_name(),
            Err(Error::InvalidFileName(_))
        ));
        assert!(matches!(
            entry("http://host/files/..%2Fescape").file_name(),
            Err(Error::InvalidFileName(_))
        ));
        assert!(entry("http://host/files/%2E%2E").file_name().is_err());
    }
}
