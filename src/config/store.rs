//! Layered INI key/value store.
//!
//! A [`ConfigStore`] is assembled by reading one or more files in order into
//! the same store, so later files override the keys they redefine. Section
//! names match exactly while keys match case-insensitively, and a `[DEFAULT]`
//! section supplies fallback values for every other section.
//!
//! ```rust
//! use precache::config::ConfigStore;
//!
//! let mut store = ConfigStore::default();
//! store.set("Application", "Playlist", "'playlist.json'");
//! assert_eq!(store.get("Application", "playlist", None), Some("playlist.json"));
//! assert_eq!(store.get("Application", "DownloadServer", Some("")), Some(""));
//! ```

use super::encoding::{self, TextEncoding};
use crate::error::{Error, Result};

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

/// Section whose values apply to every other section.
pub const DEFAULT_SECTION: &str = "DEFAULT";

/// A named group of `key = value` entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    name: String,
    entries: Vec<(String, String)>,
}

impl Section {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            entries: Vec::new(),
        }
    }

    /// The section name, as written in its header.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The entries in insertion order, with the raw (still quoted) values.
    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    /// Look up the raw value of `key`, ignoring case.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.position(key).map(|i| self.entries[i].1.as_str())
    }

    fn set(&mut self, key: &str, value: &str) {
        match self.position(key) {
            Some(i) => self.entries[i] = (key.to_string(), value.to_string()),
            None => self.entries.push((key.to_string(), value.to_string())),
        }
    }

    fn append(&mut self, key: &str, line: &str) {
        if let Some(i) = self.position(key) {
            let value = &mut self.entries[i].1;
            value.push('\n');
            value.push_str(line);
        }
    }

    fn position(&self, key: &str) -> Option<usize> {
        let key = key.to_lowercase();
        self.entries.iter().position(|(k, _)| k.to_lowercase() == key)
    }
}

/// An in-memory INI configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigStore {
    sections: Vec<Section>,
}

impl ConfigStore {
    /// Read every file of `paths`, in order, into a new store.
    pub fn load<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let mut store = Self::default();
        for path in paths {
            store.read_file(path)?;
        }
        Ok(store)
    }

    /// Layer one more file over the store.
    ///
    /// Returns the encoding the file was decoded with.
    pub fn read_file(&mut self, path: impl AsRef<Path>) -> Result<TextEncoding> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => Error::ConfigNotFound {
                path: path.to_path_buf(),
            },
            _ => Error::ConfigRead {
                path: path.to_path_buf(),
                source,
            },
        })?;

        let (text, encoding) = encoding::decode(&bytes).ok_or_else(|| Error::Undecodable {
            path: path.to_path_buf(),
        })?;
        debug!("Decoded {:?} as {}", path, encoding);

        self.parse(&text, path)?;
        Ok(encoding)
    }

    /// Parse INI `text` into the store. `origin` is only used in errors.
    pub fn parse(&mut self, text: &str, origin: &Path) -> Result<()> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let syntax = |line: usize, reason: &str| Error::Syntax {
            path: origin.to_path_buf(),
            line,
            reason: reason.to_string(),
        };

        let mut current: Option<usize> = None;
        let mut last_key: Option<String> = None;

        for (index, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                last_key = None;
                continue;
            }
            if line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            // Indented lines continue the previous value.
            if raw.starts_with(char::is_whitespace) {
                if let (Some(section), Some(key)) = (current, last_key.as_deref()) {
                    self.sections[section].append(key, line);
                    continue;
                }
            }

            // Anything after the closing bracket is ignored.
            if let Some(close) = line.strip_prefix('[').and_then(|rest| rest.rfind(']')) {
                let name = line[1..1 + close].trim();
                if name.is_empty() {
                    return Err(syntax(index + 1, "empty section name"));
                }
                current = Some(self.section_index(name));
                last_key = None;
                continue;
            }

            let Some(section) = current else {
                return Err(syntax(index + 1, "entry appears before any [section] header"));
            };
            let Some(split) = line.find(|c: char| c == '=' || c == ':') else {
                return Err(syntax(index + 1, "expected `key = value`"));
            };
            let key = line[..split].trim();
            if key.is_empty() {
                return Err(syntax(index + 1, "missing key"));
            }
            let value = line[split + 1..].trim();

            self.sections[section].set(key, value);
            last_key = Some(key.to_string());
        }

        Ok(())
    }

    /// Returns the quote-stripped value of `key` in `section`.
    ///
    /// Falls back to the `[DEFAULT]` section, then to `fallback`, which is
    /// returned unmodified. Pass `None` as fallback for required keys.
    pub fn get<'a>(
        &'a self,
        section: &str,
        key: &str,
        fallback: Option<&'a str>,
    ) -> Option<&'a str> {
        self.raw(section, key).map(unquote).or(fallback)
    }

    /// Returns the value of `key` in `section` exactly as written.
    pub fn raw(&self, section: &str, key: &str) -> Option<&str> {
        let found = self.section(section)?;
        found.get(key).or_else(|| {
            self.section(DEFAULT_SECTION)
                .filter(|_| section != DEFAULT_SECTION)
                .and_then(|defaults| defaults.get(key))
        })
    }

    /// Insert or replace a value, creating the section if needed.
    pub fn set(&mut self, section: &str, key: &str, value: &str) {
        let index = self.section_index(section);
        self.sections[index].set(key, value);
    }

    /// Look up a section by exact name.
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    /// All sections in the order they were first seen.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Serialize the store to `path` as UTF-8.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        debug!("Writing configuration to {:?}", path);
        fs::write(path, self.to_string()).map_err(|source| Error::ConfigWrite {
            path: path.to_path_buf(),
            source,
        })
    }

    fn section_index(&mut self, name: &str) -> usize {
        match self.sections.iter().position(|s| s.name == name) {
            Some(index) => index,
            None => {
                self.sections.push(Section::new(name));
                self.sections.len() - 1
            }
        }
    }
}

impl fmt::Display for ConfigStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for section in &self.sections {
            writeln!(f, "[{}]", section.name)?;
            for (key, value) in &section.entries {
                writeln!(f, "{} = {}", key, value.replace('\n', "\n\t"))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Strip one matching pair of wrapping quotes (`'` or `"`).
///
/// Anything else, including mismatched or one-sided quoting, is returned
/// unchanged.
pub fn unquote(value: &str) -> &str {
    let bytes = value.as_bytes();
    match (bytes.first(), bytes.last()) {
        (Some(&first @ (b'"' | b'\'')), Some(&last)) if bytes.len() >= 2 && first == last => {
            &value[1..value.len() - 1]
        }
        _ => value,
    }
}
