//! The immutable run configuration.
//!
//! [`Settings`] is derived once from the layered [`ConfigStore`] and handed to
//! the components that need it. The only file this module ever writes is the
//! default local configuration, see [`ensure_local_config`].

use super::store::ConfigStore;
use crate::error::{Error, Result};

use std::path::{self, Path, PathBuf};
use tracing::debug;

/// File name of the server configuration when none is given.
pub const SERVER_CONFIG_FILE_NAME: &str = "precache-remote-settings.ini";
/// File name of the per-machine configuration.
pub const LOCAL_CONFIG_FILE_NAME: &str = "precache-local-settings.ini";
/// Cache directory used when the local configuration names none.
pub const DEFAULT_DOWNLOAD_DIRECTORY: &str = "./MovieNight";

/// The only section the tool reads.
pub const APPLICATION_SECTION: &str = "Application";
/// Base URI that relative references are resolved against.
pub const DOWNLOAD_SERVER_KEY: &str = "DownloadServer";
/// Reference to the playlist manifest.
pub const PLAYLIST_KEY: &str = "Playlist";
/// Local cache directory.
pub const DOWNLOAD_DIRECTORY_KEY: &str = "DownloadDirectory";

/// Settings for one run, validated up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    playlist: String,
    download_server: String,
    download_directory: PathBuf,
}

impl Settings {
    /// Derive the settings from a loaded configuration.
    ///
    /// Fails when `Playlist` is absent or empty, or when the download
    /// directory does not exist.
    pub fn from_store(store: &ConfigStore) -> Result<Self> {
        let playlist = store
            .get(APPLICATION_SECTION, PLAYLIST_KEY, None)
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| Error::MissingKey {
                section: APPLICATION_SECTION.to_string(),
                key: PLAYLIST_KEY.to_string(),
            })?;

        let download_server = store
            .get(APPLICATION_SECTION, DOWNLOAD_SERVER_KEY, Some(""))
            .unwrap_or_default();

        let directory = store
            .get(
                APPLICATION_SECTION,
                DOWNLOAD_DIRECTORY_KEY,
                Some(DEFAULT_DOWNLOAD_DIRECTORY),
            )
            .filter(|value| !value.trim().is_empty())
            .unwrap_or(DEFAULT_DOWNLOAD_DIRECTORY);

        Ok(Self {
            playlist: playlist.trim().to_string(),
            download_server: download_server.trim().to_string(),
            download_directory: resolve_directory(Path::new(directory.trim()))?,
        })
    }

    /// The playlist reference, absolute or relative to the download server.
    pub fn playlist(&self) -> &str {
        &self.playlist
    }

    /// The base URI, empty when not configured.
    pub fn download_server(&self) -> &str {
        &self.download_server
    }

    /// The absolute, existing cache directory.
    pub fn download_directory(&self) -> &Path {
        &self.download_directory
    }
}

/// Make `directory` absolute and require that it exists.
pub fn resolve_directory(directory: &Path) -> Result<PathBuf> {
    let missing = || Error::MissingDirectory {
        path: directory.to_path_buf(),
    };
    let absolute = path::absolute(directory).map_err(|_| missing())?;
    debug!("Download directory resolved to {:?}", absolute);

    if !absolute.is_dir() {
        return Err(Error::MissingDirectory { path: absolute });
    }
    Ok(absolute)
}

/// The configuration written when no local configuration exists.
pub fn default_local_config() -> ConfigStore {
    let mut store = ConfigStore::default();
    store.set(
        APPLICATION_SECTION,
        DOWNLOAD_DIRECTORY_KEY,
        DEFAULT_DOWNLOAD_DIRECTORY,
    );
    store
}

/// Write the default local configuration to `path` unless a file is there.
///
/// Returns `true` when the file was created.
pub fn ensure_local_config(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    default_local_config().write(path)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(text: &str) -> ConfigStore {
        let mut store = ConfigStore::default();
        store.parse(text, Path::new("test.ini")).unwrap();
        store
    }

    #[test]
    fn test_playlist_is_required() {
        let result = Settings::from_store(&store("[Application]\nDownloadServer = http://host\n"));
        match result {
            Err(Error::MissingKey { key, .. }) => assert_eq!(key, PLAYLIST_KEY),
            other => panic!("Expected MissingKey, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_playlist_is_missing() {
        let result = Settings::from_store(&store("[Application]\nPlaylist = ''\n"));
        assert!(matches!(result, Err(Error::MissingKey { .. })));
    }

    #[test]
    fn test_settings_from_store() {
        let dir = tempfile::tempdir().unwrap();
        let text = format!(
            "[Application]\nDownloadServer = \"http://host/files\"\nPlaylist = 'list.json'\nDownloadDirectory = {}\n",
            dir.path().display()
        );
        let settings = Settings::from_store(&store(&text)).unwrap();

        assert_eq!(settings.playlist(), "list.json");
        assert_eq!(settings.download_server(), "http://host/files");
        assert!(settings.download_directory().is_absolute());
        assert_eq!(settings.download_directory(), dir.path());
    }

    #[test]
    fn test_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent");
        let result = resolve_directory(&missing);
        assert!(matches!(result, Err(Error::MissingDirectory { .. })));
    }

    #[test]
    fn test_default_local_config() {
        let store = default_local_config();
        assert_eq!(
            store.get(APPLICATION_SECTION, DOWNLOAD_DIRECTORY_KEY, None),
            Some(DEFAULT_DOWNLOAD_DIRECTORY)
        );
    }

    #[test]
    fn test_ensure_local_config_keeps_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(LOCAL_CONFIG_FILE_NAME);
        std::fs::write(&path, "[Application]\nDownloadDirectory = elsewhere\n").unwrap();

        assert!(!ensure_local_config(&path).unwrap());
        let store = ConfigStore::load(&[&path]).unwrap();
        assert_eq!(
            store.get(APPLICATION_SECTION, DOWNLOAD_DIRECTORY_KEY, None),
            Some("elsewhere")
        );
    }
}
