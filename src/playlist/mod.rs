//! Playlist resolution.
//!
//! A playlist is a JSON array of file names served next to the media. The
//! [`PlaylistResolver`] locates it (absolute, or relative to the download
//! server), validates its shape and resolves every name to an absolute URL.
//!
//! ```rust
//! use precache::playlist::PlaylistResolver;
//!
//! # fn main() -> Result<(), precache::Error> {
//! let resolver = PlaylistResolver::new("http://host/files");
//! let url = resolver.resolve_reference("playlist.json")?;
//! assert_eq!(url.as_str(), "http://host/files/playlist.json");
//! # Ok(())
//! # }
//! ```

pub mod entry;
pub mod resolver;

pub use entry::PlaylistEntry;
pub use resolver::{fetch_playlist, parse_playlist, PlaylistResolver};
