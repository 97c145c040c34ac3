//! Shared utility functions.
//!
//! - [`content_length`] - declared body size of an HTTP response

pub mod content_length;

pub use content_length::{declared_length, parse_content_range_total};
