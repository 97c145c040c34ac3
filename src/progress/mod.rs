//! Progress bar styling and display management.
//!
//! - `style` - progress bar styling options and templates
//! - `display` - progress bar coordination during a run
//!
//! ```rust
//! use precache::downloader::DownloaderBuilder;
//! use precache::progress::StyleOptions;
//!
//! let downloader = DownloaderBuilder::new()
//!     .style_options(StyleOptions::default())
//!     .build();
//! ```

pub(crate) mod display;
pub(crate) mod style;

pub use display::{ProgressDisplay, SuspendingReporter};
pub use style::{ProgressBarOpts, StyleOptions};
