//! Configuration loading.
//!
//! - [`encoding`] - byte-order-mark sniffing and the ordered decoding candidates
//! - [`store`] - the layered INI [`ConfigStore`] and quote stripping
//! - [`settings`] - the validated [`Settings`] of a run and the local config bootstrap

pub mod encoding;
pub mod settings;
pub mod store;

pub use encoding::TextEncoding;
pub use settings::{ensure_local_config, Settings};
pub use store::{unquote, ConfigStore, Section};
