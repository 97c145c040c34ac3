//! Per-entry download bookkeeping.
//!
//! - [`summary`] - the outcome of each entry and of the whole run
//! - [`transfer`] - the state machine one entry goes through, including the
//!   cleanup performed on failure

pub mod summary;
pub mod transfer;

pub use summary::{RunSummary, Status, Summary};
pub use transfer::Transfer;
