use thiserror::Error;

use crate::ids::{PageId, SlotId};

/// Errors produced by the paging core.
///
/// None of these is fatal: callers either reject the input (`OutOfRange`),
/// treat the call as a no-op (`EmptyDeck`), or degrade to a static cover
/// (`MediaLoadFailure`, `StaleResult`).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PagerError {
    #[error("index {index} out of range for deck of {count} pages")]
    OutOfRange { index: usize, count: usize },

    #[error("deck has no pages")]
    EmptyDeck,

    #[error("media for page {page} unavailable: {reason}")]
    MediaLoadFailure { page: PageId, reason: String },

    #[error("stale result for page {page} on {slot}")]
    StaleResult { page: PageId, slot: SlotId },
}

pub type Result<T> = std::result::Result<T, PagerError>;
