//! Core data model definitions shared across pageflow crates.
#![allow(missing_docs)]

pub mod error;
pub mod ids;
pub mod media;
pub mod page;

// Intentionally curated re-exports for downstream consumers.
pub use error::{PagerError, Result as PagerResult};
pub use ids::{PageId, SlotId};
pub use media::{MediaKind, MediaRef};
pub use page::Page;
