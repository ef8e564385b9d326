//! Trait surfaces for the host services the paging core drives.
//!
//! The core never renders, decodes or scrolls anything itself. Hosts
//! implement these traits over their native view, scroll and media
//! primitives and hand the implementations to the core, which owns them.

pub mod indicator;
pub mod media;
pub mod observer;
pub mod surface;

/// Frequently used trait combinators for host integrations.
pub mod prelude {
    pub use super::indicator::{PageIndicator, PageStep};
    pub use super::media::{
        CoverPresenter, CoverSource, MediaBackend, MediaFailure,
    };
    pub use super::observer::PagingObserver;
    pub use super::surface::{AnimationTicket, Easing, ScrollSurface};
}
