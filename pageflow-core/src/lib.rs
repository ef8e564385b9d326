//! # Pageflow Core
//!
//! Paging logic for horizontally swiped media carousels: where a gesture
//! settles, which page owns the single shared player, and how recycled
//! view slots and background cover decodes are kept consistent.
//!
//! ## Overview
//!
//! - **Snap decisions**: [`deck::PageDeck`] holds the ordered pages, the
//!   focused index and the geometry, and maps a released gesture to a
//!   target page using distance, swipe speed and edge clamping
//! - **Playback**: [`playback::PlaybackCoordinator`] guarantees at most one
//!   page plays at a time and moves the shared player between pages
//! - **Surface state machine**: [`surface::PagingSurface`] turns drag,
//!   deceleration, animation and slot events into the above
//! - **Covers**: [`covers::CoverDecoder`] decodes cover art on tokio's
//!   blocking pool; stale results are dropped by slot generation
//! - **Indicator**: [`indicator::DotStrip`] models the dot strip and its tap
//!   zone
//!
//! Hosts plug in their scroll view, player, cover source and indicator
//! through the traits in `pageflow-contracts`.
//!
//! ## Example
//!
//! ```no_run
//! use pageflow_core::prelude::*;
//! use pageflow_core::recording::{EventLog, RecordingBackend, RecordingCovers, RecordingScroll};
//! use pageflow_model::{MediaRef, Page};
//! use std::time::Instant;
//!
//! let log = EventLog::default();
//! let config = PagingConfig::default();
//! let playback = PlaybackCoordinator::new(
//!     Box::new(RecordingBackend::new(log.clone())),
//!     Box::new(RecordingCovers::new(log.clone())),
//!     config.loop_by_default,
//! );
//! let mut surface = PagingSurface::new(
//!     384.0,
//!     config,
//!     RecordingScroll::new(log.clone()),
//!     DotStrip::default(),
//!     playback,
//! );
//! surface.load(vec![
//!     Page::new("intro", MediaRef::video("intro.mp4")),
//!     Page::new("detail", MediaRef::image("detail.png")),
//! ]);
//!
//! let start = Instant::now();
//! surface.drag_begin(start);
//! surface.scroll_mut().drag_to(200.0);
//! surface.drag_end(DragRelease::at(start).with_velocity(900.0));
//! assert_eq!(surface.focus_index(), Some(1));
//! ```
#![allow(missing_docs)]

pub mod animator;
pub mod config;
pub mod constants;
pub mod covers;
pub mod deck;
pub mod indicator;
pub mod playback;
pub mod recording;
pub mod slots;
pub mod surface;

pub use config::{ConfigError, PagingConfig, TieBreak};
pub use deck::{GestureMotion, PageDeck, SnapTarget};
pub use playback::{PlaybackCoordinator, PlaybackState};
pub use surface::{DragRelease, PagingSurface, SurfacePhase};

/// Everything a host needs to wire up a carousel.
pub mod prelude {
    pub use crate::animator::{TweenScroll, TweenStep};
    pub use crate::config::{PagingConfig, TieBreak};
    pub use crate::covers::{CoverDecoder, CoverState, DecodedCover};
    pub use crate::deck::{
        DeckGeometry, GestureMotion, PageDeck, ScrollIntent, SnapPolicy,
        SnapTarget,
    };
    pub use crate::indicator::{DotLayout, DotStrip};
    pub use crate::playback::{PlaybackCoordinator, PlaybackState};
    pub use crate::surface::{DragRelease, PagingSurface, SurfacePhase};
    pub use pageflow_contracts::prelude::*;
}
