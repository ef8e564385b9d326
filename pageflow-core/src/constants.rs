//! Paging constants
//!
//! Compiled defaults for snap decisions, animation and indicator layout.
//! [`crate::config::PagingConfig`] falls back to these; tuning the feel of
//! every carousel should happen here.

/// Card geometry defaults.
pub mod geometry {
    /// Gap between adjacent cards, also used as the leading content inset.
    pub const GUTTER: f32 = 21.0;
    /// Page width is the viewport minus this many gutters.
    pub const VIEWPORT_INSET_GUTTERS: f32 = 4.0;
}

/// Snap decision defaults.
pub mod snap {
    /// Fraction of a page width the drag must exceed to change page on
    /// distance alone.
    pub const CROSSING_FRACTION: f32 = 0.5;
    /// Gesture speed (units/s) above which a short drag still flips a page.
    pub const SWIPE_SPEED_THRESHOLD: f32 = 300.0;
    /// Default duration (ms) of the snap and jump animations.
    pub const DURATION_MS: u64 = 250;
    /// Continuous ratio sent toward the travel side while a snap-back
    /// animates, so the indicator settles from the correct side.
    pub const SNAP_BACK_NUDGE: f32 = 0.001;
}

/// Page indicator layout, in points.
pub mod indicator {
    /// Resting dot size; the focused dot is twice as tall.
    pub const DOT_SIZE: f32 = 5.0;
    /// Centre-to-centre distance between dots, in dot sizes.
    pub const DOT_PITCH: f32 = 2.0;
    /// Slack around the outermost dots that still counts as a tap.
    pub const TAP_SLOP: f32 = 40.0;
}
