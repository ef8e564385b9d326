use pageflow_model::{MediaRef, PageId};
use std::time::Duration;
use thiserror::Error;

/// Failure reported by a media collaborator.
///
/// Always recoverable from the core's point of view: the affected page
/// degrades to its cover image.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MediaFailure {
    #[error("media source unavailable: {0}")]
    Unavailable(String),

    #[error("seek to {0:?} rejected")]
    SeekRejected(Duration),

    #[error("decode error: {0}")]
    Decode(String),
}

/// The single shared player.
///
/// One backend instance exists per carousel; the playback coordinator swaps
/// media in and out of it instead of allocating a decoder per page. The
/// backend itself does not enforce the one-playing-item rule.
pub trait MediaBackend {
    /// Bind `media` to the player, replacing whatever was bound before.
    fn load(&mut self, media: &MediaRef) -> Result<(), MediaFailure>;

    fn play(&mut self) -> Result<(), MediaFailure>;

    fn pause(&mut self);

    fn seek(&mut self, to: Duration) -> Result<(), MediaFailure>;

    /// Drop the bound media and release decoder resources.
    fn unload(&mut self);
}

/// Blocking cover reader. Runs on a background worker, never on the UI
/// thread.
pub trait CoverSource: Send + Sync {
    /// Read encoded cover bytes for `media`. Videos without an explicit
    /// cover are expected to extract the frame at `media.poster_time`.
    fn load_cover(&self, media: &MediaRef) -> Result<Vec<u8>, MediaFailure>;
}

/// Toggles the cover layer drawn above the player surface of a page.
pub trait CoverPresenter {
    fn show_cover(&mut self, page: PageId, visible: bool);
}
