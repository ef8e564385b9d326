//! PlaybackCoordinator: one shared player, moved between pages on focus
//! settles and slot recycling.
//!
//! The coordinator is the only code that touches the [`MediaBackend`]. It
//! guarantees that at most one page is playing at any time and turns every
//! media failure into a static cover.

use pageflow_contracts::media::{CoverPresenter, MediaBackend, MediaFailure};
use pageflow_model::{Page, PageId, PagerError};
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

/// Runtime flags for one reachable page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlaybackState {
    pub playing: bool,
    /// Media is bound to the shared player.
    pub loaded: bool,
    /// A load, seek or play failed; the page shows its cover until new page
    /// data arrives.
    pub failed: bool,
}

/// The shared player as a pool of exactly one. `holder` is the page whose
/// media is currently bound.
struct PlayerPool {
    backend: Box<dyn MediaBackend>,
    holder: Option<PageId>,
}

impl PlayerPool {
    fn acquire(&mut self, page: &Page) -> Result<(), MediaFailure> {
        if self.holder == Some(page.id()) {
            return Ok(());
        }
        self.evict();
        if let Err(failure) = self.backend.load(page.media()) {
            self.backend.unload();
            return Err(failure);
        }
        self.holder = Some(page.id());
        Ok(())
    }

    /// Stop, rewind and unbind the current holder.
    fn evict(&mut self) -> Option<PageId> {
        let holder = self.holder.take()?;
        self.backend.pause();
        if let Err(failure) = self.backend.seek(Duration::ZERO) {
            tracing::debug!(page = %holder, %failure, "rewind on evict failed");
        }
        self.backend.unload();
        tracing::debug!(page = %holder, "player released");
        Some(holder)
    }
}

pub struct PlaybackCoordinator {
    pool: PlayerPool,
    covers: Box<dyn CoverPresenter>,
    states: HashMap<PageId, PlaybackState>,
    failures: HashMap<PageId, PagerError>,
    active: Option<PageId>,
    upcoming: Option<PageId>,
    loop_by_default: bool,
}

impl fmt::Debug for PlaybackCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaybackCoordinator")
            .field("holder", &self.pool.holder)
            .field("active", &self.active)
            .field("upcoming", &self.upcoming)
            .field("states", &self.states)
            .field("failures", &self.failures.len())
            .finish()
    }
}

impl PlaybackCoordinator {
    pub fn new(
        backend: Box<dyn MediaBackend>,
        covers: Box<dyn CoverPresenter>,
        loop_by_default: bool,
    ) -> Self {
        Self {
            pool: PlayerPool {
                backend,
                holder: None,
            },
            covers,
            states: HashMap::new(),
            failures: HashMap::new(),
            active: None,
            upcoming: None,
            loop_by_default,
        }
    }

    /// Page that last settled into focus.
    pub fn active(&self) -> Option<PageId> {
        self.active
    }

    /// Page announced by [`Self::on_will_focus`] that has not settled yet.
    pub fn upcoming(&self) -> Option<PageId> {
        self.upcoming
    }

    /// Page whose media is bound to the shared player.
    pub fn player_holder(&self) -> Option<PageId> {
        self.pool.holder
    }

    pub fn state(&self, page: PageId) -> Option<PlaybackState> {
        let failed = self.failures.contains_key(&page);
        match self.states.get(&page) {
            Some(state) => Some(PlaybackState { failed, ..*state }),
            None if failed => Some(PlaybackState {
                failed,
                ..PlaybackState::default()
            }),
            None => None,
        }
    }

    pub fn failure(&self, page: PageId) -> Option<&PagerError> {
        self.failures.get(&page)
    }

    pub fn playing_count(&self) -> usize {
        self.states.values().filter(|s| s.playing).count()
    }

    pub fn is_playing(&self, page: PageId) -> bool {
        self.states.get(&page).is_some_and(|s| s.playing)
    }

    /// Start tracking a page that became reachable.
    pub fn track(&mut self, page: PageId) {
        self.states.entry(page).or_default();
    }

    /// Drop every page and release the player. Used when the deck is
    /// replaced wholesale.
    pub fn reset(&mut self) {
        self.pool.evict();
        self.states.clear();
        self.failures.clear();
        self.active = None;
        self.upcoming = None;
    }

    pub fn on_will_focus(&mut self, page: &Page) {
        tracing::debug!(page = %page.id(), "focus incoming");
        self.upcoming = Some(page.id());
    }

    pub fn on_focus_settled(&mut self, page: &Page) {
        let id = page.id();
        self.upcoming = None;

        if let Some(previous) = self.active.filter(|p| *p != id) {
            self.pause_page(previous);
        }
        self.active = Some(id);

        let state = self.states.entry(id).or_default();
        if state.playing || !page.media().kind.is_playable() {
            return;
        }
        if self.failures.contains_key(&id) {
            self.covers.show_cover(id, true);
            return;
        }

        debug_assert!(
            self.states.iter().all(|(p, s)| *p == id || !s.playing),
            "another page still holds playback"
        );

        let started = self
            .pool
            .acquire(page)
            .and_then(|()| self.pool.backend.play());
        match started {
            Ok(()) => {
                let state = self.states.entry(id).or_default();
                state.playing = true;
                state.loaded = true;
                self.covers.show_cover(id, false);
                tracing::debug!(page = %id, kind = %page.media().kind, "playback started");
            }
            Err(failure) => self.degrade(id, failure),
        }
    }

    /// The user grabbed the surface: silence the active page without
    /// changing focus.
    pub fn on_drag_begin(&mut self) {
        if let Some(active) = self.active {
            self.pause_page(active);
        }
    }

    /// A slot showing `page` was recycled.
    pub fn on_reuse(&mut self, page: PageId) {
        if self.pool.holder == Some(page) {
            self.pool.evict();
        }
        self.states.remove(&page);
        if self.active == Some(page) {
            self.active = None;
        }
        if self.upcoming == Some(page) {
            self.upcoming = None;
        }
        self.covers.show_cover(page, true);
        tracing::debug!(page = %page, "page recycled");
    }

    /// The player reached the end of `page`'s media.
    pub fn on_media_ended(&mut self, page: &Page) {
        let id = page.id();
        if self.pool.holder != Some(id) || !self.is_playing(id) {
            tracing::debug!(page = %id, "ignoring end of media for inactive page");
            return;
        }

        if page.media().loops(self.loop_by_default) {
            let restarted = self
                .pool
                .backend
                .seek(Duration::ZERO)
                .and_then(|()| self.pool.backend.play());
            if let Err(failure) = restarted {
                self.degrade(id, failure);
            }
            return;
        }

        if let Err(failure) = self.pool.backend.seek(Duration::ZERO) {
            tracing::debug!(page = %id, %failure, "rewind after end failed");
        }
        self.pool.backend.pause();
        if let Some(state) = self.states.get_mut(&id) {
            state.playing = false;
        }
        self.covers.show_cover(id, true);
    }

    fn pause_page(&mut self, page: PageId) {
        let Some(state) = self.states.get_mut(&page) else {
            return;
        };
        if state.playing {
            self.pool.backend.pause();
            state.playing = false;
            tracing::debug!(page = %page, "playback paused");
        }
    }

    fn degrade(&mut self, page: PageId, failure: MediaFailure) {
        let error = PagerError::MediaLoadFailure {
            page,
            reason: failure.to_string(),
        };
        tracing::warn!(%error, "falling back to cover");

        if self.pool.holder == Some(page) {
            self.pool.backend.pause();
            self.pool.backend.unload();
            self.pool.holder = None;
        }
        let state = self.states.entry(page).or_default();
        state.playing = false;
        state.loaded = false;
        self.failures.insert(page, error);
        self.covers.show_cover(page, true);
    }
}
