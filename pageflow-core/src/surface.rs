//! PagingSurface: the gesture and lifecycle state machine.
//!
//! Hosts forward raw scroll, display and media events here. The surface
//! turns them into snap decisions on the [`PageDeck`], playback commands on
//! the [`PlaybackCoordinator`], indicator updates and observer
//! notifications. Everything runs on the host's UI thread; the only
//! asynchronous work is cover decoding, whose results come back through
//! [`PagingSurface::pump_covers`] or [`PagingSurface::next_cover`].
//!
//! ```text
//! Idle --drag_begin--> Dragging --drag_end--> Settling --complete--> Idle
//!                         |                                          ^
//!                         +--drag_end(decelerating)--> Idle* --------+
//! Idle --jump_to(animated)--> ProgrammaticJump --complete--> Idle
//! ```
//!
//! `Idle*` is Idle with a pending deceleration; the snap decision runs at
//! [`PagingSurface::deceleration_end`].

use pageflow_contracts::indicator::{PageIndicator, PageStep};
use pageflow_contracts::observer::PagingObserver;
use pageflow_contracts::surface::{AnimationTicket, ScrollSurface};
use pageflow_model::{Page, PageId, PagerError, PagerResult, SlotId};
use std::collections::HashMap;
use std::fmt;
use std::time::Instant;

use crate::config::PagingConfig;
use crate::constants::snap::SNAP_BACK_NUDGE;
use crate::covers::{CoverDecoder, CoverState, DecodeOutcome, DecodeTicket};
use crate::deck::{GestureMotion, PageDeck};
use crate::playback::PlaybackCoordinator;
use crate::slots::SlotTable;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SurfacePhase {
    #[default]
    Idle,
    Dragging,
    Settling,
    ProgrammaticJump,
}

/// How the finger left the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragRelease {
    pub at: Instant,
    /// Velocity reported by the host, in units/s. Without it the speed is
    /// derived from the drag duration.
    pub velocity: Option<f32>,
    /// The host will keep scrolling under inertia and report
    /// [`PagingSurface::deceleration_end`] later.
    pub will_decelerate: bool,
}

impl DragRelease {
    pub fn at(at: Instant) -> Self {
        Self {
            at,
            velocity: None,
            will_decelerate: false,
        }
    }

    pub fn with_velocity(mut self, velocity: f32) -> Self {
        self.velocity = Some(velocity);
        self
    }

    pub fn decelerating(mut self) -> Self {
        self.will_decelerate = true;
        self
    }
}

#[derive(Debug, Clone, Copy)]
struct PendingAnimation {
    ticket: AnimationTicket,
    index: usize,
}

pub struct PagingSurface<S, I> {
    deck: PageDeck,
    playback: PlaybackCoordinator,
    scroll: S,
    indicator: I,
    observers: Vec<Box<dyn PagingObserver>>,
    config: PagingConfig,
    phase: SurfacePhase,
    drag_started_at: Option<Instant>,
    /// Release motion held while the host decelerates.
    deceleration: Option<GestureMotion>,
    animation: Option<PendingAnimation>,
    next_ticket: u64,
    /// A page change was announced and has not settled yet. Survives
    /// interrupted animations so every `will_scroll_to` gets its
    /// `did_scroll_to`.
    announced: bool,
    slots: SlotTable,
    covers: HashMap<PageId, CoverState>,
    decoder: Option<CoverDecoder>,
}

impl<S, I> fmt::Debug for PagingSurface<S, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PagingSurface")
            .field("phase", &self.phase)
            .field("focus", &self.deck.focus_index())
            .field("pages", &self.deck.len())
            .field("decelerating", &self.deceleration.is_some())
            .field("animation", &self.animation.map(|a| a.ticket))
            .field("slots", &self.slots.len())
            .field("playback", &self.playback)
            .finish_non_exhaustive()
    }
}

impl<S, I> PagingSurface<S, I>
where
    S: ScrollSurface,
    I: PageIndicator,
{
    pub fn new(
        viewport_width: f32,
        config: PagingConfig,
        scroll: S,
        indicator: I,
        playback: PlaybackCoordinator,
    ) -> Self {
        Self {
            deck: PageDeck::from_config(viewport_width, &config),
            playback,
            scroll,
            indicator,
            observers: Vec::new(),
            config,
            phase: SurfacePhase::Idle,
            drag_started_at: None,
            deceleration: None,
            animation: None,
            next_ticket: 0,
            announced: false,
            slots: SlotTable::new(),
            covers: HashMap::new(),
            decoder: None,
        }
    }

    pub fn with_cover_decoder(mut self, decoder: CoverDecoder) -> Self {
        self.decoder = Some(decoder);
        self
    }

    pub fn add_observer(&mut self, observer: Box<dyn PagingObserver>) {
        self.observers.push(observer);
    }

    pub fn deck(&self) -> &PageDeck {
        &self.deck
    }

    pub fn playback(&self) -> &PlaybackCoordinator {
        &self.playback
    }

    pub fn scroll(&self) -> &S {
        &self.scroll
    }

    pub fn scroll_mut(&mut self) -> &mut S {
        &mut self.scroll
    }

    pub fn indicator(&self) -> &I {
        &self.indicator
    }

    pub fn config(&self) -> &PagingConfig {
        &self.config
    }

    pub fn phase(&self) -> SurfacePhase {
        self.phase
    }

    pub fn is_decelerating(&self) -> bool {
        self.deceleration.is_some()
    }

    pub fn focus_index(&self) -> Option<usize> {
        self.deck.focus_index()
    }

    pub fn cover(&self, page: PageId) -> Option<&CoverState> {
        self.covers.get(&page)
    }

    /// Replace the deck. Any animation in flight is abandoned, playback and
    /// slot bindings reset, and the first page settles immediately.
    pub fn load(&mut self, pages: Vec<Page>) {
        self.animation = None;
        self.deceleration = None;
        self.drag_started_at = None;
        self.announced = false;
        self.phase = SurfacePhase::Idle;
        self.playback.reset();
        self.slots.clear();
        self.covers.clear();

        self.deck.load(pages);
        self.indicator.set_count(self.deck.len());

        if let Some(focus) = self.deck.focus_index() {
            self.scroll
                .set_content_offset(self.deck.canonical_offset(focus));
            if let Some(page) = self.deck.page(focus) {
                self.playback.on_focus_settled(page);
            }
        }
    }

    /// Re-derive page geometry after a viewport resize and re-pin the
    /// focused page when nothing is moving.
    pub fn set_viewport_width(&mut self, viewport_width: f32) {
        self.deck.set_viewport_width(viewport_width);
        if self.phase == SurfacePhase::Idle
            && self.deceleration.is_none()
            && let Some(focus) = self.deck.focus_index()
        {
            self.scroll
                .set_content_offset(self.deck.canonical_offset(focus));
        }
    }

    pub fn drag_begin(&mut self, now: Instant) {
        if self.phase == SurfacePhase::Dragging {
            return;
        }
        if let Some(interrupted) = self.animation.take() {
            tracing::debug!(ticket = interrupted.ticket.0, "animation interrupted by drag");
        }
        self.deceleration = None;
        self.phase = SurfacePhase::Dragging;
        self.drag_started_at = Some(now);
        self.playback.on_drag_begin();
    }

    pub fn drag_end(&mut self, release: DragRelease) {
        if self.phase != SurfacePhase::Dragging {
            tracing::debug!(phase = ?self.phase, "drag end without drag");
            return;
        }
        let motion = match release.velocity {
            Some(velocity) => GestureMotion::Velocity(velocity),
            None => GestureMotion::Elapsed(
                self.drag_started_at
                    .map(|started| release.at.saturating_duration_since(started))
                    .unwrap_or_default(),
            ),
        };
        self.drag_started_at = None;

        if release.will_decelerate {
            self.phase = SurfacePhase::Idle;
            self.deceleration = Some(motion);
        } else {
            self.snap(motion);
        }
    }

    pub fn deceleration_end(&mut self) {
        let Some(motion) = self.deceleration.take() else {
            return;
        };
        self.snap(motion);
    }

    /// The content offset changed (finger, inertia or animation frame).
    pub fn scroll_moved(&mut self, offset: f32) {
        let tracking =
            self.phase != SurfacePhase::Idle || self.deceleration.is_some();
        if !tracking {
            return;
        }
        let Some(ratio) = self.deck.offset_ratio(offset) else {
            return;
        };
        tracing::trace!(offset, ratio, "scroll moved");
        self.indicator.update_continuous(ratio);
        for observer in &mut self.observers {
            observer.page_did_scroll(ratio);
        }
    }

    /// The host finished the animation started with `ticket`. Completions
    /// of interrupted or superseded animations are ignored.
    pub fn animation_complete(&mut self, ticket: AnimationTicket) {
        let Some(pending) = self.animation.filter(|a| a.ticket == ticket) else {
            tracing::debug!(ticket = ticket.0, "ignoring stale animation completion");
            return;
        };
        self.animation = None;
        self.phase = SurfacePhase::Idle;
        self.settle(pending.index);
    }

    /// Move focus to `index`. Jumping to the focused page is a no-op;
    /// out-of-range indices are rejected with focus unchanged. Ignored while
    /// the user is dragging.
    pub fn jump_to(&mut self, index: usize, animated: bool) -> PagerResult<()> {
        if self.deck.is_empty() {
            return Err(PagerError::EmptyDeck);
        }
        if self.deck.focus_index() == Some(index) {
            return Ok(());
        }
        if self.phase == SurfacePhase::Dragging {
            tracing::debug!(index, "jump ignored during drag");
            return Ok(());
        }
        self.deck.set_focus(index)?;
        self.animation = None;
        self.deceleration = None;
        self.announce(index);

        let offset = self.deck.canonical_offset(index);
        if animated {
            self.phase = SurfacePhase::ProgrammaticJump;
            self.start_animation(index, offset);
        } else {
            self.scroll.set_content_offset(offset);
            self.phase = SurfacePhase::Idle;
            self.settle(index);
        }
        Ok(())
    }

    /// Step one page, as requested by an indicator tap. Returns whether a
    /// step was taken.
    pub fn request_step(&mut self, step: PageStep) -> PagerResult<bool> {
        match self.deck.step_target(step) {
            Some(index) => self.jump_to(index, true).map(|()| true),
            None => Ok(false),
        }
    }

    /// The user selected the page at `index`.
    pub fn select(&mut self, index: usize) -> PagerResult<()> {
        let page = self.deck.set_selected(index, true)?;
        for observer in &mut self.observers {
            observer.page_selected(index, page);
        }
        Ok(())
    }

    /// The shared player reached the end of `page`'s media.
    pub fn media_ended(&mut self, page: PageId) {
        match self.deck.index_of(page).and_then(|i| self.deck.page(i)) {
            Some(page) => self.playback.on_media_ended(page),
            None => tracing::debug!(%page, "end of media for unknown page"),
        }
    }

    /// `slot` is about to show the page at `index`.
    pub fn will_display(&mut self, slot: SlotId, index: usize) -> PagerResult<()> {
        let page = self.deck.page(index).ok_or(PagerError::OutOfRange {
            index,
            count: self.deck.len(),
        })?;
        let id = page.id();

        let (ticket, previous) = self.slots.bind(slot, id);
        if let Some(previous) = previous {
            self.release_page(previous);
        }
        self.playback.track(id);
        self.request_cover(ticket);
        Ok(())
    }

    /// `slot` left the screen and may be recycled.
    pub fn did_end_display(&mut self, slot: SlotId) {
        let Some(binding) = self.slots.unbind(slot) else {
            return;
        };
        self.release_page(binding.page);
    }

    /// Apply every finished cover decode without blocking. Returns how many
    /// were collected.
    pub fn pump_covers(&mut self) -> usize {
        let mut applied = 0;
        while let Some(outcome) = self.decoder.as_mut().and_then(|d| d.try_next()) {
            self.apply_cover(outcome);
            applied += 1;
        }
        applied
    }

    /// Wait for the next cover decode. `None` when nothing is in flight or
    /// no decoder is attached.
    pub async fn next_cover(&mut self) -> Option<DecodeOutcome> {
        self.decoder.as_mut()?.next().await
    }

    /// Show a finished decode if its slot still displays the page it was
    /// started for.
    pub fn apply_cover(&mut self, outcome: DecodeOutcome) {
        let DecodeOutcome { ticket, result } = outcome;
        if !self.slots.is_current(&ticket) {
            let stale = PagerError::StaleResult {
                page: ticket.page,
                slot: ticket.slot,
            };
            tracing::debug!(error = %stale, "discarding cover");
            return;
        }
        let state = match result {
            Ok(cover) => CoverState::Ready(cover),
            Err(err) => {
                let failure = PagerError::MediaLoadFailure {
                    page: ticket.page,
                    reason: err.to_string(),
                };
                tracing::warn!(error = %failure, "cover unavailable, using placeholder");
                CoverState::Placeholder
            }
        };
        self.covers.insert(ticket.page, state);
    }

    fn snap(&mut self, motion: GestureMotion) {
        let Some(focus) = self.deck.focus_index() else {
            self.phase = SurfacePhase::Idle;
            return;
        };
        let offset = self.scroll.content_offset();
        let target = match self.deck.compute_snap_target(offset, motion, focus) {
            Ok(target) => target,
            Err(err) => {
                tracing::debug!(error = %err, "no snap target");
                self.phase = SurfacePhase::Idle;
                return;
            }
        };
        tracing::debug!(from = focus, to = target.index, offset, ?motion, "snap decided");

        if target.index != focus {
            // Focus commits at decision time; the transition only animates it.
            if let Err(err) = self.deck.set_focus(target.index) {
                tracing::warn!(error = %err, "snap target rejected");
                self.phase = SurfacePhase::Idle;
                return;
            }
            self.announce(target.index);
        } else {
            let nudge = if offset > target.offset {
                SNAP_BACK_NUDGE
            } else {
                -SNAP_BACK_NUDGE
            };
            self.indicator.update_continuous(nudge);
        }

        self.phase = SurfacePhase::Settling;
        self.start_animation(target.index, target.offset);
    }

    fn announce(&mut self, index: usize) {
        let Some(page) = self.deck.page(index) else {
            return;
        };
        self.announced = true;
        self.playback.on_will_focus(page);
        self.indicator.jump_to(index);
        for observer in &mut self.observers {
            observer.will_scroll_to(index, page);
        }
    }

    fn settle(&mut self, index: usize) {
        let Some(page) = self.deck.page(index) else {
            return;
        };
        self.playback.on_focus_settled(page);
        if std::mem::take(&mut self.announced) {
            for observer in &mut self.observers {
                observer.did_scroll_to(index, page);
            }
        } else {
            self.indicator.update_continuous(0.0);
        }
    }

    fn start_animation(&mut self, index: usize, offset: f32) {
        self.next_ticket += 1;
        let ticket = AnimationTicket(self.next_ticket);
        self.animation = Some(PendingAnimation { ticket, index });
        self.scroll.animate_to(
            ticket,
            offset,
            self.config.snap_duration(),
            self.config.snap_easing,
        );
    }

    /// A slot stopped showing `page`. Playback is released unless another
    /// slot still shows it. A pending cover whose binding is gone moves to
    /// the remaining slot; one still bound keeps its decode.
    fn release_page(&mut self, page: PageId) {
        let orphaned = matches!(
            self.covers.get(&page),
            Some(CoverState::Pending(ticket)) if !self.slots.is_current(ticket)
        );
        if orphaned {
            self.covers.remove(&page);
        }
        match self.slots.slot_showing(page) {
            Some(slot) => {
                if let Some(binding) = self.slots.binding(slot) {
                    self.request_cover(DecodeTicket::new(slot, binding));
                }
            }
            None => self.playback.on_reuse(page),
        }
    }

    fn request_cover(&mut self, ticket: DecodeTicket) {
        if self.covers.contains_key(&ticket.page) {
            return;
        }
        let Some(decoder) = self.decoder.as_mut() else {
            return;
        };
        let Some(page) = self
            .deck
            .index_of(ticket.page)
            .and_then(|i| self.deck.page(i))
        else {
            return;
        };
        self.covers.insert(ticket.page, CoverState::Pending(ticket));
        decoder.dispatch(ticket, page.media().clone());
    }
}
