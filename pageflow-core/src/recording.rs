//! Recording collaborators.
//!
//! In-memory implementations of every host trait that append what they were
//! asked to do to a shared [`EventLog`]. Used by the test suites and by
//! `pageflowctl simulate` to replay gestures without a UI.

use pageflow_contracts::prelude::*;
use pageflow_model::{MediaRef, Page, PageId};
use serde::Serialize;
use std::cell::RefCell;
use std::collections::HashSet;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

/// One call made on a recording collaborator.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Event {
    Load(Option<PathBuf>),
    Play,
    Pause,
    Seek(Duration),
    Unload,
    ShowCover(PageId, bool),
    SetOffset(f32),
    Animate {
        ticket: u64,
        offset: f32,
        duration: Duration,
        easing: Easing,
    },
    IndicatorCount(usize),
    IndicatorJump(usize),
    IndicatorRatio(f32),
    WillScrollTo(usize),
    DidScrollTo(usize),
    PageDidScroll(f32),
    PageSelected(usize),
}

impl Event {
    /// Player commands, as opposed to view or observer traffic.
    pub fn is_player_command(&self) -> bool {
        matches!(
            self,
            Event::Load(_) | Event::Play | Event::Pause | Event::Seek(_) | Event::Unload
        )
    }
}

/// Shared, append-only event list. Cloning shares the same storage.
#[derive(Debug, Clone, Default)]
pub struct EventLog(Rc<RefCell<Vec<Event>>>);

impl EventLog {
    pub fn push(&self, event: Event) {
        self.0.borrow_mut().push(event);
    }

    pub fn snapshot(&self) -> Vec<Event> {
        self.0.borrow().clone()
    }

    /// Drain everything recorded so far.
    pub fn take(&self) -> Vec<Event> {
        std::mem::take(&mut *self.0.borrow_mut())
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    pub fn count(&self, predicate: impl Fn(&Event) -> bool) -> usize {
        self.0.borrow().iter().filter(|e| predicate(e)).count()
    }
}

/// Media backend that accepts everything except the sources it was told to
/// reject.
#[derive(Debug)]
pub struct RecordingBackend {
    log: EventLog,
    rejected: HashSet<Option<PathBuf>>,
}

impl RecordingBackend {
    pub fn new(log: EventLog) -> Self {
        Self {
            log,
            rejected: HashSet::new(),
        }
    }

    /// Make `load` fail for media with this source.
    pub fn failing_on(mut self, source: Option<PathBuf>) -> Self {
        self.rejected.insert(source);
        self
    }
}

impl MediaBackend for RecordingBackend {
    fn load(&mut self, media: &MediaRef) -> Result<(), MediaFailure> {
        self.log.push(Event::Load(media.source.clone()));
        if self.rejected.contains(&media.source) {
            return Err(MediaFailure::Unavailable(format!(
                "{:?} rejected",
                media.source
            )));
        }
        Ok(())
    }

    fn play(&mut self) -> Result<(), MediaFailure> {
        self.log.push(Event::Play);
        Ok(())
    }

    fn pause(&mut self) {
        self.log.push(Event::Pause);
    }

    fn seek(&mut self, to: Duration) -> Result<(), MediaFailure> {
        self.log.push(Event::Seek(to));
        Ok(())
    }

    fn unload(&mut self) {
        self.log.push(Event::Unload);
    }
}

#[derive(Debug)]
pub struct RecordingCovers {
    log: EventLog,
}

impl RecordingCovers {
    pub fn new(log: EventLog) -> Self {
        Self { log }
    }
}

impl CoverPresenter for RecordingCovers {
    fn show_cover(&mut self, page: PageId, visible: bool) {
        self.log.push(Event::ShowCover(page, visible));
    }
}

/// Scroll surface whose animations land instantly. The host (or test) still
/// has to report completion through the paging surface.
#[derive(Debug)]
pub struct RecordingScroll {
    log: EventLog,
    offset: f32,
    last_ticket: Option<AnimationTicket>,
}

impl RecordingScroll {
    pub fn new(log: EventLog) -> Self {
        Self {
            log,
            offset: 0.0,
            last_ticket: None,
        }
    }

    /// Ticket of the most recent `animate_to` call.
    pub fn last_ticket(&self) -> Option<AnimationTicket> {
        self.last_ticket
    }

    /// Move the offset as a finger would, without recording a command.
    pub fn drag_to(&mut self, offset: f32) {
        self.offset = offset;
    }
}

impl ScrollSurface for RecordingScroll {
    fn content_offset(&self) -> f32 {
        self.offset
    }

    fn set_content_offset(&mut self, offset: f32) {
        self.log.push(Event::SetOffset(offset));
        self.offset = offset;
    }

    fn animate_to(
        &mut self,
        ticket: AnimationTicket,
        offset: f32,
        duration: Duration,
        easing: Easing,
    ) {
        self.log.push(Event::Animate {
            ticket: ticket.0,
            offset,
            duration,
            easing,
        });
        self.offset = offset;
        self.last_ticket = Some(ticket);
    }
}

#[derive(Debug)]
pub struct RecordingIndicator {
    log: EventLog,
}

impl RecordingIndicator {
    pub fn new(log: EventLog) -> Self {
        Self { log }
    }
}

impl PageIndicator for RecordingIndicator {
    fn set_count(&mut self, count: usize) {
        self.log.push(Event::IndicatorCount(count));
    }

    fn jump_to(&mut self, index: usize) {
        self.log.push(Event::IndicatorJump(index));
    }

    fn update_continuous(&mut self, offset_ratio: f32) {
        self.log.push(Event::IndicatorRatio(offset_ratio));
    }
}

#[derive(Debug)]
pub struct RecordingObserver {
    log: EventLog,
}

impl RecordingObserver {
    pub fn new(log: EventLog) -> Self {
        Self { log }
    }
}

impl PagingObserver for RecordingObserver {
    fn will_scroll_to(&mut self, index: usize, _page: &Page) {
        self.log.push(Event::WillScrollTo(index));
    }

    fn did_scroll_to(&mut self, index: usize, _page: &Page) {
        self.log.push(Event::DidScrollTo(index));
    }

    fn page_did_scroll(&mut self, offset_ratio: f32) {
        self.log.push(Event::PageDidScroll(offset_ratio));
    }

    fn page_selected(&mut self, index: usize, _page: &Page) {
        self.log.push(Event::PageSelected(index));
    }
}
