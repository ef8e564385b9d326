use pageflow_contracts::surface::ScrollSurface;
use pageflow_core::recording::{
    Event, EventLog, RecordingBackend, RecordingCovers, RecordingIndicator,
    RecordingObserver, RecordingScroll,
};
use pageflow_core::{DragRelease, PagingConfig, PagingSurface, PlaybackCoordinator};
use pageflow_model::{MediaRef, Page};
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Viewport that yields 300-wide pages with the default 21 gutter.
pub const VIEWPORT: f32 = 384.0;

pub type TestSurface = PagingSurface<RecordingScroll, RecordingIndicator>;

pub fn videos(count: usize) -> Vec<Page> {
    (0..count)
        .map(|i| Page::new(format!("clip {i}"), MediaRef::video(format!("clip-{i}.mp4"))))
        .collect()
}

pub fn source(page: &Page) -> Option<PathBuf> {
    page.media().source.clone()
}

pub struct Harness {
    pub surface: TestSurface,
    pub log: EventLog,
    pub clock: Instant,
}

impl Harness {
    pub fn new(pages: Vec<Page>) -> Self {
        Self::with_config(pages, PagingConfig::default())
    }

    pub fn with_config(pages: Vec<Page>, config: PagingConfig) -> Self {
        Self::build(pages, config, |backend| backend)
    }

    pub fn build(
        pages: Vec<Page>,
        config: PagingConfig,
        backend: impl FnOnce(RecordingBackend) -> RecordingBackend,
    ) -> Self {
        let log = EventLog::default();
        let playback = PlaybackCoordinator::new(
            Box::new(backend(RecordingBackend::new(log.clone()))),
            Box::new(RecordingCovers::new(log.clone())),
            config.loop_by_default,
        );
        let mut surface = PagingSurface::new(
            VIEWPORT,
            config,
            RecordingScroll::new(log.clone()),
            RecordingIndicator::new(log.clone()),
            playback,
        );
        surface.add_observer(Box::new(RecordingObserver::new(log.clone())));
        surface.load(pages);
        log.clear();
        Self {
            surface,
            log,
            clock: Instant::now(),
        }
    }

    pub fn offset(&self, index: usize) -> f32 {
        self.surface.deck().canonical_offset(index)
    }

    pub fn page(&self, index: usize) -> Page {
        self.surface.deck().page(index).cloned().expect("page in deck")
    }

    /// Grab, move `delta` away from the focused page, and release with
    /// `velocity`. The snap animation is left running.
    pub fn fling(&mut self, delta: f32, velocity: f32) {
        self.begin();
        self.move_by(delta);
        self.surface
            .drag_end(DragRelease::at(self.clock).with_velocity(velocity));
    }

    /// [`Self::fling`] and let the animation finish.
    pub fn swipe(&mut self, delta: f32, velocity: f32) {
        self.fling(delta, velocity);
        self.complete();
    }

    pub fn begin(&mut self) {
        self.clock += Duration::from_millis(16);
        self.surface.drag_begin(self.clock);
    }

    pub fn move_by(&mut self, delta: f32) {
        let focus = self.surface.focus_index().unwrap_or(0);
        let offset = self.offset(focus) + delta;
        self.surface.scroll_mut().drag_to(offset);
        self.surface.scroll_moved(offset);
    }

    pub fn complete(&mut self) {
        let ticket = self
            .surface
            .scroll()
            .last_ticket()
            .expect("an animation was started");
        self.surface.animation_complete(ticket);
    }

    pub fn content_offset(&self) -> f32 {
        self.surface.scroll().content_offset()
    }

    pub fn take(&self) -> Vec<Event> {
        self.log.take()
    }

    pub fn observed(&self) -> Vec<Event> {
        self.log
            .take()
            .into_iter()
            .filter(|e| {
                matches!(
                    e,
                    Event::WillScrollTo(_) | Event::DidScrollTo(_) | Event::PageSelected(_)
                )
            })
            .collect()
    }
}
