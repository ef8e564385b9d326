//! Replays a gesture script against a deck with recording collaborators and
//! a tweened scroll surface, collecting what each step caused.

use anyhow::{Result, bail};
use pageflow_contracts::indicator::PageIndicator;
use pageflow_contracts::surface::ScrollSurface;
use pageflow_core::animator::{TweenScroll, TweenStep};
use pageflow_core::indicator::DotStrip;
use pageflow_core::recording::{
    Event, EventLog, RecordingBackend, RecordingCovers, RecordingIndicator,
    RecordingObserver,
};
use pageflow_core::{DragRelease, PagingConfig, PagingSurface, PlaybackCoordinator};
use pageflow_model::Page;
use serde::Serialize;
use std::time::{Duration, Instant};

use crate::script::Step;

/// Keeps the dot strip model for tap resolution while recording what the
/// indicator was told.
#[derive(Debug)]
struct TeeIndicator {
    strip: DotStrip,
    recorder: RecordingIndicator,
}

impl PageIndicator for TeeIndicator {
    fn set_count(&mut self, count: usize) {
        self.strip.set_count(count);
        self.recorder.set_count(count);
    }

    fn jump_to(&mut self, index: usize) {
        self.strip.jump_to(index);
        self.recorder.jump_to(index);
    }

    fn update_continuous(&mut self, offset_ratio: f32) {
        self.strip.update_continuous(offset_ratio);
        self.recorder.update_continuous(offset_ratio);
    }
}

#[derive(Debug, Serialize)]
pub struct StepReport {
    pub step: usize,
    pub focus: Option<usize>,
    pub playing: Option<String>,
    pub events: Vec<Event>,
}

pub struct Simulation {
    surface: PagingSurface<TweenScroll, TeeIndicator>,
    log: EventLog,
    clock: Instant,
    frame: Duration,
}

impl std::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("surface", &self.surface)
            .field("frame", &self.frame)
            .finish_non_exhaustive()
    }
}

impl Simulation {
    pub fn new(
        pages: Vec<Page>,
        viewport: f32,
        config: PagingConfig,
        frame: Duration,
    ) -> Result<Self> {
        if frame.is_zero() {
            bail!("frame interval must be non-zero");
        }
        let log = EventLog::default();
        let clock = Instant::now();
        let playback = PlaybackCoordinator::new(
            Box::new(RecordingBackend::new(log.clone())),
            Box::new(RecordingCovers::new(log.clone())),
            config.loop_by_default,
        );
        let indicator = TeeIndicator {
            strip: DotStrip::default(),
            recorder: RecordingIndicator::new(log.clone()),
        };
        let mut surface = PagingSurface::new(
            viewport,
            config,
            TweenScroll::new(clock),
            indicator,
            playback,
        );
        surface.add_observer(Box::new(RecordingObserver::new(log.clone())));
        surface.load(pages);

        Ok(Self {
            surface,
            log,
            clock,
            frame,
        })
    }

    /// Events recorded while loading the deck.
    pub fn initial_report(&self) -> StepReport {
        self.report(0)
    }

    pub fn run(&mut self, steps: &[Step]) -> Result<Vec<StepReport>> {
        let mut reports = Vec::with_capacity(steps.len());
        for (i, step) in steps.iter().enumerate() {
            tracing::debug!(step = i + 1, ?step, "replaying");
            self.apply(step)?;
            self.finish_animation();
            reports.push(self.report(i + 1));
        }
        Ok(reports)
    }

    fn report(&self, step: usize) -> StepReport {
        let playing = self
            .surface
            .deck()
            .pages()
            .iter()
            .find(|p| self.surface.playback().is_playing(p.id()))
            .map(|p| p.title().to_string());
        StepReport {
            step,
            focus: self.surface.focus_index(),
            playing,
            events: self.log.take(),
        }
    }

    fn apply(&mut self, step: &Step) -> Result<()> {
        match *step {
            Step::Drag {
                by,
                velocity,
                duration_ms,
                coast,
            } => self.drag(by, velocity, Duration::from_millis(duration_ms), coast),
            Step::Jump { index, animated } => {
                self.surface.jump_to(index, animated)?;
            }
            Step::Tap { x, width } => {
                match self.surface.indicator().strip.tap(x, width) {
                    Some(step) => {
                        self.surface.request_step(step)?;
                    }
                    None => tracing::info!(x, width, "tap outside indicator zone"),
                }
            }
            Step::MediaEnded => {
                if let Some(page) = self.surface.deck().focused().map(Page::id) {
                    self.surface.media_ended(page);
                }
            }
            Step::Select { index } => self.surface.select(index)?,
            Step::Resize { width } => self.surface.set_viewport_width(width),
        }
        Ok(())
    }

    fn drag(&mut self, by: f32, velocity: Option<f32>, duration: Duration, coast: Option<f32>) {
        let start = self.surface.scroll().content_offset();
        self.surface.drag_begin(self.clock);

        let frames = (duration.as_secs_f32() / self.frame.as_secs_f32())
            .ceil()
            .max(1.0) as u32;
        for n in 1..=frames {
            self.tick_clock();
            let offset = start + by * n as f32 / frames as f32;
            self.surface.scroll_mut().drag_to(offset);
            self.surface.scroll_moved(offset);
        }

        let mut release = DragRelease::at(self.clock);
        if let Some(velocity) = velocity {
            release = release.with_velocity(velocity);
        }
        let Some(coast) = coast else {
            self.surface.drag_end(release);
            return;
        };

        self.surface.drag_end(release.decelerating());
        let released_at = start + by;
        for n in 1..=frames {
            self.tick_clock();
            let offset = released_at + coast * n as f32 / frames as f32;
            self.surface.scroll_mut().drag_to(offset);
            self.surface.scroll_moved(offset);
        }
        self.surface.deceleration_end();
    }

    fn finish_animation(&mut self) {
        loop {
            self.tick_clock();
            match self.surface.scroll_mut().tick(self.clock) {
                Some(TweenStep::Frame(offset)) => self.surface.scroll_moved(offset),
                Some(TweenStep::Finished { ticket, offset }) => {
                    self.surface.scroll_moved(offset);
                    self.surface.animation_complete(ticket);
                }
                None => break,
            }
        }
    }

    fn tick_clock(&mut self) {
        self.clock += self.frame;
        self.surface.scroll_mut().set_clock(self.clock);
    }
}
