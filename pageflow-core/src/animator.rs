//! Time-based offset tween for hosts without a native animated scroll.
//!
//! [`TweenScroll`] is a [`ScrollSurface`] that interpolates toward the
//! requested offset as the host ticks it, and hands back the ticket once the
//! target is reached.

use pageflow_contracts::surface::{AnimationTicket, Easing, ScrollSurface};
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct SnapAnimator {
    active: bool,
    start: f32,
    target: f32,
    started_at: Instant,
    duration: Duration,
    easing: Easing,
}

impl SnapAnimator {
    pub fn new(now: Instant) -> Self {
        Self {
            active: false,
            start: 0.0,
            target: 0.0,
            started_at: now,
            duration: Duration::ZERO,
            easing: Easing::default(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn start(
        &mut self,
        now: Instant,
        current: f32,
        target: f32,
        duration: Duration,
        easing: Easing,
    ) {
        self.active = true;
        self.start = current;
        self.target = target;
        self.started_at = now;
        self.duration = duration;
        self.easing = easing;
    }

    /// Offset at `now`, or `None` when idle. The call that reaches the
    /// target returns it exactly and deactivates the animator.
    pub fn tick(&mut self, now: Instant) -> Option<f32> {
        if !self.active {
            return None;
        }
        let elapsed = now.saturating_duration_since(self.started_at);
        if elapsed >= self.duration {
            self.active = false;
            return Some(self.target);
        }
        let t = elapsed.as_secs_f32() / self.duration.as_secs_f32();
        Some(self.start + (self.target - self.start) * self.easing.apply(t))
    }

    pub fn cancel(&mut self) {
        self.active = false;
    }
}

/// What a [`TweenScroll::tick`] produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TweenStep {
    /// Intermediate offset; feed it to the paging surface as a scroll move.
    Frame(f32),
    /// The animation for `ticket` landed on `offset`.
    Finished { ticket: AnimationTicket, offset: f32 },
}

#[derive(Debug, Clone)]
pub struct TweenScroll {
    offset: f32,
    animator: SnapAnimator,
    ticket: Option<AnimationTicket>,
    clock: Instant,
}

impl TweenScroll {
    pub fn new(now: Instant) -> Self {
        Self {
            offset: 0.0,
            animator: SnapAnimator::new(now),
            ticket: None,
            clock: now,
        }
    }

    /// Move the offset directly, as a finger drag would. Cancels any running
    /// tween without completing it.
    pub fn drag_to(&mut self, offset: f32) {
        self.animator.cancel();
        self.ticket = None;
        self.offset = offset;
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_active()
    }

    /// Advance the clock used to time the next `animate_to` call.
    pub fn set_clock(&mut self, now: Instant) {
        self.clock = now;
    }

    pub fn tick(&mut self, now: Instant) -> Option<TweenStep> {
        self.clock = now;
        let offset = self.animator.tick(now)?;
        self.offset = offset;
        if self.animator.is_active() {
            return Some(TweenStep::Frame(offset));
        }
        let ticket = self.ticket.take()?;
        Some(TweenStep::Finished { ticket, offset })
    }
}

impl ScrollSurface for TweenScroll {
    fn content_offset(&self) -> f32 {
        self.offset
    }

    fn set_content_offset(&mut self, offset: f32) {
        self.drag_to(offset);
    }

    fn animate_to(
        &mut self,
        ticket: AnimationTicket,
        offset: f32,
        duration: Duration,
        easing: Easing,
    ) {
        if let Some(replaced) = self.ticket.replace(ticket) {
            tracing::trace!(ticket = replaced.0, "tween replaced before finishing");
        }
        self.animator
            .start(self.clock, self.offset, offset, duration, easing);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_tween_hits_midpoint_and_target() {
        let t0 = Instant::now();
        let mut animator = SnapAnimator::new(t0);
        animator.start(t0, 0.0, 100.0, Duration::from_millis(200), Easing::Linear);

        let mid = animator.tick(t0 + Duration::from_millis(100)).expect("active");
        assert!((mid - 50.0).abs() < 1e-3);
        assert_eq!(animator.tick(t0 + Duration::from_millis(250)), Some(100.0));
        assert!(!animator.is_active());
        assert_eq!(animator.tick(t0 + Duration::from_millis(300)), None);
    }

    #[test]
    fn cancel_stops_ticking() {
        let t0 = Instant::now();
        let mut animator = SnapAnimator::new(t0);
        animator.start(t0, 0.0, 10.0, Duration::from_millis(100), Easing::EaseOut);
        animator.cancel();
        assert_eq!(animator.tick(t0 + Duration::from_millis(50)), None);
    }

    #[test]
    fn tween_scroll_reports_frames_then_ticket() {
        let t0 = Instant::now();
        let mut scroll = TweenScroll::new(t0);
        scroll.set_content_offset(-21.0);
        scroll.animate_to(
            AnimationTicket(7),
            300.0,
            Duration::from_millis(100),
            Easing::Linear,
        );

        match scroll.tick(t0 + Duration::from_millis(50)) {
            Some(TweenStep::Frame(offset)) => assert!((offset - 139.5).abs() < 1e-3),
            other => panic!("expected frame, got {other:?}"),
        }
        assert_eq!(
            scroll.tick(t0 + Duration::from_millis(100)),
            Some(TweenStep::Finished {
                ticket: AnimationTicket(7),
                offset: 300.0
            })
        );
        assert_eq!(scroll.content_offset(), 300.0);
        assert_eq!(scroll.tick(t0 + Duration::from_millis(150)), None);
    }

    #[test]
    fn drag_interrupts_without_completion() {
        let t0 = Instant::now();
        let mut scroll = TweenScroll::new(t0);
        scroll.animate_to(
            AnimationTicket(1),
            300.0,
            Duration::from_millis(100),
            Easing::Linear,
        );
        scroll.drag_to(40.0);

        assert!(!scroll.is_animating());
        assert_eq!(scroll.tick(t0 + Duration::from_millis(200)), None);
        assert_eq!(scroll.content_offset(), 40.0);
    }
}
