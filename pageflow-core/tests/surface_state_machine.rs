#[path = "support/mod.rs"]
mod support;

use pageflow_contracts::indicator::PageStep;
use pageflow_contracts::surface::{AnimationTicket, Easing};
use pageflow_core::recording::Event;
use pageflow_core::{DragRelease, PagingConfig, SurfacePhase};
use pageflow_model::{MediaRef, Page, PagerError};
use std::time::Duration;
use support::harness::{Harness, source, videos};

#[test]
fn load_pins_first_page_and_starts_it() {
    let mut harness = Harness::new(Vec::new());
    let pages = videos(3);
    let first = pages[0].clone();

    harness.surface.load(pages);

    assert_eq!(
        harness.take(),
        vec![
            Event::IndicatorCount(3),
            Event::SetOffset(-21.0),
            Event::Load(source(&first)),
            Event::Play,
            Event::ShowCover(first.id(), false),
        ]
    );
    assert_eq!(harness.surface.focus_index(), Some(0));
    assert_eq!(harness.surface.phase(), SurfacePhase::Idle);
}

#[test]
fn distance_swipe_moves_forward_and_hands_over_playback() {
    let mut harness = Harness::new(videos(3));
    let (first, second) = (harness.page(0), harness.page(1));

    harness.fling(151.0, 0.0);

    // Focus commits at the decision; the animation only shows it.
    assert_eq!(harness.surface.focus_index(), Some(1));
    assert_eq!(harness.surface.phase(), SurfacePhase::Settling);
    let events = harness.take();
    assert_eq!(events[0], Event::Pause);
    assert!(matches!(events[1], Event::IndicatorRatio(r) if (r - 151.0 / 300.0).abs() < 1e-5));
    assert!(matches!(events[2], Event::PageDidScroll(_)));
    assert_eq!(
        &events[3..],
        &[
            Event::IndicatorJump(1),
            Event::WillScrollTo(1),
            Event::Animate {
                ticket: 1,
                offset: 300.0,
                duration: Duration::from_millis(250),
                easing: Easing::EaseOut,
            },
        ]
    );

    harness.complete();
    assert_eq!(
        harness.take(),
        vec![
            Event::Pause,
            Event::Seek(Duration::ZERO),
            Event::Unload,
            Event::Load(source(&second)),
            Event::Play,
            Event::ShowCover(second.id(), false),
            Event::DidScrollTo(1),
        ]
    );
    assert_eq!(harness.surface.phase(), SurfacePhase::Idle);
    assert!(!harness.surface.playback().is_playing(first.id()));
    assert!(harness.surface.playback().is_playing(second.id()));
}

#[test]
fn short_slow_drag_snaps_back_with_nudge() {
    let mut harness = Harness::new(videos(3));
    let first = harness.page(0);

    harness.fling(149.0, 0.0);
    let events = harness.take();
    assert!(!events.iter().any(|e| matches!(e, Event::WillScrollTo(_))));
    assert!(events.contains(&Event::IndicatorRatio(0.001)));
    assert!(events.contains(&Event::Animate {
        ticket: 1,
        offset: -21.0,
        duration: Duration::from_millis(250),
        easing: Easing::EaseOut,
    }));

    harness.complete();
    assert_eq!(
        harness.take(),
        vec![
            Event::Play,
            Event::ShowCover(first.id(), false),
            Event::IndicatorRatio(0.0),
        ]
    );
    assert_eq!(harness.surface.focus_index(), Some(0));
}

#[test]
fn backward_snap_back_nudges_the_other_way() {
    let mut harness = Harness::new(videos(3));
    harness.swipe(200.0, 0.0);
    harness.take();

    harness.fling(-40.0, 0.0);
    assert!(harness.take().contains(&Event::IndicatorRatio(-0.001)));
}

#[test]
fn fast_short_swipe_flips_one_page() {
    let mut harness = Harness::new(videos(3));
    harness.swipe(50.0, 400.0);
    assert_eq!(harness.surface.focus_index(), Some(1));

    harness.swipe(-50.0, -400.0);
    assert_eq!(harness.surface.focus_index(), Some(0));
}

#[test]
fn fast_swipe_can_be_disabled() {
    let config = PagingConfig {
        fast_swipe: false,
        ..PagingConfig::default()
    };
    let mut harness = Harness::with_config(videos(3), config);
    harness.swipe(50.0, 4000.0);
    assert_eq!(harness.surface.focus_index(), Some(0));
}

#[test]
fn drag_duration_stands_in_for_missing_velocity() {
    let mut harness = Harness::new(videos(3));
    harness.begin();
    harness.move_by(50.0);
    let release = harness.clock + Duration::from_millis(100);
    harness.surface.drag_end(DragRelease::at(release));
    assert_eq!(harness.surface.focus_index(), Some(1));
}

#[test]
fn edges_rubber_band_back() {
    let mut harness = Harness::new(videos(2));
    harness.swipe(-400.0, -2000.0);
    assert_eq!(harness.surface.focus_index(), Some(0));

    harness.swipe(400.0, 0.0);
    harness.swipe(400.0, 2000.0);
    assert_eq!(harness.surface.focus_index(), Some(1));
    assert_eq!(harness.content_offset(), harness.offset(1));
}

#[test]
fn long_drag_skips_several_pages() {
    let mut harness = Harness::new(videos(6));
    harness.swipe(960.0, 0.0);
    assert_eq!(harness.surface.focus_index(), Some(3));
    assert_eq!(harness.content_offset(), 942.0);
}

#[test]
fn deceleration_defers_the_snap_decision() {
    let mut harness = Harness::new(videos(3));
    harness.begin();
    harness.move_by(100.0);
    harness
        .surface
        .drag_end(DragRelease::at(harness.clock).with_velocity(800.0).decelerating());

    assert_eq!(harness.surface.phase(), SurfacePhase::Idle);
    assert!(harness.surface.is_decelerating());
    assert_eq!(harness.surface.focus_index(), Some(0));
    harness.take();

    // Inertia keeps reporting scroll positions.
    harness.move_by(120.0);
    assert_eq!(harness.take().len(), 2);

    harness.surface.deceleration_end();
    assert!(!harness.surface.is_decelerating());
    assert_eq!(harness.surface.phase(), SurfacePhase::Settling);
    assert_eq!(harness.surface.focus_index(), Some(1));
}

#[test]
fn idle_scroll_updates_are_ignored() {
    let mut harness = Harness::new(videos(3));
    harness.surface.scroll_moved(80.0);
    assert!(harness.take().is_empty());
}

#[test]
fn interrupted_transition_still_reports_arrival() {
    let mut harness = Harness::new(videos(3));
    harness.fling(200.0, 0.0);
    assert_eq!(harness.surface.focus_index(), Some(1));

    harness.begin();
    harness.surface.animation_complete(AnimationTicket(1));
    assert!(!harness.take().contains(&Event::DidScrollTo(1)));

    harness.move_by(0.0);
    harness
        .surface
        .drag_end(DragRelease::at(harness.clock).with_velocity(0.0));
    harness.complete();

    let observed: Vec<_> = harness
        .take()
        .into_iter()
        .filter(|e| matches!(e, Event::WillScrollTo(_) | Event::DidScrollTo(_)))
        .collect();
    assert_eq!(observed, vec![Event::DidScrollTo(1)]);
}

#[test]
fn drag_during_settle_pauses_playback() {
    let mut harness = Harness::new(videos(3));
    harness.swipe(200.0, 0.0);
    let second = harness.page(1);
    assert!(harness.surface.playback().is_playing(second.id()));

    harness.begin();
    assert!(!harness.surface.playback().is_playing(second.id()));
    assert_eq!(harness.surface.playback().playing_count(), 0);
}

#[test]
fn animated_jump_settles_on_completion() {
    let mut harness = Harness::new(videos(4));
    harness.surface.jump_to(2, true).expect("in range");

    assert_eq!(harness.surface.phase(), SurfacePhase::ProgrammaticJump);
    assert_eq!(
        harness.observed(),
        vec![Event::WillScrollTo(2)]
    );

    harness.complete();
    assert_eq!(harness.observed(), vec![Event::DidScrollTo(2)]);
    assert_eq!(harness.content_offset(), 621.0);
    assert!(harness.surface.playback().is_playing(harness.page(2).id()));
}

#[test]
fn immediate_jump_settles_synchronously() {
    let mut harness = Harness::new(videos(4));
    harness.surface.jump_to(3, false).expect("in range");

    let events = harness.take();
    assert_eq!(events[0], Event::IndicatorJump(3));
    assert_eq!(events[1], Event::WillScrollTo(3));
    assert_eq!(events[2], Event::SetOffset(942.0));
    assert_eq!(events.last(), Some(&Event::DidScrollTo(3)));
    assert_eq!(harness.surface.phase(), SurfacePhase::Idle);
}

#[test]
fn jump_to_focused_page_is_a_no_op() {
    let mut harness = Harness::new(videos(3));
    harness.surface.jump_to(0, true).expect("focused");
    assert!(harness.take().is_empty());
    assert_eq!(harness.surface.phase(), SurfacePhase::Idle);
    assert_eq!(harness.surface.scroll().last_ticket(), None);
}

#[test]
fn out_of_range_jump_is_rejected() {
    let mut harness = Harness::new(videos(3));
    let err = harness.surface.jump_to(3, true).expect_err("past the end");
    assert_eq!(err, PagerError::OutOfRange { index: 3, count: 3 });
    assert_eq!(harness.surface.focus_index(), Some(0));
    assert!(harness.take().is_empty());
}

#[test]
fn jump_on_empty_deck_is_rejected() {
    let mut harness = Harness::new(Vec::new());
    assert_eq!(harness.surface.jump_to(0, false), Err(PagerError::EmptyDeck));
}

#[test]
fn gestures_on_empty_deck_do_nothing() {
    let mut harness = Harness::new(Vec::new());
    harness.begin();
    harness.surface.scroll_mut().drag_to(120.0);
    harness.surface.scroll_moved(120.0);
    harness
        .surface
        .drag_end(DragRelease::at(harness.clock).with_velocity(900.0));

    assert_eq!(harness.surface.focus_index(), None);
    assert_eq!(harness.surface.phase(), SurfacePhase::Idle);
    assert!(harness.take().is_empty());
}

#[test]
fn indicator_steps_stop_at_the_ends() {
    let mut harness = Harness::new(videos(2));
    assert_eq!(harness.surface.request_step(PageStep::Previous), Ok(false));

    assert_eq!(harness.surface.request_step(PageStep::Next), Ok(true));
    harness.complete();
    assert_eq!(harness.surface.focus_index(), Some(1));
    assert_eq!(harness.surface.request_step(PageStep::Next), Ok(false));
}

#[test]
fn selection_marks_page_and_notifies() {
    let mut harness = Harness::new(videos(3));
    harness.surface.select(2).expect("in range");

    assert!(harness.surface.deck().page(2).expect("page").is_selected());
    assert_eq!(harness.observed(), vec![Event::PageSelected(2)]);
    assert!(harness.surface.select(9).is_err());
}

#[test]
fn non_looping_video_rests_on_cover_at_end() {
    let mut harness = Harness::new(videos(2));
    let first = harness.page(0);

    harness.surface.media_ended(first.id());
    assert_eq!(
        harness.take(),
        vec![
            Event::Seek(Duration::ZERO),
            Event::Pause,
            Event::ShowCover(first.id(), true),
        ]
    );
}

#[test]
fn configured_loop_default_restarts_video() {
    let config = PagingConfig {
        loop_by_default: true,
        ..PagingConfig::default()
    };
    let mut harness = Harness::with_config(videos(2), config);
    let first = harness.page(0);

    harness.surface.media_ended(first.id());
    assert_eq!(harness.take(), vec![Event::Seek(Duration::ZERO), Event::Play]);
}

#[test]
fn image_pages_leave_the_player_alone() {
    let pages = vec![
        Page::new("still", MediaRef::image("still.png")),
        Page::new("clip", MediaRef::video("clip.mp4")),
    ];
    let mut harness = Harness::new(pages);
    assert_eq!(harness.surface.playback().player_holder(), None);

    harness.swipe(200.0, 0.0);
    assert!(harness.surface.playback().is_playing(harness.page(1).id()));

    harness.swipe(-200.0, 0.0);
    let players = harness.log.count(Event::is_player_command);
    assert_eq!(harness.surface.playback().playing_count(), 0);
    assert!(players > 0);
}

#[test]
fn failing_media_degrades_and_paging_continues() {
    let pages = videos(3);
    let broken = pages[1].clone();
    let mut harness = Harness::build(pages, PagingConfig::default(), |backend| {
        backend.failing_on(source(&broken))
    });

    harness.swipe(200.0, 0.0);
    let state = harness
        .surface
        .playback()
        .state(broken.id())
        .expect("tracked");
    assert!(state.failed);
    assert!(harness.take().contains(&Event::ShowCover(broken.id(), true)));

    harness.swipe(200.0, 0.0);
    assert_eq!(harness.surface.focus_index(), Some(2));
    assert!(harness.surface.playback().is_playing(harness.page(2).id()));
}

#[test]
fn viewport_resize_repins_focus() {
    let mut harness = Harness::new(videos(3));
    harness.swipe(200.0, 0.0);
    harness.take();

    harness.surface.set_viewport_width(484.0);
    assert_eq!(harness.take(), vec![Event::SetOffset(400.0)]);
}
