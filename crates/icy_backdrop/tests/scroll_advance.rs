//! Tests for the diagonal advance and the wraparound at the end of the grid.

use std::sync::Arc;
use std::time::Instant;

use icy_backdrop::{advance, ActivationDates, Divider, FrameClock, ScrollOffset, TickOutcome, TileGeometry, TiledScroller};

fn assert_approx(a: f64, b: f64, eps: f64) {
    assert!((a - b).abs() <= eps, "{a} != {b} (eps={eps})");
}

#[test]
fn one_tick_adds_content_over_divider() {
    for divider in [1.0, 7.5, 100.0, 1000.0, 12345.0] {
        let geometry = TileGeometry::new(320.0, 240.0);
        let mut offset = ScrollOffset::new(3.0, 4.0);
        let outcome = advance(&mut offset, &geometry, Divider::new(divider).unwrap());

        assert_approx(offset.x, 3.0 + 640.0 / divider, 1e-9);
        assert_approx(offset.y, 4.0 + 480.0 / divider, 1e-9);
        assert_eq!(outcome, TickOutcome::Advanced(offset));
    }
}

#[test]
fn threshold_is_inclusive() {
    let geometry = TileGeometry::new(300.0, 600.0);
    let mut offset = ScrollOffset::new(300.0, 600.0);
    assert!(matches!(advance(&mut offset, &geometry, Divider::default()), TickOutcome::Advanced(_)));
    assert_approx(offset.x, 300.6, 1e-9);
    assert_approx(offset.y, 601.2, 1e-9);
}

#[test]
fn exceeding_threshold_resets_to_exact_zero() {
    let geometry = TileGeometry::new(300.0, 600.0);
    let mut offset = ScrollOffset::new(300.6, 601.2);
    assert_eq!(advance(&mut offset, &geometry, Divider::default()), TickOutcome::Wrapped);
    assert_eq!(offset, ScrollOffset::ZERO);

    // the following tick starts over from the origin
    assert_eq!(
        advance(&mut offset, &geometry, Divider::default()),
        TickOutcome::Advanced(ScrollOffset::new(0.6, 1.2))
    );
}

#[test]
fn full_cycle_on_a_300_by_600_backdrop() {
    let scroller = TiledScroller::new(None, Divider::default(), ActivationDates::default());
    scroller.set_viewport_size(300.0, 600.0);

    for _ in 0..500 {
        assert!(matches!(scroller.tick(), TickOutcome::Advanced(_)));
    }
    let offset = scroller.offset();
    assert_approx(offset.x, 300.0, 1e-6);
    assert_approx(offset.y, 600.0, 1e-6);

    // At (300, 600) accumulated rounding decides whether one more step is taken
    // before the threshold is exceeded; the reset follows within two ticks.
    let mut ticks_until_wrap = 0;
    loop {
        ticks_until_wrap += 1;
        if scroller.tick() == TickOutcome::Wrapped {
            break;
        }
        assert!(ticks_until_wrap < 2, "no wrap after {ticks_until_wrap} ticks");
    }
    assert_eq!(scroller.offset(), ScrollOffset::ZERO);
    assert_eq!(scroller.wraps(), 1);
}

#[test]
fn offset_stays_within_content() {
    let geometry = TileGeometry::new(123.0, 45.0);
    let divider = Divider::new(37.0).unwrap();
    let mut offset = ScrollOffset::ZERO;
    for _ in 0..10_000 {
        advance(&mut offset, &geometry, divider);
        assert!(offset.x >= 0.0 && offset.x <= geometry.content_width());
        assert!(offset.y >= 0.0 && offset.y <= geometry.content_height());
    }
}

#[test]
fn scheduler_drives_the_scroller() {
    let clock = Arc::new(FrameClock::new());
    let mut scroller = TiledScroller::new(None, Divider::default(), ActivationDates::default());
    scroller.set_viewport_size(300.0, 600.0);

    assert!(scroller.start(clock.clone()));
    for _ in 0..10 {
        clock.fire(Instant::now());
    }
    assert_approx(scroller.offset().x, 6.0, 1e-9);
    assert_approx(scroller.offset().y, 12.0, 1e-9);

    scroller.stop();
    assert!(!clock.is_active());
    clock.fire(Instant::now());
    assert_approx(scroller.offset().x, 6.0, 1e-9);
}

#[test]
fn starting_twice_keeps_a_single_subscription() {
    let clock = Arc::new(FrameClock::new());
    let mut scroller = TiledScroller::new(None, Divider::default(), ActivationDates::default());
    scroller.set_viewport_size(300.0, 600.0);

    assert!(scroller.start(clock.clone()));
    assert!(scroller.start(clock.clone()));
    assert_eq!(clock.subscriber_count(), 1);

    clock.fire(Instant::now());
    assert_eq!(scroller.ticks(), 1);
    assert_approx(scroller.offset().x, 0.6, 1e-9);
}

#[test]
fn doubled_tick_rate_keeps_offset_arithmetic() {
    let clock = Arc::new(FrameClock::new());
    let mut scroller = TiledScroller::new(None, Divider::default(), ActivationDates::default());
    scroller.set_viewport_size(300.0, 600.0);
    assert!(scroller.start(clock.clone()));

    for _ in 0..100 {
        clock.fire(Instant::now());
        clock.fire(Instant::now());
    }
    assert_eq!(scroller.ticks(), 200);
    assert_approx(scroller.offset().x, 120.0, 1e-6);
    assert_approx(scroller.offset().y, 240.0, 1e-6);
}

#[test]
fn dropping_the_scroller_unsubscribes() {
    let clock = Arc::new(FrameClock::new());
    {
        let mut scroller = TiledScroller::new(None, Divider::default(), ActivationDates::default());
        scroller.start(clock.clone());
        assert!(clock.is_active());
    }
    assert!(!clock.is_active());
}
