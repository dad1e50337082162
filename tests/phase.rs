use reactor_story::phase::{
    self, orbit_strength, range_phase, PhaseWindow, ScrollOffset, ScrollTracker, CORE_FADE, DISPERSION, IMPLOSION,
    RAYS,
};

fn approx(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}

fn offsets() -> impl Iterator<Item = f32> {
    (-20..=120).map(|i| i as f32 / 100.0)
}

#[test]
fn offset_is_clamped() {
    assert_eq!(ScrollOffset::new(-0.5).get(), 0.0);
    assert_eq!(ScrollOffset::new(1.5).get(), 1.0);
    assert_eq!(ScrollOffset::new(f32::NAN).get(), 0.0);
    assert_eq!(ScrollOffset::new(f32::INFINITY).get(), 0.0);
    assert_eq!(ScrollOffset::new(f32::NEG_INFINITY).get(), 0.0);
    assert_eq!(ScrollOffset::new(0.42).get(), 0.42);
}

#[test]
fn authored_windows_stay_in_unit_range() {
    for window in [IMPLOSION, DISPERSION, CORE_FADE, RAYS, phase::FULL] {
        for x in offsets() {
            let offset = ScrollOffset::new(x);
            let r = window.range(offset);
            assert!((0.0..=1.0).contains(&r), "{window:?} at {x}: {r}");
            let e = window.eased(offset);
            assert!((0.0..=1.0).contains(&e), "{window:?} eased at {x}: {e}");
            let c = window.curve(offset);
            assert!((-1e-6..=1.0).contains(&c), "{window:?} curve at {x}: {c}");
        }
    }
}

#[test]
fn range_matches_linear_ramp() {
    assert_eq!(range_phase(0.1, 0.1, 0.3), 0.0);
    assert!(approx(range_phase(0.25, 0.1, 0.3), 0.5, 1e-6));
    assert_eq!(range_phase(0.4, 0.1, 0.3), 1.0);
    assert_eq!(range_phase(0.0, 0.1, 0.3), 0.0);
    assert_eq!(range_phase(1.0, 0.1, 0.3), 1.0);
}

#[test]
fn range_phase_maps_offsets_outside_the_page() {
    assert_eq!(range_phase(1.5, 1.2, 0.2), 1.0);
    assert_eq!(range_phase(-0.5, -0.4, 0.2), 0.0);
    assert!(approx(range_phase(1.3, 1.2, 0.2), 0.5, 1e-5));
    assert_eq!(range_phase(f32::NAN, 0.1, 0.3), 0.0);
    assert_eq!(range_phase(f32::INFINITY, 0.1, 0.3), 1.0);
}

#[test]
fn degenerate_windows_step_without_nan() {
    let windows = [
        PhaseWindow::new(0.5, 0.0),
        PhaseWindow::new(0.5, -0.2),
        PhaseWindow::new(0.5, f32::NAN),
        PhaseWindow::new(f32::INFINITY, 0.3),
    ];
    for window in windows {
        for x in offsets() {
            let offset = ScrollOffset::new(x);
            let r = window.range(offset);
            assert!(!r.is_nan(), "{window:?} at {x}");
            assert!(r == 0.0 || r == 1.0, "{window:?} at {x}: {r}");
            assert!(!window.curve(offset).is_nan());
        }
    }

    let step = PhaseWindow::new(0.5, 0.0);
    assert_eq!(step.range(ScrollOffset::new(0.49)), 0.0);
    assert_eq!(step.range(ScrollOffset::new(0.5)), 1.0);
}

#[test]
fn margin_widens_visibility() {
    let window = PhaseWindow::new(0.4, 0.2).with_margin(0.1);
    assert!(window.visible(ScrollOffset::new(0.31)));
    assert!(window.visible(ScrollOffset::new(0.69)));
    assert!(!window.visible(ScrollOffset::new(0.28)));
    assert!(!window.visible(ScrollOffset::new(0.72)));
    assert!(!PhaseWindow::new(0.4, 0.2).visible(ScrollOffset::new(0.35)));
    assert!(approx(window.range(ScrollOffset::new(0.5)), 0.5, 1e-6));
}

#[test]
fn curve_peaks_mid_window() {
    let window = PhaseWindow::new(0.2, 0.4);
    assert!(approx(window.curve(ScrollOffset::new(0.4)), 1.0, 1e-6));
    assert!(approx(window.curve(ScrollOffset::new(0.2)), 0.0, 1e-6));
    assert!(approx(window.curve(ScrollOffset::new(0.6)), 0.0, 1e-6));
}

#[test]
fn implosion_ends_where_dispersion_starts() {
    // between 0.4 and 0.6 the rocks sit in the core
    for x in [0.4, 0.45, 0.5, 0.55, 0.6] {
        let offset = ScrollOffset::new(x);
        assert_eq!(IMPLOSION.range(offset), 1.0, "implosion at {x}");
        assert_eq!(DISPERSION.range(offset), 0.0, "dispersion at {x}");
    }
}

#[test]
fn orbit_fades_out_by_a_fifth_of_the_page() {
    assert_eq!(orbit_strength(ScrollOffset::START), 1.0);
    assert!(orbit_strength(ScrollOffset::new(0.1)) > 0.0);
    assert_eq!(orbit_strength(ScrollOffset::new(0.2)), 0.0);
    assert_eq!(orbit_strength(ScrollOffset::END), 0.0);
}

#[test]
fn tracker_maps_scroll_metrics() {
    let mut tracker = ScrollTracker::new(5.0, 0.3);
    assert_eq!(tracker.content_height(800.0), 4000.0);

    tracker.set_scroll_metrics(1600.0, 4000.0, 800.0);
    assert!(approx(tracker.target().get(), 0.5, 1e-6));

    // nothing to scroll
    tracker.set_scroll_metrics(100.0, 800.0, 800.0);
    assert_eq!(tracker.target().get(), 0.0);

    // overscroll bounce
    tracker.set_scroll_metrics(5000.0, 4000.0, 800.0);
    assert_eq!(tracker.target().get(), 1.0);
}

#[test]
fn tracker_converges_monotonically() {
    let mut tracker = ScrollTracker::new(5.0, 0.3);
    tracker.set_target(ScrollOffset::new(0.8));

    let mut last = tracker.offset().get();
    for _ in 0..240 {
        let now = tracker.update(1.0 / 60.0).get();
        assert!((0.0..=1.0).contains(&now));
        assert!(now >= last && now <= 0.8 + 1e-6, "overshoot: {now}");
        last = now;
    }
    assert!(approx(last, 0.8, 1e-3), "did not settle: {last}");

    tracker.set_target(ScrollOffset::START);
    for _ in 0..240 {
        tracker.update(1.0 / 60.0);
    }
    assert!(approx(tracker.offset().get(), 0.0, 1e-3));
}

#[test]
fn tracker_without_damping_snaps() {
    let mut tracker = ScrollTracker::new(5.0, 0.0);
    tracker.set_target(ScrollOffset::new(0.6));
    assert_eq!(tracker.update(0.016).get(), 0.6);
}
