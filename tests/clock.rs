use reactor_story::clock::FrameClock;

#[test]
fn first_tick_starts_at_zero() {
    let mut clock = FrameClock::new();
    assert_eq!(clock.tick(12_345.0), (0.0, 0.0));
}

#[test]
fn elapsed_and_delta_follow_timestamps() {
    let mut clock = FrameClock::new();
    clock.tick(1_000.0);
    let (elapsed, delta) = clock.tick(1_016.0);
    assert!((elapsed - 0.016).abs() < 1e-6);
    assert!((delta - 0.016).abs() < 1e-6);

    clock.tick(3_000.0);
    assert!((clock.elapsed() - 2.0).abs() < 1e-6);
}

#[test]
fn long_pauses_are_capped() {
    let mut clock = FrameClock::new();
    clock.tick(0.0);
    clock.tick(16.0);
    // tab was in the background
    let (elapsed, delta) = clock.tick(60_016.0);
    assert_eq!(delta, FrameClock::MAX_DELTA);
    assert!((elapsed - 60.016).abs() < 1e-3);
}

#[test]
fn time_never_runs_backwards() {
    let mut clock = FrameClock::new();
    clock.tick(500.0);
    clock.tick(600.0);
    let (_, delta) = clock.tick(550.0);
    assert_eq!(delta, 0.0);
    assert!(clock.elapsed() >= 0.0);
}
