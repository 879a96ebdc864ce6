use super::*;

#[test]
fn leading_edge_then_interval() {
    let t0 = Instant::now();
    let mut th = Throttle::new(Duration::from_millis(16));
    assert!(th.ready(t0));
    assert!(!th.ready(t0 + Duration::from_millis(5)));
    assert!(!th.ready(t0 + Duration::from_millis(15)));
    assert!(th.ready(t0 + Duration::from_millis(16)));
    assert!(!th.ready(t0 + Duration::from_millis(20)));
}

#[test]
fn reset_lets_next_tick_through() {
    let t0 = Instant::now();
    let mut th = Throttle::new(Duration::from_secs(1));
    assert!(th.ready(t0));
    th.reset();
    assert!(th.ready(t0));
}

#[test]
fn zero_interval_never_blocks() {
    let t0 = Instant::now();
    let mut th = Throttle::new(Duration::ZERO);
    assert!(th.ready(t0));
    assert!(th.ready(t0));
}
