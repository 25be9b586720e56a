use std::time::{Duration, Instant};

use cropframe_core::debounce::Debounce;

const DELAY: Duration = Duration::from_millis(300);

#[test]
fn test_idle_debounce_never_fires() {
    let mut debounce = Debounce::new(DELAY);
    let t0 = Instant::now();
    assert_eq!(debounce.deadline(), None);
    assert!(!debounce.fire(t0 + Duration::from_secs(10)));
    assert_eq!(debounce.remaining(t0), None);
}

#[test]
fn test_fires_once_after_quiet_period() {
    let mut debounce = Debounce::new(DELAY);
    let t0 = Instant::now();
    debounce.arm(t0);
    assert_eq!(debounce.remaining(t0), Some(DELAY));
    assert!(!debounce.fire(t0 + Duration::from_millis(299)));
    assert!(debounce.fire(t0 + DELAY));
    assert!(!debounce.fire(t0 + DELAY * 2));
}

#[test]
fn test_rearm_replaces_pending_deadline() {
    let mut debounce = Debounce::new(DELAY);
    let t0 = Instant::now();
    debounce.arm(t0);
    debounce.arm(t0 + Duration::from_millis(250));

    assert!(!debounce.fire(t0 + DELAY));
    assert_eq!(debounce.deadline(), Some(t0 + Duration::from_millis(550)));
    assert!(debounce.fire(t0 + Duration::from_millis(550)));
}

#[test]
fn test_cancel_drops_deadline() {
    let mut debounce = Debounce::new(DELAY);
    let t0 = Instant::now();
    debounce.arm(t0);
    debounce.cancel();
    assert!(!debounce.fire(t0 + DELAY));
}

#[test]
fn test_remaining_saturates_at_zero() {
    let mut debounce = Debounce::new(DELAY);
    let t0 = Instant::now();
    debounce.arm(t0);
    assert_eq!(debounce.remaining(t0 + DELAY * 3), Some(Duration::ZERO));
}
