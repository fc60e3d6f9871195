use super::*;
use std::{cell::RefCell, rc::Rc};

fn recorder() -> (Rc<RefCell<Vec<PixelSize>>>, impl FnMut(PixelSize)) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    (seen, move |s| sink.borrow_mut().push(s))
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[test]
fn publishes_after_debounce() {
    let (seen, publish) = recorder();
    let mut sync = ResizeSynchronizer::observe(
        ObserverSupport::Available,
        &ResizeConfig::default(),
        publish,
    );
    let t0 = Instant::now();
    assert_eq!(
        sync.on_resize(320.4, 200.6, t0),
        ResizeDecision::Scheduled { deadline: t0 + ms(150) }
    );
    assert_eq!(sync.poll(t0 + ms(149)), None);
    assert_eq!(sync.poll(t0 + ms(150)), Some(PixelSize::new(320, 201)));
    assert_eq!(*seen.borrow(), vec![PixelSize::new(320, 201)]);
    assert_eq!(sync.next_deadline(), None);
}

#[test]
fn jitter_reports_collapse_to_one_publish() {
    let (seen, publish) = recorder();
    let mut sync = ResizeSynchronizer::observe(
        ObserverSupport::Available,
        &ResizeConfig::default(),
        publish,
    );
    let t0 = Instant::now();
    sync.on_resize(300.0, 200.0, t0);
    assert_eq!(sync.on_resize(301.0, 199.0, t0 + ms(10)), ResizeDecision::Jitter);
    sync.poll(t0 + ms(500));
    assert_eq!(seen.borrow().len(), 1);

    // Jitter after a publish is also dropped.
    assert_eq!(sync.on_resize(299.0, 201.0, t0 + ms(600)), ResizeDecision::Jitter);
    sync.poll(t0 + ms(1000));
    assert_eq!(seen.borrow().len(), 1);
}

#[test]
fn bursts_coalesce_latest_wins() {
    let (seen, publish) = recorder();
    let mut sync = ResizeSynchronizer::observe(
        ObserverSupport::Available,
        &ResizeConfig::default(),
        publish,
    );
    let t0 = Instant::now();
    for (i, w) in [400.0, 380.0, 360.0, 340.0].into_iter().enumerate() {
        sync.on_resize(w, 100.0, t0 + ms(50 * i as u64));
        assert_eq!(sync.poll(t0 + ms(50 * i as u64 + 10)), None);
    }
    assert_eq!(sync.next_deadline(), Some(t0 + ms(150 + 150)));
    sync.poll(t0 + ms(300));
    assert_eq!(*seen.borrow(), vec![PixelSize::new(340, 100)]);
}

#[test]
fn returning_to_published_size_does_not_republish() {
    let (seen, publish) = recorder();
    let mut sync = ResizeSynchronizer::observe(
        ObserverSupport::Available,
        &ResizeConfig::default(),
        publish,
    );
    let t0 = Instant::now();
    sync.on_resize(300.0, 100.0, t0);
    sync.poll(t0 + ms(150));
    sync.on_resize(500.0, 100.0, t0 + ms(200));
    sync.on_resize(300.0, 100.0, t0 + ms(210));
    sync.poll(t0 + ms(400));
    assert_eq!(*seen.borrow(), vec![PixelSize::new(300, 100)]);
}

#[test]
fn teardown_cancels_pending_and_ignores_late_reports() {
    let (seen, publish) = recorder();
    let mut sync = ResizeSynchronizer::observe(
        ObserverSupport::Available,
        &ResizeConfig::default(),
        publish,
    );
    let t0 = Instant::now();
    sync.on_resize(300.0, 100.0, t0);
    sync.teardown();
    assert_eq!(sync.next_deadline(), None);
    assert_eq!(sync.on_resize(640.0, 480.0, t0 + ms(5)), ResizeDecision::Inactive);
    assert_eq!(sync.poll(t0 + ms(1000)), None);
    assert!(seen.borrow().is_empty());
    sync.teardown();
    assert!(!sync.is_observing());
}

#[test]
fn unavailable_observer_is_inert() {
    let (seen, publish) = recorder();
    let mut sync = ResizeSynchronizer::observe(
        ObserverSupport::Unavailable,
        &ResizeConfig::default(),
        publish,
    );
    let t0 = Instant::now();
    assert!(!sync.is_observing());
    assert_eq!(sync.on_resize(100.0, 100.0, t0), ResizeDecision::Inactive);
    assert_eq!(sync.poll(t0 + ms(1000)), None);
    sync.teardown();
    assert!(seen.borrow().is_empty());
}

#[test]
fn custom_debounce_and_tolerance() {
    let (seen, publish) = recorder();
    let cfg = ResizeConfig {
        debounce_ms: 0,
        jitter_px: 0,
    };
    let mut sync = ResizeSynchronizer::observe(ObserverSupport::Available, &cfg, publish);
    let t0 = Instant::now();
    sync.on_resize(100.0, 100.0, t0);
    sync.poll(t0);
    sync.on_resize(101.0, 100.0, t0);
    sync.poll(t0);
    assert_eq!(seen.borrow().len(), 2);
}
