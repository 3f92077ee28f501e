//! # Transition Integration Tests
//!
//! Cancellation, render-driver lifetime and staggering, driven the way the
//! frame driver does it: fixed steps of simulated time.

use std::cell::RefCell;
use std::rc::Rc;

use periodic_layout::{LayoutName, LayoutSet};
use periodic_shared::{Transform, Vec3};
use periodic_tween::{FixedSequence, RenderFrame, RngSource, TransitionManager};

const FRAME_MS: f64 = 1000.0 / 60.0;

/// Records the time of every render call.
fn recording_manager(count: usize, random: FixedSequence) -> (TransitionManager, Rc<RefCell<Vec<f64>>>) {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink_log = Rc::clone(&log);
    let sink = move |frame: &RenderFrame<'_>| sink_log.borrow_mut().push(frame.now_ms());

    let mut manager = TransitionManager::new(Box::new(sink), Box::new(random));
    for i in 0..count {
        manager.spawn(Transform::at(Vec3::new(i as f32 * 10.0, -300.0, 900.0)));
    }
    (manager, log)
}

/// Test: a second transition cancels the first; the end state is the
/// second layout, never a blend.
#[test]
fn test_second_transition_cancels_first() {
    let layouts = LayoutSet::generate(60);
    let mut manager = TransitionManager::new(Box::new(periodic_tween::NullSink), Box::new(RngSource::seeded(11)));
    for _ in 0..60 {
        manager.spawn(Transform::at(Vec3::new(2000.0, 2000.0, 2000.0)));
    }

    manager.transform_to(layouts.targets(LayoutName::Sphere), 1000.0).unwrap();

    let mut now = 0.0;
    while now < 700.0 {
        now += FRAME_MS;
        manager.tick(now);
    }

    let plan = manager.transform_to(layouts.targets(LayoutName::Grid), 1000.0).unwrap();
    assert_eq!(plan.cancelled, 60 * 2 + 1);
    assert_eq!(plan.scheduled, 60);

    while !manager.is_idle() {
        now += FRAME_MS;
        manager.tick(now);
    }

    assert!(now >= plan.settles_at_ms);
    assert_eq!(manager.transforms(), &layouts.targets(LayoutName::Grid)[..]);
}

/// Test: the sink fires on every tick up to 2D and then stops.
#[test]
fn test_render_driver_spans_twice_base_duration() {
    let (mut manager, log) = recording_manager(8, FixedSequence::new(vec![0.1, 0.7, 0.4, 0.95]));
    let targets = LayoutSet::generate(8).targets(LayoutName::Table).clone();
    manager.transform_to(&targets, 500.0).unwrap();

    let mut ticks = 0;
    let mut now = 0.0;
    for _ in 0..120 {
        now += 10.0;
        manager.tick(now);
        ticks += 1;
    }

    let renders = log.borrow();
    // Renders at 10, 20, ..., 1000.
    assert_eq!(renders.len(), 100);
    assert_eq!(*renders.last().unwrap(), 1000.0);
    assert!(ticks > renders.len());
    assert!(manager.is_idle());
    assert_eq!(manager.transforms(), &targets[..]);
}

/// Test: with a known jitter sequence every task finishes exactly on time.
#[test]
fn test_staggered_completion_times() {
    // Entity 0: position 1.0x, orientation 1.5x. Entity 1: 1.25x, 1.75x.
    let (mut manager, _log) = recording_manager(2, FixedSequence::new(vec![0.0, 0.5, 0.25, 0.75]));
    let targets = [
        Transform::looking_at(Vec3::new(100.0, 0.0, 0.0), Vec3::new(200.0, 0.0, 0.0)),
        Transform::looking_at(Vec3::new(0.0, 100.0, 100.0), Vec3::new(0.0, 200.0, 200.0)),
    ];
    manager.transform_to(&targets, 100.0).unwrap();

    manager.tick(100.0);
    assert_eq!(manager.transforms()[0].position, targets[0].position);
    assert_ne!(manager.transforms()[0].orientation, targets[0].orientation);
    assert_ne!(manager.transforms()[1].position, targets[1].position);

    manager.tick(125.0);
    assert_eq!(manager.transforms()[1].position, targets[1].position);
    assert_eq!(manager.active().entity_tasks(), 2);

    manager.tick(150.0);
    assert_eq!(manager.transforms()[0], targets[0]);
    assert_eq!(manager.active().entity_tasks(), 1);

    manager.tick(175.0);
    assert_eq!(manager.transforms(), &targets[..]);
    assert_eq!(manager.active().entity_tasks(), 0);
    assert!(manager.active().is_rendering());

    manager.tick(200.0);
    assert!(manager.is_idle());
}

/// Test: a cancelled transition resumes from the partially moved value.
#[test]
fn test_resumes_from_partial_position() {
    let (mut manager, _log) = recording_manager(1, FixedSequence::constant(0.0));
    let start = manager.transforms()[0].position;
    manager.transform_to(&[Transform::at(Vec3::new(1000.0, 0.0, 0.0))], 100.0).unwrap();
    manager.tick(50.0);
    let midway = manager.transforms()[0].position;
    assert_ne!(midway, start);

    manager.transform_to(&[Transform::at(start)], 100.0).unwrap();
    manager.tick(50.0);
    // Progress 0 of the new transition: still at the midway value.
    assert_eq!(manager.transforms()[0].position, midway);
}

/// Test: requests submitted through a cloned sender apply after the tick.
#[test]
fn test_external_request_applies_on_next_tick() {
    let (mut manager, _log) = recording_manager(20, FixedSequence::constant(0.5));
    let layouts = LayoutSet::generate(20);
    let requests = manager.requests();

    assert!(requests.submit(periodic_tween::TransitionRequest::new(
        layouts.targets(LayoutName::Helix).clone(),
        40.0,
    )));
    assert!(manager.is_idle());

    let report = manager.tick(0.0);
    assert!(report.applied_request);
    assert!(!report.rendered);

    manager.tick(60.0);
    assert_eq!(manager.transforms(), &layouts.targets(LayoutName::Helix)[..20]);
}
