//! Tests for the animation scheduler and host loops.

use std::cell::RefCell;
use std::rc::Rc;

use skydrone_core::config::SimConfig;
use skydrone_core::enums::SchedulerPhase;
use skydrone_core::error::SimError;
use skydrone_core::events::VehicleEventKind;
use skydrone_core::types::PlanarCoord;
use skydrone_sim::{Scene, Vehicle};

use crate::frame_clock::{FrameClock, FrameQueue};
use crate::host::{self, HostConfig};
use crate::render::LogRenderer;
use crate::scheduler::{AnimationScheduler, FrameOutcome, Integrate};

type Log = Rc<RefCell<Vec<String>>>;

/// Records every integrate call into a shared log.
struct SpySubject {
    log: Log,
    deltas: Vec<f64>,
    fail_next: bool,
}

impl Integrate for SpySubject {
    fn integrate(&mut self, delta_secs: f64) -> Result<(), SimError> {
        self.log.borrow_mut().push("integrate".into());
        self.deltas.push(delta_secs);
        if std::mem::take(&mut self.fail_next) {
            return Err(SimError::InvalidArgument {
                name: "delta_secs",
                value: delta_secs,
            });
        }
        Ok(())
    }
}

fn spy_scheduler() -> (AnimationScheduler<FrameQueue, SpySubject>, Log) {
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let subject = SpySubject {
        log: log.clone(),
        deltas: Vec::new(),
        fail_next: false,
    };
    let render_log = log.clone();
    let mut scheduler = AnimationScheduler::new(FrameQueue::new(), subject, move || {
        render_log.borrow_mut().push("render".into());
    });
    for name in ["rotors", "camera"] {
        let hook_log = log.clone();
        scheduler.add_update_hook(move |_subject: &SpySubject, _delta| {
            hook_log.borrow_mut().push(name.into());
        });
    }
    (scheduler, log)
}

// ---- Ordering ----

#[test]
fn test_frame_order_is_integrate_updates_render() {
    let (mut scheduler, log) = spy_scheduler();
    scheduler.start();
    host::run_synthetic(&mut scheduler, [16.0, 32.0, 48.0]).unwrap();

    let expected: Vec<String> = ["integrate", "rotors", "camera", "render"]
        .iter()
        .cycle()
        .take(12)
        .map(|s| s.to_string())
        .collect();
    assert_eq!(*log.borrow(), expected);
    assert_eq!(scheduler.frames_rendered(), 3);
}

#[test]
fn test_hooks_see_integrated_state() {
    let mut vehicle = Vehicle::new(PlanarCoord::default(), 0.0, 10.0, 100.0).unwrap();
    vehicle.start_moving_forward();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut scheduler = AnimationScheduler::new(FrameQueue::new(), vehicle, || {});
    let s = seen.clone();
    scheduler.add_update_hook(move |vehicle: &Vehicle, _delta| {
        s.borrow_mut().push(vehicle.location().y);
    });
    scheduler.start();
    host::run_synthetic(&mut scheduler, [1_000.0, 1_500.0]).unwrap();

    // First frame: delta 0; second: 0.5 s at 100 m/s.
    let seen = seen.borrow();
    assert_eq!(seen[0], 0.0);
    assert!((seen[1] - 50.0).abs() < 1e-9);
}

// ---- Delta time ----

#[test]
fn test_first_frame_delta_is_zero() {
    let (mut scheduler, _log) = spy_scheduler();
    scheduler.start();
    let outcomes = host::run_synthetic(&mut scheduler, [5_000.0, 5_016.0, 5_050.0]).unwrap();

    assert_eq!(outcomes[0], FrameOutcome::Rendered { delta_secs: 0.0 });
    let deltas = &scheduler.subject().deltas;
    assert_eq!(deltas[0], 0.0);
    assert!((deltas[1] - 0.016).abs() < 1e-12);
    assert!((deltas[2] - 0.034).abs() < 1e-12);
}

#[test]
fn test_backwards_clock_is_zero_delta() {
    let (mut scheduler, _log) = spy_scheduler();
    scheduler.start();
    host::run_synthetic(&mut scheduler, [100.0, 200.0, 150.0]).unwrap();
    assert_eq!(scheduler.subject().deltas, vec![0.0, 0.1, 0.0]);
}

#[test]
fn test_restart_resets_delta() {
    let (mut scheduler, _log) = spy_scheduler();
    scheduler.start();
    host::run_synthetic(&mut scheduler, [100.0, 200.0]).unwrap();
    scheduler.dispose();
    scheduler.start();
    host::run_synthetic(&mut scheduler, [10_000.0]).unwrap();
    assert_eq!(scheduler.subject().deltas.last(), Some(&0.0));
}

// ---- Lifecycle ----

#[test]
fn test_at_most_one_frame_pending() {
    let (mut scheduler, _log) = spy_scheduler();
    scheduler.start();
    scheduler.start();
    assert_eq!(scheduler.clock().pending_len(), 1);

    host::run_synthetic(&mut scheduler, [16.0, 32.0]).unwrap();
    assert_eq!(scheduler.clock().pending_len(), 1);
    assert_eq!(scheduler.state(), SchedulerPhase::Running);
}

#[test]
fn test_dispose_before_start_then_start() {
    let (mut scheduler, log) = spy_scheduler();
    scheduler.dispose();
    assert_eq!(scheduler.state(), SchedulerPhase::Idle);
    assert!(scheduler.clock().cancelled().is_empty());

    scheduler.start();
    host::run_synthetic(&mut scheduler, [16.0]).unwrap();
    assert_eq!(scheduler.frames_rendered(), 1);
    assert_eq!(log.borrow().last().map(String::as_str), Some("render"));
}

#[test]
fn test_dispose_twice_cancels_once() {
    let (mut scheduler, _log) = spy_scheduler();
    scheduler.start();
    let pending = scheduler.pending_frame().unwrap();

    scheduler.dispose();
    scheduler.dispose();

    assert_eq!(scheduler.clock().cancelled(), &[pending]);
    assert_eq!(scheduler.clock().pending_len(), 0);
    assert_eq!(scheduler.pending_frame(), None);
}

#[test]
fn test_no_work_after_dispose_even_if_frame_already_fired() {
    let (mut scheduler, log) = spy_scheduler();
    scheduler.start();
    // The host has already dequeued the callback when dispose runs.
    let in_flight = scheduler.clock_mut().next_due().unwrap();
    scheduler.dispose();

    let outcome = scheduler.on_frame(in_flight, 16.0).unwrap();

    assert_eq!(outcome, FrameOutcome::Skipped);
    assert!(log.borrow().is_empty());
    assert_eq!(scheduler.clock().pending_len(), 0);
}

#[test]
fn test_stale_handle_is_skipped() {
    let (mut scheduler, log) = spy_scheduler();
    scheduler.start();
    let bogus = scheduler.clock_mut().request_frame();
    let outcome = scheduler.on_frame(bogus, 16.0).unwrap();
    assert_eq!(outcome, FrameOutcome::Skipped);
    assert!(log.borrow().is_empty());
}

// ---- Failure ----

#[test]
fn test_failed_frame_does_not_stall_loop() {
    let (mut scheduler, log) = spy_scheduler();
    scheduler.subject_mut().fail_next = true;
    scheduler.start();

    let err = host::run_synthetic(&mut scheduler, [16.0]).unwrap_err();
    assert!(matches!(err, SimError::InvalidArgument { .. }));
    // Integrate failed: no hooks, no render, but the next frame is pending.
    assert_eq!(*log.borrow(), vec!["integrate".to_string()]);
    assert_eq!(scheduler.clock().pending_len(), 1);

    host::run_synthetic(&mut scheduler, [32.0]).unwrap();
    assert_eq!(scheduler.frames_rendered(), 1);
}

#[test]
fn test_non_finite_timestamp_is_rejected() {
    let (mut scheduler, log) = spy_scheduler();
    scheduler.start();
    let handle = scheduler.clock_mut().next_due().unwrap();
    let err = scheduler.on_frame(handle, f64::NAN).unwrap_err();
    assert!(matches!(
        err,
        SimError::InvalidArgument {
            name: "timestamp_ms",
            ..
        }
    ));
    assert!(log.borrow().is_empty());
    assert_eq!(scheduler.clock().pending_len(), 1);
}

// ---- Full session ----

#[test]
fn test_session_moves_vehicle_scene_and_camera() {
    let config = SimConfig {
        linear_speed: 20.0,
        ..Default::default()
    };
    let mut vehicle = Vehicle::from_config(&config).unwrap();
    let start = vehicle.location();
    let scene = Rc::new(RefCell::new(Scene::new(&config)));
    scene.borrow_mut().attach(&mut vehicle);
    vehicle.start_moving_forward();

    let renderer = LogRenderer::new(scene.clone(), 1_000);
    let mut scheduler = AnimationScheduler::new(FrameQueue::new(), vehicle, renderer);
    let rotor_scene = scene.clone();
    scheduler.add_update_hook(move |_v: &Vehicle, dt| rotor_scene.borrow_mut().spin_rotors(dt));
    let follow_scene = scene.clone();
    scheduler.add_update_hook(move |_v: &Vehicle, _dt| {
        let mut scene = follow_scene.borrow_mut();
        scene.sync_model();
        scene.update_chase_camera();
    });

    scheduler.start();
    // 61 frames spaced 1/60 s apart: 60 intervals = 1 s of motion.
    let timestamps = (0..61).map(|i| 1_000.0 + f64::from(i) * 1_000.0 / 60.0);
    host::run_synthetic(&mut scheduler, timestamps).unwrap();

    let vehicle = scheduler.subject();
    assert!((vehicle.location().y - start.y - 20.0).abs() < 1e-6);
    assert!((vehicle.location().x - start.x).abs() < 1e-6);

    let scene = scene.borrow();
    assert_eq!(scene.model().unwrap().position, vehicle.render_position());
    assert_eq!(scene.camera().unwrap().look_at, vehicle.render_position());
    assert!(scene.rotors().iter().all(|r| r.angle_rad != 0.0));
}

#[test]
fn test_teardown_leaves_no_listeners() {
    let config = SimConfig::default();
    let mut vehicle = Vehicle::from_config(&config).unwrap();
    let mut scene = Scene::new(&config);
    scene.attach(&mut vehicle);
    let mut scheduler = AnimationScheduler::new(FrameQueue::new(), vehicle, || {});
    scheduler.start();

    scheduler.dispose();
    scene.detach(scheduler.subject_mut());
    scheduler.subject_mut().dispose();

    for kind in [
        VehicleEventKind::LocationChanged,
        VehicleEventKind::AzimuthChanged,
        VehicleEventKind::ElevationChanged,
    ] {
        assert_eq!(scheduler.subject().listener_count(kind), 0);
    }
}

#[test]
fn test_paced_host_renders_requested_frames() {
    let (mut scheduler, log) = spy_scheduler();
    scheduler.start();
    let mut inputs = 0;
    let report = host::run_paced(
        &mut scheduler,
        &HostConfig {
            frames: 5,
            frame_rate: 1_000,
        },
        |_subject, _frame| {
            inputs += 1;
            Ok(())
        },
    )
    .unwrap();

    assert_eq!(report.frames, 5);
    assert_eq!(inputs, 5);
    assert_eq!(scheduler.subject().deltas[0], 0.0);
    assert!(scheduler.subject().deltas[1..].iter().all(|d| *d >= 0.0));
    assert_eq!(log.borrow().iter().filter(|e| *e == "render").count(), 5);
}

#[test]
fn test_paced_host_stops_when_idle() {
    let (mut scheduler, _log) = spy_scheduler();
    let report = host::run_paced(
        &mut scheduler,
        &HostConfig {
            frames: 10,
            frame_rate: 1_000,
        },
        |_subject, _frame| Ok(()),
    )
    .unwrap();
    assert_eq!(report, Default::default());
}

#[test]
fn test_paced_host_input_error_keeps_loop_alive() {
    let (mut scheduler, log) = spy_scheduler();
    scheduler.start();
    let config = HostConfig {
        frames: 3,
        frame_rate: 1_000,
    };

    let result = host::run_paced(&mut scheduler, &config, |_subject, _frame| {
        Err(SimError::InvalidArgument {
            name: "input",
            value: 0.0,
        })
    });
    assert!(result.is_err());
    assert_eq!(scheduler.state(), SchedulerPhase::Running);
    assert_eq!(scheduler.clock().pending_len(), 1);
    assert!(scheduler.pending_frame().is_some());

    let report = host::run_paced(&mut scheduler, &config, |_subject, _frame| Ok(())).unwrap();
    assert_eq!(report.frames, 3);
    assert_eq!(log.borrow().iter().filter(|e| *e == "render").count(), 4);
}
