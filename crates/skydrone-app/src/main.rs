//! skydrone headless runner.
//!
//! Flies the drone under the seeded autopilot for a fixed number of frames
//! and prints the final vehicle state as JSON.

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use skydrone_app::autopilot::Autopilot;
use skydrone_app::frame_clock::FrameQueue;
use skydrone_app::host::{self, HostConfig};
use skydrone_app::render::LogRenderer;
use skydrone_app::scheduler::AnimationScheduler;
use skydrone_core::config::SimConfig;
use skydrone_core::constants::DEFAULT_FRAME_RATE;
use skydrone_sim::controls::apply_commands;
use skydrone_sim::{Scene, Vehicle};

#[derive(Parser, Debug)]
#[command(name = "skydrone")]
#[command(about = "Headless first-person drone simulation")]
struct Args {
    /// Frames to simulate
    #[arg(long, default_value_t = 600)]
    frames: u64,

    /// Target frame rate (Hz)
    #[arg(long, default_value_t = DEFAULT_FRAME_RATE)]
    fps: u32,

    /// Autopilot RNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Frames between autopilot decisions
    #[arg(long, default_value_t = 30)]
    decision_interval: u64,

    /// Frames between render log lines
    #[arg(long, default_value_t = 60)]
    log_every: u64,

    /// JSON config file (defaults apply to omitted fields)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("skydrone=info,skydrone_app=info,skydrone_sim=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    };

    let mut vehicle = Vehicle::from_config(&config)?;
    let scene = Rc::new(RefCell::new(Scene::new(&config)));
    scene.borrow_mut().attach(&mut vehicle);

    let renderer = LogRenderer::new(scene.clone(), args.log_every);
    let mut scheduler = AnimationScheduler::new(FrameQueue::new(), vehicle, renderer);

    let rotor_scene = scene.clone();
    scheduler.add_update_hook(move |_vehicle: &Vehicle, delta_secs| {
        rotor_scene.borrow_mut().spin_rotors(delta_secs);
    });
    let follow_scene = scene.clone();
    scheduler.add_update_hook(move |_vehicle: &Vehicle, _delta_secs| {
        let mut scene = follow_scene.borrow_mut();
        scene.sync_model();
        scene.update_chase_camera();
    });

    info!(
        frames = args.frames,
        fps = args.fps,
        seed = args.seed,
        lat = config.initial_fix.latitude,
        lon = config.initial_fix.longitude,
        "starting session"
    );

    let mut autopilot = Autopilot::new(args.seed, args.decision_interval, &config);
    let policy = config.elevation_policy;
    let host_config = HostConfig {
        frames: args.frames,
        frame_rate: args.fps,
    };

    scheduler.start();
    let outcome = host::run_paced(&mut scheduler, &host_config, |vehicle, frame| {
        let commands = autopilot.commands_for_frame(frame);
        apply_commands(vehicle, &commands, &policy)
    });
    scheduler.dispose();
    scene.borrow_mut().detach(scheduler.subject_mut());
    scheduler.subject_mut().dispose();
    let report = outcome?;

    let vehicle = scheduler.subject();
    let fix = vehicle.geo_fix();
    info!(
        frames = report.frames,
        resyncs = report.resyncs,
        lat = fix.latitude,
        lon = fix.longitude,
        elevation = vehicle.elevation(),
        azimuth = vehicle.azimuth(),
        "session finished"
    );

    println!("{}", serde_json::to_string_pretty(&vehicle.snapshot())?);
    Ok(())
}
