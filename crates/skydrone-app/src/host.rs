//! Host loops that fire frame callbacks into a scheduler.
//!
//! `run_paced` is the headless stand-in for a display-driven frame callback:
//! it fires due frames at a fixed rate with wall-clock timestamps.
//! `run_synthetic` fires them at caller-chosen timestamps, for deterministic
//! replays.

use std::time::{Duration, Instant};

use tracing::debug;

use skydrone_core::constants::MILLIS_PER_SECOND;
use skydrone_core::error::SimError;

use crate::frame_clock::FrameQueue;
use crate::scheduler::{AnimationScheduler, FrameOutcome, Integrate};

/// Pacing for the headless host.
#[derive(Debug, Clone, Copy)]
pub struct HostConfig {
    /// Frames to render before returning.
    pub frames: u64,
    /// Target frames per second.
    pub frame_rate: u32,
}

/// What a host run did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HostReport {
    pub frames: u64,
    pub skipped: u64,
    /// Times the host fell too far behind and reset its deadline.
    pub resyncs: u64,
}

/// Fire frames at `config.frame_rate` until `config.frames` have rendered or
/// no frame is pending.
///
/// `before_frame` runs just before each frame callback with mutable access to
/// the subject; it is where input collaborators apply their commands. An input
/// error is returned after that frame has fired, so the next frame stays queued.
pub fn run_paced<S, F>(
    scheduler: &mut AnimationScheduler<FrameQueue, S>,
    config: &HostConfig,
    mut before_frame: F,
) -> Result<HostReport, SimError>
where
    S: Integrate,
    F: FnMut(&mut S, u64) -> Result<(), SimError>,
{
    let frame_duration =
        Duration::from_nanos(1_000_000_000 / u64::from(config.frame_rate.max(1)));
    let started = Instant::now();
    let mut next_frame_time = started;
    let mut report = HostReport::default();

    while report.frames < config.frames {
        // 1. Take the pending frame request, if any
        let Some(handle) = scheduler.clock_mut().next_due() else {
            debug!("no frame pending; host loop ending");
            break;
        };

        // 2. Apply input. The taken handle is fired even if input fails.
        let input = before_frame(scheduler.subject_mut(), report.frames);

        // 3. Fire the frame. 0 is the scheduler's "no previous frame" sentinel,
        // so wall-clock timestamps never report it.
        let timestamp_ms =
            (started.elapsed().as_secs_f64() * MILLIS_PER_SECOND).max(f64::MIN_POSITIVE);
        let outcome = scheduler.on_frame(handle, timestamp_ms);
        input?;
        match outcome? {
            FrameOutcome::Rendered { .. } => report.frames += 1,
            FrameOutcome::Skipped => report.skipped += 1,
        }

        // 4. Sleep until the next frame boundary
        next_frame_time += frame_duration;
        let now = Instant::now();
        if next_frame_time > now {
            std::thread::sleep(next_frame_time - now);
        } else if now - next_frame_time > frame_duration * 2 {
            // Too far behind: reset to avoid a catch-up spiral
            report.resyncs += 1;
            next_frame_time = now;
        }
    }

    Ok(report)
}

/// Fire one due frame per timestamp, without sleeping.
pub fn run_synthetic<S: Integrate>(
    scheduler: &mut AnimationScheduler<FrameQueue, S>,
    timestamps_ms: impl IntoIterator<Item = f64>,
) -> Result<Vec<FrameOutcome>, SimError> {
    let mut outcomes = Vec::new();
    for timestamp_ms in timestamps_ms {
        let Some(handle) = scheduler.clock_mut().next_due() else {
            break;
        };
        outcomes.push(scheduler.on_frame(handle, timestamp_ms)?);
    }
    Ok(outcomes)
}
