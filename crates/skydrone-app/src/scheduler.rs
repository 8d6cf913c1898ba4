//! Animation scheduler: sequences one frame of work per frame callback.
//!
//! Each frame runs integrate, then every update hook, then render. Hooks
//! therefore see the state produced by this frame's integration, and
//! rendering is always last.

use tracing::{debug, trace, warn};

use skydrone_core::constants::MILLIS_PER_SECOND;
use skydrone_core::enums::SchedulerPhase;
use skydrone_core::error::SimError;
use skydrone_sim::Vehicle;

use crate::frame_clock::{FrameClock, FrameHandle};

/// Something the scheduler advances by elapsed time each frame.
pub trait Integrate {
    fn integrate(&mut self, delta_secs: f64) -> Result<(), SimError>;
}

impl Integrate for Vehicle {
    fn integrate(&mut self, delta_secs: f64) -> Result<(), SimError> {
        Vehicle::integrate(self, delta_secs)
    }
}

/// The presentation collaborator asked to draw once per frame.
pub trait RenderTarget {
    fn render(&mut self);
}

impl<F: FnMut()> RenderTarget for F {
    fn render(&mut self) {
        self()
    }
}

/// Dependent-object update run after integration, with read access to the
/// integrated subject and the frame delta in seconds.
pub type UpdateHook<S> = Box<dyn FnMut(&S, f64)>;

/// What a frame callback did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameOutcome {
    /// The full integrate/update/render sequence ran.
    Rendered { delta_secs: f64 },
    /// The handle was stale or the scheduler was idle; nothing ran.
    Skipped,
}

/// Drives `subject` from a frame clock.
pub struct AnimationScheduler<C: FrameClock, S: Integrate> {
    clock: C,
    subject: S,
    hooks: Vec<UpdateHook<S>>,
    renderer: Box<dyn RenderTarget>,
    phase: SchedulerPhase,
    /// Timestamp of the previous frame (ms); 0 means no frame yet.
    last_frame_time: f64,
    handle: Option<FrameHandle>,
    frames_rendered: u64,
}

impl<C: FrameClock, S: Integrate> AnimationScheduler<C, S> {
    pub fn new(clock: C, subject: S, renderer: impl RenderTarget + 'static) -> Self {
        Self {
            clock,
            subject,
            hooks: Vec::new(),
            renderer: Box::new(renderer),
            phase: SchedulerPhase::Idle,
            last_frame_time: 0.0,
            handle: None,
            frames_rendered: 0,
        }
    }

    /// Register a hook; hooks run in registration order.
    pub fn add_update_hook(&mut self, hook: impl FnMut(&S, f64) + 'static) {
        self.hooks.push(Box::new(hook));
    }

    /// Begin the frame loop. No-op while already running.
    pub fn start(&mut self) {
        if self.phase == SchedulerPhase::Running {
            debug!("scheduler already running");
            return;
        }
        self.last_frame_time = 0.0;
        self.handle = Some(self.clock.request_frame());
        self.phase = SchedulerPhase::Running;
        debug!("scheduler started");
    }

    /// Run one frame for `handle`, fired by the host at `timestamp_ms`.
    ///
    /// The next frame is requested before any work, so an error here leaves
    /// the loop running and the following frame proceeds on its own.
    pub fn on_frame(
        &mut self,
        handle: FrameHandle,
        timestamp_ms: f64,
    ) -> Result<FrameOutcome, SimError> {
        if self.phase != SchedulerPhase::Running {
            debug!(handle = handle.id(), "frame after dispose ignored");
            return Ok(FrameOutcome::Skipped);
        }
        if self.handle != Some(handle) {
            warn!(handle = handle.id(), "stale frame handle ignored");
            return Ok(FrameOutcome::Skipped);
        }

        self.handle = Some(self.clock.request_frame());

        if !timestamp_ms.is_finite() {
            return Err(SimError::InvalidArgument {
                name: "timestamp_ms",
                value: timestamp_ms,
            });
        }
        // A host clock stepping backwards yields no motion rather than reverse motion.
        let delta_secs = if self.last_frame_time == 0.0 {
            0.0
        } else {
            ((timestamp_ms - self.last_frame_time) / MILLIS_PER_SECOND).max(0.0)
        };
        self.last_frame_time = timestamp_ms;
        trace!(frame = self.frames_rendered, delta_secs, "frame");

        self.subject.integrate(delta_secs)?;
        for hook in &mut self.hooks {
            hook(&self.subject, delta_secs);
        }
        self.renderer.render();

        self.frames_rendered += 1;
        Ok(FrameOutcome::Rendered { delta_secs })
    }

    /// Stop the loop, cancelling the pending frame. Idempotent.
    pub fn dispose(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.clock.cancel_frame(handle);
        }
        if self.phase == SchedulerPhase::Running {
            debug!(frames = self.frames_rendered, "scheduler disposed");
        }
        self.phase = SchedulerPhase::Idle;
        self.last_frame_time = 0.0;
    }

    pub fn state(&self) -> SchedulerPhase {
        self.phase
    }

    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.handle
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    pub fn subject(&self) -> &S {
        &self.subject
    }

    /// Mutable access for input collaborators between frames.
    pub fn subject_mut(&mut self) -> &mut S {
        &mut self.subject
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }
}
