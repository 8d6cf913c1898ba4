//! Per-frame timing primitive supplied by the host.
//!
//! A display-driven host fires one callback per refresh. Here that is
//! modelled as a request/cancel interface; the host later hands the granted
//! handle back to the scheduler together with the frame timestamp.

use std::collections::VecDeque;

/// Opaque identifier for one requested frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

impl FrameHandle {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Host-side frame scheduling.
pub trait FrameClock {
    /// Ask for one frame callback.
    fn request_frame(&mut self) -> FrameHandle;

    /// Withdraw a request. Unknown or already-fired handles are ignored.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Deterministic frame clock: requests queue up until the host pops them.
#[derive(Debug, Default)]
pub struct FrameQueue {
    next_id: u64,
    pending: VecDeque<FrameHandle>,
    cancelled: Vec<FrameHandle>,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pop the oldest pending request, as the host does when a frame fires.
    pub fn next_due(&mut self) -> Option<FrameHandle> {
        self.pending.pop_front()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Every handle passed to `cancel_frame`, in call order.
    pub fn cancelled(&self) -> &[FrameHandle] {
        &self.cancelled
    }
}

impl FrameClock for FrameQueue {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.pending.push_back(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.pending.retain(|h| *h != handle);
        self.cancelled.push(handle);
    }
}
