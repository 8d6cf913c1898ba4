//! skydrone application layer.
//!
//! Wires the simulation crates to a frame clock: the animation scheduler,
//! the paced headless host loop, a logging renderer and the seeded autopilot
//! that stands in for keyboard input.

pub mod autopilot;
pub mod frame_clock;
pub mod host;
pub mod render;
pub mod scheduler;

#[cfg(test)]
mod tests;
