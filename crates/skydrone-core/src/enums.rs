//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// A directional control input the pilot can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Forward,
    Backward,
    Left,
    Right,
}

impl Direction {
    /// All four directions, in a fixed order.
    pub const ALL: [Direction; 4] = [
        Direction::Forward,
        Direction::Backward,
        Direction::Left,
        Direction::Right,
    ];
}

/// Lifecycle state of the animation scheduler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SchedulerPhase {
    /// Not started, or disposed. No frame is pending.
    #[default]
    Idle,
    /// Exactly one frame is pending with the frame clock.
    Running,
}
