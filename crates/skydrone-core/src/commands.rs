//! Control commands sent by input collaborators to the vehicle.
//!
//! Input capture (keyboard, mouse, wheel) lives outside the simulation; it
//! translates raw input into these commands.

use serde::{Deserialize, Serialize};

use crate::enums::Direction;

/// All possible pilot actions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ControlCommand {
    /// A directional input was pressed.
    StartMoving { direction: Direction },
    /// A directional input was released.
    StopMoving { direction: Direction },
    /// Turn by a signed number of degrees (positive = clockwise).
    RotateAzimuth { delta_deg: f64 },
    /// Climb (positive) or descend (negative) by a number of meters.
    ChangeElevation { delta: f64 },
}
