//! ECS components for the dependent-object scene.
//!
//! Components are plain data structs with no methods.
//! Update logic lives in systems, not components.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// One spinning rotor on the drone model.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Rotor {
    /// Mount index on the airframe.
    pub index: usize,
    /// Angular speed in radians per second. Alternating sign per mount.
    pub spin_rate_rad_s: f64,
    /// Current angle in radians, `[0, TAU)`.
    pub angle_rad: f64,
}

/// The visual representation of the vehicle in render space.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct VehicleModel {
    pub position: DVec3,
    /// Rotation about the render-space up axis (radians).
    pub yaw_rad: f64,
}

/// Third-person camera trailing the vehicle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ChaseCamera {
    /// Horizontal distance behind the vehicle (meters).
    pub distance: f64,
    /// Height above the vehicle (meters).
    pub height: f64,
    pub position: DVec3,
    pub look_at: DVec3,
}
