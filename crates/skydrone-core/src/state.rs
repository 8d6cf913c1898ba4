//! Vehicle state snapshot: a read-only copy handed to collaborators.

use serde::{Deserialize, Serialize};

use crate::types::{MovementIntent, PlanarCoord};

/// Complete vehicle state at one instant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct VehicleState {
    pub location: PlanarCoord,
    /// Heading in degrees, `[0, 360)`, 0 = north.
    pub azimuth: f64,
    /// Altitude above the reference plane (meters).
    pub elevation: f64,
    pub intent: MovementIntent,
}
