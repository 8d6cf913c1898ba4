//! Events emitted by the vehicle for presentation collaborators.

use serde::{Deserialize, Serialize};

use crate::types::PlanarCoord;

/// Key under which vehicle event listeners are registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleEventKind {
    LocationChanged,
    AzimuthChanged,
    ElevationChanged,
}

/// A vehicle state change. Each payload is a copy of the new value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum VehicleEvent {
    /// New planar location after integration.
    LocationChanged(PlanarCoord),
    /// New heading in degrees, `[0, 360)`.
    AzimuthChanged(f64),
    /// New elevation in meters.
    ElevationChanged(f64),
}

impl VehicleEvent {
    pub fn kind(&self) -> VehicleEventKind {
        match self {
            VehicleEvent::LocationChanged(_) => VehicleEventKind::LocationChanged,
            VehicleEvent::AzimuthChanged(_) => VehicleEventKind::AzimuthChanged,
            VehicleEvent::ElevationChanged(_) => VehicleEventKind::ElevationChanged,
        }
    }
}
