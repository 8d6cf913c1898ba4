//! Fundamental geometric and simulation types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::Direction;

/// Position on the projected plane (meters).
/// x = East, y = North.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanarCoord {
    pub x: f64,
    pub y: f64,
}

/// Geographic fix in degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoFix {
    pub latitude: f64,
    pub longitude: f64,
}

/// Which directional inputs are currently held.
///
/// Flags are independent: holding opposite directions is legal and cancels out
/// during integration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementIntent {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

impl PlanarCoord {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn as_dvec2(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    /// This coordinate moved by `offset` meters.
    pub fn offset(&self, offset: DVec2) -> Self {
        Self::new(self.x + offset.x, self.y + offset.y)
    }

    /// Planar distance to another coordinate in meters.
    pub fn distance_to(&self, other: &PlanarCoord) -> f64 {
        self.as_dvec2().distance(other.as_dvec2())
    }
}

impl GeoFix {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl MovementIntent {
    /// True when no directional input is held.
    pub fn is_idle(&self) -> bool {
        !(self.forward || self.backward || self.left || self.right)
    }

    pub fn is_held(&self, direction: Direction) -> bool {
        match direction {
            Direction::Forward => self.forward,
            Direction::Backward => self.backward,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    pub fn set(&mut self, direction: Direction, held: bool) {
        match direction {
            Direction::Forward => self.forward = held,
            Direction::Backward => self.backward = held,
            Direction::Left => self.left = held,
            Direction::Right => self.right = held,
        }
    }

    /// Net forward axis: +1 forward, -1 backward, 0 when neither or both.
    pub fn net_forward(&self) -> f64 {
        axis(self.forward, self.backward)
    }

    /// Net right axis: +1 right, -1 left, 0 when neither or both.
    pub fn net_right(&self) -> f64 {
        axis(self.right, self.left)
    }
}

fn axis(positive: bool, negative: bool) -> f64 {
    let mut net = 0.0;
    if positive {
        net += 1.0;
    }
    if negative {
        net -= 1.0;
    }
    net
}
