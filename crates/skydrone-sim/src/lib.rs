//! Simulation layer for skydrone.
//!
//! Owns the vehicle, its event bus and the kinematic integration, plus the
//! hecs scene of objects that follow the vehicle.

pub mod controls;
pub mod event_bus;
pub mod kinematics;
pub mod scene;
pub mod systems;
pub mod vehicle;

pub use event_bus::{BusEvent, EventBus, ListenerId};
pub use scene::Scene;
pub use vehicle::Vehicle;
