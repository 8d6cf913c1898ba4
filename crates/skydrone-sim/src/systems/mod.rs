//! ECS systems that update the dependent-object scene each frame.
//!
//! Systems are pure functions that take `&mut World`.
//! They do not own state; all state lives in components.

pub mod chase_camera;
pub mod model;
pub mod rotor;
