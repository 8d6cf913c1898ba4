//! Keeps the drone model at the observed vehicle pose.

use hecs::World;

use skydrone_core::components::VehicleModel;
use skydrone_geo::projection::to_render_space;

use crate::scene::ObservedPose;

/// Place every vehicle model at `pose`.
///
/// Yaw is the negated azimuth: a clockwise compass turn is a negative
/// rotation about render-space +y.
pub fn run(world: &mut World, pose: &ObservedPose) {
    let position = to_render_space(&pose.location, pose.elevation);
    let yaw_rad = -pose.azimuth.to_radians();
    for (_entity, model) in world.query_mut::<&mut VehicleModel>() {
        model.position = position;
        model.yaw_rad = yaw_rad;
    }
}
