//! Chase camera: trails the model along its heading.

use glam::DVec3;
use hecs::World;

use skydrone_core::components::{ChaseCamera, VehicleModel};
use skydrone_geo::projection::render_heading;

/// Position each chase camera behind and above the model, looking at it.
/// Run after `model::run` so the camera uses this frame's pose.
pub fn run(world: &mut World, azimuth_deg: f64) {
    let target = {
        let mut query = world.query::<&VehicleModel>();
        match query.iter().next() {
            Some((_entity, model)) => model.position,
            None => return,
        }
    };

    let back = -render_heading(azimuth_deg);
    for (_entity, camera) in world.query_mut::<&mut ChaseCamera>() {
        camera.position = target + back * camera.distance + DVec3::Y * camera.height;
        camera.look_at = target;
    }
}
