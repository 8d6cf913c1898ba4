//! Rotor spin animation.

use std::f64::consts::TAU;

use hecs::World;

use skydrone_core::components::Rotor;

/// Advance every rotor by its spin rate over `delta_secs`.
pub fn run(world: &mut World, delta_secs: f64) {
    if delta_secs == 0.0 {
        return;
    }
    for (_entity, rotor) in world.query_mut::<&mut Rotor>() {
        rotor.angle_rad = (rotor.angle_rad + rotor.spin_rate_rad_s * delta_secs).rem_euclid(TAU);
    }
}
