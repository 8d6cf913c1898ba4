//! Kinematic integration for the vehicle.
//!
//! Pure function of intent, heading, speed and elapsed time. No state and no
//! event emission; the vehicle layers those on top.

use std::f64::consts::FRAC_PI_2;

use glam::DVec2;

use skydrone_core::types::MovementIntent;

/// Planar displacement produced by holding `intent` for `delta_secs`.
///
/// Returns `None` when no motion is requested: no input held, or opposing
/// inputs cancel on both axes. A zero `delta_secs` still returns
/// `Some(DVec2::ZERO)` when an input is held.
///
/// Forward and strafe components are summed without renormalization, so
/// holding forward and right together moves at `sqrt(2) * speed`.
pub fn displacement(
    intent: &MovementIntent,
    azimuth_deg: f64,
    speed: f64,
    delta_secs: f64,
) -> Option<DVec2> {
    if intent.is_idle() {
        return None;
    }

    let net_forward = intent.net_forward();
    let net_right = intent.net_right();
    if net_forward == 0.0 && net_right == 0.0 {
        return None;
    }

    let heading = azimuth_deg.to_radians();
    let distance = speed * delta_secs;

    // Azimuth is measured clockwise from north (+y), so sin gives x.
    let forward = DVec2::new(heading.sin(), heading.cos()) * net_forward * distance;
    let strafe_heading = heading + FRAC_PI_2;
    let right = DVec2::new(strafe_heading.sin(), strafe_heading.cos()) * net_right * distance;

    Some(forward + right)
}
