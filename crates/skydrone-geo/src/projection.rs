//! Geographic projection: lat/lon to Web Mercator plane, plane to render space.
//!
//! Planar frame: x = East, y = North (meters).
//! Render frame: x = East, y = Up, z = South. Forward into the screen is -z,
//! so planar north (+y) becomes render -z.

use std::f64::consts::PI;

use glam::DVec3;

use skydrone_core::constants::{EARTH_RADIUS, MAX_MERCATOR_LATITUDE};
use skydrone_core::error::GeoError;
use skydrone_core::types::{GeoFix, PlanarCoord};

/// Project a geographic fix (degrees) onto the Mercator plane.
///
/// Latitudes at or beyond ±85.0511° are rejected: the tangent term diverges
/// there and would otherwise produce non-finite coordinates.
pub fn project_geographic(latitude: f64, longitude: f64) -> Result<PlanarCoord, GeoError> {
    if !latitude.is_finite() || latitude.abs() >= MAX_MERCATOR_LATITUDE {
        return Err(GeoError::OutOfDomain { latitude });
    }
    if !longitude.is_finite() {
        return Err(GeoError::InvalidCoordinate {
            name: "longitude",
            value: longitude,
        });
    }

    let x = longitude.to_radians() * EARTH_RADIUS;
    let y = ((90.0 + latitude) * PI / 360.0).tan().ln() * EARTH_RADIUS;
    Ok(PlanarCoord::new(x, y))
}

/// Inverse of [`project_geographic`].
pub fn unproject(planar: &PlanarCoord) -> GeoFix {
    let longitude = (planar.x / EARTH_RADIUS).to_degrees();
    let latitude = (2.0 * (planar.y / EARTH_RADIUS).exp().atan()).to_degrees() - 90.0;
    GeoFix::new(latitude, longitude)
}

/// Map a planar coordinate plus elevation into render space.
pub fn to_render_space(planar: &PlanarCoord, elevation: f64) -> DVec3 {
    DVec3::new(planar.x, elevation, -planar.y)
}

/// Unit forward vector in render space for a compass azimuth (degrees).
pub fn render_heading(azimuth_deg: f64) -> DVec3 {
    let a = azimuth_deg.to_radians();
    DVec3::new(a.sin(), 0.0, -a.cos())
}
