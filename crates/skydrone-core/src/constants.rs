//! Simulation constants and tuning defaults.

// --- Projection ---

/// Earth radius used by the Web Mercator projection (meters).
pub const EARTH_RADIUS: f64 = 6_378_137.0;

/// Latitude bound of the Mercator domain (degrees). The valid domain is the
/// open interval `(-MAX_MERCATOR_LATITUDE, MAX_MERCATOR_LATITUDE)`.
pub const MAX_MERCATOR_LATITUDE: f64 = 85.0511;

// --- Vehicle ---

/// Linear ground speed while a movement key is held (m/s).
pub const DEFAULT_LINEAR_SPEED: f64 = 12.0;

/// Heading change applied by one discrete turn command (degrees).
pub const DEFAULT_AZIMUTH_STEP_DEG: f64 = 5.0;

/// Elevation change applied by one discrete climb/descend command (meters).
pub const DEFAULT_ELEVATION_STEP: f64 = 2.0;

/// Starting elevation above the reference plane (meters).
pub const DEFAULT_INITIAL_ELEVATION: f64 = 120.0;

/// Starting fix: Zurich main station.
pub const DEFAULT_INITIAL_LATITUDE: f64 = 47.378_177;
pub const DEFAULT_INITIAL_LONGITUDE: f64 = 8.540_192;

/// Lowest elevation the input policy lets the pilot descend to (meters).
pub const DEFAULT_MIN_ELEVATION: f64 = 2.0;

/// Highest elevation the input policy lets the pilot climb to (meters).
pub const DEFAULT_MAX_ELEVATION: f64 = 2_000.0;

// --- Scene ---

/// Rotor angular speed (radians per second), roughly 1500 rpm.
pub const DEFAULT_ROTOR_SPIN_RATE: f64 = 157.0;

/// Number of rotors on the drone model.
pub const ROTOR_COUNT: usize = 4;

/// Chase camera distance behind the vehicle (meters).
pub const DEFAULT_CAMERA_DISTANCE: f64 = 18.0;

/// Chase camera height above the vehicle (meters).
pub const DEFAULT_CAMERA_HEIGHT: f64 = 6.0;

// --- Host loop ---

/// Target frame rate for the headless host (Hz).
pub const DEFAULT_FRAME_RATE: u32 = 60;

/// Milliseconds per second, for frame timestamp conversion.
pub const MILLIS_PER_SECOND: f64 = 1_000.0;
