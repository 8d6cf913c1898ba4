//! The simulated drone: planar location, heading, elevation and held inputs.
//!
//! Every state-affecting mutation completes before its event is emitted, and
//! listeners receive copies, so no listener can observe a half-applied update.

use glam::DVec3;
use tracing::{debug, trace};

use skydrone_core::config::SimConfig;
use skydrone_core::enums::Direction;
use skydrone_core::error::SimError;
use skydrone_core::events::{VehicleEvent, VehicleEventKind};
use skydrone_core::state::VehicleState;
use skydrone_core::types::{GeoFix, MovementIntent, PlanarCoord};
use skydrone_geo::projection;

use crate::event_bus::{BusEvent, EventBus, ListenerId};
use crate::kinematics;

impl BusEvent for VehicleEvent {
    type Kind = VehicleEventKind;

    fn kind(&self) -> VehicleEventKind {
        VehicleEvent::kind(self)
    }
}

/// The single simulated vehicle. Owns its state and its event bus.
pub struct Vehicle {
    location: PlanarCoord,
    azimuth: f64,
    elevation: f64,
    intent: MovementIntent,
    linear_speed: f64,
    bus: EventBus<VehicleEvent>,
}

impl Vehicle {
    /// Create a vehicle at a planar location.
    ///
    /// Every input must be finite and `linear_speed` must not be negative.
    pub fn new(
        location: PlanarCoord,
        azimuth_deg: f64,
        elevation: f64,
        linear_speed: f64,
    ) -> Result<Self, SimError> {
        ensure_finite("x", location.x)?;
        ensure_finite("y", location.y)?;
        ensure_finite("azimuth_deg", azimuth_deg)?;
        ensure_finite("elevation", elevation)?;
        ensure_finite("linear_speed", linear_speed)?;
        if linear_speed < 0.0 {
            return Err(SimError::InvalidArgument {
                name: "linear_speed",
                value: linear_speed,
            });
        }
        Ok(Self {
            location,
            azimuth: normalize_azimuth(azimuth_deg),
            elevation,
            intent: MovementIntent::default(),
            linear_speed,
            bus: EventBus::new(),
        })
    }

    /// Create a vehicle from a geographic fix.
    pub fn from_fix(
        fix: GeoFix,
        azimuth_deg: f64,
        elevation: f64,
        linear_speed: f64,
    ) -> Result<Self, SimError> {
        let location = projection::project_geographic(fix.latitude, fix.longitude)?;
        debug!(
            lat = fix.latitude,
            lon = fix.longitude,
            x = location.x,
            y = location.y,
            "vehicle created"
        );
        Self::new(location, azimuth_deg, elevation, linear_speed)
    }

    /// Create a vehicle at the configured starting fix.
    pub fn from_config(config: &SimConfig) -> Result<Self, SimError> {
        Self::from_fix(
            config.initial_fix,
            config.initial_azimuth_deg,
            config.initial_elevation,
            config.linear_speed,
        )
    }

    // --- Movement intent ---

    pub fn start_moving_forward(&mut self) {
        self.set_moving(Direction::Forward, true);
    }

    pub fn start_moving_backward(&mut self) {
        self.set_moving(Direction::Backward, true);
    }

    pub fn start_moving_left(&mut self) {
        self.set_moving(Direction::Left, true);
    }

    pub fn start_moving_right(&mut self) {
        self.set_moving(Direction::Right, true);
    }

    pub fn stop_moving_forward(&mut self) {
        self.set_moving(Direction::Forward, false);
    }

    pub fn stop_moving_backward(&mut self) {
        self.set_moving(Direction::Backward, false);
    }

    pub fn stop_moving_left(&mut self) {
        self.set_moving(Direction::Left, false);
    }

    pub fn stop_moving_right(&mut self) {
        self.set_moving(Direction::Right, false);
    }

    /// Set or clear one intent flag. Idempotent; emits nothing.
    pub fn set_moving(&mut self, direction: Direction, held: bool) {
        self.intent.set(direction, held);
    }

    // --- Discrete commands ---

    /// Turn by `delta_deg` (positive = clockwise), wrapping into `[0, 360)`.
    pub fn rotate_azimuth(&mut self, delta_deg: f64) -> Result<(), SimError> {
        ensure_finite("delta_deg", delta_deg)?;
        self.azimuth = normalize_azimuth(self.azimuth + delta_deg);
        self.publish(VehicleEvent::AzimuthChanged(self.azimuth));
        Ok(())
    }

    /// Climb or descend by `delta` meters. Not clamped.
    pub fn change_elevation(&mut self, delta: f64) -> Result<(), SimError> {
        ensure_finite("delta", delta)?;
        self.elevation += delta;
        self.publish(VehicleEvent::ElevationChanged(self.elevation));
        Ok(())
    }

    // --- Per-frame integration ---

    /// Advance the location by the held intent over `delta_secs`.
    ///
    /// Emits `LocationChanged` unless no motion is requested.
    pub fn integrate(&mut self, delta_secs: f64) -> Result<(), SimError> {
        ensure_finite("delta_secs", delta_secs)?;
        if delta_secs < 0.0 {
            return Err(SimError::InvalidArgument {
                name: "delta_secs",
                value: delta_secs,
            });
        }

        let Some(offset) = kinematics::displacement(
            &self.intent,
            self.azimuth,
            self.linear_speed,
            delta_secs,
        ) else {
            return Ok(());
        };

        self.location = self.location.offset(offset);
        self.publish(VehicleEvent::LocationChanged(self.location));
        Ok(())
    }

    // --- Subscriptions ---

    pub fn subscribe(
        &mut self,
        kind: VehicleEventKind,
        callback: impl FnMut(&VehicleEvent) + 'static,
    ) -> ListenerId {
        self.bus.subscribe(kind, callback)
    }

    pub fn unsubscribe(&mut self, kind: VehicleEventKind, id: ListenerId) -> bool {
        self.bus.unsubscribe(kind, id)
    }

    pub fn listener_count(&self, kind: VehicleEventKind) -> usize {
        self.bus.listener_count(kind)
    }

    /// Session teardown: drop every listener.
    pub fn dispose(&mut self) {
        self.bus.clear_all();
        debug!("vehicle disposed");
    }

    // --- Read access ---

    pub fn location(&self) -> PlanarCoord {
        self.location
    }

    pub fn azimuth(&self) -> f64 {
        self.azimuth
    }

    pub fn elevation(&self) -> f64 {
        self.elevation
    }

    pub fn intent(&self) -> MovementIntent {
        self.intent
    }

    pub fn linear_speed(&self) -> f64 {
        self.linear_speed
    }

    /// Current position in render space.
    pub fn render_position(&self) -> DVec3 {
        projection::to_render_space(&self.location, self.elevation)
    }

    /// Current geographic fix.
    pub fn geo_fix(&self) -> GeoFix {
        projection::unproject(&self.location)
    }

    pub fn snapshot(&self) -> VehicleState {
        VehicleState {
            location: self.location,
            azimuth: self.azimuth,
            elevation: self.elevation,
            intent: self.intent,
        }
    }

    fn publish(&mut self, event: VehicleEvent) {
        trace!(?event, "vehicle event");
        self.bus.emit(&event);
    }
}

/// Wrap any heading into `[0, 360)`.
pub fn normalize_azimuth(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

fn ensure_finite(name: &'static str, value: f64) -> Result<(), SimError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(SimError::InvalidArgument { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn vehicle_at_origin(azimuth: f64) -> Vehicle {
        Vehicle::new(PlanarCoord::default(), azimuth, 100.0, 10.0).unwrap()
    }

    fn record(vehicle: &mut Vehicle, kind: VehicleEventKind) -> Rc<RefCell<Vec<VehicleEvent>>> {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        vehicle.subscribe(kind, move |event| sink.borrow_mut().push(*event));
        events
    }

    #[test]
    fn test_normalize_azimuth() {
        assert_eq!(normalize_azimuth(390.0), 30.0);
        assert_eq!(normalize_azimuth(-10.0), 350.0);
        assert_eq!(normalize_azimuth(720.0), 0.0);
        assert!(normalize_azimuth(-1e-20) < 360.0);
    }

    #[test]
    fn test_rotate_azimuth_wraps_past_north() {
        let mut vehicle = vehicle_at_origin(350.0);
        vehicle.rotate_azimuth(20.0).unwrap();
        vehicle.rotate_azimuth(20.0).unwrap();
        assert!((vehicle.azimuth() - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_rotate_azimuth_negative_delta() {
        let mut vehicle = vehicle_at_origin(10.0);
        let events = record(&mut vehicle, VehicleEventKind::AzimuthChanged);
        vehicle.rotate_azimuth(-30.0).unwrap();
        assert!((vehicle.azimuth() - 340.0).abs() < 1e-9);
        assert_eq!(*events.borrow(), vec![VehicleEvent::AzimuthChanged(340.0)]);
    }

    #[test]
    fn test_change_elevation_is_unbounded() {
        let mut vehicle = vehicle_at_origin(0.0);
        let events = record(&mut vehicle, VehicleEventKind::ElevationChanged);
        vehicle.change_elevation(-500.0).unwrap();
        assert_eq!(vehicle.elevation(), -400.0);
        assert_eq!(*events.borrow(), vec![VehicleEvent::ElevationChanged(-400.0)]);
    }

    #[test]
    fn test_forward_at_north_moves_plus_y() {
        let mut vehicle = vehicle_at_origin(0.0);
        vehicle.start_moving_forward();
        vehicle.integrate(1.5).unwrap();
        let loc = vehicle.location();
        assert!(loc.x.abs() < 1e-9, "x drifted: {}", loc.x);
        assert!((loc.y - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_forward_at_east_moves_plus_x() {
        let mut vehicle = vehicle_at_origin(90.0);
        vehicle.start_moving_forward();
        vehicle.integrate(2.0).unwrap();
        let loc = vehicle.location();
        assert!((loc.x - 20.0).abs() < 1e-9);
        assert!(loc.y.abs() < 1e-9, "y drifted: {}", loc.y);
    }

    #[test]
    fn test_opposing_inputs_emit_nothing() {
        for (a, b) in [
            (Direction::Forward, Direction::Backward),
            (Direction::Left, Direction::Right),
        ] {
            let mut vehicle = vehicle_at_origin(30.0);
            let events = record(&mut vehicle, VehicleEventKind::LocationChanged);
            vehicle.set_moving(a, true);
            vehicle.set_moving(b, true);
            vehicle.integrate(1.0).unwrap();
            assert_eq!(vehicle.location(), PlanarCoord::default());
            assert!(events.borrow().is_empty(), "{a:?}+{b:?} emitted");
        }
    }

    #[test]
    fn test_idle_emits_nothing() {
        let mut vehicle = vehicle_at_origin(0.0);
        let events = record(&mut vehicle, VehicleEventKind::LocationChanged);
        vehicle.integrate(1.0).unwrap();
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn test_zero_delta_keeps_location_and_flag() {
        let mut vehicle = vehicle_at_origin(45.0);
        vehicle.start_moving_right();
        vehicle.integrate(0.0).unwrap();
        assert_eq!(vehicle.location(), PlanarCoord::default());
        assert!(vehicle.intent().right);
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut vehicle = vehicle_at_origin(0.0);
        vehicle.start_moving_left();
        vehicle.start_moving_left();
        vehicle.stop_moving_left();
        vehicle.stop_moving_left();
        assert!(vehicle.intent().is_idle());
    }

    #[test]
    fn test_invalid_arguments_leave_state_untouched() {
        let mut vehicle = vehicle_at_origin(0.0);
        vehicle.start_moving_forward();
        let before = vehicle.snapshot();

        assert!(vehicle.integrate(f64::NAN).is_err());
        assert!(vehicle.integrate(-0.5).is_err());
        assert!(vehicle.rotate_azimuth(f64::INFINITY).is_err());
        assert!(vehicle.change_elevation(f64::NAN).is_err());

        assert_eq!(vehicle.snapshot(), before);
    }

    #[test]
    fn test_construction_rejects_bad_inputs() {
        let origin = PlanarCoord::default();
        for (azimuth, elevation, speed, name) in [
            (f64::NAN, 100.0, 10.0, "azimuth_deg"),
            (0.0, f64::INFINITY, 10.0, "elevation"),
            (0.0, 100.0, f64::NAN, "linear_speed"),
            (0.0, 100.0, -1.0, "linear_speed"),
        ] {
            match Vehicle::new(origin, azimuth, elevation, speed) {
                Err(SimError::InvalidArgument { name: got, .. }) => assert_eq!(got, name),
                other => panic!("expected {name} to be rejected, got {:?}", other.is_ok()),
            }
        }
        assert!(Vehicle::new(PlanarCoord::new(f64::NAN, 0.0), 0.0, 100.0, 10.0).is_err());
        assert!(Vehicle::new(origin, 0.0, 100.0, 0.0).is_ok());
    }

    #[test]
    fn test_listener_sees_consistent_state() {
        let mut vehicle = vehicle_at_origin(0.0);
        let events = record(&mut vehicle, VehicleEventKind::LocationChanged);
        vehicle.start_moving_forward();
        vehicle.integrate(1.0).unwrap();
        assert_eq!(
            *events.borrow(),
            vec![VehicleEvent::LocationChanged(vehicle.location())]
        );
    }

    #[test]
    fn test_from_fix_rejects_polar_latitude() {
        let err = Vehicle::from_fix(GeoFix::new(88.0, 0.0), 0.0, 0.0, 1.0)
            .err()
            .unwrap();
        assert!(matches!(err, SimError::Geo(_)));
    }

    #[test]
    fn test_dispose_clears_listeners() {
        let mut vehicle = vehicle_at_origin(0.0);
        let events = record(&mut vehicle, VehicleEventKind::AzimuthChanged);
        vehicle.dispose();
        vehicle.rotate_azimuth(10.0).unwrap();
        assert!(events.borrow().is_empty());
        assert_eq!(vehicle.listener_count(VehicleEventKind::AzimuthChanged), 0);
    }
}
