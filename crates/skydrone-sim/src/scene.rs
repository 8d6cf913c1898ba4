//! Dependent-object scene: the drone model, its rotors and the chase camera.
//!
//! The scene learns about the vehicle only through its events. Listeners
//! write into a shared `ObservedPose`; the per-frame systems read it.

use std::cell::RefCell;
use std::rc::Rc;

use hecs::{Entity, World};

use skydrone_core::components::{ChaseCamera, Rotor, VehicleModel};
use skydrone_core::config::SimConfig;
use skydrone_core::constants::ROTOR_COUNT;
use skydrone_core::events::{VehicleEvent, VehicleEventKind};
use skydrone_core::types::PlanarCoord;

use crate::event_bus::ListenerId;
use crate::systems;
use crate::vehicle::Vehicle;

/// The vehicle pose as last announced through its events.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ObservedPose {
    pub location: PlanarCoord,
    pub azimuth: f64,
    pub elevation: f64,
}

impl ObservedPose {
    fn apply(&mut self, event: &VehicleEvent) {
        match *event {
            VehicleEvent::LocationChanged(location) => self.location = location,
            VehicleEvent::AzimuthChanged(azimuth) => self.azimuth = azimuth,
            VehicleEvent::ElevationChanged(elevation) => self.elevation = elevation,
        }
    }
}

/// Owns the ECS world holding every object that follows the vehicle.
pub struct Scene {
    world: World,
    pose: Rc<RefCell<ObservedPose>>,
    subscriptions: Vec<(VehicleEventKind, ListenerId)>,
    model: Entity,
    camera: Entity,
}

impl Scene {
    /// Spawn the model, its rotors and the chase camera.
    pub fn new(config: &SimConfig) -> Self {
        let mut world = World::new();
        let model = world.spawn((VehicleModel::default(),));
        for index in 0..ROTOR_COUNT {
            // Adjacent rotors counter-rotate.
            let sign = if index % 2 == 0 { 1.0 } else { -1.0 };
            world.spawn((Rotor {
                index,
                spin_rate_rad_s: sign * config.rotor_spin_rate,
                angle_rad: 0.0,
            },));
        }
        let camera = world.spawn((ChaseCamera {
            distance: config.camera.distance,
            height: config.camera.height,
            position: Default::default(),
            look_at: Default::default(),
        },));

        Self {
            world,
            pose: Rc::new(RefCell::new(ObservedPose::default())),
            subscriptions: Vec::new(),
            model,
            camera,
        }
    }

    /// Seed the pose from the vehicle and follow its events from now on.
    pub fn attach(&mut self, vehicle: &mut Vehicle) {
        self.detach(vehicle);
        *self.pose.borrow_mut() = ObservedPose {
            location: vehicle.location(),
            azimuth: vehicle.azimuth(),
            elevation: vehicle.elevation(),
        };
        for kind in [
            VehicleEventKind::LocationChanged,
            VehicleEventKind::AzimuthChanged,
            VehicleEventKind::ElevationChanged,
        ] {
            let pose = self.pose.clone();
            let id = vehicle.subscribe(kind, move |event| pose.borrow_mut().apply(event));
            self.subscriptions.push((kind, id));
        }
        self.sync_model();
        self.update_chase_camera();
    }

    /// Stop following the vehicle.
    pub fn detach(&mut self, vehicle: &mut Vehicle) {
        for (kind, id) in self.subscriptions.drain(..) {
            vehicle.unsubscribe(kind, id);
        }
    }

    /// Advance rotor spin by `delta_secs`.
    pub fn spin_rotors(&mut self, delta_secs: f64) {
        systems::rotor::run(&mut self.world, delta_secs);
    }

    /// Move the model to the observed pose.
    pub fn sync_model(&mut self) {
        let pose = *self.pose.borrow();
        systems::model::run(&mut self.world, &pose);
    }

    /// Recompute the chase camera from the model.
    pub fn update_chase_camera(&mut self) {
        let azimuth = self.pose.borrow().azimuth;
        systems::chase_camera::run(&mut self.world, azimuth);
    }

    pub fn pose(&self) -> ObservedPose {
        *self.pose.borrow()
    }

    pub fn is_attached(&self) -> bool {
        !self.subscriptions.is_empty()
    }

    pub fn model(&self) -> Option<VehicleModel> {
        self.world.get::<&VehicleModel>(self.model).ok().map(|m| *m)
    }

    pub fn camera(&self) -> Option<ChaseCamera> {
        self.world.get::<&ChaseCamera>(self.camera).ok().map(|c| *c)
    }

    pub fn rotors(&self) -> Vec<Rotor> {
        let mut rotors: Vec<Rotor> = self
            .world
            .query::<&Rotor>()
            .iter()
            .map(|(_entity, rotor)| *rotor)
            .collect();
        rotors.sort_by_key(|r| r.index);
        rotors
    }
}
