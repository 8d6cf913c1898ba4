//! Logging renderer for the headless host.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::info;

use skydrone_sim::Scene;

use crate::scheduler::RenderTarget;

/// Stands in for the 3D renderer: reports the scene every `log_every` frames.
pub struct LogRenderer {
    scene: Rc<RefCell<Scene>>,
    log_every: u64,
    frames: u64,
}

impl LogRenderer {
    pub fn new(scene: Rc<RefCell<Scene>>, log_every: u64) -> Self {
        Self {
            scene,
            log_every: log_every.max(1),
            frames: 0,
        }
    }
}

impl RenderTarget for LogRenderer {
    fn render(&mut self) {
        self.frames += 1;
        if self.frames % self.log_every != 0 {
            return;
        }
        let scene = self.scene.borrow();
        let (Some(model), Some(camera)) = (scene.model(), scene.camera()) else {
            return;
        };
        info!(
            frame = self.frames,
            x = model.position.x,
            y = model.position.y,
            z = model.position.z,
            camera_x = camera.position.x,
            camera_z = camera.position.z,
            "render"
        );
    }
}
