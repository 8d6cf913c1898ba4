//! Seeded pilot that generates control commands for the headless demo.
//!
//! Same seed = same command stream, so demo runs are reproducible.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use skydrone_core::commands::ControlCommand;
use skydrone_core::config::SimConfig;
use skydrone_core::enums::Direction;

/// Chance per decision of turning.
const TURN_CHANCE: f64 = 0.4;

/// Chance per decision of climbing or descending.
const CLIMB_CHANCE: f64 = 0.25;

/// Largest turn, in multiples of the configured step.
const MAX_TURN_STEPS: i32 = 6;

pub struct Autopilot {
    rng: ChaCha8Rng,
    /// Frames between decisions.
    interval: u64,
    azimuth_step_deg: f64,
    elevation_step: f64,
}

impl Autopilot {
    pub fn new(seed: u64, interval: u64, config: &SimConfig) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            interval: interval.max(1),
            azimuth_step_deg: config.azimuth_step_deg,
            elevation_step: config.elevation_step,
        }
    }

    /// Commands to apply before `frame`. Empty between decision frames.
    pub fn commands_for_frame(&mut self, frame: u64) -> Vec<ControlCommand> {
        if frame == 0 {
            return vec![ControlCommand::StartMoving {
                direction: Direction::Forward,
            }];
        }
        if frame % self.interval != 0 {
            return Vec::new();
        }

        let mut commands = Vec::new();

        let direction = Direction::ALL[self.rng.gen_range(0..Direction::ALL.len())];
        // Forward is released less often than the others are pressed.
        let held = match direction {
            Direction::Forward => self.rng.gen_bool(0.8),
            _ => self.rng.gen_bool(0.5),
        };
        commands.push(if held {
            ControlCommand::StartMoving { direction }
        } else {
            ControlCommand::StopMoving { direction }
        });

        if self.rng.gen_bool(TURN_CHANCE) {
            let steps = self.rng.gen_range(-MAX_TURN_STEPS..=MAX_TURN_STEPS);
            if steps != 0 {
                commands.push(ControlCommand::RotateAzimuth {
                    delta_deg: f64::from(steps) * self.azimuth_step_deg,
                });
            }
        }

        if self.rng.gen_bool(CLIMB_CHANCE) {
            let sign = if self.rng.gen_bool(0.5) { 1.0 } else { -1.0 };
            commands.push(ControlCommand::ChangeElevation {
                delta: sign * self.elevation_step,
            });
        }

        commands
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_takes_off_forward() {
        let mut pilot = Autopilot::new(1, 10, &SimConfig::default());
        assert_eq!(
            pilot.commands_for_frame(0),
            vec![ControlCommand::StartMoving {
                direction: Direction::Forward
            }]
        );
    }

    #[test]
    fn test_quiet_between_decisions() {
        let mut pilot = Autopilot::new(1, 10, &SimConfig::default());
        for frame in 1..10 {
            assert!(pilot.commands_for_frame(frame).is_empty());
        }
        assert!(!pilot.commands_for_frame(10).is_empty());
    }

    #[test]
    fn test_same_seed_same_commands() {
        let config = SimConfig::default();
        let mut a = Autopilot::new(99, 5, &config);
        let mut b = Autopilot::new(99, 5, &config);
        for frame in 0..500 {
            assert_eq!(a.commands_for_frame(frame), b.commands_for_frame(frame));
        }
    }

    #[test]
    fn test_turns_are_whole_steps() {
        let config = SimConfig::default();
        let mut pilot = Autopilot::new(7, 1, &config);
        for frame in 1..300 {
            for command in pilot.commands_for_frame(frame) {
                if let ControlCommand::RotateAzimuth { delta_deg } = command {
                    let steps = delta_deg / config.azimuth_step_deg;
                    assert!((steps - steps.round()).abs() < 1e-9);
                    assert!(steps.abs() <= f64::from(MAX_TURN_STEPS));
                }
            }
        }
    }
}
