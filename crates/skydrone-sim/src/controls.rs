//! Applies pilot control commands to the vehicle.
//!
//! This is the input policy layer: it is where the elevation bounds live,
//! since the vehicle itself never clamps.

use tracing::debug;

use skydrone_core::commands::ControlCommand;
use skydrone_core::config::ElevationPolicy;
use skydrone_core::error::SimError;

use crate::vehicle::Vehicle;

/// Apply one command to the vehicle.
pub fn apply_command(
    vehicle: &mut Vehicle,
    command: &ControlCommand,
    policy: &ElevationPolicy,
) -> Result<(), SimError> {
    match *command {
        ControlCommand::StartMoving { direction } => vehicle.set_moving(direction, true),
        ControlCommand::StopMoving { direction } => vehicle.set_moving(direction, false),
        ControlCommand::RotateAzimuth { delta_deg } => vehicle.rotate_azimuth(delta_deg)?,
        ControlCommand::ChangeElevation { delta } => {
            if !delta.is_finite() {
                return Err(SimError::InvalidArgument {
                    name: "delta",
                    value: delta,
                });
            }
            let allowed = policy.clamp_delta(vehicle.elevation(), delta);
            if allowed == 0.0 && delta != 0.0 {
                debug!(
                    elevation = vehicle.elevation(),
                    delta, "elevation change blocked by policy"
                );
                return Ok(());
            }
            vehicle.change_elevation(allowed)?;
        }
    }
    Ok(())
}

/// Apply a batch of commands in order, stopping at the first error.
pub fn apply_commands<'a>(
    vehicle: &mut Vehicle,
    commands: impl IntoIterator<Item = &'a ControlCommand>,
    policy: &ElevationPolicy,
) -> Result<(), SimError> {
    for command in commands {
        apply_command(vehicle, command, policy)?;
    }
    Ok(())
}
