// Per-module controller for one steerable drive wheel.
//
// Combines the steering math and unit conversions with the hardware
// abstraction to turn desired states into actuator setpoints, and owns the
// module's runtime state (last commanded angle).

use tracing::{debug, info};

use super::calibration::{read_absolute_degrees, steering_zero_raw};
use super::conversions::{
    mps_to_raw_velocity, raw_position_to_degrees, raw_position_to_meters, raw_velocity_to_mps,
};
use super::hardware::{AbsoluteAngleSensor, ActuatorError, DriveActuator, SteeringActuator};
use super::steering::{apply_deadband, optimize};
use crate::config::{ABS_SENSOR_TIMEOUT, ModuleConstants, Tuning};
use crate::state::{ModulePosition, ModuleState};

/// Errors from module construction or control-cycle I/O
#[derive(Debug, thiserror::Error)]
pub enum ModuleError {
    #[error("Module {index}: {name} must be positive, got {value}")]
    InvalidConstant {
        index: u8,
        name: &'static str,
        value: f64,
    },

    #[error(transparent)]
    Actuator(#[from] ActuatorError),
}

/// Controller for one swerve module
pub struct SwerveModule<D, S, A> {
    constants: ModuleConstants,
    tuning: Tuning,
    drive: D,
    steering: S,
    encoder: A,
    last_angle_deg: f64,
}

impl<D, S, A> SwerveModule<D, S, A>
where
    D: DriveActuator,
    S: SteeringActuator,
    A: AbsoluteAngleSensor,
{
    /// Create a module, calibrate its steering encoder against the absolute
    /// sensor and seed the commanded angle from the measured angle so the
    /// first deadband hold does not move the wheel.
    pub fn new(
        constants: ModuleConstants,
        tuning: Tuning,
        drive: D,
        steering: S,
        encoder: A,
    ) -> Result<Self, ModuleError> {
        let index = constants.index;
        ensure_positive(index, "drive_gear_ratio", constants.drive_gear_ratio)?;
        ensure_positive(index, "steer_gear_ratio", constants.steer_gear_ratio)?;
        ensure_positive(index, "wheel_circumference_m", constants.wheel_circumference_m)?;
        ensure_positive(index, "max_speed_mps", tuning.max_speed_mps)?;

        let mut module = Self {
            constants,
            tuning,
            drive,
            steering,
            encoder,
            last_angle_deg: 0.0,
        };
        module.reset_to_absolute()?;
        // Accumulated travel starts at zero
        module.drive.zero_position(0.0)?;
        module.last_angle_deg = module.angle_deg()?;

        info!(
            "Module {} initialized at {:.1} deg",
            index, module.last_angle_deg
        );
        Ok(module)
    }

    /// Run one control cycle: optimize the desired state against the
    /// measured angle, then command steering and drive.
    pub fn set_desired_state(
        &mut self,
        desired: ModuleState,
        open_loop: bool,
    ) -> Result<(), ModuleError> {
        // The onboard position controller does not wrap across +/-180 deg,
        // so targets are picked in its unwrapped domain.
        let optimized = optimize(desired, self.angle_deg()?);
        self.set_angle(optimized)?;
        self.set_speed(optimized, open_loop)
    }

    fn set_angle(&mut self, desired: ModuleState) -> Result<(), ModuleError> {
        // Hold the previous angle at near-zero speed to prevent jittering
        let angle_deg = apply_deadband(
            desired,
            self.last_angle_deg,
            self.tuning.max_speed_mps,
            self.tuning.deadband_fraction,
        );

        self.steering.set_closed_loop_position(angle_deg)?;
        self.last_angle_deg = angle_deg;
        Ok(())
    }

    fn set_speed(&mut self, desired: ModuleState, open_loop: bool) -> Result<(), ModuleError> {
        if open_loop {
            let fraction = desired.speed_mps / self.tuning.max_speed_mps;
            self.drive.set_open_loop(fraction)?;
        } else {
            let raw_velocity = mps_to_raw_velocity(
                desired.speed_mps,
                self.constants.wheel_circumference_m,
                self.constants.drive_gear_ratio,
            );
            self.drive
                .set_closed_loop_velocity(raw_velocity, self.drive_feedforward(desired.speed_mps))?;
        }

        debug!(
            "Module {} command: {:.2} m/s at {:.1} deg (open_loop={})",
            self.constants.index, desired.speed_mps, self.last_angle_deg, open_loop
        );
        Ok(())
    }

    /// kS + kV model; the kA term is zero absent an acceleration reference
    fn drive_feedforward(&self, speed_mps: f64) -> f64 {
        let sign = if speed_mps == 0.0 {
            0.0
        } else {
            speed_mps.signum()
        };
        self.tuning.drive_ks * sign + self.tuning.drive_kv * speed_mps
    }

    /// Measured speed and heading of the wheel
    pub fn get_state(&mut self) -> Result<ModuleState, ModuleError> {
        let raw_velocity = self.drive.raw_velocity()?;
        Ok(ModuleState {
            speed_mps: raw_velocity_to_mps(
                raw_velocity,
                self.constants.wheel_circumference_m,
                self.constants.drive_gear_ratio,
            ),
            angle_deg: self.angle_deg()?,
        })
    }

    /// Accumulated travel and heading, for odometry
    pub fn get_position(&mut self) -> Result<ModulePosition, ModuleError> {
        let raw_position = self.drive.raw_position()?;
        Ok(ModulePosition {
            distance_m: raw_position_to_meters(
                raw_position,
                self.constants.wheel_circumference_m,
                self.constants.drive_gear_ratio,
            ),
            angle_deg: self.angle_deg()?,
        })
    }

    /// Re-zero the relative steering encoder from the absolute sensor.
    ///
    /// Blocks for up to the configured sensor timeout; safe to call on
    /// demand, but not meant for the steady-state control cycle.
    pub fn reset_to_absolute(&mut self) -> Result<(), ModuleError> {
        let absolute_deg = read_absolute_degrees(
            &mut self.encoder,
            ABS_SENSOR_TIMEOUT,
            self.constants.index,
        )?;
        let zero_raw = steering_zero_raw(
            absolute_deg,
            self.constants.angle_offset_deg,
            self.constants.steer_gear_ratio,
        );
        self.steering.zero_position(zero_raw)?;

        info!(
            "Module {} steering encoder zeroed ({:.1} deg absolute, offset {:.1} deg)",
            self.constants.index, absolute_deg, self.constants.angle_offset_deg
        );
        Ok(())
    }

    fn angle_deg(&mut self) -> Result<f64, ModuleError> {
        let raw = self.steering.raw_position()?;
        Ok(raw_position_to_degrees(raw, self.constants.steer_gear_ratio))
    }

    pub fn constants(&self) -> &ModuleConstants {
        &self.constants
    }
}

fn ensure_positive(index: u8, name: &'static str, value: f64) -> Result<(), ModuleError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ModuleError::InvalidConstant { index, name, value })
    }
}
