// Hardware abstraction for one swerve module.
//
// The controller only ever talks to these traits. Production implementations
// wrap the vendor motor-controller and encoder drivers (device configuration,
// bus I/O and fault recovery live there); tests use in-memory mocks.

use std::time::Duration;

/// Error types for actuator and sensor I/O
#[derive(Debug, thiserror::Error)]
pub enum ActuatorError {
    #[error("Device {id} not responding")]
    Unresponsive { id: u8 },

    #[error("Bus error on device {id}: {reason}")]
    Bus { id: u8, reason: String },

    #[error("Device {id} reported fault status: 0x{status:02X}")]
    Fault { id: u8, status: u8 },
}

pub type Result<T> = std::result::Result<T, ActuatorError>;

/// One absolute-encoder sample.
///
/// `fresh` is false when the sensor could not produce a sample newer than
/// previously observed within the wait bound, in which case `rotations`
/// carries the last available reading.
#[derive(Debug, Clone, Copy)]
pub struct AbsoluteReading {
    /// Absolute position in rotations, one rotation per steering revolution
    pub rotations: f64,
    pub fresh: bool,
}

/// Drive motor controller for one module
pub trait DriveActuator {
    /// Command an open-loop duty cycle in [-1, 1], no feedback.
    fn set_open_loop(&mut self, fraction: f64) -> Result<()>;

    /// Command a closed-loop velocity setpoint in raw units (shaft rot/s)
    /// with an additive feedforward in volts.
    fn set_closed_loop_velocity(
        &mut self,
        raw_velocity: f64,
        feedforward_volts: f64,
    ) -> Result<()>;

    /// Measured velocity in raw units (shaft rot/s).
    fn raw_velocity(&mut self) -> Result<f64>;

    /// Accumulated position in raw units (shaft rotations).
    fn raw_position(&mut self) -> Result<f64>;

    /// Overwrite the relative encoder position register.
    fn zero_position(&mut self, raw: f64) -> Result<()>;
}

/// Steering motor controller for one module
pub trait SteeringActuator {
    /// Command a closed-loop position setpoint in degrees. The onboard
    /// controller is non-continuous: it does not wrap across +/-180 deg.
    fn set_closed_loop_position(&mut self, degrees: f64) -> Result<()>;

    /// Accumulated position in raw units (shaft rotations).
    fn raw_position(&mut self) -> Result<f64>;

    /// Overwrite the relative encoder position register.
    fn zero_position(&mut self, raw: f64) -> Result<()>;
}

/// Magnetic absolute-position sensor on the steering axis
pub trait AbsoluteAngleSensor {
    /// Block for up to `timeout` waiting for a fresh sample. Timing out is
    /// not an error: the last available reading is returned with
    /// `fresh == false`.
    fn read_with_timeout(&mut self, timeout: Duration) -> Result<AbsoluteReading>;
}
