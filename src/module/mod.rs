// Module control for one steerable drive wheel
//
// Provides:
// - Raw <-> physical unit conversions
// - Shortest-path steering optimization and anti-jitter hold
// - Absolute-angle calibration of the steering encoder
// - The per-module controller driving the hardware abstraction

mod calibration;
mod controller;
pub mod conversions;
pub mod hardware;
pub mod steering;

pub use controller::{ModuleError, SwerveModule};
pub use hardware::{
    AbsoluteAngleSensor, AbsoluteReading, ActuatorError, DriveActuator, SteeringActuator,
};
