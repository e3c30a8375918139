// Absolute-angle calibration for the steering axis.
//
// The relative steering encoder powers up at an arbitrary zero. Calibration
// reads the absolute sensor, subtracts the module's configured offset and
// writes the result into the relative encoder so that zero raw position means
// true zero heading.

use std::time::Duration;

use tracing::warn;

use super::conversions::degrees_to_raw_position;
use super::hardware::{AbsoluteAngleSensor, AbsoluteReading, Result};

/// Read the absolute steering angle in degrees, waiting up to `timeout` for
/// a fresh sample. A stale sample is used anyway rather than stalling the
/// caller; it is logged at warn level.
pub fn read_absolute_degrees<A: AbsoluteAngleSensor>(
    sensor: &mut A,
    timeout: Duration,
    index: u8,
) -> Result<f64> {
    let AbsoluteReading { rotations, fresh } = sensor.read_with_timeout(timeout)?;
    if !fresh {
        warn!(
            "Module {}: no fresh absolute sample within {:?}, calibrating from last reading",
            index, timeout
        );
    }
    Ok(rotations * 360.0)
}

/// Compute the raw relative-encoder value that corresponds to true zero
/// heading, given the measured absolute angle and the configured offset.
pub fn steering_zero_raw(absolute_deg: f64, offset_deg: f64, steer_gear_ratio: f64) -> f64 {
    degrees_to_raw_position(absolute_deg - offset_deg, steer_gear_ratio)
}
