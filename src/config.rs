// Timeouts, gearing, gains and per-module configuration
use std::f64::consts::PI;
use std::time::Duration;

use serde::{Deserialize, Serialize};

// Control loop frequency expected from the host
pub const LOOP_HZ: u64 = 50;

// Command timeout for the stale-command watchdog
pub const CMD_TIMEOUT: Duration = Duration::from_millis(250);

/// Bound on the calibration wait for a fresh absolute-encoder sample
pub const ABS_SENSOR_TIMEOUT: Duration = Duration::from_millis(250);

/// Maximum drive speed in m/s
pub const MAX_SPEED_MPS: f64 = 4.5;

/// Fraction of max speed below which steering holds its last angle
pub const STEER_DEADBAND_FRACTION: f64 = 0.01;

// Gearing (MK4i L2 modules, 4-inch wheels)
pub const DRIVE_GEAR_RATIO: f64 = 6.75;
pub const STEER_GEAR_RATIO: f64 = 150.0 / 7.0;
pub const WHEEL_CIRCUMFERENCE_M: f64 = 0.1016 * PI;

// Drive feedforward gains: volts, volts per m/s, volts per m/s^2
pub const DRIVE_KS: f64 = 0.32;
pub const DRIVE_KV: f64 = 1.51;
pub const DRIVE_KA: f64 = 0.27;

// Steering position PID gains, uploaded to the motor controller by the
// device layer
pub const STEER_KP: f64 = 0.01;
pub const STEER_KI: f64 = 0.0;
pub const STEER_KD: f64 = 0.0;
pub const STEER_KFF: f64 = 0.0;

/// Steering motor current limit in amps
pub const STEER_CURRENT_LIMIT_A: u32 = 25;

/// Per-module configuration, fixed for the life of the module
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ModuleConstants {
    /// Index of the module within the drivetrain (0 = front left, going
    /// counter-clockwise)
    pub index: u8,
    pub drive_id: u8,
    pub steer_id: u8,
    pub encoder_id: u8,
    /// Absolute-encoder reading, in degrees, when the wheel faces true zero
    pub angle_offset_deg: f64,
    pub drive_gear_ratio: f64,
    pub steer_gear_ratio: f64,
    pub wheel_circumference_m: f64,
}

impl ModuleConstants {
    /// Constants for a module using the default gearing
    pub fn with_default_gearing(
        index: u8,
        drive_id: u8,
        steer_id: u8,
        encoder_id: u8,
        angle_offset_deg: f64,
    ) -> Self {
        Self {
            index,
            drive_id,
            steer_id,
            encoder_id,
            angle_offset_deg,
            drive_gear_ratio: DRIVE_GEAR_RATIO,
            steer_gear_ratio: STEER_GEAR_RATIO,
            wheel_circumference_m: WHEEL_CIRCUMFERENCE_M,
        }
    }
}

/// Drivetrain-wide tuning shared by every module
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Tuning {
    pub max_speed_mps: f64,
    pub deadband_fraction: f64,
    pub drive_ks: f64,
    pub drive_kv: f64,
    pub drive_ka: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            max_speed_mps: MAX_SPEED_MPS,
            deadband_fraction: STEER_DEADBAND_FRACTION,
            drive_ks: DRIVE_KS,
            drive_kv: DRIVE_KV,
            drive_ka: DRIVE_KA,
        }
    }
}
