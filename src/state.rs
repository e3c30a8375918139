// Value types exchanged between the control-loop host and a module

use serde::{Deserialize, Serialize};

// Desired state from the drivetrain -> module, or measured state back.
// derive macro auto-implements print/debug, cloning, and (de)serialization
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct ModuleState {
    /// Signed wheel speed in m/s
    pub speed_mps: f64,
    /// Wheel heading in degrees
    pub angle_deg: f64,
}

impl ModuleState {
    pub fn new(speed_mps: f64, angle_deg: f64) -> Self {
        Self {
            speed_mps,
            angle_deg,
        }
    }

    /// Zero-speed state at zero heading
    pub fn stopped() -> Self {
        Self::default()
    }
}

/// Accumulated travel of one module, consumed by odometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct ModulePosition {
    /// Signed accumulated wheel travel in meters
    pub distance_m: f64,
    /// Wheel heading in degrees
    pub angle_deg: f64,
}
