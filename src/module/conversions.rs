// Unit conversions between motor-controller raw units and physical units.
//
// Raw position is motor-shaft rotations and raw velocity is motor-shaft
// rotations per second, as reported by the controller's relative encoder.
// A gear ratio is raw rotations per wheel (or steering) revolution, and the
// wheel circumference converts wheel revolutions to linear meters.

/// Convert raw drive velocity (shaft rot/s) to wheel speed in m/s.
pub fn raw_velocity_to_mps(raw: f64, wheel_circumference_m: f64, gear_ratio: f64) -> f64 {
    raw * wheel_circumference_m / gear_ratio
}

/// Convert wheel speed in m/s to raw drive velocity (shaft rot/s).
pub fn mps_to_raw_velocity(mps: f64, wheel_circumference_m: f64, gear_ratio: f64) -> f64 {
    mps * gear_ratio / wheel_circumference_m
}

/// Convert raw steering position (shaft rotations) to a heading in degrees.
pub fn raw_position_to_degrees(raw: f64, gear_ratio: f64) -> f64 {
    raw * 360.0 / gear_ratio
}

/// Convert a heading in degrees to raw steering position (shaft rotations).
pub fn degrees_to_raw_position(degrees: f64, gear_ratio: f64) -> f64 {
    degrees * gear_ratio / 360.0
}

/// Convert raw drive position (shaft rotations) to accumulated distance in
/// meters. Pure scale, no wraparound, so distance is monotonic in raw ticks.
pub fn raw_position_to_meters(raw: f64, wheel_circumference_m: f64, gear_ratio: f64) -> f64 {
    raw * wheel_circumference_m / gear_ratio
}
