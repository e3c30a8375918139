// Steering target selection: shortest-path optimization and anti-jitter hold.
//
// The steering position controller tracks accumulated shaft rotation and does
// not wrap across +/-180 deg, so targets must be chosen in its unwrapped
// domain: the nearest equivalent heading to the measured angle, reversing
// drive direction whenever that halves the move. A wheel never has to turn
// more than 90 deg to reach any heading.

use crate::state::ModuleState;

/// Reduce an angle to the canonical (-180, 180] degree range.
pub fn wrap_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    if wrapped > 180.0 { wrapped - 360.0 } else { wrapped }
}

/// Choose the steering target closest to `current_angle_deg` that is
/// equivalent to the desired heading, negating the drive speed when the
/// target is flipped by 180 deg.
///
/// `current_angle_deg` is the measured angle in the controller's unwrapped
/// domain and the returned angle lives in the same domain, within 90 deg of
/// the input. A delta of exactly 90 deg is taken as-is, without flipping.
pub fn optimize(desired: ModuleState, current_angle_deg: f64) -> ModuleState {
    // Nearest equivalent of the desired heading, possibly several turns out
    let delta = wrap_degrees(desired.angle_deg - current_angle_deg);
    let target_deg = current_angle_deg + delta;

    if delta.abs() > 90.0 {
        ModuleState {
            speed_mps: -desired.speed_mps,
            angle_deg: if delta > 0.0 {
                target_deg - 180.0
            } else {
                target_deg + 180.0
            },
        }
    } else {
        ModuleState {
            speed_mps: desired.speed_mps,
            angle_deg: target_deg,
        }
    }
}

/// Pick the angle to command: below `deadband_fraction` of max speed the
/// previous angle is held so sensor noise cannot make the wheel oscillate
/// while it is essentially stopped.
pub fn apply_deadband(
    desired: ModuleState,
    last_angle_deg: f64,
    max_speed_mps: f64,
    deadband_fraction: f64,
) -> f64 {
    if desired.speed_mps.abs() <= max_speed_mps * deadband_fraction {
        last_angle_deg
    } else {
        desired.angle_deg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-9;

    #[test]
    fn test_wrap_degrees() {
        assert_eq!(wrap_degrees(0.0), 0.0);
        assert_eq!(wrap_degrees(170.0), 170.0);
        assert_eq!(wrap_degrees(180.0), 180.0);
        assert_eq!(wrap_degrees(-180.0), 180.0);
        assert_eq!(wrap_degrees(190.0), -170.0);
        assert_eq!(wrap_degrees(250.0), -110.0);
        assert_eq!(wrap_degrees(360.0), 0.0);
        assert_eq!(wrap_degrees(-450.0), -90.0);
        assert_eq!(wrap_degrees(720.0 + 45.0), 45.0);
    }

    #[test]
    fn test_optimize_short_move_unchanged() {
        let optimized = optimize(ModuleState::new(2.0, 30.0), 0.0);
        assert!((optimized.angle_deg - 30.0).abs() < TOL);
        assert!((optimized.speed_mps - 2.0).abs() < TOL);
    }

    #[test]
    fn test_optimize_flips_long_move() {
        // Desired 1.0 m/s at 170 deg while the wheel measures -80 deg: the
        // short way is -10 deg driven backwards.
        let optimized = optimize(ModuleState::new(1.0, 170.0), -80.0);
        assert!(
            (optimized.angle_deg - -10.0).abs() < TOL,
            "expected -10 deg, got {}",
            optimized.angle_deg
        );
        assert!((optimized.speed_mps - -1.0).abs() < TOL);
        assert!((optimized.angle_deg - -80.0).abs() <= 90.0 + TOL);
    }

    #[test]
    fn test_optimize_respects_unwrapped_domain() {
        // A controller sitting at two full turns plus 10 deg must get a
        // target near 730, not near the wrapped equivalent.
        let optimized = optimize(ModuleState::new(1.0, 15.0), 730.0);
        assert!((optimized.angle_deg - 735.0).abs() < TOL);
        assert!((optimized.speed_mps - 1.0).abs() < TOL);
    }

    #[test]
    fn test_optimize_bound_and_sign() {
        // Whatever the inputs, the chosen target stays within 90 deg of the
        // current angle and the speed sign records whether it flipped.
        for desired_deg in (-360..=360).step_by(15) {
            for current_deg in (-720..=720).step_by(37) {
                let desired = ModuleState::new(1.5, desired_deg as f64);
                let current = current_deg as f64;
                let optimized = optimize(desired, current);

                let move_deg = (optimized.angle_deg - current).abs();
                assert!(
                    move_deg <= 90.0 + TOL,
                    "move of {} deg for desired={} current={}",
                    move_deg,
                    desired_deg,
                    current
                );

                let heading_delta = wrap_degrees(optimized.angle_deg - desired.angle_deg).abs();
                if optimized.speed_mps < 0.0 {
                    assert!(
                        (heading_delta - 180.0).abs() < TOL,
                        "flipped speed without 180 deg heading change"
                    );
                } else {
                    assert!(
                        heading_delta < TOL,
                        "unflipped speed but heading moved by {}",
                        heading_delta
                    );
                }
            }
        }
    }

    #[test]
    fn test_optimize_idempotent() {
        for desired_deg in (-360..=360).step_by(45) {
            let first = optimize(ModuleState::new(1.0, desired_deg as f64), -80.0);
            let second = optimize(first, -80.0);
            assert!((second.angle_deg - first.angle_deg).abs() < TOL);
            assert!((second.speed_mps - first.speed_mps).abs() < TOL);
        }
    }

    #[test]
    fn test_optimize_exact_ninety_does_not_flip() {
        let optimized = optimize(ModuleState::new(1.0, 90.0), 0.0);
        assert!((optimized.angle_deg - 90.0).abs() < TOL);
        assert!((optimized.speed_mps - 1.0).abs() < TOL);
    }

    #[test]
    fn test_optimize_zero_speed_still_picks_near_angle() {
        let optimized = optimize(ModuleState::new(0.0, 175.0), 0.0);
        assert!((optimized.angle_deg - -5.0).abs() < TOL);
        assert_eq!(optimized.speed_mps, 0.0);
    }

    #[test]
    fn test_deadband_holds_at_low_speed() {
        let desired = ModuleState::new(0.04, 45.0);
        // 0.04 m/s is below 1% of 4.5 m/s
        let angle = apply_deadband(desired, -20.0, 4.5, 0.01);
        assert_eq!(angle, -20.0);

        // Exactly at the threshold still holds
        let at_threshold = ModuleState::new(0.045, 45.0);
        assert_eq!(apply_deadband(at_threshold, -20.0, 4.5, 0.01), -20.0);
    }

    #[test]
    fn test_deadband_passes_at_speed() {
        let desired = ModuleState::new(0.05, 45.0);
        let angle = apply_deadband(desired, -20.0, 4.5, 0.01);
        assert_eq!(angle, 45.0);

        let reverse = ModuleState::new(-2.0, 45.0);
        assert_eq!(apply_deadband(reverse, -20.0, 4.5, 0.01), 45.0);
    }
}
