// Control library for independently steerable drive wheels ("swerve" modules)
//
// Computes and applies per-wheel steering and drive setpoints, and calibrates
// each module's steering angle against a magnetic absolute encoder. All device
// I/O sits behind the traits in `module::hardware`; a periodic host calls
// `SwerveModule::set_desired_state` once per control cycle.

pub mod config;
pub mod module;
pub mod state;
pub mod watchdog;

pub use module::{ModuleError, SwerveModule};
pub use state::{ModulePosition, ModuleState};
pub use watchdog::{CommandWatchdog, ModuleHealth};
