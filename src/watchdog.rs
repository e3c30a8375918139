// Stale-command watchdog for the control-loop host
// Note: without it, a crashed teleop stops sending desired states and the
// drivetrain keeps replaying the last command forever.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::state::ModuleState;

/// Health of the command stream feeding one module
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ModuleHealth {
    Ok,
    CmdStale,
}

/// Holds the latest desired state and substitutes a zero-speed hold when it
/// goes stale. Zero speed composes with the steering deadband: a stale
/// drivetrain keeps its wheel headings instead of snapping to zero.
pub struct CommandWatchdog {
    latest_cmd: Option<ModuleState>,
    cmd_received_at: Instant,
    timeout: Duration,
    health: ModuleHealth,
}

impl CommandWatchdog {
    pub fn new(timeout: Duration) -> Self {
        Self {
            latest_cmd: None,
            cmd_received_at: Instant::now(),
            timeout,
            health: ModuleHealth::CmdStale, // Start stale until first cmd
        }
    }

    /// Record an incoming desired state
    pub fn on_command(&mut self, cmd: ModuleState) {
        self.latest_cmd = Some(cmd);
        self.cmd_received_at = Instant::now();
    }

    /// Desired state for this cycle, based on watchdog state
    pub fn desired_state(&mut self) -> ModuleState {
        let cmd_age = self.cmd_received_at.elapsed();

        if cmd_age > self.timeout {
            // Watchdog triggered - stop the wheel, hold its heading
            if self.health != ModuleHealth::CmdStale {
                warn!("Command stale ({:?} old), holding zero speed", cmd_age);
            }
            self.health = ModuleHealth::CmdStale;
            ModuleState {
                speed_mps: 0.0,
                angle_deg: self.latest_cmd.map_or(0.0, |cmd| cmd.angle_deg),
            }
        } else if let Some(cmd) = self.latest_cmd {
            self.health = ModuleHealth::Ok;
            cmd
        } else {
            // No command ever received
            self.health = ModuleHealth::CmdStale;
            ModuleState::stopped()
        }
    }

    pub fn health(&self) -> ModuleHealth {
        self.health
    }
}
