//! Asynchronous playback of action groups on the servo board
//!
//! Playback is fire-and-forget: `start` hands the group to a dedicated
//! worker thread and reports only whether the hand-off happened. Board
//! failures mid-run are logged, since no response channel exists by then.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use log::{error, info, warn};

use crate::store::ActionGroup;

/// The servo hardware boundary.
///
/// Implementations drive the physical board; `play` blocks for the
/// duration of the motion and is always called off the command path.
pub trait ServoBoard: Send + Sync {
    fn play(&self, group: &ActionGroup) -> Result<(), String>;

    /// Best-effort direct instruction from the plain-text control mode.
    fn raw_command(&self, line: &str) -> Result<(), String> {
        let _ = line;
        Ok(())
    }
}

/// Runs action groups without blocking the command path.
pub struct MotionExecutor {
    board: Arc<dyn ServoBoard>,
}

impl MotionExecutor {
    pub fn new(board: Arc<dyn ServoBoard>) -> Self {
        Self { board }
    }

    /// Hand a group to a worker thread. Returns false only when the
    /// hand-off itself fails; the run outcome is never reported back.
    pub fn start(&self, group: ActionGroup) -> bool {
        info!("running action group {}", group.name);
        let board = self.board.clone();
        let name = group.name.clone();
        let spawned = thread::Builder::new()
            .name(format!("action-{name}"))
            .spawn(move || {
                if let Err(e) = board.play(&group) {
                    error!("action group '{}' failed: {e}", group.name);
                }
            });
        match spawned {
            Ok(_) => true,
            Err(e) => {
                error!("could not start worker for action group '{name}': {e}");
                false
            }
        }
    }

    /// Forward a plain-text instruction to the board.
    pub fn direct(&self, line: &str) {
        if let Err(e) = self.board.raw_command(line) {
            warn!("direct command '{line}' failed: {e}");
        }
    }
}

/// Plays groups against the log with real step timing. Stands in for the
/// servo bus on machines that do not have one.
pub struct SimulatedBoard;

impl ServoBoard for SimulatedBoard {
    fn play(&self, group: &ActionGroup) -> Result<(), String> {
        for step in &group.steps {
            thread::sleep(Duration::from_millis(u64::from(step.time)));
            info!(
                "{}: pose [{}, {}, {}, {}, {}, {}] over {}ms",
                group.name,
                step.servo1,
                step.servo2,
                step.servo3,
                step.servo4,
                step.servo5,
                step.servo6,
                step.time,
            );
        }
        Ok(())
    }

    fn raw_command(&self, line: &str) -> Result<(), String> {
        info!("direct command: {line}");
        Ok(())
    }
}
