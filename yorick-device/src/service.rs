//! Command dispatch - decode, route, respond
//!
//! Stateless between commands. Every write ends one of three ways: a
//! structured response, a silently handled plain-text instruction, or a
//! logged no-op. Nothing here may panic or block on motion.

use log::{debug, info, warn};

use yorick_proto::{ActionStep, Command, Response};

use crate::executor::MotionExecutor;
use crate::store::ActionStore;

pub struct CommandService {
    store: ActionStore,
    executor: Option<MotionExecutor>,
}

impl CommandService {
    /// `executor` is resolved once at startup: `None` means no servo board
    /// is available and run commands will report failure.
    pub fn new(store: ActionStore, executor: Option<MotionExecutor>) -> Self {
        Self { store, executor }
    }

    /// Handle one command-characteristic write. `None` means the payload
    /// was not a structured command and no response should be published.
    pub fn handle(&self, payload: &[u8]) -> Option<Response> {
        match Command::decode(payload) {
            Ok(command) => Some(self.dispatch(command)),
            Err(e) => {
                debug!("not a structured command: {e}");
                self.fallback(payload);
                None
            }
        }
    }

    fn dispatch(&self, command: Command) -> Response {
        match command {
            Command::ListAvailableActionGroups => Response::list(self.store.list()),
            Command::RunActionGroup { name } => self.run(name),
            Command::SaveActionGroup { name, action_group } => self.save(name, action_group),
            Command::Unknown(type_value) => {
                Response::error(format!("Unknown command type: {type_value}"))
            }
        }
    }

    fn run(&self, name: Option<String>) -> Response {
        let Some(name) = name.filter(|n| !n.is_empty()) else {
            return Response::error("Missing 'name' parameter for run_action_group command");
        };

        let available = self.store.list();
        if !available.iter().any(|n| n == &name) {
            return Response::error(format!(
                "Action group '{}' not found. Available: {}",
                name,
                available.join(", ")
            ));
        }

        let started = match self.store.load(&name) {
            Ok(group) => match &self.executor {
                Some(executor) => executor.start(group),
                None => {
                    warn!("cannot run action group '{name}': no servo board available");
                    false
                }
            },
            Err(e) => {
                warn!("cannot run action group '{name}': {e}");
                false
            }
        };

        Response::ActionGroupResult {
            action_name: name.clone(),
            success: started,
            message: if started {
                format!("Action group '{name}' started successfully")
            } else {
                format!("Action group '{name}' failed to start")
            },
        }
    }

    fn save(&self, name: Option<String>, steps: Option<Vec<ActionStep>>) -> Response {
        let Some(name) = name.filter(|n| !n.is_empty()) else {
            return Response::error("Missing 'name' parameter for save_action_group command");
        };
        let Some(steps) = steps.filter(|s| !s.is_empty()) else {
            return Response::error(
                "Missing 'action_group' parameter for save_action_group command",
            );
        };

        match self.store.save(&name, &steps) {
            Ok(count) => Response::ActionGroupSaved {
                action_name: name.clone(),
                success: true,
                message: format!("Action group '{name}' created successfully with {count} steps"),
                steps_count: count,
            },
            Err(e) => Response::ActionGroupSaved {
                action_name: name.clone(),
                success: false,
                message: format!("Failed to create action group '{name}': {e}"),
                steps_count: 0,
            },
        }
    }

    /// Legacy plain-text control mode: best effort, no response object.
    fn fallback(&self, payload: &[u8]) {
        let Ok(text) = std::str::from_utf8(payload) else {
            warn!("discarding {}-byte non-UTF-8 write", payload.len());
            return;
        };
        let line = text.trim();
        info!("plain text command: {line}");
        if let Some(executor) = &self.executor {
            executor.direct(line);
        }
    }
}
