//! Yorick wire protocol - command and response types
//!
//! The remote client writes UTF-8 JSON commands to the command
//! characteristic and the device answers with UTF-8 JSON on the response
//! characteristic. This crate owns that vocabulary and the decode boundary;
//! transports treat payloads as opaque bytes.

pub mod ble;

use serde::{Deserialize, Serialize};

/// One timed servo pose within an action group.
///
/// Field names match the device schema used by the recording tooling, so a
/// step serializes identically on the wire and on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionStep {
    /// Milliseconds to spend reaching this pose.
    #[serde(rename = "Time")]
    pub time: u32,
    #[serde(rename = "Servo1")]
    pub servo1: i32,
    #[serde(rename = "Servo2")]
    pub servo2: i32,
    #[serde(rename = "Servo3")]
    pub servo3: i32,
    #[serde(rename = "Servo4")]
    pub servo4: i32,
    #[serde(rename = "Servo5")]
    pub servo5: i32,
    #[serde(rename = "Servo6")]
    pub servo6: i32,
}

/// A command decoded from a command-characteristic write.
///
/// Field validation (missing name, empty step list) is the dispatcher's
/// job; decode only rejects payloads that are not structured commands at
/// all, so the plain-text fallback can take them.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    ListAvailableActionGroups,
    RunActionGroup {
        name: Option<String>,
    },
    SaveActionGroup {
        name: Option<String>,
        action_group: Option<Vec<ActionStep>>,
    },
    /// A JSON envelope whose `type` nobody recognizes; carries the rendered
    /// `type` value for the error message.
    Unknown(String),
}

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("payload is not a JSON object")]
    NotAnObject,
    #[error("malformed action_group steps: {0}")]
    Steps(serde_json::Error),
}

impl Command {
    /// Decode a raw write payload into a command.
    ///
    /// Errors mean "not a structured command" - the caller routes those to
    /// the legacy plain-text path and produces no response.
    pub fn decode(payload: &[u8]) -> Result<Self, DecodeError> {
        let value: serde_json::Value = serde_json::from_slice(payload)?;
        let Some(obj) = value.as_object() else {
            return Err(DecodeError::NotAnObject);
        };

        match obj.get("type").and_then(serde_json::Value::as_str) {
            Some("list_available_action_groups") => Ok(Command::ListAvailableActionGroups),
            Some("run_action_group") => Ok(Command::RunActionGroup {
                name: string_field(obj, "name"),
            }),
            Some("save_action_group") => {
                let action_group = match obj.get("action_group") {
                    None | Some(serde_json::Value::Null) => None,
                    Some(steps) => {
                        Some(serde_json::from_value(steps.clone()).map_err(DecodeError::Steps)?)
                    }
                };
                Ok(Command::SaveActionGroup {
                    name: string_field(obj, "name"),
                    action_group,
                })
            }
            _ => Ok(Command::Unknown(type_label(obj))),
        }
    }
}

fn string_field(
    obj: &serde_json::Map<String, serde_json::Value>,
    key: &str,
) -> Option<String> {
    obj.get(key)
        .and_then(serde_json::Value::as_str)
        .map(str::to_string)
}

/// Render the `type` field for the unknown-command message: strings
/// verbatim, other values as JSON, an absent field as `none`.
fn type_label(obj: &serde_json::Map<String, serde_json::Value>) -> String {
    match obj.get("type") {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => "none".to_string(),
    }
}

/// A response ready to be encoded onto the response characteristic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Response {
    ActionGroupsList {
        action_groups: Vec<String>,
        success: bool,
    },
    ActionGroupResult {
        action_name: String,
        success: bool,
        message: String,
    },
    ActionGroupSaved {
        action_name: String,
        success: bool,
        message: String,
        steps_count: usize,
    },
    Error {
        message: String,
        success: bool,
    },
}

impl Response {
    pub fn list(action_groups: Vec<String>) -> Self {
        Self::ActionGroupsList {
            action_groups,
            success: true,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
            success: false,
        }
    }
}
