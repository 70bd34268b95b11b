//! Yorick device library
//!
//! Building blocks for a BLE-controlled robotic hand: a store of named
//! motion recordings (action groups), a fire-and-forget motion executor,
//! the JSON command dispatcher, and the transport adapter the BLE stack
//! calls into.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use yorick_device::{
//!     ActionStore, CommandChannel, CommandService, MotionExecutor, SimulatedBoard,
//! };
//!
//! let store = ActionStore::open("/home/pi/.yorick/action_groups");
//! let executor = MotionExecutor::new(Arc::new(SimulatedBoard));
//! let service = CommandService::new(store, Some(executor));
//! let channel = CommandChannel::new(service, Box::new(my_ble_sink));
//!
//! // The BLE layer wires its characteristic callbacks to the channel:
//! // writes -> channel.on_command_write(bytes)
//! // reads  -> channel.read_response()
//! ```

mod ble;
mod config;
mod executor;
mod service;
mod store;

pub use ble::{Advertisement, CommandChannel, NotifySink};
pub use config::{ACTION_GROUP_DIR, DEVICE_NAME, yorick_home};
pub use executor::{MotionExecutor, ServoBoard, SimulatedBoard};
pub use service::CommandService;
pub use store::{ActionGroup, ActionStore, StoreError};

// Re-export the protocol so embedders need only this crate.
pub use yorick_proto::ble as gatt;
pub use yorick_proto::{ActionStep, Command, Response};
