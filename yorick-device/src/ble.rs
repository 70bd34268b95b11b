//! Transport adapter between the dispatcher and the BLE stack
//!
//! The BLE layer owns advertising, connections, and characteristic
//! plumbing; it calls into this adapter with raw command writes and reads
//! the response buffer back. Push notifications go through whatever
//! `NotifySink` the transport provides.

use std::sync::Mutex;

use log::{error, warn};

use yorick_proto::ble::{
    APPEARANCE, DEVICE_INFO_SERVICE_UUID, ENABLE_NOTIFICATIONS, SERVICE_UUID,
};

use crate::service::CommandService;

/// Push side of the response characteristic, implemented by the BLE stack.
pub trait NotifySink: Send + Sync {
    fn notify(&self, value: &[u8]) -> Result<(), String>;
}

/// Advertisement parameters for the BLE layer.
#[derive(Debug, Clone)]
pub struct Advertisement {
    pub local_name: String,
    pub service_uuids: Vec<&'static str>,
    pub appearance: u16,
}

impl Advertisement {
    pub fn new(local_name: impl Into<String>) -> Self {
        Self {
            local_name: local_name.into(),
            service_uuids: vec![SERVICE_UUID, DEVICE_INFO_SERVICE_UUID],
            appearance: APPEARANCE,
        }
    }
}

struct ChannelState {
    response: Vec<u8>,
    subscribe: [u8; 2],
}

/// The command/response channel: write sink, response buffer, subscription
/// flag. One instance per GATT service; the buffer and flag share one lock
/// because the transport may deliver events from more than one source.
pub struct CommandChannel {
    service: CommandService,
    sink: Box<dyn NotifySink>,
    state: Mutex<ChannelState>,
}

impl CommandChannel {
    pub fn new(service: CommandService, sink: Box<dyn NotifySink>) -> Self {
        Self {
            service,
            sink,
            state: Mutex::new(ChannelState {
                response: Vec::new(),
                subscribe: [0x00, 0x00],
            }),
        }
    }

    /// Command-characteristic write handler. Structured commands update the
    /// response buffer; everything else is already handled (or dropped) by
    /// the dispatcher and leaves the buffer untouched.
    pub fn on_command_write(&self, payload: &[u8]) {
        let Some(response) = self.service.handle(payload) else {
            return;
        };
        let encoded = match serde_json::to_vec(&response) {
            Ok(bytes) => bytes,
            Err(e) => {
                error!("failed to encode response: {e}");
                return;
            }
        };

        let push = {
            let Ok(mut state) = self.state.lock() else {
                return;
            };
            state.response = encoded.clone();
            state.subscribe == ENABLE_NOTIFICATIONS
        };

        // Never wait on the transport: a failed push is logged and the
        // value stays readable.
        if push {
            if let Err(e) = self.sink.notify(&encoded) {
                warn!("notify failed: {e}");
            }
        }
    }

    /// Response-characteristic read handler. Empty until the first
    /// structured command completes.
    pub fn read_response(&self) -> Vec<u8> {
        self.state
            .lock()
            .map(|state| state.response.clone())
            .unwrap_or_default()
    }

    /// Subscription control-point write handler. Exactly
    /// `ENABLE_NOTIFICATIONS` turns push on; any other value turns it off.
    pub fn on_subscribe_write(&self, value: &[u8]) {
        let mut stored = [0x00, 0x00];
        for (slot, byte) in stored.iter_mut().zip(value) {
            *slot = *byte;
        }
        if let Ok(mut state) = self.state.lock() {
            state.subscribe = stored;
        }
    }

    /// Subscription control-point read handler: the last written value.
    pub fn read_subscribe(&self) -> [u8; 2] {
        self.state
            .lock()
            .map(|state| state.subscribe)
            .unwrap_or([0x00, 0x00])
    }

    pub fn notifications_enabled(&self) -> bool {
        self.read_subscribe() == ENABLE_NOTIFICATIONS
    }
}
