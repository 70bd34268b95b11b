//! BLE GATT protocol constants for the hand-controller service
//!
//! UUIDs and advertisement parameters shared between the device library and
//! whichever BLE stack hosts the service.

/// Command service UUID.
pub const SERVICE_UUID: &str = "12345678-1234-5678-1234-56789abcdef0";

/// Command characteristic UUID (write).
pub const COMMAND_UUID: &str = "12345678-1234-5678-1234-56789abcdef1";

/// Response characteristic UUID (read/notify).
pub const RESPONSE_UUID: &str = "12345678-1234-5678-1234-56789abcdef2";

/// Generic device-information service UUID, advertised alongside the command
/// service. Full 128-bit form for consistency with the custom UUIDs.
pub const DEVICE_INFO_SERVICE_UUID: &str = "0000180A-0000-1000-8000-00805f9b34fb";

/// Advertised appearance value.
pub const APPEARANCE: u16 = 0x0340;

/// Subscription control-point value that enables response notifications.
/// Any other written value disables them.
pub const ENABLE_NOTIFICATIONS: [u8; 2] = [0x01, 0x00];
