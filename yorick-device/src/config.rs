//! Device configuration - home directory and identity defaults

use std::fs;
use std::path::PathBuf;

/// Default advertised device name.
pub const DEVICE_NAME: &str = "Yorick";

/// Directory under the device home that holds action-group records.
pub const ACTION_GROUP_DIR: &str = "action_groups";

/// Get the YORICK_HOME directory, creating it if needed
pub fn yorick_home() -> PathBuf {
    let home = std::env::var("YORICK_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            dirs::home_dir()
                .expect("no home directory")
                .join(".yorick")
        });

    if !home.exists() {
        fs::create_dir_all(&home).expect("failed to create YORICK_HOME");
    }

    home
}
