use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use log::{info, warn};
use tokio::io::{AsyncBufReadExt, BufReader};

use yorick_device::{
    ACTION_GROUP_DIR, ActionStore, Advertisement, CommandChannel, CommandService, DEVICE_NAME,
    MotionExecutor, NotifySink, SimulatedBoard, gatt, yorick_home,
};

#[derive(Parser)]
#[command(name = "yorick-device")]
#[command(about = "Yorick robotic hand controller")]
struct Cli {
    /// Device home directory (default: $YORICK_HOME or ~/.yorick)
    #[arg(long)]
    home: Option<PathBuf>,

    /// Advertised device name
    #[arg(long, default_value = DEVICE_NAME)]
    name: String,

    /// Play action groups against the log with real timing instead of
    /// requiring the servo board
    #[arg(long)]
    simulate: bool,
}

/// Prints pushed responses; stands in for the BLE notify primitive.
struct StdoutSink;

impl NotifySink for StdoutSink {
    fn notify(&self, value: &[u8]) -> Result<(), String> {
        println!("<- {}", String::from_utf8_lossy(value));
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let home = cli.home.unwrap_or_else(yorick_home);
    let store = ActionStore::open(home.join(ACTION_GROUP_DIR));

    let executor = if cli.simulate {
        Some(MotionExecutor::new(Arc::new(SimulatedBoard)))
    } else {
        // The servo SDK only exists on the hand itself; without it, run
        // commands report failure instead of moving anything.
        warn!("no servo board attached; pass --simulate to play groups against the log");
        None
    };

    let service = CommandService::new(store, executor);
    let channel = CommandChannel::new(service, Box::new(StdoutSink));

    // The console takes the place of a subscribed BLE client, so every
    // response is pushed straight to stdout.
    channel.on_subscribe_write(&gatt::ENABLE_NOTIFICATIONS);

    let advert = Advertisement::new(cli.name);
    info!("device name: {}", advert.local_name);
    info!("advertised services: {:?}", advert.service_uuids);
    info!("command characteristic: {}", gatt::COMMAND_UUID);
    info!("response characteristic: {}", gatt::RESPONSE_UUID);

    println!("Type JSON commands, one per line (ctrl-d to exit).");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        channel.on_command_write(line.as_bytes());
    }

    Ok(())
}
