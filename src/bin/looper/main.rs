//! looper - terminal chord progression looper
//!
//! Run with: cargo run --bin looper
//! Logs go to `looper.log`; set RUST_LOG to change the level.

mod app;
mod engine;
mod ui;

use std::fs::File;
use std::sync::Mutex;

use app::Looper;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    // The terminal belongs to the UI, so logs go to a file
    let log_file = File::create("looper.log")?;
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(Mutex::new(log_file)).with_ansi(false))
        .with(
            EnvFilter::from_default_env()
                .add_directive("chord_looper=info".parse()?)
                .add_directive("looper=info".parse()?),
        )
        .init();

    tracing::info!("Starting looper");

    Looper::new()
        .bpm(96.0)
        .key("C")
        .progression(&[1, 6, 4, 5])
        .run()
}
