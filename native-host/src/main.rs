mod dispatcher;
mod messages;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use notes_engine::NoteWriter;
use tracing::{Level, debug, error, info};
use utils::logging::{self, Component, LogConfig};
use utils::native_messaging::NativeMessenger;

use crate::dispatcher::Dispatcher;

/// Native messaging host that saves notes sent by the browser extension into
/// a local vault.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory for log files
    #[arg(long = "log-dir", value_name = "DIR")]
    log_dir: Option<PathBuf>,

    /// Set log level
    #[arg(long = "log-level", value_name = "LEVEL",
          value_parser = ["trace", "debug", "info", "warn", "error"],
          default_value = "info")]
    log_level: String,

    /// Also log to stderr
    #[arg(long = "console-log")]
    console_log: bool,

    /// Parent window handle, passed by Chrome on Windows
    #[arg(long = "parent-window", value_name = "HANDLE", hide = true)]
    parent_window: Option<String>,

    /// Arguments the browser appends: the caller origin (Chrome) or the
    /// manifest path and extension id (Firefox)
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
    caller: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut log_config = LogConfig {
        component: Component::NativeHost,
        max_level: match cli.log_level.as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        },
        log_to_console: cli.console_log,
        ..Default::default()
    };
    if let Some(dir) = cli.log_dir {
        log_config.log_dir = dir;
    }

    // stdout belongs to the browser, so complain on stderr and keep going
    match logging::init_logging(log_config) {
        Ok(_) => {
            debug!("Logger initialized for {}", Component::NativeHost.as_str());
        }
        Err(e) => {
            eprintln!("Failed to initialize logger: {}", e);
        }
    }

    info!(
        "Native host started (caller: {:?}, parent window: {:?})",
        cli.caller, cli.parent_window
    );

    let dispatcher = Dispatcher::new(NoteWriter::default());
    let mut messenger = NativeMessenger::stdio();

    dispatcher
        .serve(&mut messenger)
        .inspect_err(|e| error!("Native messaging failed: {}", e))
        .context("native messaging stream failed")
}
