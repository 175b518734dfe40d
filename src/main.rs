use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;

use dnd_core::config::BridgeConfig;
use dnd_core::DataContent;
use dnd_platform::adapters::ReplayDragManager;
use dnd_platform::replay::ReplayScript;
use dropbridge_lib::bootstrap::{init_tracing_subscriber, load_config};
use dropbridge_lib::{install, on_native_drag_and_drop};

#[derive(Parser)]
#[command(name = "dropbridge")]
#[command(about = "Native drag and drop bridge tools", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a recorded drag gesture through the bridge
    Replay {
        /// Replay script (JSON)
        script: PathBuf,
        /// Configuration file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Replay { script, config } => replay(script, config).await,
    }
}

async fn replay(script_path: PathBuf, config_path: Option<PathBuf>) -> Result<()> {
    let config = match config_path {
        Some(path) => load_config(&path)?,
        None => BridgeConfig::default(),
    };
    init_tracing_subscriber(&config).context("Failed to initialize tracing")?;

    let script = ReplayScript::load(&script_path)?;
    let manager = Arc::new(ReplayDragManager::new());
    let bridge = install(&config, manager.clone(), Arc::new(script.host()))?;

    println!("replay: {} event(s)", script.events.len());
    for args in &script.events {
        bridge.buffer().write_args(args)?;
        let handled = on_native_drag_and_drop();
        match bridge.buffer().take_response() {
            Ok(response) => println!("{args} -> {handled} {response}"),
            Err(_) => println!("{args} -> {handled}"),
        }
    }

    let Some(session) = manager.last_session() else {
        println!("\nno drag session started");
        return Ok(());
    };

    println!(
        "\nlast session: {} (allowed: {:?}, result: {:?})",
        session.source().id(),
        session.allowed_operations(),
        session.result()
    );
    for format in session.data().available_formats() {
        match session
            .data()
            .get_data(&format, CancellationToken::new())
            .await
        {
            Ok(content) => println!("- {format}: {}", describe(&content)),
            Err(err) => println!("- {format}: error: {err}"),
        }
    }

    println!("\nmanager calls: {:?}", manager.calls());

    Ok(())
}

fn describe(content: &DataContent) -> String {
    match content {
        DataContent::Text(text) => format!("{text:?}"),
        DataContent::WebLink(url) => url.to_string(),
        DataContent::StorageItems(items) => items
            .iter()
            .map(|item| item.name.as_str())
            .collect::<Vec<_>>()
            .join(", "),
        DataContent::Bitmap(stream) => format!(
            "{} ({})",
            stream.file().name,
            stream.content_type().unwrap_or("unknown type")
        ),
    }
}
