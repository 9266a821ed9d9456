use clap::{Parser, Subcommand};
use item_rarity::commands::{execute, reload, test_distribution, CommandOutput, RarityCommand};
use item_rarity::config::{load_or_default, ConfigHandle, JsonFileStore};
use item_rarity::engine::{
    ApplicationEngine, Authority, Hotbar, Inventory, LogFeedback, ToolkitOutcome,
    ToolkitUseRequest,
};
use item_rarity::items::ItemStack;
use item_rarity::utils::{read_json, write_json};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::error::Error;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "itemrarity", version, about = "Rarity tiers for toolkit-enhanced items")]
struct Cli {
    /// Configuration file (default: ~/.itemrarity/itemrarity.json)
    #[arg(long, global = true, env = "ITEMRARITY_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Force a rarity onto an item file
    Set {
        rarity: String,
        #[arg(long)]
        item: PathBuf,
    },
    /// Re-read the configuration file and report what was loaded
    Reload,
    /// Sample a pool and print the observed distribution
    Test {
        #[arg(default_value_t = 10_000)]
        times: u64,
        /// Toolkit item code; the rarity weights are used when omitted
        #[arg(long)]
        toolkit: Option<String>,
        #[arg(long)]
        seed: Option<u64>,
        /// Also write the report to rarity_test_<timestamp>.json
        #[arg(long)]
        json: bool,
    },
    /// Use a toolkit on an item file
    Apply {
        #[arg(long)]
        toolkit: String,
        #[arg(long)]
        item: PathBuf,
        #[arg(long)]
        seed: Option<u64>,
        /// Only predict the outcome; the item file is not changed
        #[arg(long)]
        predict: bool,
    },
    /// Show an item's rarity, multipliers and effective stats
    #[command(alias = "itemdebug")]
    Stats {
        #[arg(long)]
        item: PathBuf,
    },
    /// Push the configuration to connected clients over WebSocket
    #[cfg(feature = "web")]
    Serve {
        #[arg(long, default_value = "127.0.0.1:42420")]
        addr: std::net::SocketAddr,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let store = match &cli.config {
        Some(path) => JsonFileStore::new(path),
        None => JsonFileStore::default_location()?,
    };

    if let Command::Reload = cli.command {
        let summary = reload(&ConfigHandle::default(), &store);
        println!("{}", CommandOutput::Reloaded(summary).to_text());
        return Ok(());
    }

    let handle = ConfigHandle::new(load_or_default(&store).config);

    match cli.command {
        Command::Reload => {}
        Command::Set { rarity, item } => {
            let mut stack = read_item(&item)?;
            let command = RarityCommand::Set { rarity };
            let output = execute(&command, &handle, &store, Some(&mut stack), &mut rng(None))?;
            write_json(&item, &stack)?;
            println!("{}", output.to_text());
        }
        Command::Test {
            times,
            toolkit,
            seed,
            json,
        } => {
            let report = test_distribution(&handle.snapshot(), times, toolkit.as_deref(), &mut rng(seed))?;
            println!("{}", report.to_text());
            if json {
                let filename = format!(
                    "rarity_test_{}.json",
                    chrono::Utc::now().format("%Y%m%d_%H%M%S")
                );
                std::fs::write(&filename, report.to_json())?;
                println!("JSON report saved to: {filename}");
            }
        }
        Command::Apply {
            toolkit,
            item,
            seed,
            predict,
        } => {
            let authority = if predict {
                Authority::Predictive
            } else {
                Authority::Authoritative
            };
            let engine = ApplicationEngine::new(handle, authority);
            let mut hotbar = Hotbar::new(2);
            hotbar.put(0, ItemStack::toolkit(&toolkit, 1));
            hotbar.put(1, read_item(&item)?);

            let outcome = engine.on_toolkit_used(
                ToolkitUseRequest::adjacent(0),
                &mut hotbar,
                &mut rng(seed),
                &mut LogFeedback,
            );
            match outcome {
                ToolkitOutcome::Consumed(e) => {
                    if let Some(stack) = hotbar.item_stack(1) {
                        write_json(&item, stack)?;
                    }
                    println!("Applied {} ({})", e.rarity_name, e.rarity_key);
                }
                ToolkitOutcome::Predicted(e) => {
                    println!("Predicted {} ({}), item unchanged", e.rarity_name, e.rarity_key);
                }
                ToolkitOutcome::Aborted { during, reason } => {
                    println!("Aborted during {during:?}: {reason:?}");
                }
            }
        }
        Command::Stats { item } => {
            let mut stack = read_item(&item)?;
            let output = execute(
                &RarityCommand::ItemDebug,
                &handle,
                &store,
                Some(&mut stack),
                &mut rng(None),
            )?;
            println!("{}", output.to_text());
        }
        #[cfg(feature = "web")]
        Command::Serve { addr } => serve(handle, store, addr)?,
    }
    Ok(())
}

fn rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn read_item(path: &Path) -> Result<ItemStack, Box<dyn Error>> {
    read_json(path)?
        .ok_or_else(|| Box::<dyn Error>::from(format!("item file not found: {}", path.display())))
}

/// Serve until interrupted; a `reload` line on stdin re-reads the file and
/// pushes it to every client.
#[cfg(feature = "web")]
fn serve(handle: ConfigHandle, store: JsonFileStore, addr: std::net::SocketAddr) -> std::io::Result<()> {
    use item_rarity::sync::{bind_sync_server, serve as serve_sync, SyncServer};
    use std::sync::Arc;
    use tokio::io::{AsyncBufReadExt, BufReader};

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async move {
        // Bind before anything else so an unusable address ends the command.
        let listener = bind_sync_server(addr).await?;
        let server = Arc::new(SyncServer::new(handle));
        tokio::spawn(serve_sync(listener, Arc::clone(&server)));

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            if line.trim() != "reload" {
                continue;
            }
            let loaded = load_or_default(&store);
            if let Err(e) = server.publish(loaded.config) {
                tracing::error!(error = %e, "could not publish configuration");
            }
        }
        Ok::<(), std::io::Error>(())
    })
}
