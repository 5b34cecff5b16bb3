//! Aria: a voice assistant front-end driven from the terminal.
//!
//! One utterance is fully classified, extracted, clarified, dispatched and
//! recorded before the next is accepted. Ctrl-C stops the loop between turns;
//! it does not interrupt an in-flight listen.

mod config;

use anyhow::{anyhow, Result};
use clap::{ArgAction, Parser, Subcommand};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use action_exec::standard_registry;
use command_core::{is_exit_phrase, Dispatcher};
use config::Config;
use history_store::{JsonlHistory, TemplateFile};
use speech_io::plugin::{new_input_backend, new_output_backend, InputBackendKind, OutputBackendKind};

const WAKE_POLL_TIMEOUT: Duration = Duration::from_millis(1000);

#[derive(Parser)]
#[command(name = "aria", version, about = "Aria voice assistant")]
struct Cli {
    /// Path to the JSON config file (created with defaults when missing)
    #[arg(long, default_value = "aria.json", global = true)]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive assistant loop
    Run {
        /// Require a wake word before each command
        #[arg(long, action = ArgAction::SetTrue)]
        wake: bool,
    },
    /// Dispatch a single utterance and exit
    Once { utterance: String },
    /// Show recent command history, most recent first
    History {
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_tracing();
    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;

    match cli.command {
        Commands::Run { wake } => run_session(config, wake).await,
        Commands::Once { utterance } => {
            let mut dispatcher = build_dispatcher(&config)?;
            let outcome = dispatcher.dispatch(&utterance);
            if !outcome.success {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::History { limit } => show_history(&config, limit),
    }
}

fn build_dispatcher(config: &Config) -> Result<Dispatcher> {
    let input = new_input_backend(InputBackendKind::Console).map_err(|e| anyhow!(e))?;
    let output = new_output_backend(OutputBackendKind::Console, "aria").map_err(|e| anyhow!(e))?;
    let history = JsonlHistory::open(&config.history_path)?;
    let templates = TemplateFile::load(&config.templates_path)?;
    info!(
        history = %config.history_path,
        templates = templates.len(),
        "assistant ready"
    );

    Ok(Dispatcher::new(
        config.pipeline.clone(),
        standard_registry(),
        Box::new(templates),
        Box::new(history),
        input,
        output,
    )?)
}

async fn run_session(config: Config, wake: bool) -> Result<()> {
    let stop = Arc::new(AtomicBool::new(false));
    {
        let stop = Arc::clone(&stop);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                stop.store(true, Ordering::SeqCst);
            }
        });
    }

    let speech = config.pipeline.speech.clone();
    let mut dispatcher = build_dispatcher(&config)?;
    dispatcher.say("Hello! I'm Aria. How can I help?");
    if wake {
        dispatcher.say("Say my name when you need me.");
    }

    while !stop.load(Ordering::SeqCst) {
        if wake {
            // Cooperative wake polling: short listens until a wake word is
            // heard, then one normal command turn.
            let heard = dispatcher.listen_for(WAKE_POLL_TIMEOUT);
            if heard.is_empty() {
                continue;
            }
            if !speech.contains_wake_word(&heard) {
                continue;
            }
            dispatcher.say("Yes, how can I help?");
        }

        let utterance = dispatcher.listen();
        if utterance.is_empty() {
            continue;
        }
        if is_exit_phrase(&utterance) {
            info!("exit phrase heard");
            break;
        }
        let _ = dispatcher.dispatch(&utterance);
    }

    dispatcher.say("Goodbye!");
    Ok(())
}

fn show_history(config: &Config, limit: usize) -> Result<()> {
    let store = JsonlHistory::open(&config.history_path)?;
    let entries = store.recent(limit)?;
    if entries.is_empty() {
        println!("no history yet");
        return Ok(());
    }
    for entry in entries {
        let status = if entry.success { "ok" } else { "failed" };
        println!(
            "{}  [{}]  {}  --  {}",
            entry.timestamp, status, entry.command, entry.response
        );
    }
    Ok(())
}

fn setup_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
