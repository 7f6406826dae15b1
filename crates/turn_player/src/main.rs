use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use quiescent_engine::{EngineConfig, QuiescentEngine};
use tracing::info;
use tracing_subscriber::EnvFilter;
use turn_player::{play_game, run_session, Agent, OpponentKind, SelfPlayConfig};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Engine configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Speak the line protocol on stdin/stdout (default)
    Play {
        /// Initial placement instead of the start position
        #[arg(long)]
        placement: Option<String>,
    },
    /// Play the engine against itself or the random engine and print a JSON record
    Selfplay {
        #[arg(long, default_value_t = 40)]
        plies: usize,
        #[arg(long, value_enum, default_value_t = OpponentKind::Quiescent)]
        opponent: OpponentKind,
        /// Seconds on each side's clock
        #[arg(long, default_value_t = 60.0)]
        clock: f64,
        #[arg(long)]
        placement: Option<String>,
        #[arg(long)]
        seed: Option<u64>,
        /// Write the record here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cli.log_level))
        .context("invalid log filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let engine_config = match &cli.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("loading engine config {}", path.display()))?,
        None => EngineConfig::default(),
    };

    match cli.command.unwrap_or(Commands::Play { placement: None }) {
        Commands::Play { placement } => {
            let relocate = engine_config.relocate_castling_rook;
            let mut agent = Agent::new(QuiescentEngine::new(engine_config), relocate);
            if let Some(placement) = placement {
                agent
                    .set_position(&placement)
                    .with_context(|| format!("initial placement '{placement}'"))?;
            }
            info!("ready");
            let stdin = io::stdin();
            run_session(&mut agent, stdin.lock(), io::stdout().lock())?;
        }
        Commands::Selfplay {
            plies,
            opponent,
            clock,
            placement,
            seed,
            output,
        } => {
            let clock =
                Duration::try_from_secs_f64(clock).context("clock must be non-negative")?;
            let mut config = SelfPlayConfig {
                max_plies: plies,
                opponent,
                clock,
                seed,
                ..SelfPlayConfig::default()
            };
            if let Some(placement) = placement {
                config.placement = placement;
            }

            let record = play_game(&config, &engine_config).context("self-play failed")?;
            let json = serde_json::to_string_pretty(&record)?;
            match output {
                Some(path) => std::fs::write(&path, json)
                    .with_context(|| format!("writing {}", path.display()))?,
                None => println!("{json}"),
            }
        }
    }
    Ok(())
}
