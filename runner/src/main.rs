mod config;
mod input;
mod terminal_broadcaster;

use clap::Parser;
use snake_common::config::{ConfigManager, Validate};
use snake_common::games::snake::{SessionCommand, SnakeSession, SnakeSessionState};
use snake_common::storage::{FileKeyValueStore, KeyValueHighScoreStore};
use snake_common::{log, logger};
use std::path::PathBuf;
use tokio::sync::mpsc;

use config::{RunnerConfig, get_config_manager};
use terminal_broadcaster::TerminalBroadcaster;

#[derive(Parser)]
#[command(name = "snake_runner")]
#[command(version, about = "Terminal snake on a fixed-tick game loop")]
struct Args {
    /// Config file to use instead of the one next to the executable
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    use_log_prefix: bool,

    /// Fixed seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Overrides tick_interval_ms from the config file
    #[arg(long)]
    tick_interval_ms: Option<u64>,
}

fn load_config(args: &Args) -> Result<RunnerConfig, Box<dyn std::error::Error>> {
    let manager: ConfigManager<_, RunnerConfig> = match &args.config {
        Some(path) => ConfigManager::from_yaml_file(path.clone()),
        None => get_config_manager(),
    };
    let mut config = manager.get_or_create_config()?;

    if let Some(tick_interval_ms) = args.tick_interval_ms {
        config.tick_interval_ms = tick_interval_ms;
        config.validate()?;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = load_config(&args)?;

    let prefix = if args.use_log_prefix {
        Some("Snake".to_string())
    } else {
        None
    };
    logger::init_logger(prefix, config.log_level);
    log!(
        "Using {} tiles per side, {} ms per tick, high score in {}",
        config.grid.tile_count(),
        config.tick_interval_ms,
        config.high_score.location
    );

    let settings = config.session_settings()?;
    let high_score_store =
        KeyValueHighScoreStore::new(FileKeyValueStore::new(config.high_score.location.clone()));
    let seed = args.seed.unwrap_or_else(rand::random);
    let session_state = SnakeSessionState::create(&settings, seed, Box::new(high_score_store));

    let (command_tx, command_rx) = mpsc::unbounded_channel();

    let interrupt_tx = command_tx.downgrade();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log!("Interrupted, quitting...");
            if let Some(tx) = interrupt_tx.upgrade() {
                let _ = tx.send(SessionCommand::Quit);
            }
        }
    });

    println!("{}", input::HELP);
    input::spawn_input_thread(command_tx);

    let last = tokio::spawn(SnakeSession::run(
        session_state,
        command_rx,
        TerminalBroadcaster::new(),
    ))
    .await?;

    println!(
        "Bye! Last score: {}, high score: {}",
        last.score, last.high_score
    );
    Ok(())
}
