//! Binary entrypoint for the campus life game.
//!
//! `campus_life [--config <path>]` asks for an API key (empty for offline
//! mode), then runs the interactive menu on stdin/stdout. Set `RUST_LOG` for
//! diagnostics.
use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};
use std::io::{self, BufRead, Write};

use campus_life::console::Console;
use campus_life::llm::client_for_key;
use campus_life::{ContentStore, GameConfig};

#[derive(Parser)]
#[command(name = "campus_life")]
#[command(about = "A campus life simulation with chat-model NPCs")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "campus_config.json")]
    config: String,
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run(Cli::parse()).await {
        error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let api_key = read_api_key()?;

    let config = GameConfig::load(&cli.config)?;
    config.ensure_dirs()?;
    info!("Starting campus_life v{} with model {}", campus_life::VERSION, config.model);

    let content = ContentStore::load(config.static_path())
        .with_context(|| format!("Failed to load content from {:?}", config.static_path()))?;
    let llm_client = client_for_key(api_key, &config.api_base);

    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout());
    let choice = console.choose_save(content.prompts.start(), &config)?;
    let mut engine = choice.open(content, llm_client, &config)?;

    console.run(&mut engine).await
}

fn read_api_key() -> Result<Option<String>> {
    print!("Enter an OpenAI API key (or press Enter to play in offline mode): ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let key = line.trim();
    Ok((!key.is_empty()).then(|| key.to_string()))
}
