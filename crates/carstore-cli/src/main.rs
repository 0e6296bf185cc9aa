mod cli;
mod commands;
mod output;
mod state;

use std::path::Path;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use output::print_error;

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(e) = run().await {
        print_error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

fn init_tracing() {
    // Prefer RUST_LOG from env, otherwise stay quiet below warn.
    let filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|_| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let state_path = Path::new(&cli.state);

    match &cli.command {
        Commands::Create(args) => {
            let provider = commands::configure_provider(&cli.base_url)?;
            commands::create(&provider, state_path, args).await
        }
        Commands::Refresh => {
            let provider = commands::configure_provider(&cli.base_url)?;
            commands::refresh(&provider, state_path).await
        }
        Commands::Update(args) => {
            let provider = commands::configure_provider(&cli.base_url)?;
            commands::update(&provider, state_path, args).await
        }
        Commands::Delete => {
            let provider = commands::configure_provider(&cli.base_url)?;
            commands::delete(&provider, state_path).await
        }
        Commands::Show => commands::show(state_path),
    }
}
