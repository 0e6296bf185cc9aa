use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "carstore")]
#[command(about = "Drive the lifecycle of a carstore car against a live API")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Base URL of the carstore API
    #[arg(
        short,
        long,
        global = true,
        env = "CARSTORE_URL",
        default_value = "http://localhost:5000"
    )]
    pub base_url: String,

    /// Path of the local state file
    #[arg(
        short,
        long,
        global = true,
        env = "CARSTORE_STATE",
        default_value = "carstore.state.json"
    )]
    pub state: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a car and start tracking it locally
    Create(CreateArgs),
    /// Refresh tracked state from the remote API, detecting drift
    Refresh,
    /// Replace the tracked car's attributes
    Update(UpdateArgs),
    /// Delete the tracked car
    Delete,
    /// Print the tracked state without touching the network
    Show,
}

#[derive(Args)]
pub struct CreateArgs {
    /// Car model
    #[arg(long)]
    pub model: String,

    /// Model year
    #[arg(long)]
    pub year: i64,
}

#[derive(Args)]
pub struct UpdateArgs {
    /// New car model
    #[arg(long)]
    pub model: String,

    /// New model year
    #[arg(long)]
    pub year: i64,
}
