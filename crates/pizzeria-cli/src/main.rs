mod order;
mod prompt;
mod track;

use clap::{Args, Parser, Subcommand};
use pizzeria_client::PowerClient;
use tracing_subscriber::EnvFilter;

use crate::prompt::Prompter;

#[derive(Debug, Parser)]
#[command(name = "pizzeria")]
#[command(about = "Order pizza for delivery and track recent orders")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Build, price and place a delivery order interactively
    Order(OrderArgs),
    /// Show the status of recent orders for a phone number
    Track {
        /// Phone number the orders were placed with (prompted if omitted)
        #[arg(long)]
        phone: Option<String>,
    },
}

/// Delivery address fields; any left out are prompted for.
#[derive(Debug, Default, Args)]
pub(crate) struct OrderArgs {
    /// Street address, e.g. "3457 West 1st Avenue"
    #[arg(long)]
    pub street: Option<String>,
    #[arg(long)]
    pub city: Option<String>,
    /// Province or state, e.g. BC
    #[arg(long)]
    pub region: Option<String>,
    #[arg(long)]
    pub postal_code: Option<String>,
    /// Dwelling type, e.g. House or Apartment
    #[arg(long)]
    pub dwelling_type: Option<String>,
    /// Print the order request instead of placing it
    #[arg(long)]
    pub dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = pizzeria_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let client = PowerClient::from_config(&config)?;
    let stdin = std::io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), std::io::stdout());

    match cli.command {
        Commands::Order(args) => order::run_order(&client, &mut prompter, args).await,
        Commands::Track { phone } => track::run_track(&client, &mut prompter, phone).await,
    }
}
