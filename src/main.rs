//! Drover CLI entry point.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use drover::cli::{Cli, Commands};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Push(args) => drover::cli::commands::push::execute(args, cli.json).await,
        Commands::Labels(args) => drover::cli::commands::labels::execute(args, cli.json).await,
        Commands::Validate(args) => drover::cli::commands::validate::execute(args, cli.json).await,
    };

    if let Err(err) = result {
        drover::cli::handle_error(err, cli.json);
    }
}
