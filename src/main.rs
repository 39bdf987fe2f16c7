//! Pocket storefront terminal front end

use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use pocket::config::StorefrontConfig;

mod cli;

/// Pocket storefront
#[derive(Debug, Parser)]
#[command(name = "pocket", about = "Doraemon's Pocket storefront", long_about = None)]
struct Cli {
    #[command(flatten)]
    config: StorefrontConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Homepage bestsellers
    Home,

    /// The full menu, by category
    Menu,

    /// Today's specials
    Specials,

    /// Item detail page
    Item(cli::ItemArgs),

    /// The seeded cart
    Cart(cli::CartArgs),

    /// Validate a checkout form and place the order
    Checkout(cli::CheckoutArgs),
}

#[tokio::main(flavor = "current_thread")]
pub async fn main() {
    _ = dotenvy::dotenv();

    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&cli.config.log_level)),
        )
        .init();

    let result = match cli.command {
        Commands::Home => cli::home(&cli.config),
        Commands::Menu => cli::menu(&cli.config),
        Commands::Specials => cli::specials(&cli.config),
        Commands::Item(args) => cli::item(&cli.config, &args),
        Commands::Cart(args) => cli::cart(&cli.config, &args),
        Commands::Checkout(args) => cli::checkout(&cli.config, &args).await,
    };

    if let Err(error) = result {
        #[expect(
            clippy::print_stderr,
            reason = "command errors are reported to the user on stderr"
        )]
        {
            eprintln!("Error: {error:#}");
        }

        process::exit(1);
    }
}
