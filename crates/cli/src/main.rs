//! Smoothies CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! smoothies migrate
//!
//! # Seed the fruit options table
//! smoothies seed fruits --file crates/cli/seeds/fruit_options.yaml
//!
//! # Inspect orders
//! smoothies orders pending
//! smoothies orders show 42
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `seed fruits` - Load selectable fruit options from YAML
//! - `orders pending` / `orders show` - Print orders from the store

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use smoothies_core::OrderId;

mod commands;

use commands::CliError;

#[derive(Parser)]
#[command(name = "smoothies")]
#[command(author, version, about = "Smoothies CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Seed reference data
    Seed {
        #[command(subcommand)]
        target: SeedTarget,
    },
    /// Inspect orders
    Orders {
        #[command(subcommand)]
        action: OrdersAction,
    },
}

#[derive(Subcommand)]
enum SeedTarget {
    /// Seed selectable fruit options from a YAML file
    Fruits {
        /// Path to the YAML file
        #[arg(short, long, default_value = "crates/cli/seeds/fruit_options.yaml")]
        file: PathBuf,

        /// Delete existing fruit options first
        #[arg(long)]
        clear: bool,
    },
}

#[derive(Subcommand)]
enum OrdersAction {
    /// List unfilled orders, newest first
    Pending,
    /// Show a single order
    Show {
        /// Order ID (`order_uid`)
        id: OrderId,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed { target } => match target {
            SeedTarget::Fruits { file, clear } => commands::seed::fruits(&file, clear).await?,
        },
        Commands::Orders { action } => match action {
            OrdersAction::Pending => commands::orders::pending().await?,
            OrdersAction::Show { id } => commands::orders::show(id).await?,
        },
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_seed_defaults() {
        let cli = Cli::try_parse_from(["smoothies", "seed", "fruits"]).unwrap();
        match cli.command {
            Commands::Seed {
                target: SeedTarget::Fruits { file, clear },
            } => {
                assert_eq!(file, PathBuf::from("crates/cli/seeds/fruit_options.yaml"));
                assert!(!clear);
            }
            _ => panic!("expected seed fruits"),
        }
    }

    #[test]
    fn test_parses_order_id() {
        let cli = Cli::try_parse_from(["smoothies", "orders", "show", "42"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Orders {
                action: OrdersAction::Show { id }
            } if id == OrderId::new(42)
        ));

        assert!(Cli::try_parse_from(["smoothies", "orders", "show", "forty-two"]).is_err());
    }
}
