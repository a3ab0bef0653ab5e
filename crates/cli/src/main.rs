//! Scout Sales CLI - Database migrations and maintenance tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! scout-sales-cli migrate
//!
//! # Load documents from a JSON file into a collection
//! scout-sales-cli seed customers customers.json
//!
//! # Delete every document in a collection
//! scout-sales-cli clear scouts --yes
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `seed` - Insert documents from a JSON array file
//! - `clear` - Delete every document in a collection

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use scout_sales_core::Collection;

mod commands;

use commands::CliError;

#[derive(Parser)]
#[command(name = "scout-sales-cli")]
#[command(author, version, about = "Scout Sales CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Insert documents from a JSON file (an array of objects)
    Seed {
        /// Target collection (contacts, scouts, customers, salesheets)
        #[arg(value_parser = parse_collection)]
        collection: Collection,

        /// Path to the JSON file
        file: PathBuf,
    },
    /// Delete every document in a collection
    Clear {
        /// Target collection (contacts, scouts, customers, salesheets)
        #[arg(value_parser = parse_collection)]
        collection: Collection,

        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

fn parse_collection(name: &str) -> Result<Collection, String> {
    Collection::from_name(name).ok_or_else(|| {
        let known: Vec<&str> = Collection::ALL.iter().map(Collection::as_str).collect();
        format!("unknown collection '{name}' (expected one of: {})", known.join(", "))
    })
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
        Commands::Seed { collection, file } => commands::seed::run(collection, &file).await?,
        Commands::Clear { collection, yes } => commands::clear::run(collection, yes).await?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_collection() {
        assert_eq!(parse_collection("salesheets"), Ok(Collection::SalesSheets));

        let err = parse_collection("orders").unwrap_err();
        assert!(err.contains("contacts, scouts, customers, salesheets"));
    }

    #[test]
    fn test_cli_parses_clear() {
        let cli = Cli::try_parse_from(["scout-sales-cli", "clear", "scouts", "--yes"]);
        assert!(matches!(
            cli.map(|c| c.command),
            Ok(Commands::Clear {
                collection: Collection::Scouts,
                yes: true
            })
        ));
    }

    #[test]
    fn test_cli_rejects_unknown_collection() {
        assert!(Cli::try_parse_from(["scout-sales-cli", "clear", "orders"]).is_err());
    }
}
