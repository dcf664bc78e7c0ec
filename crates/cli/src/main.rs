//! Orbit CLI - Database migrations and operator tools.
//!
//! # Usage
//!
//! ```bash
//! # Run storefront database migrations (schema and session table)
//! orbit-cli migrate
//!
//! # Show which store a host resolves to
//! orbit-cli store show toys.orbit360.com
//!
//! # Print a store's merged customization
//! orbit-cli store customization toys --format yaml
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `store show` - Resolve a host, distinguishing inactive from missing stores
//! - `store customization` - Print the customization served for a store

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

use commands::store::Format;

#[derive(Parser)]
#[command(name = "orbit-cli")]
#[command(author, version, about = "Orbit storefront CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Inspect stores
    Store {
        #[command(subcommand)]
        action: StoreAction,
    },
}

#[derive(Subcommand)]
enum StoreAction {
    /// Resolve a host to its store
    Show {
        /// Host as a browser would send it, e.g. `toys.orbit360.com`
        host: String,
    },
    /// Print a store's customization merged over the defaults
    Customization {
        /// Store subdomain
        subdomain: String,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::storefront().await?,
        Commands::Store { action } => match action {
            StoreAction::Show { host } => commands::store::show(&host).await?,
            StoreAction::Customization { subdomain, format } => {
                commands::store::customization(&subdomain, format).await?;
            }
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_customization_format() {
        let cli = Cli::try_parse_from(["orbit-cli", "store", "customization", "toys", "-f", "yaml"]);
        assert!(matches!(
            cli.map(|c| c.command),
            Ok(Commands::Store {
                action: StoreAction::Customization { format: Format::Yaml, .. }
            })
        ));
    }
}
