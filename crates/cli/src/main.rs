//! Wishlist CLI - database migrations and support tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! wl-cli migrate
//!
//! # Print the composite id of an entry
//! wl-cli derive-id --customer u1 --product p1
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "wl-cli")]
#[command(author, version, about = "Wishlist service CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Print the composite id for a customer and product
    DeriveId {
        /// Customer ID
        #[arg(short, long)]
        customer: String,

        /// Product ID
        #[arg(short, long)]
        product: String,
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
        Commands::Migrate => commands::migrate::run().await?,
        Commands::DeriveId { customer, product } => {
            #[allow(clippy::print_stdout)]
            {
                println!("{}", commands::id::derive(&customer, &product));
            }
        }
    }
    Ok(())
}
