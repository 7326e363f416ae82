//! Harvest Trail CLI - command-line front-end for the supply-chain tracker.
//!
//! # Usage
//!
//! ```bash
//! # Create an account (falls back to the local store when offline)
//! ht account register -e ann@example.com -p hunter42 --role farmer --name Ann
//!
//! # Sign in and look around
//! ht account login -e ann@example.com -p hunter42
//! ht crop list
//!
//! # Record a harvest
//! ht crop add --name Tomatoes --type Vegetable \
//!     --harvest 2024-05-01 --expiry 2024-05-20 --soil Loam
//!
//! # Receive crops from a farmer (distributor accounts)
//! ht crop receive --supplier 123 --crop 7 --crop 9
//!
//! # Administrative views
//! ht admin users --role farmer
//! ht admin stats
//! ```
//!
//! # Commands
//!
//! - `account` - register, login, logout, whoami
//! - `crop` - list, add, update, delete, receive, scan
//! - `admin` - users, delete-user, stats

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::print_stdout)]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "ht")]
#[command(author, version, about = "Harvest Trail command-line client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the signed-in account
    Account {
        #[command(subcommand)]
        action: commands::account::AccountAction,
    },
    /// Work with crops
    Crop {
        #[command(subcommand)]
        action: commands::crop::CropAction,
    },
    /// Administrative tools
    Admin {
        #[command(subcommand)]
        action: commands::admin::AdminAction,
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
        Commands::Account { action } => commands::account::run(action).await,
        Commands::Crop { action } => commands::crop::run(action).await,
        Commands::Admin { action } => commands::admin::run(action).await,
    }
}
