//! Velvet Plum CLI - Admin roster management tools.
//!
//! # Usage
//!
//! ```bash
//! # List the admin roster (ids + emails)
//! vp-cli admin list
//!
//! # Grant admin privileges by email
//! vp-cli admin add -e admin@example.com
//!
//! # Revoke admin privileges by user id
//! vp-cli admin remove -i 3f1c7a2e-9d4b-4f6a-8c1d-2b5e7f9a0c3d
//! ```
//!
//! # Environment Variables
//!
//! - `BACKEND_URL` - Base URL of the hosted backend
//! - `BACKEND_SERVICE_KEY` - Backend service-role key

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "vp-cli")]
#[command(author, version, about = "Velvet Plum CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the admin roster
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// List the admin roster
    List,
    /// Grant admin privileges to the user with this email
    Add {
        /// Email of an existing Identity Provider user
        #[arg(short, long)]
        email: String,
    },
    /// Revoke admin privileges for a user id
    Remove {
        /// Identity Provider user id
        #[arg(short, long)]
        id: String,
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
        Commands::Admin { action } => match action {
            AdminAction::List => commands::admin::list().await?,
            AdminAction::Add { email } => {
                commands::admin::add(&email).await?;
            }
            AdminAction::Remove { id } => commands::admin::remove(&id).await?,
        },
    }
    Ok(())
}
