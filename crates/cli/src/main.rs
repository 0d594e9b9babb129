//! Branchdesk CLI - Database migrations and operator tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! bd-cli migrate
//!
//! # Manage the branch directory
//! bd-cli branch create -n "North Office"
//! bd-cli branch list
//!
//! # Create an admin (password read from BRANCHDESK_ADMIN_PASSWORD)
//! bd-cli admin create -n "Ada" -e ada@example.com -p "+1 555 0100" -b 1
//!
//! # Activate or deactivate an admin
//! bd-cli admin toggle 7
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "bd-cli")]
#[command(author, version, about = "Branchdesk CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage the branch directory
    Branch {
        #[command(subcommand)]
        action: BranchAction,
    },
    /// Manage branch administrators
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum BranchAction {
    /// Create a branch
    Create {
        /// Branch name
        #[arg(short, long)]
        name: String,
    },
    /// List all branches
    List,
}

#[derive(Subcommand)]
enum AdminAction {
    /// Create an active admin assigned to a branch
    Create {
        /// Admin display name
        #[arg(short, long)]
        name: String,

        /// Admin email address
        #[arg(short, long)]
        email: String,

        /// Contact number
        #[arg(short = 'p', long)]
        number: String,

        /// Branch ID
        #[arg(short, long)]
        branch: i32,
    },
    /// Flip an admin's activation flag
    Toggle {
        /// Admin ID
        id: i32,
    },
}

#[tokio::main]
async fn main() {
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
        Commands::Branch { action } => match action {
            BranchAction::Create { name } => {
                commands::branch::create(&name).await?;
            }
            BranchAction::List => commands::branch::list().await?,
        },
        Commands::Admin { action } => match action {
            AdminAction::Create {
                name,
                email,
                number,
                branch,
            } => {
                commands::admin::create(&name, &email, &number, branch).await?;
            }
            AdminAction::Toggle { id } => {
                commands::admin::toggle(id).await?;
            }
        },
    }
    Ok(())
}
