//! Twill CLI - Operator tools against the retail backend.
//!
//! # Usage
//!
//! ```bash
//! # Create a back-office user
//! twill user create -u lan.pham -n "Lan Pham" -e lan@twill.example -r manager
//!
//! # Stock movements
//! twill stock in --variant-id 44 --quantity 20 --reason "Restock"
//! twill stock out --variant-id 44 --quantity 2 --reason "Phone order" \
//!     --customer-name "Lan Pham" --customer-phone 0912345678
//! twill stock adjust --variant-id 44 --new-stock 18 --reason "Cycle count"
//!
//! # Download an Excel export
//! twill report export --kind inventory --out ./inventory.xlsx
//! ```
//!
//! # Commands
//!
//! - `user create` - Create back-office users
//! - `stock in|out|adjust` - One-shot stock movements
//! - `report export` - Download Excel exports

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use twill_admin::api::types::ReportRange;

mod commands;

#[derive(Parser)]
#[command(name = "twill")]
#[command(author, version, about = "Twill CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage back-office users
    User {
        #[command(subcommand)]
        action: UserAction,
    },
    /// Record stock movements
    Stock {
        #[command(subcommand)]
        action: StockAction,
    },
    /// Download reports
    Report {
        #[command(subcommand)]
        action: ReportAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Create a new back-office user
    Create {
        /// Login name
        #[arg(short, long)]
        username: String,

        /// Display name
        #[arg(short, long)]
        name: String,

        /// Email address
        #[arg(short, long)]
        email: String,

        /// Role (`admin`, `manager`)
        #[arg(short, long, default_value = "manager")]
        role: String,

        /// Initial password (generated and logged once when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },
}

#[derive(Subcommand)]
enum StockAction {
    /// Receive stock into the warehouse
    In {
        #[arg(long)]
        variant_id: i32,

        #[arg(long)]
        quantity: i32,

        #[arg(long)]
        reason: String,

        #[arg(long)]
        supplier: Option<String>,
    },
    /// Ship stock out (the backend creates a sales order)
    Out {
        #[arg(long)]
        variant_id: i32,

        #[arg(long)]
        quantity: i32,

        #[arg(long)]
        reason: String,

        #[arg(long)]
        customer_name: String,

        /// Customer phone, 10-11 digits
        #[arg(long)]
        customer_phone: String,

        #[arg(long)]
        customer_email: Option<String>,
    },
    /// Set a variant's on-hand count to an absolute value
    Adjust {
        #[arg(long)]
        variant_id: i32,

        #[arg(long)]
        new_stock: i32,

        #[arg(long)]
        reason: String,
    },
}

#[derive(Subcommand)]
enum ReportAction {
    /// Download an Excel export
    Export {
        /// Report kind (`inventory`, `transactions`, `orders`)
        #[arg(short, long)]
        kind: String,

        /// Range start (YYYY-MM-DD)
        #[arg(long)]
        start_date: Option<NaiveDate>,

        /// Range end (YYYY-MM-DD)
        #[arg(long)]
        end_date: Option<NaiveDate>,

        /// Output path (defaults to the backend-provided filename)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), commands::CliError> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CliError> {
    match cli.command {
        Commands::User { action } => match action {
            UserAction::Create {
                username,
                name,
                email,
                role,
                password,
            } => {
                commands::user::create(&username, &name, &email, &role, password).await?;
            }
        },
        Commands::Stock { action } => match action {
            StockAction::In {
                variant_id,
                quantity,
                reason,
                supplier,
            } => {
                commands::stock::stock_in(variant_id, quantity, &reason, supplier).await?;
            }
            StockAction::Out {
                variant_id,
                quantity,
                reason,
                customer_name,
                customer_phone,
                customer_email,
            } => {
                commands::stock::stock_out(
                    variant_id,
                    quantity,
                    &reason,
                    &customer_name,
                    &customer_phone,
                    customer_email,
                )
                .await?;
            }
            StockAction::Adjust {
                variant_id,
                new_stock,
                reason,
            } => {
                commands::stock::adjust(variant_id, new_stock, &reason).await?;
            }
        },
        Commands::Report { action } => match action {
            ReportAction::Export {
                kind,
                start_date,
                end_date,
                out,
            } => {
                let range = ReportRange {
                    start_date,
                    end_date,
                };
                commands::report::export(&kind, range, out).await?;
            }
        },
    }
    Ok(())
}
