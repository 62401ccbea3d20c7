//! LedgerDesk command-line client.
//!
//! Usage:
//! ```bash
//! ledgerdesk signin 12 --password secret
//! ledgerdesk ledgers --filter Comment=june --sort Amount
//! ledgerdesk add 1500 --type cash --collector 3
//! ledgerdesk approvals
//! ledgerdesk approve 41
//! ledgerdesk reject 42 --reason "short by 200"
//! ledgerdesk liabilities retailers
//! ledgerdesk download 31 --dir receipts
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ledgerdesk_client::SessionContext;
use ledgerdesk_core::ledger::TransactionType;
use ledgerdesk_shared::AppConfig;
use ledgerdesk_shared::config::LogConfig;

mod commands;
mod output;

/// LedgerDesk - cash collection ledger client
#[derive(Parser)]
#[command(name = "ledgerdesk")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Backend base URL (overrides configuration)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in and remember the session
    Signin {
        /// Numeric user id
        user_id: i64,
        /// Password
        #[arg(long, short)]
        password: String,
    },

    /// Forget the stored session
    Signout,

    /// Show the signed-in user
    Whoami,

    /// Show the navigation menu for the signed-in role
    Menu,

    /// Check whether a path may be opened
    Visit {
        /// Route path, e.g. /approvals
        path: String,
    },

    /// List your ledger entries
    Ledgers {
        /// Column filters, KEY=TEXT
        #[arg(long, short, value_parser = parse_filter)]
        filter: Vec<(String, String)>,
        /// Column to sort by; repeat the flag to sort descending
        #[arg(long, short)]
        sort: Vec<String>,
    },

    /// Record a new ledger entry
    Add {
        /// Amount handed over
        amount: Decimal,
        /// How it was handed over
        #[arg(long = "type", short = 't', default_value = "cash")]
        transaction_type: TransactionTypeArg,
        /// Entry date (YYYY-MM-DD), today when omitted
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Date the cash changed hands (YYYY-MM-DD)
        #[arg(long)]
        given_on: Option<NaiveDate>,
        /// Collector receiving the cash
        #[arg(long)]
        collector: Option<i64>,
        /// Cashier receiving the cash
        #[arg(long)]
        cashier: Option<i64>,
        /// Retailer the entry is for (admin only)
        #[arg(long)]
        retailer: Option<i64>,
        /// Free-text comment
        #[arg(long, short)]
        comment: Option<String>,
        /// Document to attach
        #[arg(long)]
        attach: Option<PathBuf>,
    },

    /// Delete a pending ledger entry
    Delete {
        /// Entry id
        id: i64,
    },

    /// List entries waiting for your decision
    Approvals,

    /// Approve an entry
    Approve {
        /// Entry id
        id: i64,
    },

    /// Reject an entry
    Reject {
        /// Entry id
        id: i64,
        /// Reason shown to the submitter
        #[arg(long, short)]
        reason: String,
    },

    /// Mark a bank/UPI entry as stuck in the bank
    Stuck {
        /// Entry id
        id: i64,
    },

    /// Show a liability report
    Liabilities {
        /// retailers, collectors or cashiers
        kind: String,
    },

    /// List users
    Users,

    /// Show transaction type and workflow labels
    MasterData,

    /// Download an attached document
    Download {
        /// Document id
        doc_id: i64,
        /// Target directory
        #[arg(long, short, default_value = ".")]
        dir: PathBuf,
    },

    /// Change your password
    Password {
        /// Current password
        #[arg(long)]
        current: String,
        /// New password
        #[arg(long)]
        new: String,
        /// New password again
        #[arg(long)]
        confirm: String,
    },
}

/// Transaction type as typed on the command line.
#[derive(Clone, Copy, ValueEnum)]
pub enum TransactionTypeArg {
    /// Cash
    Cash,
    /// Bank transfer or UPI
    Bank,
    /// Anything else
    Other,
}

impl From<TransactionTypeArg> for TransactionType {
    fn from(arg: TransactionTypeArg) -> Self {
        match arg {
            TransactionTypeArg::Cash => Self::Cash,
            TransactionTypeArg::Bank => Self::BankUpi,
            TransactionTypeArg::Other => Self::Other,
        }
    }
}

fn parse_filter(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(key, text)| (key.trim().to_string(), text.to_string()))
        .filter(|(key, _)| !key.is_empty())
        .ok_or_else(|| format!("expected KEY=TEXT, got {raw:?}"))
}

fn init_tracing(log: &LogConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.filter));
    let registry = tracing_subscriber::registry().with(filter);
    if log.json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_with_dotenv().context("Failed to load configuration")?;
    if let Some(api_url) = cli.api_url {
        config.api.base_url = api_url;
    }
    init_tracing(&config.log);

    let mut ctx = SessionContext::from_config(&config).context("Failed to start session")?;
    commands::run(&mut ctx, cli.command).await
}
