//! Tender Guardian CLI - Main entry point

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;
use tenderguard_cli::commands::{self, CheckInput};
use tenderguard_cli::{load_config, AppContext};
use tenderguard_core::TenderDraft;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "tenderguard")]
#[command(about = "AI Tender Guardian - procurement client", long_about = None)]
struct Cli {
    /// Service base URL (overrides config file and environment)
    #[arg(short, long)]
    backend: Option<String>,

    /// JSON config file
    #[arg(short, long, env = "TENDERGUARD_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Service status and available screens
    Home,

    /// List active tenders
    Tenders,

    /// List sealed bids of a tender
    Bids {
        /// Tender ID
        tender_id: String,
    },

    /// Create a tender
    Create {
        /// Tender ID (e.g. TENDER-2025-001)
        tender_id: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        requirements: String,
        /// Budget ceiling
        #[arg(long)]
        budget: Option<Decimal>,
        /// Submission deadline
        #[arg(long)]
        deadline: Option<String>,
    },

    /// Seal a bid document
    Seal {
        /// Tender ID
        tender_id: String,
        /// Bid document path
        #[arg(long)]
        file: Option<PathBuf>,
        /// Summary used for compliance checks
        #[arg(long)]
        summary: String,
    },

    /// Check a bid summary against tender requirements
    Check {
        /// Pre-fill requirements from this tender
        #[arg(long)]
        tender: Option<String>,
        /// Pre-fill the summary from this bid (needs --tender)
        #[arg(long, requires = "tender")]
        bid: Option<String>,
        #[arg(long)]
        requirements: Option<String>,
        #[arg(long)]
        summary: Option<String>,
    },

    /// Show the audit log
    Audit {
        /// Show the summary of the entry at this index
        #[arg(long)]
        expand: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tenderguard=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref(), cli.backend)?;
    let ctx = AppContext::new(&config)?;

    let output = match cli.command {
        Commands::Home => commands::home(&ctx).await?,

        Commands::Tenders => commands::tenders(&ctx).await?,

        Commands::Bids { tender_id } => commands::bids(&ctx, &tender_id).await?,

        Commands::Create {
            tender_id,
            description,
            requirements,
            budget,
            deadline,
        } => {
            let draft = TenderDraft {
                tender_id,
                description,
                requirements,
                budget,
                deadline,
            };
            commands::create(&ctx, draft).await?
        }

        Commands::Seal {
            tender_id,
            file,
            summary,
        } => {
            let document = match file {
                Some(path) => Some(commands::read_document(&path).await?),
                None => None,
            };
            commands::seal(&ctx, &tender_id, document, &summary).await?
        }

        Commands::Check {
            tender,
            bid,
            requirements,
            summary,
        } => {
            let input = CheckInput {
                tender_id: tender,
                bidder_id: bid,
                requirements,
                bid_summary: summary,
            };
            commands::check(&ctx, input).await?
        }

        Commands::Audit { expand } => commands::audit(&ctx, expand).await?,
    };

    println!("{}", output);
    Ok(())
}
