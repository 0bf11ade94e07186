mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use quotesnap_lib::chart_api::Client;
use quotesnap_lib::SnapshotProfile;

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "quotesnap")]
#[command(about = "Capture a one-shot JSON snapshot of index, forex and futures quotes")]
struct Cli {
    /// Record output format: table, markdown or json
    #[arg(long, default_value = "table", global = true)]
    format: String,

    /// Chart API base URL (falls back to QUOTESNAP_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Suppress per-symbol progress lines
    #[arg(long, short, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Indices, forex pairs and precious metals, written as a symbol-keyed map
    MarketData(commands::snapshot::SnapshotArgs),
    /// Headline indices from the backup source, written as a record list
    BackupSource(commands::snapshot::SnapshotArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quotesnap=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let format = match cli.format.as_str() {
        "json" => OutputFormat::Json,
        "markdown" | "md" => OutputFormat::Markdown,
        _ => OutputFormat::Table,
    };

    let client = match cli
        .base_url
        .clone()
        .or_else(|| std::env::var("QUOTESNAP_BASE_URL").ok())
    {
        Some(url) => Client::with_base_url(&url),
        None => Client::new(),
    };

    match &cli.command {
        Commands::MarketData(args) => {
            let profile = SnapshotProfile::market_data()?;
            commands::snapshot::run(args, profile, &client, &format, cli.quiet).await?
        }
        Commands::BackupSource(args) => {
            let profile = SnapshotProfile::backup_source()?;
            commands::snapshot::run(args, profile, &client, &format, cli.quiet).await?
        }
    }

    Ok(())
}
