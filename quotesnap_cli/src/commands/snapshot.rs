//! The `market-data` and `backup-source` subcommands: fetch a profile's
//! symbols once, print progress, and write the JSON snapshot.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use quotesnap_lib::{
    load_symbol_file, run_snapshot, write_snapshot, QuoteProvider, SnapshotDocument,
    SnapshotProfile,
};

use crate::output::{print_records, progress_lines, summary_line, OutputFormat};

#[derive(Args)]
pub struct SnapshotArgs {
    /// Where to write the JSON snapshot (defaults to the profile's file name)
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// YAML file replacing the built-in symbol list
    #[arg(long)]
    pub symbols: Option<PathBuf>,
}

/// Apply the command-line overrides to a preset profile.
pub fn resolve_profile(args: &SnapshotArgs, mut profile: SnapshotProfile) -> Result<SnapshotProfile> {
    if let Some(ref path) = args.symbols {
        let symbols = load_symbol_file(path)
            .with_context(|| format!("Failed to load symbols from {}", path.display()))?;
        profile = profile.with_symbols(symbols)?;
    }
    if let Some(ref output) = args.output {
        profile = profile.with_output_path(output);
    }
    Ok(profile)
}

pub async fn run<P: QuoteProvider>(
    args: &SnapshotArgs,
    profile: SnapshotProfile,
    provider: &P,
    format: &OutputFormat,
    quiet: bool,
) -> Result<()> {
    let profile = resolve_profile(args, profile)?;

    println!(
        "Fetching {} symbols for {}",
        profile.symbols.len(),
        profile.label
    );
    println!("{}", "=".repeat(60));

    let run = run_snapshot(provider, &profile, |progress| {
        if quiet {
            return;
        }
        for line in progress_lines(&progress) {
            println!("{}", line);
        }
    })
    .await;

    println!("\n{}", "=".repeat(60));
    println!("{}", summary_line(&run));
    print_records(&run, format);

    let document = SnapshotDocument::from_run(&profile, &run);
    write_snapshot(&profile.output_path, &document)
        .with_context(|| format!("Failed to save {} snapshot", profile.label))?;

    println!("\nResults saved to: {}", profile.output_path.display());
    Ok(())
}
