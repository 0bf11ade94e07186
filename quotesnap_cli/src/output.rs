use quotesnap_lib::{AbsenceReason, Progress, QuoteOutcome, SnapshotRun, SymbolSpec};
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Clone, Debug)]
pub enum OutputFormat {
    Table,
    Markdown,
    Json,
}

#[derive(Tabled, Serialize)]
struct RecordRow {
    #[tabled(rename = "Symbol")]
    #[serde(rename = "Symbol")]
    symbol: String,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    #[serde(rename = "Type")]
    kind: String,
    #[tabled(rename = "Price")]
    #[serde(rename = "Price")]
    price: String,
    #[tabled(rename = "Change")]
    #[serde(rename = "Change")]
    change: String,
    #[tabled(rename = "Change %")]
    #[serde(rename = "Change %")]
    change_percent: String,
    #[tabled(rename = "Currency")]
    #[serde(rename = "Currency")]
    currency: String,
}

// -- Row builders --

fn build_record_rows(run: &SnapshotRun) -> Vec<RecordRow> {
    run.outcomes
        .iter()
        .filter_map(|entry| entry.outcome.record().map(|r| (&entry.spec, r)))
        .map(|(spec, r)| RecordRow {
            symbol: r.symbol.clone(),
            name: spec.name.clone().unwrap_or_default(),
            kind: spec.asset_kind().to_string(),
            price: format_price(r.price),
            change: format_signed(r.change),
            change_percent: format_percent(r.change_percent),
            currency: r.currency.clone(),
        })
        .collect()
}

// -- Progress lines --

/// Console lines for one progress event. Empty when nothing should be printed.
pub fn progress_lines(progress: &Progress<'_>) -> Vec<String> {
    match progress {
        Progress::Started { index, total, spec } => vec![
            String::new(),
            format!("[{}/{}] Fetching {}...", index + 1, total, describe_spec(spec)),
        ],
        Progress::Finished { spec, outcome } => match outcome {
            QuoteOutcome::Present(r) => vec![format!(
                "  ✓ {}: {} {}  {} ({})",
                spec.symbol,
                format_price(r.price),
                r.currency,
                format_signed(r.change),
                format_percent(r.change_percent)
            )],
            QuoteOutcome::Absent(AbsenceReason::NoData) => {
                vec![format!("  ✗ {}: no data", spec.symbol)]
            }
            QuoteOutcome::Absent(AbsenceReason::FetchFailed(detail)) => {
                vec![format!("  ✗ {}: error: {}", spec.symbol, detail)]
            }
        },
    }
}

pub fn summary_line(run: &SnapshotRun) -> String {
    format!("Succeeded: {}/{}", run.success_count(), run.total_count())
}

fn describe_spec(spec: &SymbolSpec) -> String {
    match &spec.name {
        Some(name) => format!("{} ({})", name, spec.symbol),
        None => spec.symbol.clone(),
    }
}

// -- Record output --

pub fn print_records(run: &SnapshotRun, format: &OutputFormat) {
    let rows = build_record_rows(run);
    if rows.is_empty() {
        eprintln!("No quotes captured");
        return;
    }
    match format {
        OutputFormat::Table => println!("{}", Table::new(rows)),
        OutputFormat::Markdown => {
            let mut table = Table::new(rows);
            table.with(Style::markdown());
            println!("{}", table);
        }
        OutputFormat::Json => print_json(&rows),
    }
}

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

/// Prices keep their natural precision; forex quotes need four or more places.
fn format_price(value: f64) -> String {
    format!("{}", value)
}

fn format_signed(value: f64) -> String {
    format!("{:+.2}", value)
}

fn format_percent(value: f64) -> String {
    format!("{:+.2}%", value)
}
