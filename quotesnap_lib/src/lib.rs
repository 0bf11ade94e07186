//! Library layer for quotesnap: symbol sets, change metrics, the sequential
//! quote fetcher and the snapshot writer.
//!
//! Wraps the `chart_api` client behind the [`QuoteProvider`] trait so the
//! fetch loop can run against scripted providers in tests.

pub mod error;
pub mod fetcher;
pub mod metrics;
pub mod profile;
pub mod provider;
pub mod quote;
pub mod snapshot;
pub mod symbols;

pub use chart_api;

pub use error::SnapshotError;
pub use fetcher::{fetch_quote, run_snapshot, Progress, SnapshotRun, SymbolOutcome};
pub use metrics::{compute_change, PriceChange};
pub use profile::{SnapshotLayout, SnapshotProfile};
pub use provider::QuoteProvider;
pub use quote::{extract_record, AbsenceReason, QuoteOutcome, QuoteRecord, DEFAULT_CURRENCY};
pub use snapshot::{write_snapshot, SnapshotDocument};
pub use symbols::{
    load_symbol_file, validate_symbol_set, AssetKind, SymbolSetError, SymbolSpec,
};
