//! Snapshot profiles: which symbols to fetch, how to ask for them and where
//! the result goes.

use std::path::{Path, PathBuf};

use chart_api::{ChartQuery, Interval, Range};

use crate::symbols::{
    load_backup_symbols, load_market_symbols, validate_symbol_set, SymbolSetError, SymbolSpec,
};

/// JSON layout of the written snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SnapshotLayout {
    /// `{success_count, total_count, data: {symbol: record | null}}`.
    SymbolMap,
    /// `{timestamp, source, success_count, total_count, data: [record]}`.
    RecordList,
}

#[derive(Clone, Debug)]
pub struct SnapshotProfile {
    /// Short name used in logs.
    pub label: String,
    pub symbols: Vec<SymbolSpec>,
    pub output_path: PathBuf,
    pub layout: SnapshotLayout,
    /// Written into the record-list envelope.
    pub source: String,
    pub region: String,
    pub include_adjusted_close: Option<bool>,
    /// Copy display names and asset classes into the records.
    pub annotate: bool,
}

impl SnapshotProfile {
    /// Indices, forex and metals with display names, written as a symbol map.
    pub fn market_data() -> Result<Self, SymbolSetError> {
        Ok(Self {
            label: "market-data".to_string(),
            symbols: load_market_symbols()?,
            output_path: PathBuf::from("market-data-results.json"),
            layout: SnapshotLayout::SymbolMap,
            source: "Yahoo Finance chart API".to_string(),
            region: "US".to_string(),
            include_adjusted_close: Some(false),
            annotate: true,
        })
    }

    /// Headline indices only, written as a record list with an envelope.
    pub fn backup_source() -> Result<Self, SymbolSetError> {
        Ok(Self {
            label: "backup-source".to_string(),
            symbols: load_backup_symbols()?,
            output_path: PathBuf::from("backup-source-results.json"),
            layout: SnapshotLayout::RecordList,
            source: "Yahoo Finance chart API (backup source)".to_string(),
            region: "US".to_string(),
            include_adjusted_close: None,
            annotate: false,
        })
    }

    pub fn with_output_path(mut self, path: &Path) -> Self {
        self.output_path = path.to_path_buf();
        self
    }

    /// Replace the symbol set. The new set goes through the same checks as a
    /// loaded YAML file, so the symbol map never sees a duplicate key.
    pub fn with_symbols(mut self, symbols: Vec<SymbolSpec>) -> Result<Self, SymbolSetError> {
        self.symbols = validate_symbol_set(symbols)?;
        Ok(self)
    }

    /// One day of daily bars for `symbol`, with this profile's region and flags.
    pub fn chart_query(&self, symbol: &str) -> ChartQuery {
        let query = ChartQuery::new(symbol)
            .with_region(&self.region)
            .with_interval(Interval::Daily)
            .with_range(Range::OneDay);
        match self.include_adjusted_close {
            Some(include) => query.with_include_adjusted_close(include),
            None => query,
        }
    }
}
