//! Symbol sets captured by a snapshot run.
//!
//! The two built-in sets are embedded YAML seed files read at compile time.
//! A user-supplied file with the same shape can replace either of them.

use std::collections::HashSet;
use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Ticker shape accepted in a symbol set: optional `^` index prefix, the
/// body, optional `=X` (forex) or `=F` (futures) suffix.
const TICKER_PATTERN: &str = r"^\^?[A-Za-z0-9.\-]+(=[XF])?$";

/// Error types for symbol set loading.
#[derive(Error, Debug)]
pub enum SymbolSetError {
    #[error("Failed to parse symbol set YAML: {0}")]
    Yaml(#[from] serde_yml::Error),
    #[error("Failed to read symbol file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Symbol set is empty")]
    Empty,
    #[error("Duplicate symbol in set: {0}")]
    Duplicate(String),
    #[error("Invalid symbol: {0:?}")]
    InvalidSymbol(String),
    #[error("Ticker pattern failed to compile: {0}")]
    Pattern(#[from] regex::Error),
}

/// Asset class of a symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Index,
    Forex,
    Commodity,
}

impl AssetKind {
    /// Classifies a ticker by its Yahoo suffix conventions.
    ///
    /// `=X` is a currency pair, `=F` a futures contract; everything else
    /// (`^` indices and exchange-suffixed codes like `000001.SS`) is an index.
    pub fn infer(symbol: &str) -> AssetKind {
        if symbol.ends_with("=X") {
            AssetKind::Forex
        } else if symbol.ends_with("=F") {
            AssetKind::Commodity
        } else {
            AssetKind::Index
        }
    }
}

impl std::fmt::Display for AssetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                AssetKind::Index => "index",
                AssetKind::Forex => "forex",
                AssetKind::Commodity => "commodity",
            }
        )
    }
}

/// One configured symbol with its optional display label.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SymbolSpec {
    pub symbol: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<AssetKind>,
}

impl SymbolSpec {
    pub fn new(symbol: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            name: None,
            kind: None,
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// The configured asset class, or the one implied by the ticker.
    pub fn asset_kind(&self) -> AssetKind {
        self.kind.unwrap_or_else(|| AssetKind::infer(&self.symbol))
    }
}

/// Top-level structure of a symbol set YAML file.
#[derive(Deserialize, Debug)]
pub struct SymbolSetFile {
    pub symbols: Vec<SymbolSpec>,
}

/// Parse and validate a symbol set from YAML content.
pub fn parse_symbol_set(yaml_content: &str) -> Result<Vec<SymbolSpec>, SymbolSetError> {
    let file: SymbolSetFile = serde_yml::from_str(yaml_content)?;
    validate_symbol_set(file.symbols)
}

/// Normalize and check a symbol set.
///
/// Order is preserved. Symbols are trimmed; the set must be non-empty and
/// duplicate-free, and every ticker must match the accepted shape.
pub fn validate_symbol_set(symbols: Vec<SymbolSpec>) -> Result<Vec<SymbolSpec>, SymbolSetError> {
    let ticker_re = Regex::new(TICKER_PATTERN)?;

    if symbols.is_empty() {
        return Err(SymbolSetError::Empty);
    }

    let mut validated = Vec::with_capacity(symbols.len());
    let mut seen = HashSet::new();

    for mut spec in symbols {
        spec.symbol = spec.symbol.trim().to_string();
        if !ticker_re.is_match(&spec.symbol) {
            return Err(SymbolSetError::InvalidSymbol(spec.symbol));
        }
        if !seen.insert(spec.symbol.clone()) {
            return Err(SymbolSetError::Duplicate(spec.symbol));
        }
        spec.name = spec
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        validated.push(spec);
    }

    Ok(validated)
}

/// Load a symbol set from a YAML file on disk.
pub fn load_symbol_file(path: &Path) -> Result<Vec<SymbolSpec>, SymbolSetError> {
    let yaml_content = std::fs::read_to_string(path).map_err(|source| SymbolSetError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_symbol_set(&yaml_content)
}

/// Indices, currency pairs and precious-metal futures, with display names.
pub fn load_market_symbols() -> Result<Vec<SymbolSpec>, SymbolSetError> {
    let yaml_content = include_str!("../../seed_data/market_symbols.yml");
    parse_symbol_set(yaml_content)
}

/// The five headline indices, symbols only.
pub fn load_backup_symbols() -> Result<Vec<SymbolSpec>, SymbolSetError> {
    let yaml_content = include_str!("../../seed_data/backup_symbols.yml");
    parse_symbol_set(yaml_content)
}
