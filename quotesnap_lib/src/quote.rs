//! Quote records and per-symbol outcomes.

use chart_api::types::ChartResponse;
use serde::{Deserialize, Serialize};

use crate::metrics::compute_change;
use crate::symbols::{AssetKind, SymbolSpec};

/// Currency assumed when the provider leaves it out.
pub const DEFAULT_CURRENCY: &str = "USD";

/// One captured quote. Built once per symbol per run and never mutated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRecord {
    pub symbol: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<AssetKind>,
    pub price: f64,
    pub previous_close: f64,
    pub change: f64,
    pub change_percent: f64,
    pub currency: String,
}

/// Why a symbol produced no record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AbsenceReason {
    /// The provider answered but the response had no usable series.
    NoData,
    /// The request or payload decoding failed.
    FetchFailed(String),
}

impl std::fmt::Display for AbsenceReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AbsenceReason::NoData => write!(f, "no data"),
            AbsenceReason::FetchFailed(detail) => write!(f, "fetch failed: {}", detail),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum QuoteOutcome {
    Present(QuoteRecord),
    Absent(AbsenceReason),
}

impl QuoteOutcome {
    pub fn record(&self) -> Option<&QuoteRecord> {
        match self {
            QuoteOutcome::Present(record) => Some(record),
            QuoteOutcome::Absent(_) => None,
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, QuoteOutcome::Present(_))
    }
}

/// Build a record from the first series of a chart response.
///
/// Returns `None` when there is no series, no metadata block or no regular
/// market price. The previous close falls back to `chartPreviousClose`; a
/// value the change guard rejects is written as 0.
/// With `annotate` set the record carries the symbol's display name and
/// asset class.
pub fn extract_record(
    response: &ChartResponse,
    spec: &SymbolSpec,
    annotate: bool,
) -> Option<QuoteRecord> {
    let meta = response.first_meta()?;
    let price = meta.regular_market_price?;
    let previous_close = meta.previous_close.or(meta.chart_previous_close);
    let metrics = compute_change(price, previous_close);

    Some(QuoteRecord {
        symbol: spec.symbol.clone(),
        name: if annotate { spec.name.clone() } else { None },
        kind: annotate.then(|| spec.asset_kind()),
        price,
        previous_close: metrics.previous_close,
        change: metrics.change,
        change_percent: metrics.change_percent,
        currency: meta
            .currency
            .clone()
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
    })
}
