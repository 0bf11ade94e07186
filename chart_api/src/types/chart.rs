use serde::{Deserialize, Serialize};

/// Top-level document returned by `/v8/finance/chart/{symbol}`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChartResponse {
    pub chart: Chart,
}

/// `result` is null when the API reports an error, and may also be an empty list.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Chart {
    #[serde(default)]
    pub result: Option<Vec<ChartResult>>,
    #[serde(default)]
    pub error: Option<ChartError>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChartError {
    pub code: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// One chart series. Price bars and indicators are ignored; only the
/// metadata block is read.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ChartResult {
    #[serde(default)]
    pub meta: Option<ChartMeta>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartMeta {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub exchange_name: Option<String>,
    #[serde(default)]
    pub full_exchange_name: Option<String>,
    #[serde(default)]
    pub instrument_type: Option<String>,
    #[serde(default)]
    pub short_name: Option<String>,
    #[serde(default)]
    pub long_name: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
    /// Epoch seconds of the last regular-market trade.
    #[serde(default)]
    pub regular_market_time: Option<i64>,
    #[serde(default)]
    pub regular_market_price: Option<f64>,
    #[serde(default)]
    pub regular_market_day_high: Option<f64>,
    #[serde(default)]
    pub regular_market_day_low: Option<f64>,
    #[serde(default)]
    pub previous_close: Option<f64>,
    /// Close preceding the first bar of the requested range. Often the only
    /// previous close present for `range=1d`.
    #[serde(default)]
    pub chart_previous_close: Option<f64>,
}

impl ChartResponse {
    /// Metadata of the first series, if the response carries one.
    pub fn first_meta(&self) -> Option<&ChartMeta> {
        self.chart
            .result
            .as_ref()
            .and_then(|results| results.first())
            .and_then(|result| result.meta.as_ref())
    }
}
