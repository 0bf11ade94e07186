//! Query builder for the chart endpoint.

use url::Url;

/// Bar interval of the requested chart.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Interval {
    /// One bar per trading day.
    #[default]
    Daily,
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Interval::Daily => write!(f, "1d"),
        }
    }
}

/// Time span covered by the requested chart, counted back from now.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Range {
    /// The latest trading day only.
    #[default]
    OneDay,
}

impl std::fmt::Display for Range {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Range::OneDay => write!(f, "1d"),
        }
    }
}

/// Parameters of a single chart request.
///
/// The symbol goes into the URL path; everything else is a query parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChartQuery {
    pub symbol: String,
    /// Market region hint. Defaults to `US`.
    pub region: String,
    pub interval: Interval,
    pub range: Range,
    /// Sent only when set.
    pub include_adjusted_close: Option<bool>,
}

impl ChartQuery {
    pub fn new(symbol: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            region: "US".to_string(),
            interval: Interval::default(),
            range: Range::default(),
            include_adjusted_close: None,
        }
    }

    pub fn with_region(mut self, region: &str) -> Self {
        self.region = region.to_string();
        self
    }

    pub fn with_interval(mut self, interval: Interval) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_range(mut self, range: Range) -> Self {
        self.range = range;
        self
    }

    pub fn with_include_adjusted_close(mut self, include: bool) -> Self {
        self.include_adjusted_close = Some(include);
        self
    }

    /// Appends the chart path segment and query parameters to the base URL.
    pub fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        let base_path = url.path().trim_end_matches('/').to_string();
        url.set_path(&format!(
            "{}/v8/finance/chart/{}",
            base_path,
            encode_symbol(&self.symbol)
        ));
        url.query_pairs_mut()
            .append_pair("region", &self.region)
            .append_pair("interval", &self.interval.to_string())
            .append_pair("range", &self.range.to_string());
        if let Some(include) = self.include_adjusted_close {
            url.query_pairs_mut()
                .append_pair("includeAdjustedClose", &include.to_string());
        }
        url
    }
}

// Index and currency tickers carry `^` and `=`, which are not valid raw in a path.
fn encode_symbol(symbol: &str) -> String {
    url::form_urlencoded::byte_serialize(symbol.as_bytes()).collect()
}
