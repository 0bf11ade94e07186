//! Sequential fetch of a symbol set.
//!
//! Each symbol is requested on its own. A failure is logged, recorded as an
//! absent outcome and the run moves on to the next symbol.

use chrono::{DateTime, Utc};

use crate::profile::SnapshotProfile;
use crate::provider::QuoteProvider;
use crate::quote::{extract_record, AbsenceReason, QuoteOutcome, QuoteRecord};
use crate::symbols::SymbolSpec;

/// Outcome for one configured symbol.
#[derive(Clone, Debug, PartialEq)]
pub struct SymbolOutcome {
    pub spec: SymbolSpec,
    pub outcome: QuoteOutcome,
}

/// Everything one pass over a profile produced, in configured order.
#[derive(Clone, Debug)]
pub struct SnapshotRun {
    pub started_at: DateTime<Utc>,
    pub outcomes: Vec<SymbolOutcome>,
}

impl SnapshotRun {
    pub fn success_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.outcome.is_present()).count()
    }

    pub fn total_count(&self) -> usize {
        self.outcomes.len()
    }

    pub fn records(&self) -> impl Iterator<Item = &QuoteRecord> {
        self.outcomes.iter().filter_map(|o| o.outcome.record())
    }
}

/// Progress notifications emitted while a run is in flight.
#[derive(Debug)]
pub enum Progress<'a> {
    Started {
        /// Zero-based position in the symbol set.
        index: usize,
        total: usize,
        spec: &'a SymbolSpec,
    },
    Finished {
        spec: &'a SymbolSpec,
        outcome: &'a QuoteOutcome,
    },
}

/// Fetch one symbol and turn the response into an outcome.
pub async fn fetch_quote<P: QuoteProvider>(
    provider: &P,
    profile: &SnapshotProfile,
    spec: &SymbolSpec,
) -> QuoteOutcome {
    let query = profile.chart_query(&spec.symbol);
    match provider.fetch_chart(&query).await {
        Ok(response) => match extract_record(&response, spec, profile.annotate) {
            Some(record) => {
                tracing::debug!(symbol = %spec.symbol, price = record.price, "quote captured");
                QuoteOutcome::Present(record)
            }
            None => {
                let detail = response
                    .chart
                    .error
                    .as_ref()
                    .map(|e| format!("{}: {}", e.code, e.description.as_deref().unwrap_or("")))
                    .unwrap_or_default();
                tracing::warn!(symbol = %spec.symbol, detail = %detail, "no data in chart response");
                QuoteOutcome::Absent(AbsenceReason::NoData)
            }
        },
        Err(e) => {
            let detail = describe_error(&e);
            tracing::warn!(symbol = %spec.symbol, error = %detail, "chart request failed");
            QuoteOutcome::Absent(AbsenceReason::FetchFailed(detail))
        }
    }
}

/// Fetch every symbol of the profile, one after another, in order.
///
/// `on_progress` is called before and after each symbol.
pub async fn run_snapshot<P, F>(
    provider: &P,
    profile: &SnapshotProfile,
    mut on_progress: F,
) -> SnapshotRun
where
    P: QuoteProvider,
    F: FnMut(Progress<'_>),
{
    let started_at = Utc::now();
    let total = profile.symbols.len();
    tracing::info!(profile = %profile.label, symbols = total, "starting snapshot run");

    let mut outcomes = Vec::with_capacity(total);
    for (index, spec) in profile.symbols.iter().enumerate() {
        on_progress(Progress::Started { index, total, spec });
        let outcome = fetch_quote(provider, profile, spec).await;
        on_progress(Progress::Finished {
            spec,
            outcome: &outcome,
        });
        outcomes.push(SymbolOutcome {
            spec: spec.clone(),
            outcome,
        });
    }

    let run = SnapshotRun {
        started_at,
        outcomes,
    };
    tracing::info!(
        profile = %profile.label,
        succeeded = run.success_count(),
        total = run.total_count(),
        "snapshot run finished"
    );
    run
}

fn describe_error(err: &chart_api::Error) -> String {
    match err {
        chart_api::Error::HttpStatus { status, body } if !body.is_empty() => {
            let first_line = body.lines().next().unwrap_or("");
            let snippet: String = first_line.chars().take(200).collect();
            format!("HTTP {}: {}", status, snippet)
        }
        chart_api::Error::HttpStatus { status, .. } => format!("HTTP {}", status),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::SnapshotLayout;
    use chart_api::types::ChartResponse;
    use chart_api::ChartQuery;
    use serde_json::json;
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::sync::Mutex;

    #[derive(Clone)]
    enum Scripted {
        Meta(serde_json::Value),
        Empty,
        Status(u16),
        Transport,
        Malformed,
    }

    struct ScriptedProvider {
        script: HashMap<String, Scripted>,
        calls: Mutex<Vec<ChartQuery>>,
    }

    impl ScriptedProvider {
        fn new(entries: Vec<(&str, Scripted)>) -> Self {
            Self {
                script: entries
                    .into_iter()
                    .map(|(s, r)| (s.to_string(), r))
                    .collect(),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn called_symbols(&self) -> Vec<String> {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .map(|q| q.symbol.clone())
                .collect()
        }
    }

    impl QuoteProvider for ScriptedProvider {
        async fn fetch_chart(
            &self,
            query: &ChartQuery,
        ) -> Result<ChartResponse, chart_api::Error> {
            self.calls.lock().unwrap().push(query.clone());
            match self.script.get(&query.symbol).cloned() {
                Some(Scripted::Meta(meta)) => Ok(serde_json::from_value(
                    json!({ "chart": { "result": [{ "meta": meta }], "error": null } }),
                )
                .unwrap()),
                Some(Scripted::Empty) => {
                    Ok(serde_json::from_value(json!({ "chart": { "result": [] } })).unwrap())
                }
                Some(Scripted::Status(status)) => Err(chart_api::Error::HttpStatus {
                    status,
                    body: "Not Found\nmore".to_string(),
                }),
                Some(Scripted::Transport) | None => Err(chart_api::Error::RequestFailed),
                Some(Scripted::Malformed) => {
                    Err(chart_api::Error::Parse("expected value at line 1".to_string()))
                }
            }
        }
    }

    fn profile(symbols: &[&str]) -> SnapshotProfile {
        SnapshotProfile {
            label: "test".to_string(),
            symbols: symbols.iter().map(|s| SymbolSpec::new(s)).collect(),
            output_path: PathBuf::from("unused.json"),
            layout: SnapshotLayout::RecordList,
            source: "test".to_string(),
            region: "US".to_string(),
            include_adjusted_close: None,
            annotate: false,
        }
    }

    fn priced(price: f64, prev: f64) -> Scripted {
        Scripted::Meta(json!({
            "regularMarketPrice": price,
            "previousClose": prev,
            "currency": "USD"
        }))
    }

    #[tokio::test]
    async fn fetch_quote_present() {
        let provider = ScriptedProvider::new(vec![("^DJI", priced(43000.12, 42800.5))]);
        let profile = profile(&["^DJI"]);
        let outcome = fetch_quote(&provider, &profile, &profile.symbols[0]).await;
        let record = outcome.record().unwrap();
        assert!((record.change - 199.62).abs() < 1e-6);
    }

    #[tokio::test]
    async fn fetch_quote_requests_one_daily_bar() {
        let provider = ScriptedProvider::new(vec![("^DJI", priced(1.0, 1.0))]);
        let mut profile = profile(&["^DJI"]);
        profile.include_adjusted_close = Some(false);
        fetch_quote(&provider, &profile, &profile.symbols[0]).await;

        let calls = provider.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].interval, chart_api::Interval::Daily);
        assert_eq!(calls[0].range, chart_api::Range::OneDay);
        assert_eq!(calls[0].region, "US");
        assert_eq!(calls[0].include_adjusted_close, Some(false));
    }

    #[tokio::test]
    async fn fetch_quote_empty_result_is_no_data() {
        let provider = ScriptedProvider::new(vec![("GBPUSD=X", Scripted::Empty)]);
        let profile = profile(&["GBPUSD=X"]);
        let outcome = fetch_quote(&provider, &profile, &profile.symbols[0]).await;
        assert_eq!(outcome, QuoteOutcome::Absent(AbsenceReason::NoData));
    }

    #[tokio::test]
    async fn fetch_quote_missing_price_is_no_data() {
        let provider = ScriptedProvider::new(vec![(
            "^HSI",
            Scripted::Meta(json!({ "currency": "HKD" })),
        )]);
        let profile = profile(&["^HSI"]);
        let outcome = fetch_quote(&provider, &profile, &profile.symbols[0]).await;
        assert_eq!(outcome, QuoteOutcome::Absent(AbsenceReason::NoData));
    }

    #[tokio::test]
    async fn fetch_quote_faults_are_fetch_failed() {
        let provider = ScriptedProvider::new(vec![
            ("A", Scripted::Status(404)),
            ("B", Scripted::Transport),
            ("C", Scripted::Malformed),
        ]);
        let profile = profile(&["A", "B", "C"]);

        let a = fetch_quote(&provider, &profile, &profile.symbols[0]).await;
        assert_eq!(
            a,
            QuoteOutcome::Absent(AbsenceReason::FetchFailed("HTTP 404: Not Found".to_string()))
        );
        let b = fetch_quote(&provider, &profile, &profile.symbols[1]).await;
        assert_eq!(
            b,
            QuoteOutcome::Absent(AbsenceReason::FetchFailed("Request failed".to_string()))
        );
        let c = fetch_quote(&provider, &profile, &profile.symbols[2]).await;
        match c {
            QuoteOutcome::Absent(AbsenceReason::FetchFailed(detail)) => {
                assert!(detail.contains("expected value"))
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[tokio::test]
    async fn failure_does_not_stop_later_symbols() {
        let provider = ScriptedProvider::new(vec![
            ("^DJI", priced(43000.12, 42800.5)),
            ("^IXIC", Scripted::Transport),
            ("GBPUSD=X", Scripted::Empty),
            ("GC=F", priced(2650.4, 2631.9)),
            ("SI=F", Scripted::Status(500)),
        ]);
        let profile = profile(&["^DJI", "^IXIC", "GBPUSD=X", "GC=F", "SI=F"]);
        let run = run_snapshot(&provider, &profile, |_| {}).await;

        assert_eq!(
            provider.called_symbols(),
            vec!["^DJI", "^IXIC", "GBPUSD=X", "GC=F", "SI=F"]
        );
        assert_eq!(run.total_count(), 5);
        assert_eq!(run.success_count(), 2);

        let order: Vec<&str> = run.outcomes.iter().map(|o| o.spec.symbol.as_str()).collect();
        assert_eq!(order, vec!["^DJI", "^IXIC", "GBPUSD=X", "GC=F", "SI=F"]);
        let present: Vec<&str> = run.records().map(|r| r.symbol.as_str()).collect();
        assert_eq!(present, vec!["^DJI", "GC=F"]);
    }

    #[tokio::test]
    async fn every_symbol_failing_still_completes() {
        let provider = ScriptedProvider::new(vec![]);
        let profile = profile(&["X1", "X2", "X3"]);
        let run = run_snapshot(&provider, &profile, |_| {}).await;
        assert_eq!(run.total_count(), 3);
        assert_eq!(run.success_count(), 0);
        assert_eq!(provider.called_symbols().len(), 3);
    }

    #[tokio::test]
    async fn progress_events_bracket_each_symbol() {
        let provider = ScriptedProvider::new(vec![
            ("^DJI", priced(2.0, 1.0)),
            ("^HSI", Scripted::Empty),
        ]);
        let profile = profile(&["^DJI", "^HSI"]);
        let mut events = Vec::new();
        run_snapshot(&provider, &profile, |p| {
            events.push(match p {
                Progress::Started { index, total, spec } => {
                    format!("start {}/{} {}", index + 1, total, spec.symbol)
                }
                Progress::Finished { spec, outcome } => {
                    format!("done {} {}", spec.symbol, outcome.is_present())
                }
            })
        })
        .await;

        assert_eq!(
            events,
            vec![
                "start 1/2 ^DJI",
                "done ^DJI true",
                "start 2/2 ^HSI",
                "done ^HSI false"
            ]
        );
    }

    #[test]
    fn describe_error_variants() {
        let err = chart_api::Error::HttpStatus {
            status: 429,
            body: String::new(),
        };
        assert_eq!(describe_error(&err), "HTTP 429");
        assert_eq!(
            describe_error(&chart_api::Error::Parse("bad".into())),
            "Failed to parse chart response: bad"
        );
    }
}
