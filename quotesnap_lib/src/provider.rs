//! The quote provider capability consumed by the fetcher.

use std::future::Future;

use chart_api::types::ChartResponse;
use chart_api::ChartQuery;

/// Something that can answer a chart request.
///
/// `chart_api::Client` is the production implementation; tests substitute
/// scripted providers.
pub trait QuoteProvider {
    fn fetch_chart(
        &self,
        query: &ChartQuery,
    ) -> impl Future<Output = Result<ChartResponse, chart_api::Error>> + Send;
}

impl QuoteProvider for chart_api::Client {
    async fn fetch_chart(&self, query: &ChartQuery) -> Result<ChartResponse, chart_api::Error> {
        self.get_chart(query).await
    }
}
