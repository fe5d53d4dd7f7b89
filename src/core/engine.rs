use crate::core::fetcher::PaginatedFetcher;
use crate::core::persist::write_results;
use crate::core::{PageSource, Result, RunSummary, Storage};

/// Fetches everything first, then writes the results file once.
pub struct FetchEngine<P: PageSource, S: Storage> {
    fetcher: PaginatedFetcher<P>,
    storage: S,
}

impl<P: PageSource, S: Storage> FetchEngine<P, S> {
    pub fn new(fetcher: PaginatedFetcher<P>, storage: S) -> Self {
        Self { fetcher, storage }
    }

    pub async fn run(&self) -> Result<RunSummary> {
        let settings = self.fetcher.settings();
        tracing::info!(
            "Fetching {} in pages of {}",
            settings.endpoint,
            settings.page_size
        );

        let outcome = self.fetcher.fetch_all().await?;
        tracing::info!(
            "Collected {} records from {} pages ({})",
            outcome.records.len(),
            outcome.pages_fetched,
            outcome.stop_reason
        );

        let output_path =
            write_results(&self.storage, &settings.output_file, &outcome.records).await?;

        Ok(RunSummary {
            output_path,
            record_count: outcome.records.len(),
            pages_fetched: outcome.pages_fetched,
            stop_reason: outcome.stop_reason,
        })
    }
}
