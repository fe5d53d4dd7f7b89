use crate::config::FetchSettings;
use crate::core::{FetchOutcome, PageRequest, PageSource, Record, Result, StopReason};
use crate::utils::error::FetchError;
use reqwest::StatusCode;

/// Walks the catalog page by page until the server refuses or repeats itself.
pub struct PaginatedFetcher<P: PageSource> {
    source: P,
    settings: FetchSettings,
}

impl<P: PageSource> PaginatedFetcher<P> {
    pub fn new(source: P, settings: FetchSettings) -> Self {
        Self { source, settings }
    }

    pub fn settings(&self) -> &FetchSettings {
        &self.settings
    }

    pub fn source(&self) -> &P {
        &self.source
    }

    /// Non-200 and repeated content end the loop normally; transport and
    /// parse failures abort it. Records of the repeated page are not kept.
    pub async fn fetch_all(&self) -> Result<FetchOutcome> {
        let mut request =
            PageRequest::first(self.settings.page_size, self.settings.parameters.clone());
        let mut previous_body: Option<Vec<u8>> = None;
        let mut records: Vec<Record> = Vec::new();
        let mut pages_fetched = 0;

        let stop_reason = loop {
            if self
                .settings
                .max_pages
                .is_some_and(|max| pages_fetched >= max)
            {
                break StopReason::PageLimit;
            }

            let page = self
                .source
                .fetch_page(&self.settings.endpoint, &request)
                .await?;

            // 伺服器拒絕即視為資料結束
            if page.status != StatusCode::OK {
                break StopReason::ServerRefused {
                    status: page.status,
                };
            }

            // 與上一頁內容完全相同表示已無新資料
            if previous_body.as_deref() == Some(page.body.as_slice()) {
                break StopReason::ContentRepeated;
            }

            let page_records = page.records(&self.settings.record_path, request.skip)?;
            tracing::debug!(
                "Page at skip={} returned {} records",
                request.skip,
                page_records.len()
            );

            for record in page_records {
                let name = record
                    .display_name(&self.settings.name_field)
                    .ok_or_else(|| {
                        FetchError::malformed(
                            request.skip,
                            format!("record without '{}'", self.settings.name_field),
                        )
                    })?;
                println!("{}", name);
                records.push(record);
            }

            previous_body = Some(page.body);
            pages_fetched += 1;
            request.advance()?;

            println!("Fetched: {}", records.len());
        };

        tracing::info!(
            "Pagination stopped after {} pages: {}",
            pages_fetched,
            stop_reason
        );

        Ok(FetchOutcome {
            records,
            pages_fetched,
            stop_reason,
        })
    }
}
