use crate::core::{PageRequest, PageResponse, PageSource, Result};
use async_trait::async_trait;
use reqwest::Client;

/// Fetches pages over HTTP with a fixed `User-Agent`.
#[derive(Debug, Clone)]
pub struct HttpPageSource {
    client: Client,
}

impl HttpPageSource {
    pub fn new(user_agent: &str) -> Result<Self> {
        let client = Client::builder().user_agent(user_agent).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    async fn fetch_page(&self, endpoint: &str, request: &PageRequest) -> Result<PageResponse> {
        let url = request.to_url(endpoint)?;

        tracing::debug!("Making API request to: {}", url);
        let response = self.client.get(url).send().await?;
        let status = response.status();
        tracing::debug!("API response status: {}", status);

        let body = response.bytes().await?;
        Ok(PageResponse::new(status, body.to_vec()))
    }
}
