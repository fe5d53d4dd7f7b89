use crate::domain::model::{PageRequest, PageResponse};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn endpoint(&self) -> &str;
    fn page_size(&self) -> usize;
    fn user_agent(&self) -> &str;
    fn parameters(&self) -> BTreeMap<String, String>;
    fn record_path(&self) -> &str;
    fn name_field(&self) -> &str;
    fn max_pages(&self) -> Option<usize>;
    fn output_path(&self) -> &str;
    fn output_file(&self) -> &str;
}

#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch_page(&self, endpoint: &str, request: &PageRequest) -> Result<PageResponse>;
}
