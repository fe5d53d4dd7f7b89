pub mod engine;
pub mod fetcher;
pub mod persist;

pub use crate::domain::model::{
    FetchOutcome, PageRequest, PageResponse, Record, RunSummary, StopReason,
};
pub use crate::domain::ports::{ConfigProvider, PageSource, Storage};
pub use crate::utils::error::Result;
