pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{HttpPageSource, LocalStorage};
pub use config::{FetchSettings, TomlConfig};
pub use crate::core::{
    engine::FetchEngine, fetcher::PaginatedFetcher, persist::write_results, Record, StopReason,
};
pub use utils::error::{FetchError, Result};
