#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::TomlConfig;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use std::collections::BTreeMap;

pub const DEFAULT_ENDPOINT: &str = "https://consumer-api.leafly.com/api/strain_playlists/v2";
pub const DEFAULT_PAGE_SIZE: usize = 20;
pub const DEFAULT_RECORD_PATH: &str = "hits.strain";
pub const DEFAULT_NAME_FIELD: &str = "name";
pub const DEFAULT_OUTPUT_PATH: &str = ".";
pub const DEFAULT_OUTPUT_FILE: &str = "results.json";
/// The catalog API rejects clients without a browser-like user agent.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

pub fn default_parameters() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("enableNewFilters".to_string(), "false".to_string()),
        ("strain_playlist".to_string(), String::new()),
    ])
}

/// Resolved settings for one run, independent of where they were read from.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchSettings {
    pub endpoint: String,
    pub page_size: usize,
    pub user_agent: String,
    pub parameters: BTreeMap<String, String>,
    pub record_path: String,
    pub name_field: String,
    pub max_pages: Option<usize>,
    pub output_path: String,
    pub output_file: String,
}

impl FetchSettings {
    pub fn from_provider<C: ConfigProvider + ?Sized>(config: &C) -> Self {
        Self {
            endpoint: config.endpoint().to_string(),
            page_size: config.page_size(),
            user_agent: config.user_agent().to_string(),
            parameters: config.parameters(),
            record_path: config.record_path().to_string(),
            name_field: config.name_field().to_string(),
            max_pages: config.max_pages(),
            output_path: config.output_path().to_string(),
            output_file: config.output_file().to_string(),
        }
    }

    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            parameters: default_parameters(),
            record_path: DEFAULT_RECORD_PATH.to_string(),
            name_field: DEFAULT_NAME_FIELD.to_string(),
            max_pages: None,
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
            output_file: DEFAULT_OUTPUT_FILE.to_string(),
        }
    }
}

impl Validate for FetchSettings {
    fn validate(&self) -> Result<()> {
        validation::validate_url("endpoint", &self.endpoint)?;
        validation::validate_positive_number("page_size", self.page_size, 1)?;
        validation::validate_non_empty_string("user_agent", &self.user_agent)?;
        validation::validate_record_path("record_path", &self.record_path)?;
        validation::validate_non_empty_string("name_field", &self.name_field)?;
        if let Some(max_pages) = self.max_pages {
            validation::validate_positive_number("max_pages", max_pages, 1)?;
        }
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_path("output_file", &self.output_file)?;
        Ok(())
    }
}
