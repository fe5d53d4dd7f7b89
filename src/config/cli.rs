use crate::config::{
    DEFAULT_ENDPOINT, DEFAULT_NAME_FIELD, DEFAULT_OUTPUT_FILE, DEFAULT_OUTPUT_PATH,
    DEFAULT_RECORD_PATH, DEFAULT_USER_AGENT,
};
use crate::core::ConfigProvider;
use crate::utils::error::{FetchError, Result};
use crate::utils::validation::Validate;
use crate::{FetchSettings, TomlConfig};
use clap::Parser;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Parser)]
#[command(name = "catalog-fetch")]
#[command(about = "Fetch every page of a catalog API into one JSON file")]
pub struct CliConfig {
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    #[arg(long, default_value = "20")]
    pub page_size: usize,

    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    #[arg(
        long = "param",
        value_name = "KEY=VALUE",
        default_values = ["enableNewFilters=false", "strain_playlist="],
        help = "Static query parameter sent with every page"
    )]
    pub params: Vec<String>,

    #[arg(long, default_value = DEFAULT_RECORD_PATH)]
    pub record_path: String,

    #[arg(long, default_value = DEFAULT_NAME_FIELD)]
    pub name_field: String,

    #[arg(long)]
    pub max_pages: Option<usize>,

    #[arg(long, default_value = DEFAULT_OUTPUT_PATH)]
    pub output_path: String,

    #[arg(long, default_value = DEFAULT_OUTPUT_FILE)]
    pub output_file: String,

    #[arg(long, help = "Read settings from a TOML file instead of the flags above")]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

fn split_param(raw: &str) -> Option<(&str, &str)> {
    raw.split_once('=').filter(|(key, _)| !key.is_empty())
}

impl ConfigProvider for CliConfig {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn page_size(&self) -> usize {
        self.page_size
    }

    fn user_agent(&self) -> &str {
        &self.user_agent
    }

    fn parameters(&self) -> BTreeMap<String, String> {
        self.params
            .iter()
            .filter_map(|raw| split_param(raw))
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn record_path(&self) -> &str {
        &self.record_path
    }

    fn name_field(&self) -> &str {
        &self.name_field
    }

    fn max_pages(&self) -> Option<usize> {
        self.max_pages
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_file(&self) -> &str {
        &self.output_file
    }
}

impl CliConfig {
    /// A `--config` file replaces every other flag; otherwise the flags are used.
    pub fn resolve_settings(&self) -> Result<FetchSettings> {
        match &self.config {
            Some(path) => {
                tracing::info!("Loading configuration from {}", path);
                let toml_config = TomlConfig::from_file(path)?;
                toml_config.validate()?;
                Ok(FetchSettings::from_provider(&toml_config))
            }
            None => {
                self.validate()?;
                Ok(FetchSettings::from_provider(self))
            }
        }
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(bad) = self.params.iter().find(|raw| split_param(raw).is_none()) {
            return Err(FetchError::InvalidConfigValue {
                field: "param".to_string(),
                value: bad.clone(),
                reason: "Expected KEY=VALUE".to_string(),
            });
        }
        FetchSettings::from_provider(self).validate()
    }
}
