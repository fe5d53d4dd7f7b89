use crate::config::{
    default_parameters, DEFAULT_ENDPOINT, DEFAULT_NAME_FIELD, DEFAULT_OUTPUT_FILE,
    DEFAULT_OUTPUT_PATH, DEFAULT_PAGE_SIZE, DEFAULT_RECORD_PATH, DEFAULT_USER_AGENT,
};
use crate::core::ConfigProvider;
use crate::utils::error::{FetchError, Result};
use crate::utils::validation::Validate;
use crate::FetchSettings;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub load: LoadConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceConfig {
    pub endpoint: Option<String>,
    pub user_agent: Option<String>,
    pub page_size: Option<usize>,
    pub max_pages: Option<usize>,
    pub record_path: Option<String>,
    pub name_field: Option<String>,
    pub parameters: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoadConfig {
    pub output_path: Option<String>,
    pub output_file: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| FetchError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| FetchError::ConfigError {
            message: format!("env substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl ConfigProvider for TomlConfig {
    fn endpoint(&self) -> &str {
        self.source.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT)
    }

    fn page_size(&self) -> usize {
        self.source.page_size.unwrap_or(DEFAULT_PAGE_SIZE)
    }

    fn user_agent(&self) -> &str {
        self.source.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT)
    }

    fn parameters(&self) -> BTreeMap<String, String> {
        self.source
            .parameters
            .clone()
            .unwrap_or_else(default_parameters)
    }

    fn record_path(&self) -> &str {
        self.source.record_path.as_deref().unwrap_or(DEFAULT_RECORD_PATH)
    }

    fn name_field(&self) -> &str {
        self.source.name_field.as_deref().unwrap_or(DEFAULT_NAME_FIELD)
    }

    fn max_pages(&self) -> Option<usize> {
        self.source.max_pages
    }

    fn output_path(&self) -> &str {
        self.load.output_path.as_deref().unwrap_or(DEFAULT_OUTPUT_PATH)
    }

    fn output_file(&self) -> &str {
        self.load.output_file.as_deref().unwrap_or(DEFAULT_OUTPUT_FILE)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        FetchSettings::from_provider(self).validate()
    }
}
