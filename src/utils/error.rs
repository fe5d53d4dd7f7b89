use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Malformed page at offset {offset}: {reason}")]
    MalformedPage { offset: usize, reason: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },
}

impl FetchError {
    pub fn malformed(offset: usize, reason: impl Into<String>) -> Self {
        FetchError::MalformedPage {
            offset,
            reason: reason.into(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            FetchError::Http(e) if e.is_connect() => {
                "Could not connect to the catalog API".to_string()
            }
            FetchError::Http(e) if e.is_timeout() => "The catalog API timed out".to_string(),
            FetchError::Http(_) => "The request to the catalog API failed".to_string(),
            FetchError::Io(e) => format!("Could not write the results file: {}", e),
            FetchError::Serialization(e) => {
                format!("The catalog API returned a body that is not valid JSON: {}", e)
            }
            FetchError::MalformedPage { offset, reason } => format!(
                "The page at offset {} did not have the expected shape: {}",
                offset, reason
            ),
            FetchError::ConfigError { message } => format!("Configuration problem: {}", message),
            FetchError::InvalidConfigValue { field, reason, .. } => {
                format!("Configuration field '{}' is invalid: {}", field, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            FetchError::Http(_) => "Check network connectivity and the --endpoint value",
            FetchError::Io(_) => "Check that the output directory exists and is writable",
            FetchError::Serialization(_) | FetchError::MalformedPage { .. } => {
                "The API response format may have changed; check --record-path or rerun with --verbose"
            }
            FetchError::ConfigError { .. } | FetchError::InvalidConfigValue { .. } => {
                "Fix the configuration and run again"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, FetchError>;
