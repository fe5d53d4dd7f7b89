use crate::core::{Record, Result, Storage};

/// Writes all records as one pretty-printed JSON array, replacing `path`.
pub async fn write_results<S: Storage>(storage: &S, path: &str, records: &[Record]) -> Result<String> {
    let json = serde_json::to_string_pretty(records)?;
    tracing::debug!("Writing {} records ({} bytes) to {}", records.len(), json.len(), path);
    storage.write_file(path, json.as_bytes()).await
}
