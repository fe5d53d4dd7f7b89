use crate::utils::error::{FetchError, Result};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use url::Url;

/// One catalog entry, kept exactly as the API returned it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    pub data: Map<String, Value>,
}

impl Record {
    pub fn new(data: Map<String, Value>) -> Self {
        Self { data }
    }

    /// Strings are returned unquoted; any other value in its JSON form.
    pub fn display_name(&self, field: &str) -> Option<String> {
        self.data.get(field).map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }
}

/// Offset and size of one page, plus the query parameters sent on every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub skip: usize,
    pub take: usize,
    pub parameters: BTreeMap<String, String>,
}

impl PageRequest {
    pub fn first(take: usize, parameters: BTreeMap<String, String>) -> Self {
        Self {
            skip: 0,
            take,
            parameters,
        }
    }

    pub fn advance(&mut self) -> Result<()> {
        self.skip = self
            .skip
            .checked_add(self.take)
            .ok_or_else(|| FetchError::ConfigError {
                message: format!("offset overflow after skip={} take={}", self.skip, self.take),
            })?;
        Ok(())
    }

    /// Query keys are emitted in sorted order.
    pub fn to_url(&self, endpoint: &str) -> Result<Url> {
        let mut url = Url::parse(endpoint).map_err(|e| FetchError::InvalidConfigValue {
            field: "endpoint".to_string(),
            value: endpoint.to_string(),
            reason: format!("Invalid URL format: {}", e),
        })?;

        let mut query = self.parameters.clone();
        query.insert("skip".to_string(), self.skip.to_string());
        query.insert("take".to_string(), self.take.to_string());

        url.query_pairs_mut()
            .clear()
            .extend_pairs(query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        Ok(url)
    }
}

#[derive(Debug, Clone)]
pub struct PageResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl PageResponse {
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Parses the body and pulls the record list out of the dotted `record_path`.
    pub fn records(&self, record_path: &str, offset: usize) -> Result<Vec<Record>> {
        let json: Value = serde_json::from_slice(&self.body)?;

        let mut node = &json;
        for segment in record_path.split('.') {
            node = node.get(segment).ok_or_else(|| {
                FetchError::malformed(offset, format!("missing '{}'", record_path))
            })?;
        }

        let items = node.as_array().ok_or_else(|| {
            FetchError::malformed(offset, format!("'{}' is not an array", record_path))
        })?;

        items
            .iter()
            .enumerate()
            .map(|(i, item)| match item {
                Value::Object(obj) => Ok(Record::new(obj.clone())),
                _ => Err(FetchError::malformed(
                    offset,
                    format!("item {} of '{}' is not an object", i, record_path),
                )),
            })
            .collect()
    }
}

/// Why the pagination loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    ServerRefused { status: StatusCode },
    ContentRepeated,
    PageLimit,
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StopReason::ServerRefused { status } => write!(f, "server refused with {}", status),
            StopReason::ContentRepeated => write!(f, "server repeated the previous page"),
            StopReason::PageLimit => write!(f, "page limit reached"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FetchOutcome {
    pub records: Vec<Record>,
    pub pages_fetched: usize,
    pub stop_reason: StopReason,
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub output_path: String,
    pub record_count: usize,
    pub pages_fetched: usize,
    pub stop_reason: StopReason,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn strain_params() -> BTreeMap<String, String> {
        BTreeMap::from([
            ("enableNewFilters".to_string(), "false".to_string()),
            ("strain_playlist".to_string(), String::new()),
        ])
    }

    #[test]
    fn test_page_url_matches_catalog_query() {
        let mut request = PageRequest::first(20, strain_params());
        request.advance().unwrap();
        let url = request
            .to_url("https://consumer-api.leafly.com/api/strain_playlists/v2")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://consumer-api.leafly.com/api/strain_playlists/v2?enableNewFilters=false&skip=20&strain_playlist=&take=20"
        );
    }

    #[test]
    fn test_page_url_replaces_existing_query() {
        let request = PageRequest::first(5, BTreeMap::new());
        let url = request.to_url("http://localhost/items?skip=99").unwrap();
        assert_eq!(url.query(), Some("skip=0&take=5"));
    }

    #[test]
    fn test_records_extracted_in_order() {
        let body = json!({
            "hits": {"strain": [{"name": "Blue Dream", "thc": 18}, {"name": "OG Kush"}]}
        });
        let page = PageResponse::new(StatusCode::OK, body.to_string());
        let records = page.records("hits.strain", 0).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].display_name("name").as_deref(), Some("Blue Dream"));
        assert_eq!(records[0].data["thc"], json!(18));
        assert_eq!(records[1].display_name("name").as_deref(), Some("OG Kush"));
    }

    #[test]
    fn test_records_missing_path_is_malformed() {
        let page = PageResponse::new(StatusCode::OK, r#"{"hits": {}}"#);
        let err = page.records("hits.strain", 20).unwrap_err();
        assert!(matches!(err, FetchError::MalformedPage { offset: 20, .. }));
    }

    #[test]
    fn test_records_non_array_is_malformed() {
        let page = PageResponse::new(StatusCode::OK, r#"{"hits": {"strain": "nope"}}"#);
        assert!(matches!(
            page.records("hits.strain", 0),
            Err(FetchError::MalformedPage { .. })
        ));
    }

    #[test]
    fn test_records_invalid_json_is_serialization_error() {
        let page = PageResponse::new(StatusCode::OK, "<html>blocked</html>");
        assert!(matches!(
            page.records("hits.strain", 0),
            Err(FetchError::Serialization(_))
        ));
    }

    #[test]
    fn test_record_serializes_as_plain_object() {
        let record: Record = serde_json::from_value(json!({"name": "Haze", "id": 7})).unwrap();
        assert_eq!(
            serde_json::to_string(&record).unwrap(),
            r#"{"name":"Haze","id":7}"#
        );
    }

    #[test]
    fn test_display_name_of_non_string_values() {
        let record: Record =
            serde_json::from_value(json!({"name": 42, "alias": null, "tags": ["a"]})).unwrap();
        assert_eq!(record.display_name("name").as_deref(), Some("42"));
        assert_eq!(record.display_name("alias").as_deref(), Some("null"));
        assert_eq!(record.display_name("tags").as_deref(), Some(r#"["a"]"#));
        assert_eq!(record.display_name("missing"), None);
    }

    #[test]
    fn test_records_keep_numbers_verbatim() {
        let body = r#"{"hits":{"strain":[{"name":"Big","id":123456789012345678901234567890,"p":1.10}]}}"#;
        let page = PageResponse::new(StatusCode::OK, body);
        let records = page.records("hits.strain", 0).unwrap();

        assert_eq!(
            serde_json::to_string(&records[0]).unwrap(),
            r#"{"name":"Big","id":123456789012345678901234567890,"p":1.10}"#
        );
    }

    #[test]
    fn test_advance_overflow_is_error() {
        let mut request = PageRequest::first(5, BTreeMap::new());
        request.skip = usize::MAX - 2;
        assert!(matches!(
            request.advance(),
            Err(FetchError::ConfigError { .. })
        ));
        assert_eq!(request.skip, usize::MAX - 2);
    }
}
