use super::http_method::HttpMethod;
use super::request_config::RequestConfig;
use super::response::ApiResponse;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A request/response pair stored by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    pub method: HttpMethod,
    pub url: String,
    #[serde(default)]
    pub request_data: Value,
    #[serde(default)]
    pub response_data: Value,
    #[serde(default)]
    pub status_code: u16,
    #[serde(default)]
    pub response_time: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Payload for recording a locally executed request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewHistoryEntry {
    pub method: HttpMethod,
    pub url: String,
    pub request_data: Value,
    pub response_data: Value,
    pub status_code: u16,
    pub response_time: u64,
}

impl NewHistoryEntry {
    pub fn new(config: &RequestConfig, response: &ApiResponse) -> Self {
        Self {
            method: config.method,
            url: config.url.clone(),
            request_data: serde_json::to_value(config).unwrap_or(Value::Null),
            response_data: serde_json::to_value(response).unwrap_or(Value::Null),
            status_code: response.status,
            response_time: response.time,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Success,
    Error,
}

impl StatusFilter {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Some(Self::All),
            "success" => Some(Self::Success),
            "error" => Some(Self::Error),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct HistoryFilter {
    /// `None` keeps every method.
    pub method: Option<HttpMethod>,
    pub status: StatusFilter,
    pub search_query: String,
}

impl HistoryFilter {
    pub fn matches(&self, entry: &HistoryEntry) -> bool {
        if let Some(method) = self.method {
            if entry.method != method {
                return false;
            }
        }

        let success = (200..300).contains(&entry.status_code);
        match self.status {
            StatusFilter::Success if !success => return false,
            StatusFilter::Error if success => return false,
            _ => {}
        }

        if self.search_query.is_empty() {
            return true;
        }
        entry
            .url
            .to_lowercase()
            .contains(&self.search_query.to_lowercase())
    }

    pub fn apply<'a>(&self, entries: &'a [HistoryEntry]) -> Vec<&'a HistoryEntry> {
        entries.iter().filter(|entry| self.matches(entry)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(method: HttpMethod, url: &str, status_code: u16) -> HistoryEntry {
        HistoryEntry {
            id: format!("{method}-{status_code}"),
            user_id: "u1".into(),
            method,
            url: url.into(),
            request_data: Value::Null,
            response_data: Value::Null,
            status_code,
            response_time: 5,
            created_at: None,
        }
    }

    #[test]
    fn test_filter_by_method_status_and_search() {
        let entries = vec![
            entry(HttpMethod::GET, "https://api.example.com/users", 200),
            entry(HttpMethod::POST, "https://api.example.com/users", 422),
            entry(HttpMethod::GET, "http://localhost:3000/Health", 503),
        ];

        let filter = HistoryFilter::default();
        assert_eq!(filter.apply(&entries).len(), 3);

        let filter = HistoryFilter {
            method: Some(HttpMethod::GET),
            ..Default::default()
        };
        assert_eq!(filter.apply(&entries).len(), 2);

        let filter = HistoryFilter {
            status: StatusFilter::Error,
            ..Default::default()
        };
        assert_eq!(filter.apply(&entries).len(), 2);

        let filter = HistoryFilter {
            status: StatusFilter::Success,
            search_query: "USERS".into(),
            ..Default::default()
        };
        let matched = filter.apply(&entries);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].status_code, 200);

        let filter = HistoryFilter {
            search_query: "health".into(),
            ..Default::default()
        };
        assert_eq!(filter.apply(&entries).len(), 1);
    }

    #[test]
    fn test_new_entry_from_exchange() {
        let config = RequestConfig::new(HttpMethod::GET, "http://localhost:8080/ping");
        let response =
            ApiResponse::from_text(200, "OK", Default::default(), "pong".into(), 7);
        let entry = NewHistoryEntry::new(&config, &response);
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["statusCode"], 200);
        assert_eq!(json["responseTime"], 7);
        assert_eq!(json["requestData"]["url"], "http://localhost:8080/ping");
        assert_eq!(json["responseData"]["data"], "pong");
    }

    #[test]
    fn test_status_filter_parse() {
        assert_eq!(StatusFilter::parse("Success"), Some(StatusFilter::Success));
        assert_eq!(StatusFilter::parse("2xx"), None);
    }
}
