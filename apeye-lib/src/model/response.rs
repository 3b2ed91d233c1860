use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;

pub const NETWORK_ERROR_STATUS_TEXT: &str = "CORS / Network Error";
pub const CORS_ERROR_STATUS_TEXT: &str = "CORS Error";

/// A completed exchange as shown in the response viewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    pub status: u16,
    pub status_text: String,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    #[serde(default)]
    pub data: Value,
    /// Elapsed milliseconds.
    #[serde(default)]
    pub time: u64,
    /// Body size in bytes.
    #[serde(default)]
    pub size: u64,
}

impl ApiResponse {
    /// Builds a response from raw body text. JSON bodies are parsed; anything
    /// else is kept verbatim as a string.
    pub fn from_text(
        status: u16,
        status_text: impl Into<String>,
        headers: BTreeMap<String, String>,
        text: String,
        time: u64,
    ) -> Self {
        let size = text.len() as u64;
        let data = serde_json::from_str(&text).unwrap_or(Value::String(text));
        Self {
            status,
            status_text: status_text.into(),
            headers,
            data,
            time,
            size,
        }
    }

    /// Stand-in for a direct request that never reached the target.
    pub fn network_error() -> Self {
        Self::synthetic(
            NETWORK_ERROR_STATUS_TEXT,
            json!({
                "error": "Could not reach your local server",
                "tips": [
                    "1. Make sure your server is running on the specified port",
                    "2. Add CORS headers to your server. Example for Express.js:",
                    "   app.use(cors({ origin: \"*\" }))",
                    "3. Or use a browser extension like \"Allow CORS\" to bypass restrictions",
                ]
            }),
        )
    }

    pub fn cors_blocked() -> Self {
        Self::synthetic(
            CORS_ERROR_STATUS_TEXT,
            json!({
                "error": "The target server is blocking browser requests. The server needs to allow CORS from this origin."
            }),
        )
    }

    fn synthetic(status_text: &str, data: Value) -> Self {
        Self {
            status: 0,
            status_text: status_text.to_string(),
            headers: BTreeMap::new(),
            data,
            time: 0,
            size: 0,
        }
    }

    /// True for the zero-status responses produced when no exchange happened.
    pub fn is_network_error(&self) -> bool {
        self.status == 0
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn content_type(&self) -> &str {
        content_type(&self.headers)
    }

    /// Body rendered for display: JSON pretty-printed, strings as-is.
    pub fn pretty_body(&self) -> String {
        match &self.data {
            Value::Null => String::new(),
            Value::String(text) => match serde_json::from_str::<Value>(text) {
                Ok(parsed) => serde_json::to_string_pretty(&parsed).unwrap_or_else(|_| text.clone()),
                Err(_) => text.clone(),
            },
            other => serde_json::to_string_pretty(other).unwrap_or_default(),
        }
    }
}

/// Case-insensitive `Content-Type` lookup, `text/plain` when absent.
pub fn content_type(headers: &BTreeMap<String, String>) -> &str {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case("content-type"))
        .map(|(_, value)| value.as_str())
        .unwrap_or("text/plain")
}

pub fn is_json(content_type: &str) -> bool {
    content_type.contains("application/json") || content_type.contains("text/json")
}

pub fn is_xml(content_type: &str) -> bool {
    content_type.contains("application/xml") || content_type.contains("text/xml")
}

pub fn is_html(content_type: &str) -> bool {
    content_type.contains("text/html")
}

pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let exponent = ((bytes as f64).ln() / 1024f64.ln()).floor() as usize;
    let exponent = exponent.min(UNITS.len() - 1);
    let scaled = bytes as f64 / 1024f64.powi(exponent as i32);
    let rounded = (scaled * 100.0).round() / 100.0;
    format!("{rounded} {}", UNITS[exponent])
}

pub fn format_time(ms: u64) -> String {
    if ms < 1000 {
        format!("{ms}ms")
    } else {
        format!("{:.2}s", ms as f64 / 1000.0)
    }
}
