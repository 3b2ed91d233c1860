use apeye_lib::model::response::{format_bytes, format_time};
use apeye_lib::ApiResponse;
use clap::ValueEnum;
use serde::Serialize;
use serde_json::Value;
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Indented `key: value` rendering of any serializable view.
fn render_text<T: Serialize + ?Sized>(model: &T) -> String {
    let value = serde_json::to_value(model).unwrap_or(Value::Null);
    let mut out = String::new();
    render_value(&mut out, &value, 0);
    out
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn render_value(out: &mut String, value: &Value, indent: usize) {
    let pad = " ".repeat(indent);
    match value {
        Value::Null => {}
        Value::Array(items) => {
            for item in items {
                if item.is_object() || item.is_array() {
                    let _ = writeln!(out, "{pad}-");
                    render_value(out, item, indent + 2);
                } else {
                    let _ = writeln!(out, "{pad}- {}", scalar(item));
                }
            }
        }
        Value::Object(map) => {
            for (key, item) in map {
                match item {
                    Value::Null => {}
                    Value::Array(a) if a.is_empty() => {}
                    Value::Object(o) if o.is_empty() => {}
                    Value::Array(_) | Value::Object(_) => {
                        let _ = writeln!(out, "{pad}{key}:");
                        render_value(out, item, indent + 2);
                    }
                    _ => {
                        let _ = writeln!(out, "{pad}{key}: {}", scalar(item));
                    }
                }
            }
        }
        scalar_value => {
            for line in scalar(scalar_value).lines() {
                let _ = writeln!(out, "{pad}{line}");
            }
        }
    }
}

pub struct Formatter {
    engine: OutputFormat,
}

impl Formatter {
    pub fn new(engine: OutputFormat) -> Self {
        Self { engine }
    }

    pub fn format<T: Serialize>(&self, model: &T) -> String {
        match self.engine {
            OutputFormat::Text => render_text(model),
            OutputFormat::Json => json_line(model),
        }
    }

    pub fn format_list<T: Serialize>(&self, list: &[T], title: &str, empty_msg: &str) -> String {
        match self.engine {
            OutputFormat::Text if list.is_empty() => format!("{empty_msg}\n"),
            OutputFormat::Text if title.is_empty() => render_text(list),
            OutputFormat::Text => format!("{title}\n{}", render_text(list)),
            OutputFormat::Json => json_line(list),
        }
    }

    /// Status line, headers and the pretty-printed body.
    pub fn format_response(&self, response: &ApiResponse) -> String {
        if self.engine == OutputFormat::Json {
            return json_line(response);
        }

        let mut out = String::new();
        let _ = writeln!(out, "status: {} {}", response.status, response.status_text);
        let _ = writeln!(out, "time: {}", format_time(response.time));
        let _ = writeln!(out, "size: {}", format_bytes(response.size));
        if !response.headers.is_empty() {
            let _ = writeln!(out, "headers:");
            for (name, value) in &response.headers {
                let _ = writeln!(out, "  {name}: {value}");
            }
        }
        let body = response.pretty_body();
        if !body.is_empty() {
            let _ = writeln!(out, "body:");
            let _ = writeln!(out, "{body}");
        }
        out
    }
}

fn json_line<T: Serialize + ?Sized>(model: &T) -> String {
    let mut json = serde_json::to_string_pretty(model).unwrap_or_else(|_| "null".to_string());
    json.push('\n');
    json
}

pub fn get_formatter(output_format: &OutputFormat) -> Formatter {
    Formatter::new(*output_format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::BTreeMap;

    #[test]
    fn test_text_render_nested() {
        let view = json!({
            "name": "dev",
            "active": true,
            "variables": ["host", "token"],
            "empty": [],
            "skipped": null
        });
        let text = Formatter::new(OutputFormat::Text).format(&view);
        assert_eq!(
            text,
            "active: true\nname: dev\nvariables:\n  - host\n  - token\n"
        );
    }

    #[test]
    fn test_list_empty_message() {
        let formatter = Formatter::new(OutputFormat::Text);
        let empty: Vec<String> = Vec::new();
        assert_eq!(
            formatter.format_list(&empty, "Items:", "No items found"),
            "No items found\n"
        );
        assert_eq!(
            Formatter::new(OutputFormat::Json).format_list(&empty, "Items:", "none"),
            "[]\n"
        );
    }

    #[test]
    fn test_response_text() {
        let mut headers = BTreeMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());
        let response = ApiResponse::from_text(200, "OK", headers, r#"{"a":1}"#.into(), 42);

        let text = Formatter::new(OutputFormat::Text).format_response(&response);
        assert!(text.starts_with("status: 200 OK\ntime: 42ms\n"));
        assert!(text.contains("  content-type: application/json\n"));
        assert!(text.contains("body:\n{\n  \"a\": 1\n}\n"));
    }

    #[test]
    fn test_response_json() {
        let response = ApiResponse::network_error();
        let json: Value =
            serde_json::from_str(&Formatter::new(OutputFormat::Json).format_response(&response))
                .unwrap();
        assert_eq!(json["status"], 0);
        assert_eq!(json["statusText"], "CORS / Network Error");
    }
}
