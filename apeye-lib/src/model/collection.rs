use super::http_method::HttpMethod;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub id: String,
    #[serde(default)]
    pub workspace_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub requests: Vec<SavedRequest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// A request stored in a collection. Tables are flat JSON objects here,
/// not the row lists of [`crate::RequestConfig`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedRequest {
    pub id: String,
    pub collection_id: String,
    pub name: String,
    pub method: HttpMethod,
    pub url: String,
    #[serde(default)]
    pub headers: Value,
    #[serde(default)]
    pub params: Value,
    #[serde(default)]
    pub auth: Value,
    #[serde(default)]
    pub body: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateCollectionInput {
    pub workspace_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateCollectionInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SaveRequestInput {
    pub collection_id: String,
    pub name: String,
    pub method: HttpMethod,
    pub url: String,
    pub headers: Value,
    pub params: Value,
    pub auth: Value,
    pub body: Value,
}

impl SaveRequestInput {
    /// Flattens the enabled rows of a config into the stored shape.
    pub fn from_config(
        collection_id: impl Into<String>,
        name: impl Into<String>,
        config: &crate::RequestConfig,
    ) -> Self {
        let mut body = serde_json::Map::new();
        body.insert(
            "type".into(),
            Value::String(config.body.body_type().as_str().to_string()),
        );
        body.insert(
            "content".into(),
            Value::String(config.body.content().unwrap_or_default().to_string()),
        );
        body.insert("formData".into(), flatten(config.body.enabled_form_data()));

        Self {
            collection_id: collection_id.into(),
            name: name.into(),
            method: config.method,
            url: config.url.clone(),
            headers: flatten(config.enabled_headers()),
            params: flatten(config.enabled_params()),
            auth: serde_json::to_value(&config.auth).unwrap_or(Value::Null),
            body: Value::Object(body),
        }
    }
}

fn flatten<'a>(rows: impl Iterator<Item = &'a crate::KeyValue>) -> Value {
    Value::Object(
        rows.map(|row| (row.key.clone(), Value::String(row.value.clone())))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Body, KeyValue, RequestConfig};

    #[test]
    fn test_save_input_round_trips_through_config() {
        let mut config = RequestConfig::new(HttpMethod::PUT, "https://api.example.com/items/1");
        config.params = vec![
            KeyValue::new("force", "true"),
            KeyValue::new("skip", "1").disabled(),
        ];
        config.body = Body::Json {
            content: r#"{"name":"x"}"#.into(),
        };

        let input = SaveRequestInput::from_config("c1", "Update item", &config);
        assert_eq!(input.params, serde_json::json!({"force": "true"}));
        assert_eq!(input.body["type"], "json");

        let saved = SavedRequest {
            id: "r1".into(),
            collection_id: input.collection_id.clone(),
            name: input.name.clone(),
            method: input.method,
            url: input.url.clone(),
            headers: input.headers.clone(),
            params: input.params.clone(),
            auth: input.auth.clone(),
            body: input.body.clone(),
            created_at: None,
            updated_at: None,
        };
        let restored = RequestConfig::from_saved_request(&saved);
        assert_eq!(restored.method, HttpMethod::PUT);
        assert_eq!(restored.params.len(), 1);
        assert_eq!(restored.body, config.body);
    }
}
