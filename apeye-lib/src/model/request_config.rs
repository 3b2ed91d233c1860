use super::auth::Auth;
use super::body::{Body, BodyType};
use super::collection::SavedRequest;
use super::http_method::HttpMethod;
use super::key_value::{self, KeyValue, KeyValueField};
use serde::{Deserialize, Serialize};

/// A request as edited by the user, before variable resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestConfig {
    #[serde(default)]
    pub method: HttpMethod,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub params: Vec<KeyValue>,
    #[serde(default)]
    pub headers: Vec<KeyValue>,
    #[serde(default)]
    pub auth: Auth,
    #[serde(default)]
    pub body: Body,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            method: HttpMethod::GET,
            url: String::new(),
            params: Vec::new(),
            headers: vec![default_content_type_header()],
            auth: Auth::None,
            body: Body::None,
        }
    }
}

fn default_content_type_header() -> KeyValue {
    KeyValue::new("Content-Type", "application/json")
}

fn push_row(rows: &mut Vec<KeyValue>) -> String {
    let row = KeyValue::empty();
    let id = row.id.clone();
    rows.push(row);
    id
}

impl RequestConfig {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn enabled_params(&self) -> impl Iterator<Item = &KeyValue> {
        key_value::enabled(&self.params)
    }

    pub fn enabled_headers(&self) -> impl Iterator<Item = &KeyValue> {
        key_value::enabled(&self.headers)
    }

    /// Appends an empty param row and returns its id.
    pub fn add_param(&mut self) -> String {
        push_row(&mut self.params)
    }

    pub fn update_param(&mut self, id: &str, field: KeyValueField) -> bool {
        key_value::update_row(&mut self.params, id, field)
    }

    pub fn remove_param(&mut self, id: &str) -> bool {
        key_value::remove_row(&mut self.params, id)
    }

    pub fn add_header(&mut self) -> String {
        push_row(&mut self.headers)
    }

    pub fn update_header(&mut self, id: &str, field: KeyValueField) -> bool {
        key_value::update_row(&mut self.headers, id, field)
    }

    pub fn remove_header(&mut self, id: &str) -> bool {
        key_value::remove_row(&mut self.headers, id)
    }

    /// Adds an empty form row, switching a non-form body to `form-data` first.
    pub fn add_form_data(&mut self) -> String {
        if self.body.form_data().is_none() {
            self.set_body_type(BodyType::FormData);
        }
        match self.body.form_data_mut() {
            Some(rows) => push_row(rows),
            None => String::new(),
        }
    }

    pub fn update_form_data(&mut self, id: &str, field: KeyValueField) -> bool {
        match self.body.form_data_mut() {
            Some(rows) => key_value::update_row(rows, id, field),
            None => false,
        }
    }

    pub fn remove_form_data(&mut self, id: &str) -> bool {
        match self.body.form_data_mut() {
            Some(rows) => key_value::remove_row(rows, id),
            None => false,
        }
    }

    pub fn set_auth(&mut self, auth: Auth) {
        self.auth = auth;
    }

    pub fn set_body_type(&mut self, body_type: BodyType) {
        let body = std::mem::take(&mut self.body);
        self.body = body.with_type(body_type);
    }

    /// Rebuilds an editable config from a request saved in a collection.
    pub fn from_saved_request(saved: &SavedRequest) -> Self {
        let mut headers = key_value::rows_from_object(Some(&saved.headers));
        if headers.is_empty() {
            headers.push(default_content_type_header());
        }
        let params = key_value::rows_from_object(Some(&saved.params));

        let auth = serde_json::from_value(saved.auth.clone()).unwrap_or_default();

        let body_type = saved
            .body
            .get("type")
            .and_then(|t| t.as_str())
            .and_then(BodyType::parse)
            .unwrap_or(BodyType::None);
        let content = saved
            .body
            .get("content")
            .and_then(|c| c.as_str())
            .unwrap_or_default()
            .to_string();
        let form_data = key_value::rows_from_object(saved.body.get("formData"));
        let body = match body_type {
            BodyType::None => Body::None,
            BodyType::Json => Body::Json { content },
            BodyType::Raw => Body::Raw { content },
            BodyType::FormData => Body::FormData { form_data },
            BodyType::UrlEncoded => Body::UrlEncoded { form_data },
        };

        Self {
            method: saved.method,
            url: saved.url.clone(),
            params,
            headers,
            auth,
            body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn saved(headers: serde_json::Value, body: serde_json::Value) -> SavedRequest {
        SavedRequest {
            id: "r1".into(),
            collection_id: "c1".into(),
            name: "List users".into(),
            method: HttpMethod::POST,
            url: "https://api.example.com/users".into(),
            headers,
            params: json!({"page": "2"}),
            auth: json!({"type": "bearer", "token": "{{token}}"}),
            body,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_default_has_content_type_header() {
        let config = RequestConfig::default();
        assert_eq!(config.method, HttpMethod::GET);
        assert_eq!(config.headers.len(), 1);
        assert_eq!(config.headers[0].key, "Content-Type");
        assert_eq!(config.auth, Auth::None);
        assert_eq!(config.body, Body::None);
    }

    #[test]
    fn test_param_editing() {
        let mut config = RequestConfig::default();
        let id = config.add_param();
        assert!(config.update_param(&id, KeyValueField::Key("q".into())));
        assert!(config.update_param(&id, KeyValueField::Value("rust".into())));
        assert_eq!(config.enabled_params().count(), 1);

        assert!(config.update_param(&id, KeyValueField::Enabled(false)));
        assert_eq!(config.enabled_params().count(), 0);

        assert!(config.remove_param(&id));
        assert!(config.params.is_empty());
    }

    #[test]
    fn test_add_form_data_switches_body() {
        let mut config = RequestConfig::default();
        let id = config.add_form_data();
        assert_eq!(config.body.body_type(), BodyType::FormData);
        assert!(config.update_form_data(&id, KeyValueField::Key("file".into())));
        assert!(config.remove_form_data(&id));
        assert_eq!(config.body.form_data().map(<[_]>::len), Some(0));
    }

    #[test]
    fn test_from_saved_request() {
        let config = RequestConfig::from_saved_request(&saved(
            json!({"Accept": "application/json"}),
            json!({"type": "json", "content": "{\"a\":1}"}),
        ));
        assert_eq!(config.method, HttpMethod::POST);
        assert_eq!(config.headers.len(), 1);
        assert_eq!(config.headers[0].key, "Accept");
        assert_eq!(config.params[0].key, "page");
        assert_eq!(
            config.auth,
            Auth::Bearer {
                token: "{{token}}".into()
            }
        );
        assert_eq!(config.body.content(), Some("{\"a\":1}"));
    }

    #[test]
    fn test_from_saved_request_defaults() {
        let config = RequestConfig::from_saved_request(&saved(json!({}), json!({})));
        assert_eq!(config.headers[0].key, "Content-Type");
        assert_eq!(config.body, Body::None);

        let mut broken = saved(json!({}), json!({"type": "form-data", "formData": {"a": "1"}}));
        broken.auth = json!({"type": "unknown"});
        let config = RequestConfig::from_saved_request(&broken);
        assert_eq!(config.auth, Auth::None);
        assert_eq!(config.body.form_data().map(<[_]>::len), Some(1));
    }

    #[test]
    fn test_deserialize_client_payload() {
        let config: RequestConfig = serde_json::from_value(json!({
            "method": "POST",
            "url": "http://localhost:8080/items",
            "params": [{"id": "p1", "key": "dry_run", "value": "1", "enabled": false}],
            "headers": [],
            "auth": {"type": "basic", "username": "u", "password": "p"},
            "body": {"type": "raw", "content": "hello", "formData": []}
        }))
        .unwrap();
        assert_eq!(config.enabled_params().count(), 0);
        assert_eq!(config.body.content(), Some("hello"));
    }
}
