use serde::{Deserialize, Serialize};

/// One row of a params, headers or form-data table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValue {
    #[serde(default = "new_id")]
    pub id: String,
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub value: String,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
}

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

fn enabled_by_default() -> bool {
    true
}

/// Field of a [`KeyValue`] row targeted by an edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyValueField {
    Key(String),
    Value(String),
    Enabled(bool),
}

impl KeyValue {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            key: key.into(),
            value: value.into(),
            enabled: true,
        }
    }

    pub fn empty() -> Self {
        Self::new("", "")
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn apply(&mut self, field: KeyValueField) {
        match field {
            KeyValueField::Key(key) => self.key = key,
            KeyValueField::Value(value) => self.value = value,
            KeyValueField::Enabled(enabled) => self.enabled = enabled,
        }
    }

    /// Whether the row goes on the wire: enabled and with a non-empty key.
    pub fn is_transmitted(&self) -> bool {
        self.enabled && !self.key.is_empty()
    }
}

/// Rows that take part in resolution and transmission.
pub fn enabled(items: &[KeyValue]) -> impl Iterator<Item = &KeyValue> {
    items.iter().filter(|item| item.enabled)
}

/// `(key, value)` pairs actually sent.
pub fn wire_pairs(items: &[KeyValue]) -> impl Iterator<Item = (&str, &str)> {
    items
        .iter()
        .filter(|item| item.is_transmitted())
        .map(|item| (item.key.as_str(), item.value.as_str()))
}

pub(crate) fn update_row(items: &mut [KeyValue], id: &str, field: KeyValueField) -> bool {
    match items.iter_mut().find(|item| item.id == id) {
        Some(item) => {
            item.apply(field);
            true
        }
        None => false,
    }
}

pub(crate) fn remove_row(items: &mut Vec<KeyValue>, id: &str) -> bool {
    let before = items.len();
    items.retain(|item| item.id != id);
    items.len() != before
}

/// Rows from a saved request, where tables are stored as flat JSON objects.
pub fn rows_from_object(value: Option<&serde_json::Value>) -> Vec<KeyValue> {
    let Some(serde_json::Value::Object(map)) = value else {
        return Vec::new();
    };
    map.iter()
        .map(|(key, value)| {
            let value = match value {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            KeyValue::new(key.clone(), value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_rows_have_distinct_ids() {
        let a = KeyValue::new("a", "1");
        let b = KeyValue::new("a", "1");
        assert_ne!(a.id, b.id);
        assert!(a.enabled);
    }

    #[test]
    fn test_wire_pairs_skip_disabled_and_empty_keys() {
        let rows = vec![
            KeyValue::new("page", "1"),
            KeyValue::new("debug", "true").disabled(),
            KeyValue::new("", "orphan"),
        ];
        let pairs: Vec<_> = wire_pairs(&rows).collect();
        assert_eq!(pairs, vec![("page", "1")]);
        assert_eq!(enabled(&rows).count(), 2);
    }

    #[test]
    fn test_update_and_remove_by_id() {
        let mut rows = vec![KeyValue::empty(), KeyValue::empty()];
        let id = rows[1].id.clone();

        assert!(update_row(&mut rows, &id, KeyValueField::Key("X-Trace".into())));
        assert!(update_row(&mut rows, &id, KeyValueField::Enabled(false)));
        assert_eq!(rows[1].key, "X-Trace");
        assert!(!rows[1].enabled);
        assert!(!update_row(&mut rows, "missing", KeyValueField::Value("v".into())));

        assert!(remove_row(&mut rows, &id));
        assert_eq!(rows.len(), 1);
        assert!(!remove_row(&mut rows, &id));
    }

    #[test]
    fn test_rows_from_object_stringifies_values() {
        let value = json!({"limit": 10, "q": "rust"});
        let rows = rows_from_object(Some(&value));
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().any(|r| r.key == "limit" && r.value == "10"));
        assert!(rows.iter().any(|r| r.key == "q" && r.value == "rust"));
        assert!(rows_from_object(None).is_empty());
        assert!(rows_from_object(Some(&json!("nope"))).is_empty());
    }

    #[test]
    fn test_deserialize_defaults_enabled() {
        let row: KeyValue = serde_json::from_str(r#"{"id":"1","key":"a","value":"b"}"#).unwrap();
        assert!(row.enabled);
    }
}
