use super::key_value::{self, KeyValue};
use serde::{Deserialize, Serialize};

/// Request body, tagged on the wire by `type`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Body {
    #[default]
    #[serde(rename = "none")]
    None,
    #[serde(rename = "json")]
    Json {
        #[serde(default)]
        content: String,
    },
    #[serde(rename = "raw")]
    Raw {
        #[serde(default)]
        content: String,
    },
    #[serde(rename = "form-data")]
    FormData {
        #[serde(rename = "formData", default)]
        form_data: Vec<KeyValue>,
    },
    #[serde(rename = "x-www-form-urlencoded")]
    UrlEncoded {
        #[serde(rename = "formData", default)]
        form_data: Vec<KeyValue>,
    },
}

/// Body discriminant without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyType {
    None,
    Json,
    Raw,
    FormData,
    UrlEncoded,
}

impl BodyType {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "none" => Some(Self::None),
            "json" => Some(Self::Json),
            "raw" => Some(Self::Raw),
            "form-data" => Some(Self::FormData),
            "x-www-form-urlencoded" => Some(Self::UrlEncoded),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Json => "json",
            Self::Raw => "raw",
            Self::FormData => "form-data",
            Self::UrlEncoded => "x-www-form-urlencoded",
        }
    }
}

impl Body {
    pub fn body_type(&self) -> BodyType {
        match self {
            Body::None => BodyType::None,
            Body::Json { .. } => BodyType::Json,
            Body::Raw { .. } => BodyType::Raw,
            Body::FormData { .. } => BodyType::FormData,
            Body::UrlEncoded { .. } => BodyType::UrlEncoded,
        }
    }

    pub fn content(&self) -> Option<&str> {
        match self {
            Body::Json { content } | Body::Raw { content } => Some(content),
            _ => None,
        }
    }

    pub fn form_data(&self) -> Option<&[KeyValue]> {
        match self {
            Body::FormData { form_data } | Body::UrlEncoded { form_data } => Some(form_data),
            _ => None,
        }
    }

    pub(crate) fn form_data_mut(&mut self) -> Option<&mut Vec<KeyValue>> {
        match self {
            Body::FormData { form_data } | Body::UrlEncoded { form_data } => Some(form_data),
            _ => None,
        }
    }

    pub fn enabled_form_data(&self) -> impl Iterator<Item = &KeyValue> {
        key_value::enabled(self.form_data().unwrap_or(&[]))
    }

    /// Content type implied by the body variant, set before user headers.
    pub fn default_content_type(&self) -> Option<&'static str> {
        match self {
            Body::None => None,
            Body::Json { .. } => Some("application/json"),
            Body::Raw { .. } => Some("text/plain"),
            // multipart boundaries are chosen by the HTTP client
            Body::FormData { .. } => None,
            Body::UrlEncoded { .. } => Some("application/x-www-form-urlencoded"),
        }
    }

    /// Switches variant, carrying content text or form rows over when the
    /// new variant has room for them.
    pub fn with_type(self, body_type: BodyType) -> Body {
        let content = self.content().map(str::to_string).unwrap_or_default();
        let form_data = self.form_data().map(<[_]>::to_vec).unwrap_or_default();
        match body_type {
            BodyType::None => Body::None,
            BodyType::Json => Body::Json { content },
            BodyType::Raw => Body::Raw { content },
            BodyType::FormData => Body::FormData { form_data },
            BodyType::UrlEncoded => Body::UrlEncoded { form_data },
        }
    }

    /// Serializes enabled rows as `application/x-www-form-urlencoded`.
    pub fn url_encoded(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (key, value) in key_value::wire_pairs(self.form_data().unwrap_or(&[])) {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }

    pub(crate) fn map_strings(self, f: impl Fn(&str) -> String) -> Self {
        let map_rows = |rows: Vec<KeyValue>| -> Vec<KeyValue> {
            rows.into_iter()
                .map(|row| {
                    if row.enabled {
                        KeyValue {
                            key: f(&row.key),
                            value: f(&row.value),
                            ..row
                        }
                    } else {
                        row
                    }
                })
                .collect()
        };
        match self {
            Body::None => Body::None,
            Body::Json { content } => Body::Json {
                content: f(&content),
            },
            Body::Raw { content } => Body::Raw {
                content: f(&content),
            },
            Body::FormData { form_data } => Body::FormData {
                form_data: map_rows(form_data),
            },
            Body::UrlEncoded { form_data } => Body::UrlEncoded {
                form_data: map_rows(form_data),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format() {
        let body: Body =
            serde_json::from_str(r#"{"type":"json","content":"{\"a\":1}","formData":[]}"#)
                .unwrap();
        assert_eq!(
            body,
            Body::Json {
                content: r#"{"a":1}"#.into()
            }
        );

        let body: Body = serde_json::from_str(
            r#"{"type":"x-www-form-urlencoded","content":"","formData":[{"id":"1","key":"a","value":"b","enabled":true}]}"#,
        )
        .unwrap();
        assert_eq!(body.body_type(), BodyType::UrlEncoded);
        assert_eq!(body.form_data().map(<[_]>::len), Some(1));
    }

    #[test]
    fn test_url_encoded_skips_disabled_rows() {
        let body = Body::UrlEncoded {
            form_data: vec![
                KeyValue::new("name", "Ada Lovelace"),
                KeyValue::new("skip", "me").disabled(),
                KeyValue::new("lang", "en&fr"),
            ],
        };
        assert_eq!(body.url_encoded(), "name=Ada+Lovelace&lang=en%26fr");
    }

    #[test]
    fn test_with_type_keeps_compatible_payload() {
        let body = Body::Json {
            content: "hello".into(),
        };
        assert_eq!(
            body.clone().with_type(BodyType::Raw),
            Body::Raw {
                content: "hello".into()
            }
        );
        assert_eq!(
            body.with_type(BodyType::FormData),
            Body::FormData { form_data: vec![] }
        );

        let rows = vec![KeyValue::new("a", "1")];
        let body = Body::FormData {
            form_data: rows.clone(),
        };
        assert_eq!(
            body.with_type(BodyType::UrlEncoded),
            Body::UrlEncoded { form_data: rows }
        );
    }

    #[test]
    fn test_default_content_types() {
        assert_eq!(Body::None.default_content_type(), None);
        assert_eq!(
            Body::Raw {
                content: String::new()
            }
            .default_content_type(),
            Some("text/plain")
        );
        assert_eq!(
            Body::FormData { form_data: vec![] }.default_content_type(),
            None
        );
    }

    #[test]
    fn test_body_type_parse() {
        assert_eq!(BodyType::parse("form-data"), Some(BodyType::FormData));
        assert_eq!(BodyType::parse("xml"), None);
    }
}
