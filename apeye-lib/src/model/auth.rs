use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::{Deserialize, Serialize};

/// Request authentication, tagged on the wire by `type`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Auth {
    #[default]
    None,
    Bearer {
        #[serde(default)]
        token: String,
    },
    Basic {
        #[serde(default)]
        username: String,
        #[serde(default)]
        password: String,
    },
    ApiKey {
        #[serde(rename = "apiKey", default)]
        key: String,
        #[serde(rename = "apiValue", default)]
        value: String,
    },
}

impl Auth {
    pub fn as_str(&self) -> &'static str {
        match self {
            Auth::None => "none",
            Auth::Bearer { .. } => "bearer",
            Auth::Basic { .. } => "basic",
            Auth::ApiKey { .. } => "api-key",
        }
    }

    /// The single header this auth contributes, if any.
    ///
    /// Bearer and api-key with an empty token or key contribute nothing.
    pub fn header(&self) -> Option<(String, String)> {
        match self {
            Auth::None => None,
            Auth::Bearer { token } if !token.is_empty() => Some((
                reqwest::header::AUTHORIZATION.as_str().to_string(),
                format!("Bearer {token}"),
            )),
            Auth::Bearer { .. } => None,
            Auth::Basic { username, password } => {
                let encoded = BASE64.encode(format!("{username}:{password}"));
                Some((
                    reqwest::header::AUTHORIZATION.as_str().to_string(),
                    format!("Basic {encoded}"),
                ))
            }
            Auth::ApiKey { key, value } if !key.is_empty() => Some((key.clone(), value.clone())),
            Auth::ApiKey { .. } => None,
        }
    }

    pub(crate) fn strings(&self) -> Vec<&str> {
        match self {
            Auth::None => Vec::new(),
            Auth::Bearer { token } => vec![token.as_str()],
            Auth::Basic { username, password } => vec![username.as_str(), password.as_str()],
            Auth::ApiKey { key, value } => vec![key.as_str(), value.as_str()],
        }
    }

    pub(crate) fn map_strings(self, f: impl Fn(&str) -> String) -> Self {
        match self {
            Auth::None => Auth::None,
            Auth::Bearer { token } => Auth::Bearer { token: f(&token) },
            Auth::Basic { username, password } => Auth::Basic {
                username: f(&username),
                password: f(&password),
            },
            Auth::ApiKey { key, value } => Auth::ApiKey {
                key: f(&key),
                value: f(&value),
            },
        }
    }
}
