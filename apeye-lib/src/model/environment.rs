use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A named set of variables used for `{{name}}` substitution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    pub id: String,
    #[serde(default)]
    pub workspace_id: String,
    pub name: String,
    #[serde(default)]
    pub variables: HashMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Environment {
    pub fn new(name: impl Into<String>, variables: HashMap<String, String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            workspace_id: String::new(),
            name: name.into(),
            variables,
            created_at: None,
            updated_at: None,
        }
    }

    /// Matches by id, or by name ignoring ASCII case.
    pub fn matches(&self, id_or_name: &str) -> bool {
        self.id == id_or_name || self.name.eq_ignore_ascii_case(id_or_name)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateEnvironmentInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_id: Option<String>,
    pub name: String,
    pub variables: HashMap<String, String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateEnvironmentInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<HashMap<String, String>>,
}
