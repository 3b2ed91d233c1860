//! `{{name}}` placeholder substitution over a [`RequestConfig`].

use crate::model::key_value::{self, KeyValue};
use crate::model::RequestConfig;
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::collections::{HashMap, HashSet};

lazy_static! {
    static ref PLACEHOLDER: Regex = Regex::new(r"\{\{([A-Za-z0-9_]+)\}\}").unwrap();
}

/// Replaces each `{{name}}` with the trimmed value of `variables[name]`.
///
/// Unknown names are kept verbatim. Substituted text is not scanned again.
pub fn resolve_string(text: &str, variables: &HashMap<String, String>) -> String {
    if text.is_empty() || variables.is_empty() {
        return text.to_string();
    }
    PLACEHOLDER
        .replace_all(text, |caps: &Captures| match variables.get(&caps[1]) {
            Some(value) => value.trim().to_string(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

fn resolve_rows(rows: Vec<KeyValue>, variables: &HashMap<String, String>) -> Vec<KeyValue> {
    rows.into_iter()
        .map(|row| {
            if !row.enabled {
                return row;
            }
            KeyValue {
                key: resolve_string(&row.key, variables),
                value: resolve_string(&row.value, variables),
                ..row
            }
        })
        .collect()
}

/// Resolves every string-bearing field of `config`: url, enabled params,
/// headers and form rows, auth fields and body content.
///
/// An empty map hands `config` back untouched.
pub fn resolve_config(config: RequestConfig, variables: &HashMap<String, String>) -> RequestConfig {
    if variables.is_empty() {
        return config;
    }
    let resolve = |text: &str| resolve_string(text, variables);
    RequestConfig {
        method: config.method,
        url: resolve(&config.url),
        params: resolve_rows(config.params, variables),
        headers: resolve_rows(config.headers, variables),
        auth: config.auth.map_strings(resolve),
        body: config.body.map_strings(resolve),
    }
}

/// Distinct placeholder names referenced by the fields [`resolve_config`] touches.
pub fn extract_variables(config: &RequestConfig) -> HashSet<String> {
    let mut names = HashSet::new();
    let mut collect = |text: &str| {
        for caps in PLACEHOLDER.captures_iter(text) {
            names.insert(caps[1].to_string());
        }
    };

    collect(&config.url);
    for row in key_value::enabled(&config.params)
        .chain(key_value::enabled(&config.headers))
        .chain(config.body.enabled_form_data())
    {
        collect(&row.key);
        collect(&row.value);
    }
    for text in config.auth.strings() {
        collect(text);
    }
    if let Some(content) = config.body.content() {
        collect(content);
    }
    names
}
