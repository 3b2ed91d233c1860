use crate::core::error::ExecuteError;
use crate::core::version::user_agent;
use crate::model::key_value;
use crate::model::{ApiResponse, Body, RequestConfig};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE, USER_AGENT};
use std::collections::BTreeMap;
use std::time::Instant;
use tracing::debug;
use url::Url;

/// Sends a resolved [`RequestConfig`] straight to its target.
#[derive(Debug, Clone, Default)]
pub struct DirectExecutor {
    client: reqwest::Client,
}

impl DirectExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    pub async fn execute(&self, config: &RequestConfig) -> Result<ApiResponse, ExecuteError> {
        let url = build_url(config)?;
        let headers = build_headers(config)?;

        debug!(method = %config.method, url = %url, "executing direct request");

        let mut builder = self
            .client
            .request(config.method.to_reqwest_method(), url)
            .headers(headers);

        if config.method.allows_body() {
            builder = match &config.body {
                Body::None => builder,
                Body::Json { content } | Body::Raw { content } => builder.body(content.clone()),
                Body::UrlEncoded { .. } => builder.body(config.body.url_encoded()),
                Body::FormData { form_data } => {
                    let form = key_value::wire_pairs(form_data).fold(
                        reqwest::multipart::Form::new(),
                        |form, (key, value)| form.text(key.to_string(), value.to_string()),
                    );
                    builder.multipart(form)
                }
            };
        }

        let start = Instant::now();
        let response = builder.send().await?;
        let status = response.status();

        let mut response_headers = BTreeMap::new();
        for (name, value) in response.headers() {
            if let Ok(value) = value.to_str() {
                response_headers
                    .entry(name.to_string())
                    .or_insert_with(|| value.to_string());
            }
        }

        let text = response.text().await?;
        let elapsed = start.elapsed().as_millis() as u64;

        debug!(status = status.as_u16(), elapsed_ms = elapsed, "direct request completed");

        Ok(ApiResponse::from_text(
            status.as_u16(),
            status.canonical_reason().unwrap_or_default(),
            response_headers,
            text,
            elapsed,
        ))
    }
}

/// Target URL with enabled params appended as query pairs.
pub fn build_url(config: &RequestConfig) -> Result<Url, ExecuteError> {
    let mut url = Url::parse(config.url.trim())
        .map_err(|e| ExecuteError::InvalidRequest(format!("invalid URL '{}': {e}", config.url)))?;

    let mut pairs = key_value::wire_pairs(&config.params).peekable();
    if pairs.peek().is_some() {
        let mut query = url.query_pairs_mut();
        for (key, value) in pairs {
            query.append_pair(key, value);
        }
    }
    Ok(url)
}

/// Body content type, then user headers, then the auth header, each
/// overriding the previous on a name clash.
pub fn build_headers(config: &RequestConfig) -> Result<HeaderMap, ExecuteError> {
    let mut headers = HeaderMap::new();
    let sends_body = config.method.allows_body();

    if sends_body {
        if let Some(content_type) = config.body.default_content_type() {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
        }
    }

    for (key, value) in key_value::wire_pairs(&config.headers) {
        let (name, value) = header_pair(key, value)?;
        headers.insert(name, value);
    }

    if let Some((key, value)) = config.auth.header() {
        let (name, value) = header_pair(&key, &value)?;
        headers.insert(name, value);
    }

    // multipart bodies carry their own boundary in the content type
    if sends_body && matches!(config.body, Body::FormData { .. }) {
        headers.remove(CONTENT_TYPE);
    }

    if !headers.contains_key(USER_AGENT) {
        if let Ok(agent) = HeaderValue::from_str(&user_agent()) {
            headers.insert(USER_AGENT, agent);
        }
    }

    Ok(headers)
}

fn header_pair(key: &str, value: &str) -> Result<(HeaderName, HeaderValue), ExecuteError> {
    let name = HeaderName::from_bytes(key.trim().as_bytes())
        .map_err(|_| ExecuteError::InvalidRequest(format!("invalid header name '{key}'")))?;
    let value = HeaderValue::from_str(value)
        .map_err(|_| ExecuteError::InvalidRequest(format!("invalid value for header '{key}'")))?;
    Ok((name, value))
}
