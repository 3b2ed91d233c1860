use super::error::RelayError;
use crate::core::version::app_version;
use axum::{
    body::Bytes,
    extract::{Path, RawQuery, State},
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE, COOKIE},
        HeaderMap, HeaderName, Method,
    },
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, error, warn};

/// The only request headers passed on to the backend.
pub const FORWARDED_HEADERS: [HeaderName; 3] = [CONTENT_TYPE, COOKIE, AUTHORIZATION];

#[derive(Debug, Clone)]
pub struct RelayState {
    client: reqwest::Client,
    backend_url: Arc<str>,
}

impl RelayState {
    pub fn new(backend_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), backend_url)
    }

    pub fn with_client(client: reqwest::Client, backend_url: &str) -> Self {
        Self {
            client,
            backend_url: Arc::from(backend_url.trim_end_matches('/')),
        }
    }

    pub fn backend_url(&self) -> &str {
        &self.backend_url
    }
}

/// GET /health
pub async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok", "version": app_version() }))
}

/// ANY /api/proxy/*path - forwards to `<backend>/<path>`
pub async fn proxy_handler(
    State(state): State<RelayState>,
    Path(path): Path<String>,
    method: Method,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, RelayError> {
    let mut url = format!("{}/{}", state.backend_url, path.trim_start_matches('/'));
    if let Some(query) = query.filter(|q| !q.is_empty()) {
        url.push('?');
        url.push_str(&query);
    }
    debug!(%method, %url, "proxying request");

    let mut builder = state.client.request(method.clone(), &url);
    for name in FORWARDED_HEADERS.iter() {
        if let Some(value) = headers.get(name) {
            builder = builder.header(name, value.clone());
        }
    }
    builder = attach_body(builder, &method, &headers, body);

    let response = builder.send().await.map_err(|e| {
        error!(%url, "proxy error: {e}");
        RelayError::proxy_failed()
    })?;

    relay_response(response).await.map_err(|e| {
        error!(%url, "proxy error reading backend response: {e}");
        RelayError::proxy_failed()
    })
}

/// POST /api/history
pub async fn history_handler(
    State(state): State<RelayState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, RelayError> {
    let payload: Value = serde_json::from_slice(&body).map_err(|e| {
        error!("history save error: {e}");
        RelayError::history_failed()
    })?;

    let url = format!("{}/history", state.backend_url);
    debug!(%url, has_cookie = headers.contains_key(COOKIE), "saving history");

    let mut builder = state.client.post(&url).json(&payload);
    if let Some(cookie) = headers.get(COOKIE) {
        builder = builder.header(COOKIE, cookie.clone());
    }

    let response = builder.send().await.map_err(|e| {
        error!(%url, "history save error: {e}");
        RelayError::history_failed()
    })?;
    let status = response.status();
    let text = response.text().await.map_err(|e| {
        error!(%url, "history save error: {e}");
        RelayError::history_failed()
    })?;

    Ok(match serde_json::from_str::<Value>(&text) {
        Ok(data) => (status, Json(data)).into_response(),
        Err(_) => {
            warn!(%status, "backend returned non-JSON history response: {text}");
            (status, text).into_response()
        }
    })
}

fn attach_body(
    builder: reqwest::RequestBuilder,
    method: &Method,
    headers: &HeaderMap,
    body: Bytes,
) -> reqwest::RequestBuilder {
    if method == Method::GET || method == Method::HEAD {
        return builder;
    }

    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    if content_type.contains("application/json") {
        // empty or malformed JSON is dropped
        match serde_json::from_slice::<Value>(&body)
            .ok()
            .and_then(|value| serde_json::to_vec(&value).ok())
        {
            Some(json) => builder.body(json),
            None => builder,
        }
    } else if content_type.contains("form-data") {
        builder.body(body)
    } else if !content_type.is_empty() {
        builder.body(String::from_utf8_lossy(&body).into_owned())
    } else {
        builder
    }
}

async fn relay_response(response: reqwest::Response) -> Result<Response, reqwest::Error> {
    let status = response.status();
    let content_type = response.headers().get(CONTENT_TYPE).cloned();
    let is_json = content_type
        .as_ref()
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.contains("application/json"));

    if is_json {
        let data: Value = response.json().await?;
        return Ok((status, Json(data)).into_response());
    }

    let text = response.text().await?;
    let mut relayed = (status, text).into_response();
    if let Some(content_type) = content_type {
        relayed.headers_mut().insert(CONTENT_TYPE, content_type);
    }
    Ok(relayed)
}
