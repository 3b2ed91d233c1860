use super::backend::{Backend, BackendFuture};
use crate::core::error::ApiError;
use crate::model::{
    ApiResponse, Collection, CreateCollectionInput, CreateEnvironmentInput, Environment,
    HistoryEntry, NewHistoryEntry, RequestConfig, SaveRequestInput, SavedRequest,
    UpdateCollectionInput, UpdateEnvironmentInput,
};
use reqwest::header::COOKIE;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// REST client for the apeye backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    cookie: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http,
            base_url,
            cookie: None,
        }
    }

    /// Session cookie sent with every call, e.g. `session=abc`.
    pub fn with_cookie(mut self, cookie: impl Into<String>) -> Self {
        let cookie = cookie.into();
        self.cookie = (!cookie.trim().is_empty()).then_some(cookie);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn list_collections(&self) -> Result<Vec<Collection>, ApiError> {
        self.send(self.request(Method::GET, "/collections")).await
    }

    pub async fn create_collection(
        &self,
        input: &CreateCollectionInput,
    ) -> Result<Collection, ApiError> {
        self.send(self.request(Method::POST, "/collections").json(input))
            .await
    }

    pub async fn get_collection(&self, id: &str) -> Result<Collection, ApiError> {
        self.send(self.request(Method::GET, &format!("/collections/{id}")))
            .await
    }

    pub async fn update_collection(
        &self,
        id: &str,
        input: &UpdateCollectionInput,
    ) -> Result<Collection, ApiError> {
        self.send(
            self.request(Method::PUT, &format!("/collections/{id}"))
                .json(input),
        )
        .await
    }

    pub async fn delete_collection(&self, id: &str) -> Result<(), ApiError> {
        self.send_empty(self.request(Method::DELETE, &format!("/collections/{id}")))
            .await
    }

    pub async fn save_request(&self, input: &SaveRequestInput) -> Result<SavedRequest, ApiError> {
        self.send(self.request(Method::POST, "/requests").json(input))
            .await
    }

    pub async fn delete_request(&self, id: &str) -> Result<(), ApiError> {
        self.send_empty(self.request(Method::DELETE, &format!("/requests/{id}")))
            .await
    }

    pub async fn list_environments(&self) -> Result<Vec<Environment>, ApiError> {
        self.send(self.request(Method::GET, "/environments")).await
    }

    pub async fn create_environment(
        &self,
        input: &CreateEnvironmentInput,
    ) -> Result<Environment, ApiError> {
        self.send(self.request(Method::POST, "/environments").json(input))
            .await
    }

    pub async fn get_environment(&self, id: &str) -> Result<Environment, ApiError> {
        self.send(self.request(Method::GET, &format!("/environments/{id}")))
            .await
    }

    pub async fn update_environment(
        &self,
        id: &str,
        input: &UpdateEnvironmentInput,
    ) -> Result<Environment, ApiError> {
        self.send(
            self.request(Method::PUT, &format!("/environments/{id}"))
                .json(input),
        )
        .await
    }

    pub async fn delete_environment(&self, id: &str) -> Result<(), ApiError> {
        self.send_empty(self.request(Method::DELETE, &format!("/environments/{id}")))
            .await
    }

    pub async fn list_history(&self, limit: usize) -> Result<Vec<HistoryEntry>, ApiError> {
        self.send(
            self.request(Method::GET, "/history")
                .query(&[("limit", limit)]),
        )
        .await
    }

    pub async fn create_history(&self, entry: &NewHistoryEntry) -> Result<(), ApiError> {
        self.send_empty(self.request(Method::POST, "/history").json(entry))
            .await
    }

    pub async fn delete_history(&self, id: &str) -> Result<(), ApiError> {
        self.send_empty(self.request(Method::DELETE, &format!("/history/{id}")))
            .await
    }

    pub async fn clear_history(&self) -> Result<(), ApiError> {
        self.send_empty(self.request(Method::DELETE, "/history"))
            .await
    }

    /// Runs the request on the backend and returns its normalized response.
    pub async fn execute_request(&self, config: &RequestConfig) -> Result<ApiResponse, ApiError> {
        self.send(self.request(Method::POST, "/requests/execute").json(config))
            .await
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, %url, "backend call");
        let builder = self.http.request(method, url);
        match &self.cookie {
            Some(cookie) => builder.header(COOKIE, cookie),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let response = check_status(builder.send().await?).await?;
        Ok(response.json::<T>().await?)
    }

    async fn send_empty(&self, builder: RequestBuilder) -> Result<(), ApiError> {
        check_status(builder.send().await?).await?;
        Ok(())
    }
}

async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::UNAUTHORIZED {
        return Err(ApiError::Unauthorized);
    }

    let text = response.text().await.unwrap_or_default();
    Err(ApiError::Status {
        status: status.as_u16(),
        message: error_message(status, &text),
    })
}

/// Prefers the backend's `{"error": ...}` field, then the raw body.
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(message) = value.get("error").and_then(|v| v.as_str()) {
            return message.to_string();
        }
    }
    if body.trim().is_empty() {
        status.canonical_reason().unwrap_or("Request failed").to_string()
    } else {
        body.trim().to_string()
    }
}

impl Backend for ApiClient {
    fn execute<'a>(&'a self, config: &'a RequestConfig) -> BackendFuture<'a, ApiResponse> {
        Box::pin(self.execute_request(config))
    }

    fn record_history<'a>(&'a self, entry: &'a NewHistoryEntry) -> BackendFuture<'a, ()> {
        Box::pin(self.create_history(entry))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_prefers_error_field() {
        assert_eq!(
            error_message(StatusCode::BAD_REQUEST, r#"{"error":"name is required"}"#),
            "name is required"
        );
        assert_eq!(
            error_message(StatusCode::BAD_GATEWAY, "upstream down\n"),
            "upstream down"
        );
        assert_eq!(error_message(StatusCode::NOT_FOUND, ""), "Not Found");
    }

    #[test]
    fn test_base_url_and_cookie_normalization() {
        let client = ApiClient::new("http://localhost:8080/api/").with_cookie("  ");
        assert_eq!(client.base_url(), "http://localhost:8080/api");
        assert!(client.cookie.is_none());

        let client = client.with_cookie("session=abc");
        assert_eq!(client.cookie.as_deref(), Some("session=abc"));
    }
}
