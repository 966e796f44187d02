//! The single HTTP entry point.
//!
//! Every backend call goes through [`ApiClient::request`]: join the base
//! URL with the path, send JSON, attach the bearer token when the
//! [`TokenSource`] has one, then unwrap the `{success, message, data}`
//! envelope. No retries, no timeout.

use std::sync::Arc;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, Url};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{ClientError, DEFAULT_FAILURE};

/// Base URL used when nothing is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

// ── TokenSource ─────────────────────────────────────────────────────

/// Pluggable token provider. Called before every API request.
///
/// Returns `Ok(None)` to skip the Authorization header (anonymous).
#[async_trait::async_trait]
pub trait TokenSource: Send + Sync + 'static {
    async fn token(&self) -> Result<Option<String>, ClientError>;
}

// ── Envelope ────────────────────────────────────────────────────────

/// Strip the response envelope.
///
/// An object carrying a `data` key yields that value; anything else is
/// returned unchanged. An envelope with `success: false` is a failure
/// even on HTTP 200, carrying its `message`.
pub fn unwrap_envelope(value: Value) -> Result<Value, ClientError> {
    match value {
        Value::Object(mut map) => {
            if map.get("success") == Some(&Value::Bool(false)) {
                return Err(ClientError::Api {
                    status: 200,
                    message: message_of(&Value::Object(map)),
                });
            }
            match map.remove("data") {
                Some(data) => Ok(data),
                None => Ok(Value::Object(map)),
            }
        }
        other => Ok(other),
    }
}

/// Best-effort `message` extraction from an error body.
fn message_of(body: &Value) -> String {
    body.get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or(DEFAULT_FAILURE)
        .to_string()
}

// ── ApiClient ───────────────────────────────────────────────────────

/// HTTP gateway to the backend. Cheap to clone.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token_source: Arc<dyn TokenSource>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, token_source: Arc<dyn TokenSource>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token_source,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, ClientError> {
        let raw = if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        };
        let mut url = Url::parse(&raw)
            .map_err(|e| ClientError::validation(format!("invalid URL '{}': {}", raw, e)))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    /// Build a request with auth header.
    async fn authed(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<reqwest::RequestBuilder, ClientError> {
        match self.token_source.token().await? {
            Some(token) => Ok(builder.bearer_auth(token)),
            None => Ok(builder),
        }
    }

    /// Send one request and return the unwrapped response value.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, ClientError> {
        self.send(method, path, &[], body).await
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&Value>,
    ) -> Result<Value, ClientError> {
        let url = self.url(path, query)?;
        debug!(%method, %url, "api request");

        let mut builder = self
            .http
            .request(method.clone(), url)
            .header(CONTENT_TYPE, "application/json");
        builder = self.authed(builder).await?;
        if let Some(body) = body {
            builder = builder.body(body.to_string());
        }

        let resp = builder.send().await?;
        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<Value>(&text)
                .map(|v| message_of(&v))
                .unwrap_or_else(|_| DEFAULT_FAILURE.to_string());
            debug!(%method, path, status = status.as_u16(), %message, "api failure");
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        // DELETE and the fetch endpoints may answer with an empty body.
        let value = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text)
                .map_err(|e| ClientError::Decode(format!("response body: {}", e)))?
        };
        unwrap_envelope(value)
    }

    fn decode<R: DeserializeOwned>(value: Value) -> Result<R, ClientError> {
        serde_json::from_value(value)
            .map_err(|e| ClientError::Decode(format!("response data: {}", e)))
    }

    fn encode<B: Serialize + ?Sized>(body: &B) -> Result<Value, ClientError> {
        serde_json::to_value(body)
            .map_err(|e| ClientError::Decode(format!("request body: {}", e)))
    }

    pub async fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R, ClientError> {
        Self::decode(self.request(Method::GET, path, None).await?)
    }

    /// GET with URL-encoded query parameters.
    pub async fn get_with_query<R: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<R, ClientError> {
        Self::decode(self.send(Method::GET, path, query, None).await?)
    }

    pub async fn post<B, R>(&self, path: &str, body: &B) -> Result<R, ClientError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let body = Self::encode(body)?;
        Self::decode(self.request(Method::POST, path, Some(&body)).await?)
    }

    /// POST without a body.
    pub async fn post_empty(&self, path: &str) -> Result<Value, ClientError> {
        self.request(Method::POST, path, None).await
    }

    pub async fn put<B, R>(&self, path: &str, body: &B) -> Result<R, ClientError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let body = Self::encode(body)?;
        Self::decode(self.request(Method::PUT, path, Some(&body)).await?)
    }

    pub async fn delete(&self, path: &str) -> Result<Value, ClientError> {
        self.request(Method::DELETE, path, None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Anonymous;

    #[async_trait::async_trait]
    impl TokenSource for Anonymous {
        async fn token(&self) -> Result<Option<String>, ClientError> {
            Ok(None)
        }
    }

    #[test]
    fn envelope_yields_data() {
        let v = unwrap_envelope(json!({"success": true, "message": "ok", "data": {"id": 1}})).unwrap();
        assert_eq!(v, json!({"id": 1}));
    }

    #[test]
    fn bare_value_passes_through() {
        assert_eq!(unwrap_envelope(json!({"id": 1})).unwrap(), json!({"id": 1}));
        assert_eq!(unwrap_envelope(json!([1, 2])).unwrap(), json!([1, 2]));
        assert_eq!(unwrap_envelope(Value::Null).unwrap(), Value::Null);
    }

    #[test]
    fn null_data_is_returned_as_null() {
        let v = unwrap_envelope(json!({"success": true, "message": "删除成功", "data": null})).unwrap();
        assert_eq!(v, Value::Null);
    }

    #[test]
    fn failed_envelope_is_an_error() {
        let err = unwrap_envelope(json!({"success": false, "message": "已经收藏过该小说", "data": null}))
            .unwrap_err();
        assert!(err.is_duplicate());
        assert_eq!(err.user_message(), "已经收藏过该小说");

        let err = unwrap_envelope(json!({"success": false})).unwrap_err();
        assert_eq!(err.user_message(), DEFAULT_FAILURE);
    }

    #[test]
    fn url_joining() {
        let client = ApiClient::new("http://localhost:8080/api/", Arc::new(Anonymous));
        assert_eq!(client.base_url(), "http://localhost:8080/api");
        assert_eq!(
            client.url("/collections", &[]).unwrap().as_str(),
            "http://localhost:8080/api/collections"
        );
        assert_eq!(
            client.url("novels", &[("source_url", "https://x/1?a=b")]).unwrap().as_str(),
            "http://localhost:8080/api/novels?source_url=https%3A%2F%2Fx%2F1%3Fa%3Db"
        );
    }

}
