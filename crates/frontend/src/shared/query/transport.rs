//! HTTP transport port and its `gloo-net` implementation.

use async_trait::async_trait;
use contracts::shared::envelope::ErrorBody;
use gloo_net::http::{Request, RequestBuilder};
use serde_json::Value;
use std::sync::Arc;

use super::error::{generic_status_message, ApiError};
use super::list_state::ListParams;
use crate::system::auth::storage::CredentialStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

/// Raw JSON exchange with the REST backend.
///
/// Futures are not `Send`: the browser fetch API is single-threaded.
#[async_trait(?Send)]
pub trait Transport: Send + Sync {
    async fn get(&self, path: &str, query: &ListParams) -> Result<Value, ApiError>;

    async fn send(
        &self,
        method: Method,
        path: &str,
        query: &ListParams,
        body: Option<&Value>,
    ) -> Result<Value, ApiError>;
}

/// Transport over the browser fetch API with bearer authorization
pub struct HttpTransport {
    base_url: String,
    credentials: Arc<dyn CredentialStore>,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>, credentials: Arc<dyn CredentialStore>) -> Self {
        Self {
            base_url: base_url.into(),
            credentials,
        }
    }

    fn auth_header(&self) -> Result<String, ApiError> {
        self.credentials
            .access_token()
            .map(|token| format!("Bearer {}", token))
            .ok_or(ApiError::Unauthenticated)
    }

    fn url(&self, path: &str, query: &ListParams) -> String {
        build_url(&self.base_url, path, query)
    }

    fn builder(&self, method: Method, url: &str, auth: &str) -> RequestBuilder {
        let builder = match method {
            Method::Get => Request::get(url),
            Method::Post => Request::post(url),
            Method::Put => Request::put(url),
            Method::Delete => Request::delete(url),
        };
        builder
            .header("Authorization", auth)
            .header("Accept", "application/json")
    }
}

#[async_trait(?Send)]
impl Transport for HttpTransport {
    async fn get(&self, path: &str, query: &ListParams) -> Result<Value, ApiError> {
        self.send(Method::Get, path, query, None).await
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        query: &ListParams,
        body: Option<&Value>,
    ) -> Result<Value, ApiError> {
        let auth = self.auth_header()?;
        let url = self.url(path, query);
        log::debug!("{:?} {}", method, url);

        let builder = self.builder(method, &url, &auth);
        let sent = match body {
            Some(body) => builder
                .json(body)
                .map_err(|e| ApiError::Transport(format!("Failed to serialize request: {}", e)))?
                .send()
                .await,
            None => builder.send().await,
        };
        let response =
            sent.map_err(|e| ApiError::Transport(format!("Failed to send request: {}", e)))?;

        let status = response.status();
        let ok = response.ok();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(format!("Failed to read response: {}", e)))?;
        parse_response_body(status, ok, &text)
    }
}

pub(crate) fn build_url(base_url: &str, path: &str, query: &ListParams) -> String {
    let mut url = format!("{}{}", base_url.trim_end_matches('/'), path);
    if !query.is_empty() {
        url.push('?');
        url.push_str(&serde_qs::to_string(query).unwrap_or_default());
    }
    url
}

/// Turn status + body text into JSON or a typed error
pub(crate) fn parse_response_body(status: u16, ok: bool, text: &str) -> Result<Value, ApiError> {
    if !ok {
        let message = serde_json::from_str::<ErrorBody>(text)
            .map(|body| body.error)
            .ok()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| generic_status_message(status));
        return Err(ApiError::Http { status, message });
    }
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(text).map_err(|e| ApiError::MalformedResponse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_body_message_is_used() {
        let err = parse_response_body(422, false, r#"{"error":"IMO number is invalid"}"#)
            .unwrap_err();
        assert_eq!(
            err,
            ApiError::Http {
                status: 422,
                message: "IMO number is invalid".into()
            }
        );
        assert_eq!(err.user_message("fallback"), "IMO number is invalid");
    }

    #[test]
    fn test_error_without_body_gets_generic_message() {
        let err = parse_response_body(502, false, "<html>Bad gateway</html>").unwrap_err();
        assert_eq!(err.user_message("Request failed"), "Request failed");
    }

    #[test]
    fn test_success_bodies() {
        assert_eq!(parse_response_body(204, true, "").unwrap(), Value::Null);
        assert_eq!(
            parse_response_body(200, true, r#"{"data":[]}"#).unwrap(),
            json!({"data": []})
        );
        assert!(matches!(
            parse_response_body(200, true, "{not json"),
            Err(ApiError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_build_url() {
        let mut query = ListParams::new();
        assert_eq!(
            build_url("http://localhost:3000/api/", "/users", &query),
            "http://localhost:3000/api/users"
        );
        query.insert("page".into(), "2".into());
        query.insert("portal".into(), "vendor".into());
        assert_eq!(
            build_url("http://localhost:3000/api", "/users", &query),
            "http://localhost:3000/api/users?page=2&portal=vendor"
        );
    }
}
