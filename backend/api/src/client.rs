use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use nexusbot_logging::redact_sensitive_data;

use crate::error::{ApiError, ErrorBody};

/// Authenticated client for one NeuralNexus API base URL.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send a request and decode the 200 response body as `T`.
    pub async fn request<T, B>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let response = self.send(method, path, query, body).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Send a request whose 200 response body is ignored.
    pub async fn request_empty<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<(), ApiError>
    where
        B: Serialize + ?Sized,
    {
        self.send(method, path, &[], body).await.map(drop)
    }

    async fn send<B>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<reqwest::Response, ApiError>
    where
        B: Serialize + ?Sized,
    {
        debug!(method = %method, path, "Sending request to NeuralNexus API");

        let mut request = self
            .client
            .request(method.clone(), format!("{}{}", self.base_url, path))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json");
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            let detail = ErrorBody::parse(&body).message();
            warn!(
                method = %method,
                path,
                status = status.as_u16(),
                body = %redact_sensitive_data(&body),
                "NeuralNexus API returned an error"
            );
            return Err(ApiError::UnexpectedStatus { status: status.as_u16(), detail, body });
        }
        Ok(response)
    }
}

/// Percent-encode a user-supplied value for use as one path segment.
pub(crate) fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Debug, Deserialize, PartialEq)]
    struct Echo {
        ok: bool,
    }

    #[tokio::test]
    async fn attaches_bearer_token_and_decodes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ping"))
            .and(header("Authorization", "Bearer secret"))
            .and(query_param("host", "example.com"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
            .expect(1)
            .mount(&server)
            .await;

        let api = ApiClient::new(server.uri(), "secret");
        let echo: Echo = api
            .request(Method::GET, "/ping", &[("host", "example.com".into())], None::<&()>)
            .await
            .unwrap();
        assert_eq!(echo, Echo { ok: true });
    }

    #[tokio::test]
    async fn serializes_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/things/1"))
            .and(body_json(serde_json::json!({"name": "bee"})))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let api = ApiClient::new(server.uri(), "k");
        api.request_empty(Method::PUT, "/things/1", Some(&serde_json::json!({"name": "bee"})))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn non_ok_status_carries_detail() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(503).set_body_json(serde_json::json!({"detail": "host unreachable"})),
            )
            .mount(&server)
            .await;

        let api = ApiClient::new(server.uri(), "k");
        let err = api
            .request::<Echo, ()>(Method::GET, "/ping", &[], None)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::UnexpectedStatus { status: 503, .. }));
        assert_eq!(err.to_string(), "host unreachable");
    }

    #[tokio::test]
    async fn created_is_not_the_expected_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201))
            .mount(&server)
            .await;

        let api = ApiClient::new(server.uri(), "k");
        let err = api.request_empty::<()>(Method::POST, "/x", None).await.unwrap_err();
        assert_eq!(err.status(), Some(201));
        assert_eq!(err.to_string(), "unexpected status 201");
    }

    #[tokio::test]
    async fn mismatched_payload_is_a_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[1, 2, 3]"))
            .mount(&server)
            .await;

        let api = ApiClient::new(server.uri(), "k");
        let err = api.request::<Echo, ()>(Method::GET, "/ping", &[], None).await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn unreachable_host_is_a_transport_error() {
        // Port 9 (discard) on localhost is closed in test environments.
        let api = ApiClient::new("http://127.0.0.1:9", "k");
        let err = api.request::<Echo, ()>(Method::GET, "/ping", &[], None).await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }

    #[test]
    fn segments_are_percent_encoded() {
        assert_eq!(segment("Queen Bee/2"), "Queen%20Bee%2F2");
    }
}
