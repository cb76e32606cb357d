use std::time::Duration;

use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use slotwatch_domain::SlotwatchError;
use tracing::debug;

use crate::errors::conversions::status_error;
use crate::errors::InfraError;

/// HTTP client with a request timeout and status-aware JSON decoding.
///
/// Requests are attempted once. Upstream adapters degrade on failure rather
/// than retrying.
#[derive(Clone, Debug)]
pub struct HttpClient {
    client: ReqwestClient,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Convenience constructor with default configuration.
    pub fn new() -> Result<Self, SlotwatchError> {
        Self::builder().build()
    }

    /// Create a request builder using the underlying reqwest client.
    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    /// Execute the request and return the raw response, whatever its status.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, SlotwatchError> {
        let request = builder.build().map_err(|err| SlotwatchError::from(InfraError::from(err)))?;
        let method = request.method().clone();
        let url = request.url().clone();
        debug!(%method, url = %url.path(), "sending HTTP request");

        match self.client.execute(request).await {
            Ok(response) => {
                debug!(%method, url = %url.path(), status = %response.status(), "received HTTP response");
                Ok(response)
            }
            Err(err) => {
                debug!(%method, url = %url.path(), error = %err, "HTTP request failed");
                Err(InfraError::from(err).into())
            }
        }
    }

    /// Execute the request, require a 2xx status and decode the JSON body.
    pub async fn send_json<T>(&self, builder: RequestBuilder) -> Result<T, SlotwatchError>
    where
        T: DeserializeOwned,
    {
        let response = self.send(builder).await?;
        let response = ensure_success(response).await?;
        response.json::<T>().await.map_err(|err| InfraError::from(err).into())
    }

    /// Execute the request and require a 2xx status, discarding the body.
    pub async fn send_expect_success(&self, builder: RequestBuilder) -> Result<(), SlotwatchError> {
        let response = self.send(builder).await?;
        ensure_success(response).await.map(drop)
    }
}

async fn ensure_success(response: Response) -> Result<Response, SlotwatchError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(status_error(status, &body).into())
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    user_agent: Option<String>,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: Some(concat!("slotwatch/", env!("CARGO_PKG_VERSION")).to_string()),
        }
    }
}

impl HttpClientBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    pub fn build(self) -> Result<HttpClient, SlotwatchError> {
        let mut builder = ReqwestClient::builder().timeout(self.timeout).no_proxy();

        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        let client = builder.build().map_err(|err| SlotwatchError::from(InfraError::from(err)))?;

        Ok(HttpClient { client })
    }
}

#[cfg(test)]
mod tests {
    use reqwest::{Method, StatusCode};
    use serde::Deserialize;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[derive(Debug, Deserialize)]
    struct Pong {
        ok: bool,
    }

    #[tokio::test]
    async fn decodes_successful_json() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ping"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpClient::new().unwrap();
        let pong: Pong = client
            .send_json(client.request(Method::GET, format!("{}/ping", server.uri())))
            .await
            .unwrap();

        assert!(pong.ok);
    }

    #[tokio::test]
    async fn server_errors_are_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpClient::new().unwrap();
        let response = client.send(client.request(Method::GET, server.uri())).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn non_success_status_becomes_domain_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid token"))
            .mount(&server)
            .await;

        let client = HttpClient::new().unwrap();
        let result: Result<Pong, _> =
            client.send_json(client.request(Method::GET, server.uri())).await;

        match result {
            Err(SlotwatchError::Auth(msg)) => assert!(msg.contains("invalid token")),
            other => panic!("expected auth error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn sends_configured_user_agent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(header("user-agent", "slotwatch-test"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpClient::builder().user_agent("slotwatch-test").build().unwrap();
        client.send_expect_success(client.request(Method::GET, server.uri())).await.unwrap();
    }

    #[tokio::test]
    async fn malformed_body_is_a_network_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = HttpClient::new().unwrap();
        let result: Result<Pong, _> =
            client.send_json(client.request(Method::GET, server.uri())).await;

        assert!(matches!(result, Err(SlotwatchError::Network(_))));
    }
}
