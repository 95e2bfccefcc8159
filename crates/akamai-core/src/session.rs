//! Request execution.
//!
//! [`Executor`] is the seam between typed API clients and the wire: it takes a
//! fully described [`HttpRequest`], performs exactly one HTTP exchange, and hands
//! back the raw status and body. [`Session`] is the reqwest-backed implementation.

use crate::client::{ClientConfig, DEFAULT_POOL_IDLE_TIMEOUT, DEFAULT_POOL_MAX_IDLE_PER_HOST};
use crate::config::SessionConfig;
use crate::error::ApiError;
use crate::query::QueryParams;
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, ClientBuilder, Method, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

const USER_AGENT: &str = concat!("akamai-core/", env!("CARGO_PKG_VERSION"));
const ACCOUNT_SWITCH_KEY: &str = "accountSwitchKey";
const JSON: &str = "application/json";

/// A single outbound API call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// HTTP method
    pub method: Method,
    /// Absolute path, without query string
    pub path: String,
    /// Query parameters, in order
    pub query: Vec<(&'static str, String)>,
    /// Serialized JSON body
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// Create a request without query string or body.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    /// Attach query parameters.
    #[must_use]
    pub fn with_query(mut self, query: QueryParams) -> Self {
        self.query = query.into_pairs();
        self
    }

    /// Attach an already serialized JSON body.
    #[must_use]
    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    /// Path and query string as they appear on the request line.
    ///
    /// Values are rendered as-is; the transport applies form encoding.
    #[must_use]
    pub fn uri(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }
        let query = self
            .query
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{query}", self.path)
    }
}

/// Status and fully read body of an API response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Raw response body
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Create a response from its parts.
    #[must_use]
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Decode the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns the decoder error when the body does not match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_slice(&self.body)
    }

    /// Translate a non-success response into the structured API error.
    #[must_use]
    pub fn api_error(&self) -> ApiError {
        ApiError::from_response(self.status.as_u16(), &self.body)
    }
}

/// Performs HTTP exchanges on behalf of API clients.
///
/// Implementations send exactly one request per call and never retry.
/// Non-success statuses are returned as ordinary responses; only failures to
/// build or complete the exchange are errors.
#[async_trait]
pub trait Executor: Send + Sync {
    /// Execute `request` and return the raw response.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEndpoint`] when the URL cannot be built and a
    /// transport error ([`Error::HttpError`], [`Error::Timeout`],
    /// [`Error::ServiceUnavailable`]) when the exchange fails.
    async fn exec(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// Builder for [`Session`].
#[derive(Debug, Clone)]
pub struct SessionBuilder {
    config: SessionConfig,
    http_config: ClientConfig,
    user_agent: String,
}

impl SessionBuilder {
    /// Create a new builder from a [`SessionConfig`].
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        let http_config = ClientConfig::new()
            .with_timeout(config.timeout())
            .with_pool_idle_timeout(Duration::from_secs(DEFAULT_POOL_IDLE_TIMEOUT))
            .with_pool_max_idle(DEFAULT_POOL_MAX_IDLE_PER_HOST);

        Self {
            config,
            http_config,
            user_agent: USER_AGENT.to_string(),
        }
    }

    /// Override the HTTP client configuration used when building the session.
    ///
    /// The request timeout is still taken from
    /// [`SessionConfig::request_timeout_secs`].
    #[must_use]
    pub fn with_http_config(mut self, http_config: ClientConfig) -> Self {
        self.http_config = http_config.with_timeout(self.config.timeout());
        self
    }

    /// Override the `User-Agent` header.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Finalise the builder and create the [`Session`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] when the base URL, headers or CA
    /// certificate are invalid or the HTTP client cannot be created.
    pub fn build(self) -> Result<Session> {
        let base_url = self.config.parse_base_url()?;
        let headers = default_headers(&self.config)?;

        let mut builder = ClientBuilder::new()
            .user_agent(self.user_agent)
            .default_headers(headers)
            .timeout(self.http_config.timeout)
            .connect_timeout(self.http_config.connect_timeout)
            .pool_idle_timeout(self.http_config.pool_idle_timeout)
            .pool_max_idle_per_host(self.http_config.pool_max_idle_per_host)
            .gzip(self.http_config.enable_compression);

        if !self.config.tls_verify {
            warn!("TLS verification disabled for API session");
            builder = builder.danger_accept_invalid_certs(true);
        }

        if let Some(ca_cert) = &self.config.tls_ca_cert {
            debug!("loading CA certificate from {}", ca_cert.display());
            let bytes = std::fs::read(ca_cert).map_err(|err| {
                Error::ConfigError(format!(
                    "Failed to read CA certificate {}: {err}",
                    ca_cert.display()
                ))
            })?;
            let cert = reqwest::Certificate::from_pem(&bytes)
                .map_err(|err| Error::ConfigError(format!("Invalid CA certificate: {err}")))?;
            builder = builder.add_root_certificate(cert);
        }

        let http = builder
            .build()
            .map_err(|err| Error::ConfigError(format!("Failed to build HTTP client: {err}")))?;

        Ok(Session {
            http,
            base_url,
            account_key: self.config.account_key,
            log_requests: self.http_config.enable_logging,
        })
    }
}

fn default_headers(config: &SessionConfig) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    for (name, value) in &config.headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|err| Error::ConfigError(format!("Invalid header name `{name}`: {err}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|err| Error::ConfigError(format!("Invalid value for header `{name}`: {err}")))?;
        headers.insert(name, value);
    }
    Ok(headers)
}

/// reqwest-backed [`Executor`].
#[derive(Debug, Clone)]
pub struct Session {
    http: Client,
    base_url: Url,
    account_key: Option<String>,
    log_requests: bool,
}

impl Session {
    /// Construct a session directly from the configuration.
    ///
    /// # Errors
    ///
    /// See [`SessionBuilder::build`].
    pub fn from_config(config: &SessionConfig) -> Result<Self> {
        SessionBuilder::new(config.clone()).build()
    }

    /// Start a builder pre-populated with the provided configuration.
    #[must_use]
    pub fn builder(config: SessionConfig) -> SessionBuilder {
        SessionBuilder::new(config)
    }

    /// Return the base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn build_url(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|err| Error::InvalidEndpoint(format!("Invalid path `{path}`: {err}")))
    }
}

#[async_trait]
impl Executor for Session {
    async fn exec(&self, request: HttpRequest) -> Result<HttpResponse> {
        let url = self.build_url(&request.path)?;

        let mut query = request.query;
        if let Some(account_key) = &self.account_key {
            query.push((ACCOUNT_SWITCH_KEY, account_key.clone()));
        }

        let mut builder = self
            .http
            .request(request.method.clone(), url)
            .header(ACCEPT, JSON);
        if !query.is_empty() {
            builder = builder.query(&query);
        }
        if let Some(body) = request.body {
            builder = builder.header(CONTENT_TYPE, JSON).body(body);
        }

        if self.log_requests {
            debug!(method = %request.method, path = %request.path, ?query, "Sending API request");
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if self.log_requests {
            debug!(method = %request.method, path = %request.path, %status, "Received API response");
        }

        Ok(HttpResponse::new(status, body.to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_session(server: &MockServer) -> Session {
        Session::from_config(&SessionConfig::new(server.uri()).unwrap()).unwrap()
    }

    #[test]
    fn uri_renders_query_verbatim() {
        let request = HttpRequest::new(
            Method::GET,
            "/appsec/v1/configs/43253/versions/15/hostname-coverage/match-targets",
        )
        .with_query(QueryParams::new().with("hostname", "www.example.com"));
        assert_eq!(
            request.uri(),
            "/appsec/v1/configs/43253/versions/15/hostname-coverage/match-targets?hostname=www.example.com"
        );

        let bare = HttpRequest::new(Method::GET, "/appsec/v1/hostname-coverage");
        assert_eq!(bare.uri(), "/appsec/v1/hostname-coverage");
    }

    #[test]
    fn response_decodes_json_and_api_errors() {
        let ok = HttpResponse::new(StatusCode::OK, br#"{"block": "blockAllTrafficExceptAllowedIPs"}"#.to_vec());
        let value: serde_json::Value = ok.json().unwrap();
        assert_eq!(value["block"], "blockAllTrafficExceptAllowedIPs");

        let failed = HttpResponse::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            br#"{"type": "internal_error", "title": "Internal Server Error", "detail": "boom"}"#.to_vec(),
        );
        let err = failed.api_error();
        assert_eq!(err.status_code, 500);
        assert_eq!(err.detail, "boom");
    }

    #[tokio::test]
    async fn exec_returns_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/appsec/v1/hostname-coverage"))
            .and(header("Accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"hostnameCoverage": []})))
            .mount(&server)
            .await;

        let session = test_session(&server);
        let response = session
            .exec(HttpRequest::new(Method::GET, "/appsec/v1/hostname-coverage"))
            .await
            .unwrap();
        assert_eq!(response.status, StatusCode::OK);
        let body: serde_json::Value = response.json().unwrap();
        assert_eq!(body, json!({"hostnameCoverage": []}));
    }

    #[tokio::test]
    async fn exec_passes_non_success_through() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_string("missing"))
            .mount(&server)
            .await;

        let session = test_session(&server);
        let response = session
            .exec(HttpRequest::new(Method::GET, "/appsec/v1/hostname-coverage"))
            .await
            .unwrap();
        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert_eq!(response.body, b"missing".to_vec());
    }

    #[tokio::test]
    async fn exec_sends_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/appsec/v1/configs/43253/versions/15/security-policies/AAAA_81230/ip-geo-firewall"))
            .and(header("Content-Type", "application/json"))
            .and(body_json(json!({"block": "blockSpecificIPGeo"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"block": "blockSpecificIPGeo"})))
            .expect(1)
            .mount(&server)
            .await;

        let session = test_session(&server);
        let request = HttpRequest::new(
            Method::PUT,
            "/appsec/v1/configs/43253/versions/15/security-policies/AAAA_81230/ip-geo-firewall",
        )
        .with_body(br#"{"block":"blockSpecificIPGeo"}"#.to_vec());

        let response = session.exec(request).await.unwrap();
        assert_eq!(response.status, StatusCode::CREATED);
    }

    #[tokio::test]
    async fn exec_appends_account_switch_key_and_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/appsec/v1/configs/43253/versions/15/hostname-coverage/overlapping"))
            .and(query_param("hostname", "www.example.com"))
            .and(query_param("accountSwitchKey", "1-5C0YLB:1-8BYUX"))
            .and(header("X-Request-Source", "appsec-rs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let config = SessionConfig::new(server.uri())
            .unwrap()
            .with_account_key("1-5C0YLB:1-8BYUX")
            .with_header("X-Request-Source", "appsec-rs");
        let session = Session::from_config(&config).unwrap();

        let request = HttpRequest::new(
            Method::GET,
            "/appsec/v1/configs/43253/versions/15/hostname-coverage/overlapping",
        )
        .with_query(QueryParams::new().with("hostname", "www.example.com"));

        let response = session.exec(request).await.unwrap();
        assert_eq!(response.status, StatusCode::OK);
    }

    #[tokio::test]
    async fn exec_reports_transport_failures() {
        let session =
            Session::from_config(&SessionConfig::new("http://127.0.0.1:1").unwrap()).unwrap();
        let err = session
            .exec(HttpRequest::new(Method::GET, "/appsec/v1/hostname-coverage"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::ServiceUnavailable(_) | Error::HttpError(_) | Error::Timeout(_)
        ));
    }

    #[test]
    fn build_rejects_invalid_header() {
        let config = SessionConfig::new("https://akab-host.luna.akamaiapis.net")
            .unwrap()
            .with_header("bad header", "value");
        let err = Session::from_config(&config).unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));
    }

    #[test]
    fn http_config_override_keeps_session_timeout() {
        let config = SessionConfig::new("https://akab-host.luna.akamaiapis.net")
            .unwrap()
            .with_timeout(45);
        let builder = Session::builder(config).with_http_config(
            ClientConfig::new()
                .with_timeout(Duration::from_secs(5))
                .with_pool_max_idle(2),
        );

        assert_eq!(builder.http_config.timeout, Duration::from_secs(45));
        assert_eq!(builder.http_config.pool_max_idle_per_host, 2);
    }
}
