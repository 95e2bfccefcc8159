//! Asynchronous Application Security client implementation.
//!
//! Every operation follows the same pipeline: validate the identifying fields,
//! build the method, path, query and body, execute one HTTP exchange, check the
//! status, decode, and post-process list responses.

use crate::Result;
use akamai_core::client::ClientConfig;
use akamai_core::config::SessionConfig;
use akamai_core::query::QueryParams;
use akamai_core::session::{Executor, HttpRequest, SessionBuilder};
use akamai_core::Error;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::debug;
use validator::{Validate, ValidationError};

const USER_AGENT: &str = concat!("akamai-appsec/", env!("CARGO_PKG_VERSION"));

/// Path prefix shared by all security-policy scoped resources.
pub(crate) fn security_policy_path(config_id: i64, version: i64, policy_id: &str) -> String {
    format!("/appsec/v1/configs/{config_id}/versions/{version}/security-policies/{policy_id}")
}

/// Rejects an unset (zero) id. Negative ids are left to the server.
#[allow(clippy::trivially_copy_pass_by_ref)]
pub(crate) fn required_id(value: impl std::borrow::Borrow<i64>) -> std::result::Result<(), ValidationError> {
    if *value.borrow() == 0 {
        let mut err = ValidationError::new("required");
        err.message = Some("cannot be blank".into());
        return Err(err);
    }
    Ok(())
}

/// A single API operation: how a request value maps onto the wire and back.
pub trait Endpoint: Validate + Sync {
    /// Decoded response body.
    type Response: DeserializeOwned + Send;

    /// Operation name used in logs and error prefixes.
    const OPERATION: &'static str;

    /// HTTP method.
    const METHOD: Method;

    /// Absolute request path with identifying fields interpolated.
    fn path(&self) -> String;

    /// Query parameters appended to the path.
    fn query(&self) -> QueryParams {
        QueryParams::new()
    }

    /// Serialized JSON body, for mutating operations.
    ///
    /// # Errors
    ///
    /// Returns the encoder error when the payload cannot be serialized.
    fn body(&self) -> serde_json::Result<Option<Vec<u8>>> {
        Ok(None)
    }

    /// Hook applied to the decoded response before it is returned.
    fn post_process(&self, response: Self::Response) -> Self::Response {
        response
    }

    /// Assemble the outbound request.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RequestBuild`] when the body cannot be serialized.
    fn http_request(&self) -> Result<HttpRequest> {
        let mut request = HttpRequest::new(Self::METHOD, self.path()).with_query(self.query());
        if let Some(body) = self
            .body()
            .map_err(|err| Error::request_build(Self::OPERATION, err))?
        {
            request = request.with_body(body);
        }
        Ok(request)
    }
}

/// Returns true if `status` completes an operation issued with `method`.
///
/// Reads succeed only with `200 OK`; writes also accept `201 Created`.
#[must_use]
pub fn is_success(method: &Method, status: StatusCode) -> bool {
    if *method == Method::GET {
        status == StatusCode::OK
    } else {
        status == StatusCode::OK || status == StatusCode::CREATED
    }
}

/// Builder for [`AppsecClient`].
#[derive(Debug, Clone)]
pub struct AppsecClientBuilder {
    inner: SessionBuilder,
}

impl AppsecClientBuilder {
    /// Create a builder from a session configuration.
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        Self {
            inner: SessionBuilder::new(config).with_user_agent(USER_AGENT),
        }
    }

    /// Override the HTTP client configuration.
    #[must_use]
    pub fn with_http_config(mut self, config: ClientConfig) -> Self {
        self.inner = self.inner.with_http_config(config);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] when the session cannot be created.
    pub fn build(self) -> Result<AppsecClient> {
        let session = self.inner.build()?;
        Ok(AppsecClient::with_executor(Arc::new(session)))
    }
}

/// Asynchronous Application Security client.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct AppsecClient {
    executor: Arc<dyn Executor>,
}

impl std::fmt::Debug for AppsecClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppsecClient").finish_non_exhaustive()
    }
}

impl AppsecClient {
    /// Construct a client directly from the base URL.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] when the URL is invalid.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        AppsecClientBuilder::new(SessionConfig::new(base_url)?).build()
    }

    /// Construct a client from a session configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] when the session cannot be created.
    pub fn from_config(config: &SessionConfig) -> Result<Self> {
        AppsecClientBuilder::new(config.clone()).build()
    }

    /// Start a builder pre-populated with the provided configuration.
    #[must_use]
    pub fn builder(config: SessionConfig) -> AppsecClientBuilder {
        AppsecClientBuilder::new(config)
    }

    /// Use a caller-supplied executor instead of the reqwest session.
    #[must_use]
    pub fn with_executor(executor: Arc<dyn Executor>) -> Self {
        Self { executor }
    }

    /// Run any [`Endpoint`].
    ///
    /// # Errors
    ///
    /// - [`Error::Validation`] when identifying fields are missing; nothing is sent.
    /// - [`Error::RequestBuild`] when the request cannot be assembled.
    /// - [`Error::Transport`] when the exchange fails or the body cannot be decoded.
    /// - [`Error::Api`] for any status the operation does not accept.
    pub async fn execute<E: Endpoint>(&self, params: &E) -> Result<E::Response> {
        params.validate()?;

        let request = params.http_request()?;
        debug!(operation = E::OPERATION, method = %request.method, uri = %request.uri(), "starting operation");

        let response = self.executor.exec(request).await.map_err(|err| match err {
            Error::InvalidEndpoint(_) => Error::request_build(E::OPERATION, err),
            other => Error::transport(E::OPERATION, other),
        })?;

        if !is_success(&E::METHOD, response.status) {
            debug!(operation = E::OPERATION, status = %response.status, "API returned an error");
            return Err(response.api_error().into());
        }

        let decoded = response
            .json::<E::Response>()
            .map_err(|err| Error::transport(E::OPERATION, err))?;

        Ok(params.post_process(decoded))
    }
}
