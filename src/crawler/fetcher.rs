//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - The [`Fetcher`] capability the orchestrator is written against
//! - Building HTTP clients with a proper user agent string
//! - Surfacing redirects instead of following them
//! - Error classification into [`FetchError`]

use crate::config::{HttpConfig, UserAgentConfig};
use async_trait::async_trait;
use reqwest::header::LOCATION;
use reqwest::{redirect::Policy, Client, Response};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Why a page could not be retrieved
///
/// The crawler treats every variant the same way: the page is recorded as
/// failed and the crawl moves on. The variants only exist for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("failed to read response body: {0}")]
    Body(String),

    /// The server answered with a redirect to this absolute URL
    #[error("redirected to {0}")]
    Redirect(String),

    #[error("redirect left scope: {0}")]
    RedirectOutOfScope(String),

    #[error("too many redirects")]
    TooManyRedirects,

    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else if e.is_connect() {
            FetchError::Connect(e.to_string())
        } else if let Some(status) = e.status() {
            FetchError::Status(status.as_u16())
        } else if e.is_body() || e.is_decode() {
            FetchError::Body(e.to_string())
        } else {
            FetchError::Other(e.to_string())
        }
    }
}

/// Retrieves the raw content of a page
///
/// Implementations must be safe to call concurrently; the orchestrator may
/// have several fetches in flight during one step.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches `url` and returns its body as text
    ///
    /// Redirects are not followed. A redirect response is reported as
    /// [`FetchError::Redirect`] carrying the absolute target, and the caller
    /// decides whether the next hop may be fetched.
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

#[async_trait]
impl<T: Fetcher + ?Sized> Fetcher for Arc<T> {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        (**self).fetch(url).await
    }
}

/// [`Fetcher`] backed by a `reqwest` client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher from HTTP and user agent settings
    pub fn new(http: &HttpConfig, user_agent: &UserAgentConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(http, user_agent)?,
        })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if status.is_redirection() {
            if let Some(target) = redirect_target(&response) {
                tracing::debug!("{} redirects to {}", url, target);
                return Err(FetchError::Redirect(target));
            }
        }

        if !status.is_success() {
            tracing::debug!("{} answered with HTTP {}", url, status.as_u16());
            return Err(FetchError::Status(status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::Body(e.to_string()))
    }
}

/// Resolves the `Location` header of a redirect against the request URL
fn redirect_target(response: &Response) -> Option<String> {
    let location = response.headers().get(LOCATION)?.to_str().ok()?;
    response.url().join(location.trim()).ok().map(String::from)
}

/// Builds an HTTP client with proper configuration
///
/// Redirects are not followed; see [`Fetcher::fetch`].
///
/// # Example
///
/// ```no_run
/// use page_sift::config::{HttpConfig, UserAgentConfig};
/// use page_sift::crawler::build_http_client;
///
/// let client = build_http_client(&HttpConfig::default(), &UserAgentConfig::default()).unwrap();
/// ```
pub fn build_http_client(
    http: &HttpConfig,
    user_agent: &UserAgentConfig,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(Duration::from_secs(http.timeout_secs))
        .connect_timeout(Duration::from_secs(http.connect_timeout_secs))
        .redirect(Policy::none()) // Handle redirects manually
        .gzip(true)
        .brotli(true)
        .build()
}
