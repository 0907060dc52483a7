//! URL handling module for Page-Sift
//!
//! This module is the crawl's scope filter: it owns the crawl boundary
//! ([`CrawlScope`]), resolves raw `href` values into absolute URLs, and
//! validates the user-supplied starting URL.

mod normalize;

use crate::{UrlError, UrlResult};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use url::Url;

pub use normalize::{ensure_scheme, normalize_link};

/// How candidate URLs are compared against the crawl boundary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScopeMode {
    /// Canonical starting URL as a string prefix, plus identical scheme, host and port
    #[default]
    HostPrefix,
    /// The starting URL exactly as given, compared as a raw string prefix
    Prefix,
}

impl ScopeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HostPrefix => "host-prefix",
            Self::Prefix => "prefix",
        }
    }
}

impl fmt::Display for ScopeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScopeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "host-prefix" => Ok(Self::HostPrefix),
            "prefix" => Ok(Self::Prefix),
            other => Err(format!(
                "unknown scope mode '{}', expected 'host-prefix' or 'prefix'",
                other
            )),
        }
    }
}

/// The immutable boundary of one crawl
///
/// The prefix doubles as the seed URL: it is the first page fetched and
/// every other admitted URL starts with it.
#[derive(Debug, Clone)]
pub struct CrawlScope {
    prefix: String,
    origin: Url,
    mode: ScopeMode,
}

impl CrawlScope {
    /// Builds a scope from a starting URL that already carries a scheme
    ///
    /// In [`ScopeMode::HostPrefix`] the URL is canonicalised first, so
    /// `https://example.com` becomes `https://example.com/`.
    ///
    /// # Examples
    ///
    /// ```
    /// use page_sift::url::{CrawlScope, ScopeMode};
    ///
    /// let scope = CrawlScope::new("https://example.com", ScopeMode::HostPrefix).unwrap();
    /// assert_eq!(scope.prefix(), "https://example.com/");
    /// assert!(scope.contains("https://example.com/about"));
    /// assert!(!scope.contains("https://other.com/"));
    /// ```
    pub fn new(start_url: &str, mode: ScopeMode) -> UrlResult<Self> {
        let start_url = start_url.trim();
        let origin = Url::parse(start_url).map_err(|e| UrlError::Parse(e.to_string()))?;

        if origin.scheme() != "http" && origin.scheme() != "https" {
            return Err(UrlError::InvalidScheme(origin.scheme().to_string()));
        }
        if origin.host_str().is_none() {
            return Err(UrlError::MissingHost);
        }

        let prefix = match mode {
            ScopeMode::HostPrefix => origin.to_string(),
            ScopeMode::Prefix => start_url.to_string(),
        };

        Ok(Self {
            prefix,
            origin,
            mode,
        })
    }

    /// The boundary prefix, which is also the seed URL
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The parsed starting URL
    pub fn origin(&self) -> &Url {
        &self.origin
    }

    pub fn mode(&self) -> ScopeMode {
        self.mode
    }

    /// Returns true if `candidate` lies inside the crawl boundary
    pub fn contains(&self, candidate: &str) -> bool {
        if !candidate.starts_with(&self.prefix) {
            return false;
        }

        match self.mode {
            ScopeMode::Prefix => true,
            ScopeMode::HostPrefix => match Url::parse(candidate) {
                Ok(url) => {
                    url.scheme() == self.origin.scheme()
                        && url.host_str() == self.origin.host_str()
                        && url.port_or_known_default() == self.origin.port_or_known_default()
                }
                Err(_) => false,
            },
        }
    }
}

/// Decides whether a candidate URL lies inside the crawl boundary
pub fn is_in_scope(candidate: &str, scope: &CrawlScope) -> bool {
    scope.contains(candidate)
}
