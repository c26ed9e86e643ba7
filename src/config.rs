use std::fmt;
use std::time::Duration;

use crate::domeneshop::client::{DEFAULT_API_URL, DEFAULT_TIMEOUT};
use crate::endpoint::DomainFilter;

#[derive(Clone)]
pub struct AppConfig {
    pub api_url: String,
    pub api_token: String,
    pub api_secret: String,
    pub request_timeout: Duration,
    pub mx_as_txt: bool,
    pub domain_filter: DomainFilter,
}

impl AppConfig {
    /// Config for the public API with default settings.
    pub fn new(api_token: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_token: api_token.into(),
            api_secret: api_secret.into(),
            request_timeout: DEFAULT_TIMEOUT,
            mx_as_txt: false,
            domain_filter: DomainFilter::default(),
        }
    }

    /// Canonical API base URL without trailing slash.
    pub fn api_base(&self) -> &str {
        self.api_url.trim_end_matches('/')
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_url", &self.api_url)
            .field("api_token", &"<redacted>")
            .field("api_secret", &"<redacted>")
            .field("request_timeout", &self.request_timeout)
            .field("mx_as_txt", &self.mx_as_txt)
            .field("domain_filter", &self.domain_filter)
            .finish()
    }
}
