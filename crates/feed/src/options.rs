// ABOUTME: Configuration for the podcast reader: HTTP timeout, user agent and an optional client.
// ABOUTME: ReaderBuilder provides a fluent API for constructing PodcastReader instances.

use std::time::Duration;

use crate::reader::PodcastReader;

/// Settings shared by every read made through one [`PodcastReader`].
#[derive(Debug, Clone)]
pub struct ReaderOptions {
    pub timeout: Duration,
    pub user_agent: String,
    /// Used as-is for http(s) URIs when set; `timeout` and `user_agent` are then ignored.
    pub http_client: Option<reqwest::blocking::Client>,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: concat!("podcatcher/", env!("CARGO_PKG_VERSION")).to_string(),
            http_client: None,
        }
    }
}

/// Builder for constructing PodcastReader instances with custom configuration.
#[derive(Debug, Clone, Default)]
pub struct ReaderBuilder {
    opts: ReaderOptions,
}

impl ReaderBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the HTTP request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.opts.timeout = timeout;
        self
    }

    /// Set the User-Agent header sent with HTTP requests.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.opts.user_agent = user_agent.into();
        self
    }

    /// Use a preconfigured HTTP client.
    pub fn http_client(mut self, client: reqwest::blocking::Client) -> Self {
        self.opts.http_client = Some(client);
        self
    }

    pub fn build(self) -> PodcastReader {
        PodcastReader::with_options(self.opts)
    }
}
