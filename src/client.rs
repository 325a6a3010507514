use crate::error::{ApiError, Result};
use reqwest::{Client, ClientBuilder};
use std::env;
use std::time::Duration;
use url::Url;

/// Default API root; endpoint paths resolve relative to it
pub const DEFAULT_BASE_URL: &str = "https://api.dribbble.com/v1/";

/// Create the HTTP client for API requests
/// with connection pooling and timeouts taken from the configuration
pub fn create_http_client(config: &Config) -> Result<Client> {
    ClientBuilder::new()
        .pool_max_idle_per_host(50)
        .timeout(config.timeout)
        .connect_timeout(config.connect_timeout)
        .user_agent(config.user_agent.clone())
        .build()
        .map_err(|e| ApiError::ClientBuild(e.to_string()))
}

/// Configuration for the Dribbble client
#[derive(Debug, Clone)]
pub struct Config {
    /// API root, e.g. `https://api.dribbble.com/v1/`
    pub base_url: String,
    /// OAuth application id, sent by the code exchange
    pub client_id: Option<String>,
    /// OAuth application secret, sent by the code exchange
    pub client_secret: Option<String>,
    /// Whole-request timeout
    pub timeout: Duration,
    /// Connection establishment timeout
    pub connect_timeout: Duration,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: DEFAULT_BASE_URL.to_string(),
            client_id: None,
            client_secret: None,
            timeout: Duration::from_secs(300), // 5 minutes
            connect_timeout: Duration::from_secs(10),
            user_agent: format!("dribbble-rs/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Config {
    /// Create a configuration pointing at the given API root
    pub fn new(base_url: impl Into<String>) -> Self {
        Config {
            base_url: base_url.into(),
            ..Config::default()
        }
    }

    /// Build a configuration from `DRIBBBLE_BASE_URL`, `DRIBBBLE_CLIENT_ID`
    /// and `DRIBBBLE_CLIENT_SECRET`, keeping defaults for unset variables
    pub fn from_env() -> Self {
        let mut config = Config::default();
        if let Some(base_url) = non_empty_var("DRIBBBLE_BASE_URL") {
            config.base_url = base_url;
        }
        config.client_id = non_empty_var("DRIBBBLE_CLIENT_ID");
        config.client_secret = non_empty_var("DRIBBBLE_CLIENT_SECRET");
        config
    }

    /// Set the OAuth application credentials
    pub fn with_credentials(
        mut self,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        self.client_id = Some(client_id.into());
        self.client_secret = Some(client_secret.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the connection establishment timeout
    pub fn with_connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Parse the API root.
    ///
    /// A missing trailing slash is added so relative paths land below the
    /// root instead of replacing its last segment.
    pub fn base_url(&self) -> Result<Url> {
        if self.base_url.ends_with('/') {
            Ok(Url::parse(&self.base_url)?)
        } else {
            Ok(Url::parse(&format!("{}/", self.base_url))?)
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}
