use crate::error::{RestError, Result};
use reqwest::blocking::{Client, ClientBuilder};
use std::time::Duration;

/// Default Management API host
pub const DEFAULT_HOST: &str = "api.contentful.com";

/// Default host for binary uploads
pub const DEFAULT_UPLOAD_HOST: &str = "upload.contentful.com";

/// Create the HTTP client for Management API requests
pub fn create_rest_client(config: &Config) -> Result<Client> {
    ClientBuilder::new()
        .pool_max_idle_per_host(50)
        .timeout(config.timeout)
        .connect_timeout(Duration::from_secs(10))
        .build()
        .map_err(|e| RestError::RequestBuild(format!("failed to create HTTP client: {}", e)))
}

/// Create the HTTP client for upload requests with longer timeout
pub fn create_upload_client(config: &Config) -> Result<Client> {
    ClientBuilder::new()
        .pool_max_idle_per_host(50)
        .timeout(config.upload_timeout)
        .connect_timeout(Duration::from_secs(10))
        .build()
        .map_err(|e| RestError::RequestBuild(format!("failed to create upload HTTP client: {}", e)))
}

/// Configuration for the Management API client
#[derive(Debug, Clone)]
pub struct Config {
    /// URL scheme (http or https)
    pub scheme: String,
    /// API host, optionally with a port
    pub host: String,
    /// Host used for binary uploads
    pub host_upload: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Timeout for requests to the upload host
    pub upload_timeout: Duration,
    /// Retry rate-limited and server-error responses
    pub retry_on_error: bool,
    /// Maximum number of retries per request
    pub retry_limit: u32,
    /// Application name reported in the user-agent header
    pub application: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            scheme: "https".to_string(),
            host: DEFAULT_HOST.to_string(),
            host_upload: DEFAULT_UPLOAD_HOST.to_string(),
            timeout: Duration::from_secs(30),
            upload_timeout: Duration::from_secs(3600), // 1 hour
            retry_on_error: true,
            retry_limit: 5,
            application: None,
        }
    }
}

impl Config {
    /// Create a configuration for the given API host
    pub fn new(host: impl Into<String>) -> Self {
        Config {
            host: host.into(),
            ..Config::default()
        }
    }

    /// Use plain http instead of https
    pub fn with_insecure(mut self, insecure: bool) -> Self {
        self.scheme = if insecure { "http" } else { "https" }.to_string();
        self
    }

    /// Set the upload host
    pub fn with_upload_host(mut self, host: impl Into<String>) -> Self {
        self.host_upload = host.into();
        self
    }

    /// Set the per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the timeout for upload requests
    pub fn with_upload_timeout(mut self, timeout: Duration) -> Self {
        self.upload_timeout = timeout;
        self
    }

    /// Configure retries for 429 and 5xx responses
    pub fn with_retry(mut self, retry_on_error: bool, retry_limit: u32) -> Self {
        self.retry_on_error = retry_on_error;
        self.retry_limit = retry_limit;
        self
    }

    /// Set the application name reported to the API
    pub fn with_application(mut self, application: impl Into<String>) -> Self {
        self.application = Some(application.into());
        self
    }

    /// Get the base URL for API requests
    pub fn base_url(&self) -> String {
        format!("{}://{}", self.scheme, self.host)
    }

    /// Get the base URL for upload requests
    pub fn upload_base_url(&self) -> String {
        format!("{}://{}", self.scheme, self.host_upload)
    }

    /// Value of the `X-Contentful-User-Agent` header
    pub fn user_agent(&self) -> String {
        let mut agent = format!(
            "sdk contentful-management.rs/{}; platform Rust;",
            env!("CARGO_PKG_VERSION")
        );
        if let Some(ref app) = self.application {
            agent.push_str(&format!(" app {};", app));
        }
        agent
    }
}
