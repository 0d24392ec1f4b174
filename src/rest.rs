use crate::client::{create_rest_client, create_upload_client, Config};
use crate::error::{RestError, Result};
use crate::query::QueryParams;
use crate::token::AccessToken;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, warn};
use url::Url;

/// Content type of every JSON body sent to the Management API
pub const MANAGEMENT_CONTENT_TYPE: &str = "application/vnd.contentful.management.v1+json";

/// Content type of JSON-patch bodies
pub const JSON_PATCH_CONTENT_TYPE: &str = "application/json-patch+json";

const REQUEST_ID_HEADER: &str = "X-Contentful-Request-Id";
const RATE_LIMIT_RESET_HEADER: &str = "X-Contentful-RateLimit-Reset";

/// Extra request headers, applied in order; a later value replaces an
/// earlier one with the same name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers(Vec<(String, String)>);

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a header
    pub fn with(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.0.push((name.into(), value.to_string()));
        self
    }

    /// `X-Contentful-Version`, required by every write to a versioned entity
    pub fn version(self, version: u64) -> Self {
        self.with("X-Contentful-Version", version)
    }

    /// Append all headers of `other` after ours
    pub fn merge(mut self, other: &Headers) -> Self {
        self.0.extend(other.0.iter().cloned());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .rev()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn apply(&self, map: &mut HeaderMap) -> Result<()> {
        for (name, value) in &self.0 {
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                RestError::InvalidHeader {
                    name: name.clone(),
                    reason: e.to_string(),
                }
            })?;
            let header_value =
                HeaderValue::from_str(value).map_err(|e| RestError::InvalidHeader {
                    name: name.clone(),
                    reason: e.to_string(),
                })?;
            map.insert(header_name, header_value);
        }
        Ok(())
    }
}

/// Which host a request goes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Host {
    Api,
    Upload,
}

/// Request body
enum Payload {
    Empty,
    Json(Vec<u8>),
    Binary(Vec<u8>),
}

/// Successful response as received
struct RawResponse {
    status: StatusCode,
    body: Vec<u8>,
}

impl RawResponse {
    fn json<T: DeserializeOwned>(&self) -> Result<T> {
        if self.status == StatusCode::NO_CONTENT || self.body.is_empty() {
            return Ok(serde_json::from_value(Value::Null)?);
        }
        Ok(serde_json::from_slice(&self.body)?)
    }
}

/// Context for Management API requests: HTTP clients, configuration and credentials
#[derive(Debug, Clone)]
pub struct RestContext {
    /// HTTP client
    pub client: Client,
    /// HTTP client for the upload host
    pub upload_client: Client,
    /// Configuration
    pub config: Config,
    token: AccessToken,
}

impl RestContext {
    /// Create a new REST context with default configuration
    pub fn new(token: AccessToken) -> Result<Self> {
        Self::with_config(Config::default(), token)
    }

    /// Create a new REST context with custom configuration
    pub fn with_config(config: Config, token: AccessToken) -> Result<Self> {
        Ok(RestContext {
            client: create_rest_client(&config)?,
            upload_client: create_upload_client(&config)?,
            config,
            token,
        })
    }

    pub fn token(&self) -> &AccessToken {
        &self.token
    }

    /// GET `path` relative to the API host
    pub fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &QueryParams,
        headers: &Headers,
    ) -> Result<T> {
        self.execute(Host::Api, Method::GET, path, query, Payload::Empty, headers)?
            .json()
    }

    /// POST a JSON body
    pub fn post<T, B>(&self, path: &str, body: &B, headers: &Headers) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let payload = Payload::Json(serde_json::to_vec(body)?);
        self.execute(Host::Api, Method::POST, path, &QueryParams::new(), payload, headers)?
            .json()
    }

    /// PUT a JSON body
    pub fn put<T, B>(&self, path: &str, body: &B, headers: &Headers) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let payload = Payload::Json(serde_json::to_vec(body)?);
        self.execute(Host::Api, Method::PUT, path, &QueryParams::new(), payload, headers)?
            .json()
    }

    /// PUT without a body, used by state transitions (publish, archive, process)
    pub fn put_empty<T: DeserializeOwned>(&self, path: &str, headers: &Headers) -> Result<T> {
        self.execute(
            Host::Api,
            Method::PUT,
            path,
            &QueryParams::new(),
            Payload::Empty,
            headers,
        )?
        .json()
    }

    /// PATCH with a JSON body
    pub fn patch<T, B>(&self, path: &str, body: &B, headers: &Headers) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let payload = Payload::Json(serde_json::to_vec(body)?);
        self.execute(Host::Api, Method::PATCH, path, &QueryParams::new(), payload, headers)?
            .json()
    }

    /// DELETE, discarding any response body
    pub fn delete(&self, path: &str, headers: &Headers) -> Result<()> {
        self.execute(
            Host::Api,
            Method::DELETE,
            path,
            &QueryParams::new(),
            Payload::Empty,
            headers,
        )?;
        Ok(())
    }

    /// DELETE returning the updated entity (unpublish, unarchive)
    pub fn delete_json<T: DeserializeOwned>(&self, path: &str, headers: &Headers) -> Result<T> {
        self.execute(
            Host::Api,
            Method::DELETE,
            path,
            &QueryParams::new(),
            Payload::Empty,
            headers,
        )?
        .json()
    }

    /// POST raw bytes to the upload host
    pub fn upload_post<T: DeserializeOwned>(&self, path: &str, data: Vec<u8>) -> Result<T> {
        self.execute(
            Host::Upload,
            Method::POST,
            path,
            &QueryParams::new(),
            Payload::Binary(data),
            &Headers::new(),
        )?
        .json()
    }

    /// GET from the upload host
    pub fn upload_get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.execute(
            Host::Upload,
            Method::GET,
            path,
            &QueryParams::new(),
            Payload::Empty,
            &Headers::new(),
        )?
        .json()
    }

    /// DELETE on the upload host
    pub fn upload_delete(&self, path: &str) -> Result<()> {
        self.execute(
            Host::Upload,
            Method::DELETE,
            path,
            &QueryParams::new(),
            Payload::Empty,
            &Headers::new(),
        )?;
        Ok(())
    }

    /// Full URL for `path` on the given host, with query parameters
    fn url(&self, host: Host, path: &str, query: &QueryParams) -> Result<Url> {
        let base = match host {
            Host::Api => self.config.base_url(),
            Host::Upload => self.config.upload_base_url(),
        };
        let mut url = Url::parse(&format!("{}{}", base, path))?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query.iter() {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    /// Default headers first, then the content type of the payload, then
    /// the endpoint and caller headers.
    fn headers(&self, payload: &Payload, extra: &Headers) -> Result<HeaderMap> {
        let mut map = HeaderMap::new();
        let authorization = HeaderValue::from_str(&self.token.authorization())
            .map_err(|e| RestError::InvalidToken(e.to_string()))?;
        map.insert(AUTHORIZATION, authorization);

        let mut defaults =
            Headers::new().with("X-Contentful-User-Agent", self.config.user_agent());
        match payload {
            Payload::Json(_) => {
                defaults = defaults.with(CONTENT_TYPE.as_str(), MANAGEMENT_CONTENT_TYPE)
            }
            Payload::Binary(_) => {
                defaults = defaults.with(CONTENT_TYPE.as_str(), "application/octet-stream")
            }
            Payload::Empty => {}
        }
        defaults.merge(extra).apply(&mut map)?;
        Ok(map)
    }

    fn execute(
        &self,
        host: Host,
        method: Method,
        path: &str,
        query: &QueryParams,
        payload: Payload,
        headers: &Headers,
    ) -> Result<RawResponse> {
        let url = self.url(host, path, query)?;
        let header_map = self.headers(&payload, headers)?;
        let client = match host {
            Host::Api => &self.client,
            Host::Upload => &self.upload_client,
        };

        let mut attempt: u32 = 0;
        loop {
            let mut request = client
                .request(method.clone(), url.clone())
                .headers(header_map.clone());
            match &payload {
                Payload::Json(body) | Payload::Binary(body) => {
                    request = request.body(body.clone());
                }
                Payload::Empty => {}
            }

            let start = Instant::now();
            let http_response = request.send()?;
            let status = http_response.status();

            let request_id = header_str(http_response.headers(), REQUEST_ID_HEADER);
            let rate_limit_reset = header_str(http_response.headers(), RATE_LIMIT_RESET_HEADER)
                .and_then(|v| v.parse::<u64>().ok());

            let body = http_response.bytes()?.to_vec();

            debug!(
                method = %method,
                path,
                status = status.as_u16(),
                elapsed = ?start.elapsed(),
                request_id = request_id.as_deref().unwrap_or(""),
                "management api request"
            );

            if status.is_success() {
                return Ok(RawResponse { status, body });
            }

            if self.should_retry(status, attempt) {
                let wait = retry_delay(status, rate_limit_reset, attempt);
                warn!(
                    method = %method,
                    path,
                    status = status.as_u16(),
                    attempt = attempt + 1,
                    limit = self.config.retry_limit,
                    wait = ?wait,
                    "retrying request"
                );
                std::thread::sleep(wait);
                attempt += 1;
                continue;
            }

            return Err(RestError::from_body(status.as_u16(), &body, request_id));
        }
    }

    fn should_retry(&self, status: StatusCode, attempt: u32) -> bool {
        self.config.retry_on_error
            && attempt < self.config.retry_limit
            && (status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error())
    }
}

fn header_str(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
}

/// Wait before retry number `attempt + 1`.
///
/// Rate-limited responses wait until the window named by the server resets;
/// everything else backs off as `sqrt(2)^attempt` tenths of a second.
pub(crate) fn retry_delay(
    status: StatusCode,
    rate_limit_reset: Option<u64>,
    attempt: u32,
) -> Duration {
    if status == StatusCode::TOO_MANY_REQUESTS {
        if let Some(seconds) = rate_limit_reset {
            return Duration::from_secs(seconds);
        }
    }
    let factor = std::f64::consts::SQRT_2.powi(attempt as i32);
    Duration::from_millis((factor * 100.0).round() as u64)
}
