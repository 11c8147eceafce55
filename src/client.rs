use super::error::{Error, Result};

use reqwest::blocking::Response;
use reqwest::{Method, Proxy};
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use tracing::{debug, warn};

use std::thread;
use std::time::Duration;

/// Endpoint used when none is configured explicitly.
pub const DEFAULT_BASE_URL: &str = "https://wallhaven.cc/api/v1";

const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(2);
const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(5);

/// Bounded retry budget applied when a request is rate limited or fails at
/// the transport level. The delay is constant, applied only between
/// attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    attempts: u32,
    delay: Duration,
}

impl RetryPolicy {
    /// Creates a policy performing up to `attempts` attempts with `delay`
    /// slept between them. `attempts` is clamped to a minimum of 1.
    pub fn new(attempts: u32, delay: Duration) -> Self {
        RetryPolicy {
            attempts: attempts.max(1),
            delay,
        }
    }

    /// Maximum number of attempts, including the initial one.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Sleep time between attempts.
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for RetryPolicy {
    /// A single attempt with no delay.
    fn default() -> Self {
        RetryPolicy {
            attempts: 1,
            delay: Duration::ZERO,
        }
    }
}

/// Outcome of a single request attempt. `Retry` carries the error that
/// becomes terminal once the retry budget is spent; anything unrecoverable
/// is returned as a plain `Err` by the attempt closure instead.
enum Attempt<T> {
    Done(T),
    Retry(Error),
}

/// Builder for [`Client`]. All settings are optional and immutable once the
/// client is built.
///
/// ```no_run
/// # use wallhaven::client::{Client, RetryPolicy};
/// # use std::time::Duration;
/// # fn main() -> Result<(), wallhaven::error::Error> {
/// let client = Client::builder()
///     .api_key("my-secret-key")
///     .retry(RetryPolicy::new(3, Duration::from_secs(1)))
///     .build()?;
/// # Ok(()) }
/// ```
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    api_key: Option<String>,
    base_url: String,
    verify_tls: bool,
    connect_timeout: Duration,
    timeout: Duration,
    retry: RetryPolicy,
    proxy: Option<String>,
}

impl ClientBuilder {
    pub fn new() -> Self {
        ClientBuilder {
            api_key: None,
            base_url: String::from(DEFAULT_BASE_URL),
            verify_tls: true,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            timeout: DEFAULT_READ_TIMEOUT,
            retry: RetryPolicy::default(),
            proxy: None,
        }
    }

    /// API key sent as the `apikey` query parameter on every request.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Override the API endpoint. Trailing slashes are tolerated.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Whether to verify TLS certificates. Defaults to `true`.
    pub fn verify_tls(mut self, verify_tls: bool) -> Self {
        self.verify_tls = verify_tls;
        self
    }

    /// Connection timeout. Defaults to 2 seconds.
    pub fn connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }

    /// Total request timeout, from connect until the body is done. Defaults
    /// to 5 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Retry budget for rate-limited and transport-failed requests.
    /// Defaults to a single attempt.
    pub fn retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Proxy every request through the given URL. Supports `http`, `https`
    /// and (with the `socks` feature) `socks5` schemes.
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    pub fn build(self) -> Result<Client> {
        let mut builder = reqwest::blocking::Client::builder()
            .connect_timeout(self.connect_timeout)
            .timeout(self.timeout);

        if !self.verify_tls {
            builder = builder.danger_accept_invalid_certs(true);
        }

        if let Some(proxy) = &self.proxy {
            let proxy = Proxy::all(proxy.as_str())
                .map_err(|e| Error::unhandled(format!("invalid proxy {proxy}: {e}"), None))?;
            builder = builder.proxy(proxy);
        }

        let http = builder
            .build()
            .map_err(|e| Error::unhandled(format!("could not create HTTP client: {e}"), None))?;

        Ok(Client {
            http,
            api_key: self.api_key,
            base_url: self.base_url,
            retry: self.retry,
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the Wallhaven API. Cheap to share by reference: all
/// configuration is immutable after construction, so `&Client` can be used
/// from multiple threads without locking.
#[derive(Debug)]
pub struct Client {
    http: reqwest::blocking::Client,
    api_key: Option<String>,
    base_url: String,
    retry: RetryPolicy,
}

impl Client {
    /// Create an anonymous client with default settings.
    pub fn new() -> Result<Self> {
        ClientBuilder::new().build()
    }

    /// Create a client authenticated with the given API key, other settings
    /// left at their defaults.
    pub fn with_api_key(api_key: impl Into<String>) -> Result<Self> {
        ClientBuilder::new().api_key(api_key).build()
    }

    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// The configured API endpoint.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Full URL for an endpoint under the configured base.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> String {
        build_url(&self.base_url, segments)
    }

    /// Structured request path. Injects the API key, classifies the status
    /// code and returns the successful response handle. 429 and transport
    /// failures consume the retry budget; 401, 404 and any other non-200
    /// status fail immediately.
    pub(crate) fn request(
        &self,
        method: Method,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<Response> {
        self.with_retries(|| {
            debug!(%method, url, "sending API request");

            let mut request = self.http.request(method.clone(), url).query(params);
            if let Some(api_key) = &self.api_key {
                request = request.query(&[("apikey", api_key.as_str())]);
            }

            let response = match request.send() {
                Ok(response) => response,
                Err(e) => {
                    return Ok(Attempt::Retry(Error::unhandled(
                        format!("request failed: {e}"),
                        None,
                    )))
                }
            };

            match response.status().as_u16() {
                200 => Ok(Attempt::Done(response)),
                429 => Ok(Attempt::Retry(Error::RateLimit)),
                401 => Err(Error::InvalidApiKey),
                404 => Err(Error::unhandled(format!("404 Not Found for URL: {url}"), 404)),
                status => Err(Error::unhandled(
                    format!("unexpected status code {status} for URL: {url}"),
                    status,
                )),
            }
        })
    }

    /// `GET` through the structured path and parse the body as JSON.
    pub(crate) fn get_json(&self, url: &str, params: &[(&str, String)]) -> Result<JsonValue> {
        let response = self.request(Method::GET, url, params)?;
        let status = response.status().as_u16();

        response
            .json()
            .map_err(|e| Error::unhandled(format!("JSON decode error: {e}"), status))
    }

    /// Typed endpoint helper: fetch JSON, then deserialize the body into
    /// `T`. A body that doesn't match the expected shape maps to the
    /// catch-all failure with the status attached.
    pub(crate) fn get<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<T> {
        let body = self.get_json(url, params)?;
        serde_json::from_value(body)
            .map_err(|e| Error::unhandled(format!("unexpected response shape: {e}"), 200))
    }

    /// Streaming request path, used for binary asset downloads. No API key
    /// is injected: asset URLs are unauthenticated. Only 429 consumes the
    /// retry budget; any other non-200 status fails immediately.
    pub(crate) fn raw_get(&self, url: &str) -> Result<Response> {
        self.with_retries(|| {
            debug!(url, "sending raw request");

            let response = match self.http.get(url).send() {
                Ok(response) => response,
                Err(e) => {
                    return Ok(Attempt::Retry(Error::unhandled(
                        format!("request failed: {e}"),
                        None,
                    )))
                }
            };

            match response.status().as_u16() {
                200 => Ok(Attempt::Done(response)),
                429 => Ok(Attempt::Retry(Error::RateLimit)),
                status => Err(Error::unhandled(
                    format!("unexpected status code {status} for URL: {url}"),
                    status,
                )),
            }
        })
    }

    /// Drives the attempt closure through the retry budget. The delay is
    /// slept only between attempts, never after the last one.
    fn with_retries<T, F>(&self, mut attempt: F) -> Result<T>
    where
        F: FnMut() -> Result<Attempt<T>>,
    {
        let attempts = self.retry.attempts();
        let delay = self.retry.delay();

        for n in 0..attempts {
            match attempt()? {
                Attempt::Done(value) => return Ok(value),
                Attempt::Retry(err) if n + 1 == attempts => return Err(err),
                Attempt::Retry(err) => {
                    warn!(
                        attempt = n + 1,
                        attempts,
                        error = %err,
                        "attempt failed, retrying in {:?}",
                        delay
                    );
                    thread::sleep(delay);
                }
            }
        }

        Err(Error::unhandled("request failed after all retry attempts", None))
    }
}

/// Joins path segments onto a base URL. Strips trailing slashes from the
/// base; segments are not percent-encoded, callers pass already-safe
/// identifiers.
pub(crate) fn build_url(base: &str, segments: &[&str]) -> String {
    let mut url = base.trim_end_matches('/').to_owned();
    for segment in segments {
        url.push('/');
        url.push_str(segment);
    }
    url
}
