//! Rate-limited, retrying page fetches over one persistent blocking client.
//!
//! The client is constructed once per batch run and passed by reference;
//! there is deliberately no shared global session. A polite delay runs
//! exactly once per `fetch` call on every path (success, rate-limited skip,
//! hard failure) so retries and errors never burst the remote host.

use std::thread;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use log::{debug, warn};
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT_LANGUAGE, CONNECTION, HeaderMap, HeaderValue, REFERER, USER_AGENT};

use crate::document::Document;

const REQUEST_TIMEOUT_SECS: u64 = 10;
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/115.0.0.0 Safari/537.36";

pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Transport seam: the retry/backoff/delay logic is testable without a
/// network by injecting a fake implementation.
pub trait Transport {
    fn get(&self, url: &str) -> Result<HttpResponse>;
}

pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(referer: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
        headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
        headers.insert(
            REFERER,
            HeaderValue::from_str(referer).context("invalid referer header")?,
        );

        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .default_headers(headers)
            .build()
            .context("failed to build http client")?;
        Ok(ReqwestTransport { client })
    }
}

impl Transport for ReqwestTransport {
    fn get(&self, url: &str) -> Result<HttpResponse> {
        let resp = self
            .client
            .get(url)
            .send()
            .with_context(|| format!("request failed for {url}"))?;
        let status = resp.status().as_u16();
        let body = resp
            .text()
            .with_context(|| format!("failed reading body for {url}"))?;
        Ok(HttpResponse { status, body })
    }
}

/// Explicit retry policy: attempts, backoff schedule and the transient
/// status allow-list, independent of any HTTP library configuration.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff_base: Duration,
    pub backoff_cap: Duration,
    pub retryable: &'static [u16],
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            max_attempts: 3,
            backoff_base: Duration::from_secs(1),
            backoff_cap: Duration::from_secs(8),
            retryable: &[429, 500, 502, 503, 504],
        }
    }
}

impl RetryPolicy {
    fn is_retryable(&self, status: u16) -> bool {
        self.retryable.contains(&status)
    }

    /// Capped exponential backoff before retry `attempt` (1-based).
    fn backoff(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.backoff_base
            .saturating_mul(factor)
            .min(self.backoff_cap)
    }
}

pub struct FetchClient<T: Transport = ReqwestTransport> {
    transport: T,
    retry: RetryPolicy,
    request_delay: Duration,
}

impl FetchClient<ReqwestTransport> {
    pub fn new(referer: &str, request_delay: Duration) -> Result<Self> {
        Ok(FetchClient {
            transport: ReqwestTransport::new(referer)?,
            retry: RetryPolicy::default(),
            request_delay,
        })
    }
}

impl<T: Transport> FetchClient<T> {
    pub fn with_transport(transport: T, retry: RetryPolicy, request_delay: Duration) -> Self {
        FetchClient {
            transport,
            retry,
            request_delay,
        }
    }

    /// Fetch and parse one page.
    ///
    /// `Ok(Some(doc))` is a parsed, comment-transparent document.
    /// `Ok(None)` means the host is still rate limiting after retries; the
    /// caller skips this URL and moves on. Any other transport or status
    /// fault is a hard error.
    pub fn fetch(&self, url: &str) -> Result<Option<Document>> {
        let outcome = self.fetch_without_delay(url);
        self.polite_sleep();
        outcome
    }

    fn fetch_without_delay(&self, url: &str) -> Result<Option<Document>> {
        debug!("fetching {url}");
        let mut last_status = 0u16;

        for attempt in 1..=self.retry.max_attempts {
            let resp = self.transport.get(url)?;
            last_status = resp.status;

            if (200..300).contains(&resp.status) {
                return Ok(Some(Document::parse(&resp.body)));
            }
            if !self.retry.is_retryable(resp.status) {
                return Err(anyhow!("http {} for {url}", resp.status));
            }
            if attempt < self.retry.max_attempts {
                let pause = self.retry.backoff(attempt);
                debug!("http {} for {url}, retrying in {:?}", resp.status, pause);
                thread::sleep(pause);
            }
        }

        if last_status == 429 {
            warn!("429 Too Many Requests for {url}, skipping");
            return Ok(None);
        }
        Err(anyhow!("http {last_status} for {url} after retries"))
    }

    fn polite_sleep(&self) {
        if !self.request_delay.is_zero() {
            debug!("{:.1}s sleep", self.request_delay.as_secs_f64());
            thread::sleep(self.request_delay);
        }
    }
}
