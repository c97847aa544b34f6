use std::io::{self, Read};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex, PoisonError,
};
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;

use crate::{FailureKind, FetchError, FetchMetadata, FetchOutput};

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub redirect_limit: usize,
    pub max_bytes: u64,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            redirect_limit: 5,
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

/// Blocking GET transport used by the `go` action.
pub trait Fetcher: Send + Sync {
    fn fetch(&self, url: &str) -> Result<FetchOutput, FetchError>;
}

/// Fetches over one pooled client, so repeated `go` actions reuse connections.
#[derive(Debug)]
pub struct ReqwestFetcher {
    settings: FetchSettings,
    client: reqwest::blocking::Client,
    redirect_counter: Arc<AtomicUsize>,
    // Held for a whole fetch so `redirect_counter` belongs to one request.
    request_lock: Mutex<()>,
}

impl ReqwestFetcher {
    pub fn new(settings: FetchSettings) -> Result<Self, FetchError> {
        let redirect_counter = Arc::new(AtomicUsize::new(0));
        let client = build_client(&settings, redirect_counter.clone())?;
        Ok(Self {
            settings,
            client,
            redirect_counter,
            request_lock: Mutex::new(()),
        })
    }

    pub fn settings(&self) -> &FetchSettings {
        &self.settings
    }
}

fn build_client(
    settings: &FetchSettings,
    redirect_counter: Arc<AtomicUsize>,
) -> Result<reqwest::blocking::Client, FetchError> {
    let redirect_limit = settings.redirect_limit;
    let policy = reqwest::redirect::Policy::custom(move |attempt| {
        let count = attempt.previous().len();
        redirect_counter.store(count, Ordering::Relaxed);
        if count >= redirect_limit {
            attempt.error("redirect limit exceeded")
        } else {
            attempt.follow()
        }
    });

    reqwest::blocking::Client::builder()
        .connect_timeout(settings.connect_timeout)
        .timeout(settings.request_timeout)
        .redirect(policy)
        .build()
        .map_err(|err| FetchError::caused_by(FailureKind::Network, err))
}

impl Fetcher for ReqwestFetcher {
    fn fetch(&self, url: &str) -> Result<FetchOutput, FetchError> {
        let parsed = reqwest::Url::parse(url)
            .map_err(|err| FetchError::caused_by(FailureKind::InvalidUrl, err))?;

        let _request = self
            .request_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        self.redirect_counter.store(0, Ordering::Relaxed);

        // The response owns the connection; every early return below drops it.
        let response = self.client.get(parsed).send().map_err(map_reqwest_error)?;

        let status = response.status();
        if status.as_u16() >= 400 {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let max_bytes = self.settings.max_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let final_url = response.url().to_string();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        let mut bytes = Vec::new();
        response
            .take(max_bytes.saturating_add(1))
            .read_to_end(&mut bytes)
            .map_err(map_io_error)?;
        if bytes.len() as u64 > max_bytes {
            return Err(FetchError::new(
                FailureKind::TooLarge {
                    max_bytes,
                    actual: None,
                },
                "response too large",
            ));
        }

        let metadata = FetchMetadata {
            original_url: url.to_string(),
            final_url,
            redirect_count: self.redirect_counter.load(Ordering::Relaxed),
            content_type,
            byte_len: bytes.len() as u64,
        };

        Ok(FetchOutput { bytes, metadata })
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::caused_by(FailureKind::Timeout, err);
    }
    if err.is_redirect() {
        return FetchError::caused_by(FailureKind::RedirectLimitExceeded, err);
    }
    FetchError::caused_by(FailureKind::Network, err)
}

fn map_io_error(err: io::Error) -> FetchError {
    if err.kind() == io::ErrorKind::TimedOut {
        return FetchError::caused_by(FailureKind::Timeout, err);
    }
    FetchError::caused_by(FailureKind::Network, err)
}
