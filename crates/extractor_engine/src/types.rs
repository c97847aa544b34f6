use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::sync::Arc;

use serde::Deserialize;

/// Label → payload mapping produced by `store` actions.
pub type ResultMap = HashMap<String, Vec<u8>>;

/// One step of an extraction chain as it appears in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ActionDescriptor {
    #[serde(rename = "action")]
    pub verb: String,
    #[serde(default)]
    pub param: String,
}

impl ActionDescriptor {
    pub fn new(verb: impl Into<String>, param: impl Into<String>) -> Self {
        Self {
            verb: verb.into(),
            param: param.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutput {
    pub bytes: Vec<u8>,
    pub metadata: FetchMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchMetadata {
    pub original_url: String,
    pub final_url: String,
    pub redirect_count: usize,
    pub content_type: Option<String>,
    pub byte_len: u64,
}

/// Underlying transport error, shared so [`FetchError`] stays `Clone`.
pub type FetchCause = Arc<dyn Error + Send + Sync + 'static>;

#[derive(Debug, Clone, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
    #[source]
    pub cause: Option<FetchCause>,
}

impl FetchError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            cause: None,
        }
    }

    /// Wraps `cause`, keeping it reachable through [`Error::source`].
    pub fn caused_by(kind: FailureKind, cause: impl Error + Send + Sync + 'static) -> Self {
        Self {
            kind,
            message: cause.to_string(),
            cause: Some(Arc::new(cause)),
        }
    }
}

// Causes are compared by what they report, not by identity.
impl PartialEq for FetchError {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.message == other.message
    }
}

impl Eq for FetchError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    RedirectLimitExceeded,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

/// Why compilation or a run ended abnormally.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    #[error("unknown action `{0}`")]
    UnknownAction(String),
    #[error("invalid pattern `{pattern}`: {message}")]
    Pattern { pattern: String, message: String },
    #[error("http error: {0}")]
    Http(#[from] FetchError),
    #[error("iteration limit of {limit} exceeded")]
    IterationLimitExceeded { limit: u64 },
    #[error("depth limit of {limit} exceeded")]
    DepthLimitExceeded { limit: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("action verb must not be empty")]
    EmptyVerb,
}

/// Everything a single run produced.
///
/// `results` holds whatever was stored before the run ended, even when
/// `outcome` is an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub results: ResultMap,
    pub last_url: Option<String>,
    pub outcome: Result<(), ExtractError>,
}

impl Extraction {
    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }

    /// Result value as text, lossily decoded.
    pub fn text(&self, label: &str) -> Option<String> {
        self.results
            .get(label)
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }
}
