//! Synchronous HTTP GET over a shared async client.
//!
//! Requests are issued with async reqwest and driven to completion with
//! `block_on` on a current-thread tokio runtime, so callers see one blocking
//! call per request. No timeouts are configured beyond reqwest's defaults.

use std::sync::LazyLock;

use serde::de::DeserializeOwned;

/// Error from a single registry request
#[derive(Debug)]
pub enum HttpError {
    /// Server answered with a non-success status
    Status { status: u16, message: String },
    /// Connection, TLS or body-read failure (no status available)
    Transport(String),
    /// Body arrived but is not the expected JSON shape
    Decode(serde_json::Error),
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Status { status, message } => write!(f, "HTTP {status}: {message}"),
            Self::Transport(message) => write!(f, "HTTP error: {message}"),
            Self::Decode(e) => write!(f, "invalid JSON body: {e}"),
        }
    }
}

impl std::error::Error for HttpError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Decode(e) => Some(e),
            _ => None,
        }
    }
}

impl HttpError {
    /// Classify a reqwest error; the URL is stripped so query strings stay out of logs.
    pub fn from_reqwest(e: reqwest::Error) -> Self {
        let e = e.without_url();
        match e.status() {
            Some(status) => Self::Status {
                status: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or("unexpected status")
                    .to_string(),
            },
            None => Self::Transport(e.to_string()),
        }
    }

    /// Rate limiting, server errors and transport failures are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Status { status, .. } => matches!(status, 429 | 500..=599),
            Self::Transport(_) => true,
            Self::Decode(_) => false,
        }
    }
}

static SHARED_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    reqwest::Client::builder()
        .user_agent(concat!("trialgraph/", env!("CARGO_PKG_VERSION")))
        .build()
        .expect("failed to build HTTP client")
});

/// Get shared HTTP client.
pub fn http_client() -> &'static reqwest::Client {
    &SHARED_CLIENT
}

/// Single-threaded runtime that drives every request to completion.
pub static SHARED_RUNTIME: LazyLock<tokio::runtime::Runtime> = LazyLock::new(|| {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("failed to build tokio runtime")
});

/// Blocking GET returning the response body as text.
///
/// Non-success statuses are reported as [`HttpError::Status`].
pub fn get_text(url: &str, query: &[(&str, String)]) -> Result<String, HttpError> {
    SHARED_RUNTIME.block_on(async {
        let response = http_client()
            .get(url)
            .query(query)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(HttpError::from_reqwest)?;
        response.text().await.map_err(HttpError::from_reqwest)
    })
}

/// Blocking GET decoding the body as JSON.
pub fn get_json<T: DeserializeOwned>(url: &str, query: &[(&str, String)]) -> Result<T, HttpError> {
    let body = get_text(url, query)?;
    serde_json::from_str(&body).map_err(HttpError::Decode)
}
