use thiserror::Error;

// * Unified Error type for the Network Layer.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Soft ban detected: {0}")]
    SoftBan(String),

    #[error("HTTP {0} Forbidden/Blocked")]
    HardBan(u16),

    #[error("Empty response body (< {0} bytes)")]
    EmptyResponse(usize),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

// * Coarse classification the failover controller keys on. Every failure is
// * either a timeout or some other transport-level problem; both advance the
// * chain to the next URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Transport,
    Timeout,
}

impl FetchError {
    pub fn kind(&self) -> FailureKind {
        match self {
            FetchError::Http(e) if e.is_timeout() => FailureKind::Timeout,
            _ => FailureKind::Transport,
        }
    }
}
