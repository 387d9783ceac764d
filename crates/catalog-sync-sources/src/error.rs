use reqwest::StatusCode;
use thiserror::Error;

/// What can go wrong talking to a catalog. Adapters never retry; the
/// aggregation layer decides whether a failed source degrades to an empty
/// contribution or surfaces to the user.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("network failure: {0}")]
    Network(#[source] reqwest::Error),

    #[error("catalog returned {0}")]
    BadStatus(StatusCode),

    #[error("malformed payload: {0}")]
    Parse(String),
}
