use thiserror::Error;

/// Everything that can go wrong between a user action and the backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (network, CORS, timeout).
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx HTTP status.
    #[error("server responded with HTTP {status}")]
    Http { status: u16 },

    /// The body was not valid JSON for the expected shape.
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The envelope had no `status` field.
    #[error("malformed response: missing status")]
    MissingStatus,

    /// The envelope's `status` was neither `success` nor `fail`.
    #[error("malformed response: unknown status {0:?}")]
    UnknownStatus(String),

    /// A successful envelope without the `data` the caller needs.
    #[error("malformed response: missing data")]
    MissingData,

    /// A form was rejected before it was sent.
    #[error(transparent)]
    Invalid(#[from] crate::request::FormError),

    /// `status: "fail"`, with the server's message.
    #[error("{message}")]
    Failed { message: String },
}

impl ApiError {
    /// Application-level failure reported by the backend, as opposed to a
    /// transport or parsing problem.
    pub fn is_rejection(&self) -> bool {
        matches!(self, ApiError::Failed { .. })
    }
}
