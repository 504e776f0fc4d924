use thiserror::Error;

/// Failure of one AI inference attempt.
///
/// Every variant is recovered by the engine (downgraded to the deterministic
/// fallback); none of them escapes `run_inference`.
#[derive(Debug, Error)]
pub enum InferenceError {
    /// Backend misconfiguration (e.g. missing credential at client build).
    #[error("invalid backend configuration: {0}")]
    InvalidConfig(String),

    /// Transport-level failure: connect/timeout/malformed response body.
    #[error("backend transport failed: {0}")]
    Transport(String),

    /// Backend answered with a non-success status.
    #[error("backend returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// Response text did not contain a parseable JSON array.
    #[error("could not extract scenarios from response: {0}")]
    Extraction(String),
}
