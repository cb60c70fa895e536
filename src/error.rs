use thiserror::Error;

/// Errors surfaced by the signing core and the timeline client.
///
/// Everything propagates synchronously to the immediate caller; the
/// crate never retries or falls back on its own.
#[derive(Debug, Error)]
pub enum Error {
    /// Kept for contract completeness; the encoder is total over its
    /// input domain, so this is never produced at runtime.
    #[error("percent-encoding failed: {0}")]
    Encoding(String),

    /// A caller parameter name collided with one already added, or
    /// with a reserved `oauth_` protocol parameter.
    #[error("parameter {0:?} is already present")]
    DuplicateParameter(String),

    /// The HMAC primitive refused its inputs. HMAC-SHA1 accepts keys
    /// of any length, so this is defensive only.
    #[error("signing failed: {0}")]
    Signing(String),

    /// A response body did not match the expected record shape.
    #[error("malformed response: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    /// The HTTP exchange itself failed.
    #[cfg(feature = "reqwest")]
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The remote service answered with a non-success status. The
    /// body is kept verbatim so callers can inspect the rejection.
    #[cfg(feature = "reqwest")]
    #[error("remote rejected request with HTTP {status}: {body}")]
    RemoteRejection { status: u16, body: String },
}
