use thiserror::Error;

/// Errors raised by a chain data provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The endpoint is unreachable, timed out, answered with an RPC error,
    /// or did not resolve a block for the requested reference.
    #[error("provider unavailable: {reason}")]
    Unavailable { reason: String },

    /// The provider answered, but a header field is absent or malformed.
    #[error("malformed header: {reason}")]
    MalformedHeader { reason: String },
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        Self::Unavailable {
            reason: err.to_string(),
        }
    }
}

/// A block reference that is neither a non-negative integer nor a
/// recognized symbolic tag.
#[derive(Debug, Error)]
#[error("invalid block reference `{0}`: expected a block number or one of latest|finalized|safe|pending")]
pub struct InvalidReference(pub String);
