use thiserror::Error;

/// Reasons a live strategy gave up. Every variant means "try the next source";
/// none of them reach the resolver's callers.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("listing service is not configured (SUPABASE_URL / SUPABASE_ANON_KEY)")]
    ConfigMissing,
    #[error("network error: {0}")]
    Network(String),
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },
    #[error("service reported failure: {0}")]
    Api(String),
    #[error("could not decode response: {0}")]
    Decode(String),
    #[error("service returned no usable listings")]
    Empty,
}

impl FetchError {
    /// True when the service could not be reached at all, as opposed to
    /// answering with something unusable.
    pub fn is_offline(&self) -> bool {
        matches!(self, FetchError::Network(_))
    }
}
