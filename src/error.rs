//! Error taxonomy for a single generation attempt.
//!
//! None of these errors are fatal to the process: they fail the current
//! attempt and hand control back to the caller, which shows them verbatim.

/// Every way a call to [`crate::generate::NotificationGenerator::generate`] can fail.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    /// No API key was found in any of the recognised environment variables.
    #[error("API key not found. Set the VITE_API_KEY environment variable to your provider API key.")]
    MissingCredential,

    /// The provider call itself failed (network, auth, quota, bad request).
    /// The provider's own message is kept as-is.
    #[error("{0}")]
    ProviderFailure(String),

    /// The provider answered without any text.
    #[error("The model returned an empty response.")]
    EmptyResponse,

    /// The provider answered with text that does not match the output schema.
    #[error("The model returned an invalid response: {0}")]
    InvalidResponse(String),
}

/// Discriminant of [`GenerationError`], handy for matching in callers and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationErrorKind {
    MissingCredential,
    ProviderFailure,
    EmptyResponse,
    InvalidResponse,
}

impl GenerationError {
    pub fn kind(&self) -> GenerationErrorKind {
        match self {
            GenerationError::MissingCredential => GenerationErrorKind::MissingCredential,
            GenerationError::ProviderFailure(_) => GenerationErrorKind::ProviderFailure,
            GenerationError::EmptyResponse => GenerationErrorKind::EmptyResponse,
            GenerationError::InvalidResponse(_) => GenerationErrorKind::InvalidResponse,
        }
    }
}
