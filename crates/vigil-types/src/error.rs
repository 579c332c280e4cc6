//! Error types shared across all Vigil crates.

/// Errors that can occur across the Vigil runtime.
///
/// Each variant corresponds to a different subsystem: identity provider,
/// profile store, alert store, audit store, or configuration.
#[derive(Debug, thiserror::Error)]
pub enum VigilError {
    #[error("identity provider error: {0}")]
    Identity(String),

    #[error("profile store error: {0}")]
    Profile(String),

    #[error("alert store error: {0}")]
    Store(String),

    #[error("audit store error: {0}")]
    Audit(String),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Identity errors from a sign-in attempt, reduced to a fixed taxonomy.
///
/// Raw provider error codes are mapped into these variants at the provider
/// seam and never leak past it; [`SignInError::user_message`] is the only
/// text the UI layer shows.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignInError {
    #[error("invalid credential")]
    InvalidCredential,

    #[error("account disabled")]
    AccountDisabled,

    #[error("rate limited")]
    RateLimited,

    #[error("network failure during sign-in")]
    Network,

    /// Any other provider-reported failure. The code is kept for the
    /// diagnostic log only, never shown to the user.
    #[error("provider error: {0}")]
    Provider(String),
}

impl SignInError {
    /// The fixed user-facing message for this error.
    pub fn user_message(&self) -> &'static str {
        match self {
            SignInError::InvalidCredential => "Incorrect email or password.",
            SignInError::AccountDisabled => "This account has been disabled.",
            SignInError::RateLimited => "Too many attempts. Please try again later.",
            SignInError::Network => "Could not reach the sign-in service. Check your connection.",
            SignInError::Provider(_) => "Sign-in failed. Please try again.",
        }
    }
}
