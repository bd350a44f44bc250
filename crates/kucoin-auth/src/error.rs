//! Error types for credential handling

/// Errors that can occur while loading or validating credentials
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// A required credential field is missing or empty
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    /// Environment variable not set
    #[error("Environment variable not set: {0}")]
    EnvVarNotSet(String),

    /// Environment name is neither production nor sandbox
    #[error("Invalid environment: {0}")]
    InvalidEnvironment(String),
}

/// Result type for authentication operations
pub type AuthResult<T> = Result<T, AuthError>;
