//! Domain service for the password-reset verification code lifecycle.
//!
//! A code is a short-lived numeric credential proving email ownership:
//! issued on request, emailed to the user, and consumed exactly once by a
//! successful password change.

use thiserror::Error;

/// Codes expire this long after issuance.
pub const CODE_TTL_MINUTES: i64 = 10;

#[derive(Debug, Error)]
pub enum PasswordResetError {
    #[error("User not found")]
    NotFound,

    #[error("Invalid credentials")]
    CredentialInvalid,

    #[error("Verification code expired")]
    ExpiredCode,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for PasswordResetError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for PasswordResetError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

#[async_trait::async_trait]
pub trait PasswordResetService: Send + Sync {
    /// Issues a fresh 6-digit code for the account behind `email`, stores
    /// it with a [`CODE_TTL_MINUTES`] expiry, and emails it to the user.
    /// The code is never returned to the caller.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordResetError::NotFound`] if no such account exists.
    async fn request_reset(&self, email: &str) -> Result<(), PasswordResetError>;

    /// Verifies `code` against the stored one and, if it matches and has
    /// not expired, replaces the password and clears the code atomically.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordResetError::CredentialInvalid`] on an unknown
    /// email or a code mismatch (including a code already consumed by a
    /// concurrent request), and [`PasswordResetError::ExpiredCode`] when
    /// the validity window has passed.
    async fn change_password(
        &self,
        email: &str,
        code: &str,
        new_password: &str,
    ) -> Result<(), PasswordResetError>;
}
