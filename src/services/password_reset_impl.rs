//! `SeaORM` implementation of the `PasswordResetService` trait.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use std::sync::Arc;
use tracing::{info, warn};

use crate::db::Store;
use crate::services::mailer::Mailer;
use crate::services::password_reset::{
    CODE_TTL_MINUTES, PasswordResetError, PasswordResetService,
};

pub struct SeaOrmPasswordResetService {
    store: Store,
    mailer: Arc<Mailer>,
}

impl SeaOrmPasswordResetService {
    #[must_use]
    pub const fn new(store: Store, mailer: Arc<Mailer>) -> Self {
        Self { store, mailer }
    }
}

/// Uniform draw over the full 6-digit space.
fn generate_code() -> String {
    rand::rng().random_range(100_000..=999_999).to_string()
}

#[async_trait]
impl PasswordResetService for SeaOrmPasswordResetService {
    async fn request_reset(&self, email: &str) -> Result<(), PasswordResetError> {
        let user = self
            .store
            .get_user_by_email(email)
            .await?
            .ok_or(PasswordResetError::NotFound)?;

        let code = generate_code();
        let expires_at = (Utc::now() + Duration::minutes(CODE_TTL_MINUTES)).to_rfc3339();

        self.store
            .set_reset_code(&user.email, &code, &expires_at)
            .await?;

        // Fire-and-forget: a transport failure must not leak whether or
        // what was stored, and there is no delivery receipt to consume.
        if let Err(e) = self.mailer.send_verification_code(&user.email, &code).await {
            warn!(email = %user.email, error = %e, "Failed to send verification code email");
        } else {
            info!(email = %user.email, "Verification code issued");
        }

        Ok(())
    }

    async fn change_password(
        &self,
        email: &str,
        code: &str,
        new_password: &str,
    ) -> Result<(), PasswordResetError> {
        let user = self
            .store
            .get_user_by_email(email)
            .await?
            .ok_or(PasswordResetError::CredentialInvalid)?;

        if user.password_reset_code.as_deref() != Some(code) {
            return Err(PasswordResetError::CredentialInvalid);
        }

        // Expiry is judged against the server clock now, not at issuance.
        let expires_at = user
            .code_expires_at
            .as_deref()
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
            .ok_or_else(|| {
                PasswordResetError::Internal("Stored code has no valid expiry".to_string())
            })?;
        if Utc::now() > expires_at {
            return Err(PasswordResetError::ExpiredCode);
        }

        // The consuming update re-checks the code in its WHERE clause, so
        // of two concurrent matching requests only one can win.
        let consumed = self
            .store
            .consume_reset_code(&user.email, code, new_password)
            .await?;
        if !consumed {
            return Err(PasswordResetError::CredentialInvalid);
        }

        info!(email = %user.email, "Password changed via verification code");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_codes_are_six_digits() {
        for _ in 0..1000 {
            let code = generate_code();
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
            assert_ne!(code.as_bytes()[0], b'0');
        }
    }
}
