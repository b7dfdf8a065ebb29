//! JWT issuance and validation for the admin API.

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: String,
    pub username: String,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}

#[derive(Clone)]
pub struct JwtManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_secs: i64,
}

impl JwtManager {
    #[must_use]
    pub fn new(secret: &[u8], ttl_minutes: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            ttl_secs: ttl_minutes * 60,
        }
    }

    /// Issues a token for the given user; returns the token and its
    /// lifetime in seconds.
    pub fn issue(
        &self,
        user_id: i32,
        username: &str,
        role: &str,
    ) -> Result<(String, i64), jsonwebtoken::errors::Error> {
        let now = chrono::Utc::now().timestamp();

        let claims = Claims {
            sub: user_id.to_string(),
            username: username.to_string(),
            role: role.to_string(),
            iat: now,
            exp: now + self.ttl_secs,
        };

        let token = jsonwebtoken::encode(&Header::default(), &claims, &self.encoding_key)?;
        Ok((token, self.ttl_secs))
    }

    /// Validates a token (signature and expiry) and returns its claims.
    pub fn validate(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let data =
            jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &Validation::default())?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issue_and_validate_round_trip() {
        let manager = JwtManager::new(b"test-secret-at-least-16", 60);

        let (token, ttl) = manager.issue(7, "admin", "admin").unwrap();
        assert_eq!(ttl, 3600);

        let claims = manager.validate(&token).unwrap();
        assert_eq!(claims.sub, "7");
        assert_eq!(claims.username, "admin");
        assert!(claims.is_admin());
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let issuer = JwtManager::new(b"secret-one-aaaaaaaa", 60);
        let verifier = JwtManager::new(b"secret-two-bbbbbbbb", 60);

        let (token, _) = issuer.issue(1, "admin", "admin").unwrap();
        assert!(verifier.validate(&token).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let manager = JwtManager::new(b"test-secret-at-least-16", -5);

        let (token, _) = manager.issue(1, "admin", "admin").unwrap();
        assert!(manager.validate(&token).is_err());
    }
}
