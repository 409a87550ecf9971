use anyhow::{bail, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Longest accepted token lifetime: one year
pub const MAX_EXPIRE_MINUTES: i64 = 525_600;

/// JWT Claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (username)
    pub exp: i64,    // Expiration time (as UTC timestamp)
    pub iat: i64,    // Issued at (as UTC timestamp)
    pub jti: String, // Unique identifier for this token
}

/// Issues and validates access tokens signed with the shared secret
#[derive(Clone)]
pub struct JwtManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    lifetime: Duration,
}

impl std::fmt::Debug for JwtManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtManager")
            .field("algorithm", &self.algorithm)
            .field("lifetime", &self.lifetime)
            .finish_non_exhaustive()
    }
}

impl JwtManager {
    /// Fails when `expire_minutes` is outside `1..=MAX_EXPIRE_MINUTES`
    pub fn new(secret: &[u8], algorithm: Algorithm, expire_minutes: i64) -> Result<Self> {
        if !(1..=MAX_EXPIRE_MINUTES).contains(&expire_minutes) {
            bail!("token lifetime must be between 1 and {MAX_EXPIRE_MINUTES} minutes, got {expire_minutes}");
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm,
            lifetime: Duration::minutes(expire_minutes),
        })
    }

    /// Generate an access token whose subject is the username
    pub fn generate_access_token(&self, username: &str) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let expiration = now + self.lifetime;

        let claims = Claims {
            sub: username.to_string(),
            exp: expiration.timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        self.encode_token(&claims)
    }

    /// Decode a token, checking signature, algorithm and expiration
    pub fn validate_token(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)?;
        Ok(token_data.claims)
    }

    /// Token lifetime in seconds, as reported to clients
    pub fn expires_in_seconds(&self) -> i64 {
        self.lifetime.num_seconds()
    }

    pub(crate) fn encode_token(&self, claims: &Claims) -> Result<String, jsonwebtoken::errors::Error> {
        encode(&Header::new(self.algorithm), claims, &self.encoding_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_manager() -> JwtManager {
        JwtManager::new(b"test_secret_key_12345", Algorithm::HS256, 30).unwrap()
    }

    #[test]
    fn test_generate_and_validate_access_token() {
        let manager = create_test_manager();

        let token = manager.generate_access_token("maria").unwrap();
        let claims = manager.validate_token(&token).unwrap();

        assert_eq!(claims.sub, "maria");
        assert_eq!(claims.exp - claims.iat, 30 * 60);
        assert!(Uuid::parse_str(&claims.jti).is_ok());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let manager = create_test_manager();
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: "maria".to_string(),
            exp: now - 10,
            iat: now - 100,
            jti: Uuid::new_v4().to_string(),
        };

        let token = manager.encode_token(&claims).unwrap();
        assert!(manager.validate_token(&token).is_err());
    }

    #[test]
    fn test_invalid_token() {
        let manager = create_test_manager();
        assert!(manager.validate_token("invalid.jwt.token").is_err());
    }

    #[test]
    fn test_different_secrets_are_not_interchangeable() {
        let manager1 = JwtManager::new(b"secret1", Algorithm::HS256, 30).unwrap();
        let manager2 = JwtManager::new(b"secret2", Algorithm::HS256, 30).unwrap();

        let token = manager1.generate_access_token("joao").unwrap();
        assert!(manager2.validate_token(&token).is_err());
    }

    #[test]
    fn test_algorithm_mismatch_is_rejected() {
        let hs512 = JwtManager::new(b"shared", Algorithm::HS512, 30).unwrap();
        let hs256 = JwtManager::new(b"shared", Algorithm::HS256, 30).unwrap();

        let token = hs512.generate_access_token("joao").unwrap();
        assert!(hs256.validate_token(&token).is_err());
        assert!(hs512.validate_token(&token).is_ok());
    }

    #[test]
    fn test_lifetime_is_bounded() {
        assert!(JwtManager::new(b"k", Algorithm::HS256, 0).is_err());
        assert!(JwtManager::new(b"k", Algorithm::HS256, MAX_EXPIRE_MINUTES + 1).is_err());
        assert!(JwtManager::new(b"k", Algorithm::HS256, 200_000_000_000_000).is_err());

        let longest = JwtManager::new(b"k", Algorithm::HS256, MAX_EXPIRE_MINUTES).unwrap();
        assert_eq!(longest.expires_in_seconds(), MAX_EXPIRE_MINUTES * 60);

        let token = longest.generate_access_token("maria").unwrap();
        let claims = longest.validate_token(&token).unwrap();
        assert_eq!(claims.exp - claims.iat, MAX_EXPIRE_MINUTES * 60);
    }
}
