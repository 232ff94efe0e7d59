use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::AuthConfig;
use crate::models::Role;

/// Verifies access tokens issued by the platform's auth service.
/// HS256 with a shared secret; this service never issues tokens to users.
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

/// Claims carried by an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    /// Subject (user ID, hex-encoded ObjectId)
    pub sub: String,
    /// Role of the subject
    pub role: Role,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
}

impl JwtService {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        }
    }

    /// Decode and verify a token: signature and expiry. Returns the claims
    /// on success.
    pub fn validate_token(
        &self,
        token: &str,
    ) -> Result<AccessTokenClaims, jsonwebtoken::errors::Error> {
        let validation = Validation::new(Algorithm::HS256);
        let data = decode::<AccessTokenClaims>(token, &self.decoding_key, &validation)?;
        Ok(data.claims)
    }

    /// Sign a token for the given subject. The auth service is the real
    /// issuer; this exists for local tooling and tests.
    pub fn generate_token(
        &self,
        user_id: &str,
        role: Role,
        ttl_minutes: i64,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let claims = AccessTokenClaims {
            sub: user_id.to_string(),
            role,
            exp: (now + Duration::minutes(ttl_minutes)).timestamp(),
            iat: now.timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
    }
}
