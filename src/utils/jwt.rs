use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::error::AppError;

/// Session token claims.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    pub sub: Uuid, // user id
    pub iat: i64,
    pub exp: i64,
}

/// Signs and checks HS256 session tokens.
#[derive(Clone)]
pub struct SessionSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expires_in: Duration,
    configured: bool,
}

impl SessionSigner {
    pub fn new(secret: &str, expires_in_secs: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expires_in: Duration::seconds(expires_in_secs),
            configured: !secret.is_empty(),
        }
    }

    pub fn sign(&self, user_id: Uuid) -> Result<String, AppError> {
        if !self.configured {
            return Err(AppError::Internal("failed to generate authentication token: no signing secret".into()));
        }
        let now = Utc::now();
        let claims = Claims {
            sub: user_id,
            iat: now.timestamp(),
            exp: (now + self.expires_in).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("failed to generate authentication token: {e}")))
    }

    /// Any failure (bad signature, expired, malformed) is `Unauthorized`.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        if !self.configured {
            return Err(AppError::Unauthorized);
        }
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|_| AppError::Unauthorized)
    }
}
