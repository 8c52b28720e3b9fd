//! Bearer token issuing and verification.
//!
//! Tokens are compact signed JWTs (HMAC-SHA256) binding a principal id and a
//! purpose tag, with a fixed seven-day expiry. Only holders of the
//! process-wide secret can mint or accept them; there is no server-side
//! session state and no revocation list.

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tribe_storage::PrincipalId;

/// Purpose tag embedded in authentication tokens. Prevents confusion with
/// tokens minted under the same secret for a different purpose.
pub const AUTH_PURPOSE: &str = "authentication";

/// Token lifetime: seven days.
pub const TOKEN_TTL_SECS: u64 = 7 * 24 * 60 * 60;

/// Payload stored in a bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Principal id.
    pub sub: String,
    /// Purpose tag; see [`AUTH_PURPOSE`].
    pub purpose: String,
    /// Issued at (Unix timestamp)
    pub iat: u64,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
}

#[derive(Debug, Error)]
pub enum TokenError {
    /// Signing failed. Configuration-class: callers must not retry.
    #[error("token signing failed: {0}")]
    Sign(jsonwebtoken::errors::Error),
    /// Bad signature, malformed token, or expired token.
    #[error("invalid or expired token")]
    Invalid,
}

/// Issues and verifies bearer tokens under one process-wide secret.
#[derive(Clone)]
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenCodec {
    /// Secret strength is validated by [`crate::CoreConfig`] before this is
    /// reached.
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Mint an authentication token for a principal.
    pub fn issue(&self, principal_id: &PrincipalId) -> Result<String, TokenError> {
        let now = Utc::now().timestamp() as u64;
        let claims = Claims {
            sub: principal_id.0.clone(),
            purpose: AUTH_PURPOSE.to_string(),
            iat: now,
            exp: now + TOKEN_TTL_SECS,
        };

        encode(&Header::default(), &claims, &self.encoding).map_err(TokenError::Sign)
    }

    /// Verify signature and expiry, returning the decoded claims.
    ///
    /// The purpose tag is returned but not checked here; callers that care
    /// about it (none do today) check the claim themselves. This keeps the
    /// codec reusable for other token purposes.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|_| TokenError::Invalid)
    }
}
