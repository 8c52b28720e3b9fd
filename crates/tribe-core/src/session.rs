//! Session operations: the places where tokens get minted.

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use thiserror::Error;
use tribe_storage::{CreatePrincipalParams, Principal, Role, StoreError};

use crate::auth::token::TokenError;
use crate::TribeCore;

/// Outcome of a successful login or registration. The transport layer puts
/// the token into the `token` cookie (or hands it to an API client).
#[derive(Debug, Clone)]
pub struct Session {
    pub principal: Principal,
    pub token: String,
}

/// Parameters for registering a new principal.
#[derive(Clone)]
pub struct RegisterParams {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Error)]
pub enum SessionError {
    /// Covers both unknown email and wrong password; the caller cannot tell
    /// which.
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("email address already in use")]
    EmailTaken,

    #[error("password hashing failed: {0}")]
    Hash(String),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("store failure: {0}")]
    Store(StoreError),
}

impl SessionError {
    pub fn status_code(&self) -> u16 {
        match self {
            SessionError::InvalidCredentials => 401,
            SessionError::EmailTaken => 400,
            SessionError::Hash(_) | SessionError::Token(_) | SessionError::Store(_) => 500,
        }
    }
}

impl TribeCore {
    /// Create a principal and mint its first token.
    ///
    /// New principals get the default role; promotion to admin is a store
    /// administration concern.
    pub async fn register(&self, params: RegisterParams) -> Result<Session, SessionError> {
        let email = params.email.to_lowercase();
        let secret_hash = hash_password(&params.password)?;

        let principal = match self
            .store
            .create_principal(&CreatePrincipalParams {
                email,
                name: params.name,
                secret_hash,
                role: Role::default(),
            })
            .await
        {
            Ok(principal) => principal,
            Err(StoreError::AlreadyExists) => return Err(SessionError::EmailTaken),
            Err(error) => return Err(SessionError::Store(error)),
        };

        let token = self.codec.issue(&principal.id)?;
        tracing::info!(principal_id = %principal.id, "principal registered");

        Ok(Session { principal, token })
    }

    /// Verify credentials and mint a token.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, SessionError> {
        let email = email.to_lowercase();

        let credentials = match self.store.get_credentials_by_email(&email).await {
            Ok(credentials) => credentials,
            Err(StoreError::NotFound) => return Err(SessionError::InvalidCredentials),
            Err(error) => return Err(SessionError::Store(error)),
        };

        if !verify_password(&credentials.secret_hash, password) {
            return Err(SessionError::InvalidCredentials);
        }

        // Advisory stamp; a failure here must not block the login.
        if let Err(error) = self.store.touch_last_login(&credentials.id).await {
            tracing::warn!(principal_id = %credentials.id, %error, "failed to stamp last login");
        }

        let principal = match self.store.get_principal(&credentials.id).await {
            Ok(principal) => principal,
            Err(StoreError::NotFound) => return Err(SessionError::InvalidCredentials),
            Err(error) => return Err(SessionError::Store(error)),
        };

        let token = self.codec.issue(&principal.id)?;
        tracing::info!(principal_id = %principal.id, "login succeeded");

        Ok(Session { principal, token })
    }

    /// Logout holds no server-side state: the transport clears the `token`
    /// cookie and the issued token stays valid until its natural expiry.
    pub fn logout(&self) {}
}

fn hash_password(password: &str) -> Result<String, SessionError> {
    let mut salt_bytes = [0u8; 16];
    getrandom::getrandom(&mut salt_bytes).map_err(|e| SessionError::Hash(e.to_string()))?;
    let salt =
        SaltString::encode_b64(&salt_bytes).map_err(|e| SessionError::Hash(e.to_string()))?;

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| SessionError::Hash(e.to_string()))
}

fn verify_password(phc: &str, password: &str) -> bool {
    match PasswordHash::new(phc) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_roundtrip() {
        let phc = hash_password("hunter2-but-longer").unwrap();
        assert!(phc.starts_with("$argon2"));
        assert!(verify_password(&phc, "hunter2-but-longer"));
        assert!(!verify_password(&phc, "wrong"));
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash_password("same-password").unwrap();
        let b = hash_password("same-password").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn garbage_phc_never_verifies() {
        assert!(!verify_password("not-a-phc-string", "anything"));
        assert!(!verify_password("", "anything"));
    }

    #[test]
    fn session_error_status_codes() {
        assert_eq!(SessionError::InvalidCredentials.status_code(), 401);
        assert_eq!(SessionError::EmailTaken.status_code(), 400);
        assert_eq!(
            SessionError::Store(StoreError::Backend("down".to_string())).status_code(),
            500
        );
    }
}
