//! The access guard: extraction → verification → resolution → attachment,
//! plus the secondary role check.

use std::sync::Arc;
use thiserror::Error;
use tribe_storage::{Principal, PrincipalId, Role, Store, StoreError};

use super::extract::{extract_token, RequestLike};
use super::token::TokenCodec;

/// Why a request failed to authenticate.
///
/// The first three variants are authentication failures (401-class) and
/// terminate the request; `Store` is a server fault (500-class). None of
/// them is ever retried.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No credential in cookie or header.
    #[error("no token")]
    NoToken,
    /// Signature, format, or expiry failure.
    #[error("invalid or expired token")]
    InvalidToken,
    /// Token was valid but the subject no longer exists.
    #[error("principal no longer exists")]
    PrincipalMissing,
    /// Unexpected failure while resolving the principal.
    #[error("store failure: {0}")]
    Store(StoreError),
}

impl AuthError {
    pub fn status_code(&self) -> u16 {
        match self {
            AuthError::NoToken | AuthError::InvalidToken | AuthError::PrincipalMissing => 401,
            AuthError::Store(_) => 500,
        }
    }

    /// User-visible message. `InvalidToken` and `PrincipalMissing` share one
    /// message so a caller cannot probe whether an id used to exist; store
    /// detail stays in server logs.
    pub fn client_message(&self) -> &'static str {
        match self {
            AuthError::NoToken => "Unauthorized: You must be logged in to access this route",
            AuthError::InvalidToken | AuthError::PrincipalMissing => "Invalid or expired token",
            AuthError::Store(_) => "Internal server error",
        }
    }
}

/// Why the role check refused an authenticated request.
#[derive(Debug, Error)]
pub enum RoleError {
    /// No principal attached to the request context. Fails closed as an
    /// authentication problem, not a permission one.
    #[error("no authenticated principal")]
    NoPrincipal,
    /// Authenticated but insufficient privilege.
    #[error("insufficient role")]
    RoleMismatch,
}

impl RoleError {
    pub fn status_code(&self) -> u16 {
        match self {
            RoleError::NoPrincipal => 401,
            RoleError::RoleMismatch => 403,
        }
    }

    pub fn client_message(&self) -> &'static str {
        match self {
            RoleError::NoPrincipal => "Unauthorized: No user context found",
            RoleError::RoleMismatch => "Forbidden: Admins only",
        }
    }
}

/// Authenticates requests and enforces role policy for route handlers.
pub struct AccessGuard {
    codec: TokenCodec,
    store: Arc<dyn Store>,
}

impl AccessGuard {
    pub fn new(codec: TokenCodec, store: Arc<dyn Store>) -> Self {
        Self { codec, store }
    }

    /// Run the full gate: locate a token, verify it, resolve the principal.
    ///
    /// On success the returned [`Principal`] is attached to the request
    /// context by the caller; it structurally cannot carry the secret hash.
    pub async fn require_authenticated<R>(&self, request: &R) -> Result<Principal, AuthError>
    where
        R: RequestLike + ?Sized,
    {
        let token = extract_token(request).ok_or(AuthError::NoToken)?;

        let claims = self
            .codec
            .verify(&token)
            .map_err(|_| AuthError::InvalidToken)?;

        let principal_id = PrincipalId(claims.sub);
        match self.store.get_principal(&principal_id).await {
            Ok(principal) => Ok(principal),
            Err(StoreError::NotFound) => Err(AuthError::PrincipalMissing),
            Err(error) => {
                tracing::error!(%principal_id, %error, "principal lookup failed");
                Err(AuthError::Store(error))
            }
        }
    }

    /// Secondary check for routes that declare a required role.
    ///
    /// Expects the principal attached by [`Self::require_authenticated`] on
    /// the same request; a missing context means the gate never ran and is
    /// rejected as unauthenticated, never silently allowed.
    pub fn require_role(principal: Option<&Principal>, required: Role) -> Result<(), RoleError> {
        let principal = principal.ok_or(RoleError::NoPrincipal)?;
        if principal.role.includes(&required) {
            Ok(())
        } else {
            Err(RoleError::RoleMismatch)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::extract::{RequestParts, TOKEN_COOKIE};
    use chrono::Utc;
    use tribe_storage::CreatePrincipalParams;
    use tribe_store_memory::MemoryStore;

    const SECRET: &str = "guard-test-secret-that-is-32-chars-long!";

    async fn guard_with_principal(role: Role) -> (AccessGuard, Principal, String) {
        let store = Arc::new(MemoryStore::new());
        let principal = store
            .create_principal(&CreatePrincipalParams {
                email: "jane@example.com".to_string(),
                name: "Jane".to_string(),
                secret_hash: "$argon2id$v=19$x".to_string(),
                role,
            })
            .await
            .unwrap();

        let codec = TokenCodec::new(SECRET);
        let token = codec.issue(&principal.id).unwrap();
        (AccessGuard::new(codec, store), principal, token)
    }

    #[tokio::test]
    async fn valid_cookie_token_attaches_principal() {
        let (guard, principal, token) = guard_with_principal(Role::MemberOperator).await;
        let request = RequestParts::new().with_cookie(TOKEN_COOKIE, token);

        let attached = guard.require_authenticated(&request).await.unwrap();
        assert_eq!(attached.id, principal.id);
        assert_eq!(attached.email, "jane@example.com");
    }

    #[tokio::test]
    async fn valid_header_token_attaches_principal() {
        let (guard, principal, token) = guard_with_principal(Role::MemberOperator).await;
        let request =
            RequestParts::new().with_header("Authorization", format!("Bearer {token}"));

        let attached = guard.require_authenticated(&request).await.unwrap();
        assert_eq!(attached.id, principal.id);
    }

    #[tokio::test]
    async fn cookie_takes_precedence_over_header() {
        let (guard, principal, token) = guard_with_principal(Role::MemberOperator).await;
        // Garbage in the header must not matter when the cookie is good.
        let request = RequestParts::new()
            .with_cookie(TOKEN_COOKIE, token)
            .with_header("Authorization", "Bearer garbage");

        let attached = guard.require_authenticated(&request).await.unwrap();
        assert_eq!(attached.id, principal.id);
    }

    #[tokio::test]
    async fn missing_token_is_terminal() {
        let (guard, _, _) = guard_with_principal(Role::MemberOperator).await;
        let result = guard.require_authenticated(&RequestParts::new()).await;
        assert!(matches!(result, Err(AuthError::NoToken)));
    }

    #[tokio::test]
    async fn garbage_token_is_invalid() {
        let (guard, _, _) = guard_with_principal(Role::MemberOperator).await;
        let request = RequestParts::new().with_cookie(TOKEN_COOKIE, "garbage");
        let result = guard.require_authenticated(&request).await;
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn valid_token_for_missing_principal_fails() {
        let store = Arc::new(MemoryStore::new());
        let codec = TokenCodec::new(SECRET);
        let token = codec.issue(&PrincipalId("ghost".to_string())).unwrap();
        let guard = AccessGuard::new(codec, store);

        let request = RequestParts::new().with_cookie(TOKEN_COOKIE, token);
        let result = guard.require_authenticated(&request).await;
        assert!(matches!(result, Err(AuthError::PrincipalMissing)));
    }

    #[tokio::test]
    async fn attached_principal_has_no_secret_material() {
        let (guard, _, token) = guard_with_principal(Role::MemberOperator).await;
        let request = RequestParts::new().with_cookie(TOKEN_COOKIE, token);

        let attached = guard.require_authenticated(&request).await.unwrap();
        let debug = format!("{:?}", attached);
        assert!(!debug.contains("argon2id"));
    }

    #[test]
    fn role_check_fails_closed_without_context() {
        let result = AccessGuard::require_role(None, Role::Admin);
        assert!(matches!(result, Err(RoleError::NoPrincipal)));
    }

    #[tokio::test]
    async fn admin_passes_role_check() {
        let (_, principal, _) = guard_with_principal(Role::Admin).await;
        AccessGuard::require_role(Some(&principal), Role::Admin).unwrap();
    }

    #[tokio::test]
    async fn member_operator_fails_admin_check() {
        let (_, principal, _) = guard_with_principal(Role::MemberOperator).await;
        let result = AccessGuard::require_role(Some(&principal), Role::Admin);
        assert!(matches!(result, Err(RoleError::RoleMismatch)));
    }

    #[tokio::test]
    async fn admin_satisfies_lower_role() {
        let (_, principal, _) = guard_with_principal(Role::Admin).await;
        AccessGuard::require_role(Some(&principal), Role::MemberOperator).unwrap();
    }

    #[test]
    fn status_codes_and_messages() {
        assert_eq!(AuthError::NoToken.status_code(), 401);
        assert_eq!(AuthError::InvalidToken.status_code(), 401);
        assert_eq!(AuthError::PrincipalMissing.status_code(), 401);
        assert_eq!(
            AuthError::Store(StoreError::Backend("down".to_string())).status_code(),
            500
        );

        // A caller must not learn whether the id used to exist.
        assert_eq!(
            AuthError::InvalidToken.client_message(),
            AuthError::PrincipalMissing.client_message()
        );

        assert_eq!(RoleError::NoPrincipal.status_code(), 401);
        assert_eq!(RoleError::RoleMismatch.status_code(), 403);
        assert_ne!(
            RoleError::RoleMismatch.client_message(),
            AuthError::NoToken.client_message()
        );
    }

    #[tokio::test]
    async fn expired_token_rejected_at_the_gate() {
        let (guard, principal, _) = guard_with_principal(Role::MemberOperator).await;

        let now = Utc::now().timestamp() as u64;
        let claims = crate::auth::token::Claims {
            sub: principal.id.0.clone(),
            purpose: crate::auth::token::AUTH_PURPOSE.to_string(),
            iat: now - 10_000,
            exp: now - 7200,
        };
        let stale = jsonwebtoken::encode(
            &jsonwebtoken::Header::default(),
            &claims,
            &jsonwebtoken::EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        let request = RequestParts::new().with_cookie(TOKEN_COOKIE, stale);
        let result = guard.require_authenticated(&request).await;
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }
}
