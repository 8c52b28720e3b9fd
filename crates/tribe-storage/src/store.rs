//! The Store trait that backends implement.

use crate::types::*;
use crate::StoreError;

/// The storage trait `tribe-core` depends on.
///
/// Object-safe on purpose: the core holds an `Arc<dyn Store>` and never
/// learns which engine is behind it.
#[async_trait::async_trait]
pub trait Store: Send + Sync {
    /// Create a new principal. Fails with [`StoreError::AlreadyExists`] when
    /// the email (case-insensitive) is already registered.
    async fn create_principal(
        &self,
        params: &CreatePrincipalParams,
    ) -> Result<Principal, StoreError>;

    /// Get principal by ID.
    async fn get_principal(&self, principal_id: &PrincipalId) -> Result<Principal, StoreError>;

    /// Get principal by email (case-insensitive).
    async fn get_principal_by_email(&self, email: &str) -> Result<Principal, StoreError>;

    /// Fetch the credential row for login verification.
    ///
    /// This is the only method that exposes the secret hash.
    async fn get_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<PrincipalCredentials, StoreError>;

    /// Stamp the principal's last successful login.
    async fn touch_last_login(&self, principal_id: &PrincipalId) -> Result<(), StoreError>;

    /// List all principals.
    async fn list_principals(&self) -> Result<Vec<Principal>, StoreError>;
}
