//! Principal (portal account) types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{PrincipalId, Role};

/// Principal record as seen by everything outside the store.
///
/// Deliberately has no field for the secret hash: lookups cannot leak it
/// because the type cannot carry it. Login goes through
/// [`PrincipalCredentials`] instead.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Principal {
    pub id: PrincipalId,
    /// Stored lowercase; compared case-insensitively.
    pub email: String,
    /// Display name.
    pub name: String,
    pub role: Role,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Secret-bearing credential row, returned only by the login lookup.
#[derive(Clone)]
pub struct PrincipalCredentials {
    pub id: PrincipalId,
    /// PHC-format password hash.
    pub secret_hash: String,
}

impl std::fmt::Debug for PrincipalCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Keep the hash out of logs.
        f.debug_struct("PrincipalCredentials")
            .field("id", &self.id)
            .field("secret_hash", &"<redacted>")
            .finish()
    }
}

/// Parameters for creating a principal
#[derive(Clone, Debug)]
pub struct CreatePrincipalParams {
    pub email: String,
    pub name: String,
    /// PHC-format password hash (the store never sees plaintext).
    pub secret_hash: String,
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_debug_redacts_hash() {
        let creds = PrincipalCredentials {
            id: PrincipalId("p1".to_string()),
            secret_hash: "$argon2id$v=19$secret".to_string(),
        };
        let debug = format!("{:?}", creds);
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("argon2id"));
    }

    #[test]
    fn principal_serialization_has_no_secret_field() {
        let principal = Principal {
            id: PrincipalId("p1".to_string()),
            email: "jane@example.com".to_string(),
            name: "Jane".to_string(),
            role: Role::MemberOperator,
            last_login: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_string(&principal).unwrap();
        assert!(!json.contains("hash"));
        assert!(!json.contains("secret"));
        assert!(!json.contains("password"));
    }
}
