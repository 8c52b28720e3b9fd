//! In-memory [`Store`] and [`ActivityLog`] backend.
//!
//! Suitable for tests, development and single-node demos. Everything lives
//! in process memory; a real deployment plugs a database-backed
//! implementation into the same traits.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use std::sync::RwLock;
use uuid::Uuid;

use tribe_activity::{ActivityFilter, ActivityLog, ActivityLogError, ActivityRecord};
use tribe_storage::{
    CreatePrincipalParams, Principal, PrincipalCredentials, PrincipalId, Store, StoreError,
};

struct StoredPrincipal {
    principal: Principal,
    secret_hash: String,
}

/// Process-local store keyed by principal id.
#[derive(Default)]
pub struct MemoryStore {
    principals: DashMap<String, StoredPrincipal>,
    activity: RwLock<Vec<ActivityRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn find_by_email(&self, email: &str) -> Option<(Principal, String)> {
        self.principals.iter().find_map(|entry| {
            if entry.principal.email.eq_ignore_ascii_case(email) {
                Some((entry.principal.clone(), entry.secret_hash.clone()))
            } else {
                None
            }
        })
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn create_principal(
        &self,
        params: &CreatePrincipalParams,
    ) -> Result<Principal, StoreError> {
        if self.find_by_email(&params.email).is_some() {
            return Err(StoreError::AlreadyExists);
        }

        let now = Utc::now();
        let principal = Principal {
            id: PrincipalId(Uuid::new_v4().to_string()),
            email: params.email.to_lowercase(),
            name: params.name.clone(),
            role: params.role,
            last_login: None,
            created_at: now,
            updated_at: now,
        };

        self.principals.insert(
            principal.id.0.clone(),
            StoredPrincipal {
                principal: principal.clone(),
                secret_hash: params.secret_hash.clone(),
            },
        );

        Ok(principal)
    }

    async fn get_principal(&self, principal_id: &PrincipalId) -> Result<Principal, StoreError> {
        self.principals
            .get(&principal_id.0)
            .map(|entry| entry.principal.clone())
            .ok_or(StoreError::NotFound)
    }

    async fn get_principal_by_email(&self, email: &str) -> Result<Principal, StoreError> {
        self.find_by_email(email)
            .map(|(principal, _)| principal)
            .ok_or(StoreError::NotFound)
    }

    async fn get_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<PrincipalCredentials, StoreError> {
        self.find_by_email(email)
            .map(|(principal, secret_hash)| PrincipalCredentials {
                id: principal.id,
                secret_hash,
            })
            .ok_or(StoreError::NotFound)
    }

    async fn touch_last_login(&self, principal_id: &PrincipalId) -> Result<(), StoreError> {
        let mut entry = self
            .principals
            .get_mut(&principal_id.0)
            .ok_or(StoreError::NotFound)?;

        let now = Utc::now();
        entry.principal.last_login = Some(now);
        entry.principal.updated_at = now;
        Ok(())
    }

    async fn list_principals(&self) -> Result<Vec<Principal>, StoreError> {
        Ok(self
            .principals
            .iter()
            .map(|entry| entry.principal.clone())
            .collect())
    }
}

fn matches(record: &ActivityRecord, filter: &ActivityFilter) -> bool {
    if let Some(kind) = filter.kind {
        if record.kind != kind {
            return false;
        }
    }
    if let Some(action) = filter.action {
        if record.action != action {
            return false;
        }
    }
    true
}

#[async_trait]
impl ActivityLog for MemoryStore {
    async fn append(&self, record: ActivityRecord) -> Result<(), ActivityLogError> {
        self.activity
            .write()
            .map_err(|e| ActivityLogError::Database(e.to_string()))?
            .push(record);
        Ok(())
    }

    async fn query(&self, filter: ActivityFilter) -> Result<Vec<ActivityRecord>, ActivityLogError> {
        let records = self
            .activity
            .read()
            .map_err(|e| ActivityLogError::Database(e.to_string()))?;

        let offset = filter.offset.unwrap_or(0) as usize;
        let limit = filter.limit.map(|l| l as usize).unwrap_or(usize::MAX);

        // Newest first; records are appended in arrival order.
        Ok(records
            .iter()
            .rev()
            .filter(|r| matches(r, &filter))
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn count(&self, filter: ActivityFilter) -> Result<u64, ActivityLogError> {
        let records = self
            .activity
            .read()
            .map_err(|e| ActivityLogError::Database(e.to_string()))?;

        Ok(records.iter().filter(|r| matches(r, &filter)).count() as u64)
    }
}
