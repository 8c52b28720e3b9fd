//! Core of the tribe portal: the authentication/authorization gate and the
//! entry points of the activity-audit pipeline.
//!
//! Route handlers (out of scope here, any HTTP framework) call into
//! [`TribeCore`]:
//!
//! - [`TribeCore::require_authenticated`] before business logic, attaching a
//!   [`Principal`] to the request context or short-circuiting with a typed
//!   rejection;
//! - [`TribeCore::require_role`] on routes that declare an elevated role;
//! - [`TribeCore::record_activity`] after a successful mutation,
//!   fire-and-forget;
//! - the session operations ([`TribeCore::register`], [`TribeCore::login`])
//!   where tokens are minted.
//!
//! The store, the activity log and the queue transport are trait objects
//! supplied by the embedding application; `tribe-store-memory` and
//! `tribe-activity-memory` cover tests and single-node deployments.

mod auth;
mod config;
mod session;

pub use auth::{
    extract_token, AccessGuard, AuthError, Claims, RequestLike, RequestParts, RoleError,
    TokenCodec, TokenError, AUTH_PURPOSE, TOKEN_COOKIE, TOKEN_TTL_SECS,
};
pub use config::{ConfigError, CoreConfig};
pub use session::{RegisterParams, Session, SessionError};

// The vocabulary route handlers need, without extra crate dependencies.
pub use tribe_activity::{
    ActivityAction, ActivityFilter, ActivityKind, ActivityLog, ActivityMeta, ActivityRecord,
};
pub use tribe_storage::{Principal, PrincipalId, Role, Store};

use std::sync::Arc;
use tribe_activity::{ActivityQueue, ActivityRecorder, ActivityWorker};

/// Everything a route handler needs, wired together once at startup.
pub struct TribeCore {
    store: Arc<dyn Store>,
    activity_log: Arc<dyn ActivityLog>,
    queue: Arc<dyn ActivityQueue>,
    codec: TokenCodec,
    guard: AccessGuard,
    recorder: ActivityRecorder,
}

impl TribeCore {
    pub fn new(
        config: &CoreConfig,
        store: Arc<dyn Store>,
        activity_log: Arc<dyn ActivityLog>,
        queue: Arc<dyn ActivityQueue>,
    ) -> Self {
        let codec = TokenCodec::new(&config.jwt_secret);
        let guard = AccessGuard::new(codec.clone(), store.clone());
        let recorder = ActivityRecorder::new(queue.clone());

        Self {
            store,
            activity_log,
            queue,
            codec,
            guard,
            recorder,
        }
    }

    /// Authenticate a request; see [`AccessGuard::require_authenticated`].
    pub async fn require_authenticated<R>(&self, request: &R) -> Result<Principal, AuthError>
    where
        R: RequestLike + ?Sized,
    {
        self.guard.require_authenticated(request).await
    }

    /// Role check for routes that declare one; see
    /// [`AccessGuard::require_role`].
    pub fn require_role(principal: Option<&Principal>, required: Role) -> Result<(), RoleError> {
        AccessGuard::require_role(principal, required)
    }

    /// Record a domain mutation for the activity feed.
    ///
    /// Returns once the event is accepted by the queue (or dropped); never
    /// fails the caller.
    pub async fn record_activity(
        &self,
        kind: ActivityKind,
        action: ActivityAction,
        meta: ActivityMeta,
    ) {
        self.recorder.record(kind, action, meta).await;
    }

    /// Start the activity worker on its own task.
    ///
    /// The task runs until the queue shuts down; per-event failures never
    /// terminate it.
    pub fn spawn_activity_worker(&self) -> tokio::task::JoinHandle<()> {
        let worker = ActivityWorker::new(self.queue.clone(), self.activity_log.clone());
        tokio::spawn(async move {
            if let Err(error) = worker.run().await {
                tracing::error!(%error, "activity worker exited");
            }
        })
    }

    /// The backing store, for collaborators that need direct reads.
    pub fn store(&self) -> &Arc<dyn Store> {
        &self.store
    }

    /// The activity log, for the feed endpoint.
    pub fn activity_log(&self) -> &Arc<dyn ActivityLog> {
        &self.activity_log
    }
}
