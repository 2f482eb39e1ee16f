use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::SessionState,
    services::{pages::PageSettings, providers::MetadataProvider, Recommender},
};

/// Idle time after which a session is dropped unless configured otherwise
pub const DEFAULT_SESSION_TTL: TimeDelta = TimeDelta::hours(1);

/// Shared application state
///
/// The recommender and its artifacts are read-only after startup. Only the
/// session table is written, and each entry belongs to a single user.
/// Sessions idle for longer than `session_ttl` are treated as gone and are
/// swept whenever a new session is created.
#[derive(Clone)]
pub struct AppState {
    pub recommender: Arc<Recommender>,
    pub metadata: Arc<dyn MetadataProvider>,
    pub settings: Arc<PageSettings>,
    pub sessions: Arc<RwLock<HashMap<Uuid, SessionState>>>,
    pub session_ttl: TimeDelta,
}

impl AppState {
    pub fn new(
        recommender: Recommender,
        metadata: Arc<dyn MetadataProvider>,
        settings: PageSettings,
    ) -> Self {
        Self {
            recommender: Arc::new(recommender),
            metadata,
            settings: Arc::new(settings),
            sessions: Arc::new(RwLock::new(HashMap::new())),
            session_ttl: DEFAULT_SESSION_TTL,
        }
    }

    pub fn with_session_ttl(mut self, ttl: TimeDelta) -> Self {
        self.session_ttl = ttl;
        self
    }

    /// Starts a session and returns its ID, sweeping out idle sessions first
    pub async fn create_session(&self, trending_seed: u64) -> (Uuid, SessionState) {
        let id = Uuid::new_v4();
        let session = SessionState::new(trending_seed);

        let mut sessions = self.sessions.write().await;
        self.sweep(&mut sessions, session.created_at);
        sessions.insert(id, session.clone());

        (id, session)
    }

    /// Snapshot of a session, so no lock is held while rendering
    pub async fn session(&self, id: Uuid) -> AppResult<SessionState> {
        self.update_session(id, |session| Ok(session.clone())).await
    }

    /// Runs `f` against a session under the write lock
    ///
    /// Counts as activity for the session. An expired session is removed and
    /// reported as not found.
    pub async fn update_session<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut SessionState) -> AppResult<T>,
    ) -> AppResult<T> {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;

        if sessions
            .get(&id)
            .is_some_and(|session| session.is_expired(now, self.session_ttl))
        {
            sessions.remove(&id);
            tracing::info!(session_id = %id, "Session expired");
        }

        let session = sessions.get_mut(&id).ok_or_else(|| session_not_found(id))?;
        session.touch(now);
        f(session)
    }

    /// Drops every session idle for longer than the TTL, returning how many
    pub async fn evict_expired(&self, now: DateTime<Utc>) -> usize {
        let mut sessions = self.sessions.write().await;
        self.sweep(&mut sessions, now)
    }

    pub async fn remove_session(&self, id: Uuid) -> AppResult<()> {
        self.sessions
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| session_not_found(id))
    }

    fn sweep(&self, sessions: &mut HashMap<Uuid, SessionState>, now: DateTime<Utc>) -> usize {
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired(now, self.session_ttl));
        let evicted = before - sessions.len();
        if evicted > 0 {
            tracing::info!(evicted, remaining = sessions.len(), "Evicted idle sessions");
        }
        evicted
    }
}

fn session_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Session {} does not exist", id))
}
