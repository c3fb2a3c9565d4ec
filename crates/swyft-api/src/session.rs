//! In-memory session table
//!
//! Admin sessions are server-side state keyed by an opaque bearer token.
//! The table is process-local; restarting the service logs everyone out,
//! which is acceptable for an internal admin tool.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use serde::Serialize;
use uuid::Uuid;

/// An authenticated admin session
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    /// Opaque bearer token
    pub token: Uuid,

    /// Admin account the session belongs to
    pub admin_id: Uuid,

    /// Admin email at login time
    pub email: String,

    /// Super-admin flag
    pub super_admin: bool,

    /// Expiry timestamp
    pub expires_at: DateTime<Utc>,
}

/// Concurrent session store with TTL expiry
#[derive(Debug)]
pub struct SessionStore {
    sessions: DashMap<Uuid, Session>,
    ttl: Duration,
}

impl SessionStore {
    /// Create a store whose sessions live for `ttl_secs` seconds
    #[must_use]
    pub fn new(ttl_secs: u64) -> Self {
        Self {
            sessions: DashMap::new(),
            ttl: Duration::seconds(ttl_secs as i64),
        }
    }

    /// Create a session for an admin and return it
    pub fn create(&self, admin_id: Uuid, email: &str, super_admin: bool) -> Session {
        let session = Session {
            token: Uuid::new_v4(),
            admin_id,
            email: email.to_string(),
            super_admin,
            expires_at: Utc::now() + self.ttl,
        };
        self.sessions.insert(session.token, session.clone());
        session
    }

    /// Look up a live session; expired entries are removed on access
    #[must_use]
    pub fn get(&self, token: Uuid) -> Option<Session> {
        let session = self.sessions.get(&token)?.clone();
        if session.expires_at <= Utc::now() {
            self.sessions.remove(&token);
            return None;
        }
        Some(session)
    }

    /// Remove a session, returning whether it existed
    pub fn remove(&self, token: Uuid) -> bool {
        self.sessions.remove(&token).is_some()
    }

    /// Drop every expired session
    pub fn purge_expired(&self) {
        let now = Utc::now();
        self.sessions.retain(|_, session| session.expires_at > now);
    }

    /// Number of live entries (expired ones may still be counted until
    /// accessed or purged)
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether the store holds no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
