//! Session bookkeeping

use crate::error::{Result, SessionError};
use crate::session::Session;
use crate::types::SessionId;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::{Mutex, RwLock};

/// Live sessions, each behind its own lock
///
/// Actions on one session are serialized by its mutex; different sessions
/// never contend beyond the short map lookup.
#[derive(Clone)]
pub(crate) struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<SessionId, Arc<Mutex<Session>>>>>,
    next_id: Arc<AtomicI64>,
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }
}

impl SessionRegistry {
    /// Create a fresh session and return a copy of its initial state
    pub(crate) async fn create(&self) -> Session {
        let id = SessionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let session = Session::new(id);
        self.sessions
            .write()
            .await
            .insert(id, Arc::new(Mutex::new(session.clone())));
        session
    }

    /// Handle to a live session
    pub(crate) async fn get(&self, id: SessionId) -> Result<Arc<Mutex<Session>>> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| SessionError::NotFound { id }.into())
    }

    /// Drop a session and its state
    pub(crate) async fn remove(&self, id: SessionId) -> Result<()> {
        match self.sessions.write().await.remove(&id) {
            Some(_) => Ok(()),
            None => Err(SessionError::NotFound { id }.into()),
        }
    }

    /// Number of live sessions
    pub(crate) async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}
