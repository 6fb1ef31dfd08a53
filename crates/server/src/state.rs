use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex, PoisonError};

use shopwise_core::catalog::Catalog;
use shopwise_core::config::AssistantConfig;
use shopwise_core::domain::session::SessionId;
use shopwise_db::{
    CartRepository, DbPool, OrderRepository, SessionRepository, SqlCartRepository,
    SqlOrderRepository, SqlSessionRepository,
};
use tokio::sync::{Mutex, OwnedMutexGuard};

type LockMap = HashMap<SessionId, Arc<Mutex<()>>>;

/// One async mutex per session id. Holders run a read-modify-write of that
/// session's profile, cart and orders; different sessions never contend.
///
/// An entry lives only while someone holds or waits for it: the last
/// [`SessionGuard`] to drop removes it from the map.
#[derive(Clone, Default)]
pub struct SessionLocks {
    locks: Arc<StdMutex<LockMap>>,
}

impl SessionLocks {
    pub async fn acquire(&self, session_id: &SessionId) -> SessionGuard {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(locks.entry(session_id.clone()).or_default())
        };
        SessionGuard {
            session_id: session_id.clone(),
            locks: Arc::clone(&self.locks),
            guard: Some(lock.lock_owned().await),
        }
    }

    #[cfg(test)]
    pub fn entry_count(&self) -> usize {
        self.locks.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

pub struct SessionGuard {
    session_id: SessionId,
    locks: Arc<StdMutex<LockMap>>,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        drop(self.guard.take());
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        // The map's own clone is the only one left once nobody holds or awaits it.
        if locks.get(&self.session_id).is_some_and(|lock| Arc::strong_count(lock) == 1) {
            locks.remove(&self.session_id);
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub sessions: Arc<dyn SessionRepository>,
    pub carts: Arc<dyn CartRepository>,
    pub orders: Arc<dyn OrderRepository>,
    pub locks: SessionLocks,
    pub assistant: AssistantConfig,
}

impl AppState {
    pub fn sql(db_pool: DbPool, assistant: AssistantConfig) -> Self {
        Self {
            catalog: Arc::new(Catalog::seeded()),
            sessions: Arc::new(SqlSessionRepository::new(db_pool.clone())),
            carts: Arc::new(SqlCartRepository::new(db_pool.clone())),
            orders: Arc::new(SqlOrderRepository::new(db_pool)),
            locks: SessionLocks::default(),
            assistant,
        }
    }

    #[cfg(test)]
    pub fn in_memory(assistant: AssistantConfig) -> Self {
        use shopwise_db::{
            InMemoryCartRepository, InMemoryOrderRepository, InMemorySessionRepository,
        };

        Self {
            catalog: Arc::new(Catalog::seeded()),
            sessions: Arc::new(InMemorySessionRepository::default()),
            carts: Arc::new(InMemoryCartRepository::default()),
            orders: Arc::new(InMemoryOrderRepository::default()),
            locks: SessionLocks::default(),
            assistant,
        }
    }
}
