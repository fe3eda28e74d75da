use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use storage::repository::SessionKey;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

type LockMap = HashMap<SessionKey, Arc<AsyncMutex<()>>>;

/// One async mutex per session key; holding the guard makes a read-modify-write exclusive.
/// Entries live only while some caller holds or waits on them.
#[derive(Default)]
pub(crate) struct SessionLocks {
    locks: Mutex<LockMap>,
}

impl SessionLocks {
    pub(crate) async fn acquire(&self, key: &SessionKey) -> SessionGuard<'_> {
        let lock = {
            let mut map = self.map();
            Arc::clone(map.entry(key.clone()).or_default())
        };
        SessionGuard {
            locks: self,
            key: key.clone(),
            guard: Some(lock.lock_owned().await),
        }
    }

    fn map(&self) -> std::sync::MutexGuard<'_, LockMap> {
        self.locks.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.map().len()
    }
}

/// Exclusive access to one session; releasing it forgets the key once nobody else wants it.
pub(crate) struct SessionGuard<'a> {
    locks: &'a SessionLocks,
    key: SessionKey,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for SessionGuard<'_> {
    fn drop(&mut self) {
        drop(self.guard.take());
        let mut map = self.locks.map();
        // Only the map's own handle left: no holder and no waiter.
        if map
            .get(&self.key)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            map.remove(&self.key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn same_key_shares_a_lock() {
        let locks = SessionLocks::default();
        let key = SessionKey::implicit();

        let guard = locks.acquire(&key).await;
        let other = SessionKey::new("other").unwrap();
        // A different key is never blocked by the held guard.
        drop(locks.acquire(&other).await);

        let pending = tokio::time::timeout(
            std::time::Duration::from_millis(20),
            locks.acquire(&key),
        )
        .await;
        assert!(pending.is_err());

        drop(guard);
        drop(locks.acquire(&key).await);
    }

    #[tokio::test]
    async fn released_keys_are_forgotten() {
        let locks = SessionLocks::default();
        for n in 0..1_000 {
            let key = SessionKey::new(format!("visitor-{n}")).unwrap();
            drop(locks.acquire(&key).await);
        }
        assert_eq!(locks.len(), 0);

        let key = SessionKey::implicit();
        let held = locks.acquire(&key).await;
        assert_eq!(locks.len(), 1);
        drop(held);
        assert_eq!(locks.len(), 0);
    }

    #[tokio::test]
    async fn waiter_keeps_the_entry_alive() {
        let locks = Arc::new(SessionLocks::default());
        let key = SessionKey::implicit();
        let held = locks.acquire(&key).await;

        let waiter = {
            let locks = Arc::clone(&locks);
            let key = key.clone();
            tokio::spawn(async move {
                let _guard = locks.acquire(&key).await;
                locks.len()
            })
        };
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        drop(held);

        assert_eq!(waiter.await.unwrap(), 1);
        assert_eq!(locks.len(), 0);
    }
}
