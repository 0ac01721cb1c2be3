//! Generic keyed store abstraction and the directory bundle.
//!
//! The persistence engine behind the hierarchy is deliberately generic: a
//! [`Store`] offers find/upsert/remove/list primitives and nothing else. The
//! in-memory implementation backs tests and dev; a relational implementation
//! plugs in behind the same trait.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, RwLock};

use adhera_core::{AssignmentId, DelegateId, MemberId, PaymentId, RegionId, UserId};

use crate::model::{Assignment, Delegate, Member, Payment, Region, UserRecord};

/// Keyed record store.
pub trait Store<K, V>: Send + Sync {
    fn get(&self, key: &K) -> Option<V>;
    fn upsert(&self, key: K, value: V);
    /// Remove a record; returns whether it existed.
    fn remove(&self, key: &K) -> bool;
    fn list(&self) -> Vec<V>;
}

impl<K, V, S> Store<K, V> for Arc<S>
where
    S: Store<K, V> + ?Sized,
{
    fn get(&self, key: &K) -> Option<V> {
        (**self).get(key)
    }

    fn upsert(&self, key: K, value: V) {
        (**self).upsert(key, value)
    }

    fn remove(&self, key: &K) -> bool {
        (**self).remove(key)
    }

    fn list(&self) -> Vec<V> {
        (**self).list()
    }
}

/// In-memory store for tests/dev. Not optimized for performance.
#[derive(Debug)]
pub struct InMemoryStore<K, V> {
    inner: RwLock<HashMap<K, V>>,
}

impl<K, V> InMemoryStore<K, V> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }
}

impl<K, V> Default for InMemoryStore<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Store<K, V> for InMemoryStore<K, V>
where
    K: Clone + Eq + Hash + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn get(&self, key: &K) -> Option<V> {
        let map = self.inner.read().ok()?;
        map.get(key).cloned()
    }

    fn upsert(&self, key: K, value: V) {
        if let Ok(mut map) = self.inner.write() {
            map.insert(key, value);
        }
    }

    fn remove(&self, key: &K) -> bool {
        match self.inner.write() {
            Ok(mut map) => map.remove(key).is_some(),
            Err(_) => false,
        }
    }

    fn list(&self) -> Vec<V> {
        match self.inner.read() {
            Ok(map) => map.values().cloned().collect(),
            Err(_) => vec![],
        }
    }
}

/// The full directory: one store per entity of the hierarchy.
///
/// Cheap to clone (shared handles). The Assignment Registry and the Ownership
/// Graph Accessor are implemented on this type in `registry.rs` / `graph.rs`.
#[derive(Clone)]
pub struct Directory {
    pub users: Arc<dyn Store<UserId, UserRecord>>,
    pub regions: Arc<dyn Store<RegionId, Region>>,
    pub assignments: Arc<dyn Store<AssignmentId, Assignment>>,
    pub delegates: Arc<dyn Store<DelegateId, Delegate>>,
    pub members: Arc<dyn Store<MemberId, Member>>,
    pub payments: Arc<dyn Store<PaymentId, Payment>>,
}

impl Directory {
    /// A directory backed entirely by in-memory stores.
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryStore::new()),
            regions: Arc::new(InMemoryStore::new()),
            assignments: Arc::new(InMemoryStore::new()),
            delegates: Arc::new(InMemoryStore::new()),
            members: Arc::new(InMemoryStore::new()),
            payments: Arc::new(InMemoryStore::new()),
        }
    }

    /// Look up a user by email (unique).
    pub fn user_by_email(&self, email: &str) -> Option<UserRecord> {
        self.users.list().into_iter().find(|u| u.email == email)
    }

    /// Look up a region by name (unique).
    pub fn region_by_name(&self, name: &str) -> Option<Region> {
        self.regions.list().into_iter().find(|r| r.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn upsert_get_remove_round_trip() {
        let store: InMemoryStore<RegionId, Region> = InMemoryStore::new();
        let region = Region {
            id: RegionId::new(),
            name: "Nord".to_string(),
            created_at: Utc::now(),
        };
        store.upsert(region.id, region.clone());
        assert_eq!(store.get(&region.id), Some(region.clone()));
        assert!(store.remove(&region.id));
        assert_eq!(store.get(&region.id), None);
        assert!(!store.remove(&region.id));
    }

    #[test]
    fn user_by_email_finds_the_unique_match() {
        let dir = Directory::in_memory();
        let user = UserRecord {
            id: adhera_core::UserId::new(),
            name: "GM".to_string(),
            email: "gm@example.com".to_string(),
            password_hash: String::new(),
            role: adhera_auth::Role::GlobalManager,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            deleted_at: None,
        };
        dir.users.upsert(user.id, user.clone());
        assert_eq!(dir.user_by_email("gm@example.com"), Some(user));
        assert_eq!(dir.user_by_email("missing@example.com"), None);
    }
}
