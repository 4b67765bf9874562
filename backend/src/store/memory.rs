//! In-memory store backend.
//!
//! Stands in for the hosted document store: owner-scoped collections, full
//! snapshot delivery on every matching mutation, server-assigned document
//! semantics. Used in local mode and by every test in this crate.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::{anyhow, Result};
use futures::channel::mpsc;
use log::debug;
use shared::{Record, RecordKind, UserProfile};

use crate::store::subscription::{RecordSubscription, Snapshot};
use crate::store::traits::{Connection, RecordStorage, UserStorage};

struct Watcher {
    id: u64,
    owner_id: String,
    kind: RecordKind,
    sender: mpsc::UnboundedSender<Snapshot>,
}

struct StoreInner {
    records: Mutex<Vec<Record>>,
    users: Mutex<HashMap<String, UserProfile>>,
    watchers: Mutex<Vec<Watcher>>,
    next_watcher: AtomicU64,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    // A poisoned lock only means another thread panicked mid-write; the
    // snapshot model tolerates that, so keep serving.
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl StoreInner {
    fn snapshot_for(&self, owner_id: &str, kind: RecordKind) -> Snapshot {
        lock(&self.records)
            .iter()
            .filter(|r| r.owner_id == owner_id && r.kind == kind)
            .cloned()
            .collect()
    }

    /// Deliver a fresh full snapshot to every watcher matching the filter.
    /// Watchers whose receiving end is gone are pruned here.
    fn notify(&self, owner_id: &str, kind: RecordKind) {
        let snapshot = self.snapshot_for(owner_id, kind);
        let mut watchers = lock(&self.watchers);
        watchers.retain(|w| {
            if w.owner_id == owner_id && w.kind == kind {
                w.sender.unbounded_send(snapshot.clone()).is_ok()
            } else {
                !w.sender.is_closed()
            }
        });
    }

    fn remove_watcher(&self, watcher_id: u64) {
        lock(&self.watchers).retain(|w| w.id != watcher_id);
    }
}

/// Connection to the in-memory store. Clones share the same data.
#[derive(Clone)]
pub struct MemoryConnection {
    inner: Arc<StoreInner>,
}

impl MemoryConnection {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(StoreInner {
                records: Mutex::new(Vec::new()),
                users: Mutex::new(HashMap::new()),
                watchers: Mutex::new(Vec::new()),
                next_watcher: AtomicU64::new(1),
            }),
        }
    }

    /// Number of live subscriptions, for leak checks.
    pub fn watcher_count(&self) -> usize {
        lock(&self.inner.watchers).len()
    }
}

impl Default for MemoryConnection {
    fn default() -> Self {
        Self::new()
    }
}

impl Connection for MemoryConnection {
    type RecordRepository = MemoryRecordRepository;
    type UserRepository = MemoryUserRepository;

    fn create_record_repository(&self) -> Self::RecordRepository {
        MemoryRecordRepository {
            inner: Arc::clone(&self.inner),
        }
    }

    fn create_user_repository(&self) -> Self::UserRepository {
        MemoryUserRepository {
            inner: Arc::clone(&self.inner),
        }
    }
}

pub struct MemoryRecordRepository {
    inner: Arc<StoreInner>,
}

impl RecordStorage for MemoryRecordRepository {
    fn store_record(&self, record: &Record) -> Result<()> {
        lock(&self.inner.records).push(record.clone());
        self.inner.notify(&record.owner_id, record.kind);
        Ok(())
    }

    fn get_record(&self, owner_id: &str, record_id: &str) -> Result<Option<Record>> {
        Ok(lock(&self.inner.records)
            .iter()
            .find(|r| r.id == record_id && r.owner_id == owner_id)
            .cloned())
    }

    fn list_records(&self, owner_id: &str, kind: RecordKind) -> Result<Vec<Record>> {
        Ok(self.inner.snapshot_for(owner_id, kind))
    }

    fn update_record(&self, record: &Record) -> Result<()> {
        {
            let mut records = lock(&self.inner.records);
            let existing = records
                .iter_mut()
                .find(|r| r.id == record.id)
                .ok_or_else(|| anyhow!("record {} not found", record.id))?;
            *existing = record.clone();
        }
        self.inner.notify(&record.owner_id, record.kind);
        Ok(())
    }

    fn delete_record(&self, owner_id: &str, kind: RecordKind, record_id: &str) -> Result<bool> {
        let removed = {
            let mut records = lock(&self.inner.records);
            let before = records.len();
            records.retain(|r| !(r.id == record_id && r.owner_id == owner_id && r.kind == kind));
            records.len() != before
        };
        if removed {
            self.inner.notify(owner_id, kind);
        }
        Ok(removed)
    }

    fn subscribe(&self, owner_id: &str, kind: RecordKind) -> RecordSubscription {
        let watcher_id = self.inner.next_watcher.fetch_add(1, Ordering::Relaxed);
        let (sender, receiver) = mpsc::unbounded();

        // Initial full snapshot before the watcher is registered, so the
        // subscriber always sees current state first.
        let _ = sender.unbounded_send(self.inner.snapshot_for(owner_id, kind));

        lock(&self.inner.watchers).push(Watcher {
            id: watcher_id,
            owner_id: owner_id.to_string(),
            kind,
            sender,
        });
        debug!("opened watcher {} for owner {} ({})", watcher_id, owner_id, kind);

        let inner = Arc::clone(&self.inner);
        RecordSubscription::new(receiver, move || {
            debug!("closing watcher {}", watcher_id);
            inner.remove_watcher(watcher_id);
        })
    }
}

pub struct MemoryUserRepository {
    inner: Arc<StoreInner>,
}

impl UserStorage for MemoryUserRepository {
    fn store_user(&self, user: &UserProfile) -> Result<()> {
        // setDoc semantics: creating over an existing id overwrites it.
        lock(&self.inner.users).insert(user.id.clone(), user.clone());
        Ok(())
    }

    fn get_user(&self, user_id: &str) -> Result<Option<UserProfile>> {
        Ok(lock(&self.inner.users).get(user_id).cloned())
    }

    fn update_user(&self, user: &UserProfile) -> Result<()> {
        let mut users = lock(&self.inner.users);
        if !users.contains_key(&user.id) {
            return Err(anyhow!("user {} not found", user.id));
        }
        users.insert(user.id.clone(), user.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, owner: &str, kind: RecordKind, amount: f64) -> Record {
        Record {
            id: id.to_string(),
            owner_id: owner.to_string(),
            kind,
            amount,
            category: "Food".to_string(),
            sub_category: "Groceries".to_string(),
            note: String::new(),
            date: "2025-01-10T10:00:00+00:00".to_string(),
        }
    }

    #[test]
    fn test_subscribe_delivers_initial_snapshot() {
        let connection = MemoryConnection::new();
        let repo = connection.create_record_repository();
        repo.store_record(&record("r1", "u1", RecordKind::Expense, 12.0))
            .unwrap();

        let mut subscription = repo.subscribe("u1", RecordKind::Expense);
        let snapshot = subscription.try_snapshot().unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].id, "r1");
    }

    #[test]
    fn test_mutations_deliver_full_snapshots() {
        let connection = MemoryConnection::new();
        let repo = connection.create_record_repository();
        let mut subscription = repo.subscribe("u1", RecordKind::Expense);
        assert!(subscription.try_snapshot().unwrap().is_empty());

        repo.store_record(&record("r1", "u1", RecordKind::Expense, 12.0))
            .unwrap();
        repo.store_record(&record("r2", "u1", RecordKind::Expense, 8.0))
            .unwrap();

        // Each mutation is a fresh full snapshot, not a diff.
        assert_eq!(subscription.try_snapshot().unwrap().len(), 1);
        assert_eq!(subscription.try_snapshot().unwrap().len(), 2);

        repo.delete_record("u1", RecordKind::Expense, "r1").unwrap();
        let snapshot = subscription.try_snapshot().unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].id, "r2");
    }

    #[test]
    fn test_subscription_scoped_by_owner_and_kind() {
        let connection = MemoryConnection::new();
        let repo = connection.create_record_repository();
        let mut expenses = repo.subscribe("u1", RecordKind::Expense);
        expenses.try_snapshot();

        repo.store_record(&record("r1", "u2", RecordKind::Expense, 5.0))
            .unwrap();
        repo.store_record(&record("r2", "u1", RecordKind::Income, 5.0))
            .unwrap();

        // Neither mutation matches the filter.
        assert!(expenses.try_snapshot().is_none());
    }

    #[test]
    fn test_cancel_unregisters_watcher() {
        let connection = MemoryConnection::new();
        let repo = connection.create_record_repository();

        let subscription = repo.subscribe("u1", RecordKind::Income);
        assert_eq!(connection.watcher_count(), 1);
        subscription.cancel();
        assert_eq!(connection.watcher_count(), 0);

        let dropped = repo.subscribe("u1", RecordKind::Income);
        assert_eq!(connection.watcher_count(), 1);
        drop(dropped);
        assert_eq!(connection.watcher_count(), 0);
    }

    #[test]
    fn test_update_replaces_record() {
        let connection = MemoryConnection::new();
        let repo = connection.create_record_repository();
        repo.store_record(&record("r1", "u1", RecordKind::Expense, 12.0))
            .unwrap();

        let mut updated = record("r1", "u1", RecordKind::Expense, 20.0);
        updated.note = "groceries run".to_string();
        repo.update_record(&updated).unwrap();

        let fetched = repo.get_record("u1", "r1").unwrap().unwrap();
        assert_eq!(fetched.amount, 20.0);
        assert_eq!(fetched.note, "groceries run");

        let missing = record("nope", "u1", RecordKind::Expense, 1.0);
        assert!(repo.update_record(&missing).is_err());
    }

    #[test]
    fn test_user_repository_round_trip() {
        let connection = MemoryConnection::new();
        let users = connection.create_user_repository();

        assert!(users.get_user("u1").unwrap().is_none());

        let profile = UserProfile {
            id: "u1".to_string(),
            email: "a@b.c".to_string(),
            full_name: "Ada".to_string(),
            bio: String::new(),
            profile_image: String::new(),
        };
        users.store_user(&profile).unwrap();
        assert_eq!(users.get_user("u1").unwrap().unwrap().full_name, "Ada");

        let mut edited = profile.clone();
        edited.bio = "hello".to_string();
        users.update_user(&edited).unwrap();
        assert_eq!(users.get_user("u1").unwrap().unwrap().bio, "hello");
    }
}
