//! Storage abstraction traits.
//!
//! The domain layer works against these interfaces only, so the in-memory
//! backend used for local mode and tests is interchangeable with a real
//! hosted-store SDK.

use anyhow::Result;
use shared::{Record, RecordKind, UserProfile};

use crate::store::subscription::RecordSubscription;

/// Interface to a record collection (`income` or `expenses`).
///
/// Every read is scoped by the owner identifier; the store is trusted to
/// enforce that a record is only visible to its owner.
pub trait RecordStorage: Send + Sync {
    /// Store a new record.
    fn store_record(&self, record: &Record) -> Result<()>;

    /// Retrieve a specific record owned by `owner_id`.
    fn get_record(&self, owner_id: &str, record_id: &str) -> Result<Option<Record>>;

    /// List all records of one kind for an owner, oldest first.
    fn list_records(&self, owner_id: &str, kind: RecordKind) -> Result<Vec<Record>>;

    /// Replace an existing record (matched by id).
    fn update_record(&self, record: &Record) -> Result<()>;

    /// Delete a record. Returns true if it was found and deleted.
    fn delete_record(&self, owner_id: &str, kind: RecordKind, record_id: &str) -> Result<bool>;

    /// Open a live query for `(owner_id, kind)`.
    ///
    /// The current snapshot is delivered immediately; afterwards every
    /// mutation matching the filter delivers a fresh full snapshot (not a
    /// diff) until the subscription is cancelled or dropped.
    fn subscribe(&self, owner_id: &str, kind: RecordKind) -> RecordSubscription;
}

/// Interface to the `users` collection.
pub trait UserStorage: Send + Sync {
    /// Store a new user document keyed by its id.
    fn store_user(&self, user: &UserProfile) -> Result<()>;

    /// Retrieve a user document.
    fn get_user(&self, user_id: &str) -> Result<Option<UserProfile>>;

    /// Replace an existing user document.
    fn update_user(&self, user: &UserProfile) -> Result<()>;
}

/// Factory for repositories over one store connection.
///
/// Mirrors the connection object a hosted SDK hands out: cheap to clone,
/// shared by every service that needs a collection handle.
pub trait Connection: Send + Sync + Clone {
    type RecordRepository: RecordStorage;
    type UserRepository: UserStorage;

    fn create_record_repository(&self) -> Self::RecordRepository;
    fn create_user_repository(&self) -> Self::UserRepository;
}
