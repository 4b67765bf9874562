//! # Store module
//!
//! Abstraction over the hosted document store. The traits mirror what the
//! external service offers — per-collection CRUD plus live queries scoped by
//! an equality filter on the owner field — so the domain layer never knows
//! which backend it is talking to. [`MemoryConnection`] implements the same
//! contract in-process for local mode and tests.

pub mod memory;
pub mod subscription;
mod traits;

pub use memory::MemoryConnection;
pub use subscription::{RecordSubscription, Snapshot, SnapshotStream, SubscriptionGuard};
pub use traits::{Connection, RecordStorage, UserStorage};
