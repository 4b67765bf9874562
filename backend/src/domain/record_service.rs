//! Record service: the write and query path for income and expense entries.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use chrono::Utc;
use log::{error, info};
use shared::{subcategory_belongs, Record, RecordKind, Session, SubmitRecordRequest};
use uuid::Uuid;

use crate::domain::commands::records::UpdateRecordCommand;
use crate::store::{Connection, RecordStorage, RecordSubscription};

pub struct RecordService<C: Connection> {
    record_repository: C::RecordRepository,
}

impl<C: Connection> RecordService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        let record_repository = connection.create_record_repository();
        Self { record_repository }
    }

    /// Create a record owned by the session user, with a server-assigned id
    /// and the current timestamp. The subscription delivers the new snapshot.
    pub fn create_record(
        &self,
        session: &Session,
        request: SubmitRecordRequest,
    ) -> Result<Record> {
        validate_fields(
            request.kind,
            request.amount,
            &request.category,
            &request.sub_category,
        )?;

        let record = Record {
            id: Uuid::new_v4().to_string(),
            owner_id: session.user_id.clone(),
            kind: request.kind,
            amount: request.amount,
            category: request.category,
            sub_category: request.sub_category,
            note: request.note,
            date: Utc::now().to_rfc3339(),
        };

        self.record_repository.store_record(&record).map_err(|e| {
            error!("failed to store {} record: {}", record.kind, e);
            e
        })?;
        info!("created {} record {}", record.kind, record.id);
        Ok(record)
    }

    /// Update the mutable fields of an existing record. Identifier, owner,
    /// kind and creation date are preserved.
    pub fn update_record(
        &self,
        session: &Session,
        command: UpdateRecordCommand,
    ) -> Result<Record> {
        let mut record = self
            .record_repository
            .get_record(&session.user_id, &command.record_id)?
            .ok_or_else(|| anyhow!("record {} not found", command.record_id))?;

        // Validate against the stored kind, so a command carrying the wrong
        // kind cannot write a cross-kind category onto the record.
        if record.kind != command.kind {
            return Err(anyhow!(
                "record {} is not a {} record",
                command.record_id,
                command.kind
            ));
        }
        validate_fields(
            record.kind,
            command.amount,
            &command.category,
            &command.sub_category,
        )?;

        record.amount = command.amount;
        record.category = command.category;
        record.sub_category = command.sub_category;
        record.note = command.note;

        self.record_repository.update_record(&record)?;
        info!("updated {} record {}", record.kind, record.id);
        Ok(record)
    }

    /// Delete immediately; there is no confirmation step and no undo.
    pub fn delete_record(
        &self,
        session: &Session,
        kind: RecordKind,
        record_id: &str,
    ) -> Result<bool> {
        let deleted = self
            .record_repository
            .delete_record(&session.user_id, kind, record_id)?;
        if deleted {
            info!("deleted {} record {}", kind, record_id);
        }
        Ok(deleted)
    }

    pub fn list_records(&self, session: &Session, kind: RecordKind) -> Result<Vec<Record>> {
        self.record_repository.list_records(&session.user_id, kind)
    }

    /// Live query scoped to the session user. Cancel (or drop) the returned
    /// subscription when the consuming view goes away.
    pub fn subscribe(&self, session: &Session, kind: RecordKind) -> RecordSubscription {
        self.record_repository.subscribe(&session.user_id, kind)
    }
}

/// Mandatory-field and category-table checks shared by create and update.
///
/// The form blocks most of these before submission; the service re-checks so
/// a mismatched subcategory can never reach the store.
fn validate_fields(kind: RecordKind, amount: f64, category: &str, sub_category: &str) -> Result<()> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(anyhow!("amount must be a non-negative number"));
    }
    if category.is_empty() {
        return Err(anyhow!("category is required"));
    }
    if sub_category.is_empty() {
        return Err(anyhow!("subcategory is required"));
    }
    if !subcategory_belongs(kind, category, sub_category) {
        return Err(anyhow!(
            "subcategory {} does not belong to category {}",
            sub_category,
            category
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryConnection;

    fn test_session() -> Session {
        Session {
            user_id: "user-1".to_string(),
            email: "ada@example.com".to_string(),
            display_name: None,
            created_at: "2025-01-01T00:00:00+00:00".to_string(),
        }
    }

    fn test_service() -> RecordService<MemoryConnection> {
        RecordService::new(Arc::new(MemoryConnection::new()))
    }

    fn groceries(amount: f64) -> SubmitRecordRequest {
        SubmitRecordRequest {
            kind: RecordKind::Expense,
            amount,
            category: "Food".to_string(),
            sub_category: "Groceries".to_string(),
            note: String::new(),
        }
    }

    #[test]
    fn test_create_visible_in_next_snapshot_with_exact_fields() {
        let service = test_service();
        let session = test_session();
        let mut subscription = service.subscribe(&session, RecordKind::Expense);
        assert!(subscription.try_snapshot().unwrap().is_empty());

        service.create_record(&session, groceries(120.0)).unwrap();

        let snapshot = subscription.try_snapshot().unwrap();
        assert_eq!(snapshot.len(), 1);
        let record = &snapshot[0];
        assert_eq!(record.amount, 120.0);
        assert_eq!(record.category, "Food");
        assert_eq!(record.sub_category, "Groceries");
        assert_eq!(record.note, "");
        assert_eq!(record.owner_id, "user-1");
        assert!(!record.id.is_empty());
    }

    #[test]
    fn test_create_rejects_invalid_fields() {
        let service = test_service();
        let session = test_session();

        let mut negative = groceries(-5.0);
        negative.amount = -5.0;
        assert!(service.create_record(&session, negative).is_err());

        let mut no_category = groceries(5.0);
        no_category.category = String::new();
        assert!(service.create_record(&session, no_category).is_err());

        let mut mismatched = groceries(5.0);
        mismatched.sub_category = "Gasoline".to_string();
        assert!(service.create_record(&session, mismatched).is_err());
    }

    #[test]
    fn test_update_preserves_identifier_and_owner() {
        let service = test_service();
        let session = test_session();
        let created = service.create_record(&session, groceries(120.0)).unwrap();

        let updated = service
            .update_record(
                &session,
                UpdateRecordCommand {
                    record_id: created.id.clone(),
                    kind: RecordKind::Expense,
                    amount: 80.0,
                    category: "Travel".to_string(),
                    sub_category: "Gasoline".to_string(),
                    note: "road trip".to_string(),
                },
            )
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.owner_id, created.owner_id);
        assert_eq!(updated.date, created.date);
        assert_eq!(updated.amount, 80.0);
        assert_eq!(updated.category, "Travel");
        assert_eq!(updated.note, "road trip");
    }

    #[test]
    fn test_update_with_mismatched_kind_is_rejected() {
        let service = test_service();
        let session = test_session();
        let created = service
            .create_record(
                &session,
                SubmitRecordRequest {
                    kind: RecordKind::Income,
                    amount: 100.0,
                    category: "Job".to_string(),
                    sub_category: "Base Salary".to_string(),
                    note: String::new(),
                },
            )
            .unwrap();

        // The expense category table must not apply to an income record.
        let result = service.update_record(
            &session,
            UpdateRecordCommand {
                record_id: created.id.clone(),
                kind: RecordKind::Expense,
                amount: 50.0,
                category: "Food".to_string(),
                sub_category: "Groceries".to_string(),
                note: String::new(),
            },
        );
        assert!(result.is_err());

        let stored = service.list_records(&session, RecordKind::Income).unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].kind, RecordKind::Income);
        assert_eq!(stored[0].category, "Job");
        assert_eq!(stored[0].amount, 100.0);
    }

    #[test]
    fn test_update_of_foreign_record_fails() {
        let service = test_service();
        let session = test_session();
        let created = service.create_record(&session, groceries(10.0)).unwrap();

        let other = Session {
            user_id: "user-2".to_string(),
            ..test_session()
        };
        let result = service.update_record(
            &other,
            UpdateRecordCommand {
                record_id: created.id,
                kind: RecordKind::Expense,
                amount: 1.0,
                category: "Food".to_string(),
                sub_category: "Groceries".to_string(),
                note: String::new(),
            },
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_delete_removes_from_next_snapshot() {
        let service = test_service();
        let session = test_session();
        let created = service.create_record(&session, groceries(120.0)).unwrap();

        let mut subscription = service.subscribe(&session, RecordKind::Expense);
        assert_eq!(subscription.try_snapshot().unwrap().len(), 1);

        let deleted = service
            .delete_record(&session, RecordKind::Expense, &created.id)
            .unwrap();
        assert!(deleted);
        assert!(subscription.try_snapshot().unwrap().is_empty());

        let again = service
            .delete_record(&session, RecordKind::Expense, &created.id)
            .unwrap();
        assert!(!again);
    }

    #[test]
    fn test_list_scoped_to_owner() {
        let connection = Arc::new(MemoryConnection::new());
        let service = RecordService::new(Arc::clone(&connection));
        let session = test_session();
        let other = Session {
            user_id: "user-2".to_string(),
            ..test_session()
        };

        service.create_record(&session, groceries(10.0)).unwrap();
        service.create_record(&other, groceries(99.0)).unwrap();

        let mine = service.list_records(&session, RecordKind::Expense).unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].amount, 10.0);
    }
}
