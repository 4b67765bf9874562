//! Domain-level command types. These are internal to the services; the UI
//! builds them from validated form state.

pub mod records {
    use shared::RecordKind;

    /// Update of a record's mutable fields. Identifier, owner and kind are
    /// never touched by an edit.
    #[derive(Debug, Clone)]
    pub struct UpdateRecordCommand {
        pub record_id: String,
        pub kind: RecordKind,
        pub amount: f64,
        pub category: String,
        pub sub_category: String,
        pub note: String,
    }
}
