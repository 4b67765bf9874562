//! Entry-form state machine and validation.
//!
//! The form is either creating a new record or editing an existing one;
//! submitting returns it to the blank create state. Amount, category and
//! subcategory are mandatory, and the subcategory must come from the selected
//! category's fixed list — the option list in the UI already restricts this,
//! the validation catches anything that slips past it.

use shared::{subcategory_belongs, Record, RecordKind, SubmitRecordRequest};

use crate::domain::commands::records::UpdateRecordCommand;

/// Whether a submit will create a record or update an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Creating,
    Editing { record_id: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordFormState {
    pub mode: FormMode,
    pub amount_input: String,
    pub category: String,
    pub sub_category: String,
    pub note: String,
    pub is_submitting: bool,
    pub error_message: Option<String>,
}

impl RecordFormState {
    pub fn new() -> Self {
        Self {
            mode: FormMode::Creating,
            amount_input: String::new(),
            category: String::new(),
            sub_category: String::new(),
            note: String::new(),
            is_submitting: false,
            error_message: None,
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, FormMode::Editing { .. })
    }

    /// Select a category. Any previously chosen subcategory is cleared since
    /// it belongs to the old category's list.
    pub fn select_category(&mut self, category: String) {
        self.category = category;
        self.sub_category.clear();
    }

    /// Populate the form from a table row and switch to edit mode.
    pub fn begin_edit(record: &Record) -> Self {
        Self {
            mode: FormMode::Editing {
                record_id: record.id.clone(),
            },
            amount_input: record.amount.to_string(),
            category: record.category.clone(),
            sub_category: record.sub_category.clone(),
            note: record.note.clone(),
            is_submitting: false,
            error_message: None,
        }
    }

    /// Back to a blank create form, after submit or cancel.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for RecordFormState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RecordFormError {
    MissingAmount,
    InvalidAmount(String),
    NegativeAmount,
    MissingCategory,
    MissingSubCategory,
    SubCategoryMismatch,
}

impl RecordFormError {
    /// User-facing message, shown in the blocking alert.
    pub fn message(&self) -> String {
        match self {
            RecordFormError::MissingAmount => "Please enter an amount".to_string(),
            RecordFormError::InvalidAmount(input) => {
                format!("\"{}\" is not a valid amount", input)
            }
            RecordFormError::NegativeAmount => "Amount cannot be negative".to_string(),
            RecordFormError::MissingCategory => "Please select a category".to_string(),
            RecordFormError::MissingSubCategory => "Please select a subcategory".to_string(),
            RecordFormError::SubCategoryMismatch => {
                "The subcategory does not belong to the selected category".to_string()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordFormValidation {
    pub is_valid: bool,
    pub errors: Vec<RecordFormError>,
    /// Parsed amount when the input was usable.
    pub cleaned_amount: Option<f64>,
}

impl RecordFormValidation {
    pub fn first_message(&self) -> Option<String> {
        self.errors.first().map(|e| e.message())
    }
}

/// Check the mandatory fields. Missing any one blocks submission.
pub fn validate(kind: RecordKind, state: &RecordFormState) -> RecordFormValidation {
    let mut errors = Vec::new();

    let cleaned_amount = if state.amount_input.trim().is_empty() {
        errors.push(RecordFormError::MissingAmount);
        None
    } else {
        match state.amount_input.trim().parse::<f64>() {
            Ok(amount) if amount < 0.0 => {
                errors.push(RecordFormError::NegativeAmount);
                None
            }
            Ok(amount) if !amount.is_finite() => {
                errors.push(RecordFormError::InvalidAmount(state.amount_input.clone()));
                None
            }
            Ok(amount) => Some(amount),
            Err(_) => {
                errors.push(RecordFormError::InvalidAmount(state.amount_input.clone()));
                None
            }
        }
    };

    if state.category.is_empty() {
        errors.push(RecordFormError::MissingCategory);
    }
    if state.sub_category.is_empty() {
        errors.push(RecordFormError::MissingSubCategory);
    }
    if !state.category.is_empty()
        && !state.sub_category.is_empty()
        && !subcategory_belongs(kind, &state.category, &state.sub_category)
    {
        errors.push(RecordFormError::SubCategoryMismatch);
    }

    RecordFormValidation {
        is_valid: errors.is_empty(),
        errors,
        cleaned_amount,
    }
}

/// Build the create request from a validated form.
pub fn submit_request(
    kind: RecordKind,
    state: &RecordFormState,
    cleaned_amount: f64,
) -> SubmitRecordRequest {
    SubmitRecordRequest {
        kind,
        amount: cleaned_amount,
        category: state.category.clone(),
        sub_category: state.sub_category.clone(),
        note: state.note.trim().to_string(),
    }
}

/// Build the update command from a validated form in edit mode.
pub fn update_command(
    kind: RecordKind,
    state: &RecordFormState,
    cleaned_amount: f64,
) -> Option<UpdateRecordCommand> {
    match &state.mode {
        FormMode::Editing { record_id } => Some(UpdateRecordCommand {
            record_id: record_id.clone(),
            kind,
            amount: cleaned_amount,
            category: state.category.clone(),
            sub_category: state.sub_category.clone(),
            note: state.note.trim().to_string(),
        }),
        FormMode::Creating => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_state() -> RecordFormState {
        RecordFormState {
            mode: FormMode::Creating,
            amount_input: "120".to_string(),
            category: "Food".to_string(),
            sub_category: "Groceries".to_string(),
            note: String::new(),
            is_submitting: false,
            error_message: None,
        }
    }

    #[test]
    fn test_valid_form_passes() {
        let validation = validate(RecordKind::Expense, &filled_state());
        assert!(validation.is_valid);
        assert_eq!(validation.cleaned_amount, Some(120.0));
        assert!(validation.first_message().is_none());
    }

    #[test]
    fn test_missing_fields_block_submission() {
        let mut state = filled_state();
        state.amount_input = String::new();
        state.category = String::new();
        state.sub_category = String::new();

        let validation = validate(RecordKind::Expense, &state);
        assert!(!validation.is_valid);
        assert!(validation.errors.contains(&RecordFormError::MissingAmount));
        assert!(validation.errors.contains(&RecordFormError::MissingCategory));
        assert!(validation.errors.contains(&RecordFormError::MissingSubCategory));
    }

    #[test]
    fn test_unparseable_and_negative_amounts() {
        let mut state = filled_state();
        state.amount_input = "abc".to_string();
        let validation = validate(RecordKind::Expense, &state);
        assert!(matches!(
            validation.errors[0],
            RecordFormError::InvalidAmount(_)
        ));

        state.amount_input = "-3".to_string();
        let validation = validate(RecordKind::Expense, &state);
        assert_eq!(validation.errors[0], RecordFormError::NegativeAmount);
    }

    #[test]
    fn test_subcategory_must_match_category() {
        let mut state = filled_state();
        state.sub_category = "Gasoline".to_string();
        let validation = validate(RecordKind::Expense, &state);
        assert!(!validation.is_valid);
        assert_eq!(validation.errors[0], RecordFormError::SubCategoryMismatch);
    }

    #[test]
    fn test_changing_category_clears_subcategory() {
        let mut state = filled_state();
        assert_eq!(state.sub_category, "Groceries");

        state.select_category("Travel".to_string());
        assert_eq!(state.category, "Travel");
        assert!(state.sub_category.is_empty());
    }

    #[test]
    fn test_begin_edit_populates_fields_and_mode() {
        let record = shared::Record {
            id: "r1".to_string(),
            owner_id: "user-1".to_string(),
            kind: RecordKind::Expense,
            amount: 45.5,
            category: "Travel".to_string(),
            sub_category: "Parking Fees".to_string(),
            note: "airport".to_string(),
            date: "2025-01-10T09:00:00+00:00".to_string(),
        };

        let state = RecordFormState::begin_edit(&record);
        assert!(state.is_editing());
        assert_eq!(state.amount_input, "45.5");
        assert_eq!(state.category, "Travel");
        assert_eq!(state.sub_category, "Parking Fees");
        assert_eq!(state.note, "airport");

        let command = update_command(RecordKind::Expense, &state, 45.5).unwrap();
        assert_eq!(command.record_id, "r1");
    }

    #[test]
    fn test_update_command_absent_in_create_mode() {
        let state = filled_state();
        assert!(update_command(RecordKind::Expense, &state, 120.0).is_none());

        let request = submit_request(RecordKind::Expense, &state, 120.0);
        assert_eq!(request.amount, 120.0);
        assert_eq!(request.category, "Food");
    }

    #[test]
    fn test_reset_returns_to_blank_create_form() {
        let mut state = filled_state();
        state.mode = FormMode::Editing {
            record_id: "r1".to_string(),
        };
        state.reset();
        assert_eq!(state, RecordFormState::new());
    }
}
