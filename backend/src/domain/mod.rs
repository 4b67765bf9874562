//! # Domain module
//!
//! Business logic of the tracker, independent of the UI framework and of the
//! store backend:
//!
//! - **record_service**: owner-scoped create/update/delete/list/subscribe
//! - **record_form**: entry-form state machine and validation
//! - **aggregate**: pure totals, net position and chart series
//! - **profile_service**: profile reads with display-name fallback, updates
//!
//! Every operation takes the current [`shared::Session`] explicitly; nothing
//! here reads ambient auth state.

pub mod aggregate;
pub mod commands;
pub mod profile_service;
pub mod record_form;
pub mod record_service;

pub use profile_service::ProfileService;
pub use record_form::{FormMode, RecordFormError, RecordFormState, RecordFormValidation};
pub use record_service::RecordService;
