//! # PennyFlow client core
//!
//! UI-agnostic logic for the expense/income tracker. The hosted services the
//! app delegates to (identity provider, document store with live queries) are
//! represented as trait boundaries here, so the Yew frontend and the tests
//! work against the same contracts:
//!
//! - **auth**: sign-in / sign-up / password reset / OAuth popup and the
//!   session they produce
//! - **store**: owner-scoped collections with full-snapshot live
//!   subscriptions
//! - **domain**: record CRUD, entry-form validation and the pure aggregates
//!   behind the charts
//!
//! Nothing in this crate touches the DOM; it compiles for wasm and native
//! targets alike.

pub mod auth;
pub mod domain;
pub mod store;
