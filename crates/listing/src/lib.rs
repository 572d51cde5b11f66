//! Completeness checks for an extracted Takeout export.
//!
//! Takeout ships a navigator HTML page describing every file it exported.
//! [`Listing::parse`] turns that page into a tree of expected entries and
//! [`reconcile`] compares it against what actually landed on disk.

mod consts;
pub mod error;
mod models;
mod parse;
mod reconcile;

pub use crate::models::{Entry, EntryKind, Expected, Listing, Service};
pub use crate::reconcile::{Missing, Reconciliation, ServiceReport, reconcile};
