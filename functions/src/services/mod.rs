//! Services Layer
//!
//! Ledger flows built on the repositories.

mod ledger;

pub use ledger::{AddActionRequest, CreateCategoryRequest, LedgerError, LedgerService};
