//! Commands Layer
//!
//! HTTP route handlers that bridge clients to the ledger service.

mod action_cmd;
mod balance_cmd;
mod category_cmd;
mod response;

pub use action_cmd::*;
pub use balance_cmd::*;
pub use category_cmd::*;
