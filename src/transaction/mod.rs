//! Transaction management for the ledger application.
//!
//! This module contains everything related to transactions on the server side:
//! - The `Transaction` model and the `NewTransaction`/`TransactionPatch` payloads
//! - Database functions for storing, listing, updating and deleting transactions
//! - The JSON API endpoints, one per operation

pub(crate) mod core;
mod create_endpoint;
mod delete_endpoint;
mod list_endpoint;
mod update_endpoint;

pub use core::{
    NewTransaction, Transaction, TransactionId, TransactionPatch, create_transaction,
    create_transaction_table, get_all_transactions, map_transaction_row,
};
pub use create_endpoint::create_transaction_endpoint;
pub use delete_endpoint::delete_transaction_endpoint;
pub use list_endpoint::list_transactions_endpoint;
pub use update_endpoint::update_transaction_endpoint;

#[cfg(test)]
pub use core::count_transactions;
