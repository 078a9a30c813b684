//! The server-rendered ledger page.
//!
//! Renders the current store contents through the client view templates: a
//! blank entry form, the balance and the transaction table.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    client::{EntryForm, FieldErrors, view},
    transaction::get_all_transactions,
};

/// The state needed to render the ledger page.
#[derive(Debug, Clone)]
pub struct LedgerPageState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for LedgerPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for the ledger page.
pub async fn get_ledger_page(State(state): State<LedgerPageState>) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let transactions = get_all_transactions(&connection)?;
    let balance = transactions
        .iter()
        .map(|transaction| transaction.amount)
        .sum();

    Ok(view::ledger_page(
        &transactions,
        balance,
        &EntryForm::new(),
        &FieldErrors::default(),
    )
    .into_response())
}
