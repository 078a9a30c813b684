//! Defines the endpoint for creating a new transaction.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde_json::json;

use crate::{
    AppState,
    transaction::{NewTransaction, core::create_transaction},
};

/// The state needed to create a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for creating a new transaction from a JSON body.
///
/// The body is trusted as-is beyond JSON typing: the client form is the only
/// place payee and category emptiness is checked.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    Json(new_transaction): Json<NewTransaction>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return save_failed_response();
        }
    };

    match create_transaction(new_transaction, &connection) {
        Ok(transaction) => (StatusCode::OK, Json(transaction)).into_response(),
        Err(error) => {
            tracing::error!("Could not save transaction: {error}");
            save_failed_response()
        }
    }
}

fn save_failed_response() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Failed to save transaction" })),
    )
        .into_response()
}
