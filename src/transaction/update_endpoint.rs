//! Defines the endpoint for updating an existing transaction.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde_json::json;

use crate::{
    AppState, Error,
    transaction::{TransactionId, TransactionPatch, core::update_transaction},
};

/// The state needed to update a transaction.
#[derive(Debug, Clone)]
pub struct UpdateTransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for UpdateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for updating the transaction with `transaction_id`.
///
/// The JSON body may contain any subset of the four transaction fields;
/// fields that are present overwrite the stored values, fields that are
/// absent are kept.
pub async fn update_transaction_endpoint(
    State(state): State<UpdateTransactionState>,
    Path(transaction_id): Path<TransactionId>,
    Json(patch): Json<TransactionPatch>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return update_failed_response();
        }
    };

    match update_transaction(transaction_id, patch, &connection) {
        Ok(transaction) => (StatusCode::OK, Json(transaction)).into_response(),
        Err(Error::UpdateMissingTransaction) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Transaction not found" })),
        )
            .into_response(),
        Err(error) => {
            tracing::error!("Could not update transaction {transaction_id}: {error}");
            update_failed_response()
        }
    }
}

fn update_failed_response() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Failed to update transaction" })),
    )
        .into_response()
}
