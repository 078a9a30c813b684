//! Defines the endpoint for listing all transactions.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    transaction::{Transaction, core::get_all_transactions},
};

/// The state needed to list transactions.
#[derive(Debug, Clone)]
pub struct ListTransactionsState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ListTransactionsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for listing all transactions as a JSON array.
///
/// Rows come back in storage order, which is not guaranteed to be
/// chronological.
pub async fn list_transactions_endpoint(
    State(state): State<ListTransactionsState>,
) -> Result<Json<Vec<Transaction>>, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    get_all_transactions(&connection).map(Json)
}

#[cfg(test)]
mod list_transactions_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::State;
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        db::initialize,
        transaction::{NewTransaction, create_transaction},
    };

    use super::{ListTransactionsState, list_transactions_endpoint};

    fn get_test_state() -> ListTransactionsState {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();

        ListTransactionsState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    #[tokio::test]
    async fn returns_empty_list_for_empty_store() {
        let state = get_test_state();

        let transactions = list_transactions_endpoint(State(state))
            .await
            .expect("Could not list transactions");

        assert!(transactions.is_empty());
    }

    #[tokio::test]
    async fn returns_all_stored_transactions() {
        let state = get_test_state();
        let want = {
            let connection = state.db_connection.lock().unwrap();
            vec![
                create_transaction(
                    NewTransaction {
                        date: date!(2024 - 01 - 01),
                        payee: "A".to_string(),
                        category: "Food".to_string(),
                        amount: 100.0,
                    },
                    &connection,
                )
                .unwrap(),
                create_transaction(
                    NewTransaction {
                        date: date!(2024 - 01 - 02),
                        payee: "B".to_string(),
                        category: "Rent".to_string(),
                        amount: -40.0,
                    },
                    &connection,
                )
                .unwrap(),
            ]
        };

        let got = list_transactions_endpoint(State(state))
            .await
            .expect("Could not list transactions");

        assert_eq!(got.0, want);
    }
}
