//! Application router configuration.

use axum::{
    Router,
    routing::{get, put},
};

use crate::{
    AppState, endpoints,
    ledger_page::get_ledger_page,
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, list_transactions_endpoint,
        update_transaction_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::LEDGER_VIEW, get(get_ledger_page))
        .route(
            endpoints::TRANSACTIONS_API,
            get(list_transactions_endpoint).post(create_transaction_endpoint),
        )
        .route(
            endpoints::TRANSACTION_API,
            put(update_transaction_endpoint).delete(delete_transaction_endpoint),
        )
        .with_state(state)
}
