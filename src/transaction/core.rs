//! Defines the core data model and database queries for transactions.

use rusqlite::{Connection, Row, params_from_iter, types::Value};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::Error;

// ============================================================================
// MODELS
// ============================================================================

/// Alias for the integer type used for mapping to database IDs.
pub type TransactionId = i64;

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// Negative amounts are expenses, non-negative amounts are credits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// When the transaction happened.
    pub date: Date,
    /// Who the money went to or came from.
    pub payee: String,
    /// The spending category the transaction belongs to, e.g. "Groceries".
    pub category: String,
    /// The amount of money spent or earned in this transaction.
    pub amount: f64,
}

/// The fields of a transaction before it has been given an ID by the store.
///
/// This is both the body of a create request and the payload the client form
/// produces after validation.
///
/// Note that the server does not check `payee` and `category` for emptiness,
/// that check belongs to the client form (see [crate::client::EntryForm]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    /// When the transaction happened.
    pub date: Date,
    /// Who the money went to or came from.
    pub payee: String,
    /// The spending category the transaction belongs to.
    pub category: String,
    /// The amount of money spent or earned in this transaction.
    pub amount: f64,
}

/// The fields to overwrite in an update request. Fields left out are kept as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionPatch {
    /// The new date, if it should change.
    pub date: Option<Date>,
    /// The new payee, if it should change.
    pub payee: Option<String>,
    /// The new category, if it should change.
    pub category: Option<String>,
    /// The new amount, if it should change.
    pub amount: Option<f64>,
}

impl From<NewTransaction> for TransactionPatch {
    fn from(fields: NewTransaction) -> Self {
        Self {
            date: Some(fields.date),
            payee: Some(fields.payee),
            category: Some(fields.category),
            amount: Some(fields.amount),
        }
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create a new transaction in the database and return it with its generated ID.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn create_transaction(
    fields: NewTransaction,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(
            "INSERT INTO \"transaction\" (date, payee, category, amount)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING id, date, payee, category, amount",
        )?
        .query_row(
            (fields.date, fields.payee, fields.category, fields.amount),
            map_transaction_row,
        )?;

    Ok(transaction)
}

/// Retrieve a transaction from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid transaction,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn get_transaction(id: TransactionId, connection: &Connection) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare("SELECT id, date, payee, category, amount FROM \"transaction\" WHERE id = :id")?
        .query_one(&[(":id", &id)], map_transaction_row)?;

    Ok(transaction)
}

/// Retrieve all transactions from the database in storage order.
///
/// Storage order is the order rows were inserted, which is not guaranteed to
/// be chronological.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn get_all_transactions(connection: &Connection) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare("SELECT id, date, payee, category, amount FROM \"transaction\"")?
        .query_map([], map_transaction_row)?
        .map(|maybe_transaction| maybe_transaction.map_err(|error| error.into()))
        .collect()
}

/// Overwrite the fields set in `patch` on the transaction with `id` and return
/// the updated row. Fields left out of the patch keep their stored values.
///
/// # Errors
/// This function will return a:
/// - [Error::UpdateMissingTransaction] if `id` does not refer to a valid transaction,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn update_transaction(
    id: TransactionId,
    patch: TransactionPatch,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let mut set_clauses = vec![];
    let mut parameters = vec![];

    if let Some(date) = patch.date {
        set_clauses.push(format!("date = ?{}", parameters.len() + 1));
        parameters.push(Value::Text(date.to_string()));
    }

    if let Some(payee) = patch.payee {
        set_clauses.push(format!("payee = ?{}", parameters.len() + 1));
        parameters.push(Value::Text(payee));
    }

    if let Some(category) = patch.category {
        set_clauses.push(format!("category = ?{}", parameters.len() + 1));
        parameters.push(Value::Text(category));
    }

    if let Some(amount) = patch.amount {
        set_clauses.push(format!("amount = ?{}", parameters.len() + 1));
        parameters.push(Value::Real(amount));
    }

    // An empty patch changes nothing, so just return the stored row.
    if set_clauses.is_empty() {
        return match get_transaction(id, connection) {
            Err(Error::NotFound) => Err(Error::UpdateMissingTransaction),
            result => result,
        };
    }

    parameters.push(Value::Integer(id));
    let query_string = format!(
        "UPDATE \"transaction\" SET {} WHERE id = ?{}",
        set_clauses.join(", "),
        parameters.len()
    );

    let rows_affected =
        connection.execute(&query_string, params_from_iter(parameters.iter()))?;

    if rows_affected == 0 {
        return Err(Error::UpdateMissingTransaction);
    }

    get_transaction(id, connection)
}

/// The number of rows changed by a write query.
pub type RowsAffected = usize;

/// Delete the transaction with `id` if it exists.
///
/// Deleting an ID that is not in the database is not an error, the call
/// reports zero affected rows and the database is left unchanged.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn delete_transaction(
    id: TransactionId,
    connection: &Connection,
) -> Result<RowsAffected, Error> {
    connection
        .execute(
            "DELETE FROM \"transaction\" WHERE id = :id",
            &[(":id", &id)],
        )
        .map_err(|error| error.into())
}

/// Get the total number of transactions in the database.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is some SQL error.
#[cfg(test)]
pub fn count_transactions(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM \"transaction\";", [], |row| {
            row.get(0)
        })
        .map_err(|error| error.into())
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                date TEXT NOT NULL,
                payee TEXT NOT NULL,
                category TEXT NOT NULL,
                amount REAL NOT NULL
                )",
        (),
    )?;

    // Ensure the sequence starts at 1
    connection.execute(
        "INSERT OR IGNORE INTO sqlite_sequence (name, seq) VALUES ('transaction', 0)",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let date = row.get(1)?;
    let payee = row.get(2)?;
    let category = row.get(3)?;
    let amount = row.get(4)?;

    Ok(Transaction {
        id,
        date,
        payee,
        category,
        amount,
    })
}

// ============================================================================
// TESTS
// ============================================================================
