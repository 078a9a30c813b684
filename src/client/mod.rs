//! The browser side of the ledger, implemented as plain Rust.
//!
//! [LedgerClient] mirrors what the page in the browser does: it keeps an
//! in-memory copy of the transaction list ([TransactionCache]), drives the
//! two-mode entry form ([EntryForm]) and derives the running balance from
//! the cache. Submitting does not touch the network directly; a successful
//! validation pass yields a [SubmitAction] for the caller to dispatch, and
//! the server's response is merged back in with [LedgerClient::commit_saved]
//! or [LedgerClient::commit_deleted].

mod cache;
mod form;
pub mod view;

pub use cache::TransactionCache;
pub use form::{EntryForm, FieldErrors, FormMode};

use maud::Markup;

use crate::transaction::{NewTransaction, Transaction, TransactionId};

/// The request a successful form submission asks the caller to send.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitAction {
    /// POST the fields to create a new transaction.
    Create(NewTransaction),
    /// PUT the fields over the transaction with this ID.
    Update(TransactionId, NewTransaction),
}

/// The state of one browser session: the cached list, the entry form and the
/// current validation errors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LedgerClient {
    /// The in-memory copy of the transaction list.
    pub cache: TransactionCache,
    /// The transaction entry form.
    pub form: EntryForm,
    /// The field errors from the most recent submit attempt.
    pub errors: FieldErrors,
}

impl LedgerClient {
    /// Create a session with an empty cache and a blank create-mode form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the transaction list fetched when the page loads.
    pub fn load(&mut self, transactions: Vec<Transaction>) {
        self.cache.load(transactions);
    }

    /// The running balance derived from the cached list.
    pub fn balance(&self) -> f64 {
        self.cache.balance()
    }

    /// Load the cached transaction with `id` into the form and switch it to
    /// edit mode. Returns false and leaves the form alone if the ID is not in
    /// the cache.
    pub fn begin_edit(&mut self, id: TransactionId) -> bool {
        let Some(transaction) = self.cache.get(id).cloned() else {
            return false;
        };

        self.form.begin_edit(&transaction);
        self.errors = FieldErrors::default();
        true
    }

    /// Throw away the edit in progress and return the form to create mode.
    pub fn cancel_edit(&mut self) {
        self.form.reset();
        self.errors = FieldErrors::default();
    }

    /// Validate the form against the current balance.
    ///
    /// On success the field errors are cleared and the request to dispatch is
    /// returned. On failure the errors are kept for rendering and `None` is
    /// returned; nothing should be sent to the server.
    pub fn submit(&mut self) -> Option<SubmitAction> {
        match self.form.validate(self.cache.balance()) {
            Ok(fields) => {
                self.errors = FieldErrors::default();
                Some(match self.form.mode {
                    FormMode::Create => SubmitAction::Create(fields),
                    FormMode::Edit(id) => SubmitAction::Update(id, fields),
                })
            }
            Err(errors) => {
                self.errors = errors;
                None
            }
        }
    }

    /// Merge the transaction the server returned for a successful submit.
    ///
    /// In create mode the transaction is appended, in edit mode it replaces
    /// the cached row with the same ID. Either way the form resets to a blank
    /// create-mode form.
    pub fn commit_saved(&mut self, transaction: Transaction) {
        match self.form.mode {
            FormMode::Create => self.cache.append(transaction),
            FormMode::Edit(_) => self.cache.replace(transaction),
        }
        self.form.reset();
        self.errors = FieldErrors::default();
    }

    /// Drop the row with `id` after the server acknowledged its deletion.
    pub fn commit_deleted(&mut self, id: TransactionId) {
        self.cache.remove(id);
    }

    /// Render the page for the current session state.
    ///
    /// The balance is recomputed from the cache on every render.
    pub fn render(&self) -> Markup {
        view::ledger_page(
            self.cache.transactions(),
            self.cache.balance(),
            &self.form,
            &self.errors,
        )
    }
}
