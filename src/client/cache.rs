//! The client's in-memory copy of the transaction list.
//!
//! The cache is re-synchronized by merging server responses into it: append
//! after a create, replace-by-ID after an update, remove-by-ID after a
//! delete. The balance is derived by summing the cached amounts and is never
//! stored.

use crate::transaction::{Transaction, TransactionId};

/// The transactions currently known to the client, keyed by their IDs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionCache {
    transactions: Vec<Transaction>,
}

impl TransactionCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the cache contents with a freshly fetched list.
    pub fn load(&mut self, transactions: Vec<Transaction>) {
        self.transactions = transactions;
    }

    /// Add a newly created transaction to the end of the list.
    pub fn append(&mut self, transaction: Transaction) {
        self.transactions.push(transaction);
    }

    /// Swap the cached transaction with the same ID for `transaction`.
    ///
    /// A transaction whose ID is not in the cache leaves the list unchanged.
    pub fn replace(&mut self, transaction: Transaction) {
        if let Some(cached) = self
            .transactions
            .iter_mut()
            .find(|cached| cached.id == transaction.id)
        {
            *cached = transaction;
        }
    }

    /// Drop the transaction with `id` from the list, if it is present.
    pub fn remove(&mut self, id: TransactionId) {
        self.transactions.retain(|transaction| transaction.id != id);
    }

    /// Look up a cached transaction by its ID.
    pub fn get(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions
            .iter()
            .find(|transaction| transaction.id == id)
    }

    /// The cached transactions in the order the server returned them.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// The running balance: the sum of every cached amount.
    ///
    /// Recomputed on every call so it can never drift from the list.
    pub fn balance(&self) -> f64 {
        self.transactions
            .iter()
            .map(|transaction| transaction.amount)
            .sum()
    }
}

#[cfg(test)]
mod cache_tests {
    use time::macros::date;

    use crate::transaction::Transaction;

    use super::TransactionCache;

    fn transaction(id: i64, amount: f64) -> Transaction {
        Transaction {
            id,
            date: date!(2024 - 01 - 01),
            payee: "A".to_string(),
            category: "Food".to_string(),
            amount,
        }
    }

    #[test]
    fn balance_is_the_sum_of_all_amounts() {
        let mut cache = TransactionCache::new();
        cache.load(vec![transaction(1, 100.0), transaction(2, -40.0)]);

        assert_eq!(cache.balance(), 60.0);
    }

    #[test]
    fn balance_of_an_empty_cache_is_zero() {
        let cache = TransactionCache::new();

        assert_eq!(cache.balance(), 0.0);
    }

    #[test]
    fn append_changes_balance_by_the_new_amount() {
        let mut cache = TransactionCache::new();
        cache.load(vec![transaction(1, 100.0), transaction(2, -40.0)]);

        cache.append(transaction(3, -60.0));

        assert_eq!(cache.balance(), 0.0);
        assert_eq!(cache.transactions().len(), 3);
    }

    #[test]
    fn replace_changes_balance_by_the_amount_delta() {
        let mut cache = TransactionCache::new();
        cache.load(vec![transaction(1, 100.0), transaction(2, -40.0)]);

        cache.replace(transaction(2, -10.0));

        assert_eq!(cache.balance(), 90.0);
        assert_eq!(cache.transactions().len(), 2);
    }

    #[test]
    fn replace_with_unknown_id_leaves_the_list_unchanged() {
        let mut cache = TransactionCache::new();
        cache.load(vec![transaction(1, 100.0)]);

        cache.replace(transaction(99, -10.0));

        assert_eq!(cache.balance(), 100.0);
        assert_eq!(cache.transactions().len(), 1);
    }

    #[test]
    fn remove_changes_balance_by_the_removed_amount() {
        let mut cache = TransactionCache::new();
        cache.load(vec![transaction(1, 100.0), transaction(2, -40.0)]);

        cache.remove(1);

        assert_eq!(cache.balance(), -40.0);
        assert_eq!(cache.get(1), None);
    }

    #[test]
    fn remove_of_unknown_id_is_a_no_op() {
        let mut cache = TransactionCache::new();
        cache.load(vec![transaction(1, 100.0)]);

        cache.remove(99);

        assert_eq!(cache.transactions().len(), 1);
    }
}
