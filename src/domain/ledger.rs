use crate::domain::transaction::{Transaction, TransactionDraft};

/// Owns the ordered transaction collection and transaction identity.
///
/// The store hands the collection to the netting engine as a plain slice;
/// it never exposes ambient mutable state.
#[derive(Debug)]
pub struct LedgerStore {
    transactions: Vec<Transaction>,
    next_id: u64,
}

impl LedgerStore {
    pub fn new() -> Self {
        Self {
            transactions: Vec::new(),
            next_id: 1,
        }
    }

    /// Rebuilds a store from previously persisted records, keeping their
    /// relative order and continuing id assignment past the highest seen.
    pub fn from_transactions(transactions: Vec<Transaction>) -> Self {
        let next_id = transactions.iter().map(|t| t.id).max().map_or(1, |m| m + 1);
        Self {
            transactions,
            next_id,
        }
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Appends a new record, assigning its id, and returns the stored record.
    pub fn create(&mut self, draft: TransactionDraft) -> &Transaction {
        let id = self.next_id;
        self.next_id += 1;
        self.transactions.push(Transaction {
            id,
            date: draft.date,
            purpose: draft.purpose,
            quantity: draft.quantity,
            total: draft.total,
            creditor: draft.creditor,
            debtor: draft.debtor,
            kind: draft.kind,
        });
        self.transactions.last().expect("just pushed")
    }

    /// Removes the record with the given id. Idempotent: deleting an unknown
    /// id returns `false` and is not an error.
    pub fn delete(&mut self, id: u64) -> bool {
        let before = self.transactions.len();
        self.transactions.retain(|t| t.id != id);
        before != self.transactions.len()
    }
}

impl Default for LedgerStore {
    fn default() -> Self {
        Self::new()
    }
}
