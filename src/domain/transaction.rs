use chrono::NaiveDate;

use crate::common::money::Money;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    /// An expense fronted by the creditor; `share` is the portion the debtor
    /// owes for it (commonly half the total, but caller-settable).
    Expense { share: Money },
    /// The debtor pays the creditor the full transaction total.
    Payment,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    /// Assigned by the ledger store; only used for deletion and lookup.
    pub id: u64,
    /// Display/sort order only, never consulted by the netting engine.
    pub date: NaiveDate,
    pub purpose: String,
    /// Display only.
    pub quantity: u32,
    pub total: Money,
    /// Party owed money (for a payment, the party receiving it).
    pub creditor: String,
    /// Party owing money (for a payment, the party paying).
    pub debtor: String,
    pub kind: TransactionKind,
}

/// A transaction as entered by the caller, before the store assigns its id.
#[derive(Debug, Clone)]
pub struct TransactionDraft {
    pub date: NaiveDate,
    pub purpose: String,
    pub quantity: u32,
    pub total: Money,
    pub creditor: String,
    pub debtor: String,
    pub kind: TransactionKind,
}

impl Transaction {
    /// The signed shift this record applies to the debtor→creditor balance:
    /// positive means the debtor owes the creditor that much more, negative
    /// means less. A payment reduces the balance by the full total. This is
    /// the only fact about transaction kinds the netting engine sees.
    pub fn debtor_delta(&self) -> Money {
        match self.kind {
            TransactionKind::Expense { share } => share,
            TransactionKind::Payment => -self.total,
        }
    }
}
