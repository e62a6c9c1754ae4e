use crate::common::money::Money;

/// A single netted debt: `debtor` owes `creditor` `amount`.
///
/// Balances are derived, never stored; they are recomputed from the full
/// transaction collection on every query and discarded after use. For any
/// two parties at most one direction is ever present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Balance {
    pub debtor: String,
    pub creditor: String,
    pub amount: Money,
}
