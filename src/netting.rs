use std::collections::HashMap;

use crate::{
    common::money::Money,
    domain::{balance::Balance, transaction::Transaction},
};

/// Folds the transaction collection into net pairwise balances.
///
/// The accumulator is keyed by the directional pair `(debtor, creditor)`.
/// Each transaction adds its signed delta to the forward key, and the
/// unordered pair is re-netted immediately, so after every prefix of the
/// input at most one direction per pair is positive. The surviving entry for
/// a pair always equals the direction-adjusted sum of every delta recorded
/// between the two parties, which makes the result independent of input
/// order and identical to a single final summation per pair.
///
/// Pairs whose net amount does not exceed 0.01 are settled and omitted, as
/// are self-referential rows (`debtor == creditor`). Balances never net
/// across parties that did not transact directly with each other.
///
/// Pure function: no state is carried between calls.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
///
/// use chrono::NaiveDate;
/// use splitledger::common::money::Money;
/// use splitledger::domain::transaction::{Transaction, TransactionKind};
/// use splitledger::netting::compute_balances;
///
/// let tx = Transaction {
///     id: 1,
///     date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
///     purpose: "groceries".into(),
///     quantity: 1,
///     total: Money::from_str("50").unwrap(),
///     creditor: "Bob".into(),
///     debtor: "Alice".into(),
///     kind: TransactionKind::Expense {
///         share: Money::from_str("25").unwrap(),
///     },
/// };
///
/// let balances = compute_balances(&[tx]);
/// assert_eq!(balances.len(), 1);
/// assert_eq!(balances[0].debtor, "Alice");
/// assert_eq!(balances[0].creditor, "Bob");
/// assert_eq!(balances[0].amount, Money::from_str("25").unwrap());
/// ```
pub fn compute_balances(transactions: &[Transaction]) -> Vec<Balance> {
    let mut net: HashMap<(String, String), Money> = HashMap::new();

    for tx in transactions {
        let forward = (tx.debtor.clone(), tx.creditor.clone());
        let reverse = (tx.creditor.clone(), tx.debtor.clone());

        let f = net.get(&forward).copied().unwrap_or_default() + tx.debtor_delta();
        let r = net.get(&reverse).copied().unwrap_or_default();

        // Re-net the pair right away: offset the opposing entries so that at
        // most one direction stays positive after every transaction. For a
        // self-referential pair both inserts hit the same key and it zeroes.
        let owed = f - r;
        if owed >= Money::zero() {
            net.insert(forward, owed);
            net.insert(reverse, Money::zero());
        } else {
            net.insert(forward, Money::zero());
            net.insert(reverse, -owed);
        }
    }

    let mut balances: Vec<Balance> = net
        .into_iter()
        .filter(|((debtor, creditor), amount)| *amount > Money::EPSILON && debtor != creditor)
        .map(|((debtor, creditor), amount)| Balance {
            debtor,
            creditor,
            amount,
        })
        .collect();

    // Deterministic output: sort by debtor, then creditor.
    balances.sort_by(|a, b| {
        (a.debtor.as_str(), a.creditor.as_str()).cmp(&(b.debtor.as_str(), b.creditor.as_str()))
    });

    balances
}
