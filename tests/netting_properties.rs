use std::collections::HashMap;

use chrono::NaiveDate;
use proptest::prelude::*;

use splitledger::common::money::Money;
use splitledger::domain::ledger::LedgerStore;
use splitledger::domain::transaction::{Transaction, TransactionKind};
use splitledger::netting::compute_balances;

const NAMES: [&str; 4] = ["Alice", "Bob", "Carol", "Dana"];
const EPSILON_UNITS: i64 = 100;

// Row shape: (debtor index, creditor index, amount in 1/10_000 units, is_payment).
fn build(rows: &[(usize, usize, i64, bool)]) -> Vec<Transaction> {
    rows.iter()
        .enumerate()
        .map(|(i, &(debtor, creditor, units, is_payment))| {
            let amount = Money::new(units);
            Transaction {
                id: i as u64 + 1,
                date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                purpose: "generated".into(),
                quantity: 1,
                total: if is_payment { amount } else { amount + amount },
                creditor: NAMES[creditor].into(),
                debtor: NAMES[debtor].into(),
                kind: if is_payment {
                    TransactionKind::Payment
                } else {
                    TransactionKind::Expense { share: amount }
                },
            }
        })
        .collect()
}

fn tx_rows() -> impl Strategy<Value = Vec<(usize, usize, i64, bool)>> {
    proptest::collection::vec(
        (0usize..4, 0usize..4, 1i64..1_000_000, any::<bool>()).prop_filter(
            "parties must differ",
            |(debtor, creditor, _, _)| debtor != creditor,
        ),
        0..40,
    )
}

proptest! {
    #[test]
    fn netting_is_order_independent(
        (original, shuffled) in tx_rows().prop_flat_map(|rows| {
            (Just(rows.clone()), Just(rows).prop_shuffle())
        })
    ) {
        prop_assert_eq!(
            compute_balances(&build(&original)),
            compute_balances(&build(&shuffled))
        );
    }

    #[test]
    fn survivors_match_direction_adjusted_pair_sums(rows in tx_rows()) {
        let txs = build(&rows);
        let balances = compute_balances(&txs);

        // Net per unordered pair, oriented lexicographically.
        let mut nets: HashMap<(&str, &str), i64> = HashMap::new();
        for t in &txs {
            let delta = t.debtor_delta().as_i64();
            let (key, signed) = if t.debtor <= t.creditor {
                ((t.debtor.as_str(), t.creditor.as_str()), delta)
            } else {
                ((t.creditor.as_str(), t.debtor.as_str()), -delta)
            };
            *nets.entry(key).or_insert(0) += signed;
        }

        let lookup: HashMap<(&str, &str), i64> = balances
            .iter()
            .map(|b| ((b.debtor.as_str(), b.creditor.as_str()), b.amount.as_i64()))
            .collect();

        let mut expected_len = 0usize;
        for (&(a, b), &net) in &nets {
            if net > EPSILON_UNITS {
                expected_len += 1;
                prop_assert_eq!(lookup.get(&(a, b)).copied(), Some(net));
                prop_assert!(!lookup.contains_key(&(b, a)));
            } else if net < -EPSILON_UNITS {
                expected_len += 1;
                prop_assert_eq!(lookup.get(&(b, a)).copied(), Some(-net));
                prop_assert!(!lookup.contains_key(&(a, b)));
            } else {
                // Settled within epsilon: neither direction may surface.
                prop_assert!(!lookup.contains_key(&(a, b)));
                prop_assert!(!lookup.contains_key(&(b, a)));
            }
        }
        prop_assert_eq!(balances.len(), expected_len);
    }

    #[test]
    fn no_pair_keeps_both_directions(rows in tx_rows()) {
        let balances = compute_balances(&build(&rows));
        for b in &balances {
            let reversed = balances
                .iter()
                .any(|o| o.debtor == b.creditor && o.creditor == b.debtor);
            prop_assert!(!reversed, "both directions survived for {} and {}", b.debtor, b.creditor);
        }
    }

    #[test]
    fn deleting_then_recomputing_matches_a_fresh_ledger(
        (rows, victim) in tx_rows()
            .prop_filter("need at least one row", |rows| !rows.is_empty())
            .prop_flat_map(|rows| {
                let len = rows.len();
                (Just(rows), 0..len)
            })
    ) {
        let txs = build(&rows);
        let mut store = LedgerStore::from_transactions(txs.clone());
        let victim_id = txs[victim].id;
        prop_assert!(store.delete(victim_id));

        let mut surviving = txs;
        surviving.remove(victim);
        prop_assert_eq!(
            compute_balances(store.transactions()),
            compute_balances(&surviving)
        );
    }
}
