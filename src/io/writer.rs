use std::io::Write;

use crate::domain::{balance::Balance, transaction::Transaction};

#[derive(serde::Serialize)]
/// Internal CSV output row matching the ledger file headers.
///
/// Headers written (in this order):
/// `id,date,purpose,quantity,total,creditor,debtor,debtor_amount`.
/// Monetary fields are exact 4-decimal strings; `debtor_amount` carries the
/// signed encoding (negative for payments) so the file round-trips through
/// the reader without loss.
struct LedgerRow {
    id: u64,
    date: String,
    purpose: String,
    quantity: u32,
    total: String,
    creditor: String,
    debtor: String,
    debtor_amount: String,
}

/// Writes the transaction collection to a CSV writer in collection order.
///
/// Collection order is authoritative for the ledger file: the store relies
/// on it surviving a round-trip unchanged.
///
/// # Errors
///
/// Returns a `csv::Error` if writing/serializing any row fails.
pub fn write_transactions<W: Write>(
    writer: W,
    transactions: &[Transaction],
) -> Result<(), csv::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    // Header is written explicitly so an empty collection still produces a
    // parseable file.
    wtr.write_record([
        "id",
        "date",
        "purpose",
        "quantity",
        "total",
        "creditor",
        "debtor",
        "debtor_amount",
    ])?;

    for tx in transactions {
        let row = LedgerRow {
            id: tx.id,
            date: tx.date.format("%Y-%m-%d").to_string(),
            purpose: tx.purpose.clone(),
            quantity: tx.quantity,
            total: tx.total.to_string_4dp(),
            creditor: tx.creditor.clone(),
            debtor: tx.debtor.clone(),
            debtor_amount: tx.debtor_delta().to_string_4dp(),
        };
        wtr.serialize(row)?;
    }

    wtr.flush()?;
    Ok(())
}

#[derive(serde::Serialize)]
struct BalanceRow {
    debtor: String,
    creditor: String,
    amount: String,
}

/// Writes netted balances to a CSV writer, amounts at 2 decimal places.
///
/// Rows are written in the given order; the netting engine already returns
/// them sorted by `(debtor, creditor)`, so output is deterministic. A
/// settled ledger produces only the header row.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
///
/// use splitledger::common::money::Money;
/// use splitledger::domain::balance::Balance;
/// use splitledger::io::writer::write_balances;
///
/// let balances = vec![Balance {
///     debtor: "Alice".into(),
///     creditor: "Bob".into(),
///     amount: Money::from_str("20").unwrap(),
/// }];
///
/// let mut out = Vec::new();
/// write_balances(&mut out, &balances).unwrap();
/// assert_eq!(
///     String::from_utf8(out).unwrap(),
///     "debtor,creditor,amount\nAlice,Bob,20.00\n"
/// );
/// ```
pub fn write_balances<W: Write>(writer: W, balances: &[Balance]) -> Result<(), csv::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    // A settled ledger still gets the header row.
    wtr.write_record(["debtor", "creditor", "amount"])?;

    for balance in balances {
        let row = BalanceRow {
            debtor: balance.debtor.clone(),
            creditor: balance.creditor.clone(),
            amount: balance.amount.to_string_2dp(),
        };
        wtr.serialize(row)?;
    }

    wtr.flush()?;
    Ok(())
}
