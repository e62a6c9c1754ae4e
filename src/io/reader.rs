use std::{io::Read, str::FromStr};

use chrono::NaiveDate;

use crate::common::money::Money;
use crate::domain::transaction::{Transaction, TransactionKind};

#[derive(serde::Deserialize)]
/// Internal CSV row representation matching the ledger file headers. Amounts
/// stay raw strings so parse failures can carry row context.
struct CsvRow {
    id: u64,
    date: String,
    purpose: String,
    quantity: u32,
    total: String,
    creditor: String,
    debtor: String,
    // signed: negative encodes a payment of the full total
    debtor_amount: String,
}

/// Reads and validates transaction rows from a CSV reader.
///
/// Supported headers:
/// `id,date,purpose,quantity,total,creditor,debtor,debtor_amount`.
/// Dates are ISO `%Y-%m-%d`. The sign of `debtor_amount` is the stored
/// encoding of the transaction kind: a negative value is a payment of the
/// full `total`, a non-negative value is an expense share. The sign is
/// resolved to an explicit kind here at the boundary and never travels
/// further into the domain.
///
/// # Examples
///
/// ```
/// use csv::ReaderBuilder;
/// use splitledger::domain::transaction::TransactionKind;
/// use splitledger::io::reader::read_transactions;
///
/// let data = "id,date,purpose,quantity,total,creditor,debtor,debtor_amount\n\
/// 1,2024-03-01,groceries,1,50.0000,Bob,Alice,25.0000\n\
/// 2,2024-03-02,settle up,1,25.0000,Bob,Alice,-25.0000\n";
/// let mut rdr = ReaderBuilder::new().from_reader(data.as_bytes());
/// let txs: Vec<_> = read_transactions(&mut rdr).collect();
///
/// assert!(matches!(
///     txs[0].as_ref().unwrap().kind,
///     TransactionKind::Expense { .. }
/// ));
/// assert!(matches!(txs[1].as_ref().unwrap().kind, TransactionKind::Payment));
/// ```
pub fn read_transactions<R: Read>(
    rdr: &mut csv::Reader<R>,
) -> impl Iterator<Item = Result<Transaction, String>> + '_ {
    rdr.deserialize::<CsvRow>().map(|res| {
        let row = res.map_err(|e| e.to_string())?;

        if row.creditor.trim().is_empty() || row.debtor.trim().is_empty() {
            return Err(format!("missing party for id {}", row.id));
        }

        let date = NaiveDate::parse_from_str(row.date.trim(), "%Y-%m-%d")
            .map_err(|e| format!("bad date for id {}: {e}", row.id))?;
        let total =
            Money::from_str(&row.total).map_err(|e| format!("bad total for id {}: {e}", row.id))?;
        let signed = Money::from_str(&row.debtor_amount)
            .map_err(|e| format!("bad debtor_amount for id {}: {e}", row.id))?;

        let kind = if signed < Money::zero() {
            TransactionKind::Payment
        } else {
            TransactionKind::Expense { share: signed }
        };

        Ok(Transaction {
            id: row.id,
            date,
            purpose: row.purpose,
            quantity: row.quantity,
            total,
            creditor: row.creditor.trim().to_string(),
            debtor: row.debtor.trim().to_string(),
            kind,
        })
    })
}
