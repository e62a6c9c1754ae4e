//! Human-facing spreadsheet export: the transaction table and the netted
//! balance table, one CSV file per table.

use std::fs::File;
use std::io::Write;

use tracing::info;

use crate::common::error::AppError;
use crate::domain::{
    balance::Balance,
    transaction::{Transaction, TransactionKind},
};
use crate::io::writer;

#[derive(serde::Serialize)]
/// Report row for the transaction table. Unlike the ledger file this is for
/// people: amounts at 2 decimal places and the kind spelled out, with
/// `amount_owed` keeping the signed form (negative for payments) so a column
/// sum per pair matches the balance table.
struct ReportRow {
    id: u64,
    date: String,
    purpose: String,
    quantity: u32,
    kind: &'static str,
    total: String,
    creditor: String,
    debtor: String,
    amount_owed: String,
}

/// Writes the transaction report table to a CSV writer.
pub fn write_transaction_report<W: Write>(
    writer: W,
    transactions: &[Transaction],
) -> Result<(), csv::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    wtr.write_record([
        "id",
        "date",
        "purpose",
        "quantity",
        "kind",
        "total",
        "creditor",
        "debtor",
        "amount_owed",
    ])?;

    for tx in transactions {
        let kind = match tx.kind {
            TransactionKind::Expense { .. } => "expense",
            TransactionKind::Payment => "payment",
        };
        let row = ReportRow {
            id: tx.id,
            date: tx.date.format("%Y-%m-%d").to_string(),
            purpose: tx.purpose.clone(),
            quantity: tx.quantity,
            kind,
            total: tx.total.to_string_2dp(),
            creditor: tx.creditor.clone(),
            debtor: tx.debtor.clone(),
            amount_owed: tx.debtor_delta().to_string_2dp(),
        };
        wtr.serialize(row)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Writes both export tables next to each other:
/// `<prefix>_transactions.csv` and `<prefix>_balances.csv`.
pub fn export_tables(
    prefix: &str,
    transactions: &[Transaction],
    balances: &[Balance],
) -> Result<(), AppError> {
    let transactions_path = format!("{prefix}_transactions.csv");
    let balances_path = format!("{prefix}_balances.csv");

    write_transaction_report(File::create(&transactions_path)?, transactions)?;
    writer::write_balances(File::create(&balances_path)?, balances)?;

    info!(
        transactions = transactions.len(),
        balances = balances.len(),
        "exported {transactions_path} and {balances_path}"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use chrono::NaiveDate;

    use super::*;
    use crate::common::money::Money;
    use crate::domain::transaction::TransactionKind;

    #[test]
    fn report_rows_spell_out_the_kind_and_round_to_cents() {
        let txs = vec![
            Transaction {
                id: 1,
                date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                purpose: "groceries".into(),
                quantity: 1,
                total: Money::from_str("33.33").unwrap(),
                creditor: "Bob".into(),
                debtor: "Alice".into(),
                kind: TransactionKind::Expense {
                    share: Money::from_str("16.67").unwrap(),
                },
            },
            Transaction {
                id: 2,
                date: NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(),
                purpose: "settle up".into(),
                quantity: 1,
                total: Money::from_str("10").unwrap(),
                creditor: "Bob".into(),
                debtor: "Alice".into(),
                kind: TransactionKind::Payment,
            },
        ];

        let mut out = Vec::new();
        write_transaction_report(&mut out, &txs).unwrap();
        let s = String::from_utf8(out).unwrap();

        let lines: Vec<&str> = s.lines().collect();
        assert_eq!(
            lines[0],
            "id,date,purpose,quantity,kind,total,creditor,debtor,amount_owed"
        );
        assert_eq!(
            lines[1],
            "1,2024-03-01,groceries,1,expense,33.33,Bob,Alice,16.67"
        );
        assert_eq!(
            lines[2],
            "2,2024-03-02,settle up,1,payment,10.00,Bob,Alice,-10.00"
        );
    }

    #[test]
    fn empty_collection_still_produces_a_header() {
        let mut out = Vec::new();
        write_transaction_report(&mut out, &[]).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "id,date,purpose,quantity,kind,total,creditor,debtor,amount_owed\n"
        );
    }
}
