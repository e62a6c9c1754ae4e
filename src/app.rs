use std::fs::File;
use std::io::{BufWriter, stdout};
use std::str::FromStr;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::{
    common::{error::AppError, money::Money},
    domain::{
        ledger::LedgerStore,
        transaction::{TransactionDraft, TransactionKind},
    },
    io::{export, reader, writer},
    netting,
};

/// Command-line entry point.
///
/// `splitledger <ledger.csv> <command> [args...]` — every mutating command
/// rewrites the ledger file and then prints the freshly netted summary, so
/// what the caller sees is always derived from the full current collection.
pub fn run<I, S>(args: I) -> Result<(), AppError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let args: Vec<String> = args.into_iter().map(|s| s.into()).collect();
    if args.len() < 3 {
        return Err(AppError::Usage);
    }
    let ledger_path = &args[1];
    let command = args[2].as_str();
    let rest = &args[3..];

    let mut store = load_store(ledger_path)?;
    debug!(transactions = store.transactions().len(), "ledger loaded");

    match command {
        "add" => {
            let draft = parse_expense(rest)?;
            let id = store.create(draft).id;
            info!(id, "expense recorded");
            save_store(ledger_path, &store)?;
            print_summary(&store)?;
        }
        "pay" => {
            let draft = parse_payment(rest)?;
            let id = store.create(draft).id;
            info!(id, "payment recorded");
            save_store(ledger_path, &store)?;
            print_summary(&store)?;
        }
        "rm" => {
            let raw = rest.first().ok_or(AppError::MissingArg("rm <id>"))?;
            let id: u64 = raw
                .parse()
                .map_err(|_| AppError::Parse(format!("bad id: {raw}")))?;
            if store.delete(id) {
                info!(id, "transaction deleted");
                save_store(ledger_path, &store)?;
            } else {
                warn!(id, "no transaction with that id");
            }
            print_summary(&store)?;
        }
        "list" => {
            let stdout = stdout();
            let out = BufWriter::new(stdout.lock());
            writer::write_transactions(out, store.transactions())?;
        }
        "summary" => print_summary(&store)?,
        "export" => {
            let prefix = rest
                .first()
                .ok_or(AppError::MissingArg("export <path prefix>"))?;
            let balances = netting::compute_balances(store.transactions());
            export::export_tables(prefix, store.transactions(), &balances)?;
        }
        other => return Err(AppError::UnknownCommand(other.to_string())),
    }

    Ok(())
}

fn load_store(path: &str) -> Result<LedgerStore, AppError> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path, "no ledger file yet, starting empty");
            return Ok(LedgerStore::new());
        }
        Err(e) => return Err(AppError::OpenInput(e)),
    };

    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file);

    let mut transactions = Vec::new();
    for row in reader::read_transactions(&mut rdr) {
        transactions.push(row.map_err(AppError::Parse)?);
    }
    Ok(LedgerStore::from_transactions(transactions))
}

fn save_store(path: &str, store: &LedgerStore) -> Result<(), AppError> {
    let file = File::create(path)?;
    writer::write_transactions(file, store.transactions())?;
    Ok(())
}

// Recompute from scratch over the full collection and print the balance
// table to stdout.
fn print_summary(store: &LedgerStore) -> Result<(), AppError> {
    let balances = netting::compute_balances(store.transactions());
    if balances.is_empty() {
        info!("all settled");
    }

    let stdout = stdout();
    let out = BufWriter::new(stdout.lock());
    writer::write_balances(out, &balances)?;
    Ok(())
}

fn parse_expense(args: &[String]) -> Result<TransactionDraft, AppError> {
    if args.len() < 6 {
        return Err(AppError::MissingArg(
            "add <date> <purpose> <quantity> <total> <creditor> <debtor> [share]",
        ));
    }
    let date = parse_date(&args[0])?;
    let purpose = args[1].clone();
    let quantity: u32 = args[2]
        .parse()
        .map_err(|_| AppError::Parse(format!("bad quantity: {}", args[2])))?;
    let total = parse_amount(&args[3], "total")?;
    let creditor = args[4].clone();
    let debtor = args[5].clone();
    require_parties(&creditor, &debtor)?;

    let share = match args.get(6) {
        Some(raw) => parse_amount(raw, "share")?,
        // Same default the entry form uses: half the total, to the cent.
        None => total.half_to_cent(),
    };

    Ok(TransactionDraft {
        date,
        purpose,
        quantity,
        total,
        creditor,
        debtor,
        kind: TransactionKind::Expense { share },
    })
}

fn parse_payment(args: &[String]) -> Result<TransactionDraft, AppError> {
    if args.len() < 5 {
        return Err(AppError::MissingArg(
            "pay <date> <purpose> <amount> <creditor> <debtor>",
        ));
    }
    let date = parse_date(&args[0])?;
    let purpose = args[1].clone();
    let total = parse_amount(&args[2], "amount")?;
    let creditor = args[3].clone();
    let debtor = args[4].clone();
    require_parties(&creditor, &debtor)?;

    Ok(TransactionDraft {
        date,
        purpose,
        quantity: 1,
        total,
        creditor,
        debtor,
        kind: TransactionKind::Payment,
    })
}

fn parse_date(raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| AppError::Parse(format!("bad date {raw}: {e}")))
}

fn parse_amount(raw: &str, field: &'static str) -> Result<Money, AppError> {
    let amount =
        Money::from_str(raw).map_err(|e| AppError::Parse(format!("bad {field} {raw}: {e}")))?;
    if amount < Money::zero() {
        return Err(AppError::Parse(format!("{field} must not be negative: {raw}")));
    }
    Ok(amount)
}

fn require_parties(creditor: &str, debtor: &str) -> Result<(), AppError> {
    if creditor.is_empty() || debtor.is_empty() {
        return Err(AppError::Parse("creditor and debtor are required".into()));
    }
    if creditor == debtor {
        return Err(AppError::Parse(format!(
            "creditor and debtor are both {creditor}"
        )));
    }
    Ok(())
}
