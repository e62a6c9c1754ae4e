#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error(
        "usage: splitledger <ledger.csv> <command> [args...]\n\
         commands: add, pay, rm, list, summary, export"
    )]
    Usage,
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    #[error("missing argument: {0}")]
    MissingArg(&'static str),
    #[error("failed to open ledger file: {0}")]
    OpenInput(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("parse error: {0}")]
    Parse(String),
}
