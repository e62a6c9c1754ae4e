pub mod balance;
pub mod ledger;
pub mod transaction;
