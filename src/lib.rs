//! Shared-expense ledger with pairwise debt netting.
//!
//! `domain` holds the transaction model and the ledger store, `netting` the
//! balance computation, `io` the CSV persistence and export surfaces, and
//! `app` the command-line entry point.

pub mod app;
pub mod common;
pub mod domain;
pub mod io;
pub mod netting;
