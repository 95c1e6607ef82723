#![allow(dead_code)]

use std::path::PathBuf;

use natillera_core::{ledger::Transaction, utils::persistence};
use tempfile::TempDir;

/// A contribution record with only a description, as the backend sends most of them.
pub fn contribution(description: &str) -> Transaction {
    Transaction::new("Aporte", description, None, 100000.0)
}

pub fn record(kind: &str, description: &str, timestamp: Option<&str>) -> Transaction {
    Transaction::new(kind, description, timestamp.map(str::to_string), 100000.0)
}

/// Writes a ledger export into a fresh temp dir; the guard must outlive the path.
pub fn write_ledger(records: &[Transaction]) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("ledger.json");
    persistence::save_transactions_to_file(records, &path).expect("write ledger export");
    (dir, path)
}
