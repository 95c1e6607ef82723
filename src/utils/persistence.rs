use std::{fs, path::Path};

use crate::{errors::NatilleraError, ledger::Transaction, savings::SavingsAccount};

/// Writes ledger records to disk atomically by staging to a temporary file.
pub fn save_transactions_to_file(
    transactions: &[Transaction],
    path: &Path,
) -> Result<(), NatilleraError> {
    let tmp = path.with_extension("tmp");
    let json = serde_json::to_string_pretty(transactions)?;
    fs::write(&tmp, json)?;
    fs::rename(tmp, path)?;
    tracing::debug!(count = transactions.len(), path = %path.display(), "saved ledger records");
    Ok(())
}

/// Loads a ledger export (a JSON array of records) from disk.
pub fn load_transactions_from_file(path: &Path) -> Result<Vec<Transaction>, NatilleraError> {
    let data = fs::read_to_string(path)?;
    let transactions: Vec<Transaction> = serde_json::from_str(&data)?;
    tracing::debug!(count = transactions.len(), path = %path.display(), "loaded ledger records");
    Ok(transactions)
}

/// Loads a savings account document as returned by the backend.
pub fn load_savings_from_file(path: &Path) -> Result<SavingsAccount, NatilleraError> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}
