//! Natillera Core turns a savings club's ledger exports into contribution
//! histories, due-month reminders, compounded savings projections and loan
//! installment plans.

pub mod cli;
pub mod config;
pub mod core;
pub mod currency;
pub mod errors;
pub mod ledger;
pub mod loans;
pub mod savings;
pub mod simulation;
pub mod utils;

use std::sync::Once;

pub use errors::{NatilleraError, NatilleraResult};

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Natillera Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
