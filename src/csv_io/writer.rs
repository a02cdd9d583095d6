// ============================================================================
// Result Writer
// ============================================================================

use crate::domain::{Account, AccountId, Ledger};
use crate::error::{Error, Result};
use csv::WriterBuilder;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::{CsvOptions, RESULT_COLUMNS};

/// One output line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountRow {
    pub account_id: AccountId,
    pub saldo: String,
    pub position: i64,
    pub turnover: String,
    pub trade_amount: u64,
}

impl AccountRow {
    pub fn new(account_id: AccountId, account: &Account) -> Self {
        Self {
            account_id,
            saldo: format_money(account.balance),
            position: account.position,
            turnover: format_money(account.turnover),
            trade_amount: account.traded_volume,
        }
    }
}

/// Two decimal places, half away from zero, never `-0.00`
pub fn format_money(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let rounded = if rounded.is_zero() {
        Decimal::ZERO
    } else {
        rounded
    };
    format!("{:.2}", rounded)
}

/// Write the header and one row per account, in ascending account order
pub fn write_ledger<W: Write>(writer: W, ledger: &Ledger, options: &CsvOptions) -> csv::Result<()> {
    let mut csv_writer = WriterBuilder::new()
        .has_headers(false)
        .delimiter(options.delimiter)
        .from_writer(writer);

    csv_writer.write_record(RESULT_COLUMNS)?;
    for (account_id, account) in ledger {
        csv_writer.serialize(AccountRow::new(*account_id, account))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Create (or truncate) `path` and write the ledger into it
pub fn write_results(path: impl AsRef<Path>, ledger: &Ledger, options: &CsvOptions) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;

    write_ledger(file, ledger, options).map_err(|source| Error::Csv {
        path: PathBuf::from(path),
        source,
    })?;

    tracing::info!(accounts = ledger.len(), path = %path.display(), "results written");
    Ok(())
}
