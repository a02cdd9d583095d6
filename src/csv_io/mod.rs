// ============================================================================
// CSV I/O Module
// Boundary adapter: orders in, account settlement rows out
// ============================================================================

mod reader;
mod writer;

pub use reader::{parse_orders, read_orders, OrderReader};
pub use writer::{format_money, write_ledger, write_results, AccountRow};

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Input column names, in file order
pub const ORDER_COLUMNS: [&str; 6] = ["order_id", "type", "account_id", "dir", "price", "amount"];

/// Output column names, in file order
pub const RESULT_COLUMNS: [&str; 5] = ["account_id", "saldo", "position", "turnover", "trade_amount"];

/// How malformed input fields are handled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParseMode {
    /// Coerce the field to zero (or an unknown kind) and keep going
    #[default]
    Lenient,
    /// Abort the batch on the first malformed field
    Strict,
}

/// Options shared by the order reader and the result writer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvOptions {
    pub delimiter: u8,
    pub parse_mode: ParseMode,
}

impl CsvOptions {
    pub fn new() -> Self {
        Self {
            delimiter: b',',
            parse_mode: ParseMode::Lenient,
        }
    }

    /// Builder method: Set the field delimiter (single ASCII character)
    pub fn with_delimiter(mut self, delimiter: char) -> Result<Self> {
        if !delimiter.is_ascii() || delimiter == '"' || delimiter == '\n' || delimiter == '\r' {
            return Err(Error::InvalidDelimiter(delimiter));
        }
        self.delimiter = delimiter as u8;
        Ok(self)
    }

    /// Builder method: Set the parse mode
    pub fn with_parse_mode(mut self, parse_mode: ParseMode) -> Self {
        self.parse_mode = parse_mode;
        self
    }

    pub fn is_strict(&self) -> bool {
        self.parse_mode == ParseMode::Strict
    }
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = CsvOptions::default();
        assert_eq!(options.delimiter, b',');
        assert!(!options.is_strict());
    }

    #[test]
    fn test_delimiter_validation() {
        assert_eq!(
            CsvOptions::new().with_delimiter(';').unwrap().delimiter,
            b';'
        );
        assert!(CsvOptions::new().with_delimiter('\t').is_ok());
        assert!(matches!(
            CsvOptions::new().with_delimiter('§'),
            Err(Error::InvalidDelimiter('§'))
        ));
        assert!(CsvOptions::new().with_delimiter('"').is_err());
    }
}
