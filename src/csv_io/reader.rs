// ============================================================================
// Order Reader
// ============================================================================

use crate::domain::{Order, OrderKind, Side};
use crate::error::{Error, Result};
use csv::{ReaderBuilder, StringRecord, StringRecordsIntoIter, Trim};
use rust_decimal::Decimal;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use super::{CsvOptions, ORDER_COLUMNS};

const ORDER_ID: usize = 0;
const KIND: usize = 1;
const ACCOUNT_ID: usize = 2;
const DIR: usize = 3;
const PRICE: usize = 4;
const AMOUNT: usize = 5;

/// Streams orders out of delimited input.
///
/// The first record is dropped as a header when its `order_id` column is not
/// an integer. In lenient mode a malformed field becomes zero (an empty kind
/// for the `type` column) and is logged; in strict mode it ends the stream
/// with an error.
pub struct OrderReader<R> {
    records: StringRecordsIntoIter<R>,
    options: CsvOptions,
    origin: PathBuf,
    first: bool,
}

impl OrderReader<File> {
    pub fn from_path(path: impl AsRef<Path>, options: CsvOptions) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::with_origin(file, options, path.to_path_buf()))
    }
}

impl<R: Read> OrderReader<R> {
    pub fn from_reader(reader: R, options: CsvOptions) -> Self {
        Self::with_origin(reader, options, PathBuf::from("<stream>"))
    }

    fn with_origin(reader: R, options: CsvOptions, origin: PathBuf) -> Self {
        let records = ReaderBuilder::new()
            .has_headers(false)
            .delimiter(options.delimiter)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader)
            .into_records();

        Self {
            records,
            options,
            origin,
            first: true,
        }
    }

    fn is_header(record: &StringRecord) -> bool {
        record
            .get(ORDER_ID)
            .is_some_and(|raw| raw.parse::<i64>().is_err())
    }

    fn parse_record(&self, record: &StringRecord, line: u64) -> Result<Order> {
        let id = self.field(record, ORDER_ID, line, |raw| raw.parse::<i64>().ok())?;
        let kind = self.field(record, KIND, line, |raw| Some(OrderKind::parse(raw)))?;
        let account_id = self.field(record, ACCOUNT_ID, line, |raw| raw.parse::<i64>().ok())?;
        let dir = self.field(record, DIR, line, |raw| {
            raw.parse::<i64>().ok().filter(|dir| !self.options.is_strict() || *dir == 0 || *dir == 1)
        })?;
        let price = self.field(record, PRICE, line, parse_price)?;
        let quantity = self.field(record, AMOUNT, line, parse_amount)?;

        Ok(Order::new(
            id,
            kind,
            account_id,
            Side::from_wire(dir),
            price,
            quantity,
        ))
    }

    /// Parse one column, applying the configured parse mode on failure
    fn field<T, F>(&self, record: &StringRecord, index: usize, line: u64, parse: F) -> Result<T>
    where
        T: Default,
        F: FnOnce(&str) -> Option<T>,
    {
        let name = ORDER_COLUMNS[index];

        let Some(raw) = record.get(index) else {
            if self.options.is_strict() {
                return Err(Error::MissingField { line, field: name });
            }
            tracing::warn!(line, field = name, "missing column, using default");
            return Ok(T::default());
        };

        match parse(raw) {
            Some(value) => Ok(value),
            None if self.options.is_strict() => Err(Error::InvalidField {
                line,
                field: name,
                value: raw.to_string(),
            }),
            None => {
                tracing::warn!(line, field = name, value = raw, "malformed value, using default");
                Ok(T::default())
            },
        }
    }
}

impl<R: Read> Iterator for OrderReader<R> {
    type Item = Result<Order>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let record = match self.records.next()? {
                Ok(record) => record,
                Err(source) => {
                    return Some(Err(Error::Csv {
                        path: self.origin.clone(),
                        source,
                    }))
                },
            };

            if std::mem::take(&mut self.first) && Self::is_header(&record) {
                continue;
            }

            // Blank lines are skipped by the csv reader; a lone empty field is not
            if record.len() == 1 && record.get(0).is_some_and(str::is_empty) {
                continue;
            }

            let line = record.position().map_or(0, |pos| pos.line());
            return Some(self.parse_record(&record, line));
        }
    }
}

/// Decimal or scientific notation
fn parse_price(raw: &str) -> Option<Decimal> {
    raw.parse::<Decimal>()
        .ok()
        .or_else(|| Decimal::from_scientific(raw).ok())
}

/// Signed 64-bit integer that is not negative
fn parse_amount(raw: &str) -> Option<u64> {
    raw.parse::<i64>()
        .ok()
        .and_then(|amount| u64::try_from(amount).ok())
}

/// Parse all orders from any reader
pub fn parse_orders<R: Read>(reader: R, options: &CsvOptions) -> Result<Vec<Order>> {
    OrderReader::from_reader(reader, *options).collect()
}

/// Load all orders from a file
pub fn read_orders(path: impl AsRef<Path>, options: &CsvOptions) -> Result<Vec<Order>> {
    let orders = OrderReader::from_path(path.as_ref(), *options)?.collect::<Result<Vec<_>>>()?;
    tracing::info!(count = orders.len(), path = %path.as_ref().display(), "orders loaded");
    Ok(orders)
}
