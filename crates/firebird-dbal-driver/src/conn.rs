//! External collaborator interfaces.
//!
//! The wire protocol is not implemented here. Everything I/O-bearing in this
//! crate talks to an injected [`Connection`], and a [`ConnectionFactory`]
//! opens one from a native connect string. The traits are synchronous: the
//! caller blocks until a result set is materialized, and cancellation and
//! timeouts belong entirely to the collaborator behind the trait.

use crate::connect::ConnectionParams;
use crate::error::Result;

/// A scalar value in a result-set row.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// SQL NULL.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating point value.
    Float(f64),
    /// Character value.
    Str(String),
    /// Binary value.
    Bytes(Vec<u8>),
}

impl Value {
    /// Returns whether this value is NULL.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the integer value, if this is one.
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the string value, if this is one.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Returns the boolean value, if this is one.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

/// A fully materialized result set.
///
/// Rows are held in catalog-native order; callers relying on positional
/// correspondence read them through [`Rows::fetch_numeric`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Rows {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Rows {
    /// Creates a result set from column names and row values.
    #[must_use]
    pub const fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        Self { columns, rows }
    }

    /// Creates an empty result set.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Returns the column names.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns whether the result set has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the 0-based index of a column by name (case-insensitive).
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| c.eq_ignore_ascii_case(name))
    }

    /// Iterates rows positionally.
    pub fn fetch_numeric(&self) -> impl Iterator<Item = &[Value]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Iterates rows as `(column name, value)` pairs.
    pub fn fetch_associative(&self) -> impl Iterator<Item = Vec<(&str, &Value)>> {
        self.rows.iter().map(|row| {
            self.columns
                .iter()
                .map(String::as_str)
                .zip(row.iter())
                .collect()
        })
    }

    /// Returns the first value of the first row, if any.
    #[must_use]
    pub fn fetch_one(&self) -> Option<&Value> {
        self.rows.first().and_then(|row| row.first())
    }

    /// Returns a named value from a positional row.
    #[must_use]
    pub fn value<'a>(&self, row: &'a [Value], column: &str) -> Option<&'a Value> {
        self.column_index(column).and_then(|i| row.get(i))
    }
}

/// A prepared statement handle.
pub trait Statement {
    /// Executes the statement with positionally bound values.
    fn execute(&mut self, params: &[Value]) -> Result<Rows>;
}

/// An opaque engine connection.
///
/// Transaction serialization of concurrent schema changes is this
/// collaborator's responsibility; the dialect engine issues statements
/// strictly sequentially and never synchronizes internally.
pub trait Connection {
    /// Executes a statement and returns the affected row count.
    fn execute(&mut self, sql: &str) -> Result<u64>;

    /// Runs a query and materializes its result set.
    fn query(&mut self, sql: &str) -> Result<Rows>;

    /// Prepares a statement for repeated execution.
    fn prepare(&mut self, sql: &str) -> Result<Box<dyn Statement>>;

    /// Starts a transaction.
    fn begin_transaction(&mut self) -> Result<()>;

    /// Commits the current transaction.
    fn commit(&mut self) -> Result<()>;

    /// Rolls back the current transaction.
    fn rollback(&mut self) -> Result<()>;

    /// Returns the last value drawn from a sequence.
    fn last_insert_id(&mut self, sequence: &str) -> Result<i64>;

    /// Returns the raw server version string.
    fn server_version(&self) -> &str;

    /// Fallback identifier quoting when no platform is at hand.
    fn quote_identifier(&self, identifier: &str) -> String {
        format!("\"{}\"", identifier.replace('"', "\"\""))
    }

    /// Fallback string-literal quoting when no platform is at hand.
    fn quote_string_literal(&self, value: &str) -> String {
        format!("'{}'", value.replace('\'', "''"))
    }
}

impl Connection for Box<dyn Connection> {
    fn execute(&mut self, sql: &str) -> Result<u64> {
        (**self).execute(sql)
    }

    fn query(&mut self, sql: &str) -> Result<Rows> {
        (**self).query(sql)
    }

    fn prepare(&mut self, sql: &str) -> Result<Box<dyn Statement>> {
        (**self).prepare(sql)
    }

    fn begin_transaction(&mut self) -> Result<()> {
        (**self).begin_transaction()
    }

    fn commit(&mut self) -> Result<()> {
        (**self).commit()
    }

    fn rollback(&mut self) -> Result<()> {
        (**self).rollback()
    }

    fn last_insert_id(&mut self, sequence: &str) -> Result<i64> {
        (**self).last_insert_id(sequence)
    }

    fn server_version(&self) -> &str {
        (**self).server_version()
    }

    fn quote_identifier(&self, identifier: &str) -> String {
        (**self).quote_identifier(identifier)
    }

    fn quote_string_literal(&self, value: &str) -> String {
        (**self).quote_string_literal(value)
    }
}

/// Opens connections from a native connect string.
pub trait ConnectionFactory {
    /// Opens a connection.
    fn open(&self, connect_string: &str, params: &ConnectionParams) -> Result<Box<dyn Connection>>;
}
