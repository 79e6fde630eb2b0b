//! Transaction-start SQL.
//!
//! Builds the engine's `SET TRANSACTION` statement from an isolation level
//! and a wait policy. The wait policy is a sentinel-coded micro-protocol
//! preserved exactly for compatibility: `-1` waits forever, `0` never
//! waits, and a positive value waits with a lock timeout in seconds.
//! Values below `-1` are rejected rather than given invented semantics.

use crate::error::ConfigError;

/// Portable transaction isolation levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IsolationLevel {
    /// Read uncommitted; the engine has no dirty reads, so this is the
    /// record-version flavor of read committed.
    ReadUncommitted,
    /// Read committed.
    ReadCommitted,
    /// Repeatable read (snapshot).
    RepeatableRead,
    /// Serializable (snapshot with table stability).
    Serializable,
}

impl IsolationLevel {
    /// Returns the engine's isolation clause for this level.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::ReadUncommitted => "ISOLATION LEVEL READ COMMITTED RECORD_VERSION",
            Self::ReadCommitted => "ISOLATION LEVEL READ COMMITTED NO RECORD_VERSION",
            Self::RepeatableRead => "ISOLATION LEVEL SNAPSHOT",
            Self::Serializable => "ISOLATION LEVEL SNAPSHOT TABLE STABILITY",
        }
    }
}

/// Builds the transaction-start statement.
///
/// `wait_timeout` follows the engine's sentinel encoding: `-1` means wait
/// forever, `0` means no wait, and a positive value is a lock timeout in
/// seconds.
///
/// # Errors
///
/// Anything below `-1` is rejected as [`ConfigError::InvalidWaitTimeout`].
pub fn transaction_start_sql(
    isolation: IsolationLevel,
    wait_timeout: i64,
) -> Result<String, ConfigError> {
    let wait_clause = match wait_timeout {
        -1 => "WAIT".to_string(),
        0 => "NO WAIT".to_string(),
        n if n > 0 => format!("WAIT LOCK TIMEOUT {n}"),
        n => return Err(ConfigError::InvalidWaitTimeout(n)),
    };
    Ok(format!("SET TRANSACTION {} {wait_clause}", isolation.as_sql()))
}
