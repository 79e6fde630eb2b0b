//! Expression building, locking, SELECT assembly, and pagination.

use tracing::debug;

use super::FirebirdPlatform;
use crate::error::PlatformError;

/// Upper bound used when a row range has a first row but no row count.
///
/// The engine's row-range clause is inclusive on both ends, so "no upper
/// bound" is expressed with the maximum representable row number.
pub const ROW_UPPER_BOUND: i64 = i64::MAX;

/// Units accepted by the date-difference builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateDiffUnit {
    /// Difference in years.
    Year,
    /// Difference in months.
    Month,
    /// Difference in days.
    Day,
    /// Difference in hours.
    Hour,
    /// Difference in minutes.
    Minute,
    /// Difference in seconds.
    Second,
}

impl DateDiffUnit {
    /// Returns the SQL keyword for the unit.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Year => "YEAR",
            Self::Month => "MONTH",
            Self::Day => "DAY",
            Self::Hour => "HOUR",
            Self::Minute => "MINUTE",
            Self::Second => "SECOND",
        }
    }
}

/// Row locking modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockMode {
    /// Pessimistic write lock.
    ForUpdate,
    /// Pessimistic write lock skipping already-locked rows.
    ForUpdateSkipLocked,
}

/// The pieces of a SELECT statement, assembled in the engine's clause
/// order. Pagination is applied last, as a textual rewrite of the fully
/// assembled statement.
#[derive(Debug, Clone, Default)]
pub struct SelectParts {
    /// Whether to emit DISTINCT.
    pub distinct: bool,
    /// Select-list expressions.
    pub columns: Vec<String>,
    /// FROM clause body (tables/joins), without the keyword.
    pub from: String,
    /// WHERE clause body, without the keyword.
    pub where_clause: Option<String>,
    /// GROUP BY expressions.
    pub group_by: Vec<String>,
    /// HAVING clause body, without the keyword.
    pub having: Option<String>,
    /// ORDER BY expressions.
    pub order_by: Vec<String>,
    /// Requested lock mode.
    pub lock: Option<LockMode>,
    /// Maximum number of rows to return.
    pub max_results: Option<u64>,
    /// Number of rows to skip (0-based offset).
    pub first_result: u64,
}

impl FirebirdPlatform {
    /// Builds a string concatenation using the engine's `||` operator.
    #[must_use]
    pub fn concat_expression(&self, parts: &[&str]) -> String {
        parts.join(" || ")
    }

    /// Builds a modulo expression; the engine has no `%` operator.
    #[must_use]
    pub fn mod_expression(&self, dividend: &str, divisor: &str) -> String {
        format!("MOD({dividend}, {divisor})")
    }

    /// Builds a date difference in the requested unit.
    #[must_use]
    pub fn date_diff_expression(&self, unit: DateDiffUnit, from: &str, to: &str) -> String {
        format!("DATEDIFF({} FROM {from} TO {to})", unit.as_sql())
    }

    /// Builds a bitwise AND; the engine uses a function form.
    #[must_use]
    pub fn bit_and_expression(&self, left: &str, right: &str) -> String {
        format!("BIN_AND({left}, {right})")
    }

    /// Builds a bitwise OR; the engine uses a function form.
    #[must_use]
    pub fn bit_or_expression(&self, left: &str, right: &str) -> String {
        format!("BIN_OR({left}, {right})")
    }

    /// Returns the locking clause for a mode.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::NotSupported`] when the tier lacks the
    /// requested mode; the platform never silently downgrades a lock.
    pub fn lock_clause(&self, mode: LockMode) -> Result<&'static str, PlatformError> {
        match mode {
            LockMode::ForUpdate => Ok("FOR UPDATE WITH LOCK"),
            LockMode::ForUpdateSkipLocked => {
                if self.capabilities().skip_locked {
                    Ok("FOR UPDATE WITH LOCK SKIP LOCKED")
                } else {
                    Err(PlatformError::NotSupported {
                        platform: self.name(),
                        operation: "SKIP LOCKED",
                    })
                }
            }
        }
    }

    /// Applies the engine's row-range pagination to an assembled statement.
    ///
    /// The engine has no LIMIT/OFFSET; `(max_results, first_result)` is
    /// translated into an inclusive 1-based `ROWS <first> TO <last>`
    /// clause. With no `max_results` the range is open-ended via
    /// [`ROW_UPPER_BOUND`]. With neither bound the statement is unchanged.
    #[must_use]
    pub fn apply_row_limit(&self, sql: &str, max_results: Option<u64>, first_result: u64) -> String {
        if max_results.is_none() && first_result == 0 {
            return sql.to_string();
        }

        let from = first_result + 1;
        let to = max_results.map_or(ROW_UPPER_BOUND, |max| {
            i64::try_from(first_result.saturating_add(max)).unwrap_or(ROW_UPPER_BOUND)
        });
        debug!(from, to, "applying row-range pagination");
        format!("{sql} ROWS {from} TO {to}")
    }

    /// Assembles a complete SELECT statement in the engine's clause order,
    /// applying pagination last.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::NotSupported`] when the requested lock mode
    /// is unavailable on this tier.
    pub fn build_select(&self, parts: &SelectParts) -> Result<String, PlatformError> {
        let mut sql = String::from("SELECT ");
        if parts.distinct {
            sql.push_str("DISTINCT ");
        }
        if parts.columns.is_empty() {
            sql.push('*');
        } else {
            sql.push_str(&parts.columns.join(", "));
        }
        sql.push_str(" FROM ");
        sql.push_str(&parts.from);

        if let Some(ref where_clause) = parts.where_clause {
            sql.push_str(" WHERE ");
            sql.push_str(where_clause);
        }

        if let Some(mode) = parts.lock {
            sql.push(' ');
            sql.push_str(self.lock_clause(mode)?);
        }

        if !parts.group_by.is_empty() {
            sql.push_str(" GROUP BY ");
            sql.push_str(&parts.group_by.join(", "));
        }

        if let Some(ref having) = parts.having {
            sql.push_str(" HAVING ");
            sql.push_str(having);
        }

        if !parts.order_by.is_empty() {
            sql.push_str(" ORDER BY ");
            sql.push_str(&parts.order_by.join(", "));
        }

        Ok(self.apply_row_limit(&sql, parts.max_results, parts.first_result))
    }
}
