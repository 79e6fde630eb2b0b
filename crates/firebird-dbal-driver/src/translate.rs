//! Engine error translation.
//!
//! Maps native error codes from failed statement execution to a fixed
//! taxonomy of portable error kinds. Classification is an exact SQLCODE
//! switch plus a secondary message match for the codes the engine overloads
//! across several causes. Translated errors are never recovered locally;
//! they are re-signaled to the caller with the original code and message
//! preserved verbatim for diagnostics.

use std::sync::OnceLock;

use regex::Regex;

/// Portable classification of a native engine error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed SQL.
    SyntaxError,
    /// Unique or primary key constraint violation.
    UniqueViolation,
    /// Foreign key constraint violation.
    ForeignKeyViolation,
    /// NOT NULL constraint violation.
    NotNullViolation,
    /// An object with the same name already exists.
    TableExists,
    /// The referenced table does not exist.
    TableNotFound,
    /// The referenced column does not exist.
    FieldNotFound,
    /// A column reference matches more than one source.
    AmbiguousField,
    /// The connection to the server was lost.
    ConnectionLost,
    /// The transaction deadlocked with a concurrent one.
    DeadlockDetected,
    /// Any other engine error.
    Other,
}

fn table_unknown_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)table unknown").expect("static regex"))
}

fn column_unknown_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)column unknown|field unknown").expect("static regex"))
}

fn ambiguous_field_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)ambiguous field name").expect("static regex"))
}

fn already_exists_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)already exists").expect("static regex"))
}

fn not_found_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)not found|does not exist").expect("static regex"))
}

/// Classifies a native error by SQLCODE and message.
///
/// Codes `-204` (unknown object) and `-607` (metadata update) cover several
/// distinct causes and are disambiguated by message; every unrecognized
/// combination classifies as [`ErrorKind::Other`], never as a guess.
#[must_use]
pub fn classify(code: i32, message: &str) -> ErrorKind {
    match code {
        -104 => ErrorKind::SyntaxError,
        -803 => ErrorKind::UniqueViolation,
        -530 => ErrorKind::ForeignKeyViolation,
        -625 => ErrorKind::NotNullViolation,
        -204 => {
            if table_unknown_re().is_match(message) {
                ErrorKind::TableNotFound
            } else if ambiguous_field_re().is_match(message) {
                ErrorKind::AmbiguousField
            } else if column_unknown_re().is_match(message) {
                ErrorKind::FieldNotFound
            } else {
                ErrorKind::Other
            }
        }
        -607 => {
            if already_exists_re().is_match(message) {
                ErrorKind::TableExists
            } else if not_found_re().is_match(message) {
                ErrorKind::TableNotFound
            } else {
                ErrorKind::Other
            }
        }
        -902 => ErrorKind::ConnectionLost,
        -913 => ErrorKind::DeadlockDetected,
        _ => ErrorKind::Other,
    }
}

/// A native engine error carrying its portable classification.
///
/// The original numeric code and message are preserved verbatim alongside
/// the portable kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("engine error {code}: {message}")]
pub struct EngineError {
    /// The native SQLCODE.
    pub code: i32,
    /// The native error message, verbatim.
    pub message: String,
    /// The portable classification.
    pub kind: ErrorKind,
}

impl EngineError {
    /// Builds a translated error from a native code and message.
    #[must_use]
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        let message = message.into();
        let kind = classify(code, &message);
        Self {
            code,
            message,
            kind,
        }
    }
}
