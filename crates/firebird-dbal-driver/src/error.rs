//! Error types for the driver front.

use firebird_dbal_core::PlatformError;

use crate::translate::EngineError;

/// Connection-parameter validation failures.
///
/// Fatal to `connect()`; surfaced immediately and never retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Neither a raw connect string nor both `host` and `dbname` were given.
    #[error("connection parameters must include 'host' and 'dbname' (or a raw 'connectstring')")]
    HostDbnameRequired,

    /// The `port` parameter is empty or not strictly numeric.
    #[error("connection parameter 'port' must be a non-empty numeric string, got '{0}'")]
    InvalidPort(String),

    /// A transaction wait timeout outside the documented sentinel range.
    #[error(
        "transaction wait timeout must be -1 (wait), 0 (no wait), or a positive number of \
         seconds, got {0}"
    )]
    InvalidWaitTimeout(i64),
}

/// Errors raised by driver operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DriverError {
    /// Invalid connection parameters.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A capability missing on the resolved dialect tier.
    #[error(transparent)]
    Platform(#[from] PlatformError),

    /// The server version string does not match the expected pattern.
    ///
    /// Fatal to driver initialization; never retried.
    #[error(
        "invalid server version string '{version}': expected \
         (LI|WI)-[VT]major.minor.patch.build"
    )]
    InvalidPlatformVersion {
        /// The raw version string received from the server.
        version: String,
    },

    /// Introspection met a catalog encoding with no known logical-type
    /// mapping.
    ///
    /// Surfaced as a hard error rather than silently defaulting, so a
    /// mis-decoded column can never corrupt the neutral model.
    #[error("cannot decode catalog metadata for column '{column}': {detail}")]
    CatalogDecode {
        /// The column whose metadata failed to decode.
        column: String,
        /// What was inconsistent.
        detail: String,
    },

    /// A translated native engine error.
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Result type for driver operations.
pub type Result<T> = std::result::Result<T, DriverError>;
