//! Error types for the dialect engine.

/// Errors raised while generating SQL for a platform.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlatformError {
    /// The requested capability does not exist on this dialect tier.
    ///
    /// The caller must choose a different strategy; the platform never
    /// silently substitutes behavior.
    #[error("{platform} does not support {operation}")]
    NotSupported {
        /// Platform name (e.g. `firebird3`).
        platform: &'static str,
        /// The unsupported operation (e.g. `rename table`).
        operation: &'static str,
    },

    /// An identifier exceeds the dialect tier's maximum length and cannot
    /// be shortened deterministically (explicit user-supplied names only;
    /// generated names are always truncated to fit).
    #[error("identifier '{identifier}' exceeds the maximum length of {max_length}")]
    IdentifierTooLong {
        /// The offending identifier.
        identifier: String,
        /// The tier's identifier length limit.
        max_length: usize,
    },
}

/// Result type for platform operations.
pub type Result<T> = std::result::Result<T, PlatformError>;
