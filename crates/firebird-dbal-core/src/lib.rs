//! # firebird-dbal-core
//!
//! The pure, side-effect-free half of a Firebird driver for a generic
//! database-abstraction layer:
//!
//! - A fragment scanner that splits raw SQL into quoted-literal and
//!   scannable spans without ever rejecting malformed input
//! - A placeholder rewriter that turns named (`:name`) and positional (`?`)
//!   parameters into the engine's positional-only convention
//! - Per-tier platform objects (Firebird pre-3.0 through 5.x) exposing
//!   quoting, expression building, pagination, and boolean-representation
//!   rules
//! - A DDL builder that translates the neutral schema model into ordered,
//!   engine-native statement sequences, including sequence+trigger
//!   autoincrement emulation on tiers without identity columns
//!
//! Nothing in this crate performs I/O. The connection boundary and the
//! schema introspector live in `firebird-dbal-driver`.
//!
//! ## Placeholder rewriting
//!
//! ```rust
//! use firebird_dbal_core::params::rewrite_placeholders;
//!
//! let (sql, map) = rewrite_placeholders(
//!     "SELECT name FROM users WHERE id = :param1 AND status = :param2",
//! );
//!
//! assert_eq!(sql, "SELECT name FROM users WHERE id = ? AND status = ?");
//! assert_eq!(map.get(1), Some(":param1"));
//! assert_eq!(map.get(2), Some(":param2"));
//! ```

pub mod ddl;
pub mod error;
pub mod keywords;
pub mod lexer;
pub mod params;
pub mod platform;
pub mod schema;

pub use ddl::{emulated_identity, DdlBuilder, EmulatedIdentity, IdentityRegistry};
pub use error::PlatformError;
pub use keywords::KeywordRegistry;
pub use lexer::{Fragment, FragmentKind, FragmentScanner};
pub use params::{rewrite_placeholders, ParameterMap, PlaceholderToken};
pub use platform::{BooleanStyle, Capabilities, DialectTier, FirebirdPlatform};
pub use schema::{
    ChangedColumn, Column, ColumnChange, DefaultValue, FbType, ForeignKey, ForeignKeyAction,
    Index, Table, TableDiff,
};
