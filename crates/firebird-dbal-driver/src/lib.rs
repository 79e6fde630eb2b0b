//! # firebird-dbal-driver
//!
//! The I/O-facing half of the Firebird driver: connect-string assembly,
//! server-version dispatch, catalog introspection, and translation of
//! native engine errors into a portable taxonomy.
//!
//! The wire protocol itself is out of scope. Everything here talks to an
//! injected [`Connection`] collaborator; the only I/O-bearing component is
//! the [`SchemaManager`], which issues blocking catalog queries and decodes
//! the engine's packed metadata back into the neutral schema model from
//! `firebird-dbal-core`.

pub mod catalog;
pub mod conn;
pub mod connect;
pub mod driver;
pub mod error;
pub mod schema_manager;
pub mod transaction;
pub mod translate;
pub mod version;

pub use catalog::{decode_field_type, parse_default_source, FieldTypeCode, PackedType};
pub use conn::{Connection, ConnectionFactory, Rows, Statement, Value};
pub use connect::{ConnectionParams, build_connect_string};
pub use driver::{DriverConnection, FirebirdDriver};
pub use error::{ConfigError, DriverError, Result};
pub use schema_manager::SchemaManager;
pub use transaction::{IsolationLevel, transaction_start_sql};
pub use translate::{EngineError, ErrorKind};
pub use version::{ServerVersion, parse_server_version};
