//! The driver front.
//!
//! Ties the pieces together at the framework boundary: build the native
//! connect string, open a connection through the injected factory, resolve
//! the server version to a dialect tier, and hand back the composed
//! connection-plus-platform handle.

use tracing::info;

use firebird_dbal_core::{DialectTier, FirebirdPlatform};

use crate::conn::{Connection, ConnectionFactory};
use crate::connect::{build_connect_string, ConnectionParams};
use crate::error::Result;
use crate::schema_manager::SchemaManager;
use crate::version::{parse_server_version, ServerVersion};

/// The Firebird driver.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirebirdDriver;

impl FirebirdDriver {
    /// Creates the driver.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Opens a connection and resolves its dialect tier.
    ///
    /// The connect string is assembled from the parameters, the factory
    /// opens the connection, and the server's version string is parsed to
    /// pick the platform.
    ///
    /// # Errors
    ///
    /// Fails on invalid connection parameters, a factory failure, or a
    /// malformed server version string — the last before the connection is
    /// ever handed to the framework.
    pub fn connect(
        &self,
        factory: &dyn ConnectionFactory,
        params: &ConnectionParams,
    ) -> Result<DriverConnection> {
        let connect_string = build_connect_string(params)?;
        let conn = factory.open(&connect_string, params)?;
        let version = parse_server_version(conn.server_version())?;
        let platform = Self::create_platform(version.tier());
        info!(
            server_version = %version,
            platform = platform.name(),
            "connection established"
        );
        Ok(DriverConnection {
            conn,
            platform,
            version,
        })
    }

    /// Builds the platform for a resolved dialect tier.
    #[must_use]
    pub fn create_platform(tier: DialectTier) -> FirebirdPlatform {
        FirebirdPlatform::new(tier)
    }
}

/// An open connection composed with its resolved platform.
pub struct DriverConnection {
    conn: Box<dyn Connection>,
    platform: FirebirdPlatform,
    version: ServerVersion,
}

impl DriverConnection {
    /// Returns the resolved platform.
    #[must_use]
    pub const fn platform(&self) -> &FirebirdPlatform {
        &self.platform
    }

    /// Returns the parsed server version.
    #[must_use]
    pub const fn version(&self) -> ServerVersion {
        self.version
    }

    /// Returns the underlying connection.
    pub fn connection_mut(&mut self) -> &mut dyn Connection {
        &mut *self.conn
    }

    /// Consumes the handle into a schema manager over the same connection
    /// and platform.
    #[must_use]
    pub fn into_schema_manager(self) -> SchemaManager<Box<dyn Connection>> {
        SchemaManager::new(self.conn, self.platform)
    }
}

impl std::fmt::Debug for DriverConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DriverConnection")
            .field("platform", &self.platform.name())
            .field("version", &self.version)
            .finish_non_exhaustive()
    }
}
