//! Connect-string assembly.
//!
//! Translates the framework's neutral connection-parameter mapping into the
//! engine's native connection descriptor, `host[/port]:database`. A raw
//! pre-formed connect string is an escape hatch that wins verbatim over the
//! individual parameters.

use crate::error::ConfigError;

/// Neutral connection parameters.
///
/// Recognized keys are `host` and `dbname` (both required unless
/// `connect_string` is given) and `port` (optional, strictly numeric).
/// Credentials ride along for the connection factory; they are not part of
/// the connect string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionParams {
    /// Server host name or address.
    pub host: Option<String>,
    /// Server port, as the raw parameter string.
    pub port: Option<String>,
    /// Database path or alias.
    pub dbname: Option<String>,
    /// Raw pre-formed connect string, used verbatim when present.
    pub connect_string: Option<String>,
    /// User name for the connection factory.
    pub user: Option<String>,
    /// Password for the connection factory.
    pub password: Option<String>,
}

impl ConnectionParams {
    /// Creates an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the server host.
    #[must_use]
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Sets the server port.
    #[must_use]
    pub fn port(mut self, port: impl Into<String>) -> Self {
        self.port = Some(port.into());
        self
    }

    /// Sets the database path or alias.
    #[must_use]
    pub fn dbname(mut self, dbname: impl Into<String>) -> Self {
        self.dbname = Some(dbname.into());
        self
    }

    /// Sets the raw connect string escape hatch.
    #[must_use]
    pub fn connect_string(mut self, connect_string: impl Into<String>) -> Self {
        self.connect_string = Some(connect_string.into());
        self
    }

    /// Sets the user name.
    #[must_use]
    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    /// Sets the password.
    #[must_use]
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }
}

/// Builds the engine's native connection descriptor.
///
/// A raw connect string is used verbatim. Otherwise `host` and `dbname` are
/// mandatory, and `port`, when present, must be non-empty and strictly
/// numeric. Output format: `host[/port]:database`.
///
/// # Errors
///
/// Returns [`ConfigError::HostDbnameRequired`] or [`ConfigError::InvalidPort`]
/// when the parameters fall short of that.
pub fn build_connect_string(params: &ConnectionParams) -> Result<String, ConfigError> {
    if let Some(raw) = &params.connect_string {
        return Ok(raw.clone());
    }

    let (Some(host), Some(dbname)) = (&params.host, &params.dbname) else {
        return Err(ConfigError::HostDbnameRequired);
    };

    match &params.port {
        None => Ok(format!("{host}:{dbname}")),
        Some(port) => {
            if port.is_empty() || !port.chars().all(|c| c.is_ascii_digit()) {
                return Err(ConfigError::InvalidPort(port.clone()));
            }
            Ok(format!("{host}/{port}:{dbname}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_port_dbname() {
        let params = ConnectionParams::new()
            .host("foo")
            .port("3333")
            .dbname("bar");
        assert_eq!(build_connect_string(&params).unwrap(), "foo/3333:bar");
    }

    #[test]
    fn test_port_is_optional() {
        let params = ConnectionParams::new().host("foo").dbname("/data/bar.fdb");
        assert_eq!(build_connect_string(&params).unwrap(), "foo:/data/bar.fdb");
    }

    #[test]
    fn test_missing_host_and_dbname_fails() {
        let err = build_connect_string(&ConnectionParams::new()).unwrap_err();
        assert_eq!(err, ConfigError::HostDbnameRequired);

        let err = build_connect_string(&ConnectionParams::new().host("foo")).unwrap_err();
        assert_eq!(err, ConfigError::HostDbnameRequired);

        let err = build_connect_string(&ConnectionParams::new().dbname("bar")).unwrap_err();
        assert_eq!(err, ConfigError::HostDbnameRequired);
    }

    #[test]
    fn test_non_numeric_port_fails() {
        let params = ConnectionParams::new().host("foo").port("30a3").dbname("bar");
        assert_eq!(
            build_connect_string(&params).unwrap_err(),
            ConfigError::InvalidPort("30a3".to_string())
        );

        let params = ConnectionParams::new().host("foo").port("").dbname("bar");
        assert_eq!(
            build_connect_string(&params).unwrap_err(),
            ConfigError::InvalidPort(String::new())
        );
    }

    #[test]
    fn test_raw_connect_string_wins_verbatim() {
        let params = ConnectionParams::new()
            .host("ignored")
            .connect_string("inet://example/alias");
        assert_eq!(
            build_connect_string(&params).unwrap(),
            "inet://example/alias"
        );
    }

    #[test]
    fn test_config_errors_name_the_parameter() {
        assert!(ConfigError::HostDbnameRequired.to_string().contains("host"));
        assert!(ConfigError::HostDbnameRequired
            .to_string()
            .contains("dbname"));
        assert!(ConfigError::InvalidPort("x".to_string())
            .to_string()
            .contains("port"));
    }
}
