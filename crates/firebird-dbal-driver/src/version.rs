//! Server-version dispatch.
//!
//! A connection starts unversioned; once the server's version string is
//! received it is matched against `(LI|WI)-[VT]major.minor.patch.build` and
//! resolved to a terminal [`DialectTier`]. Resolution picks the highest
//! satisfied lower-bound threshold, evaluated most-specific-first, so a
//! newer server never maps to a lower tier. A malformed version string is
//! fatal to connection establishment and never retried.

use std::sync::OnceLock;

use regex::Regex;

use firebird_dbal_core::DialectTier;

use crate::error::{DriverError, Result};

/// Lower-bound major-version thresholds, most specific first. The first
/// satisfied entry wins.
const TIER_THRESHOLDS: &[(u32, DialectTier)] = &[
    (6, DialectTier::V5),
    (5, DialectTier::V5),
    (4, DialectTier::V4),
    (3, DialectTier::V3),
];

fn version_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?:LI|WI)-[VT](\d+)\.(\d+)\.(\d+)\.(\d+)").expect("static regex")
    })
}

/// A parsed server version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ServerVersion {
    /// Major version.
    pub major: u32,
    /// Minor version.
    pub minor: u32,
    /// Patch version.
    pub patch: u32,
    /// Build number.
    pub build: u32,
}

impl ServerVersion {
    /// Resolves the dialect tier for this version.
    ///
    /// The highest satisfied threshold always wins; versions below every
    /// threshold resolve to [`DialectTier::Base`].
    #[must_use]
    pub fn tier(&self) -> DialectTier {
        for (major, tier) in TIER_THRESHOLDS {
            if self.major >= *major {
                return *tier;
            }
        }
        DialectTier::Base
    }
}

impl std::fmt::Display for ServerVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.major, self.minor, self.patch, self.build
        )
    }
}

/// Parses a raw server version string.
///
/// Accepts the engine's `(LI|WI)-[VT]major.minor.patch.build` format,
/// ignoring any trailing text.
///
/// # Errors
///
/// Anything else fails with [`DriverError::InvalidPlatformVersion`].
pub fn parse_server_version(raw: &str) -> Result<ServerVersion> {
    let captures = version_re().captures(raw.trim()).ok_or_else(|| {
        DriverError::InvalidPlatformVersion {
            version: raw.to_string(),
        }
    })?;

    // The pattern guarantees each group is a digit run; overflow of a
    // ludicrous component still counts as malformed.
    let part = |i: usize| -> Result<u32> {
        captures[i]
            .parse()
            .map_err(|_| DriverError::InvalidPlatformVersion {
                version: raw.to_string(),
            })
    };

    Ok(ServerVersion {
        major: part(1)?,
        minor: part(2)?,
        patch: part(3)?,
        build: part(4)?,
    })
}
