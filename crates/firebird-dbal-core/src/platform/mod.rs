//! Dialect-tier platforms.
//!
//! A [`FirebirdPlatform`] is the single source of truth for identifier
//! quoting, type rendering, expression building, pagination, and the
//! boolean-representation policy of one dialect tier. Tier differences are
//! driven by a constant capability table rather than subclass overrides, so
//! exhaustiveness is checked at compile time.

mod expression;

pub use expression::{DateDiffUnit, LockMode, SelectParts, ROW_UPPER_BOUND};

use crate::error::PlatformError;
use crate::keywords::KeywordRegistry;
use crate::schema::{DefaultValue, FbType};

/// A named capability set corresponding to a contiguous range of server
/// versions. Resolved once per connection, immutable thereafter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DialectTier {
    /// Pre-3.0 servers.
    Base,
    /// 3.x servers.
    V3,
    /// 4.x servers.
    V4,
    /// 5.x and later servers.
    V5,
}

/// Per-tier capability table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// Whether the tier has a native BOOLEAN column type.
    pub native_boolean: bool,
    /// Whether the tier has native identity columns; without them,
    /// autoincrement is emulated with a sequence and a trigger.
    pub identity_columns: bool,
    /// Whether the tier supports `SKIP LOCKED`.
    pub skip_locked: bool,
    /// Whether `ALTER TABLE ... ALTER COLUMN ... SET/DROP NOT NULL` exists;
    /// without it, nullability changes go through the system tables.
    pub alter_column_nullability: bool,
    /// Maximum identifier length in characters.
    pub max_identifier_length: usize,
}

const BASE_CAPABILITIES: Capabilities = Capabilities {
    native_boolean: false,
    identity_columns: false,
    skip_locked: false,
    alter_column_nullability: false,
    max_identifier_length: 31,
};

const V3_CAPABILITIES: Capabilities = Capabilities {
    native_boolean: true,
    identity_columns: true,
    skip_locked: false,
    alter_column_nullability: true,
    max_identifier_length: 31,
};

const V4_CAPABILITIES: Capabilities = Capabilities {
    native_boolean: true,
    identity_columns: true,
    skip_locked: false,
    alter_column_nullability: true,
    max_identifier_length: 63,
};

const V5_CAPABILITIES: Capabilities = Capabilities {
    native_boolean: true,
    identity_columns: true,
    skip_locked: true,
    alter_column_nullability: true,
    max_identifier_length: 63,
};

impl DialectTier {
    /// Returns the capability set for this tier.
    #[must_use]
    pub const fn capabilities(self) -> &'static Capabilities {
        match self {
            Self::Base => &BASE_CAPABILITIES,
            Self::V3 => &V3_CAPABILITIES,
            Self::V4 => &V4_CAPABILITIES,
            Self::V5 => &V5_CAPABILITIES,
        }
    }

    /// Returns the platform name for this tier.
    #[must_use]
    pub const fn platform_name(self) -> &'static str {
        match self {
            Self::Base => "firebird",
            Self::V3 => "firebird3",
            Self::V4 => "firebird4",
            Self::V5 => "firebird5",
        }
    }
}

/// How boolean columns and literals are represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BooleanStyle {
    /// Native BOOLEAN column type (3.x tier and above).
    Native,
    /// SMALLINT column holding 0/1.
    SmallInt,
    /// Single CHAR column holding configurable true/false characters.
    Char {
        /// Character stored for true.
        true_char: char,
        /// Character stored for false.
        false_char: char,
    },
}

/// A dialect-tier platform object.
///
/// The boolean style is a configuration toggle set once per instance and
/// read thereafter; it is never mutated mid-statement.
#[derive(Debug, Clone)]
pub struct FirebirdPlatform {
    tier: DialectTier,
    keywords: KeywordRegistry,
    boolean_style: BooleanStyle,
}

impl FirebirdPlatform {
    /// Creates the platform for a dialect tier.
    ///
    /// The boolean style defaults to native BOOLEAN where the tier has it
    /// and SMALLINT 0/1 elsewhere.
    #[must_use]
    pub fn new(tier: DialectTier) -> Self {
        let boolean_style = if tier.capabilities().native_boolean {
            BooleanStyle::Native
        } else {
            BooleanStyle::SmallInt
        };
        Self {
            tier,
            keywords: KeywordRegistry::for_tier(tier),
            boolean_style,
        }
    }

    /// Returns this platform's tier.
    #[must_use]
    pub const fn tier(&self) -> DialectTier {
        self.tier
    }

    /// Returns this platform's capability set.
    #[must_use]
    pub const fn capabilities(&self) -> &'static Capabilities {
        self.tier.capabilities()
    }

    /// Returns this platform's name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.tier.platform_name()
    }

    /// Returns the maximum identifier length for this tier.
    #[must_use]
    pub const fn max_identifier_length(&self) -> usize {
        self.tier.capabilities().max_identifier_length
    }

    /// Selects the boolean representation.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::NotSupported`] when a native BOOLEAN is
    /// requested on a tier without one.
    pub fn set_boolean_style(&mut self, style: BooleanStyle) -> Result<(), PlatformError> {
        if matches!(style, BooleanStyle::Native) && !self.capabilities().native_boolean {
            return Err(PlatformError::NotSupported {
                platform: self.name(),
                operation: "native BOOLEAN columns",
            });
        }
        self.boolean_style = style;
        Ok(())
    }

    /// Returns the configured boolean representation.
    #[must_use]
    pub const fn boolean_style(&self) -> BooleanStyle {
        self.boolean_style
    }

    /// Returns whether an identifier is a reserved word on this tier.
    #[must_use]
    pub fn is_reserved(&self, identifier: &str) -> bool {
        self.keywords.is_reserved(identifier)
    }

    /// Doubles embedded quote characters per the identifier quoting rule.
    #[must_use]
    pub fn escape_identifier(value: &str) -> String {
        value.replace('"', "\"\"")
    }

    /// Reverses [`Self::escape_identifier`].
    #[must_use]
    pub fn unescape_identifier(value: &str) -> String {
        value.replace("\"\"", "\"")
    }

    /// Quotes a single identifier unconditionally.
    #[must_use]
    pub fn quote_single_identifier(&self, identifier: &str) -> String {
        format!("\"{}\"", Self::escape_identifier(identifier))
    }

    /// Quotes a possibly dot-qualified identifier.
    #[must_use]
    pub fn quote_identifier(&self, identifier: &str) -> String {
        identifier
            .split('.')
            .map(|part| self.quote_single_identifier(part))
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Returns whether an identifier can be used unquoted without changing
    /// meaning: unquoted names fold to upper case, so anything with
    /// lower-case letters, a leading digit, or a reserved name needs quotes.
    #[must_use]
    pub fn needs_quoting(&self, identifier: &str) -> bool {
        if self.is_reserved(identifier) {
            return true;
        }
        let mut chars = identifier.chars();
        let leading_ok = chars
            .next()
            .is_some_and(|c| c.is_ascii_uppercase() || c == '_');
        !leading_ok
            || !identifier
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_' || c == '$')
    }

    /// Quotes a string literal, doubling embedded single quotes.
    #[must_use]
    pub fn quote_string_literal(&self, value: &str) -> String {
        format!("'{}'", Self::escape_string_literal(value))
    }

    /// Doubles embedded single quotes per the string literal rule.
    #[must_use]
    pub fn escape_string_literal(value: &str) -> String {
        value.replace('\'', "''")
    }

    /// Reverses [`Self::escape_string_literal`].
    #[must_use]
    pub fn unescape_string_literal(value: &str) -> String {
        value.replace("''", "'")
    }

    /// Renders a logical type as engine DDL.
    #[must_use]
    pub fn type_ddl(&self, ty: &FbType) -> String {
        match ty {
            FbType::SmallInt => "SMALLINT".to_string(),
            FbType::Integer => "INTEGER".to_string(),
            FbType::BigInt => "BIGINT".to_string(),
            FbType::Float => "FLOAT".to_string(),
            FbType::Double => "DOUBLE PRECISION".to_string(),
            FbType::Numeric { precision, scale } => format!("NUMERIC({precision}, {scale})"),
            FbType::Decimal { precision, scale } => format!("DECIMAL({precision}, {scale})"),
            FbType::Char(len) => format!("CHAR({len})"),
            FbType::Varchar(len) => format!("VARCHAR({len})"),
            FbType::Blob => "BLOB SUB_TYPE BINARY".to_string(),
            FbType::Text => "BLOB SUB_TYPE TEXT".to_string(),
            FbType::Date => "DATE".to_string(),
            FbType::Time => "TIME".to_string(),
            FbType::Timestamp => "TIMESTAMP".to_string(),
            FbType::Boolean => self.boolean_type_ddl().to_string(),
        }
    }

    /// Returns the DDL type used for boolean columns under the configured
    /// style.
    #[must_use]
    pub const fn boolean_type_ddl(&self) -> &'static str {
        match self.boolean_style {
            BooleanStyle::Native => "BOOLEAN",
            BooleanStyle::SmallInt => "SMALLINT",
            BooleanStyle::Char { .. } => "CHAR(1)",
        }
    }

    /// Renders a boolean literal under the configured style.
    #[must_use]
    pub fn boolean_literal(&self, value: bool) -> String {
        match self.boolean_style {
            BooleanStyle::Native => if value { "TRUE" } else { "FALSE" }.to_string(),
            BooleanStyle::SmallInt => if value { "1" } else { "0" }.to_string(),
            BooleanStyle::Char {
                true_char,
                false_char,
            } => {
                let c = if value { true_char } else { false_char };
                self.quote_string_literal(&c.to_string())
            }
        }
    }

    /// Renders a default value as the DDL fragment after `DEFAULT`.
    ///
    /// Returns `None` when no default is set.
    #[must_use]
    pub fn default_ddl(&self, default: &DefaultValue) -> Option<String> {
        match default {
            DefaultValue::None => None,
            DefaultValue::Null => Some("NULL".to_string()),
            DefaultValue::Bool(b) => Some(self.boolean_literal(*b)),
            DefaultValue::Int(i) => Some(i.to_string()),
            DefaultValue::Float(f) => Some(f.to_string()),
            DefaultValue::Str(s) => Some(self.quote_string_literal(s)),
            DefaultValue::Expression(expr) => Some(expr.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capability_table() {
        assert!(!DialectTier::Base.capabilities().identity_columns);
        assert!(DialectTier::V3.capabilities().identity_columns);
        assert!(!DialectTier::V3.capabilities().skip_locked);
        assert!(DialectTier::V5.capabilities().skip_locked);
        assert_eq!(DialectTier::V3.capabilities().max_identifier_length, 31);
        assert_eq!(DialectTier::V4.capabilities().max_identifier_length, 63);
    }

    #[test]
    fn test_default_boolean_style_per_tier() {
        assert_eq!(
            FirebirdPlatform::new(DialectTier::Base).boolean_style(),
            BooleanStyle::SmallInt
        );
        assert_eq!(
            FirebirdPlatform::new(DialectTier::V3).boolean_style(),
            BooleanStyle::Native
        );
    }

    #[test]
    fn test_native_boolean_rejected_on_base_tier() {
        let mut platform = FirebirdPlatform::new(DialectTier::Base);
        let err = platform.set_boolean_style(BooleanStyle::Native).unwrap_err();
        assert_eq!(
            err,
            PlatformError::NotSupported {
                platform: "firebird",
                operation: "native BOOLEAN columns",
            }
        );
    }

    #[test]
    fn test_char_boolean_style() {
        let mut platform = FirebirdPlatform::new(DialectTier::V3);
        platform
            .set_boolean_style(BooleanStyle::Char {
                true_char: 'Y',
                false_char: 'N',
            })
            .unwrap();
        assert_eq!(platform.boolean_type_ddl(), "CHAR(1)");
        assert_eq!(platform.boolean_literal(true), "'Y'");
        assert_eq!(platform.boolean_literal(false), "'N'");
    }

    #[test]
    fn test_boolean_literals() {
        let platform = FirebirdPlatform::new(DialectTier::V3);
        assert_eq!(platform.boolean_literal(true), "TRUE");

        let platform = FirebirdPlatform::new(DialectTier::Base);
        assert_eq!(platform.boolean_literal(true), "1");
        assert_eq!(platform.boolean_literal(false), "0");
    }

    #[test]
    fn test_quote_identifier() {
        let platform = FirebirdPlatform::new(DialectTier::V3);
        assert_eq!(platform.quote_single_identifier("users"), "\"users\"");
        assert_eq!(
            platform.quote_single_identifier("wei\"rd"),
            "\"wei\"\"rd\""
        );
        assert_eq!(platform.quote_identifier("t.c"), "\"t\".\"c\"");
    }

    #[test]
    fn test_identifier_escape_roundtrip() {
        for input in ["plain", "has\"quote", "\"\"", ""] {
            assert_eq!(
                FirebirdPlatform::unescape_identifier(&FirebirdPlatform::escape_identifier(input)),
                input
            );
        }
    }

    #[test]
    fn test_string_literal_escape_roundtrip() {
        for input in ["plain", "it's", "''", "", "a'b'c"] {
            assert_eq!(
                FirebirdPlatform::unescape_string_literal(&FirebirdPlatform::escape_string_literal(
                    input
                )),
                input
            );
        }
    }

    #[test]
    fn test_quote_string_literal() {
        let platform = FirebirdPlatform::new(DialectTier::V3);
        assert_eq!(platform.quote_string_literal("it's"), "'it''s'");
    }

    #[test]
    fn test_needs_quoting() {
        let platform = FirebirdPlatform::new(DialectTier::V3);
        assert!(platform.needs_quoting("select"));
        assert!(platform.needs_quoting("lower_case"));
        assert!(platform.needs_quoting("1STARTS_WITH_DIGIT"));
        assert!(!platform.needs_quoting("USERS"));
        assert!(!platform.needs_quoting("RDB$RELATIONS"));
    }

    #[test]
    fn test_type_ddl() {
        let platform = FirebirdPlatform::new(DialectTier::V3);
        assert_eq!(platform.type_ddl(&FbType::Integer), "INTEGER");
        assert_eq!(platform.type_ddl(&FbType::Varchar(255)), "VARCHAR(255)");
        assert_eq!(platform.type_ddl(&FbType::Char(2)), "CHAR(2)");
        assert_eq!(
            platform.type_ddl(&FbType::Numeric {
                precision: 9,
                scale: 2
            }),
            "NUMERIC(9, 2)"
        );
        assert_eq!(platform.type_ddl(&FbType::Text), "BLOB SUB_TYPE TEXT");
        assert_eq!(platform.type_ddl(&FbType::Boolean), "BOOLEAN");

        let base = FirebirdPlatform::new(DialectTier::Base);
        assert_eq!(base.type_ddl(&FbType::Boolean), "SMALLINT");
    }

    #[test]
    fn test_default_ddl() {
        let platform = FirebirdPlatform::new(DialectTier::V3);
        assert_eq!(platform.default_ddl(&DefaultValue::None), None);
        assert_eq!(
            platform.default_ddl(&DefaultValue::Null),
            Some("NULL".to_string())
        );
        assert_eq!(
            platform.default_ddl(&DefaultValue::Int(42)),
            Some("42".to_string())
        );
        assert_eq!(
            platform.default_ddl(&DefaultValue::Str("it's".to_string())),
            Some("'it''s'".to_string())
        );
        assert_eq!(
            platform.default_ddl(&DefaultValue::Expression("CURRENT_TIMESTAMP".to_string())),
            Some("CURRENT_TIMESTAMP".to_string())
        );
        assert_eq!(
            platform.default_ddl(&DefaultValue::Bool(true)),
            Some("TRUE".to_string())
        );
    }
}
