//! Versioned reserved-word registry.
//!
//! Each dialect tier's keyword set is the prior tier's set plus an explicit
//! delta; the engine's evolution is strictly additive. The registry is
//! constructed once, never mutated, and safe to share across threads.

use std::collections::HashSet;

use crate::platform::DialectTier;

/// Reserved words common to every supported tier.
static BASE_KEYWORDS: &[&str] = &[
    "ACTIVE", "ADD", "ADMIN", "AFTER", "ALL", "ALTER", "AND", "ANY", "AS", "ASC", "ASCENDING",
    "AT", "AUTO", "AVG", "BEFORE", "BEGIN", "BETWEEN", "BIGINT", "BIT_LENGTH", "BLOB", "BOTH",
    "BY", "CASCADE", "CASE", "CAST", "CHAR", "CHARACTER", "CHARACTER_LENGTH", "CHAR_LENGTH",
    "CHECK", "CLOSE", "COLLATE", "COLUMN", "COMMIT", "COMMITTED", "COMPUTED", "CONDITIONAL",
    "CONNECT", "CONSTRAINT", "CONTAINING", "COUNT", "CREATE", "CROSS", "CSTRING", "CURRENT",
    "CURRENT_CONNECTION", "CURRENT_DATE", "CURRENT_ROLE", "CURRENT_TIME", "CURRENT_TIMESTAMP",
    "CURRENT_TRANSACTION", "CURRENT_USER", "CURSOR", "DATABASE", "DATE", "DAY", "DEC", "DECIMAL",
    "DECLARE", "DEFAULT", "DELETE", "DESC", "DESCENDING", "DISCONNECT", "DISTINCT", "DO",
    "DOMAIN", "DOUBLE", "DROP", "ELSE", "END", "ENTRY_POINT", "ESCAPE", "EXCEPTION", "EXECUTE",
    "EXISTS", "EXIT", "EXTERNAL", "EXTRACT", "FETCH", "FILE", "FILTER", "FLOAT", "FOR",
    "FOREIGN", "FROM", "FULL", "FUNCTION", "GDSCODE", "GENERATOR", "GEN_ID", "GLOBAL", "GRANT",
    "GROUP", "HAVING", "HOUR", "IF", "IN", "INACTIVE", "INDEX", "INNER", "INSENSITIVE", "INSERT",
    "INT", "INTEGER", "INTO", "IS", "ISOLATION", "JOIN", "KEY", "LEADING", "LEFT", "LEVEL",
    "LIKE", "LONG", "LOWER", "MANUAL", "MAX", "MAXIMUM_SEGMENT", "MERGE", "MIN", "MINUTE",
    "MODULE_NAME", "MONTH", "NAMES", "NATIONAL", "NATURAL", "NCHAR", "NO", "NOT", "NULL",
    "NUMERIC", "OCTET_LENGTH", "OF", "ON", "ONLY", "OPEN", "OPTION", "OR", "ORDER", "OUTER",
    "PAGE", "PAGES", "PAGE_SIZE", "PARAMETER", "PASSWORD", "PLAN", "POSITION", "POST_EVENT",
    "PRECISION", "PRIMARY", "PRIVILEGES", "PROCEDURE", "PROTECTED", "READ", "REAL",
    "RECORD_VERSION", "RECREATE", "RECURSIVE", "REFERENCES", "RELEASE", "RESERV", "RESERVING",
    "RETAIN", "RETURNING_VALUES", "RETURNS", "REVOKE", "RIGHT", "ROLLBACK", "ROWS", "ROW_COUNT",
    "SAVEPOINT", "SCHEMA", "SECOND", "SEGMENT", "SELECT", "SENSITIVE", "SET", "SHADOW", "SHARED",
    "SINGULAR", "SIZE", "SMALLINT", "SNAPSHOT", "SOME", "SORT", "SQLCODE", "STABILITY", "START",
    "STARTING", "STARTS", "STATISTICS", "SUB_TYPE", "SUM", "SUSPEND", "TABLE", "THEN", "TIME",
    "TIMESTAMP", "TO", "TRAILING", "TRANSACTION", "TRIGGER", "TRIM", "UNCOMMITTED", "UNION",
    "UNIQUE", "UPDATE", "UPPER", "USER", "USING", "VALUE", "VALUES", "VARCHAR", "VARIABLE",
    "VARYING", "VIEW", "WAIT", "WHEN", "WHERE", "WHILE", "WITH", "WORK", "WRITE", "YEAR",
];

/// Words that became reserved in the 3.x dialect tier.
static V3_ADDITIONS: &[&str] = &[
    "BOOLEAN", "CORR", "COVAR_POP", "COVAR_SAMP", "DELETING", "DETERMINISTIC", "FALSE",
    "INSERTING", "OFFSET", "OVER", "REGR_AVGX", "REGR_AVGY", "REGR_COUNT", "REGR_INTERCEPT",
    "REGR_R2", "REGR_SLOPE", "REGR_SXX", "REGR_SXY", "REGR_SYY", "RETURN", "ROW", "SCROLL",
    "SEQUENCE", "SIMILAR", "SQLSTATE", "STDDEV_POP", "STDDEV_SAMP", "TRUE", "UNKNOWN",
    "UPDATING", "VAR_POP", "VAR_SAMP",
];

/// Words that became reserved in the 4.x dialect tier.
static V4_ADDITIONS: &[&str] = &[
    "BINARY", "DECFLOAT", "INT128", "LATERAL", "LOCAL", "LOCALTIME", "LOCALTIMESTAMP",
    "PUBLICATION", "RESETTING", "TIMEZONE_HOUR", "TIMEZONE_MINUTE", "UNBOUNDED", "VARBINARY",
    "WINDOW", "WITHOUT",
];

/// Words that became reserved in the 5.x dialect tier.
static V5_ADDITIONS: &[&str] = &["BTRIM", "CALL", "LTRIM", "RTRIM", "TARGET"];

/// Immutable reserved-word lookup for one dialect tier.
#[derive(Debug, Clone)]
pub struct KeywordRegistry {
    tier: DialectTier,
    words: HashSet<&'static str>,
}

impl KeywordRegistry {
    /// Builds the registry for a dialect tier.
    ///
    /// Tier sets are cumulative: every tier contains all words of the tiers
    /// below it.
    #[must_use]
    pub fn for_tier(tier: DialectTier) -> Self {
        let mut words: HashSet<&'static str> = BASE_KEYWORDS.iter().copied().collect();
        if tier >= DialectTier::V3 {
            words.extend(V3_ADDITIONS);
        }
        if tier >= DialectTier::V4 {
            words.extend(V4_ADDITIONS);
        }
        if tier >= DialectTier::V5 {
            words.extend(V5_ADDITIONS);
        }
        Self { tier, words }
    }

    /// Returns the tier this registry was built for.
    #[must_use]
    pub const fn tier(&self) -> DialectTier {
        self.tier
    }

    /// Returns whether an identifier is a reserved word on this tier.
    ///
    /// The check is case-insensitive.
    #[must_use]
    pub fn is_reserved(&self, identifier: &str) -> bool {
        self.words.contains(identifier.to_ascii_uppercase().as_str())
    }

    /// Returns the number of reserved words on this tier.
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns whether the registry is empty (never true in practice).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_words_reserved_on_every_tier() {
        for tier in [
            DialectTier::Base,
            DialectTier::V3,
            DialectTier::V4,
            DialectTier::V5,
        ] {
            let registry = KeywordRegistry::for_tier(tier);
            assert!(registry.is_reserved("SELECT"));
            assert!(registry.is_reserved("rows"));
            assert!(registry.is_reserved("Wait"));
        }
    }

    #[test]
    fn test_tier_sets_are_strictly_additive() {
        let base = KeywordRegistry::for_tier(DialectTier::Base);
        let v3 = KeywordRegistry::for_tier(DialectTier::V3);
        let v4 = KeywordRegistry::for_tier(DialectTier::V4);
        let v5 = KeywordRegistry::for_tier(DialectTier::V5);

        assert!(base.len() < v3.len());
        assert!(v3.len() < v4.len());
        assert!(v4.len() < v5.len());

        // Everything reserved on a lower tier stays reserved above it.
        assert!(v3.words.is_superset(&base.words));
        assert!(v4.words.is_superset(&v3.words));
        assert!(v5.words.is_superset(&v4.words));
    }

    #[test]
    fn test_tier_specific_words() {
        let base = KeywordRegistry::for_tier(DialectTier::Base);
        let v3 = KeywordRegistry::for_tier(DialectTier::V3);
        let v4 = KeywordRegistry::for_tier(DialectTier::V4);
        let v5 = KeywordRegistry::for_tier(DialectTier::V5);

        assert!(!base.is_reserved("BOOLEAN"));
        assert!(v3.is_reserved("BOOLEAN"));

        assert!(!v3.is_reserved("DECFLOAT"));
        assert!(v4.is_reserved("DECFLOAT"));

        assert!(!v4.is_reserved("CALL"));
        assert!(v5.is_reserved("CALL"));
    }

    #[test]
    fn test_non_keywords_not_reserved() {
        let registry = KeywordRegistry::for_tier(DialectTier::V5);
        assert!(!registry.is_reserved("users"));
        assert!(!registry.is_reserved("my_column"));
        assert!(!registry.is_reserved(""));
    }
}
