//! Emulated identity naming and registry.
//!
//! Dialect tiers without native identity columns synthesize autoincrement
//! from a sequence plus a before-insert trigger. The names of those objects
//! are derived deterministically from table and column name; the registry
//! keeps the explicit mapping so introspection and `last_insert_id` lookups
//! do not have to re-derive names by convention.

use std::collections::HashMap;

/// Number of hash characters inserted when a derived name is truncated.
const HASH_LEN: usize = 8;

const SEQUENCE_SUFFIX: &str = "_SEQ";
const TRIGGER_SUFFIX: &str = "_TRG";

/// The sequence and trigger backing one emulated autoincrement column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmulatedIdentity {
    /// Table owning the column.
    pub table: String,
    /// The autoincrement column.
    pub column: String,
    /// Name of the backing sequence.
    pub sequence_name: String,
    /// Name of the before-insert trigger.
    pub trigger_name: String,
}

/// FNV-1a hash of a name, as uppercase hex.
pub(crate) fn name_hash(input: &str) -> String {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in input.bytes() {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    format!("{hash:016X}")
}

/// Derives an object name from a base, keeping it within `max_len`.
///
/// When `base + suffix` fits, the name is simply the uppercased base plus
/// the suffix. Otherwise the base is truncated and a hash of the full
/// untruncated name is inserted before the suffix, so distinct long bases
/// keep distinct derived names.
pub(crate) fn derived_object_name(base: &str, suffix: &str, max_len: usize) -> String {
    let upper = base.to_ascii_uppercase();
    if upper.len() + suffix.len() <= max_len {
        return format!("{upper}{suffix}");
    }

    let hash = &name_hash(&upper)[..HASH_LEN];
    let keep = max_len.saturating_sub(suffix.len() + HASH_LEN);
    let head: String = upper.chars().take(keep).collect();
    format!("{head}{hash}{suffix}")
}

/// Derives the identity object names for a table+column pair.
#[must_use]
pub fn emulated_identity(table: &str, column: &str, max_identifier_length: usize) -> EmulatedIdentity {
    let base = format!("{table}_{column}");
    EmulatedIdentity {
        table: table.to_string(),
        column: column.to_string(),
        sequence_name: derived_object_name(&base, SEQUENCE_SUFFIX, max_identifier_length),
        trigger_name: derived_object_name(&base, TRIGGER_SUFFIX, max_identifier_length),
    }
}

/// Explicit mapping of emulated identities, keyed case-insensitively by
/// `(table, column)`.
#[derive(Debug, Clone, Default)]
pub struct IdentityRegistry {
    entries: HashMap<(String, String), EmulatedIdentity>,
}

impl IdentityRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn key(table: &str, column: &str) -> (String, String) {
        (table.to_ascii_uppercase(), column.to_ascii_uppercase())
    }

    /// Records an identity.
    pub fn register(&mut self, identity: EmulatedIdentity) {
        self.entries
            .insert(Self::key(&identity.table, &identity.column), identity);
    }

    /// Looks up the identity for a table+column pair.
    #[must_use]
    pub fn lookup(&self, table: &str, column: &str) -> Option<&EmulatedIdentity> {
        self.entries.get(&Self::key(table, column))
    }

    /// Looks up an identity by its sequence name.
    #[must_use]
    pub fn lookup_by_sequence(&self, sequence_name: &str) -> Option<&EmulatedIdentity> {
        self.entries
            .values()
            .find(|e| e.sequence_name.eq_ignore_ascii_case(sequence_name))
    }

    /// Returns the identities registered for a table.
    #[must_use]
    pub fn for_table(&self, table: &str) -> Vec<&EmulatedIdentity> {
        let upper = table.to_ascii_uppercase();
        let mut identities: Vec<&EmulatedIdentity> = self
            .entries
            .iter()
            .filter(|((t, _), _)| *t == upper)
            .map(|(_, e)| e)
            .collect();
        identities.sort_by(|a, b| a.column.cmp(&b.column));
        identities
    }

    /// Removes every identity registered for a table.
    pub fn remove_table(&mut self, table: &str) {
        let upper = table.to_ascii_uppercase();
        self.entries.retain(|(t, _), _| *t != upper);
    }

    /// Returns the number of registered identities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_names_keep_plain_suffix() {
        let identity = emulated_identity("users", "id", 31);
        assert_eq!(identity.sequence_name, "USERS_ID_SEQ");
        assert_eq!(identity.trigger_name, "USERS_ID_TRG");
    }

    #[test]
    fn test_names_are_deterministic() {
        let a = emulated_identity("orders", "id", 31);
        let b = emulated_identity("orders", "id", 31);
        assert_eq!(a, b);
    }

    #[test]
    fn test_long_names_truncate_within_limit() {
        let identity = emulated_identity(
            "a_rather_long_table_name_indeed",
            "a_long_column_name",
            31,
        );
        assert!(identity.sequence_name.len() <= 31);
        assert!(identity.trigger_name.len() <= 31);
        assert!(identity.sequence_name.ends_with("_SEQ"));
        assert!(identity.trigger_name.ends_with("_TRG"));
    }

    #[test]
    fn test_truncation_preserves_uniqueness() {
        let a = emulated_identity("a_rather_long_table_name_indeed", "first_column_name", 31);
        let b = emulated_identity("a_rather_long_table_name_indeed", "first_column_nam2", 31);
        assert_ne!(a.sequence_name, b.sequence_name);
        assert_ne!(a.trigger_name, b.trigger_name);
    }

    #[test]
    fn test_registry_lookup_is_case_insensitive() {
        let mut registry = IdentityRegistry::new();
        registry.register(emulated_identity("users", "id", 31));

        assert!(registry.lookup("USERS", "ID").is_some());
        assert!(registry.lookup("users", "id").is_some());
        assert!(registry.lookup("users", "other").is_none());
    }

    #[test]
    fn test_registry_lookup_by_sequence() {
        let mut registry = IdentityRegistry::new();
        registry.register(emulated_identity("users", "id", 31));

        let found = registry.lookup_by_sequence("users_id_seq").unwrap();
        assert_eq!(found.table, "users");
        assert_eq!(found.column, "id");
        assert!(registry.lookup_by_sequence("missing_seq").is_none());
    }

    #[test]
    fn test_registry_for_table_and_removal() {
        let mut registry = IdentityRegistry::new();
        registry.register(emulated_identity("users", "id", 31));
        registry.register(emulated_identity("users", "alt_id", 31));
        registry.register(emulated_identity("orders", "id", 31));

        assert_eq!(registry.for_table("users").len(), 2);

        registry.remove_table("users");
        assert!(registry.for_table("users").is_empty());
        assert_eq!(registry.len(), 1);
    }
}
