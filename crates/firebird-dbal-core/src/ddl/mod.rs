//! DDL statement generation.
//!
//! Translates the neutral schema model into ordered lists of native
//! statements. Executing a returned list sequentially against an
//! empty-compatible catalog reproduces the neutral schema; executing it out
//! of order may violate definitional dependencies (a trigger references its
//! sequence, so the sequence statement always comes first).
//!
//! The engine has no single-statement multi-column ALTER, no rename-table
//! primitive, and no inline column comments, so altering a table emits one
//! statement per changed property and comments go out as separate
//! `COMMENT ON COLUMN` statements.

mod identity;

pub use identity::{EmulatedIdentity, IdentityRegistry, emulated_identity};

use tracing::debug;

use crate::error::PlatformError;
use crate::platform::FirebirdPlatform;
use crate::schema::{
    ChangedColumn, Column, ColumnChange, DefaultValue, ForeignKey, ForeignKeyAction, Index, Table,
    TableDiff,
};

/// Derives a deterministic index name (`IDX_`/`UNIQ_` prefix plus a hash of
/// table and column names), always within the identifier length limit.
#[must_use]
pub fn index_name(table: &str, columns: &[String], unique: bool) -> String {
    let prefix = if unique { "UNIQ_" } else { "IDX_" };
    let seed = format!("{table}_{}", columns.join("_")).to_ascii_uppercase();
    format!("{prefix}{}", &identity::name_hash(&seed)[..8])
}

/// Generates native DDL from the neutral schema model.
///
/// Owns the [`IdentityRegistry`] so that emulated autoincrement objects
/// created here can be found again by introspection and
/// `last_insert_id`-style lookups.
#[derive(Debug)]
pub struct DdlBuilder<'a> {
    platform: &'a FirebirdPlatform,
    identities: IdentityRegistry,
}

impl<'a> DdlBuilder<'a> {
    /// Creates a builder for a platform.
    #[must_use]
    pub fn new(platform: &'a FirebirdPlatform) -> Self {
        Self {
            platform,
            identities: IdentityRegistry::new(),
        }
    }

    /// Returns the registry of emulated identities created so far.
    #[must_use]
    pub const fn identities(&self) -> &IdentityRegistry {
        &self.identities
    }

    /// Whether this platform marks autoincrement columns as native
    /// identity columns rather than emulating them.
    fn uses_native_identity(&self) -> bool {
        self.platform.capabilities().identity_columns
    }

    /// Renders a column definition fragment.
    fn column_ddl(&self, column: &Column) -> String {
        let mut sql = format!(
            "{} {}",
            self.platform.quote_single_identifier(&column.name),
            self.platform.type_ddl(&column.ty)
        );

        if column.autoincrement && self.uses_native_identity() {
            sql.push_str(" GENERATED BY DEFAULT AS IDENTITY");
        }

        if let Some(default) = self.platform.default_ddl(&column.default) {
            sql.push_str(" DEFAULT ");
            sql.push_str(&default);
        }

        if !column.nullable {
            sql.push_str(" NOT NULL");
        }

        sql
    }

    /// Generates the ordered statement list creating a table.
    ///
    /// Order: the table itself, then sequence+trigger pairs for emulated
    /// autoincrement columns (sequence strictly before trigger), then
    /// indexes, then foreign keys, then column comments.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::IdentifierTooLong`] for an explicit index
    /// or constraint name over the tier's identifier limit.
    pub fn create_table(&mut self, table: &Table) -> Result<Vec<String>, PlatformError> {
        let mut statements = Vec::new();

        let mut body: Vec<String> = table.columns.iter().map(|c| self.column_ddl(c)).collect();
        if !table.primary_key.is_empty() {
            let cols: Vec<String> = table
                .primary_key
                .iter()
                .map(|c| self.platform.quote_single_identifier(c))
                .collect();
            body.push(format!("PRIMARY KEY ({})", cols.join(", ")));
        }
        statements.push(format!(
            "CREATE TABLE {} ({})",
            self.platform.quote_single_identifier(&table.name),
            body.join(", ")
        ));

        if !self.uses_native_identity() {
            for column in table.columns.iter().filter(|c| c.autoincrement) {
                let identity = emulated_identity(
                    &table.name,
                    &column.name,
                    self.platform.max_identifier_length(),
                );
                statements.push(self.create_sequence(&identity.sequence_name));
                statements.push(self.create_identity_trigger(&identity));
                self.identities.register(identity);
            }
        }

        for index in &table.indexes {
            statements.push(self.create_index(&table.name, index)?);
        }

        for fk in &table.foreign_keys {
            statements.push(self.add_foreign_key(&table.name, fk)?);
        }

        for column in &table.columns {
            if let Some(ref comment) = column.comment {
                statements.push(self.comment_on_column(&table.name, &column.name, Some(comment)));
            }
        }

        debug!(
            table = %table.name,
            statements = statements.len(),
            "generated create-table batch"
        );
        Ok(statements)
    }

    /// Generates the ordered statement list applying a [`TableDiff`].
    ///
    /// Changed columns emit one statement per changed property, ordered
    /// type change, then nullability, then default, then comment — changing
    /// a type may require the default to be droppable first, so the
    /// ordering is part of the contract.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::NotSupported`] when the diff requests a
    /// table rename; the engine has no atomic rename-table primitive.
    pub fn alter_table(&mut self, diff: &TableDiff) -> Result<Vec<String>, PlatformError> {
        if diff.new_name.is_some() {
            return Err(PlatformError::NotSupported {
                platform: self.platform.name(),
                operation: "renaming tables",
            });
        }

        let table = self.platform.quote_single_identifier(&diff.table);
        let mut statements = Vec::new();

        for name in &diff.removed_foreign_keys {
            statements.push(format!(
                "ALTER TABLE {table} DROP CONSTRAINT {}",
                self.platform.quote_single_identifier(name)
            ));
        }

        for name in &diff.removed_indexes {
            statements.push(self.drop_index(name));
        }

        for column in &diff.added_columns {
            statements.push(format!(
                "ALTER TABLE {table} ADD {}",
                self.column_ddl(column)
            ));
            if column.autoincrement && !self.uses_native_identity() {
                let identity = emulated_identity(
                    &diff.table,
                    &column.name,
                    self.platform.max_identifier_length(),
                );
                statements.push(self.create_sequence(&identity.sequence_name));
                statements.push(self.create_identity_trigger(&identity));
                self.identities.register(identity);
            }
            if let Some(ref comment) = column.comment {
                statements.push(self.comment_on_column(&diff.table, &column.name, Some(comment)));
            }
        }

        for changed in &diff.changed_columns {
            statements.extend(self.alter_column(&diff.table, changed));
        }

        for (old, new) in &diff.renamed_columns {
            statements.push(format!(
                "ALTER TABLE {table} ALTER COLUMN {} TO {}",
                self.platform.quote_single_identifier(old),
                self.platform.quote_single_identifier(new)
            ));
        }

        for name in &diff.removed_columns {
            statements.push(format!(
                "ALTER TABLE {table} DROP {}",
                self.platform.quote_single_identifier(name)
            ));
        }

        for index in &diff.added_indexes {
            statements.push(self.create_index(&diff.table, index)?);
        }

        for fk in &diff.added_foreign_keys {
            statements.push(self.add_foreign_key(&diff.table, fk)?);
        }

        debug!(
            table = %diff.table,
            statements = statements.len(),
            "generated alter-table batch"
        );
        Ok(statements)
    }

    /// One statement per changed property, in the contract order.
    fn alter_column(&self, table_name: &str, changed: &ChangedColumn) -> Vec<String> {
        let changes = &changed.changes;
        let table = self.platform.quote_single_identifier(table_name);
        let column = self.platform.quote_single_identifier(&changed.new.name);
        let mut statements = Vec::new();

        if changes.contains(&ColumnChange::Type) {
            statements.push(format!(
                "ALTER TABLE {table} ALTER COLUMN {column} TYPE {}",
                self.platform.type_ddl(&changed.new.ty)
            ));
        }

        if changes.contains(&ColumnChange::Nullable) {
            statements.push(self.alter_nullability(table_name, &changed.new));
        }

        if changes.contains(&ColumnChange::Default) {
            if changed.new.default == DefaultValue::None {
                statements.push(format!(
                    "ALTER TABLE {table} ALTER COLUMN {column} DROP DEFAULT"
                ));
            } else if let Some(default) = self.platform.default_ddl(&changed.new.default) {
                statements.push(format!(
                    "ALTER TABLE {table} ALTER COLUMN {column} SET DEFAULT {default}"
                ));
            }
        }

        if changes.contains(&ColumnChange::Comment) {
            statements.push(self.comment_on_column(
                table_name,
                &changed.new.name,
                changed.new.comment.as_deref(),
            ));
        }

        statements
    }

    /// Nullability change; tiers without `SET/DROP NOT NULL` fall back to
    /// flipping the null flag in the system tables.
    fn alter_nullability(&self, table_name: &str, column: &Column) -> String {
        if self.platform.capabilities().alter_column_nullability {
            let keyword = if column.nullable { "DROP" } else { "SET" };
            format!(
                "ALTER TABLE {} ALTER COLUMN {} {keyword} NOT NULL",
                self.platform.quote_single_identifier(table_name),
                self.platform.quote_single_identifier(&column.name)
            )
        } else {
            let flag = if column.nullable { "NULL" } else { "1" };
            format!(
                "UPDATE RDB$RELATION_FIELDS SET RDB$NULL_FLAG = {flag} \
                 WHERE RDB$RELATION_NAME = {} AND RDB$FIELD_NAME = {}",
                self.platform.quote_string_literal(table_name),
                self.platform.quote_string_literal(&column.name)
            )
        }
    }

    /// Renaming a table always fails: the engine has no atomic rename.
    ///
    /// # Errors
    ///
    /// Always returns [`PlatformError::NotSupported`].
    pub fn rename_table(&self, _old_name: &str, _new_name: &str) -> Result<Vec<String>, PlatformError> {
        Err(PlatformError::NotSupported {
            platform: self.platform.name(),
            operation: "renaming tables",
        })
    }

    /// Generates the statements dropping a table, followed by the backing
    /// sequences of any emulated identities registered for it (triggers go
    /// down with the table).
    pub fn drop_table(&mut self, name: &str) -> Vec<String> {
        let mut statements = vec![format!(
            "DROP TABLE {}",
            self.platform.quote_single_identifier(name)
        )];
        for identity in self.identities.for_table(name) {
            statements.push(format!(
                "DROP SEQUENCE {}",
                self.platform.quote_single_identifier(&identity.sequence_name)
            ));
        }
        self.identities.remove_table(name);
        statements
    }

    /// Generates a CREATE INDEX statement; always separate from table
    /// creation.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::IdentifierTooLong`] when the explicit index
    /// name exceeds the tier's identifier limit.
    pub fn create_index(&self, table: &str, index: &Index) -> Result<String, PlatformError> {
        self.check_identifier(&index.name)?;
        let unique = if index.unique { "UNIQUE " } else { "" };
        let cols: Vec<String> = index
            .columns
            .iter()
            .map(|c| self.platform.quote_single_identifier(c))
            .collect();
        Ok(format!(
            "CREATE {unique}INDEX {} ON {} ({})",
            self.platform.quote_single_identifier(&index.name),
            self.platform.quote_single_identifier(table),
            cols.join(", ")
        ))
    }

    /// Generates a DROP INDEX statement.
    #[must_use]
    pub fn drop_index(&self, name: &str) -> String {
        format!(
            "DROP INDEX {}",
            self.platform.quote_single_identifier(name)
        )
    }

    /// Generates a CREATE SEQUENCE statement.
    #[must_use]
    pub fn create_sequence(&self, name: &str) -> String {
        format!(
            "CREATE SEQUENCE {}",
            self.platform.quote_single_identifier(name)
        )
    }

    /// Generates a DROP SEQUENCE statement.
    #[must_use]
    pub fn drop_sequence(&self, name: &str) -> String {
        format!(
            "DROP SEQUENCE {}",
            self.platform.quote_single_identifier(name)
        )
    }

    /// The before-insert trigger assigning the next sequence value when the
    /// column is unset on insert.
    fn create_identity_trigger(&self, identity: &EmulatedIdentity) -> String {
        let table = self.platform.quote_single_identifier(&identity.table);
        let column = self.platform.quote_single_identifier(&identity.column);
        format!(
            "CREATE TRIGGER {trigger} FOR {table} BEFORE INSERT AS \
             BEGIN IF (NEW.{column} IS NULL) THEN \
             NEW.{column} = NEXT VALUE FOR {sequence}; END",
            trigger = self.platform.quote_single_identifier(&identity.trigger_name),
            sequence = self.platform.quote_single_identifier(&identity.sequence_name),
        )
    }

    /// ALTER TABLE ... ADD CONSTRAINT ... FOREIGN KEY.
    fn add_foreign_key(&self, table: &str, fk: &ForeignKey) -> Result<String, PlatformError> {
        self.check_identifier(&fk.name)?;
        let cols: Vec<String> = fk
            .columns
            .iter()
            .map(|c| self.platform.quote_single_identifier(c))
            .collect();
        let ref_cols: Vec<String> = fk
            .referenced_columns
            .iter()
            .map(|c| self.platform.quote_single_identifier(c))
            .collect();

        let mut sql = format!(
            "ALTER TABLE {} ADD CONSTRAINT {} FOREIGN KEY ({}) REFERENCES {} ({})",
            self.platform.quote_single_identifier(table),
            self.platform.quote_single_identifier(&fk.name),
            cols.join(", "),
            self.platform.quote_single_identifier(&fk.referenced_table),
            ref_cols.join(", ")
        );
        if fk.on_delete != ForeignKeyAction::NoAction {
            sql.push_str(" ON DELETE ");
            sql.push_str(fk.on_delete.as_sql());
        }
        if fk.on_update != ForeignKeyAction::NoAction {
            sql.push_str(" ON UPDATE ");
            sql.push_str(fk.on_update.as_sql());
        }
        Ok(sql)
    }

    /// COMMENT ON COLUMN; the engine has no inline column-comment syntax.
    #[must_use]
    pub fn comment_on_column(&self, table: &str, column: &str, comment: Option<&str>) -> String {
        let value = comment.map_or_else(
            || "NULL".to_string(),
            |text| self.platform.quote_string_literal(text),
        );
        format!(
            "COMMENT ON COLUMN {}.{} IS {value}",
            self.platform.quote_single_identifier(table),
            self.platform.quote_single_identifier(column)
        )
    }

    fn check_identifier(&self, name: &str) -> Result<(), PlatformError> {
        let max_length = self.platform.max_identifier_length();
        if name.chars().count() > max_length {
            return Err(PlatformError::IdentifierTooLong {
                identifier: name.to_string(),
                max_length,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::DialectTier;
    use crate::schema::{ChangedColumn, FbType};

    fn platform(tier: DialectTier) -> FirebirdPlatform {
        FirebirdPlatform::new(tier)
    }

    fn users_table() -> Table {
        Table::new("users")
            .column(Column::new("id", FbType::Integer).not_null().autoincrement())
            .column(Column::new("username", FbType::Varchar(255)).not_null())
            .primary_key(vec!["id".to_string()])
    }

    #[test]
    fn test_create_table_native_identity() {
        let platform = platform(DialectTier::V3);
        let mut builder = DdlBuilder::new(&platform);
        let statements = builder.create_table(&users_table()).unwrap();

        assert_eq!(statements.len(), 1);
        assert_eq!(
            statements[0],
            "CREATE TABLE \"users\" (\
             \"id\" INTEGER GENERATED BY DEFAULT AS IDENTITY NOT NULL, \
             \"username\" VARCHAR(255) NOT NULL, \
             PRIMARY KEY (\"id\"))"
        );
        assert!(builder.identities().is_empty());
    }

    #[test]
    fn test_create_table_emulated_identity_ordering() {
        let platform = platform(DialectTier::Base);
        let mut builder = DdlBuilder::new(&platform);
        let statements = builder.create_table(&users_table()).unwrap();

        // Hard ordering contract: table, then sequence, then trigger.
        assert_eq!(statements.len(), 3);
        assert!(statements[0].starts_with("CREATE TABLE \"users\""));
        assert!(!statements[0].contains("IDENTITY"));
        assert_eq!(statements[1], "CREATE SEQUENCE \"USERS_ID_SEQ\"");
        assert_eq!(
            statements[2],
            "CREATE TRIGGER \"USERS_ID_TRG\" FOR \"users\" BEFORE INSERT AS \
             BEGIN IF (NEW.\"id\" IS NULL) THEN \
             NEW.\"id\" = NEXT VALUE FOR \"USERS_ID_SEQ\"; END"
        );

        let identity = builder.identities().lookup("users", "id").unwrap();
        assert_eq!(identity.sequence_name, "USERS_ID_SEQ");
        assert_eq!(identity.trigger_name, "USERS_ID_TRG");
    }

    #[test]
    fn test_create_table_with_index_fk_and_comment() {
        let platform = platform(DialectTier::V3);
        let mut builder = DdlBuilder::new(&platform);
        let table = Table::new("orders")
            .column(Column::new("id", FbType::Integer).not_null())
            .column(
                Column::new("user_id", FbType::Integer)
                    .not_null()
                    .comment("owning user"),
            )
            .primary_key(vec!["id".to_string()])
            .index(Index::new(
                "IDX_ORDERS_USER",
                vec!["user_id".to_string()],
                false,
            ))
            .foreign_key(ForeignKey {
                name: "FK_ORDERS_USER".to_string(),
                columns: vec!["user_id".to_string()],
                referenced_table: "users".to_string(),
                referenced_columns: vec!["id".to_string()],
                on_delete: ForeignKeyAction::Cascade,
                on_update: ForeignKeyAction::NoAction,
            });

        let statements = builder.create_table(&table).unwrap();
        assert_eq!(statements.len(), 4);
        assert!(statements[0].starts_with("CREATE TABLE \"orders\""));
        assert_eq!(
            statements[1],
            "CREATE INDEX \"IDX_ORDERS_USER\" ON \"orders\" (\"user_id\")"
        );
        assert_eq!(
            statements[2],
            "ALTER TABLE \"orders\" ADD CONSTRAINT \"FK_ORDERS_USER\" \
             FOREIGN KEY (\"user_id\") REFERENCES \"users\" (\"id\") ON DELETE CASCADE"
        );
        assert_eq!(
            statements[3],
            "COMMENT ON COLUMN \"orders\".\"user_id\" IS 'owning user'"
        );
    }

    #[test]
    fn test_rename_table_always_fails() {
        for tier in [
            DialectTier::Base,
            DialectTier::V3,
            DialectTier::V4,
            DialectTier::V5,
        ] {
            let platform = platform(tier);
            let builder = DdlBuilder::new(&platform);
            let err = builder.rename_table("users", "accounts").unwrap_err();
            assert_eq!(
                err,
                PlatformError::NotSupported {
                    platform: tier.platform_name(),
                    operation: "renaming tables",
                }
            );
        }
    }

    #[test]
    fn test_alter_table_rename_request_fails() {
        let platform = platform(DialectTier::V5);
        let mut builder = DdlBuilder::new(&platform);
        let diff = TableDiff {
            new_name: Some("accounts".to_string()),
            ..TableDiff::new("users")
        };
        assert!(matches!(
            builder.alter_table(&diff),
            Err(PlatformError::NotSupported { .. })
        ));
    }

    #[test]
    fn test_alter_table_per_property_statements() {
        let platform = platform(DialectTier::V3);
        let mut builder = DdlBuilder::new(&platform);

        let old = Column::new("price", FbType::Integer);
        let new = Column::new(
            "price",
            FbType::Numeric {
                precision: 9,
                scale: 2,
            },
        )
        .not_null()
        .default(DefaultValue::Int(0));

        let diff = TableDiff {
            changed_columns: vec![ChangedColumn {
                old,
                new,
                changes: vec![
                    ColumnChange::Type,
                    ColumnChange::Nullable,
                    ColumnChange::Default,
                ],
            }],
            ..TableDiff::new("products")
        };

        let statements = builder.alter_table(&diff).unwrap();
        assert_eq!(
            statements,
            vec![
                "ALTER TABLE \"products\" ALTER COLUMN \"price\" TYPE NUMERIC(9, 2)".to_string(),
                "ALTER TABLE \"products\" ALTER COLUMN \"price\" SET NOT NULL".to_string(),
                "ALTER TABLE \"products\" ALTER COLUMN \"price\" SET DEFAULT 0".to_string(),
            ]
        );
    }

    #[test]
    fn test_alter_nullability_base_tier_uses_system_tables() {
        let platform = platform(DialectTier::Base);
        let mut builder = DdlBuilder::new(&platform);

        let old = Column::new("email", FbType::Varchar(255)).not_null();
        let new = Column::new("email", FbType::Varchar(255));
        let diff = TableDiff {
            changed_columns: vec![ChangedColumn {
                old,
                new,
                changes: vec![ColumnChange::Nullable],
            }],
            ..TableDiff::new("users")
        };

        let statements = builder.alter_table(&diff).unwrap();
        assert_eq!(
            statements,
            vec![
                "UPDATE RDB$RELATION_FIELDS SET RDB$NULL_FLAG = NULL \
                 WHERE RDB$RELATION_NAME = 'users' AND RDB$FIELD_NAME = 'email'"
                    .to_string()
            ]
        );
    }

    #[test]
    fn test_alter_table_add_drop_rename_columns() {
        let platform = platform(DialectTier::V3);
        let mut builder = DdlBuilder::new(&platform);
        let diff = TableDiff {
            added_columns: vec![Column::new("email", FbType::Varchar(255)).not_null()],
            removed_columns: vec!["legacy".to_string()],
            renamed_columns: vec![("name".to_string(), "full_name".to_string())],
            ..TableDiff::new("users")
        };

        let statements = builder.alter_table(&diff).unwrap();
        assert_eq!(
            statements,
            vec![
                "ALTER TABLE \"users\" ADD \"email\" VARCHAR(255) NOT NULL".to_string(),
                "ALTER TABLE \"users\" ALTER COLUMN \"name\" TO \"full_name\"".to_string(),
                "ALTER TABLE \"users\" DROP \"legacy\"".to_string(),
            ]
        );
    }

    #[test]
    fn test_alter_table_added_autoincrement_column_emulated() {
        let platform = platform(DialectTier::Base);
        let mut builder = DdlBuilder::new(&platform);
        let diff = TableDiff {
            added_columns: vec![Column::new("seq_no", FbType::Integer)
                .not_null()
                .autoincrement()],
            ..TableDiff::new("events")
        };

        let statements = builder.alter_table(&diff).unwrap();
        assert_eq!(statements.len(), 3);
        assert!(statements[0].starts_with("ALTER TABLE \"events\" ADD"));
        assert!(statements[1].starts_with("CREATE SEQUENCE"));
        assert!(statements[2].starts_with("CREATE TRIGGER"));
        assert!(builder.identities().lookup("events", "seq_no").is_some());
    }

    #[test]
    fn test_drop_table_drops_identity_sequences() {
        let platform = platform(DialectTier::Base);
        let mut builder = DdlBuilder::new(&platform);
        builder.create_table(&users_table()).unwrap();

        let statements = builder.drop_table("users");
        assert_eq!(
            statements,
            vec![
                "DROP TABLE \"users\"".to_string(),
                "DROP SEQUENCE \"USERS_ID_SEQ\"".to_string(),
            ]
        );
        assert!(builder.identities().is_empty());
    }

    #[test]
    fn test_index_name_is_deterministic_and_bounded() {
        let columns = vec!["a_long_column".to_string(), "another_column".to_string()];
        let a = index_name("some_table", &columns, false);
        let b = index_name("some_table", &columns, false);
        assert_eq!(a, b);
        assert!(a.starts_with("IDX_"));
        assert_eq!(a.len(), 12);

        let unique = index_name("some_table", &columns, true);
        assert!(unique.starts_with("UNIQ_"));
        assert_ne!(a, unique);
    }

    #[test]
    fn test_explicit_index_name_over_limit_rejected() {
        let platform = platform(DialectTier::V3);
        let builder = DdlBuilder::new(&platform);
        let index = Index::new("X".repeat(40), vec!["a".to_string()], false);
        assert!(matches!(
            builder.create_index("t", &index),
            Err(PlatformError::IdentifierTooLong { max_length: 31, .. })
        ));
    }

    #[test]
    fn test_comment_reset_uses_null() {
        let platform = platform(DialectTier::V3);
        let builder = DdlBuilder::new(&platform);
        assert_eq!(
            builder.comment_on_column("t", "c", None),
            "COMMENT ON COLUMN \"t\".\"c\" IS NULL"
        );
    }

    #[test]
    fn test_default_rendered_before_not_null() {
        let platform = platform(DialectTier::V3);
        let mut builder = DdlBuilder::new(&platform);
        let table = Table::new("t").column(
            Column::new("status", FbType::Varchar(16))
                .not_null()
                .default(DefaultValue::Str("new".to_string())),
        );
        let statements = builder.create_table(&table).unwrap();
        assert!(statements[0].contains("\"status\" VARCHAR(16) DEFAULT 'new' NOT NULL"));
    }
}
