//! Schema introspection.
//!
//! Queries the engine's `RDB$` system catalog for a table and decodes each
//! row back into the neutral schema model. Decoding is the exact inverse of
//! DDL generation so that introspecting a table created from a neutral
//! column reproduces an equal column, modulo the documented lossy
//! normalizations. Columns come back in catalog-native physical order, and
//! querying a nonexistent table yields empty collections, never an error.

use tracing::debug;

use firebird_dbal_core::{
    emulated_identity, Column, FirebirdPlatform, ForeignKey, ForeignKeyAction, IdentityRegistry,
    Index, Table,
};

use crate::catalog::{decode_field_type, parse_default_source, PackedType};
use crate::conn::{Connection, Rows, Value};
use crate::error::Result;

/// Returns whether a name can be stored unquoted, and therefore lives
/// uppercased in the catalog.
fn is_plain_name(name: &str) -> bool {
    name.chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Returns the catalog form of a table or column name: plain names are
/// stored uppercased, quoted names verbatim.
fn catalog_name(name: &str) -> String {
    if is_plain_name(name) {
        name.to_ascii_uppercase()
    } else {
        name.to_string()
    }
}

/// The schema introspector.
///
/// Owns the injected connection, the resolved platform, and the registry of
/// emulated identities created through the DDL builder.
#[derive(Debug)]
pub struct SchemaManager<C: Connection> {
    conn: C,
    platform: FirebirdPlatform,
    identities: IdentityRegistry,
}

impl<C: Connection> SchemaManager<C> {
    /// Creates a schema manager with an empty identity registry.
    #[must_use]
    pub fn new(conn: C, platform: FirebirdPlatform) -> Self {
        Self::with_identities(conn, platform, IdentityRegistry::new())
    }

    /// Creates a schema manager around an existing identity registry.
    #[must_use]
    pub const fn with_identities(
        conn: C,
        platform: FirebirdPlatform,
        identities: IdentityRegistry,
    ) -> Self {
        Self {
            conn,
            platform,
            identities,
        }
    }

    /// Returns the platform.
    #[must_use]
    pub const fn platform(&self) -> &FirebirdPlatform {
        &self.platform
    }

    /// Returns the identity registry.
    #[must_use]
    pub const fn identities(&self) -> &IdentityRegistry {
        &self.identities
    }

    /// Returns the identity registry for registration.
    pub fn identities_mut(&mut self) -> &mut IdentityRegistry {
        &mut self.identities
    }

    /// Returns the underlying connection.
    pub fn connection_mut(&mut self) -> &mut C {
        &mut self.conn
    }

    fn catalog_query(&mut self, sql: &str) -> Result<Rows> {
        debug!(sql = %sql, "catalog query");
        self.conn.query(sql)
    }

    fn quoted_catalog_name(&self, name: &str) -> String {
        self.platform.quote_string_literal(&catalog_name(name))
    }

    /// Lists the names of all user tables.
    ///
    /// # Errors
    ///
    /// Propagates connection failures from the catalog query.
    pub fn list_table_names(&mut self) -> Result<Vec<String>> {
        let sql = "SELECT TRIM(RDB$RELATION_NAME) AS TABLE_NAME \
                   FROM RDB$RELATIONS \
                   WHERE RDB$SYSTEM_FLAG = 0 AND RDB$VIEW_BLR IS NULL \
                   ORDER BY RDB$RELATION_NAME";
        let rows = self.catalog_query(sql)?;
        Ok(rows
            .fetch_numeric()
            .filter_map(|row| row.first().and_then(Value::as_str))
            .map(|s| s.trim().to_string())
            .collect())
    }

    /// Lists a table's columns in catalog-native physical order.
    ///
    /// A nonexistent table yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::CatalogDecode`](crate::error::DriverError::CatalogDecode)
    /// when a row carries a type encoding with no known logical-type
    /// mapping, and propagates connection failures.
    pub fn list_columns(&mut self, table: &str) -> Result<Vec<Column>> {
        let native_identity = self.platform.capabilities().identity_columns;
        let identity_column = if native_identity {
            ", RF.RDB$IDENTITY_TYPE AS FIELD_IDENTITY_TYPE"
        } else {
            ""
        };
        let sql = format!(
            "SELECT TRIM(RF.RDB$FIELD_NAME) AS FIELD_NAME, \
             F.RDB$FIELD_TYPE AS FIELD_TYPE, \
             F.RDB$FIELD_SUB_TYPE AS FIELD_SUB_TYPE, \
             F.RDB$FIELD_SCALE AS FIELD_SCALE, \
             F.RDB$FIELD_PRECISION AS FIELD_PRECISION, \
             F.RDB$FIELD_LENGTH AS FIELD_LENGTH, \
             F.RDB$CHARACTER_LENGTH AS FIELD_CHAR_LENGTH, \
             RF.RDB$NULL_FLAG AS FIELD_NULL_FLAG, \
             RF.RDB$DEFAULT_SOURCE AS FIELD_DEFAULT_SOURCE, \
             RF.RDB$DESCRIPTION AS FIELD_DESCRIPTION\
             {identity_column} \
             FROM RDB$RELATION_FIELDS RF \
             JOIN RDB$FIELDS F ON F.RDB$FIELD_NAME = RF.RDB$FIELD_SOURCE \
             WHERE RF.RDB$RELATION_NAME = {} \
             ORDER BY RF.RDB$FIELD_POSITION",
            self.quoted_catalog_name(table)
        );
        let rows = self.catalog_query(&sql)?;

        // On tiers without identity columns, autoincrement is detected by
        // correlating the emulated-identity trigger names.
        let trigger_names = if native_identity || rows.is_empty() {
            Vec::new()
        } else {
            self.list_trigger_names(table)?
        };

        let mut columns = Vec::with_capacity(rows.len());
        for row in rows.fetch_numeric() {
            columns.push(self.decode_column(table, &rows, row, &trigger_names)?);
        }
        Ok(columns)
    }

    fn decode_column(
        &self,
        table: &str,
        rows: &Rows,
        row: &[Value],
        trigger_names: &[String],
    ) -> Result<Column> {
        let name = rows
            .value(row, "FIELD_NAME")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .trim()
            .to_string();

        let packed = PackedType {
            code: int_value(rows, row, "FIELD_TYPE"),
            sub_type: int_value(rows, row, "FIELD_SUB_TYPE"),
            scale: int_value(rows, row, "FIELD_SCALE"),
            precision: int_value(rows, row, "FIELD_PRECISION"),
            byte_length: int_value(rows, row, "FIELD_LENGTH"),
            char_length: opt_int_value(rows, row, "FIELD_CHAR_LENGTH"),
        };
        let ty = decode_field_type(self.platform.tier(), &name, &packed)?;

        let nullable = int_value(rows, row, "FIELD_NULL_FLAG") == 0;
        let default = parse_default_source(
            rows.value(row, "FIELD_DEFAULT_SOURCE").and_then(Value::as_str),
        );
        let comment = rows
            .value(row, "FIELD_DESCRIPTION")
            .and_then(Value::as_str)
            .map(str::to_string);

        let autoincrement = if self.platform.capabilities().identity_columns {
            rows.value(row, "FIELD_IDENTITY_TYPE")
                .is_some_and(|v| !v.is_null())
        } else {
            self.is_emulated_identity(table, &name, trigger_names)
        };

        Ok(Column {
            name,
            ty,
            nullable,
            default,
            autoincrement,
            comment,
        })
    }

    /// Detects an emulated identity: the registry is authoritative, with
    /// derived trigger-name correlation as the fallback for databases this
    /// process did not create.
    fn is_emulated_identity(&self, table: &str, column: &str, trigger_names: &[String]) -> bool {
        if let Some(identity) = self.identities.lookup(table, column) {
            return trigger_names.is_empty()
                || trigger_names.iter().any(|t| *t == identity.trigger_name);
        }
        let derived = emulated_identity(table, column, self.platform.max_identifier_length());
        trigger_names.iter().any(|t| *t == derived.trigger_name)
    }

    fn list_trigger_names(&mut self, table: &str) -> Result<Vec<String>> {
        let sql = format!(
            "SELECT TRIM(RDB$TRIGGER_NAME) AS TRIGGER_NAME \
             FROM RDB$TRIGGERS \
             WHERE RDB$RELATION_NAME = {}",
            self.quoted_catalog_name(table)
        );
        let rows = self.catalog_query(&sql)?;
        Ok(rows
            .fetch_numeric()
            .filter_map(|row| row.first().and_then(Value::as_str))
            .map(|s| s.trim().to_string())
            .collect())
    }

    /// Lists a table's indexes, excluding the ones backing foreign keys.
    ///
    /// # Errors
    ///
    /// Propagates connection failures from the catalog query.
    pub fn list_indexes(&mut self, table: &str) -> Result<Vec<Index>> {
        let sql = format!(
            "SELECT TRIM(I.RDB$INDEX_NAME) AS INDEX_NAME, \
             I.RDB$UNIQUE_FLAG AS UNIQUE_FLAG, \
             TRIM(S.RDB$FIELD_NAME) AS FIELD_NAME \
             FROM RDB$INDICES I \
             JOIN RDB$INDEX_SEGMENTS S ON S.RDB$INDEX_NAME = I.RDB$INDEX_NAME \
             WHERE I.RDB$RELATION_NAME = {} AND I.RDB$FOREIGN_KEY IS NULL \
             ORDER BY I.RDB$INDEX_NAME, S.RDB$FIELD_POSITION",
            self.quoted_catalog_name(table)
        );
        let rows = self.catalog_query(&sql)?;

        let mut indexes: Vec<Index> = Vec::new();
        for row in rows.fetch_numeric() {
            let name = rows
                .value(row, "INDEX_NAME")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .trim()
                .to_string();
            let unique = int_value(&rows, row, "UNIQUE_FLAG") == 1;
            let column = rows
                .value(row, "FIELD_NAME")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .trim()
                .to_string();

            match indexes.last_mut() {
                Some(last) if last.name == name => last.columns.push(column),
                _ => indexes.push(Index::new(name, vec![column], unique)),
            }
        }
        Ok(indexes)
    }

    /// Lists a table's foreign keys.
    ///
    /// # Errors
    ///
    /// Propagates connection failures from the catalog query.
    pub fn list_foreign_keys(&mut self, table: &str) -> Result<Vec<ForeignKey>> {
        let sql = format!(
            "SELECT TRIM(RC.RDB$CONSTRAINT_NAME) AS CONSTRAINT_NAME, \
             TRIM(S.RDB$FIELD_NAME) AS FIELD_NAME, \
             TRIM(RC2.RDB$RELATION_NAME) AS REF_TABLE, \
             TRIM(S2.RDB$FIELD_NAME) AS REF_FIELD, \
             TRIM(REFC.RDB$UPDATE_RULE) AS UPDATE_RULE, \
             TRIM(REFC.RDB$DELETE_RULE) AS DELETE_RULE \
             FROM RDB$RELATION_CONSTRAINTS RC \
             JOIN RDB$REF_CONSTRAINTS REFC ON REFC.RDB$CONSTRAINT_NAME = RC.RDB$CONSTRAINT_NAME \
             JOIN RDB$RELATION_CONSTRAINTS RC2 ON RC2.RDB$CONSTRAINT_NAME = REFC.RDB$CONST_NAME_UQ \
             JOIN RDB$INDEX_SEGMENTS S ON S.RDB$INDEX_NAME = RC.RDB$INDEX_NAME \
             JOIN RDB$INDEX_SEGMENTS S2 ON S2.RDB$INDEX_NAME = RC2.RDB$INDEX_NAME \
             AND S2.RDB$FIELD_POSITION = S.RDB$FIELD_POSITION \
             WHERE RC.RDB$CONSTRAINT_TYPE = 'FOREIGN KEY' AND RC.RDB$RELATION_NAME = {} \
             ORDER BY RC.RDB$CONSTRAINT_NAME, S.RDB$FIELD_POSITION",
            self.quoted_catalog_name(table)
        );
        let rows = self.catalog_query(&sql)?;

        let mut foreign_keys: Vec<ForeignKey> = Vec::new();
        for row in rows.fetch_numeric() {
            let name = str_value(&rows, row, "CONSTRAINT_NAME");
            let column = str_value(&rows, row, "FIELD_NAME");
            let referenced_column = str_value(&rows, row, "REF_FIELD");

            match foreign_keys.last_mut() {
                Some(last) if last.name == name => {
                    last.columns.push(column);
                    last.referenced_columns.push(referenced_column);
                }
                _ => foreign_keys.push(ForeignKey {
                    name,
                    columns: vec![column],
                    referenced_table: str_value(&rows, row, "REF_TABLE"),
                    referenced_columns: vec![referenced_column],
                    on_delete: referential_action(&str_value(&rows, row, "DELETE_RULE")),
                    on_update: referential_action(&str_value(&rows, row, "UPDATE_RULE")),
                }),
            }
        }
        Ok(foreign_keys)
    }

    /// Lists a table's primary key columns in key order.
    ///
    /// # Errors
    ///
    /// Propagates connection failures from the catalog query.
    pub fn list_primary_key(&mut self, table: &str) -> Result<Vec<String>> {
        let sql = format!(
            "SELECT TRIM(S.RDB$FIELD_NAME) AS FIELD_NAME \
             FROM RDB$RELATION_CONSTRAINTS RC \
             JOIN RDB$INDEX_SEGMENTS S ON S.RDB$INDEX_NAME = RC.RDB$INDEX_NAME \
             WHERE RC.RDB$CONSTRAINT_TYPE = 'PRIMARY KEY' AND RC.RDB$RELATION_NAME = {} \
             ORDER BY S.RDB$FIELD_POSITION",
            self.quoted_catalog_name(table)
        );
        let rows = self.catalog_query(&sql)?;
        Ok(rows
            .fetch_numeric()
            .filter_map(|row| row.first().and_then(Value::as_str))
            .map(|s| s.trim().to_string())
            .collect())
    }

    /// Introspects a whole table: columns, primary key, indexes, and
    /// foreign keys.
    ///
    /// # Errors
    ///
    /// Fails on undecodable catalog metadata or a lost connection; a
    /// nonexistent table is not an error and introspects as empty.
    pub fn introspect_table(&mut self, table: &str) -> Result<Table> {
        let mut result = Table::new(table);
        result.columns = self.list_columns(table)?;
        result.primary_key = self.list_primary_key(table)?;
        result.indexes = self.list_indexes(table)?;
        result.foreign_keys = self.list_foreign_keys(table)?;
        Ok(result)
    }

    /// Returns whether a table exists.
    ///
    /// # Errors
    ///
    /// Propagates connection failures from the catalog query.
    pub fn table_exists(&mut self, table: &str) -> Result<bool> {
        let sql = format!(
            "SELECT FIRST 1 1 FROM RDB$RELATIONS WHERE RDB$RELATION_NAME = {}",
            self.quoted_catalog_name(table)
        );
        Ok(!self.catalog_query(&sql)?.is_empty())
    }

    /// Returns whether the connected database is reachable.
    ///
    /// # Errors
    ///
    /// Propagates connection failures from the probe query.
    pub fn database_exists(&mut self) -> Result<bool> {
        Ok(!self
            .catalog_query("SELECT FIRST 1 1 FROM RDB$DATABASE")?
            .is_empty())
    }

    /// Returns the last value drawn for an emulated or named identity.
    ///
    /// With a registered emulated identity for the table/column pair, its
    /// backing sequence is consulted; otherwise `sequence_or_table` is used
    /// as the sequence name directly.
    ///
    /// # Errors
    ///
    /// Propagates the connection's sequence lookup failure.
    pub fn last_insert_id(&mut self, sequence_or_table: &str, column: Option<&str>) -> Result<i64> {
        let sequence = column
            .and_then(|c| self.identities.lookup(sequence_or_table, c))
            .map_or(sequence_or_table, |identity| &identity.sequence_name)
            .to_string();
        self.conn.last_insert_id(&sequence)
    }
}

fn int_value(rows: &Rows, row: &[Value], column: &str) -> i32 {
    rows.value(row, column)
        .and_then(Value::as_int)
        .and_then(|i| i32::try_from(i).ok())
        .unwrap_or(0)
}

fn opt_int_value(rows: &Rows, row: &[Value], column: &str) -> Option<i32> {
    rows.value(row, column)
        .and_then(Value::as_int)
        .and_then(|i| i32::try_from(i).ok())
}

fn str_value(rows: &Rows, row: &[Value], column: &str) -> String {
    rows.value(row, column)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .trim()
        .to_string()
}

fn referential_action(rule: &str) -> ForeignKeyAction {
    match rule.to_ascii_uppercase().as_str() {
        "RESTRICT" => ForeignKeyAction::Restrict,
        "CASCADE" => ForeignKeyAction::Cascade,
        "SET NULL" => ForeignKeyAction::SetNull,
        "SET DEFAULT" => ForeignKeyAction::SetDefault,
        _ => ForeignKeyAction::NoAction,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_name_uppercases_plain_names() {
        assert_eq!(catalog_name("users"), "USERS");
        assert_eq!(catalog_name("USERS"), "USERS");
        assert_eq!(catalog_name("weird name"), "weird name");
    }

    #[test]
    fn test_referential_action_parsing() {
        assert_eq!(referential_action("CASCADE"), ForeignKeyAction::Cascade);
        assert_eq!(referential_action("SET NULL"), ForeignKeyAction::SetNull);
        assert_eq!(referential_action("RESTRICT"), ForeignKeyAction::Restrict);
        assert_eq!(referential_action("NO ACTION"), ForeignKeyAction::NoAction);
        assert_eq!(referential_action(""), ForeignKeyAction::NoAction);
    }
}
