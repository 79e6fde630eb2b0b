//! Table diff model.
//!
//! The diff is supplied by the external framework's comparator; this crate
//! only consumes it. It is never persisted beyond the single alter
//! operation it describes.

use serde::{Deserialize, Serialize};

use super::{Column, ForeignKey, Index};

/// A single changed property of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnChange {
    /// The data type changed.
    Type,
    /// The nullability changed.
    Nullable,
    /// The default value changed.
    Default,
    /// The comment changed.
    Comment,
}

/// A column whose definition changed, with the old and new definitions and
/// the set of properties that differ.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangedColumn {
    /// The column as it currently exists.
    pub old: Column,
    /// The desired column definition.
    pub new: Column,
    /// Which properties changed. Ordering of the generated statements is
    /// fixed by the DDL builder, not by this list.
    pub changes: Vec<ColumnChange>,
}

/// The difference between a table's current and desired definitions.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TableDiff {
    /// Name of the table being altered.
    pub table: String,
    /// Requested new table name. The engine has no atomic rename-table
    /// primitive, so any value here makes the DDL builder fail.
    pub new_name: Option<String>,
    /// Columns to add.
    pub added_columns: Vec<Column>,
    /// Names of columns to drop.
    pub removed_columns: Vec<String>,
    /// Columns whose definition changed.
    pub changed_columns: Vec<ChangedColumn>,
    /// Columns to rename, as `(old, new)` pairs.
    pub renamed_columns: Vec<(String, String)>,
    /// Indexes to create.
    pub added_indexes: Vec<Index>,
    /// Names of indexes to drop.
    pub removed_indexes: Vec<String>,
    /// Foreign keys to add.
    pub added_foreign_keys: Vec<ForeignKey>,
    /// Names of foreign key constraints to drop.
    pub removed_foreign_keys: Vec<String>,
}

impl TableDiff {
    /// Creates an empty diff for a table.
    #[must_use]
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            ..Self::default()
        }
    }

    /// Returns whether the diff contains no changes at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.new_name.is_none()
            && self.added_columns.is_empty()
            && self.removed_columns.is_empty()
            && self.changed_columns.is_empty()
            && self.renamed_columns.is_empty()
            && self.added_indexes.is_empty()
            && self.removed_indexes.is_empty()
            && self.added_foreign_keys.is_empty()
            && self.removed_foreign_keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FbType;

    #[test]
    fn test_empty_diff() {
        let diff = TableDiff::new("users");
        assert_eq!(diff.table, "users");
        assert!(diff.is_empty());
    }

    #[test]
    fn test_diff_with_changes_is_not_empty() {
        let mut diff = TableDiff::new("users");
        diff.added_columns
            .push(Column::new("email", FbType::Varchar(255)));
        assert!(!diff.is_empty());

        let rename_only = TableDiff {
            new_name: Some("accounts".to_string()),
            ..TableDiff::new("users")
        };
        assert!(!rename_only.is_empty());
    }
}
