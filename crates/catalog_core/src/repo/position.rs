//! Position bookkeeping shared by every ordered catalog table.
//!
//! # Invariants
//! - Sibling order is `position ASC, id ASC` within one scope.
//! - Reordering only swaps two positions or renumbers a scope to `0..n`.

use super::{RepoError, RepoResult};
use crate::model::{CatalogId, Scope};
use rusqlite::{params, Connection, OptionalExtension, Transaction, TransactionBehavior};

/// Static description of one ordered table.
#[derive(Debug, Clone, Copy)]
pub struct OrderedTable {
    pub table: &'static str,
    /// Foreign key column grouping children; `None` for top-level tables.
    pub parent_column: Option<&'static str>,
    pub label: &'static str,
}

impl OrderedTable {
    pub const fn root(table: &'static str, label: &'static str) -> Self {
        Self {
            table,
            parent_column: None,
            label,
        }
    }

    pub const fn child(table: &'static str, parent_column: &'static str, label: &'static str) -> Self {
        Self {
            table,
            parent_column: Some(parent_column),
            label,
        }
    }

    /// Builds the `WHERE` fragment selecting one scope plus its bind value.
    pub(crate) fn scope_filter(&self, scope: Scope) -> RepoResult<(String, Option<String>)> {
        match (self.parent_column, scope) {
            (None, Scope::Root) => Ok(("1 = 1".to_string(), None)),
            (Some(column), Scope::Parent(parent)) => {
                Ok((format!("{column} = ?1"), Some(parent.to_string())))
            }
            _ => Err(RepoError::InvalidScope {
                label: self.label,
                scope,
            }),
        }
    }

    fn not_found(&self, id: CatalogId) -> RepoError {
        RepoError::NotFound {
            label: self.label,
            id,
        }
    }
}

/// Returns `MAX(position) + 1` within the scope, `0` for an empty scope.
pub fn next_position(conn: &Connection, spec: &OrderedTable, scope: Scope) -> RepoResult<i64> {
    let (filter, bind) = spec.scope_filter(scope)?;
    let sql = format!(
        "SELECT COALESCE(MAX(position), -1) + 1 FROM {} WHERE {filter};",
        spec.table
    );
    let next = match bind {
        Some(parent) => conn.query_row(&sql, [parent], |row| row.get(0))?,
        None => conn.query_row(&sql, [], |row| row.get(0))?,
    };
    Ok(next)
}

pub fn exists(conn: &Connection, spec: &OrderedTable, id: CatalogId) -> RepoResult<bool> {
    let sql = format!("SELECT EXISTS(SELECT 1 FROM {} WHERE id = ?1);", spec.table);
    let exists: i64 = conn.query_row(&sql, [id.to_string()], |row| row.get(0))?;
    Ok(exists == 1)
}

pub fn set_position(
    conn: &Connection,
    spec: &OrderedTable,
    id: CatalogId,
    position: i64,
) -> RepoResult<()> {
    let sql = format!(
        "UPDATE {}
         SET position = ?2,
             updated_at = (strftime('%s', 'now') * 1000)
         WHERE id = ?1;",
        spec.table
    );
    let changed = conn.execute(&sql, params![id.to_string(), position])?;
    if changed == 0 {
        return Err(spec.not_found(id));
    }
    Ok(())
}

/// Exchanges the stored positions of two rows in one transaction.
pub fn swap_positions(
    conn: &Connection,
    spec: &OrderedTable,
    first: CatalogId,
    second: CatalogId,
) -> RepoResult<()> {
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)?;
    let first_position = load_position(&tx, spec, first)?;
    let second_position = load_position(&tx, spec, second)?;
    set_position(&tx, spec, first, second_position)?;
    set_position(&tx, spec, second, first_position)?;
    tx.commit()?;
    Ok(())
}

/// Assigns positions `0..n` in the given order in one transaction.
pub fn renumber(conn: &Connection, spec: &OrderedTable, ordered: &[CatalogId]) -> RepoResult<()> {
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)?;
    for (index, id) in ordered.iter().enumerate() {
        set_position(&tx, spec, *id, index as i64)?;
    }
    tx.commit()?;
    Ok(())
}

pub fn delete_row(conn: &Connection, spec: &OrderedTable, id: CatalogId) -> RepoResult<()> {
    let sql = format!("DELETE FROM {} WHERE id = ?1;", spec.table);
    let changed = conn.execute(&sql, [id.to_string()])?;
    if changed == 0 {
        return Err(spec.not_found(id));
    }
    Ok(())
}

pub fn clear_table(conn: &Connection, spec: &OrderedTable) -> RepoResult<()> {
    conn.execute(&format!("DELETE FROM {};", spec.table), [])?;
    Ok(())
}

fn load_position(conn: &Connection, spec: &OrderedTable, id: CatalogId) -> RepoResult<i64> {
    let sql = format!("SELECT position FROM {} WHERE id = ?1;", spec.table);
    conn.query_row(&sql, [id.to_string()], |row| row.get(0))
        .optional()?
        .ok_or_else(|| spec.not_found(id))
}

#[cfg(test)]
mod tests {
    use super::OrderedTable;
    use crate::model::Scope;
    use crate::repo::RepoError;
    use uuid::Uuid;

    const ROOT: OrderedTable = OrderedTable::root("genres", "genre");
    const CHILD: OrderedTable = OrderedTable::child("songs", "music_id", "song");

    #[test]
    fn root_table_rejects_parent_scope() {
        let err = ROOT.scope_filter(Scope::Parent(Uuid::new_v4())).unwrap_err();
        assert!(matches!(err, RepoError::InvalidScope { label: "genre", .. }));
    }

    #[test]
    fn child_table_binds_parent_id() {
        let parent = Uuid::new_v4();
        let (filter, bind) = CHILD.scope_filter(Scope::Parent(parent)).unwrap();
        assert_eq!(filter, "music_id = ?1");
        assert_eq!(bind, Some(parent.to_string()));
        assert!(CHILD.scope_filter(Scope::Root).is_err());
    }
}
