//! Rectangular tables and the inner join over one scope's bucket

use std::collections::HashMap;

use serde::Serialize;

use crate::data::AuctionTable;

/// Column the addon shares across every table kind, used as the join key
pub const DEFAULT_JOIN_COLUMN: &str = "itemString";

/// Errors that can occur while joining a bucket
#[derive(Debug, thiserror::Error)]
pub enum JoinError {
    #[error("cannot join an empty bucket")]
    EmptyBucket,

    #[error("join column {0:?} missing from table")]
    MissingKey(String),
}

/// A plain rectangular table, the joined output for one scope.
///
/// Invariant: every row has exactly `columns.len()` values, inherited from
/// [`AuctionTable`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<u64>>,
}

impl From<AuctionTable> for DataTable {
    fn from(table: AuctionTable) -> Self {
        DataTable {
            columns: table.columns,
            rows: table.rows,
        }
    }
}

impl DataTable {
    /// Inner-join `right` into this table on the named key column.
    ///
    /// Left row order is preserved; duplicate keys on the right emit one
    /// output row per match, in right order. Result columns are the left
    /// columns followed by the right columns minus the right key column.
    pub fn inner_join(self, right: DataTable, key: &str) -> Result<DataTable, JoinError> {
        let left_key = column_index(&self.columns, key)?;
        let right_key = column_index(&right.columns, key)?;

        let mut by_key: HashMap<u64, Vec<&Vec<u64>>> = HashMap::new();
        for row in &right.rows {
            by_key.entry(row[right_key]).or_default().push(row);
        }

        let mut columns = self.columns;
        columns.extend(
            right
                .columns
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != right_key)
                .map(|(_, name)| name.clone()),
        );

        let mut rows = Vec::new();
        for left_row in &self.rows {
            let Some(matches) = by_key.get(&left_row[left_key]) else {
                continue;
            };
            for right_row in matches {
                let mut row = left_row.clone();
                row.extend(
                    right_row
                        .iter()
                        .enumerate()
                        .filter(|(i, _)| *i != right_key)
                        .map(|(_, value)| *value),
                );
                rows.push(row);
            }
        }

        Ok(DataTable { columns, rows })
    }
}

/// Join all tables in one scope's bucket into a single wide table.
///
/// Takes the bucket by value: the input is consumed, making the
/// "do not reuse" contract structural. A single-table bucket is returned
/// unchanged without touching the key column.
pub fn join_tables(tables: Vec<AuctionTable>, key: &str) -> Result<DataTable, JoinError> {
    let mut tables = tables.into_iter();
    let first = tables.next().ok_or(JoinError::EmptyBucket)?;

    let mut joined = DataTable::from(first);
    for table in tables {
        joined = joined.inner_join(DataTable::from(table), key)?;
    }
    Ok(joined)
}

fn column_index(columns: &[String], key: &str) -> Result<usize, JoinError> {
    columns
        .iter()
        .position(|name| name == key)
        .ok_or_else(|| JoinError::MissingKey(key.to_string()))
}
