use super::{Column, ColumnRef, DatabaseId, Index};
use crate::Command;

use std::fmt;

/// A table or view: a source of columns and rows.
#[derive(Debug, Clone)]
pub struct RowSet {
    /// Uniquely identifies the rowset
    pub id: RowSetId,

    /// Name of the table or view
    pub name: String,

    /// Alias used when the rowset is referenced in a query.
    pub alias: String,

    pub kind: RowSetKind,

    pub columns: Vec<Column>,

    /// Primary key first, when one is set.
    pub indexes: Vec<Index>,

    /// The select a view is defined by.
    pub view_command: Option<Command>,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowSetId {
    pub db: DatabaseId,
    pub index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowSetKind {
    Table,
    View,
}

impl RowSet {
    pub(crate) fn new(id: RowSetId, name: String, alias: String, kind: RowSetKind) -> Self {
        Self {
            id,
            name,
            alias,
            kind,
            columns: vec![],
            indexes: vec![],
            view_command: None,
        }
    }

    pub fn is_table(&self) -> bool {
        self.kind == RowSetKind::Table
    }

    pub fn is_view(&self) -> bool {
        self.kind == RowSetKind::View
    }

    pub fn column(&self, id: impl Into<ColumnRef>) -> &Column {
        &self.columns[id.into().index]
    }

    pub fn column_by_name(&self, name: &str) -> Option<&Column> {
        self.columns
            .iter()
            .find(|column| column.name.eq_ignore_ascii_case(name))
    }

    pub fn column_refs(&self) -> impl ExactSizeIterator<Item = ColumnRef> + '_ {
        self.columns.iter().map(|column| column.id)
    }

    pub fn primary_key(&self) -> Option<&Index> {
        self.indexes.iter().find(|index| index.is_primary_key())
    }

    pub fn primary_key_columns(&self) -> &[ColumnRef] {
        self.primary_key()
            .map(|index| &index.columns[..])
            .unwrap_or(&[])
    }

    pub fn is_key_column(&self, column: ColumnRef) -> bool {
        self.primary_key_columns().contains(&column)
    }
}

impl fmt::Debug for RowSetId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "RowSetId({}/{})", self.db.0, self.index)
    }
}

impl fmt::Display for RowSetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RowSetKind::Table => "TABLE",
            RowSetKind::View => "VIEW",
        })
    }
}
