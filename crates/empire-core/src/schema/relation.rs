use super::{ColumnRef, RowSetId};

/// A foreign key relation between two tables.
#[derive(Debug, Clone, PartialEq)]
pub struct Relation {
    /// Constraint name
    pub name: String,

    /// Pairs of (source, target) columns. All sources belong to one table and
    /// all targets to another.
    pub references: Vec<(ColumnRef, ColumnRef)>,

    pub on_delete_cascade: bool,
}

impl Relation {
    /// The table holding the foreign key.
    pub fn source_table(&self) -> RowSetId {
        self.references[0].0.rowset
    }

    /// The referenced table.
    pub fn target_table(&self) -> RowSetId {
        self.references[0].1.rowset
    }

    pub fn source_columns(&self) -> impl ExactSizeIterator<Item = ColumnRef> + '_ {
        self.references.iter().map(|(source, _)| *source)
    }

    pub fn target_columns(&self) -> impl ExactSizeIterator<Item = ColumnRef> + '_ {
        self.references.iter().map(|(_, target)| *target)
    }
}
