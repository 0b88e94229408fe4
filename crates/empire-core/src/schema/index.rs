use super::ColumnRef;

#[derive(Debug, Clone, PartialEq)]
pub struct Index {
    /// Index name, unique within the database
    pub name: String,

    pub kind: IndexKind,

    /// Indexed columns, in key order.
    pub columns: Vec<ColumnRef>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKind {
    PrimaryKey,
    Unique,
    Standard,
}

impl Index {
    pub fn is_primary_key(&self) -> bool {
        self.kind == IndexKind::PrimaryKey
    }

    pub fn is_unique(&self) -> bool {
        matches!(self.kind, IndexKind::PrimaryKey | IndexKind::Unique)
    }

    pub fn contains(&self, column: ColumnRef) -> bool {
        self.columns.contains(&column)
    }
}
