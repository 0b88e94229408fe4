use empire_core::{ColumnExpr, DataRecord};

use std::vec;

/// The rows of a query, each typed by the command's select list.
#[derive(Debug)]
pub struct Reader {
    columns: Vec<ColumnExpr>,
    rows: vec::IntoIter<DataRecord>,
}

impl Reader {
    pub(crate) fn new(columns: Vec<ColumnExpr>, rows: Vec<DataRecord>) -> Self {
        Self {
            columns,
            rows: rows.into_iter(),
        }
    }

    /// The select list the rows were read with.
    pub fn columns(&self) -> &[ColumnExpr] {
        &self.columns
    }

    pub fn field_count(&self) -> usize {
        self.columns.len()
    }
}

impl Iterator for Reader {
    type Item = DataRecord;

    fn next(&mut self) -> Option<DataRecord> {
        self.rows.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.rows.size_hint()
    }
}

impl ExactSizeIterator for Reader {}
