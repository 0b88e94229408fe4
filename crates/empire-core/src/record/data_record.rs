use super::RecordData;
use crate::{ColumnExpr, Result, Value};

/// An owned row: values plus the expressions they were read from.
#[derive(Debug, Clone, PartialEq)]
pub struct DataRecord {
    columns: Vec<ColumnExpr>,
    names: Vec<String>,
    values: Vec<Value>,
}

impl DataRecord {
    pub fn new(columns: Vec<ColumnExpr>, names: Vec<String>, values: Vec<Value>) -> Self {
        debug_assert_eq!(columns.len(), names.len());
        debug_assert_eq!(columns.len(), values.len());
        Self {
            columns,
            names,
            values,
        }
    }

    /// Copies the current row of any record source.
    pub fn snapshot<R: RecordData + ?Sized>(record: &R) -> Self {
        let count = record.field_count();
        let mut columns = Vec::with_capacity(count);
        let mut names = Vec::with_capacity(count);
        let mut values = Vec::with_capacity(count);

        for i in 0..count {
            if let Some(expr) = record.column_expr(i) {
                columns.push(expr.clone());
                names.push(record.field_name(i).unwrap_or_default().to_string());
                values.push(record.value(i).cloned().unwrap_or_default());
            }
        }

        Self::new(columns, names, values)
    }

    pub fn set_value(&mut self, index: usize, value: impl Into<Value>) -> Result<()> {
        let count = self.values.len();
        let Some(slot) = self.values.get_mut(index) else {
            return Err(crate::Error::invalid_argument(
                "index",
                format!("field index {index} out of range for {count} fields"),
            ));
        };
        *slot = value.into();
        Ok(())
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}

impl RecordData for DataRecord {
    fn field_count(&self) -> usize {
        self.values.len()
    }

    fn column_expr(&self, index: usize) -> Option<&ColumnExpr> {
        self.columns.get(index)
    }

    fn field_name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    fn value(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }
}
