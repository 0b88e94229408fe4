use super::RecordData;
use crate::{
    schema::{ColumnRef, RowSet, RowSetId},
    ColumnExpr, Command, Error, Result, Value,
};

/// A row of a table, tracking which fields were changed since it was read.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    rowset: RowSetId,
    rowset_name: String,
    is_table: bool,
    refs: Vec<ColumnRef>,
    columns: Vec<ColumnExpr>,
    names: Vec<String>,
    read_only: Vec<bool>,
    auto_generated: Vec<bool>,
    key: Vec<usize>,
    values: Vec<Value>,
    modified: Vec<bool>,
    state: RecordState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordState {
    /// Not yet stored in the database
    New,

    /// Read from the database and unchanged
    Valid,

    /// Read from the database and changed
    Modified,
}

impl Record {
    /// Creates a new record. Fields start out with their column defaults.
    pub fn new(rowset: &RowSet) -> Record {
        let values = rowset
            .columns
            .iter()
            .map(|column| {
                // the default of a generated column names its sequence
                if column.auto_generated {
                    Value::Null
                } else {
                    column.default.clone().unwrap_or_default()
                }
            })
            .collect();
        Record::with_values(rowset, values, RecordState::New)
    }

    /// Wraps a row read from the database.
    pub fn from_row(rowset: &RowSet, values: Vec<Value>) -> Result<Record> {
        if values.len() != rowset.columns.len() {
            return Err(Error::invalid_argument(
                "values",
                format!(
                    "expected {} values for `{}`, got {}",
                    rowset.columns.len(),
                    rowset.name,
                    values.len()
                ),
            ));
        }
        Ok(Record::with_values(rowset, values, RecordState::Valid))
    }

    fn with_values(rowset: &RowSet, values: Vec<Value>, state: RecordState) -> Record {
        let key = rowset
            .primary_key_columns()
            .iter()
            .map(|column| column.index)
            .collect();

        Record {
            rowset: rowset.id,
            rowset_name: rowset.name.clone(),
            is_table: rowset.is_table(),
            refs: rowset.column_refs().collect(),
            columns: rowset.column_refs().map(ColumnExpr::Column).collect(),
            names: rowset.columns.iter().map(|c| c.name.clone()).collect(),
            read_only: rowset.columns.iter().map(|c| c.read_only).collect(),
            auto_generated: rowset.columns.iter().map(|c| c.auto_generated).collect(),
            key,
            modified: vec![false; values.len()],
            values,
            state,
        }
    }

    pub fn rowset(&self) -> RowSetId {
        self.rowset
    }

    pub fn state(&self) -> RecordState {
        self.state
    }

    pub fn is_new(&self) -> bool {
        self.state == RecordState::New
    }

    pub fn is_modified(&self) -> bool {
        self.state == RecordState::Modified
    }

    pub fn is_field_modified(&self, column: ColumnRef) -> bool {
        self.position(column)
            .map(|index| self.modified[index])
            .unwrap_or(false)
    }

    /// Sets a field. Setting a field to its current value is a no-op.
    pub fn set_value(&mut self, column: ColumnRef, value: impl Into<Value>) -> Result<()> {
        let index = self.position(column).ok_or_else(|| {
            Error::invalid_argument(
                "column",
                format!("column is not part of `{}`", self.rowset_name),
            )
        })?;

        if self.read_only[index] {
            return Err(Error::invalid_argument(
                "column",
                format!("`{}.{}` is read-only", self.rowset_name, self.names[index]),
            ));
        }

        if !self.is_new() && self.key.contains(&index) {
            return Err(Error::invalid_argument(
                "column",
                format!(
                    "key column `{}.{}` of a stored record cannot change",
                    self.rowset_name, self.names[index]
                ),
            ));
        }

        let value = value.into().convert_to(column.data_type)?;
        if self.values[index] == value {
            return Ok(());
        }

        self.values[index] = value;
        self.modified[index] = true;
        if self.state == RecordState::Valid {
            self.state = RecordState::Modified;
        }

        Ok(())
    }

    /// Values of the primary key columns.
    pub fn key(&self) -> Vec<Value> {
        self.key.iter().map(|i| self.values[*i].clone()).collect()
    }

    /// Builds the INSERT for a new record. Generated and null fields are left
    /// to the database.
    pub fn insert_command(&self) -> Result<Command> {
        self.check_table()?;

        let mut cmd = Command::for_database(self.rowset.db);
        for (index, value) in self.values.iter().enumerate() {
            if self.auto_generated[index] || value.is_null() {
                continue;
            }
            cmd.set(self.column_ref(index).to(value.clone()))?;
        }

        if !cmd.has_set() {
            return Err(Error::object_not_valid(format!(
                "record of `{}` has no values to insert",
                self.rowset_name
            )));
        }

        Ok(cmd)
    }

    /// Builds the UPDATE of all modified fields, keyed by primary key.
    pub fn update_command(&self) -> Result<Command> {
        let mut cmd = self.key_command()?;

        for (index, value) in self.values.iter().enumerate() {
            if self.modified[index] && !self.key.contains(&index) {
                cmd.set(self.column_ref(index).to(value.clone()))?;
            }
        }

        if !cmd.has_set() {
            return Err(Error::object_not_valid(format!(
                "record of `{}` has no modified fields",
                self.rowset_name
            )));
        }

        Ok(cmd)
    }

    pub fn delete_command(&self) -> Result<Command> {
        self.key_command()
    }

    /// A command constrained to this record's primary key.
    pub fn key_command(&self) -> Result<Command> {
        self.check_table()?;

        if self.key.is_empty() {
            return Err(Error::invalid_schema(format!(
                "table `{}` has no primary key",
                self.rowset_name
            )));
        }

        let mut cmd = Command::for_database(self.rowset.db);
        for index in &self.key {
            let value = &self.values[*index];
            if value.is_null() {
                return Err(Error::object_not_valid(format!(
                    "key field `{}.{}` has no value",
                    self.rowset_name, self.names[*index]
                )));
            }
            cmd.where_(self.column_ref(*index).is(value.clone()))?;
        }

        Ok(cmd)
    }

    /// Stores a value generated by the database on insert.
    pub fn set_generated_value(&mut self, column: ColumnRef, value: Value) -> Result<()> {
        let index = self.position(column).ok_or_else(|| {
            Error::invalid_argument("column", "column is not part of the record")
        })?;
        self.values[index] = value.convert_to(column.data_type)?;
        Ok(())
    }

    /// The auto-generated columns of the record.
    pub fn generated_columns(&self) -> impl Iterator<Item = ColumnRef> + '_ {
        (0..self.values.len())
            .filter(|i| self.auto_generated[*i])
            .map(|i| self.column_ref(i))
    }

    /// Marks the record as stored and unchanged.
    pub fn mark_saved(&mut self) {
        self.state = RecordState::Valid;
        self.modified.iter_mut().for_each(|m| *m = false);
    }

    fn position(&self, column: ColumnRef) -> Option<usize> {
        (column.rowset == self.rowset && column.index < self.values.len()).then_some(column.index)
    }

    fn column_ref(&self, index: usize) -> ColumnRef {
        self.refs[index]
    }

    fn check_table(&self) -> Result<()> {
        if self.is_table {
            Ok(())
        } else {
            Err(Error::object_not_valid(format!(
                "`{}` is a view and cannot be written",
                self.rowset_name
            )))
        }
    }
}

impl RecordData for Record {
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
