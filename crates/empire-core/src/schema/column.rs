use super::RowSetId;
use crate::{DataType, Value};

use std::fmt;

/// Column metadata.
///
/// Set up once when the schema is declared and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Handle to this column
    pub id: ColumnRef,

    /// The name of the column in the database.
    pub name: String,

    pub data_type: DataType,

    /// Length for text columns, precision for decimals.
    pub size: usize,

    /// Scale for decimals.
    pub scale: usize,

    /// When `true`, the column is declared `NOT NULL`.
    pub required: bool,

    /// Read-only columns cannot be set on a record.
    pub read_only: bool,

    /// The value is generated by the database on insert.
    pub auto_generated: bool,

    /// Default value used in the DDL.
    pub default: Option<Value>,
}

/// A lightweight handle to a column. Every column expression bottoms out in
/// one of these.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColumnRef {
    pub rowset: RowSetId,
    pub index: usize,
    pub data_type: DataType,
}

/// Describes a column to add to a rowset.
#[derive(Debug, Clone)]
pub struct ColumnDef {
    pub(crate) name: String,
    pub(crate) data_type: DataType,
    pub(crate) size: usize,
    pub(crate) scale: usize,
    pub(crate) required: bool,
    pub(crate) read_only: bool,
    pub(crate) default: Option<Value>,
}

impl ColumnDef {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            size: 0,
            scale: 0,
            required: false,
            read_only: false,
            default: None,
        }
    }

    pub fn size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    /// Precision and scale of a decimal column.
    pub fn precision(mut self, size: usize, scale: usize) -> Self {
        self.size = size;
        self.scale = scale;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }
}

impl Column {
    pub(crate) fn new(id: ColumnRef, def: ColumnDef) -> Self {
        let auto_generated = def.data_type == DataType::AutoInc;

        Self {
            id,
            name: def.name,
            data_type: def.data_type,
            size: def.size,
            scale: def.scale,
            required: def.required,
            // Generated values are never written by the application
            read_only: def.read_only || auto_generated,
            auto_generated,
            default: def.default,
        }
    }
}

impl From<&Column> for ColumnRef {
    fn from(value: &Column) -> Self {
        value.id
    }
}

impl fmt::Debug for ColumnRef {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            fmt,
            "ColumnRef({}/{}/{})",
            self.rowset.db.0, self.rowset.index, self.index
        )
    }
}
