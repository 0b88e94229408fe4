use crate::{ColumnExpr, ColumnRef, Error, Result, Value};

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

/// Addresses a field of a record: by position, by column, by expression or
/// by name.
#[derive(Debug, Clone, Copy)]
pub enum Field<'a> {
    Index(usize),
    Column(ColumnRef),
    Expr(&'a ColumnExpr),

    /// Compared case-insensitively
    Name(&'a str),
}

impl From<usize> for Field<'_> {
    fn from(value: usize) -> Self {
        Field::Index(value)
    }
}

impl From<i32> for Field<'_> {
    fn from(value: i32) -> Self {
        Field::Index(usize::try_from(value).unwrap_or(usize::MAX))
    }
}

impl From<ColumnRef> for Field<'_> {
    fn from(value: ColumnRef) -> Self {
        Field::Column(value)
    }
}

impl<'a> From<&'a ColumnExpr> for Field<'a> {
    fn from(value: &'a ColumnExpr) -> Self {
        Field::Expr(value)
    }
}

impl<'a> From<&'a str> for Field<'a> {
    fn from(value: &'a str) -> Self {
        Field::Name(value)
    }
}

/// Converts a non-null field value.
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Result<Self>;
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Result<Self> {
        Ok(value.clone())
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Result<Self> {
        value.to_text()
    }
}

impl FromValue for i64 {
    fn from_value(value: &Value) -> Result<Self> {
        value.to_i64()
    }
}

impl FromValue for i32 {
    fn from_value(value: &Value) -> Result<Self> {
        let v = value.to_i64()?;
        i32::try_from(v).map_err(|_| Error::type_conversion(value.clone(), "i32"))
    }
}

impl FromValue for f64 {
    fn from_value(value: &Value) -> Result<Self> {
        value.to_f64()
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Result<Self> {
        value.to_bool()
    }
}

impl FromValue for Decimal {
    fn from_value(value: &Value) -> Result<Self> {
        value.to_decimal()
    }
}

impl FromValue for NaiveDate {
    fn from_value(value: &Value) -> Result<Self> {
        value.to_date()
    }
}

impl FromValue for NaiveDateTime {
    fn from_value(value: &Value) -> Result<Self> {
        value.to_datetime()
    }
}

/// Read access to a row of values, each produced by a column expression.
///
/// The typed getters read null as zero, `false` or the empty string. Use
/// [`get_optional`](RecordData::get_optional) to tell null apart.
pub trait RecordData {
    fn field_count(&self) -> usize;

    /// The expression that produced field `index`.
    fn column_expr(&self, index: usize) -> Option<&ColumnExpr>;

    fn field_name(&self, index: usize) -> Option<&str>;

    fn value(&self, index: usize) -> Option<&Value>;

    /// Position of the field produced by `expr`. A plain column also
    /// matches an expression that reads it, such as an alias.
    fn field_index(&self, expr: &ColumnExpr) -> Option<usize> {
        let count = self.field_count();

        if let Some(index) = (0..count).find(|&i| self.column_expr(i) == Some(expr)) {
            return Some(index);
        }

        let column = expr.as_column()?;
        (0..count).find(|&i| {
            self.column_expr(i)
                .and_then(ColumnExpr::update_column)
                .is_some_and(|c| c == column)
        })
    }

    fn field_index_by_name(&self, name: &str) -> Option<usize> {
        (0..self.field_count()).find(|&i| {
            self.field_name(i)
                .is_some_and(|field| field.eq_ignore_ascii_case(name))
        })
    }

    fn index_of(&self, field: Field<'_>) -> Result<usize> {
        let index = match field {
            Field::Index(index) => (index < self.field_count()).then_some(index),
            Field::Column(column) => self.field_index(&ColumnExpr::Column(column)),
            Field::Expr(expr) => self.field_index(expr),
            Field::Name(name) => self.field_index_by_name(name),
        };

        index.ok_or_else(|| {
            Error::invalid_argument("field", format!("{field:?} is not a field of the record"))
        })
    }

    fn get<'f>(&self, field: impl Into<Field<'f>>) -> Result<&Value> {
        let index = self.index_of(field.into())?;
        self.value(index).ok_or_else(|| {
            Error::invalid_argument("field", format!("field {index} has no value"))
        })
    }

    /// Unknown fields read as null.
    fn is_null<'f>(&self, field: impl Into<Field<'f>>) -> bool {
        self.get(field).map_or(true, Value::is_null)
    }

    fn get_optional<'f, T: FromValue>(&self, field: impl Into<Field<'f>>) -> Result<Option<T>> {
        match self.get(field)? {
            Value::Null => Ok(None),
            value => T::from_value(value).map(Some),
        }
    }

    fn get_string<'f>(&self, field: impl Into<Field<'f>>) -> Result<String> {
        Ok(self.get_optional(field)?.unwrap_or_default())
    }

    fn get_i64<'f>(&self, field: impl Into<Field<'f>>) -> Result<i64> {
        Ok(self.get_optional(field)?.unwrap_or_default())
    }

    fn get_f64<'f>(&self, field: impl Into<Field<'f>>) -> Result<f64> {
        Ok(self.get_optional(field)?.unwrap_or_default())
    }

    fn get_bool<'f>(&self, field: impl Into<Field<'f>>) -> Result<bool> {
        Ok(self.get_optional(field)?.unwrap_or_default())
    }

    fn get_decimal<'f>(&self, field: impl Into<Field<'f>>) -> Result<Decimal> {
        Ok(self.get_optional(field)?.unwrap_or_default())
    }

    fn get_date<'f>(&self, field: impl Into<Field<'f>>) -> Result<Option<NaiveDate>> {
        self.get_optional(field)
    }

    fn get_datetime<'f>(&self, field: impl Into<Field<'f>>) -> Result<Option<NaiveDateTime>> {
        self.get_optional(field)
    }
}
