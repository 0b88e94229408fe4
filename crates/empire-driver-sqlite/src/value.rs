use empire_core::{DataType, Error, Result, Value as CoreValue};
use rusqlite::types::{ToSql, ToSqlOutput, Value as SqlValue, ValueRef};

/// Binds a core value as a SQLite parameter.
#[derive(Debug)]
pub(crate) struct Value<'a>(pub(crate) &'a CoreValue);

impl Value<'_> {
    /// Converts a column of a result row into a value of `ty`.
    pub(crate) fn from_sql(value: ValueRef<'_>, ty: DataType) -> Result<CoreValue> {
        let raw = match value {
            ValueRef::Null => return Ok(CoreValue::Null),
            ValueRef::Integer(v) => CoreValue::I64(v),
            ValueRef::Real(v) => CoreValue::F64(v),
            ValueRef::Text(v) => CoreValue::String(
                std::str::from_utf8(v)
                    .map_err(Error::driver_operation_failed)?
                    .to_string(),
            ),
            ValueRef::Blob(v) => CoreValue::Bytes(v.to_vec()),
        };

        raw.convert_to(ty)
    }
}

impl ToSql for Value<'_> {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self.0 {
            CoreValue::Null => ToSqlOutput::Owned(SqlValue::Null),
            CoreValue::Bool(v) => ToSqlOutput::Owned(SqlValue::Integer(i64::from(*v))),
            CoreValue::I64(v) => ToSqlOutput::Owned(SqlValue::Integer(*v)),
            CoreValue::F64(v) => ToSqlOutput::Owned(SqlValue::Real(*v)),
            CoreValue::Decimal(v) => ToSqlOutput::Owned(SqlValue::Text(v.to_string())),
            CoreValue::String(v) => ToSqlOutput::Borrowed(ValueRef::Text(v.as_bytes())),
            CoreValue::Date(v) => ToSqlOutput::Owned(SqlValue::Text(v.format("%Y-%m-%d").to_string())),
            CoreValue::DateTime(v) => ToSqlOutput::Owned(SqlValue::Text(
                v.format("%Y-%m-%d %H:%M:%S%.f").to_string(),
            )),
            CoreValue::Bytes(v) => ToSqlOutput::Borrowed(ValueRef::Blob(&v[..])),
            other @ (CoreValue::SysDate | CoreValue::List(_)) => {
                return Err(rusqlite::Error::ToSqlConversionFailure(Box::new(
                    Error::type_conversion(other.clone(), "SQLite parameter"),
                )))
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::Value;

    use empire_core::{DataType, Value as CoreValue};
    use rusqlite::types::ValueRef;

    #[test]
    fn rows_are_read_by_column_type() {
        assert_eq!(
            Value::from_sql(ValueRef::Integer(1), DataType::Bool).unwrap(),
            CoreValue::Bool(true)
        );
        assert_eq!(
            Value::from_sql(ValueRef::Real(2.5), DataType::Decimal).unwrap(),
            CoreValue::Decimal("2.5".parse().unwrap())
        );
        assert_eq!(
            Value::from_sql(ValueRef::Text(b"2024-01-31"), DataType::Date).unwrap(),
            CoreValue::Date(chrono::NaiveDate::from_ymd_opt(2024, 1, 31).unwrap())
        );
        assert_eq!(
            Value::from_sql(ValueRef::Null, DataType::Integer).unwrap(),
            CoreValue::Null
        );
        assert!(Value::from_sql(ValueRef::Text(b"abc"), DataType::Integer)
            .unwrap_err()
            .is_type_conversion());
    }
}
