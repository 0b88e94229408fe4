use super::ColumnExpr;
use crate::{DataType, Value};

/// A literal value with the type it is rendered as.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprValue {
    pub value: Value,
    pub data_type: DataType,
}

impl ColumnExpr {
    /// A literal rendered according to its own type.
    pub fn value(value: impl Into<Value>) -> ColumnExpr {
        let value = value.into();
        let data_type = value.infer_data_type();
        ExprValue { value, data_type }.into()
    }

    /// A literal rendered as `data_type`.
    pub fn typed_value(value: impl Into<Value>, data_type: DataType) -> ColumnExpr {
        ExprValue {
            value: value.into(),
            data_type,
        }
        .into()
    }

    /// SQL text emitted verbatim.
    pub fn raw(sql: impl Into<String>) -> ColumnExpr {
        ExprValue {
            value: Value::String(sql.into()),
            data_type: DataType::Unknown,
        }
        .into()
    }
}

impl From<ExprValue> for ColumnExpr {
    fn from(value: ExprValue) -> Self {
        ColumnExpr::Value(value)
    }
}
