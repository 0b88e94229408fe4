use super::ColumnExpr;
use crate::{DataType, Value};

#[derive(Debug, Clone, PartialEq)]
pub struct ExprConvert {
    pub expr: Box<ColumnExpr>,

    /// Target type
    pub to: DataType,

    /// Optional format argument, used by the dialects that take one.
    pub format: Option<Value>,
}

impl ColumnExpr {
    pub fn convert_to(self, to: DataType) -> ColumnExpr {
        ExprConvert {
            expr: Box::new(self),
            to,
            format: None,
        }
        .into()
    }

    pub fn convert_to_format(self, to: DataType, format: impl Into<Value>) -> ColumnExpr {
        ExprConvert {
            expr: Box::new(self),
            to,
            format: Some(format.into()),
        }
        .into()
    }
}

impl From<ExprConvert> for ColumnExpr {
    fn from(value: ExprConvert) -> Self {
        ColumnExpr::Convert(value)
    }
}
