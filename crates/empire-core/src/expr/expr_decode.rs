use super::{ColumnExpr, Operand};
use crate::DataType;

/// Maps the values of an expression to other values.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprDecode {
    pub expr: Box<ColumnExpr>,

    /// `(when, then)` pairs in declaration order.
    pub pairs: Vec<(Operand, Operand)>,

    pub otherwise: Option<Operand>,

    pub data_type: DataType,
}

impl ColumnExpr {
    pub fn decode<I, K, V>(self, pairs: I, otherwise: Option<Operand>, data_type: DataType) -> ColumnExpr
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Operand>,
        V: Into<Operand>,
    {
        ExprDecode {
            expr: Box::new(self),
            pairs: pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
            otherwise,
            data_type,
        }
        .into()
    }
}

impl From<ExprDecode> for ColumnExpr {
    fn from(value: ExprDecode) -> Self {
        ColumnExpr::Decode(value)
    }
}
