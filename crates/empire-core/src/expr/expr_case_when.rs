use super::{ColumnExpr, CompareExpr, Operand};
use crate::DataType;

/// `CASE WHEN c1 THEN v1 .. ELSE other END`
#[derive(Debug, Clone, PartialEq)]
pub struct ExprCaseWhen {
    pub whens: Vec<(CompareExpr, Operand)>,
    pub otherwise: Option<Operand>,
    pub data_type: DataType,
}

/// Builds a searched case expression. The result type is taken from the
/// first `then` value, falling back to the else value.
pub fn case_when<I, V>(whens: I, otherwise: impl Into<Operand>) -> ColumnExpr
where
    I: IntoIterator<Item = (CompareExpr, V)>,
    V: Into<Operand>,
{
    let whens: Vec<(CompareExpr, Operand)> = whens
        .into_iter()
        .map(|(cmp, value)| (cmp, value.into()))
        .collect();
    let otherwise = otherwise.into();

    let data_type = whens
        .iter()
        .map(|(_, value)| value.data_type())
        .find(|data_type| *data_type != DataType::Unknown)
        .unwrap_or_else(|| otherwise.data_type());

    ExprCaseWhen {
        whens,
        otherwise: Some(otherwise),
        data_type,
    }
    .into()
}

impl From<ExprCaseWhen> for ColumnExpr {
    fn from(value: ExprCaseWhen) -> Self {
        ColumnExpr::CaseWhen(value)
    }
}
