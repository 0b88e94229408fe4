use super::{ColumnExpr, Operand};

/// `left || right`, spelled per dialect.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprConcat {
    pub left: Box<ColumnExpr>,
    pub right: Operand,
}

/// `concat(first, others..)`, optionally with a literal separator between
/// the arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprConcatFunc {
    pub first: Box<ColumnExpr>,
    pub others: Vec<Operand>,
    pub separator: Option<String>,
}

impl ColumnExpr {
    pub fn append(self, value: impl Into<Operand>) -> ColumnExpr {
        ExprConcat {
            left: Box::new(self),
            right: value.into(),
        }
        .into()
    }

    pub fn concat<I>(self, others: I) -> ColumnExpr
    where
        I: IntoIterator,
        I::Item: Into<Operand>,
    {
        ExprConcatFunc {
            first: Box::new(self),
            others: others.into_iter().map(Into::into).collect(),
            separator: None,
        }
        .into()
    }

    pub fn concat_with_separator<I>(self, separator: impl Into<String>, others: I) -> ColumnExpr
    where
        I: IntoIterator,
        I::Item: Into<Operand>,
    {
        ExprConcatFunc {
            first: Box::new(self),
            others: others.into_iter().map(Into::into).collect(),
            separator: Some(separator.into()),
        }
        .into()
    }
}

impl From<ExprConcat> for ColumnExpr {
    fn from(value: ExprConcat) -> Self {
        ColumnExpr::Concat(value)
    }
}

impl From<ExprConcatFunc> for ColumnExpr {
    fn from(value: ExprConcatFunc) -> Self {
        ColumnExpr::ConcatFunc(value)
    }
}
