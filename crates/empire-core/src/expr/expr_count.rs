use super::ColumnExpr;
use crate::schema::RowSetId;

#[derive(Debug, Clone, PartialEq)]
pub struct ExprCount {
    /// Counted expression, `*` when absent.
    pub expr: Option<Box<ColumnExpr>>,

    /// Rowset counted by `count(*)`.
    pub rowset: Option<RowSetId>,

    pub distinct: bool,
}

impl ColumnExpr {
    pub fn count(self) -> ColumnExpr {
        ExprCount {
            expr: Some(Box::new(self)),
            rowset: None,
            distinct: false,
        }
        .into()
    }

    pub fn count_distinct(self) -> ColumnExpr {
        ExprCount {
            expr: Some(Box::new(self)),
            rowset: None,
            distinct: true,
        }
        .into()
    }
}

/// `count(*)` over the rows of `rowset`.
pub fn count_all(rowset: RowSetId) -> ColumnExpr {
    ExprCount {
        expr: None,
        rowset: Some(rowset),
        distinct: false,
    }
    .into()
}

impl From<ExprCount> for ColumnExpr {
    fn from(value: ExprCount) -> Self {
        ColumnExpr::Count(value)
    }
}
