use super::ColumnExpr;

#[derive(Debug, Clone, PartialEq)]
pub struct OrderByExpr {
    pub expr: ColumnExpr,
    pub desc: bool,
}

impl OrderByExpr {
    pub fn new(expr: impl Into<ColumnExpr>, desc: bool) -> Self {
        Self {
            expr: expr.into(),
            desc,
        }
    }
}
