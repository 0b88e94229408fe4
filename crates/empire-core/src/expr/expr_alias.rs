use super::ColumnExpr;

#[derive(Debug, Clone, PartialEq)]
pub struct ExprAlias {
    pub expr: Box<ColumnExpr>,
    pub alias: String,
}

impl ColumnExpr {
    /// Renames the expression in the select list.
    pub fn as_alias(self, alias: impl Into<String>) -> ColumnExpr {
        ExprAlias {
            expr: Box::new(self),
            alias: alias.into(),
        }
        .into()
    }
}

impl From<ExprAlias> for ColumnExpr {
    fn from(value: ExprAlias) -> Self {
        ColumnExpr::Alias(value)
    }
}
