use super::CompareExpr;

#[derive(Debug, Clone, PartialEq)]
pub struct CompareAndOr {
    pub left: Box<CompareExpr>,
    pub right: Box<CompareExpr>,

    /// `OR` when `true`, `AND` otherwise
    pub or: bool,
}

impl From<CompareAndOr> for CompareExpr {
    fn from(value: CompareAndOr) -> Self {
        CompareExpr::AndOr(value)
    }
}
