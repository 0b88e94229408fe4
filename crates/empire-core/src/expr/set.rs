use super::Operand;
use crate::schema::ColumnRef;

/// `column = value` in an UPDATE or INSERT.
#[derive(Debug, Clone, PartialEq)]
pub struct SetExpr {
    pub column: ColumnRef,
    pub value: Operand,
}

impl ColumnRef {
    /// Assigns `value` to this column.
    pub fn to(self, value: impl Into<Operand>) -> SetExpr {
        SetExpr {
            column: self,
            value: value.into(),
        }
    }
}
