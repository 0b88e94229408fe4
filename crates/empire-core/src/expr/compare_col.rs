use super::*;
use crate::{Command, Value};

/// Compares a column expression with a value.
#[derive(Debug, Clone, PartialEq)]
pub struct CompareCol {
    pub expr: Box<ColumnExpr>,
    pub op: CmpOp,
    pub value: Operand,

    /// Wraps the rendered comparison in parentheses.
    pub parenthesis: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CmpOp {
    Equal,
    NotEqual,
    Less,
    MoreOrEqual,
    Greater,
    LessOrEqual,
    Like,
    NotLike,
    Null,
    NotNull,
    Between,
    NotBetween,
    In,
    NotIn,
}

impl CmpOp {
    /// The operator text placed between expression and value.
    pub fn as_str(self) -> &'static str {
        match self {
            CmpOp::Equal => "=",
            CmpOp::NotEqual => "<>",
            CmpOp::Less => "<",
            CmpOp::MoreOrEqual => ">=",
            CmpOp::Greater => ">",
            CmpOp::LessOrEqual => "<=",
            CmpOp::Like => " LIKE ",
            CmpOp::NotLike => " NOT LIKE ",
            CmpOp::Null => " IS NULL",
            CmpOp::NotNull => " IS NOT NULL",
            CmpOp::Between => " BETWEEN ",
            CmpOp::NotBetween => " NOT BETWEEN ",
            CmpOp::In => " IN (",
            CmpOp::NotIn => " NOT IN (",
        }
    }

    /// Negating operators turn into `IS NOT NULL` when compared with an
    /// empty value.
    pub fn is_negation(self) -> bool {
        matches!(
            self,
            CmpOp::NotEqual | CmpOp::NotLike | CmpOp::NotNull | CmpOp::NotIn | CmpOp::NotBetween
        )
    }

    /// Operators whose literal argument may be sent as a parameter.
    pub fn allows_param(self) -> bool {
        matches!(
            self,
            CmpOp::Equal
                | CmpOp::NotEqual
                | CmpOp::Less
                | CmpOp::MoreOrEqual
                | CmpOp::Greater
                | CmpOp::LessOrEqual
                | CmpOp::Like
                | CmpOp::NotLike
        )
    }
}

impl CompareCol {
    /// The operator actually rendered once empty values are accounted for.
    pub fn effective_op(&self) -> CmpOp {
        match self.op {
            CmpOp::Null | CmpOp::NotNull => self.op,
            op if self.value.is_empty() => {
                if op.is_negation() {
                    CmpOp::NotNull
                } else {
                    CmpOp::Null
                }
            }
            op => op,
        }
    }
}

impl ColumnExpr {
    pub fn cmp(self, op: CmpOp, value: impl Into<Operand>) -> CompareExpr {
        CompareCol {
            expr: Box::new(self),
            op,
            value: value.into(),
            parenthesis: false,
        }
        .into()
    }

    pub fn is(self, value: impl Into<Operand>) -> CompareExpr {
        self.cmp(CmpOp::Equal, value)
    }

    pub fn is_not(self, value: impl Into<Operand>) -> CompareExpr {
        self.cmp(CmpOp::NotEqual, value)
    }

    pub fn is_null(self) -> CompareExpr {
        self.cmp(CmpOp::Null, Value::Null)
    }

    pub fn is_not_null(self) -> CompareExpr {
        self.cmp(CmpOp::NotNull, Value::Null)
    }

    pub fn like(self, pattern: impl Into<Operand>) -> CompareExpr {
        self.cmp(CmpOp::Like, pattern)
    }

    pub fn not_like(self, pattern: impl Into<Operand>) -> CompareExpr {
        self.cmp(CmpOp::NotLike, pattern)
    }

    pub fn is_less_than(self, value: impl Into<Operand>) -> CompareExpr {
        self.cmp(CmpOp::Less, value)
    }

    pub fn is_less_or_equal(self, value: impl Into<Operand>) -> CompareExpr {
        self.cmp(CmpOp::LessOrEqual, value)
    }

    pub fn is_greater_than(self, value: impl Into<Operand>) -> CompareExpr {
        self.cmp(CmpOp::Greater, value)
    }

    pub fn is_more_or_equal(self, value: impl Into<Operand>) -> CompareExpr {
        self.cmp(CmpOp::MoreOrEqual, value)
    }

    pub fn is_between(self, min: impl Into<Operand>, max: impl Into<Operand>) -> CompareExpr {
        self.cmp(CmpOp::Between, Operand::List(vec![min.into(), max.into()]))
    }

    pub fn is_not_between(self, min: impl Into<Operand>, max: impl Into<Operand>) -> CompareExpr {
        self.cmp(CmpOp::NotBetween, Operand::List(vec![min.into(), max.into()]))
    }

    pub fn in_list<I>(self, values: I) -> CompareExpr
    where
        I: IntoIterator,
        I::Item: Into<Operand>,
    {
        self.cmp(CmpOp::In, Operand::list(values))
    }

    pub fn not_in<I>(self, values: I) -> CompareExpr
    where
        I: IntoIterator,
        I::Item: Into<Operand>,
    {
        self.cmp(CmpOp::NotIn, Operand::list(values))
    }

    /// `expr IN (subquery)`
    pub fn in_command(self, cmd: Command) -> CompareExpr {
        self.cmp(CmpOp::In, cmd)
    }
}

impl From<CompareCol> for CompareExpr {
    fn from(value: CompareCol) -> Self {
        CompareExpr::Col(value)
    }
}
