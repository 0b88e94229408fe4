use super::{ColumnExpr, Operand};

#[derive(Debug, Clone, PartialEq)]
pub struct ExprCalc {
    pub expr: Box<ColumnExpr>,
    pub op: CalcOp,
    pub value: Operand,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalcOp {
    Plus,
    Minus,
    Multiply,
    Divide,
}

impl CalcOp {
    pub fn as_str(self) -> &'static str {
        match self {
            CalcOp::Plus => "+",
            CalcOp::Minus => "-",
            CalcOp::Multiply => "*",
            CalcOp::Divide => "/",
        }
    }

    pub(crate) fn name(self) -> &'static str {
        match self {
            CalcOp::Plus => "plus",
            CalcOp::Minus => "minus",
            CalcOp::Multiply => "mul",
            CalcOp::Divide => "div",
        }
    }
}

impl ColumnExpr {
    pub fn calc(self, op: CalcOp, value: impl Into<Operand>) -> ColumnExpr {
        ExprCalc {
            expr: Box::new(self),
            op,
            value: value.into(),
        }
        .into()
    }

    pub fn plus(self, value: impl Into<Operand>) -> ColumnExpr {
        self.calc(CalcOp::Plus, value)
    }

    pub fn minus(self, value: impl Into<Operand>) -> ColumnExpr {
        self.calc(CalcOp::Minus, value)
    }

    pub fn multiply_with(self, value: impl Into<Operand>) -> ColumnExpr {
        self.calc(CalcOp::Multiply, value)
    }

    pub fn divide_by(self, value: impl Into<Operand>) -> ColumnExpr {
        self.calc(CalcOp::Divide, value)
    }
}

impl From<ExprCalc> for ColumnExpr {
    fn from(value: ExprCalc) -> Self {
        ColumnExpr::Calc(value)
    }
}
