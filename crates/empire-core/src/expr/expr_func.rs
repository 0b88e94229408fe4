use super::*;
use crate::DataType;

/// A function rendered from a phrase template.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprFunc {
    pub phrase: Phrase,

    /// Substituted for `?` in the template.
    pub expr: Box<ColumnExpr>,

    /// Substituted for `{0}`, `{1}`, ... in the template.
    pub params: Vec<Operand>,

    pub data_type: DataType,

    pub aggregate: bool,
}

impl ColumnExpr {
    pub fn func(
        self,
        phrase: Phrase,
        params: Vec<Operand>,
        data_type: DataType,
    ) -> ColumnExpr {
        ExprFunc {
            phrase,
            expr: Box::new(self),
            params,
            data_type,
            aggregate: phrase.is_aggregate(),
        }
        .into()
    }

    fn same_type_func(self, phrase: Phrase, params: Vec<Operand>) -> ColumnExpr {
        let data_type = self.data_type();
        self.func(phrase, params, data_type)
    }

    pub fn coalesce(self, null_value: impl Into<Operand>) -> ColumnExpr {
        self.same_type_func(Phrase::FuncCoalesce, vec![null_value.into()])
    }

    /// Substring from a 1-based position to the end.
    pub fn substring(self, pos: impl Into<Operand>) -> ColumnExpr {
        self.same_type_func(Phrase::FuncSubstring, vec![pos.into()])
    }

    pub fn substring_len(self, pos: impl Into<Operand>, count: impl Into<Operand>) -> ColumnExpr {
        self.same_type_func(Phrase::FuncSubstringEx, vec![pos.into(), count.into()])
    }

    pub fn replace(self, pattern: impl Into<Operand>, replacement: impl Into<Operand>) -> ColumnExpr {
        self.same_type_func(Phrase::FuncReplace, vec![pattern.into(), replacement.into()])
    }

    pub fn reverse(self) -> ColumnExpr {
        self.same_type_func(Phrase::FuncReverse, vec![])
    }

    pub fn trim(self) -> ColumnExpr {
        self.same_type_func(Phrase::FuncTrim, vec![])
    }

    pub fn trim_left(self) -> ColumnExpr {
        self.same_type_func(Phrase::FuncLTrim, vec![])
    }

    pub fn trim_right(self) -> ColumnExpr {
        self.same_type_func(Phrase::FuncRTrim, vec![])
    }

    pub fn upper(self) -> ColumnExpr {
        self.same_type_func(Phrase::FuncUpper, vec![])
    }

    pub fn lower(self) -> ColumnExpr {
        self.same_type_func(Phrase::FuncLower, vec![])
    }

    pub fn length(self) -> ColumnExpr {
        self.func(Phrase::FuncLength, vec![], DataType::Integer)
    }

    /// 1-based position of `needle`, 0 when absent.
    pub fn index_of(self, needle: impl Into<Operand>) -> ColumnExpr {
        self.func(Phrase::FuncStrIndex, vec![needle.into()], DataType::Integer)
    }

    pub fn index_of_from(self, needle: impl Into<Operand>, from: impl Into<Operand>) -> ColumnExpr {
        self.func(
            Phrase::FuncStrIndexFrom,
            vec![needle.into(), from.into()],
            DataType::Integer,
        )
    }

    /// Declares the escape character of a LIKE pattern.
    pub fn escape(self, escape: char) -> ColumnExpr {
        self.same_type_func(Phrase::FuncEscape, vec![escape.to_string().into()])
    }

    pub fn abs(self) -> ColumnExpr {
        self.same_type_func(Phrase::FuncAbs, vec![])
    }

    pub fn round(self, decimals: i32) -> ColumnExpr {
        self.same_type_func(Phrase::FuncRound, vec![decimals.into()])
    }

    pub fn trunc(self, decimals: i32) -> ColumnExpr {
        self.same_type_func(Phrase::FuncTrunc, vec![decimals.into()])
    }

    pub fn floor(self) -> ColumnExpr {
        self.same_type_func(Phrase::FuncFloor, vec![])
    }

    pub fn ceiling(self) -> ColumnExpr {
        self.same_type_func(Phrase::FuncCeiling, vec![])
    }

    pub fn modulo(self, divisor: impl Into<Operand>) -> ColumnExpr {
        self.same_type_func(Phrase::FuncModulo, vec![divisor.into()])
    }

    /// Formats the value as text using a dialect specific format string.
    pub fn format(self, format: impl Into<Operand>) -> ColumnExpr {
        self.func(Phrase::FuncFormat, vec![format.into()], DataType::Text)
    }

    pub fn day(self) -> ColumnExpr {
        self.func(Phrase::FuncDay, vec![], DataType::Integer)
    }

    pub fn month(self) -> ColumnExpr {
        self.func(Phrase::FuncMonth, vec![], DataType::Integer)
    }

    pub fn year(self) -> ColumnExpr {
        self.func(Phrase::FuncYear, vec![], DataType::Integer)
    }

    pub fn sum(self) -> ColumnExpr {
        self.same_type_func(Phrase::FuncSum, vec![])
    }

    pub fn min(self) -> ColumnExpr {
        self.same_type_func(Phrase::FuncMin, vec![])
    }

    pub fn max(self) -> ColumnExpr {
        self.same_type_func(Phrase::FuncMax, vec![])
    }

    pub fn avg(self) -> ColumnExpr {
        self.same_type_func(Phrase::FuncAvg, vec![])
    }
}

impl From<ExprFunc> for ColumnExpr {
    fn from(value: ExprFunc) -> Self {
        ColumnExpr::Func(value)
    }
}
