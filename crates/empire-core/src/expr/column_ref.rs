use super::*;
use crate::{schema::ColumnRef, Command, DataType};

/// Forwards expression builders from a column handle to `ColumnExpr`.
macro_rules! forward_to_expr {
    ( $( fn $name:ident(self $(, $arg:ident : $ty:ty )* ) -> $ret:ty; )* ) => {
        impl ColumnRef {
            $(
                pub fn $name(self $(, $arg: $ty )*) -> $ret {
                    ColumnExpr::Column(self).$name($( $arg ),*)
                }
            )*
        }
    };
}

forward_to_expr! {
    fn cmp(self, op: CmpOp, value: impl Into<Operand>) -> CompareExpr;
    fn is(self, value: impl Into<Operand>) -> CompareExpr;
    fn is_not(self, value: impl Into<Operand>) -> CompareExpr;
    fn is_null(self) -> CompareExpr;
    fn is_not_null(self) -> CompareExpr;
    fn like(self, pattern: impl Into<Operand>) -> CompareExpr;
    fn not_like(self, pattern: impl Into<Operand>) -> CompareExpr;
    fn is_less_than(self, value: impl Into<Operand>) -> CompareExpr;
    fn is_less_or_equal(self, value: impl Into<Operand>) -> CompareExpr;
    fn is_greater_than(self, value: impl Into<Operand>) -> CompareExpr;
    fn is_more_or_equal(self, value: impl Into<Operand>) -> CompareExpr;
    fn is_between(self, min: impl Into<Operand>, max: impl Into<Operand>) -> CompareExpr;
    fn is_not_between(self, min: impl Into<Operand>, max: impl Into<Operand>) -> CompareExpr;
    fn in_command(self, cmd: Command) -> CompareExpr;

    fn coalesce(self, null_value: impl Into<Operand>) -> ColumnExpr;
    fn substring(self, pos: impl Into<Operand>) -> ColumnExpr;
    fn substring_len(self, pos: impl Into<Operand>, count: impl Into<Operand>) -> ColumnExpr;
    fn replace(self, pattern: impl Into<Operand>, replacement: impl Into<Operand>) -> ColumnExpr;
    fn reverse(self) -> ColumnExpr;
    fn trim(self) -> ColumnExpr;
    fn trim_left(self) -> ColumnExpr;
    fn trim_right(self) -> ColumnExpr;
    fn upper(self) -> ColumnExpr;
    fn lower(self) -> ColumnExpr;
    fn length(self) -> ColumnExpr;
    fn index_of(self, needle: impl Into<Operand>) -> ColumnExpr;
    fn index_of_from(self, needle: impl Into<Operand>, from: impl Into<Operand>) -> ColumnExpr;
    fn escape(self, escape: char) -> ColumnExpr;
    fn abs(self) -> ColumnExpr;
    fn round(self, decimals: i32) -> ColumnExpr;
    fn trunc(self, decimals: i32) -> ColumnExpr;
    fn floor(self) -> ColumnExpr;
    fn ceiling(self) -> ColumnExpr;
    fn modulo(self, divisor: impl Into<Operand>) -> ColumnExpr;
    fn format(self, format: impl Into<Operand>) -> ColumnExpr;
    fn day(self) -> ColumnExpr;
    fn month(self) -> ColumnExpr;
    fn year(self) -> ColumnExpr;
    fn sum(self) -> ColumnExpr;
    fn min(self) -> ColumnExpr;
    fn max(self) -> ColumnExpr;
    fn avg(self) -> ColumnExpr;
    fn count(self) -> ColumnExpr;
    fn count_distinct(self) -> ColumnExpr;
    fn plus(self, value: impl Into<Operand>) -> ColumnExpr;
    fn minus(self, value: impl Into<Operand>) -> ColumnExpr;
    fn multiply_with(self, value: impl Into<Operand>) -> ColumnExpr;
    fn divide_by(self, value: impl Into<Operand>) -> ColumnExpr;
    fn append(self, value: impl Into<Operand>) -> ColumnExpr;
    fn convert_to(self, to: DataType) -> ColumnExpr;
    fn as_alias(self, alias: impl Into<String>) -> ColumnExpr;
    fn parenthesis(self) -> ColumnExpr;
    fn asc(self) -> OrderByExpr;
    fn desc(self) -> OrderByExpr;
}

impl ColumnRef {
    pub fn in_list<I>(self, values: I) -> CompareExpr
    where
        I: IntoIterator,
        I::Item: Into<Operand>,
    {
        ColumnExpr::Column(self).in_list(values)
    }

    pub fn not_in<I>(self, values: I) -> CompareExpr
    where
        I: IntoIterator,
        I::Item: Into<Operand>,
    {
        ColumnExpr::Column(self).not_in(values)
    }

    pub fn concat<I>(self, others: I) -> ColumnExpr
    where
        I: IntoIterator,
        I::Item: Into<Operand>,
    {
        ColumnExpr::Column(self).concat(others)
    }
}
