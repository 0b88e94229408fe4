mod column_expr;
pub use column_expr::ColumnExpr;

mod column_ref;

mod compare;
pub use compare::CompareExpr;

mod compare_and_or;
pub use compare_and_or::CompareAndOr;

mod compare_col;
pub use compare_col::{CmpOp, CompareCol};

mod compare_exists;
pub use compare_exists::{exists, exists_where, CompareExists};

mod context;
pub use context::Context;

mod expr_alias;
pub use expr_alias::ExprAlias;

mod expr_calc;
pub use expr_calc::{CalcOp, ExprCalc};

mod expr_case_when;
pub use expr_case_when::{case_when, ExprCaseWhen};

mod expr_concat;
pub use expr_concat::{ExprConcat, ExprConcatFunc};

mod expr_convert;
pub use expr_convert::ExprConvert;

mod expr_count;
pub use expr_count::{count_all, ExprCount};

mod expr_decode;
pub use expr_decode::ExprDecode;

mod expr_func;
pub use expr_func::ExprFunc;

mod expr_value;
pub use expr_value::ExprValue;

mod join;
pub use join::{ColumnJoin, CompareJoin, CrossJoin, JoinExpr, JoinType};

mod operand;
pub use operand::{Operand, ParamId};

mod order_by;
pub use order_by::OrderByExpr;

mod phrase;
pub use phrase::Phrase;

mod set;
pub use set::SetExpr;
