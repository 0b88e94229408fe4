use super::ColumnExpr;
use crate::{
    schema::{ColumnRef, DatabaseId, RowSetId},
    Command, DataType, Value,
};

use chrono::{NaiveDate, NaiveDateTime};
use indexmap::IndexSet;
use rust_decimal::Decimal;

/// The right hand side of a comparison, assignment or function argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// A literal value
    Value(Value),

    /// Another column expression
    Expr(Box<ColumnExpr>),

    /// A list of operands, e.g. the bounds of a BETWEEN
    List(Vec<Operand>),

    /// A subquery
    Command(Box<Command>),

    /// A command parameter, rendered as a placeholder
    Param(ParamId),
}

/// Position of a parameter in its command's parameter list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParamId(pub usize);

impl Operand {
    /// Returns `true` for null, empty text and empty lists. Expressions,
    /// subqueries and parameters are never empty.
    pub fn is_empty(&self) -> bool {
        match self {
            Operand::Value(value) => value.is_empty(),
            Operand::List(items) => items.is_empty(),
            _ => false,
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Operand::List(_) | Operand::Value(Value::List(_)))
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Operand::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_expr(&self) -> Option<&ColumnExpr> {
        match self {
            Operand::Expr(expr) => Some(expr),
            _ => None,
        }
    }

    pub fn data_type(&self) -> DataType {
        match self {
            Operand::Value(value) => value.infer_data_type(),
            Operand::Expr(expr) => expr.data_type(),
            Operand::List(items) => items
                .first()
                .map(Operand::data_type)
                .unwrap_or(DataType::Unknown),
            Operand::Command(cmd) => cmd
                .select_list()
                .first()
                .map(ColumnExpr::data_type)
                .unwrap_or(DataType::Unknown),
            Operand::Param(_) => DataType::Unknown,
        }
    }

    /// The database the operand belongs to. Literals and parameters belong
    /// to none.
    pub fn database(&self) -> Option<DatabaseId> {
        match self {
            Operand::Expr(expr) => expr.database(),
            Operand::List(items) => items.iter().find_map(Operand::database),
            Operand::Command(cmd) => Some(cmd.database()),
            Operand::Value(_) | Operand::Param(_) => None,
        }
    }

    pub(crate) fn check_database(&self, db: DatabaseId) -> crate::Result<()> {
        match self {
            Operand::List(items) => items.iter().try_for_each(|item| item.check_database(db)),
            Operand::Value(_) | Operand::Param(_) => Ok(()),
            _ => match self.database() {
                Some(id) if id != db => Err(crate::Error::database_mismatch("operand")),
                _ => Ok(()),
            },
        }
    }

    /// Subqueries are not walked; they select from their own rowsets.
    pub fn referenced_rowsets(&self, rowsets: &mut IndexSet<RowSetId>) {
        match self {
            Operand::Expr(expr) => expr.referenced_rowsets(rowsets),
            Operand::List(items) => {
                for item in items {
                    item.referenced_rowsets(rowsets);
                }
            }
            _ => {}
        }
    }

    /// Builds a list operand from any iterator of operands.
    pub fn list<I>(items: I) -> Operand
    where
        I: IntoIterator,
        I::Item: Into<Operand>,
    {
        Operand::List(items.into_iter().map(Into::into).collect())
    }
}

impl Default for Operand {
    fn default() -> Self {
        Operand::Value(Value::Null)
    }
}

macro_rules! impl_operand_from_value {
    ( $( $ty:ty ),* ) => {
        $(
            impl From<$ty> for Operand {
                fn from(value: $ty) -> Self {
                    Operand::Value(value.into())
                }
            }
        )*
    };
}

impl_operand_from_value!(
    bool,
    i32,
    i64,
    u32,
    f64,
    &str,
    String,
    &String,
    Decimal,
    NaiveDate,
    NaiveDateTime,
    Value
);

impl<T: Into<Value>> From<Option<T>> for Operand {
    fn from(value: Option<T>) -> Self {
        Operand::Value(value.into())
    }
}

impl From<ColumnExpr> for Operand {
    fn from(value: ColumnExpr) -> Self {
        Operand::Expr(Box::new(value))
    }
}

impl From<ColumnRef> for Operand {
    fn from(value: ColumnRef) -> Self {
        Operand::Expr(Box::new(value.into()))
    }
}

impl From<Command> for Operand {
    fn from(value: Command) -> Self {
        Operand::Command(Box::new(value))
    }
}

impl From<ParamId> for Operand {
    fn from(value: ParamId) -> Self {
        Operand::Param(value)
    }
}

impl From<Vec<Operand>> for Operand {
    fn from(value: Vec<Operand>) -> Self {
        Operand::List(value)
    }
}
