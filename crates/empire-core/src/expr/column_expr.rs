use super::*;
use crate::{
    schema::{ColumnRef, Database, DatabaseId, RowSetId},
    DataType,
};

use indexmap::IndexSet;

/// A node that renders to a SQL value: a column, literal, function call
/// or computation.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnExpr {
    /// A physical column of a table or view
    Column(ColumnRef),

    /// A typed literal
    Value(ExprValue),

    /// A function built from a phrase template
    Func(ExprFunc),

    /// A conversion to another data type
    Convert(ExprConvert),

    /// Arithmetic: `expr op value`
    Calc(ExprCalc),

    /// String concatenation using the concat operator
    Concat(ExprConcat),

    /// String concatenation using the concat function
    ConcatFunc(ExprConcatFunc),

    /// `count(..)`
    Count(ExprCount),

    /// Value mapping: `case expr when .. then .. end`
    Decode(ExprDecode),

    /// `CASE WHEN cond THEN value .. ELSE other END`
    CaseWhen(ExprCaseWhen),

    /// An expression renamed in the select list
    Alias(ExprAlias),

    /// An expression wrapped in parentheses
    Parenthesis(Box<ColumnExpr>),

    /// A command parameter
    Param(ParamId),
}

impl ColumnExpr {
    pub fn data_type(&self) -> DataType {
        match self {
            ColumnExpr::Column(column) => column.data_type,
            ColumnExpr::Value(expr) => expr.data_type,
            ColumnExpr::Func(expr) => expr.data_type,
            ColumnExpr::Convert(expr) => expr.to,
            ColumnExpr::Calc(expr) => expr.expr.data_type(),
            ColumnExpr::Concat(_) | ColumnExpr::ConcatFunc(_) => DataType::Text,
            ColumnExpr::Count(_) => DataType::Integer,
            ColumnExpr::Decode(expr) => expr.data_type,
            ColumnExpr::CaseWhen(expr) => expr.data_type,
            ColumnExpr::Alias(expr) => expr.expr.data_type(),
            ColumnExpr::Parenthesis(expr) => expr.data_type(),
            ColumnExpr::Param(_) => DataType::Unknown,
        }
    }

    /// The database owning the expression. Literals and parameters belong
    /// to none.
    pub fn database(&self) -> Option<DatabaseId> {
        match self {
            ColumnExpr::Column(column) => Some(column.rowset.db),
            ColumnExpr::Value(_) | ColumnExpr::Param(_) => None,
            ColumnExpr::Func(expr) => expr
                .expr
                .database()
                .or_else(|| expr.params.iter().find_map(Operand::database)),
            ColumnExpr::Convert(expr) => expr.expr.database(),
            ColumnExpr::Calc(expr) => expr.expr.database().or_else(|| expr.value.database()),
            ColumnExpr::Concat(expr) => expr.left.database().or_else(|| expr.right.database()),
            ColumnExpr::ConcatFunc(expr) => expr
                .first
                .database()
                .or_else(|| expr.others.iter().find_map(Operand::database)),
            ColumnExpr::Count(expr) => match &expr.expr {
                Some(inner) => inner.database(),
                None => expr.rowset.map(|rowset| rowset.db),
            },
            ColumnExpr::Decode(expr) => expr.expr.database(),
            ColumnExpr::CaseWhen(expr) => expr.whens.iter().find_map(|(cmp, _)| cmp.database()),
            ColumnExpr::Alias(expr) => expr.expr.database(),
            ColumnExpr::Parenthesis(expr) => expr.database(),
        }
    }

    /// Fails when any part of the expression belongs to another database.
    pub fn check_database(&self, db: DatabaseId) -> crate::Result<()> {
        let mut rowsets = IndexSet::new();
        self.referenced_rowsets(&mut rowsets);

        if rowsets.iter().any(|rowset| rowset.db != db)
            || self.database().is_some_and(|id| id != db)
        {
            return Err(crate::Error::database_mismatch("column expression"));
        }

        Ok(())
    }

    /// Returns `true` when the expression aggregates rows.
    pub fn is_aggregate(&self) -> bool {
        match self {
            ColumnExpr::Func(expr) => expr.aggregate || expr.expr.is_aggregate(),
            ColumnExpr::Count(_) => true,
            ColumnExpr::Convert(expr) => expr.expr.is_aggregate(),
            ColumnExpr::Calc(expr) => expr.expr.is_aggregate(),
            ColumnExpr::Alias(expr) => expr.expr.is_aggregate(),
            ColumnExpr::Parenthesis(expr) => expr.is_aggregate(),
            ColumnExpr::Decode(expr) => expr.expr.is_aggregate(),
            _ => false,
        }
    }

    /// The physical column this expression reads or writes, if any.
    pub fn update_column(&self) -> Option<ColumnRef> {
        match self {
            ColumnExpr::Column(column) => Some(*column),
            ColumnExpr::Func(expr) => expr.expr.update_column(),
            ColumnExpr::Convert(expr) => expr.expr.update_column(),
            ColumnExpr::Calc(expr) => expr.expr.update_column(),
            ColumnExpr::Alias(expr) => expr.expr.update_column(),
            ColumnExpr::Parenthesis(expr) => expr.update_column(),
            _ => None,
        }
    }

    /// A name for the expression. Used as the field name of query results.
    pub fn name(&self, db: &Database) -> String {
        match self {
            ColumnExpr::Column(column) => db.column(*column).name.clone(),
            ColumnExpr::Value(expr) => expr.value.to_string(),
            ColumnExpr::Func(expr) => format!("{}_{}", expr.phrase.function_name(), expr.expr.name(db)),
            ColumnExpr::Convert(expr) => expr.expr.name(db),
            ColumnExpr::Calc(expr) => format!("{}_{}", expr.expr.name(db), expr.op.name()),
            ColumnExpr::Concat(expr) => format!("{}_concat", expr.left.name(db)),
            ColumnExpr::ConcatFunc(expr) => format!("{}_concat", expr.first.name(db)),
            ColumnExpr::Count(_) => "count".to_string(),
            ColumnExpr::Decode(expr) => format!("{}_decode", expr.expr.name(db)),
            ColumnExpr::CaseWhen(_) => "case".to_string(),
            ColumnExpr::Alias(expr) => expr.alias.clone(),
            ColumnExpr::Parenthesis(expr) => expr.name(db),
            ColumnExpr::Param(id) => format!("param{}", id.0),
        }
    }

    /// Collects the rowsets the expression reads from, in order of first
    /// reference.
    pub fn referenced_rowsets(&self, rowsets: &mut IndexSet<RowSetId>) {
        match self {
            ColumnExpr::Column(column) => {
                rowsets.insert(column.rowset);
            }
            ColumnExpr::Value(_) | ColumnExpr::Param(_) => {}
            ColumnExpr::Func(expr) => {
                expr.expr.referenced_rowsets(rowsets);
                for param in &expr.params {
                    param.referenced_rowsets(rowsets);
                }
            }
            ColumnExpr::Convert(expr) => expr.expr.referenced_rowsets(rowsets),
            ColumnExpr::Calc(expr) => {
                expr.expr.referenced_rowsets(rowsets);
                expr.value.referenced_rowsets(rowsets);
            }
            ColumnExpr::Concat(expr) => {
                expr.left.referenced_rowsets(rowsets);
                expr.right.referenced_rowsets(rowsets);
            }
            ColumnExpr::ConcatFunc(expr) => {
                expr.first.referenced_rowsets(rowsets);
                for other in &expr.others {
                    other.referenced_rowsets(rowsets);
                }
            }
            ColumnExpr::Count(expr) => match &expr.expr {
                Some(inner) => inner.referenced_rowsets(rowsets),
                None => {
                    if let Some(rowset) = expr.rowset {
                        rowsets.insert(rowset);
                    }
                }
            },
            ColumnExpr::Decode(expr) => {
                expr.expr.referenced_rowsets(rowsets);
                for (key, value) in &expr.pairs {
                    key.referenced_rowsets(rowsets);
                    value.referenced_rowsets(rowsets);
                }
                if let Some(otherwise) = &expr.otherwise {
                    otherwise.referenced_rowsets(rowsets);
                }
            }
            ColumnExpr::CaseWhen(expr) => {
                for (cmp, value) in &expr.whens {
                    cmp.referenced_rowsets(rowsets);
                    value.referenced_rowsets(rowsets);
                }
                if let Some(otherwise) = &expr.otherwise {
                    otherwise.referenced_rowsets(rowsets);
                }
            }
            ColumnExpr::Alias(expr) => expr.expr.referenced_rowsets(rowsets),
            ColumnExpr::Parenthesis(expr) => expr.referenced_rowsets(rowsets),
        }
    }

    /// Wraps the expression in parentheses.
    pub fn parenthesis(self) -> ColumnExpr {
        ColumnExpr::Parenthesis(Box::new(self))
    }

    /// Sort ascending on this expression.
    pub fn asc(self) -> OrderByExpr {
        OrderByExpr::new(self, false)
    }

    /// Sort descending on this expression.
    pub fn desc(self) -> OrderByExpr {
        OrderByExpr::new(self, true)
    }

    pub fn as_column(&self) -> Option<ColumnRef> {
        match self {
            ColumnExpr::Column(column) => Some(*column),
            _ => None,
        }
    }
}

impl From<ColumnRef> for ColumnExpr {
    fn from(value: ColumnRef) -> Self {
        ColumnExpr::Column(value)
    }
}

impl From<&ColumnRef> for ColumnExpr {
    fn from(value: &ColumnRef) -> Self {
        ColumnExpr::Column(*value)
    }
}

impl From<ParamId> for ColumnExpr {
    fn from(value: ParamId) -> Self {
        ColumnExpr::Param(value)
    }
}

impl From<&ColumnExpr> for ColumnExpr {
    fn from(value: &ColumnExpr) -> Self {
        value.clone()
    }
}

impl PartialEq<ColumnRef> for ColumnExpr {
    fn eq(&self, other: &ColumnRef) -> bool {
        matches!(self, ColumnExpr::Column(column) if column == other)
    }
}
