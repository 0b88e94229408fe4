use super::*;
use crate::schema::{DatabaseId, RowSetId};

use indexmap::IndexSet;

/// A boolean predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum CompareExpr {
    /// `expr op value`
    Col(CompareCol),

    /// `left AND right` or `left OR right`
    AndOr(CompareAndOr),

    /// `NOT(expr)`
    Not(Box<CompareExpr>),

    /// `exists (subquery)`
    Exists(CompareExists),

    /// `(expr)`
    Parenthesis(Box<CompareExpr>),
}

impl CompareExpr {
    /// The database of the first column the predicate touches.
    pub fn database(&self) -> Option<DatabaseId> {
        match self {
            CompareExpr::Col(cmp) => cmp.expr.database().or_else(|| cmp.value.database()),
            CompareExpr::AndOr(cmp) => cmp.left.database().or_else(|| cmp.right.database()),
            CompareExpr::Not(expr) | CompareExpr::Parenthesis(expr) => expr.database(),
            CompareExpr::Exists(cmp) => Some(cmp.cmd.database()),
        }
    }

    pub fn check_database(&self, db: DatabaseId) -> crate::Result<()> {
        match self {
            CompareExpr::Col(cmp) => {
                cmp.expr.check_database(db)?;
                cmp.value.check_database(db)
            }
            CompareExpr::AndOr(cmp) => {
                cmp.left.check_database(db)?;
                cmp.right.check_database(db)
            }
            CompareExpr::Not(expr) | CompareExpr::Parenthesis(expr) => expr.check_database(db),
            CompareExpr::Exists(cmp) => {
                cmp.cmd.check_database(db)?;
                match &cmp.compare {
                    Some(compare) => compare.check_database(db),
                    None => Ok(()),
                }
            }
        }
    }

    /// Returns `true` when `self` and `other` constrain the same thing, so
    /// that one replaces the other in a command's WHERE list.
    pub fn is_mutually_exclusive(&self, other: &CompareExpr) -> bool {
        let other = other.unwrap_parenthesis();

        match (self, other) {
            (CompareExpr::Parenthesis(inner), _) => inner.is_mutually_exclusive(other),
            (CompareExpr::Col(lhs), CompareExpr::Col(rhs)) => lhs.expr == rhs.expr,
            (CompareExpr::AndOr(lhs), CompareExpr::AndOr(rhs)) => {
                lhs.left.is_mutually_exclusive(&rhs.left)
                    && lhs.right.is_mutually_exclusive(&rhs.right)
                    && lhs.or == rhs.or
            }
            (CompareExpr::Not(lhs), CompareExpr::Not(rhs)) => lhs.is_mutually_exclusive(rhs),
            (CompareExpr::Exists(lhs), CompareExpr::Exists(rhs)) => lhs == rhs,
            _ => self == other,
        }
    }

    /// Returns `true` when the predicate constrains `column`.
    pub fn is_constraint_on(&self, column: &ColumnExpr) -> bool {
        match self {
            CompareExpr::Col(cmp) => {
                if cmp.expr.as_ref() == column {
                    return true;
                }
                // A function over the column constrains the column itself
                match column {
                    ColumnExpr::Column(col) => {
                        !matches!(*cmp.expr, ColumnExpr::Column(_))
                            && cmp.expr.update_column() == Some(*col)
                    }
                    _ => false,
                }
            }
            CompareExpr::AndOr(cmp) => {
                cmp.left.is_constraint_on(column) || cmp.right.is_constraint_on(column)
            }
            CompareExpr::Not(expr) | CompareExpr::Parenthesis(expr) => {
                expr.is_constraint_on(column)
            }
            CompareExpr::Exists(cmp) => cmp
                .compare
                .as_ref()
                .is_some_and(|compare| compare.is_constraint_on(column)),
        }
    }

    pub fn referenced_rowsets(&self, rowsets: &mut IndexSet<RowSetId>) {
        match self {
            CompareExpr::Col(cmp) => {
                cmp.expr.referenced_rowsets(rowsets);
                cmp.value.referenced_rowsets(rowsets);
            }
            CompareExpr::AndOr(cmp) => {
                cmp.left.referenced_rowsets(rowsets);
                cmp.right.referenced_rowsets(rowsets);
            }
            CompareExpr::Not(expr) | CompareExpr::Parenthesis(expr) => {
                expr.referenced_rowsets(rowsets)
            }
            // The subquery selects from its own rowsets
            CompareExpr::Exists(_) => {}
        }
    }

    pub fn and(self, other: CompareExpr) -> CompareExpr {
        CompareAndOr {
            left: Box::new(self),
            right: Box::new(other),
            or: false,
        }
        .into()
    }

    pub fn or(self, other: CompareExpr) -> CompareExpr {
        CompareAndOr {
            left: Box::new(self),
            right: Box::new(other),
            or: true,
        }
        .into()
    }

    pub fn not(self) -> CompareExpr {
        CompareExpr::Not(Box::new(self))
    }

    pub fn parenthesis(self) -> CompareExpr {
        CompareExpr::Parenthesis(Box::new(self))
    }

    pub fn is_and(&self) -> bool {
        matches!(self, CompareExpr::AndOr(cmp) if !cmp.or)
    }

    fn unwrap_parenthesis(&self) -> &CompareExpr {
        match self {
            CompareExpr::Parenthesis(inner) => inner.unwrap_parenthesis(),
            other => other,
        }
    }
}
