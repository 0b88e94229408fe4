use super::*;
use crate::{
    schema::{ColumnRef, DatabaseId, RowSetId},
    Error, Result,
};

use indexmap::IndexSet;

/// A join between two rowsets.
#[derive(Debug, Clone)]
pub enum JoinExpr {
    /// `left JOIN right ON right.col = left.col`
    Column(ColumnJoin),

    /// `left JOIN right ON <compare>`
    Compare(CompareJoin),

    /// `left CROSS JOIN right`
    Cross(CrossJoin),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoinType {
    Inner,
    Left,
    Right,
    Full,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnJoin {
    pub left: ColumnRef,
    pub right: ColumnRef,
    pub join_type: JoinType,

    /// Extra condition appended with `AND`
    pub and: Option<CompareExpr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompareJoin {
    pub left: RowSetId,
    pub right: RowSetId,
    pub cmp: CompareExpr,
    pub join_type: JoinType,
    pub and: Option<CompareExpr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CrossJoin {
    pub left: RowSetId,
    pub right: RowSetId,
}

impl JoinType {
    /// Swaps `Left` and `Right`.
    pub fn reversed(self) -> JoinType {
        match self {
            JoinType::Left => JoinType::Right,
            JoinType::Right => JoinType::Left,
            other => other,
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            JoinType::Inner => " INNER JOIN ",
            JoinType::Left => " LEFT JOIN ",
            JoinType::Right => " RIGHT JOIN ",
            JoinType::Full => " FULL JOIN ",
        }
    }
}

impl JoinExpr {
    /// Joins two rowsets on a pair of columns.
    pub fn on_columns(left: ColumnRef, right: ColumnRef, join_type: JoinType) -> Result<JoinExpr> {
        if left.rowset == right.rowset {
            return Err(Error::invalid_argument(
                "right",
                "cannot join a rowset to itself",
            ));
        }

        if left.rowset.db != right.rowset.db {
            return Err(Error::database_mismatch("join column"));
        }

        Ok(JoinExpr::Column(ColumnJoin {
            left,
            right,
            join_type,
            and: None,
        }))
    }

    /// Joins `right` on an arbitrary condition. The left rowset is the one
    /// of the first column in `cmp` that is not part of `right`.
    pub fn on_compare(right: RowSetId, cmp: CompareExpr, join_type: JoinType) -> Result<JoinExpr> {
        let mut rowsets = IndexSet::new();
        cmp.referenced_rowsets(&mut rowsets);

        let Some(left) = rowsets.into_iter().find(|rowset| *rowset != right) else {
            return Err(Error::invalid_argument(
                "cmp",
                "join condition does not reference another rowset",
            ));
        };

        if left.db != right.db {
            return Err(Error::database_mismatch("join condition"));
        }

        Ok(JoinExpr::Compare(CompareJoin {
            left,
            right,
            cmp,
            join_type,
            and: None,
        }))
    }

    pub fn cross(left: RowSetId, right: RowSetId) -> Result<JoinExpr> {
        if left == right {
            return Err(Error::invalid_argument(
                "right",
                "cannot join a rowset to itself",
            ));
        }

        if left.db != right.db {
            return Err(Error::database_mismatch("cross join"));
        }

        Ok(JoinExpr::Cross(CrossJoin { left, right }))
    }

    pub fn database(&self) -> DatabaseId {
        self.left_table().db
    }

    pub fn join_type(&self) -> Option<JoinType> {
        match self {
            JoinExpr::Column(join) => Some(join.join_type),
            JoinExpr::Compare(join) => Some(join.join_type),
            JoinExpr::Cross(_) => None,
        }
    }

    pub fn left_table(&self) -> RowSetId {
        match self {
            JoinExpr::Column(join) => join.left.rowset,
            JoinExpr::Compare(join) => join.left,
            JoinExpr::Cross(join) => join.left,
        }
    }

    pub fn right_table(&self) -> RowSetId {
        match self {
            JoinExpr::Column(join) => join.right.rowset,
            JoinExpr::Compare(join) => join.right,
            JoinExpr::Cross(join) => join.right,
        }
    }

    /// The rowset whose rows may be missing: the right side of a LEFT join
    /// and the left side of a RIGHT join.
    pub fn outer_table(&self) -> Option<RowSetId> {
        match self.join_type()? {
            JoinType::Left => Some(self.right_table()),
            JoinType::Right => Some(self.left_table()),
            _ => None,
        }
    }

    pub fn is_join_on(&self, rowset: RowSetId) -> bool {
        self.left_table() == rowset || self.right_table() == rowset
    }

    pub fn is_join_on_column(&self, column: ColumnRef) -> bool {
        match self {
            JoinExpr::Column(join) => join.left == column || join.right == column,
            JoinExpr::Compare(join) => join.cmp.is_constraint_on(&column.into()),
            JoinExpr::Cross(_) => false,
        }
    }

    /// Swaps both sides and flips the join type.
    pub fn reverse(&mut self) {
        match self {
            JoinExpr::Column(join) => {
                std::mem::swap(&mut join.left, &mut join.right);
                join.join_type = join.join_type.reversed();
            }
            JoinExpr::Compare(join) => {
                std::mem::swap(&mut join.left, &mut join.right);
                join.join_type = join.join_type.reversed();
            }
            JoinExpr::Cross(join) => std::mem::swap(&mut join.left, &mut join.right),
        }
    }

    pub fn reversed(mut self) -> JoinExpr {
        self.reverse();
        self
    }

    /// Adds a condition to the ON clause. Conditions accumulate with AND.
    pub fn and(mut self, cmp: CompareExpr) -> Result<JoinExpr> {
        let slot = match &mut self {
            JoinExpr::Column(join) => &mut join.and,
            JoinExpr::Compare(join) => &mut join.and,
            JoinExpr::Cross(_) => {
                return Err(Error::invalid_argument(
                    "cmp",
                    "a cross join takes no condition",
                ))
            }
        };

        *slot = Some(match slot.take() {
            Some(existing) => existing.and(cmp),
            None => cmp,
        });

        Ok(self)
    }

    pub fn referenced_rowsets(&self, rowsets: &mut IndexSet<RowSetId>) {
        rowsets.insert(self.left_table());
        rowsets.insert(self.right_table());
    }

    fn same_direction(&self, other: &JoinExpr) -> bool {
        match (self, other) {
            (JoinExpr::Column(lhs), JoinExpr::Column(rhs)) => lhs == rhs,
            (JoinExpr::Compare(lhs), JoinExpr::Compare(rhs)) => lhs == rhs,
            (JoinExpr::Cross(lhs), JoinExpr::Cross(rhs)) => lhs == rhs,
            _ => false,
        }
    }
}

/// A join equals another join and its reversed form.
impl PartialEq for JoinExpr {
    fn eq(&self, other: &JoinExpr) -> bool {
        self.same_direction(other) || self.same_direction(&other.clone().reversed())
    }
}

impl ColumnRef {
    pub fn join(self, right: ColumnRef, join_type: JoinType) -> Result<JoinExpr> {
        JoinExpr::on_columns(self, right, join_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{schema::Database, ColumnDef, DataType};

    fn schema() -> (Database, ColumnRef, ColumnRef) {
        let mut db = Database::new();
        let departments = db.add_table("DEPARTMENTS").unwrap();
        let employees = db.add_table("EMPLOYEES").unwrap();
        let dep_id = db
            .add_column(departments, ColumnDef::new("ID", DataType::AutoInc))
            .unwrap();
        let emp_dep = db
            .add_column(employees, ColumnDef::new("DEPARTMENT_ID", DataType::Integer))
            .unwrap();
        (db, emp_dep, dep_id)
    }

    #[test]
    fn reversed_join_is_equal() {
        let (_db, emp_dep, dep_id) = schema();

        let join = emp_dep.join(dep_id, JoinType::Left).unwrap();
        let reversed = dep_id.join(emp_dep, JoinType::Right).unwrap();
        let inner = emp_dep.join(dep_id, JoinType::Inner).unwrap();

        assert_eq!(join, reversed);
        assert_ne!(join, inner);
        assert_eq!(join.outer_table(), Some(dep_id.rowset));
        assert_eq!(reversed.outer_table(), Some(dep_id.rowset));
    }

    #[test]
    fn self_join_is_rejected() {
        let (_db, emp_dep, _) = schema();
        let err = emp_dep.join(emp_dep, JoinType::Inner).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn compare_join_finds_left_rowset() {
        let (_db, emp_dep, dep_id) = schema();

        let join = JoinExpr::on_compare(
            dep_id.rowset,
            ColumnExpr::from(dep_id).is(emp_dep),
            JoinType::Inner,
        )
        .unwrap();

        assert_eq!(join.left_table(), emp_dep.rowset);
        assert_eq!(join.right_table(), dep_id.rowset);

        let err = JoinExpr::on_compare(dep_id.rowset, ColumnExpr::from(dep_id).is(1), JoinType::Inner)
            .unwrap_err();
        assert!(err.is_invalid_argument());
    }
}
