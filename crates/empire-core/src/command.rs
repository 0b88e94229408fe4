use crate::{
    expr::{ColumnExpr, CompareExpr, JoinExpr, JoinType, OrderByExpr, ParamId, SetExpr},
    schema::{ColumnRef, Database, DatabaseId, RowSetId},
    Error, Result, Value,
};

use indexmap::IndexSet;
use tracing::trace;

/// A SQL command under construction.
///
/// The same command renders as SELECT, UPDATE, INSERT or DELETE depending
/// on which statement is requested. Every expression added to it must
/// belong to the command's database.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    db: DatabaseId,
    distinct: bool,
    select: Vec<ColumnExpr>,
    set: Vec<SetExpr>,
    joins: Vec<JoinExpr>,
    where_: Vec<CompareExpr>,
    group_by: Vec<ColumnExpr>,
    having: Vec<CompareExpr>,
    order_by: Vec<OrderByExpr>,
    limit: Option<usize>,
    skip: Option<usize>,
    params: Vec<Value>,
    auto_prepare: bool,
}

impl Command {
    pub fn new(db: &Database) -> Command {
        Command::for_database(db.id)
    }

    pub fn for_database(db: DatabaseId) -> Command {
        Command {
            db,
            distinct: false,
            select: vec![],
            set: vec![],
            joins: vec![],
            where_: vec![],
            group_by: vec![],
            having: vec![],
            order_by: vec![],
            limit: None,
            skip: None,
            params: vec![],
            auto_prepare: false,
        }
    }

    pub fn database(&self) -> DatabaseId {
        self.db
    }

    /// Fails when the command belongs to another database than `db`.
    pub fn check_database(&self, db: DatabaseId) -> Result<()> {
        if self.db == db {
            Ok(())
        } else {
            Err(Error::database_mismatch("command"))
        }
    }

    /// When set, literal comparison values are sent as statement
    /// parameters instead of being inlined.
    pub fn set_auto_prepare(&mut self, auto_prepare: bool) -> &mut Self {
        self.auto_prepare = auto_prepare;
        self
    }

    pub fn is_auto_prepare(&self) -> bool {
        self.auto_prepare
    }

    // ===== select =====

    /// Adds an expression to the select list. Duplicates are ignored.
    pub fn select(&mut self, expr: impl Into<ColumnExpr>) -> Result<&mut Self> {
        let expr = expr.into();
        expr.check_database(self.db)?;

        if !self.select.contains(&expr) {
            self.select.push(expr);
        }

        Ok(self)
    }

    pub fn select_all<I>(&mut self, exprs: I) -> Result<&mut Self>
    where
        I: IntoIterator,
        I::Item: Into<ColumnExpr>,
    {
        for expr in exprs {
            self.select(expr)?;
        }
        Ok(self)
    }

    pub fn select_distinct(&mut self) -> &mut Self {
        self.distinct = true;
        self
    }

    pub fn is_distinct(&self) -> bool {
        self.distinct
    }

    pub fn select_list(&self) -> &[ColumnExpr] {
        &self.select
    }

    pub fn has_select(&self) -> bool {
        !self.select.is_empty()
    }

    // ===== set =====

    /// Adds an assignment. An earlier assignment to the same column is
    /// replaced.
    pub fn set(&mut self, set: SetExpr) -> Result<&mut Self> {
        if set.column.rowset.db != self.db {
            return Err(Error::database_mismatch("set column"));
        }
        set.value.check_database(self.db)?;

        match self.set.iter_mut().find(|item| item.column == set.column) {
            Some(existing) => existing.value = set.value,
            None => self.set.push(set),
        }

        Ok(self)
    }

    pub fn set_list(&self) -> &[SetExpr] {
        &self.set
    }

    pub fn has_set(&self) -> bool {
        !self.set.is_empty()
    }

    /// Returns the value assigned to `column`, if any.
    pub fn set_value_of(&self, column: ColumnRef) -> Option<&SetExpr> {
        self.set.iter().find(|item| item.column == column)
    }

    // ===== joins =====

    /// Adds a join. A join equal to an existing one, in either direction,
    /// is ignored.
    pub fn join(&mut self, join: JoinExpr) -> Result<&mut Self> {
        if join.database() != self.db {
            return Err(Error::database_mismatch("join"));
        }

        if !self.joins.contains(&join) {
            self.joins.push(join);
        }

        Ok(self)
    }

    pub fn join_columns(
        &mut self,
        left: ColumnRef,
        right: ColumnRef,
        join_type: JoinType,
    ) -> Result<&mut Self> {
        self.join(JoinExpr::on_columns(left, right, join_type)?)
    }

    pub fn inner_join(&mut self, left: ColumnRef, right: ColumnRef) -> Result<&mut Self> {
        self.join_columns(left, right, JoinType::Inner)
    }

    pub fn left_join(&mut self, left: ColumnRef, right: ColumnRef) -> Result<&mut Self> {
        self.join_columns(left, right, JoinType::Left)
    }

    pub fn right_join(&mut self, left: ColumnRef, right: ColumnRef) -> Result<&mut Self> {
        self.join_columns(left, right, JoinType::Right)
    }

    pub fn joins(&self) -> &[JoinExpr] {
        &self.joins
    }

    pub fn has_join_on(&self, rowset: RowSetId) -> bool {
        self.joins.iter().any(|join| join.is_join_on(rowset))
    }

    // ===== where / having =====

    pub fn where_(&mut self, cmp: CompareExpr) -> Result<&mut Self> {
        cmp.check_database(self.db)?;
        set_constraint(&mut self.where_, cmp);
        Ok(self)
    }

    pub fn having(&mut self, cmp: CompareExpr) -> Result<&mut Self> {
        cmp.check_database(self.db)?;
        set_constraint(&mut self.having, cmp);
        Ok(self)
    }

    pub fn where_constraints(&self) -> &[CompareExpr] {
        &self.where_
    }

    pub fn having_constraints(&self) -> &[CompareExpr] {
        &self.having
    }

    pub fn has_where_constraints(&self) -> bool {
        !self.where_.is_empty()
    }

    pub fn has_where_constraint_on(&self, column: impl Into<ColumnExpr>) -> bool {
        let column = column.into();
        self.where_.iter().any(|cmp| cmp.is_constraint_on(&column))
    }

    /// Removes every WHERE constraint on `column`.
    pub fn remove_where_constraint_on(&mut self, column: impl Into<ColumnExpr>) -> &mut Self {
        let column = column.into();
        self.where_.retain(|cmp| !cmp.is_constraint_on(&column));
        self
    }

    // ===== group by / order by =====

    pub fn group_by(&mut self, expr: impl Into<ColumnExpr>) -> Result<&mut Self> {
        let expr = expr.into();
        expr.check_database(self.db)?;

        if !self.group_by.contains(&expr) {
            self.group_by.push(expr);
        }

        Ok(self)
    }

    pub fn group_by_all<I>(&mut self, exprs: I) -> Result<&mut Self>
    where
        I: IntoIterator,
        I::Item: Into<ColumnExpr>,
    {
        for expr in exprs {
            self.group_by(expr)?;
        }
        Ok(self)
    }

    pub fn group_by_list(&self) -> &[ColumnExpr] {
        &self.group_by
    }

    pub fn order_by(&mut self, expr: impl Into<ColumnExpr>) -> Result<&mut Self> {
        self.add_order_by(OrderByExpr::new(expr, false))
    }

    pub fn order_by_desc(&mut self, expr: impl Into<ColumnExpr>) -> Result<&mut Self> {
        self.add_order_by(OrderByExpr::new(expr, true))
    }

    /// Adds a sort. A sort on the same expression is replaced in place.
    pub fn add_order_by(&mut self, order_by: OrderByExpr) -> Result<&mut Self> {
        order_by.expr.check_database(self.db)?;

        match self
            .order_by
            .iter_mut()
            .find(|item| item.expr == order_by.expr)
        {
            Some(existing) => existing.desc = order_by.desc,
            None => self.order_by.push(order_by),
        }

        Ok(self)
    }

    pub fn order_by_list(&self) -> &[OrderByExpr] {
        &self.order_by
    }

    // ===== limit =====

    pub fn limit_rows(&mut self, limit: usize) -> &mut Self {
        self.limit = Some(limit);
        self
    }

    pub fn skip_rows(&mut self, skip: usize) -> &mut Self {
        self.skip = Some(skip);
        self
    }

    pub fn clear_limit(&mut self) -> &mut Self {
        self.limit = None;
        self.skip = None;
        self
    }

    /// A limit of zero means no limit, the same as never setting one.
    pub fn limit(&self) -> Option<usize> {
        self.limit.filter(|limit| *limit > 0)
    }

    pub fn skip(&self) -> Option<usize> {
        self.skip.filter(|skip| *skip > 0)
    }

    // ===== params =====

    /// Adds a parameter. Use the returned id as an operand; its current
    /// value is bound when the command is rendered.
    pub fn add_param(&mut self, value: impl Into<Value>) -> ParamId {
        self.params.push(value.into());
        ParamId(self.params.len() - 1)
    }

    pub fn set_param_value(&mut self, id: ParamId, value: impl Into<Value>) -> Result<()> {
        let Some(slot) = self.params.get_mut(id.0) else {
            return Err(Error::invalid_argument(
                "param",
                format!("no parameter at index {}", id.0),
            ));
        };
        *slot = value.into();
        Ok(())
    }

    pub fn param_value(&self, id: ParamId) -> Option<&Value> {
        self.params.get(id.0)
    }

    pub fn params(&self) -> &[Value] {
        &self.params
    }

    // ===== clear =====

    pub fn clear_select(&mut self) -> &mut Self {
        self.select.clear();
        self.distinct = false;
        self
    }

    pub fn clear_set(&mut self) -> &mut Self {
        self.set.clear();
        self
    }

    pub fn clear_joins(&mut self) -> &mut Self {
        self.joins.clear();
        self
    }

    pub fn clear_where(&mut self) -> &mut Self {
        self.where_.clear();
        self
    }

    pub fn clear_having(&mut self) -> &mut Self {
        self.having.clear();
        self
    }

    pub fn clear_group_by(&mut self) -> &mut Self {
        self.group_by.clear();
        self
    }

    pub fn clear_order_by(&mut self) -> &mut Self {
        self.order_by.clear();
        self
    }

    pub fn clear_params(&mut self) -> &mut Self {
        self.params.clear();
        self
    }

    /// Resets the command to its freshly created state.
    pub fn clear(&mut self) -> &mut Self {
        *self = Command {
            auto_prepare: self.auto_prepare,
            ..Command::for_database(self.db)
        };
        self
    }

    /// The rowsets referenced by the select list, joins, where, group by,
    /// having and order by, in order of first reference.
    pub fn referenced_rowsets(&self) -> IndexSet<RowSetId> {
        let mut rowsets = IndexSet::new();

        for expr in &self.select {
            expr.referenced_rowsets(&mut rowsets);
        }
        for join in &self.joins {
            join.referenced_rowsets(&mut rowsets);
        }
        for cmp in &self.where_ {
            cmp.referenced_rowsets(&mut rowsets);
        }
        for expr in &self.group_by {
            expr.referenced_rowsets(&mut rowsets);
        }
        for cmp in &self.having {
            cmp.referenced_rowsets(&mut rowsets);
        }
        for order_by in &self.order_by {
            order_by.expr.referenced_rowsets(&mut rowsets);
        }

        rowsets
    }

    /// The table an UPDATE, INSERT or DELETE writes to: the rowset of the
    /// first assignment, else of the first WHERE constraint.
    pub fn target_table(&self) -> Option<RowSetId> {
        if let Some(set) = self.set.first() {
            return Some(set.column.rowset);
        }

        let mut rowsets = IndexSet::new();
        for cmp in &self.where_ {
            cmp.referenced_rowsets(&mut rowsets);
        }
        rowsets.first().copied()
    }
}

/// Replaces the first mutually exclusive constraint, or appends.
fn set_constraint(list: &mut Vec<CompareExpr>, cmp: CompareExpr) {
    match list.iter_mut().find(|item| item.is_mutually_exclusive(&cmp)) {
        Some(existing) => {
            trace!(replaced = ?existing, with = ?cmp, "replacing constraint");
            *existing = cmp;
        }
        None => list.push(cmp),
    }
}
