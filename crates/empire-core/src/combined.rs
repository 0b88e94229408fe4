use crate::{
    expr::{ColumnExpr, OrderByExpr},
    schema::DatabaseId,
    Command, Error, Result,
};

/// Two selects joined by a set operator.
#[derive(Debug, Clone, PartialEq)]
pub struct CombinedCommand {
    pub left: CommandExpr,
    pub keyword: CombineKeyword,
    pub right: CommandExpr,
    pub order_by: Vec<OrderByExpr>,
}

/// Either side of a combined command.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandExpr {
    Select(Command),
    Combined(Box<CombinedCommand>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombineKeyword {
    Union,
    UnionAll,
    Intersect,
    Except,
}

impl CombineKeyword {
    pub fn as_sql(self) -> &'static str {
        match self {
            CombineKeyword::Union => "UNION",
            CombineKeyword::UnionAll => "UNION ALL",
            CombineKeyword::Intersect => "INTERSECT",
            CombineKeyword::Except => "EXCEPT",
        }
    }
}

impl CommandExpr {
    pub fn database(&self) -> DatabaseId {
        match self {
            CommandExpr::Select(cmd) => cmd.database(),
            CommandExpr::Combined(cmd) => cmd.database(),
        }
    }

    pub fn select_list(&self) -> &[ColumnExpr] {
        match self {
            CommandExpr::Select(cmd) => cmd.select_list(),
            CommandExpr::Combined(cmd) => cmd.select_list(),
        }
    }

    fn combine(self, keyword: CombineKeyword, right: impl Into<CommandExpr>) -> Result<CombinedCommand> {
        let right = right.into();

        if self.database() != right.database() {
            return Err(Error::database_mismatch("combined command"));
        }

        if self.select_list().len() != right.select_list().len() {
            return Err(Error::object_not_valid(format!(
                "{} of selects with {} and {} columns",
                keyword.as_sql(),
                self.select_list().len(),
                right.select_list().len()
            )));
        }

        Ok(CombinedCommand {
            left: self,
            keyword,
            right,
            order_by: vec![],
        })
    }
}

macro_rules! combine_methods {
    ($ty:ty) => {
        impl $ty {
            pub fn union(self, other: impl Into<CommandExpr>) -> Result<CombinedCommand> {
                CommandExpr::from(self).combine(CombineKeyword::Union, other)
            }

            pub fn union_all(self, other: impl Into<CommandExpr>) -> Result<CombinedCommand> {
                CommandExpr::from(self).combine(CombineKeyword::UnionAll, other)
            }

            pub fn intersect(self, other: impl Into<CommandExpr>) -> Result<CombinedCommand> {
                CommandExpr::from(self).combine(CombineKeyword::Intersect, other)
            }

            pub fn except(self, other: impl Into<CommandExpr>) -> Result<CombinedCommand> {
                CommandExpr::from(self).combine(CombineKeyword::Except, other)
            }
        }
    };
}

combine_methods!(Command);
combine_methods!(CombinedCommand);

impl CombinedCommand {
    pub fn database(&self) -> DatabaseId {
        self.left.database()
    }

    /// The select list of the left-most command names the result columns.
    pub fn select_list(&self) -> &[ColumnExpr] {
        self.left.select_list()
    }

    pub fn order_by(&mut self, expr: impl Into<ColumnExpr>) -> Result<&mut Self> {
        self.add_order_by(OrderByExpr::new(expr, false))
    }

    pub fn order_by_desc(&mut self, expr: impl Into<ColumnExpr>) -> Result<&mut Self> {
        self.add_order_by(OrderByExpr::new(expr, true))
    }

    fn add_order_by(&mut self, order_by: OrderByExpr) -> Result<&mut Self> {
        order_by.expr.check_database(self.database())?;

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
}

impl From<Command> for CommandExpr {
    fn from(value: Command) -> Self {
        CommandExpr::Select(value)
    }
}

impl From<CombinedCommand> for CommandExpr {
    fn from(value: CombinedCommand) -> Self {
        CommandExpr::Combined(Box::new(value))
    }
}
