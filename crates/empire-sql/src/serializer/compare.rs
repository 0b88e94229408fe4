use super::{Arg, Cx, Formatter, Params, Select, ToSql};

use empire_core::{
    expr::{CmpOp, CompareAndOr, CompareCol, CompareExists, Context},
    CompareExpr, Operand, Phrase, Result,
};
use tracing::warn;

impl ToSql for Cx<'_, CompareExpr> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) -> Result<()> {
        let Cx(cmp, cx) = self;

        match cmp {
            CompareExpr::Col(cmp) => Cx(cmp, cx).to_sql(f),
            CompareExpr::AndOr(cmp) => Cx(cmp, cx).to_sql(f),
            CompareExpr::Not(inner) if cx.contains(Context::VALUE) => {
                fmt!(f, "NOT(" Cx(&**inner, cx) ")");
                Ok(())
            }
            CompareExpr::Not(inner) => Cx(&**inner, cx).to_sql(f),
            CompareExpr::Exists(cmp) => Cx(cmp, cx).to_sql(f),
            CompareExpr::Parenthesis(inner) => {
                fmt!(f, "(" Cx(&**inner, cx) ")");
                Ok(())
            }
        }
    }
}

impl ToSql for Cx<'_, CompareCol> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) -> Result<()> {
        let Cx(cmp, cx) = self;

        if !cx.contains(Context::VALUE) {
            return Cx(&*cmp.expr, cx).to_sql(f);
        }

        let op = cmp.effective_op();
        let value = value_arg(cmp, op, cx, f);

        if !cx.contains(Context::NAME) {
            return value.to_sql(f);
        }

        if cmp.parenthesis {
            fmt!(f, "(");
        }

        fmt!(f, Cx(&*cmp.expr, cx) op.as_str());

        match op {
            CmpOp::Null | CmpOp::NotNull => {}
            CmpOp::In | CmpOp::NotIn => fmt!(f, value ")"),
            _ => fmt!(f, value),
        }

        if cmp.parenthesis {
            fmt!(f, ")");
        }

        Ok(())
    }
}

/// The right hand side of a comparison, typed after its left hand side.
fn value_arg<'a, P: Params>(
    cmp: &'a CompareCol,
    op: CmpOp,
    cx: Context,
    f: &Formatter<'a, P>,
) -> Arg<'a> {
    let data_type = cmp.expr.data_type();

    let sep = match op {
        CmpOp::Between | CmpOp::NotBetween => " AND ",
        CmpOp::In | CmpOp::NotIn => ", ",
        _ if data_type.is_numeric() => "+",
        _ => f.handler().phrase(Phrase::ConcatExpr),
    };

    let cx = match (&cmp.value, op) {
        (Operand::Command(_), CmpOp::In | CmpOp::NotIn) => cx | Context::NOPARENTHESES,
        _ => cx,
    };

    Arg::new(&cmp.value, data_type, cx)
        .sep(sep)
        .prepare(f.scope.auto_prepare && op.allows_param())
}

impl ToSql for Cx<'_, CompareAndOr> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) -> Result<()> {
        let Cx(cmp, cx) = self;

        // only one side of the predicate is requested
        if !cx.contains(Context::NAME) || !cx.contains(Context::VALUE) {
            fmt!(f, Cx(&*cmp.left, cx) "," Cx(&*cmp.right, cx));
            return Ok(());
        }

        let parenthesis = cmp.or && !cx.contains(Context::NOPARENTHESES);
        let op = if cmp.or { " OR " } else { " AND " };

        if parenthesis {
            fmt!(f, "(");
        }

        fmt!(f, Nested { cmp: &cmp.left, cx, parenthesis } op Nested { cmp: &cmp.right, cx, parenthesis });

        if parenthesis {
            fmt!(f, ")");
        }

        Ok(())
    }
}

/// One side of an OR. AND terms are wrapped so that they keep binding
/// tighter.
struct Nested<'a> {
    cmp: &'a CompareExpr,
    cx: Context,
    parenthesis: bool,
}

impl ToSql for Nested<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) -> Result<()> {
        if self.parenthesis && self.cmp.is_and() {
            fmt!(f, "(" Cx(self.cmp, self.cx) ")");
            Ok(())
        } else {
            Cx(self.cmp, self.cx).to_sql(f)
        }
    }
}

impl ToSql for Cx<'_, CompareExists> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) -> Result<()> {
        let Cx(exists, cx) = self;

        if !cx.contains(Context::NAME) || !cx.contains(Context::VALUE) {
            warn!(?cx, "exists cannot be rendered as name or value only");
            return Ok(());
        }

        fmt!(f, " exists (" Select::without_order(&exists.cmd));

        if let Some(compare) = &exists.compare {
            let keyword = if exists.cmd.has_where_constraints() {
                " and "
            } else {
                " where "
            };
            fmt!(f, keyword "(" Cx(&**compare, cx) ") ");
        }

        fmt!(f, ") ");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::Dbms;

    use empire_core::{
        expr::{exists, exists_where, CmpOp, Context},
        schema::ColumnDef,
        ColumnExpr, Command, CompareExpr, DataType, Database,
    };
    use pretty_assertions::assert_eq;

    fn render(db: &Database, cmp: &CompareExpr, cx: Context) -> String {
        let handler = Dbms::Sqlite.handler();
        handler
            .serializer(db)
            .compare(cmp, cx, &mut Vec::new())
            .unwrap()
    }

    #[test]
    fn and_inside_or() {
        let mut db = Database::new();
        let t = db.add_table("ITEMS").unwrap();
        let a = db.add_column(t, ColumnDef::new("A", DataType::Integer)).unwrap();
        let b = db.add_column(t, ColumnDef::new("B", DataType::Integer)).unwrap();

        let cmp = ColumnExpr::from(a)
            .is(1)
            .and(ColumnExpr::from(b).is(2))
            .or(ColumnExpr::from(a).is(3));

        assert_eq!(
            render(&db, &cmp, Context::DEFAULT),
            "((t1.A=1 AND t1.B=2) OR t1.A=3)"
        );
        assert_eq!(
            render(&db, &cmp, Context::DEFAULT | Context::NOPARENTHESES),
            "t1.A=1 AND t1.B=2 OR t1.A=3"
        );
        assert_eq!(
            render(&db, &ColumnExpr::from(a).is(1).not(), Context::DEFAULT),
            "NOT(t1.A=1)"
        );
    }

    #[test]
    fn empty_values_become_null_checks() {
        let mut db = Database::new();
        let t = db.add_table("ITEMS").unwrap();
        let name = db.add_column(t, ColumnDef::new("NAME", DataType::Text)).unwrap();

        assert_eq!(
            render(&db, &ColumnExpr::from(name).is(""), Context::DEFAULT),
            "t1.NAME IS NULL"
        );
        assert_eq!(
            render(&db, &ColumnExpr::from(name).cmp(CmpOp::NotLike, ""), Context::DEFAULT),
            "t1.NAME IS NOT NULL"
        );
        assert_eq!(
            render(&db, &ColumnExpr::from(name).is("x"), Context::VALUE),
            "'x'"
        );
    }

    #[test]
    fn exists_subquery() {
        let mut db = Database::new();
        let orders = db.add_table("ORDERS").unwrap();
        let customer = db
            .add_column(orders, ColumnDef::new("CUSTOMER_ID", DataType::Integer))
            .unwrap();
        let customers = db.add_table("CUSTOMERS").unwrap();
        let id = db
            .add_column(customers, ColumnDef::new("ID", DataType::Integer))
            .unwrap();

        let mut sub = Command::new(&db);
        sub.select(customer).unwrap();

        assert_eq!(
            render(&db, &exists(sub.clone()), Context::DEFAULT),
            " exists (SELECT t1.CUSTOMER_ID\r\nFROM ORDERS t1) "
        );
        assert_eq!(
            render(
                &db,
                &exists_where(sub, ColumnExpr::from(customer).is(id)),
                Context::DEFAULT
            ),
            " exists (SELECT t1.CUSTOMER_ID\r\nFROM ORDERS t1 where (t1.CUSTOMER_ID=t2.ID) ) "
        );
    }

    #[test]
    fn exists_subquery_extends_existing_where() {
        let mut db = Database::new();
        let orders = db.add_table("ORDERS").unwrap();
        let customer = db
            .add_column(orders, ColumnDef::new("CUSTOMER_ID", DataType::Integer))
            .unwrap();
        let status = db
            .add_column(orders, ColumnDef::new("STATUS", DataType::Text))
            .unwrap();
        let customers = db.add_table("CUSTOMERS").unwrap();
        let id = db
            .add_column(customers, ColumnDef::new("ID", DataType::Integer))
            .unwrap();

        let mut sub = Command::new(&db);
        sub.select(customer).unwrap();
        sub.where_(ColumnExpr::from(status).is("OPEN")).unwrap();

        assert_eq!(
            render(
                &db,
                &exists_where(sub, ColumnExpr::from(customer).is(id)),
                Context::DEFAULT
            ),
            " exists (SELECT t1.CUSTOMER_ID\r\nFROM ORDERS t1\r\nWHERE t1.STATUS='OPEN' and (t1.CUSTOMER_ID=t2.ID) ) "
        );
    }
}
