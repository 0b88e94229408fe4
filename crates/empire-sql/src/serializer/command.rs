use super::{Arg, ColumnName, Comma, Cx, Delimited, Formatter, Params, RowSetName, ToSql};
use crate::{Dbms, Feature};

use empire_core::{
    expr::{CmpOp, CompareCol, Context, SetExpr},
    schema::RowSetId,
    Command, CompareExpr, Error, JoinExpr, Phrase, Result,
};
use std::borrow::Cow;

pub(super) struct Select<'a> {
    cmd: &'a Command,

    /// Render the ORDER BY clause
    order: bool,
}

pub(super) struct Update<'a>(pub(super) &'a Command);

pub(super) struct Insert<'a>(pub(super) &'a Command);

pub(super) struct Delete<'a> {
    pub(super) cmd: &'a Command,
    pub(super) table: RowSetId,
}

/// FROM clause: the joins followed by every other referenced rowset.
struct FromClause<'a>(&'a Command);

/// WHERE clause, if the command has constraints.
struct WhereClause<'a>(&'a Command, Context);

impl<'a> Select<'a> {
    pub(super) fn new(cmd: &'a Command) -> Select<'a> {
        Select { cmd, order: true }
    }

    /// For subqueries whose ordering is meaningless.
    pub(super) fn without_order(cmd: &'a Command) -> Select<'a> {
        Select { cmd, order: false }
    }
}

impl ToSql for Select<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) -> Result<()> {
        let cmd = self.cmd;

        if !cmd.has_select() {
            return Err(Error::object_not_valid(
                "a select command needs at least one select expression",
            ));
        }

        let f = &mut f.scoped(cmd);
        let handler = f.handler();
        let dbms = handler.dbms();

        let limit = cmd.limit();
        let skip = cmd.skip();

        if limit.is_some() && !handler.is_supported(Feature::QueryLimitRows) {
            return Err(Error::unsupported_feature(format!(
                "{dbms} cannot limit the number of rows of a query"
            )));
        }

        if skip.is_some() && !handler.is_supported(Feature::QuerySkipRows) {
            return Err(Error::unsupported_feature(format!(
                "{dbms} cannot skip rows of a query"
            )));
        }

        let order = self.order && !cmd.order_by_list().is_empty();

        if dbms == Dbms::MsSql && skip.is_some() && !order {
            return Err(Error::object_not_valid(
                "skipping rows on SQL Server requires an ORDER BY clause",
            ));
        }

        let oracle_rownum = dbms == Dbms::Oracle && (limit.is_some() || skip.is_some());

        if oracle_rownum {
            fmt!(f, "SELECT * FROM (");
            if skip.is_some() {
                fmt!(f, "SELECT row_.*, rownum rownum_ FROM (");
            }
        }

        fmt!(f, "SELECT ");

        if cmd.is_distinct() {
            fmt!(f, "DISTINCT ");
        }

        if dbms == Dbms::MsSql && skip.is_none() {
            if let Some(limit) = limit {
                fmt!(f, "TOP " limit " ");
            }
        }

        fmt!(
            f,
            Comma(cmd.select_list().iter().map(|expr| Cx(expr, Context::ALL)))
            FromClause(cmd)
            WhereClause(cmd, Context::DEFAULT)
        );

        if !cmd.group_by_list().is_empty() {
            let group_by = cmd.group_by_list().iter().map(|expr| Cx(expr, Context::DEFAULT));
            fmt!(f, "\r\nGROUP BY " Comma(group_by));
        }

        if !cmd.having_constraints().is_empty() {
            let having = cmd.having_constraints().iter().map(|cmp| Cx(cmp, Context::DEFAULT));
            fmt!(f, "\r\nHAVING " Delimited(having, " AND "));
        }

        if order {
            let order_by = cmd.order_by_list().iter().map(|expr| Cx(expr, Context::DEFAULT));
            fmt!(f, "\r\nORDER BY " Comma(order_by));
        }

        match dbms {
            Dbms::Oracle if oracle_rownum => match skip {
                Some(skip) => {
                    fmt!(f, ") row_");
                    if let Some(limit) = limit {
                        let last = skip.saturating_add(limit);
                        fmt!(f, " WHERE rownum<=" last);
                    }
                    fmt!(f, ") WHERE rownum_>" skip);
                }
                None => {
                    if let Some(limit) = limit {
                        fmt!(f, ") row_ WHERE rownum<=" limit);
                    }
                }
            },
            Dbms::MsSql => {
                if let Some(skip) = skip {
                    fmt!(f, "\r\nOFFSET " skip " ROWS");
                    if let Some(limit) = limit {
                        fmt!(f, " FETCH NEXT " limit " ROWS ONLY");
                    }
                }
            }
            Dbms::PostgreSql | Dbms::Hsql | Dbms::MySql | Dbms::Sqlite => {
                match (limit, skip) {
                    (Some(limit), Some(skip)) => fmt!(f, "\r\nLIMIT " limit " OFFSET " skip),
                    (Some(limit), None) => fmt!(f, "\r\nLIMIT " limit),
                    (None, Some(skip)) => match dbms {
                        // both require a LIMIT in front of OFFSET
                        Dbms::MySql => fmt!(f, "\r\nLIMIT 18446744073709551615 OFFSET " skip),
                        Dbms::Sqlite => fmt!(f, "\r\nLIMIT -1 OFFSET " skip),
                        _ => fmt!(f, "\r\nOFFSET " skip),
                    },
                    (None, None) => {}
                }
            }
            _ => {}
        }

        Ok(())
    }
}

impl ToSql for FromClause<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) -> Result<()> {
        let cmd = self.0;
        let mut rowsets = cmd.referenced_rowsets();
        let mut joined: Vec<RowSetId> = vec![];
        let start = f.dst.len();

        fmt!(f, "\r\nFROM ");

        for (i, join) in cmd.joins().iter().enumerate() {
            if i == 0 {
                joined.extend([join.left_table(), join.right_table()]);
                fmt!(f, Cx(join, Context::NAME | Context::VALUE));
            } else {
                // keep the chain connected to the rowsets joined so far
                let join: Cow<'_, JoinExpr> = if joined.contains(&join.right_table()) {
                    Cow::Owned(join.clone().reversed())
                } else {
                    Cow::Borrowed(join)
                };

                joined.push(join.right_table());
                fmt!(f, "\r\n\t" Cx(join.as_ref(), Context::VALUE));
            }
        }

        let mut sep = if joined.is_empty() { "" } else { ", " };

        for rowset in rowsets.drain(..).filter(|rowset| !joined.contains(rowset)) {
            fmt!(f, sep RowSetName::aliased(rowset));
            sep = ", ";
        }

        if sep.is_empty() {
            f.dst.truncate(start);

            let pseudo = f.handler().phrase(Phrase::PseudoTable);
            if !pseudo.is_empty() {
                fmt!(f, "\r\nFROM " pseudo);
            }
        }

        Ok(())
    }
}

impl ToSql for WhereClause<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) -> Result<()> {
        let WhereClause(cmd, cx) = self;

        if cmd.has_where_constraints() {
            let constraints = cmd.where_constraints().iter().map(|cmp| Cx(cmp, cx));
            fmt!(f, "\r\nWHERE " Delimited(constraints, " AND "));
        }

        Ok(())
    }
}

impl ToSql for Cx<'_, SetExpr> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) -> Result<()> {
        let Cx(set, cx) = self;

        if cx.contains(Context::NAME) {
            fmt!(f, ColumnName(set.column, Context::NAME));
        }

        if cx.contains(Context::NAME | Context::VALUE) {
            fmt!(f, "=");
        }

        if cx.contains(Context::VALUE) {
            let prepare = f.scope.auto_prepare;
            fmt!(f, Arg::new(&set.value, set.column.data_type, cx).sep("+").prepare(prepare));
        }

        Ok(())
    }
}

fn target_table(cmd: &Command, statement: &str) -> Result<RowSetId> {
    match cmd.target_table() {
        Some(table) if cmd.has_set() => Ok(table),
        _ => Err(Error::object_not_valid(format!(
            "{statement} command has no set expressions"
        ))),
    }
}

impl ToSql for Update<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) -> Result<()> {
        let cmd = self.0;
        let table = target_table(cmd, "update")?;
        let f = &mut f.scoped(cmd);

        fmt!(f, "UPDATE ");

        if cmd.joins().is_empty() {
            let sets = cmd.set_list().iter().map(|set| Cx(set, Context::NAME | Context::VALUE));
            fmt!(
                f,
                RowSetName::plain(table)
                "\r\nSET "
                Comma(sets)
                WhereClause(cmd, Context::NAME | Context::VALUE)
            );
        } else {
            let alias = f.db().rowset(table).alias.as_str();
            let sets = cmd.set_list().iter().map(|set| Cx(set, Context::DEFAULT));
            fmt!(
                f,
                alias
                "\r\nSET "
                Comma(sets)
                FromClause(cmd)
                WhereClause(cmd, Context::DEFAULT)
            );
        }

        Ok(())
    }
}

impl ToSql for Insert<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) -> Result<()> {
        let cmd = self.0;
        let table = target_table(cmd, "insert")?;
        let f = &mut f.scoped(cmd);

        // equality constraints on columns without a value are inserted too
        let extra: Vec<&CompareCol> = cmd
            .where_constraints()
            .iter()
            .filter_map(|cmp| match cmp {
                CompareExpr::Col(cmp) if cmp.op == CmpOp::Equal => Some(cmp),
                _ => None,
            })
            .filter(|cmp| match cmp.expr.update_column() {
                Some(column) => column.rowset == table && cmd.set_value_of(column).is_none(),
                None => false,
            })
            .collect();

        let sep = if extra.is_empty() { "" } else { ", " };

        let extra_names = extra.iter().map(|cmp| Cx(*cmp, Context::NAME));
        let set_names = cmd.set_list().iter().map(|set| Cx(set, Context::NAME));

        fmt!(
            f,
            "INSERT INTO "
            RowSetName::plain(table)
            "( "
            Comma(extra_names)
            sep
            Comma(set_names)
            ") VALUES ( "
        );

        let extra_values = extra.iter().map(|cmp| Cx(*cmp, Context::VALUE));
        let set_values = cmd.set_list().iter().map(|set| Cx(set, Context::VALUE));

        fmt!(f, Comma(extra_values) sep Comma(set_values) ")");

        Ok(())
    }
}

impl ToSql for Delete<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) -> Result<()> {
        let Delete { cmd, table } = self;

        if !f.db().rowset(table).is_table() {
            return Err(Error::object_not_valid(format!(
                "cannot delete from view {}",
                f.db().rowset(table).name
            )));
        }

        let f = &mut f.scoped(cmd);

        fmt!(
            f,
            "DELETE FROM "
            RowSetName::plain(table)
            WhereClause(cmd, Context::NAME | Context::VALUE)
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{Dbms, Handler, HandlerConfig};

    use empire_core::{schema::ColumnDef, ColumnExpr, Command, DataType, Database, Value};
    use pretty_assertions::assert_eq;

    fn items() -> (Database, empire_core::ColumnRef, empire_core::ColumnRef) {
        let mut db = Database::new();
        let t = db.add_table("ITEMS").unwrap();
        let id = db.add_column(t, ColumnDef::new("ID", DataType::Integer)).unwrap();
        let name = db.add_column(t, ColumnDef::new("NAME", DataType::Text)).unwrap();
        (db, id, name)
    }

    struct Orders {
        db: Database,
        order_id: empire_core::ColumnRef,
        order_status: empire_core::ColumnRef,
        order_customer: empire_core::ColumnRef,
        customer_id: empire_core::ColumnRef,
        customer_name: empire_core::ColumnRef,
        customer_region: empire_core::ColumnRef,
        region_id: empire_core::ColumnRef,
        region_name: empire_core::ColumnRef,
    }

    fn orders() -> Orders {
        let mut db = Database::new();

        let orders = db.add_table("ORDERS").unwrap();
        let order_id = db.add_column(orders, ColumnDef::new("ID", DataType::Integer)).unwrap();
        let order_status = db.add_column(orders, ColumnDef::new("STATUS", DataType::Text)).unwrap();
        let order_customer = db
            .add_column(orders, ColumnDef::new("CUSTOMER_ID", DataType::Integer))
            .unwrap();

        let customers = db.add_table("CUSTOMERS").unwrap();
        let customer_id = db.add_column(customers, ColumnDef::new("ID", DataType::Integer)).unwrap();
        let customer_name = db.add_column(customers, ColumnDef::new("NAME", DataType::Text)).unwrap();
        let customer_region = db
            .add_column(customers, ColumnDef::new("REGION_ID", DataType::Integer))
            .unwrap();

        let regions = db.add_table("REGIONS").unwrap();
        let region_id = db.add_column(regions, ColumnDef::new("ID", DataType::Integer)).unwrap();
        let region_name = db.add_column(regions, ColumnDef::new("NAME", DataType::Text)).unwrap();

        Orders {
            db,
            order_id,
            order_status,
            order_customer,
            customer_id,
            customer_name,
            customer_region,
            region_id,
            region_name,
        }
    }

    fn paged(db: &Database, id: empire_core::ColumnRef, limit: usize, skip: usize) -> Command {
        let mut cmd = Command::new(db);
        cmd.select(id).unwrap();
        cmd.order_by(id).unwrap();
        cmd.limit_rows(limit).skip_rows(skip);
        cmd
    }

    fn select(dbms: Dbms, db: &Database, cmd: &Command) -> empire_core::Result<String> {
        dbms.handler().serializer(db).select(cmd, &mut Vec::new())
    }

    #[test]
    fn limit_and_offset() {
        let (db, id, _) = items();

        let cmd = paged(&db, id, 10, 20);
        assert_eq!(
            select(Dbms::PostgreSql, &db, &cmd).unwrap(),
            "SELECT t1.ID\r\nFROM ITEMS t1\r\nORDER BY t1.ID\r\nLIMIT 10 OFFSET 20"
        );
        assert_eq!(
            select(Dbms::MsSql, &db, &cmd).unwrap(),
            "SELECT t1.ID\r\nFROM ITEMS t1\r\nORDER BY t1.ID\r\nOFFSET 20 ROWS FETCH NEXT 10 ROWS ONLY"
        );
        assert_eq!(
            select(Dbms::Oracle, &db, &cmd).unwrap(),
            "SELECT * FROM (SELECT row_.*, rownum rownum_ FROM (SELECT t1.ID\r\nFROM ITEMS t1\r\nORDER BY t1.ID) row_ WHERE rownum<=30) WHERE rownum_>20"
        );

        let cmd = paged(&db, id, 0, 5);
        assert_eq!(
            select(Dbms::Sqlite, &db, &cmd).unwrap(),
            "SELECT t1.ID\r\nFROM ITEMS t1\r\nORDER BY t1.ID\r\nLIMIT -1 OFFSET 5"
        );
        assert_eq!(
            select(Dbms::MySql, &db, &cmd).unwrap(),
            "SELECT t1.ID\r\nFROM ITEMS t1\r\nORDER BY t1.ID\r\nLIMIT 18446744073709551615 OFFSET 5"
        );

        let cmd = paged(&db, id, 3, 0);
        assert_eq!(
            select(Dbms::MsSql, &db, &cmd).unwrap(),
            "SELECT TOP 3 t1.ID\r\nFROM ITEMS t1\r\nORDER BY t1.ID"
        );
        assert_eq!(
            select(Dbms::Oracle, &db, &cmd).unwrap(),
            "SELECT * FROM (SELECT t1.ID\r\nFROM ITEMS t1\r\nORDER BY t1.ID) row_ WHERE rownum<=3"
        );
    }

    #[test]
    fn oracle_row_window_saturates() {
        let (db, id, _) = items();
        let cmd = paged(&db, id, usize::MAX, 10);

        assert_eq!(
            select(Dbms::Oracle, &db, &cmd).unwrap(),
            format!(
                "SELECT * FROM (SELECT row_.*, rownum rownum_ FROM (SELECT t1.ID\r\nFROM ITEMS t1\r\nORDER BY t1.ID) row_ WHERE rownum<={}) WHERE rownum_>10",
                usize::MAX
            )
        );
    }

    #[test]
    fn zero_limit_is_no_limit() {
        let (db, id, _) = items();
        let cmd = paged(&db, id, 0, 0);

        for dbms in [Dbms::Sqlite, Dbms::PostgreSql, Dbms::MySql, Dbms::MsSql, Dbms::Oracle] {
            assert_eq!(
                select(dbms, &db, &cmd).unwrap(),
                "SELECT t1.ID\r\nFROM ITEMS t1\r\nORDER BY t1.ID"
            );
        }

        // Derby has no row limits, but an unset limit needs none
        assert!(select(Dbms::Derby, &db, &cmd).is_ok());
    }

    #[test]
    fn limits_need_support() {
        let (db, id, _) = items();
        let cmd = paged(&db, id, 10, 0);

        let err = select(Dbms::Derby, &db, &cmd).unwrap_err();
        assert!(err.is_unsupported_feature());

        let mut cmd = paged(&db, id, 0, 10);
        cmd.clear_order_by();
        let err = select(Dbms::MsSql, &db, &cmd).unwrap_err();
        assert!(err.is_object_not_valid());
    }

    #[test]
    fn update_insert_delete() {
        let (db, id, name) = items();
        let handler = Dbms::Sqlite.handler();
        let ser = handler.serializer(&db);

        let mut cmd = Command::new(&db);
        cmd.set(name.to("Widget")).unwrap();
        cmd.where_(ColumnExpr::from(id).is(5)).unwrap();

        assert_eq!(
            ser.update(&cmd, &mut Vec::new()).unwrap(),
            "UPDATE ITEMS\r\nSET NAME='Widget'\r\nWHERE ID=5"
        );
        assert_eq!(
            ser.insert(&cmd, &mut Vec::new()).unwrap(),
            "INSERT INTO ITEMS( ID, NAME) VALUES ( 5, 'Widget')"
        );
        assert_eq!(
            ser.delete(&cmd, id.rowset, &mut Vec::new()).unwrap(),
            "DELETE FROM ITEMS\r\nWHERE ID=5"
        );

        let err = ser.update(&Command::new(&db), &mut Vec::new()).unwrap_err();
        assert!(err.is_object_not_valid());
    }

    #[test]
    fn prepared_update() {
        let (db, id, name) = items();
        let handler = Handler::new(
            Dbms::PostgreSql,
            HandlerConfig {
                prepared_statements: true,
                ..HandlerConfig::default()
            },
        );

        let mut cmd = handler.create_command(&db);
        cmd.set(name.to("Widget")).unwrap();
        cmd.set(id.to(Value::Null)).unwrap();
        cmd.where_(ColumnExpr::from(id).is(5)).unwrap();

        let mut params = Vec::new();
        assert_eq!(
            handler.serializer(&db).update(&cmd, &mut params).unwrap(),
            "UPDATE ITEMS\r\nSET NAME=$1, ID=null\r\nWHERE ID=$2"
        );
        assert_eq!(params, vec![Value::from("Widget"), Value::from(5)]);
    }

    #[test]
    fn join_chain_is_reversed_to_stay_connected() {
        let o = orders();
        let mut cmd = Command::new(&o.db);
        cmd.select(o.order_id).unwrap().select(o.region_name).unwrap();
        cmd.inner_join(o.order_customer, o.customer_id).unwrap();
        // the right side is already part of the chain
        cmd.left_join(o.region_id, o.customer_region).unwrap();

        assert_eq!(
            select(Dbms::Sqlite, &o.db, &cmd).unwrap(),
            "SELECT t1.ID, t3.NAME\r\n\
             FROM ORDERS t1 INNER JOIN CUSTOMERS t2 ON t2.ID = t1.CUSTOMER_ID\r\n\
             \t RIGHT JOIN REGIONS t3 ON t3.ID = t2.REGION_ID"
        );
    }

    #[test]
    fn update_with_joins() {
        let o = orders();
        let handler = Dbms::Sqlite.handler();

        let mut cmd = Command::new(&o.db);
        cmd.set(o.order_status.to("HOLD")).unwrap();
        cmd.inner_join(o.order_customer, o.customer_id).unwrap();
        cmd.where_(ColumnExpr::from(o.customer_name).is("ACME")).unwrap();

        assert_eq!(
            handler.serializer(&o.db).update(&cmd, &mut Vec::new()).unwrap(),
            "UPDATE t1\r\nSET STATUS='HOLD'\r\n\
             FROM ORDERS t1 INNER JOIN CUSTOMERS t2 ON t2.ID = t1.CUSTOMER_ID\r\n\
             WHERE t2.NAME='ACME'"
        );
    }
}
