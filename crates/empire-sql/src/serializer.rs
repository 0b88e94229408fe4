#[macro_use]
mod fmt;
use fmt::ToSql;

mod column_expr;

mod combined;

mod command;
use command::{Delete, Insert, Select, Update};

mod compare;

mod delim;
use delim::{Comma, Delimited};

mod ident;
use ident::{ColumnName, Ident, RowSetName};

mod join;

mod operand;
use operand::Arg;

mod params;
use params::{Bind, ParamRef};
pub use params::{Params, Placeholder};

mod template;
use template::Template;

use crate::Handler;

use empire_core::{
    expr::Context, schema::RowSetId, ColumnExpr, Command, CombinedCommand, CompareExpr, Database,
    Error, Result, Value,
};

/// Renders the commands and expressions of one database as SQL text of the
/// handler's dialect.
///
/// Literal values are inlined unless the rendered command is auto-prepared,
/// in which case they are pushed to `params` and replaced by placeholders.
#[derive(Debug, Clone, Copy)]
pub struct Serializer<'a> {
    handler: &'a Handler,
    db: &'a Database,
}

struct Formatter<'a, P> {
    serializer: &'a Serializer<'a>,

    /// Where to write the serialized SQL
    dst: &'a mut String,

    /// Where to store parameters
    params: &'a mut P,

    /// The command currently being rendered
    scope: Scope<'a>,
}

#[derive(Clone, Copy)]
struct Scope<'a> {
    /// Values referenced by `ParamId`
    params: &'a [Value],

    /// Literal compare and set values become placeholders
    auto_prepare: bool,
}

/// A node rendered in a context.
struct Cx<'a, T>(&'a T, Context);

impl<'a> Serializer<'a> {
    pub fn new(handler: &'a Handler, db: &'a Database) -> Serializer<'a> {
        Serializer { handler, db }
    }

    pub fn handler(&self) -> &'a Handler {
        self.handler
    }

    pub fn select(&self, cmd: &Command, params: &mut impl Params) -> Result<String> {
        cmd.check_database(self.db.id)?;
        self.render(Scope::NONE, params, Select::new(cmd))
    }

    pub fn update(&self, cmd: &Command, params: &mut impl Params) -> Result<String> {
        cmd.check_database(self.db.id)?;
        self.render(Scope::NONE, params, Update(cmd))
    }

    pub fn insert(&self, cmd: &Command, params: &mut impl Params) -> Result<String> {
        cmd.check_database(self.db.id)?;
        self.render(Scope::NONE, params, Insert(cmd))
    }

    /// Deletes from `table` the rows matching the command's constraints.
    pub fn delete(&self, cmd: &Command, table: RowSetId, params: &mut impl Params) -> Result<String> {
        cmd.check_database(self.db.id)?;
        self.db.check_database(table.db, "table")?;
        self.render(Scope::NONE, params, Delete { cmd, table })
    }

    pub fn combined(&self, cmd: &CombinedCommand, params: &mut impl Params) -> Result<String> {
        if cmd.database() != self.db.id {
            return Err(Error::database_mismatch("combined command"));
        }
        self.render(Scope::NONE, params, cmd)
    }

    /// Renders a single column expression outside of any command.
    pub fn expr(&self, expr: &ColumnExpr, cx: Context, params: &mut impl Params) -> Result<String> {
        expr.check_database(self.db.id)?;
        self.render(Scope::NONE, params, Cx(expr, cx))
    }

    /// Renders a single predicate outside of any command.
    pub fn compare(&self, cmp: &CompareExpr, cx: Context, params: &mut impl Params) -> Result<String> {
        cmp.check_database(self.db.id)?;
        self.render(Scope::NONE, params, Cx(cmp, cx))
    }

    fn render<P: Params>(&self, scope: Scope<'_>, params: &mut P, node: impl ToSql) -> Result<String> {
        let mut ret = String::new();

        let mut fmt = Formatter {
            serializer: self,
            dst: &mut ret,
            params,
            scope,
        };

        node.to_sql(&mut fmt)?;

        Ok(ret)
    }
}

/// The SELECT statement of a view definition. Values are always inlined.
pub(crate) fn view_select(handler: &Handler, db: &Database, cmd: &Command) -> Result<String> {
    cmd.check_database(db.id)?;

    let mut cmd = cmd.clone();
    cmd.set_auto_prepare(false);

    let mut params = Vec::<Value>::new();
    let sql = Serializer::new(handler, db).render(Scope::NONE, &mut params, Select::without_order(&cmd))?;

    if !params.is_empty() {
        return Err(Error::object_not_valid(
            "a view command cannot reference parameters",
        ));
    }

    Ok(sql)
}

impl Scope<'_> {
    const NONE: Scope<'static> = Scope {
        params: &[],
        auto_prepare: false,
    };
}

impl<'a, P: Params> Formatter<'a, P> {
    fn handler(&self) -> &'a Handler {
        self.serializer.handler
    }

    fn db(&self) -> &'a Database {
        self.serializer.db
    }

    /// A formatter writing to the same buffer within the scope of `cmd`.
    fn scoped<'b>(&'b mut self, cmd: &'b Command) -> Formatter<'b, P> {
        Formatter {
            serializer: self.serializer,
            dst: &mut *self.dst,
            params: &mut *self.params,
            scope: Scope {
                params: cmd.params(),
                auto_prepare: cmd.is_auto_prepare(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Dbms, HandlerConfig};

    use empire_core::{
        expr::{CalcOp, CmpOp},
        schema::{ColumnDef, ColumnRef},
        DataType, JoinExpr, Operand,
    };
    use pretty_assertions::assert_eq;

    struct Schema {
        db: Database,
        employees: RowSetId,
        departments: RowSetId,
        id: ColumnRef,
        name: ColumnRef,
        salary: ColumnRef,
        dept_id: ColumnRef,
        hired: ColumnRef,
        dept_pk: ColumnRef,
        dept_name: ColumnRef,
    }

    fn schema() -> Schema {
        let mut db = Database::new();

        let employees = db.add_table("EMPLOYEES").unwrap();
        let id = db
            .add_column(employees, ColumnDef::new("ID", DataType::AutoInc).required())
            .unwrap();
        let name = db
            .add_column(employees, ColumnDef::new("NAME", DataType::Text).size(40))
            .unwrap();
        let salary = db
            .add_column(employees, ColumnDef::new("SALARY", DataType::Decimal).precision(10, 2))
            .unwrap();
        let dept_id = db
            .add_column(employees, ColumnDef::new("DEPARTMENT_ID", DataType::Integer))
            .unwrap();
        let hired = db
            .add_column(employees, ColumnDef::new("HIRED", DataType::Date))
            .unwrap();
        db.set_primary_key(employees, &[id]).unwrap();

        let departments = db.add_table("DEPARTMENTS").unwrap();
        let dept_pk = db
            .add_column(departments, ColumnDef::new("ID", DataType::AutoInc).required())
            .unwrap();
        let dept_name = db
            .add_column(departments, ColumnDef::new("NAME", DataType::Text).size(40))
            .unwrap();
        db.set_primary_key(departments, &[dept_pk]).unwrap();

        Schema {
            db,
            employees,
            departments,
            id,
            name,
            salary,
            dept_id,
            hired,
            dept_pk,
            dept_name,
        }
    }

    fn select(dbms: Dbms, s: &Schema, cmd: &Command) -> Result<String> {
        let handler = dbms.handler();
        handler.serializer(&s.db).select(cmd, &mut Vec::new())
    }

    fn expr(dbms: Dbms, s: &Schema, expr: &ColumnExpr, cx: Context) -> String {
        let handler = dbms.handler();
        handler
            .serializer(&s.db)
            .expr(expr, cx, &mut Vec::new())
            .unwrap()
    }

    #[test]
    fn simple_select() {
        let s = schema();
        let mut cmd = Command::new(&s.db);
        cmd.select(s.id).unwrap().select(s.name).unwrap();
        cmd.where_(ColumnExpr::from(s.name).like("J%")).unwrap();
        cmd.order_by(s.name).unwrap();

        assert_eq!(
            select(Dbms::Sqlite, &s, &cmd).unwrap(),
            "SELECT t1.ID, t1.NAME\r\nFROM EMPLOYEES t1\r\nWHERE t1.NAME LIKE 'J%'\r\nORDER BY t1.NAME"
        );
    }

    #[test]
    fn empty_select_is_rejected() {
        let s = schema();
        let cmd = Command::new(&s.db);

        let err = select(Dbms::Sqlite, &s, &cmd).unwrap_err();
        assert!(err.is_object_not_valid());
    }

    #[test]
    fn joins_and_aggregates() {
        let s = schema();
        let mut cmd = Command::new(&s.db);
        cmd.select(s.dept_name).unwrap();
        cmd.select(ColumnExpr::from(s.salary).sum().as_alias("TOTAL"))
            .unwrap();
        cmd.left_join(s.dept_id, s.dept_pk).unwrap();
        cmd.group_by(s.dept_name).unwrap();
        cmd.having(ColumnExpr::from(s.salary).sum().cmp(CmpOp::Greater, 1000))
            .unwrap();

        assert_eq!(
            select(Dbms::PostgreSql, &s, &cmd).unwrap(),
            "SELECT t2.NAME, sum(t1.SALARY) AS TOTAL\r\n\
             FROM EMPLOYEES t1 LEFT JOIN DEPARTMENTS t2 ON t2.ID = t1.DEPARTMENT_ID\r\n\
             GROUP BY t2.NAME\r\n\
             HAVING sum(t1.SALARY)>1000"
        );
    }

    #[test]
    fn or_is_parenthesized() {
        let s = schema();
        let mut cmd = Command::new(&s.db);
        cmd.select(s.id).unwrap();
        cmd.where_(
            ColumnExpr::from(s.name)
                .is("A")
                .or(ColumnExpr::from(s.name).is("B")),
        )
        .unwrap();
        cmd.where_(ColumnExpr::from(s.dept_id).is(3)).unwrap();

        assert_eq!(
            select(Dbms::MySql, &s, &cmd).unwrap(),
            "SELECT t1.ID\r\nFROM EMPLOYEES t1\r\nWHERE (t1.NAME='A' OR t1.NAME='B') AND t1.DEPARTMENT_ID=3"
        );
    }

    #[test]
    fn between_and_in() {
        let s = schema();

        let cmp = ColumnExpr::from(s.salary).cmp(CmpOp::Between, Operand::list([1000, 2000]));
        let handler = Dbms::Sqlite.handler();
        let ser = handler.serializer(&s.db);

        assert_eq!(
            ser.compare(&cmp, Context::DEFAULT, &mut Vec::new()).unwrap(),
            "t1.SALARY BETWEEN 1000 AND 2000"
        );

        let cmp = ColumnExpr::from(s.dept_id).cmp(CmpOp::In, Operand::list([1, 2, 3]));
        assert_eq!(
            ser.compare(&cmp, Context::DEFAULT, &mut Vec::new()).unwrap(),
            "t1.DEPARTMENT_ID IN (1, 2, 3)"
        );

        let cmp = ColumnExpr::from(s.name).is(Value::Null);
        assert_eq!(
            ser.compare(&cmp, Context::DEFAULT, &mut Vec::new()).unwrap(),
            "t1.NAME IS NULL"
        );
    }

    #[test]
    fn functions_use_dialect_templates() {
        let s = schema();

        assert_eq!(
            expr(Dbms::Sqlite, &s, &ColumnExpr::from(s.name).upper(), Context::DEFAULT),
            "upper(t1.NAME)"
        );
        assert_eq!(
            expr(
                Dbms::Oracle,
                &s,
                &ColumnExpr::from(s.name).coalesce("n/a"),
                Context::DEFAULT
            ),
            "nvl(t1.NAME, 'n/a')"
        );
        assert_eq!(
            expr(
                Dbms::PostgreSql,
                &s,
                &ColumnExpr::from(s.salary).calc(CalcOp::Multiply, 2),
                Context::DEFAULT
            ),
            "t1.SALARY*2"
        );
    }

    #[test]
    fn concat_uses_dialect_operator() {
        let s = schema();
        let e = ColumnExpr::from(s.name).append("!");

        assert_eq!(expr(Dbms::Oracle, &s, &e, Context::DEFAULT), "t1.NAME || '!'");
        assert_eq!(expr(Dbms::MsSql, &s, &e, Context::DEFAULT), "t1.NAME + '!'");
        assert_eq!(expr(Dbms::MySql, &s, &e, Context::DEFAULT), "concat(t1.NAME, '!')");
    }

    #[test]
    fn alias_only_in_select_list() {
        let s = schema();
        let e = ColumnExpr::from(s.name).as_alias("EMP_NAME");

        assert_eq!(expr(Dbms::Sqlite, &s, &e, Context::ALL), "t1.NAME AS EMP_NAME");
        assert_eq!(expr(Dbms::Sqlite, &s, &e, Context::DEFAULT), "t1.NAME");
        assert_eq!(expr(Dbms::Sqlite, &s, &e, Context::NAME), "NAME");
    }

    #[test]
    fn reserved_names_are_quoted() {
        let mut db = Database::new();
        let t = db.add_table("ORDER").unwrap();
        let c = db
            .add_column(t, ColumnDef::new("SELECT", DataType::Text))
            .unwrap();

        let mut cmd = Command::new(&db);
        cmd.select(c).unwrap();

        let handler = Dbms::PostgreSql.handler();
        assert_eq!(
            handler.serializer(&db).select(&cmd, &mut Vec::new()).unwrap(),
            "SELECT t1.\"SELECT\"\r\nFROM \"ORDER\" t1"
        );
    }

    #[test]
    fn auto_prepare_binds_values() {
        let s = schema();
        let handler = Handler::new(
            Dbms::PostgreSql,
            HandlerConfig {
                prepared_statements: true,
                ..HandlerConfig::default()
            },
        );

        let mut cmd = handler.create_command(&s.db);
        cmd.select(s.id).unwrap();
        cmd.where_(ColumnExpr::from(s.name).is("Smith")).unwrap();
        cmd.where_(ColumnExpr::from(s.dept_id).cmp(CmpOp::In, Operand::list([1, 2])))
            .unwrap();
        cmd.where_(ColumnExpr::from(s.hired).cmp(CmpOp::Less, Value::SysDate))
            .unwrap();

        let mut params = Vec::new();
        let sql = handler.serializer(&s.db).select(&cmd, &mut params).unwrap();

        assert_eq!(
            sql,
            "SELECT t1.ID\r\nFROM EMPLOYEES t1\r\n\
             WHERE t1.NAME=$1 AND t1.DEPARTMENT_ID IN (1, 2) AND t1.HIRED<CURRENT_DATE"
        );
        assert_eq!(params, vec![Value::from("Smith")]);
    }

    #[test]
    fn explicit_params() {
        let s = schema();
        let mut cmd = Command::new(&s.db);
        let p = cmd.add_param(7);
        cmd.select(s.name).unwrap();
        cmd.where_(ColumnExpr::from(s.id).is(p)).unwrap();

        let handler = Dbms::Sqlite.handler();
        let mut params = Vec::new();
        assert_eq!(
            handler.serializer(&s.db).select(&cmd, &mut params).unwrap(),
            "SELECT t1.NAME\r\nFROM EMPLOYEES t1\r\nWHERE t1.ID=?1"
        );
        assert_eq!(params, vec![Value::from(7)]);
    }

    #[test]
    fn sub_query_in_compare() {
        let s = schema();
        let mut sub = Command::new(&s.db);
        sub.select(s.dept_pk).unwrap();
        sub.where_(ColumnExpr::from(s.dept_name).is("Sales")).unwrap();

        let mut cmd = Command::new(&s.db);
        cmd.select(s.name).unwrap();
        cmd.where_(ColumnExpr::from(s.dept_id).cmp(CmpOp::In, sub)).unwrap();

        assert_eq!(
            select(Dbms::Hsql, &s, &cmd).unwrap(),
            "SELECT t1.NAME\r\nFROM EMPLOYEES t1\r\n\
             WHERE t1.DEPARTMENT_ID IN (SELECT t2.ID\r\nFROM DEPARTMENTS t2\r\nWHERE t2.NAME='Sales')"
        );
    }

    #[test]
    fn pseudo_table_without_rowsets() {
        let s = schema();
        let mut cmd = Command::new(&s.db);
        cmd.select(ColumnExpr::value(Value::SysDate)).unwrap();

        assert_eq!(
            select(Dbms::Oracle, &s, &cmd).unwrap(),
            "SELECT systimestamp\r\nFROM DUAL"
        );
        assert_eq!(select(Dbms::PostgreSql, &s, &cmd).unwrap(), "SELECT NOW()");
    }

    #[test]
    fn cross_join() {
        let s = schema();
        let mut cmd = Command::new(&s.db);
        cmd.select(s.name).unwrap().select(s.dept_name).unwrap();
        cmd.join(JoinExpr::cross(s.employees, s.departments).unwrap())
            .unwrap();

        assert_eq!(
            select(Dbms::Sqlite, &s, &cmd).unwrap(),
            "SELECT t1.NAME, t2.NAME\r\nFROM EMPLOYEES t1 CROSS JOIN DEPARTMENTS t2"
        );
    }
}
