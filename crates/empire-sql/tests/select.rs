use empire_core::{
    schema::ColumnDef, ColumnRef, Command, DataType, Database, RowSetId, Value,
};
use empire_sql::{Dbms, Handler, HandlerConfig};

use chrono::NaiveDate;
use pretty_assertions::assert_eq;

struct Schema {
    db: Database,
    employees: RowSetId,
    emp_id: ColumnRef,
    last_name: ColumnRef,
    hired: ColumnRef,
    emp_dept: ColumnRef,
    dept_id: ColumnRef,
    dept_name: ColumnRef,
}

fn schema() -> Schema {
    let mut db = Database::new();

    let employees = db.add_table("EMPLOYEES").unwrap();
    let emp_id = db
        .add_column(employees, ColumnDef::new("EMPLOYEE_ID", DataType::AutoInc))
        .unwrap();
    let last_name = db
        .add_column(employees, ColumnDef::new("LAST_NAME", DataType::Text).size(40))
        .unwrap();
    let hired = db
        .add_column(employees, ColumnDef::new("HIRED", DataType::Date))
        .unwrap();
    let emp_dept = db
        .add_column(employees, ColumnDef::new("DEPARTMENT_ID", DataType::Integer))
        .unwrap();
    db.set_primary_key(employees, &[emp_id]).unwrap();

    let departments = db.add_table("DEPARTMENTS").unwrap();
    let dept_id = db
        .add_column(departments, ColumnDef::new("DEPARTMENT_ID", DataType::AutoInc))
        .unwrap();
    let dept_name = db
        .add_column(departments, ColumnDef::new("NAME", DataType::Text).size(80))
        .unwrap();
    db.set_primary_key(departments, &[dept_id]).unwrap();

    Schema {
        db,
        employees,
        emp_id,
        last_name,
        hired,
        emp_dept,
        dept_id,
        dept_name,
    }
}

fn hired_after(s: &Schema) -> Command {
    let mut cmd = Command::new(&s.db);
    cmd.select(s.last_name).unwrap();
    cmd.where_(s.hired.is_greater_than(NaiveDate::from_ymd_opt(2020, 1, 31).unwrap()))
        .unwrap();
    cmd
}

fn select(handler: &Handler, s: &Schema, cmd: &Command) -> (String, Vec<Value>) {
    let mut params = vec![];
    let sql = handler.serializer(&s.db).select(cmd, &mut params).unwrap();
    (sql, params)
}

#[test]
fn date_literals_per_dialect() {
    let s = schema();
    let cmd = hired_after(&s);

    let cases = [
        (Dbms::Derby, "'2020-01-31'"),
        (Dbms::Hsql, "'2020-01-31'"),
        (Dbms::MsSql, "convert(date, '2020-01-31', 111)"),
        (Dbms::MySql, "STR_TO_DATE('2020-01-31','%Y-%m-%d')"),
        (Dbms::Oracle, "TO_DATE('2020-01-31', 'YYYY-MM-DD')"),
        (Dbms::PostgreSql, "'2020-01-31'"),
        (Dbms::Sqlite, "date('2020-01-31')"),
    ];

    for (dbms, literal) in cases {
        let (sql, params) = select(&dbms.handler(), &s, &cmd);
        assert_eq!(
            sql,
            format!("SELECT t1.LAST_NAME\r\nFROM EMPLOYEES t1\r\nWHERE t1.HIRED>{literal}"),
            "{dbms}"
        );
        assert!(params.is_empty());
    }
}

#[test]
fn placeholders_per_dialect() {
    let s = schema();

    let cases = [
        (Dbms::PostgreSql, "$1", "$2"),
        (Dbms::Sqlite, "?1", "?2"),
        (Dbms::MySql, "?", "?"),
        (Dbms::MsSql, "?", "?"),
        (Dbms::Oracle, "?", "?"),
    ];

    for (dbms, first, second) in cases {
        let handler = Handler::new(
            dbms,
            HandlerConfig {
                prepared_statements: true,
                ..HandlerConfig::default()
            },
        );

        let mut cmd = handler.create_command(&s.db);
        cmd.select(s.emp_id).unwrap();
        cmd.where_(s.last_name.is("O'Neil")).unwrap();
        cmd.where_(s.emp_dept.is(4)).unwrap();

        let (sql, params) = select(&handler, &s, &cmd);
        assert_eq!(
            sql,
            format!(
                "SELECT t1.EMPLOYEE_ID\r\nFROM EMPLOYEES t1\r\n\
                 WHERE t1.LAST_NAME={first} AND t1.DEPARTMENT_ID={second}"
            ),
            "{dbms}"
        );
        assert_eq!(params, [Value::from("O'Neil"), Value::from(4)]);
    }
}

#[test]
fn inlined_text_is_escaped() {
    let s = schema();
    let mut cmd = Command::new(&s.db);
    cmd.select(s.emp_id).unwrap();
    cmd.where_(s.last_name.is("O'Neil")).unwrap();

    let (sql, _) = select(&Dbms::Oracle.handler(), &s, &cmd);
    assert_eq!(
        sql,
        "SELECT t1.EMPLOYEE_ID\r\nFROM EMPLOYEES t1\r\nWHERE t1.LAST_NAME='O''Neil'"
    );
}

#[test]
fn join_filter_and_order() {
    let s = schema();
    let mut cmd = Command::new(&s.db);
    cmd.select(s.last_name).unwrap();
    cmd.select(s.dept_name).unwrap();
    cmd.inner_join(s.emp_dept, s.dept_id).unwrap();
    cmd.where_(s.dept_name.like("Dev%")).unwrap();
    cmd.where_(s.hired.is_not_null()).unwrap();
    cmd.order_by(s.dept_name).unwrap();
    cmd.order_by_desc(s.last_name).unwrap();

    let (sql, _) = select(&Dbms::MySql.handler(), &s, &cmd);
    assert_eq!(
        sql,
        "SELECT t1.LAST_NAME, t2.NAME\r\n\
         FROM EMPLOYEES t1 INNER JOIN DEPARTMENTS t2 ON t2.DEPARTMENT_ID = t1.DEPARTMENT_ID\r\n\
         WHERE t2.NAME LIKE 'Dev%' AND t1.HIRED IS NOT NULL\r\n\
         ORDER BY t2.NAME, t1.LAST_NAME DESC"
    );
}

#[test]
fn views_are_selected_like_tables() {
    let mut s = schema();

    let view = s.db.add_view("EMPLOYEE_NAMES").unwrap();
    let view_name = s
        .db
        .add_column(view, ColumnDef::new("LAST_NAME", DataType::Text).size(40))
        .unwrap();

    let mut definition = Command::new(&s.db);
    definition.select(s.last_name).unwrap();
    s.db.set_view_command(view, definition).unwrap();

    let mut cmd = Command::new(&s.db);
    cmd.select(view_name).unwrap();
    cmd.where_(view_name.is("Doe")).unwrap();

    let (sql, _) = select(&Dbms::PostgreSql.handler(), &s, &cmd);
    assert_eq!(
        sql,
        "SELECT v1.LAST_NAME\r\nFROM EMPLOYEE_NAMES v1\r\nWHERE v1.LAST_NAME='Doe'"
    );
}

#[test]
fn commands_belong_to_one_database() {
    let s = schema();
    let other = Database::new();

    let mut cmd = Command::new(&other);
    assert!(cmd.select(s.last_name).unwrap_err().is_database_mismatch());

    let cmd = hired_after(&s);
    let handler = Dbms::Sqlite.handler();
    let err = handler
        .serializer(&other)
        .select(&cmd, &mut Vec::new())
        .unwrap_err();
    assert!(err.is_database_mismatch());

    let err = handler
        .serializer(&other)
        .delete(&cmd, s.employees, &mut Vec::new())
        .unwrap_err();
    assert!(err.is_database_mismatch());
}
