use empire_core::{schema::ColumnDef, ColumnRef, DataType, Database, RowSetId};
use empire_sql::{DdlAction, DdlObject, Dbms, Handler, HandlerConfig, SqlScript};

use pretty_assertions::assert_eq;

struct Items {
    db: Database,
    items: RowSetId,
    name: ColumnRef,
}

/// A table with one column of every type that has a DDL representation.
fn items() -> Items {
    let mut db = Database::new();
    let items = db.add_table("ITEMS").unwrap();

    let id = db
        .add_column(items, ColumnDef::new("ID", DataType::AutoInc))
        .unwrap();
    db.add_column(items, ColumnDef::new("CODE", DataType::Char).size(3).required())
        .unwrap();
    let name = db
        .add_column(items, ColumnDef::new("NAME", DataType::Text))
        .unwrap();
    db.add_column(items, ColumnDef::new("PRICE", DataType::Decimal).precision(8, 2))
        .unwrap();
    db.add_column(items, ColumnDef::new("WEIGHT", DataType::Double))
        .unwrap();
    db.add_column(
        items,
        ColumnDef::new("ACTIVE", DataType::Bool)
            .required()
            .default_value(true),
    )
    .unwrap();
    db.add_column(items, ColumnDef::new("CREATED", DataType::DateTime))
        .unwrap();
    db.add_column(items, ColumnDef::new("DUE", DataType::Date))
        .unwrap();
    db.add_column(items, ColumnDef::new("NOTES", DataType::Clob))
        .unwrap();
    db.add_column(items, ColumnDef::new("IMAGE", DataType::Blob))
        .unwrap();
    db.set_primary_key(items, &[id]).unwrap();

    Items { db, items, name }
}

fn statements(handler: &Handler, db: &Database, action: DdlAction, table: RowSetId) -> Vec<String> {
    let mut script = SqlScript::new();
    handler
        .ddl(db)
        .script(action, DdlObject::Table(table), &mut script)
        .unwrap();
    script.iter().map(str::to_string).collect()
}

/// The CREATE TABLE statement, without any sequences created next to it.
fn create_table(handler: &Handler, s: &Items) -> String {
    statements(handler, &s.db, DdlAction::Create, s.items)
        .into_iter()
        .find(|stmt| stmt.starts_with("-- creating table"))
        .unwrap()
}

fn expected(columns: &[&str], primary_key: &str) -> String {
    format!(
        "-- creating table ITEMS --\r\nCREATE TABLE ITEMS (\r\n   {},\r\n {primary_key})",
        columns.join(",\r\n   ")
    )
}

#[test]
fn create_table_sqlite() {
    let s = items();
    assert_eq!(
        create_table(&Dbms::Sqlite.handler(), &s),
        expected(
            &[
                "ID INTEGER NOT NULL",
                "CODE CHAR(3) NOT NULL",
                "NAME VARCHAR(100)",
                "PRICE DECIMAL(8,2)",
                "WEIGHT REAL",
                "ACTIVE BOOLEAN DEFAULT 1 NOT NULL",
                "CREATED DATETIME",
                "DUE DATE",
                "NOTES CLOB",
                "IMAGE BLOB",
            ],
            "CONSTRAINT PK_ITEMS PRIMARY KEY (ID)"
        )
    );
}

#[test]
fn create_table_postgresql() {
    let s = items();
    assert_eq!(
        create_table(&Dbms::PostgreSql.handler(), &s),
        expected(
            &[
                "ID SERIAL NOT NULL",
                "CODE CHAR(3) NOT NULL",
                "NAME VARCHAR(100)",
                "PRICE DECIMAL(8,2)",
                "WEIGHT DOUBLE PRECISION",
                "ACTIVE BOOLEAN DEFAULT TRUE NOT NULL",
                "CREATED TIMESTAMP",
                "DUE DATE",
                "NOTES TEXT",
                "IMAGE BYTEA",
            ],
            "CONSTRAINT PK_ITEMS PRIMARY KEY (ID)"
        )
    );

    let handler = Handler::new(
        Dbms::PostgreSql,
        HandlerConfig {
            postgres_serial_type: false,
            ..HandlerConfig::default()
        },
    );
    assert!(create_table(&handler, &s)
        .contains("\r\n   ID INTEGER DEFAULT nextval('ITEMS_ID_SEQ') NOT NULL,"));
}

#[test]
fn create_table_mysql() {
    let s = items();
    assert_eq!(
        create_table(&Dbms::MySql.handler(), &s),
        expected(
            &[
                "ID INT AUTO_INCREMENT NOT NULL",
                "CODE CHAR(3) NOT NULL",
                "NAME VARCHAR(100)",
                "PRICE DECIMAL(8,2)",
                "WEIGHT DOUBLE",
                "ACTIVE BOOLEAN DEFAULT 1 NOT NULL",
                "CREATED DATETIME",
                "DUE DATE",
                "NOTES LONGTEXT",
                "IMAGE BLOB",
            ],
            "PRIMARY KEY (ID)"
        )
    );
}

#[test]
fn create_table_mssql() {
    let s = items();
    assert_eq!(
        create_table(&Dbms::MsSql.handler(), &s),
        expected(
            &[
                "ID INT IDENTITY(1, 1) NOT NULL",
                "CODE NCHAR(3) NOT NULL",
                "NAME NVARCHAR(100)",
                "PRICE DECIMAL(8,2)",
                "WEIGHT FLOAT",
                "ACTIVE BIT DEFAULT 1 NOT NULL",
                "CREATED DATETIME2",
                "DUE DATE",
                "NOTES NTEXT",
                "IMAGE IMAGE",
            ],
            "CONSTRAINT PK_ITEMS PRIMARY KEY (ID)"
        )
    );

    let handler = Handler::new(
        Dbms::MsSql,
        HandlerConfig {
            mssql_use_datetime2: false,
            ..HandlerConfig::default()
        },
    );
    assert!(create_table(&handler, &s).contains("\r\n   CREATED DATETIME,"));
}

#[test]
fn create_table_oracle() {
    let s = items();
    assert_eq!(
        create_table(&Dbms::Oracle.handler(), &s),
        expected(
            &[
                "ID NUMBER NOT NULL",
                "CODE CHAR(3) NOT NULL",
                "NAME VARCHAR2(100)",
                "PRICE NUMBER(8,2)",
                "WEIGHT FLOAT",
                "ACTIVE NUMBER(1,0) DEFAULT 1 NOT NULL",
                "CREATED DATE",
                "DUE DATE",
                "NOTES CLOB",
                "IMAGE BLOB",
            ],
            "CONSTRAINT PK_ITEMS PRIMARY KEY (ID)"
        )
    );

    let handler = Handler::new(
        Dbms::Oracle,
        HandlerConfig {
            oracle_boolean_as_char: true,
            ..HandlerConfig::default()
        },
    );
    assert!(create_table(&handler, &s).contains("\r\n   ACTIVE CHAR(1) DEFAULT 'Y' NOT NULL,"));
}

#[test]
fn create_table_hsql_and_derby() {
    let s = items();

    assert_eq!(
        create_table(&Dbms::Hsql.handler(), &s),
        expected(
            &[
                "ID INTEGER GENERATED BY DEFAULT AS IDENTITY NOT NULL",
                "CODE CHAR(3) NOT NULL",
                "NAME VARCHAR(100)",
                "PRICE DECIMAL(8,2)",
                "WEIGHT DOUBLE",
                "ACTIVE BOOLEAN DEFAULT true NOT NULL",
                "CREATED TIMESTAMP",
                "DUE DATE",
                "NOTES LONGVARCHAR",
                "IMAGE LONGVARBINARY",
            ],
            "CONSTRAINT PK_ITEMS PRIMARY KEY (ID)"
        )
    );

    assert_eq!(
        create_table(&Dbms::Derby.handler(), &s),
        expected(
            &[
                "ID INTEGER GENERATED BY DEFAULT AS IDENTITY NOT NULL",
                "CODE CHAR(3) NOT NULL",
                "NAME VARCHAR(100)",
                "PRICE DECIMAL(8,2)",
                "WEIGHT DOUBLE",
                "ACTIVE BOOLEAN DEFAULT 1 NOT NULL",
                "CREATED TIMESTAMP",
                "DUE DATE",
                "NOTES CLOB",
                "IMAGE BLOB",
            ],
            "CONSTRAINT PK_ITEMS PRIMARY KEY (ID)"
        )
    );
}

#[test]
fn autoinc_sequences() {
    let s = items();

    let oracle = Dbms::Oracle.handler();
    let create = statements(&oracle, &s.db, DdlAction::Create, s.items);
    assert_eq!(create.len(), 2);
    assert_eq!(
        create[0],
        "-- creating sequence for column ITEMS.ID --\r\n\
         CREATE SEQUENCE ITEMS_ID_SEQ INCREMENT BY 1 START WITH 1 MINVALUE 0 NOCYCLE NOCACHE NOORDER"
    );
    assert!(create[1].contains("\r\n   ID NUMBER NOT NULL,"));
    assert_eq!(
        statements(&oracle, &s.db, DdlAction::Drop, s.items),
        ["DROP TABLE ITEMS", "DROP SEQUENCE ITEMS_ID_SEQ"]
    );

    let postgres = Handler::new(
        Dbms::PostgreSql,
        HandlerConfig {
            postgres_serial_type: false,
            ..HandlerConfig::default()
        },
    );
    let create = statements(&postgres, &s.db, DdlAction::Create, s.items);
    assert_eq!(
        create[0],
        "-- creating sequence for column ITEMS.ID --\r\n\
         CREATE SEQUENCE ITEMS_ID_SEQ INCREMENT BY 1 START WITH 1 MINVALUE 0"
    );
    assert_eq!(
        statements(&postgres, &s.db, DdlAction::Drop, s.items),
        ["DROP TABLE ITEMS", "DROP SEQUENCE ITEMS_ID_SEQ"]
    );

    // identity and serial columns need no sequence
    for dbms in [Dbms::PostgreSql, Dbms::Hsql, Dbms::Sqlite, Dbms::MsSql] {
        let handler = dbms.handler();
        assert_eq!(statements(&handler, &s.db, DdlAction::Create, s.items).len(), 1);
        assert_eq!(
            statements(&handler, &s.db, DdlAction::Drop, s.items),
            ["DROP TABLE ITEMS"]
        );
    }
}

#[test]
fn named_sequence_in_schema() {
    let mut db = Database::new().with_schema("SHOP");
    let orders = db.add_table("ORDERS").unwrap();
    let id = db
        .add_column(
            orders,
            ColumnDef::new("ID", DataType::AutoInc).default_value("ORDER_NUMBERS"),
        )
        .unwrap();
    db.set_primary_key(orders, &[id]).unwrap();

    let create = statements(&Dbms::Oracle.handler(), &db, DdlAction::Create, orders);
    assert_eq!(
        create[0],
        "-- creating sequence for column ORDERS.ID --\r\n\
         CREATE SEQUENCE SHOP.ORDER_NUMBERS INCREMENT BY 1 START WITH 1 MINVALUE 0 NOCYCLE NOCACHE NOORDER"
    );
    assert_eq!(
        create[1],
        "-- creating table ORDERS --\r\n\
         CREATE TABLE SHOP.ORDERS (\r\n   \
         ID NUMBER NOT NULL,\r\n \
         CONSTRAINT PK_ORDERS PRIMARY KEY (ID))"
    );
}

#[test]
fn alter_column_per_dialect() {
    let s = items();

    let alter = |dbms: Dbms| {
        let mut script = SqlScript::new();
        dbms.handler()
            .ddl(&s.db)
            .alter_column(s.name, DdlAction::Alter, &mut script)
            .unwrap();
        script.to_string()
    };

    assert_eq!(alter(Dbms::Oracle), "ALTER TABLE ITEMS MODIFY NAME VARCHAR2(100)");
    assert_eq!(alter(Dbms::MySql), "ALTER TABLE ITEMS MODIFY NAME VARCHAR(100)");
    assert_eq!(
        alter(Dbms::MsSql),
        "ALTER TABLE ITEMS ALTER COLUMN NAME NVARCHAR(100)"
    );
    assert_eq!(
        alter(Dbms::PostgreSql),
        "ALTER TABLE ITEMS ALTER COLUMN NAME TYPE VARCHAR(100)"
    );
}

#[test]
fn schema_and_reserved_names() {
    let mut db = Database::new().with_schema("SHOP");
    let orders = db.add_table("ORDER").unwrap();
    let id = db
        .add_column(orders, ColumnDef::new("ID", DataType::Integer))
        .unwrap();
    db.add_column(orders, ColumnDef::new("TYPE", DataType::Char).size(2))
        .unwrap();
    db.set_primary_key(orders, &[id]).unwrap();

    let mut script = SqlScript::new();
    let mssql = Dbms::MsSql.handler();
    mssql.ddl(&db).create_table(orders, &mut script).unwrap();
    mssql
        .ddl(&db)
        .script(DdlAction::Drop, DdlObject::Table(orders), &mut script)
        .unwrap();

    assert_eq!(
        script.iter().collect::<Vec<_>>(),
        [
            "-- creating table ORDER --\r\n\
             CREATE TABLE SHOP.[ORDER] (\r\n   \
             ID INTEGER NOT NULL,\r\n   \
             [TYPE] NCHAR(2),\r\n \
             CONSTRAINT PK_ORDER PRIMARY KEY (ID))",
            "DROP TABLE SHOP.[ORDER]",
        ]
    );

    let mut script = SqlScript::new();
    Dbms::PostgreSql
        .handler()
        .ddl(&db)
        .drop_table(orders, &mut script)
        .unwrap();
    assert_eq!(script.to_string(), "DROP TABLE SHOP.\"ORDER\"");
}

#[test]
fn drop_database_reverses_creation() {
    let mut db = Database::new();
    let parent = db.add_table("PARENTS").unwrap();
    let parent_id = db
        .add_column(parent, ColumnDef::new("ID", DataType::Integer))
        .unwrap();
    db.set_primary_key(parent, &[parent_id]).unwrap();

    let child = db.add_table("CHILDREN").unwrap();
    let child_parent = db
        .add_column(child, ColumnDef::new("PARENT_ID", DataType::Integer))
        .unwrap();
    db.add_relation("CHILDREN_PARENT_FK", &[(child_parent, parent_id)])
        .unwrap()
        .on_delete_cascade = true;

    let mut create = SqlScript::new();
    let mut drop = SqlScript::new();
    let handler = Dbms::PostgreSql.handler();
    let ddl = handler.ddl(&db);

    ddl.script(DdlAction::Create, DdlObject::Database, &mut create)
        .unwrap();
    ddl.script(DdlAction::Drop, DdlObject::Database, &mut drop)
        .unwrap();

    assert_eq!(
        create.iter().last().unwrap(),
        "-- creating foreign key constraint CHILDREN_PARENT_FK --\r\n\
         ALTER TABLE CHILDREN ADD CONSTRAINT CHILDREN_PARENT_FK \
         FOREIGN KEY (PARENT_ID) REFERENCES PARENTS (ID) ON DELETE CASCADE"
    );
    assert_eq!(
        drop.iter().collect::<Vec<_>>(),
        [
            "ALTER TABLE CHILDREN DROP CONSTRAINT CHILDREN_PARENT_FK",
            "DROP TABLE CHILDREN",
            "DROP TABLE PARENTS",
        ]
    );

    let err = handler
        .ddl(&db)
        .script(DdlAction::Alter, DdlObject::Table(child), &mut SqlScript::new())
        .unwrap_err();
    assert!(err.is_unsupported_feature());
}
