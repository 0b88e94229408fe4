use empire::{
    sql::{DdlAction, DdlObject, Dbms, SqlScript},
    ColumnDef, Connect, DataType, Database, Record, RecordData, Value,
};

use pretty_assertions::assert_eq;

#[test]
fn sqlite_end_to_end() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();

    let mut db = Database::new();
    let notes = db.add_table("NOTES").unwrap();
    let id = db
        .add_column(notes, ColumnDef::new("ID", DataType::AutoInc))
        .unwrap();
    let title = db
        .add_column(notes, ColumnDef::new("TITLE", DataType::Text).size(60).required())
        .unwrap();
    db.set_primary_key(notes, &[id]).unwrap();

    let connect = Connect::new("sqlite::memory:").unwrap();
    assert_eq!(connect.dbms(), Dbms::Sqlite);

    let mut conn = connect.connect().unwrap();

    let mut script = SqlScript::new();
    conn.handler()
        .ddl(&db)
        .script(DdlAction::Create, DdlObject::Database, &mut script)
        .unwrap();
    conn.execute_script(&script).unwrap();

    for text in ["first", "second"] {
        let mut record = Record::new(db.rowset(notes));
        record.set_value(title, text).unwrap();
        conn.save_record(&db, &mut record).unwrap();
    }

    let mut cmd = conn.command(&db);
    cmd.select(title).unwrap();
    cmd.where_(id.is_greater_than(1)).unwrap();

    let rows = conn.query_record_list(&db, &cmd).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get(title).unwrap(), &Value::from("second"));
}

#[test]
fn other_dialects_render_but_do_not_connect() {
    let connect = Connect::new("postgresql://localhost/app").unwrap();

    let mut db = Database::new();
    let t = db.add_table("NOTES").unwrap();
    let title = db
        .add_column(t, ColumnDef::new("TITLE", DataType::Text))
        .unwrap();

    let handler = connect.handler();
    let mut cmd = handler.create_command(&db);
    cmd.select(title.upper()).unwrap();

    assert_eq!(
        handler.serializer(&db).select(&cmd, &mut Vec::new()).unwrap(),
        "SELECT upper(t1.TITLE)\r\nFROM NOTES t1"
    );

    assert!(connect.connect().unwrap_err().is_unsupported_feature());
}
