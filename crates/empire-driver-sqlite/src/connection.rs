use crate::{Reader, TransactionManager, Value};

use empire_core::{
    BeanListFactory, Command, DataRecord, Database, Error, FromRecord, ListFactory, Record,
    RecordListFactory, RecordState, Result, RowSetId, Value as CoreValue,
};
use empire_sql::{Dbms, Handler, HandlerConfig, Serializer, SqlScript};
use rusqlite::Connection as RusqliteConnection;
use std::path::Path;
use tracing::{debug, warn};

/// One SQLite connection. Commands are rendered with the SQLite dialect
/// and executed synchronously.
#[derive(Debug)]
pub struct Connection {
    connection: RusqliteConnection,
    handler: Handler,
    transactions: TransactionManager,
}

impl Connection {
    pub fn in_memory(config: HandlerConfig) -> Result<Self> {
        let connection =
            RusqliteConnection::open_in_memory().map_err(Error::driver_operation_failed)?;
        Ok(Self::new(connection, config))
    }

    pub fn open<P: AsRef<Path>>(path: P, config: HandlerConfig) -> Result<Self> {
        let connection = RusqliteConnection::open(path).map_err(Error::driver_operation_failed)?;
        Ok(Self::new(connection, config))
    }

    fn new(connection: RusqliteConnection, config: HandlerConfig) -> Self {
        Self {
            connection,
            handler: Handler::new(Dbms::Sqlite, config),
            transactions: TransactionManager::new(),
        }
    }

    pub fn handler(&self) -> &Handler {
        &self.handler
    }

    /// Executes a statement and returns the number of affected rows.
    pub fn execute_sql(&mut self, sql: &str, params: &[CoreValue]) -> Result<usize> {
        debug!(sql, params = params.len(), "executing statement");

        let mut stmt = self
            .connection
            .prepare_cached(sql)
            .map_err(Error::driver_operation_failed)?;

        stmt.execute(rusqlite::params_from_iter(params.iter().map(Value)))
            .map_err(Error::driver_operation_failed)
    }

    /// Executes the statements of `script` in order. Stops at the first
    /// failing statement.
    pub fn execute_script(&mut self, script: &SqlScript) -> Result<()> {
        for (i, stmt) in script.iter().enumerate() {
            self.execute_sql(stmt, &[]).map_err(|err| {
                err.context(format!("script statement {} of {}", i + 1, script.len()))
            })?;
        }
        Ok(())
    }

    pub fn execute_insert(&mut self, db: &Database, cmd: &Command) -> Result<usize> {
        let mut params = vec![];
        let sql = self.serializer(db).insert(cmd, &mut params)?;
        self.execute_sql(&sql, &params)
    }

    pub fn execute_update(&mut self, db: &Database, cmd: &Command) -> Result<usize> {
        let mut params = vec![];
        let sql = self.serializer(db).update(cmd, &mut params)?;
        self.execute_sql(&sql, &params)
    }

    pub fn execute_delete(&mut self, db: &Database, table: RowSetId, cmd: &Command) -> Result<usize> {
        let mut params = vec![];
        let sql = self.serializer(db).delete(cmd, table, &mut params)?;
        self.execute_sql(&sql, &params)
    }

    /// Runs a query. Each row is read into a [`DataRecord`] whose fields are
    /// typed by the command's select list.
    pub fn query(&mut self, db: &Database, cmd: &Command) -> Result<Reader> {
        let mut params = vec![];
        let sql = self.serializer(db).select(cmd, &mut params)?;
        debug!(sql = %sql, params = params.len(), "executing query");

        let columns = cmd.select_list().to_vec();
        let names: Vec<String> = columns.iter().map(|expr| expr.name(db)).collect();

        let mut stmt = self
            .connection
            .prepare_cached(&sql)
            .map_err(Error::driver_operation_failed)?;
        let mut rows = stmt
            .query(rusqlite::params_from_iter(params.iter().map(Value)))
            .map_err(Error::driver_operation_failed)?;

        let mut records = vec![];

        while let Some(row) = rows.next().map_err(Error::driver_operation_failed)? {
            let mut values = Vec::with_capacity(columns.len());

            for (index, expr) in columns.iter().enumerate() {
                let value = row.get_ref(index).map_err(Error::driver_operation_failed)?;
                values.push(Value::from_sql(value, expr.data_type())?);
            }

            records.push(DataRecord::new(columns.clone(), names.clone(), values));
        }

        Ok(Reader::new(columns, records))
    }

    /// The first field of the first row. A query without rows fails with
    /// `RecordNotFound`.
    pub fn query_single_value(&mut self, db: &Database, cmd: &Command) -> Result<CoreValue> {
        let mut reader = self.query(db, cmd)?;

        match reader.next() {
            Some(record) => Ok(record.into_values().into_iter().next().unwrap_or_default()),
            None => Err(Error::record_not_found("query returned no rows")),
        }
    }

    /// The first field of every row.
    pub fn query_value_list(&mut self, db: &Database, cmd: &Command) -> Result<Vec<CoreValue>> {
        Ok(self
            .query(db, cmd)?
            .map(|record| record.into_values().into_iter().next().unwrap_or_default())
            .collect())
    }

    pub fn query_record_list(&mut self, db: &Database, cmd: &Command) -> Result<Vec<DataRecord>> {
        self.query_list(db, cmd, &mut RecordListFactory)
    }

    pub fn query_bean_list<T: FromRecord>(&mut self, db: &Database, cmd: &Command) -> Result<Vec<T>> {
        self.query_list(db, cmd, &mut BeanListFactory::new())
    }

    /// Builds one list item per row with `factory`.
    pub fn query_list<T, F>(&mut self, db: &Database, cmd: &Command, factory: &mut F) -> Result<Vec<T>>
    where
        F: ListFactory<T>,
    {
        let reader = self.query(db, cmd)?;
        let mut items = Vec::with_capacity(reader.len());

        factory.prepare(reader.len());
        for (row, record) in reader.enumerate() {
            items.push(factory.new_item(row, &record)?);
        }
        factory.complete();

        Ok(items)
    }

    /// Reads the row of `table` with the primary key `key`.
    pub fn read_record(&mut self, db: &Database, table: RowSetId, key: &[CoreValue]) -> Result<Record> {
        db.check_database(table.db, "table")?;
        let rowset = db.rowset(table);
        let key_columns = rowset.primary_key_columns();

        if key_columns.is_empty() {
            return Err(Error::invalid_schema(format!(
                "table `{}` has no primary key",
                rowset.name
            )));
        }

        if key.len() != key_columns.len() {
            return Err(Error::invalid_argument(
                "key",
                format!(
                    "`{}` has {} key columns, got {} values",
                    rowset.name,
                    key_columns.len(),
                    key.len()
                ),
            ));
        }

        let mut cmd = self.command(db);
        cmd.select_all(rowset.column_refs())?;
        for (column, value) in key_columns.iter().zip(key) {
            cmd.where_(column.is(value.clone()))?;
        }

        let Some(row) = self.query(db, &cmd)?.next() else {
            return Err(Error::record_not_found(format!(
                "{} with key {key:?}",
                rowset.name
            )));
        };

        Record::from_row(rowset, row.into_values())
    }

    /// Inserts a new record or updates the modified fields of a stored one.
    /// Generated keys are read back after an insert.
    pub fn save_record(&mut self, db: &Database, record: &mut Record) -> Result<()> {
        match record.state() {
            RecordState::New => {
                let mut cmd = record.insert_command()?;
                cmd.set_auto_prepare(true);
                self.execute_insert(db, &cmd)?;

                let id = self.connection.last_insert_rowid();
                let generated: Vec<_> = record.generated_columns().collect();
                for column in generated {
                    record.set_generated_value(column, CoreValue::I64(id))?;
                }
            }
            RecordState::Modified => {
                let mut cmd = record.update_command()?;
                cmd.set_auto_prepare(true);
                if self.execute_update(db, &cmd)? == 0 {
                    return Err(Error::record_not_found(format!(
                        "{} with key {:?}",
                        db.rowset(record.rowset()).name,
                        record.key()
                    )));
                }
            }
            RecordState::Valid => {
                debug!(rowset = ?record.rowset(), "record is unchanged; nothing to save");
                return Ok(());
            }
        }

        record.mark_saved();
        Ok(())
    }

    pub fn delete_record(&mut self, db: &Database, record: &Record) -> Result<()> {
        let mut cmd = record.delete_command()?;
        cmd.set_auto_prepare(true);

        if self.execute_delete(db, record.rowset(), &cmd)? == 0 {
            return Err(Error::record_not_found(format!(
                "{} with key {:?}",
                db.rowset(record.rowset()).name,
                record.key()
            )));
        }

        Ok(())
    }

    /// Starts a transaction, or a savepoint inside the current one.
    pub fn begin(&mut self) -> Result<()> {
        let sql = self.transactions.start_sql();
        self.execute_transaction_sql(&sql)?;
        self.transactions.started();
        Ok(())
    }

    /// Commits the innermost level. On failure the level stays open unless
    /// SQLite has already left the transaction.
    pub fn commit(&mut self) -> Result<()> {
        let sql = self.transactions.commit_sql()?;
        self.execute_transaction_sql(&sql)?;
        self.transactions.ended();
        Ok(())
    }

    pub fn rollback(&mut self) -> Result<()> {
        let sql = self.transactions.rollback_sql()?;
        self.execute_transaction_sql(&sql)?;
        self.transactions.ended();
        Ok(())
    }

    fn execute_transaction_sql(&mut self, sql: &str) -> Result<()> {
        match self.execute_sql(sql, &[]) {
            Ok(_) => Ok(()),
            Err(err) => {
                if self.connection.is_autocommit() && self.transactions.depth() > 0 {
                    let depth = self.transactions.depth();
                    warn!(sql, depth, "transaction ended by the database");
                    self.transactions.reset();
                }
                Err(err)
            }
        }
    }

    pub fn in_transaction(&self) -> bool {
        self.transactions.depth() > 0
    }

    /// A command for `db` that binds values when the connection is
    /// configured for prepared statements.
    pub fn command(&self, db: &Database) -> Command {
        self.handler.create_command(db)
    }

    fn serializer<'a>(&'a self, db: &'a Database) -> Serializer<'a> {
        self.handler.serializer(db)
    }
}
