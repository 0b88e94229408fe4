use super::{DdlAction, DdlObject, SqlScript};
use crate::{serializer, Feature, Handler};

use empire_core::{
    schema::{Column, Relation, RowSet, RowSetId},
    ColumnRef, DataType, Database, Error, Result,
};
use tracing::{debug, warn};

/// Generates the DDL statements that create, change and drop the objects of
/// a database.
#[derive(Debug, Clone, Copy)]
pub struct DdlGenerator<'a> {
    handler: &'a Handler,
    db: &'a Database,
}

impl<'a> DdlGenerator<'a> {
    pub fn new(handler: &'a Handler, db: &'a Database) -> DdlGenerator<'a> {
        DdlGenerator { handler, db }
    }

    /// Appends the statements performing `action` on `object` to `script`.
    pub fn script(&self, action: DdlAction, object: DdlObject<'_>, script: &mut SqlScript) -> Result<()> {
        match (action, object) {
            (DdlAction::Create, DdlObject::Database) => self.create_database(script),
            (DdlAction::Drop, DdlObject::Database) => self.drop_database(script),
            (DdlAction::Create, DdlObject::Table(table)) => self.create_table(table, script),
            (DdlAction::Drop, DdlObject::Table(table)) => self.drop_table(table, script),
            (DdlAction::Create, DdlObject::View(view)) => self.create_view(view, script),
            (DdlAction::Drop, DdlObject::View(view)) => self.drop_view(view, script),
            (DdlAction::Create, DdlObject::Relation(name)) => {
                self.create_relation(self.relation(name)?, script)
            }
            (DdlAction::Drop, DdlObject::Relation(name)) => {
                self.drop_relation(self.relation(name)?, script)
            }
            (action, DdlObject::Column(column)) => self.alter_column(column, action, script),
            (DdlAction::Alter, object) => Err(Error::unsupported_feature(format!(
                "cannot alter {object:?}; only columns can be altered"
            ))),
        }
    }

    /// All tables, then all relations, then all views. Views without a
    /// command are skipped.
    pub fn create_database(&self, script: &mut SqlScript) -> Result<()> {
        for table in self.db.tables() {
            self.create_table(table.id, script)?;
        }

        for relation in self.db.relations() {
            self.create_relation(relation, script)?;
        }

        for view in self.db.views() {
            if view.view_command.is_none() {
                warn!(view = %view.name, "view has no command and is not created");
                continue;
            }
            self.create_view(view.id, script)?;
        }

        Ok(())
    }

    /// Drops everything [`create_database`](Self::create_database) creates,
    /// in reverse order.
    pub fn drop_database(&self, script: &mut SqlScript) -> Result<()> {
        for view in self.db.views().filter(|view| view.view_command.is_some()) {
            self.drop_view(view.id, script)?;
        }

        for relation in self.db.relations().iter().rev() {
            self.drop_relation(relation, script)?;
        }

        let tables: Vec<_> = self.db.tables().map(|table| table.id).collect();
        for table in tables.into_iter().rev() {
            self.drop_table(table, script)?;
        }

        Ok(())
    }

    /// Creates the table with its indexes. Sequences feeding AUTOINC
    /// columns are created in front of it.
    pub fn create_table(&self, table: RowSetId, script: &mut SqlScript) -> Result<()> {
        let table = self.table(table)?;
        let ddl = self.handler.ddl_types();

        if let Some(options) = self.sequence_options() {
            for column in self.sequence_columns(table) {
                self.create_sequence(column, options, script)?;
            }
        }

        let mut sql = format!("-- creating table {} --\r\nCREATE TABLE ", table.name);
        self.rowset_name(&mut sql, table.id);
        sql.push_str(" (");

        let mut sep = "\r\n   ";
        for column in &table.columns {
            if column.data_type == DataType::Unknown {
                continue;
            }

            sql.push_str(sep);
            self.column_desc(&mut sql, column)?;
            sep = ",\r\n   ";
        }

        if ddl.inline_foreign_keys {
            for relation in self.relations_of(table.id) {
                sql.push_str(sep);
                sql.push_str("FOREIGN KEY (");
                self.column_names(&mut sql, relation.source_columns());
                sql.push_str(") REFERENCES ");
                self.rowset_name(&mut sql, relation.target_table());
                sql.push_str(" (");
                self.column_names(&mut sql, relation.target_columns());
                sql.push(')');
                if relation.on_delete_cascade {
                    sql.push_str(" ON DELETE CASCADE");
                }
                sep = ",\r\n   ";
            }
        }

        if let Some(pk) = table.primary_key() {
            sql.push_str(",\r\n");
            if ddl.named_primary_key {
                sql.push_str(" CONSTRAINT ");
                self.handler.append_object_name(&mut sql, &pk.name);
            }
            sql.push_str(" PRIMARY KEY (");
            self.column_names(&mut sql, pk.columns.iter().copied());
            sql.push(')');
        }

        sql.push(')');

        debug!(table = %table.name, "adding create statement for table");
        script.add_stmt(sql);

        for index in table.indexes.iter().filter(|index| !index.is_primary_key()) {
            let mut sql = String::from(if index.is_unique() {
                "CREATE UNIQUE INDEX "
            } else {
                "CREATE INDEX "
            });
            self.handler.append_object_name(&mut sql, &index.name);
            sql.push_str(" ON ");
            self.rowset_name(&mut sql, table.id);
            sql.push_str(" (");
            self.column_names(&mut sql, index.columns.iter().copied());
            sql.push(')');

            debug!(index = %index.name, "adding create statement for index");
            script.add_stmt(sql);
        }

        Ok(())
    }

    /// A foreign key constraint. Dialects declaring foreign keys inside
    /// CREATE TABLE add nothing.
    pub fn create_relation(&self, relation: &Relation, script: &mut SqlScript) -> Result<()> {
        if self.handler.ddl_types().inline_foreign_keys {
            return Ok(());
        }

        let mut sql = format!(
            "-- creating foreign key constraint {} --\r\nALTER TABLE ",
            relation.name
        );
        self.rowset_name(&mut sql, relation.source_table());
        sql.push_str(" ADD CONSTRAINT ");
        self.handler.append_object_name(&mut sql, &relation.name);
        sql.push_str(" FOREIGN KEY (");
        self.column_names(&mut sql, relation.source_columns());
        sql.push_str(") REFERENCES ");
        self.rowset_name(&mut sql, relation.target_table());
        sql.push_str(" (");
        self.column_names(&mut sql, relation.target_columns());
        sql.push(')');

        if relation.on_delete_cascade {
            sql.push_str(" ON DELETE CASCADE");
        }

        debug!(relation = %relation.name, "adding create statement for relation");
        script.add_stmt(sql);
        Ok(())
    }

    pub fn create_view(&self, view: RowSetId, script: &mut SqlScript) -> Result<()> {
        self.db.check_database(view.db, "view")?;
        let view = self.db.rowset(view);

        if !view.is_view() {
            return Err(Error::invalid_argument(
                "view",
                format!("`{}` is not a view", view.name),
            ));
        }

        let Some(cmd) = &view.view_command else {
            return Err(Error::object_not_valid(format!(
                "no command has been supplied for view {}",
                view.name
            )));
        };

        let mut sql = String::from(self.handler.ddl_types().create_view);
        self.rowset_name(&mut sql, view.id);
        sql.push_str(" (");
        self.column_names(&mut sql, view.column_refs());
        sql.push_str(")\r\nAS\r\n");
        sql.push_str(&serializer::view_select(self.handler, self.db, cmd)?);

        debug!(view = %view.name, "adding create statement for view");
        script.add_stmt(sql);
        Ok(())
    }

    pub fn drop_table(&self, table: RowSetId, script: &mut SqlScript) -> Result<()> {
        let table = self.table(table)?;
        self.drop_object("TABLE", table.id, script);

        if self.sequence_options().is_some() {
            for column in self.sequence_columns(table) {
                let mut sql = String::from("DROP SEQUENCE ");
                self.sequence_name(&mut sql, column)?;
                script.add_stmt(sql);
            }
        }

        Ok(())
    }

    pub fn drop_view(&self, view: RowSetId, script: &mut SqlScript) -> Result<()> {
        self.db.check_database(view.db, "view")?;
        self.drop_object("VIEW", view, script);
        Ok(())
    }

    pub fn drop_relation(&self, relation: &Relation, script: &mut SqlScript) -> Result<()> {
        if self.handler.ddl_types().inline_foreign_keys {
            return Ok(());
        }

        let mut sql = String::from("ALTER TABLE ");
        self.rowset_name(&mut sql, relation.source_table());
        sql.push_str(" DROP CONSTRAINT ");
        self.handler.append_object_name(&mut sql, &relation.name);

        script.add_stmt(sql);
        Ok(())
    }

    /// Adds, changes or drops a single table column.
    pub fn alter_column(&self, column: ColumnRef, action: DdlAction, script: &mut SqlScript) -> Result<()> {
        let table = self.table(column.rowset)?;
        let column = table.column(column);
        let ddl = self.handler.ddl_types();

        let mut sql = String::from("ALTER TABLE ");
        self.rowset_name(&mut sql, table.id);

        match action {
            DdlAction::Create => {
                sql.push_str(" ADD ");
                self.column_desc(&mut sql, column)?;
            }
            DdlAction::Alter => {
                sql.push_str(ddl.alter_column);
                match ddl.alter_type {
                    Some(alter_type) => {
                        self.handler.append_object_name(&mut sql, &column.name);
                        sql.push_str(alter_type);
                        self.column_type(&mut sql, column)?;
                    }
                    None => self.column_desc(&mut sql, column)?,
                }
            }
            DdlAction::Drop => {
                sql.push_str(" DROP COLUMN ");
                self.handler.append_object_name(&mut sql, &column.name);
            }
        }

        debug!(column = %self.db.column_name(column.id), ?action, "adding alter statement for column");
        script.add_stmt(sql);
        Ok(())
    }

    fn create_sequence(&self, column: &Column, options: &str, script: &mut SqlScript) -> Result<()> {
        let mut sql = format!(
            "-- creating sequence for column {} --\r\nCREATE SEQUENCE ",
            self.db.column_name(column.id)
        );
        self.sequence_name(&mut sql, column)?;
        sql.push_str(options);

        debug!(column = %self.db.column_name(column.id), "adding create statement for sequence");
        script.add_stmt(sql);
        Ok(())
    }

    /// `None` unless AUTOINC columns of this dialect are fed by sequences.
    fn sequence_options(&self) -> Option<&'static str> {
        self.handler
            .ddl_types()
            .sequence_options
            .filter(|_| self.handler.is_supported(Feature::Sequences))
    }

    fn sequence_columns(&self, table: &'a RowSet) -> impl Iterator<Item = &'a Column> + 'a {
        table
            .columns
            .iter()
            .filter(|column| column.data_type == DataType::AutoInc)
    }

    fn sequence_name(&self, dst: &mut String, column: &Column) -> Result<()> {
        let name = self.handler.column_sequence_name(self.db, column)?;

        if let Some(schema) = &self.db.schema {
            self.handler.append_object_name(dst, schema);
            dst.push('.');
        }
        self.handler.append_object_name(dst, &name);
        Ok(())
    }

    fn drop_object(&self, kind: &str, rowset: RowSetId, script: &mut SqlScript) {
        let mut sql = format!("DROP {kind} ");
        self.rowset_name(&mut sql, rowset);
        script.add_stmt(sql);
    }

    fn table(&self, table: RowSetId) -> Result<&'a RowSet> {
        self.db.check_database(table.db, "table")?;
        let rowset = self.db.rowset(table);

        if !rowset.is_table() {
            return Err(Error::invalid_argument(
                "table",
                format!("`{}` is not a table", rowset.name),
            ));
        }

        Ok(rowset)
    }

    fn relation(&self, name: &str) -> Result<&'a Relation> {
        self.db
            .relations()
            .iter()
            .find(|relation| relation.name == name)
            .ok_or_else(|| {
                Error::invalid_argument("relation", format!("no relation named `{name}`"))
            })
    }

    fn relations_of(&self, table: RowSetId) -> impl Iterator<Item = &'a Relation> + 'a {
        self.db
            .relations()
            .iter()
            .filter(move |relation| relation.source_table() == table)
    }

    fn rowset_name(&self, dst: &mut String, rowset: RowSetId) {
        self.handler.append_rowset_name(dst, self.db, rowset, false);
    }

    fn column_names(&self, dst: &mut String, columns: impl Iterator<Item = ColumnRef>) {
        let mut sep = "";
        for column in columns {
            dst.push_str(sep);
            self.handler
                .append_object_name(dst, &self.db.column(column).name);
            sep = ", ";
        }
    }

    /// `NAME TYPE[ DEFAULT value][ NOT NULL]`
    fn column_desc(&self, dst: &mut String, column: &Column) -> Result<()> {
        self.handler.append_object_name(dst, &column.name);
        dst.push(' ');
        self.column_type(dst, column)?;

        if let Some(default) = column.default.as_ref().filter(|_| !column.auto_generated) {
            dst.push_str(" DEFAULT ");
            dst.push_str(&self.handler.value_string(default, column.data_type)?);
        }

        if column.data_type == DataType::AutoInc
            && self.handler.ddl_types().sequence_default
            && self.sequence_options().is_some()
        {
            dst.push_str(" DEFAULT nextval('");
            self.sequence_name(dst, column)?;
            dst.push_str("')");
        }

        if column.required || column.auto_generated {
            dst.push_str(" NOT NULL");
        }

        Ok(())
    }

    fn column_type(&self, dst: &mut String, column: &Column) -> Result<()> {
        let ddl = self.handler.ddl_types();

        match column.data_type {
            DataType::Integer => dst.push_str(ddl.integer),
            DataType::AutoInc => dst.push_str(ddl.auto_inc),
            DataType::Text => {
                let size = if column.size == 0 { 100 } else { column.size };
                dst.push_str(&format!("{}({size})", ddl.text));
            }
            DataType::Char => {
                let size = if column.size == 0 { 1 } else { column.size };
                dst.push_str(&format!("{}({size})", ddl.char));
            }
            DataType::Date => dst.push_str(ddl.date),
            DataType::DateTime => dst.push_str(ddl.datetime),
            DataType::Bool => dst.push_str(ddl.bool),
            DataType::Double => dst.push_str(ddl.double),
            DataType::Decimal if column.size > 0 => {
                dst.push_str(&format!("{}({},{})", ddl.decimal, column.size, column.scale));
            }
            DataType::Decimal => dst.push_str(ddl.decimal),
            DataType::Clob => dst.push_str(ddl.clob),
            DataType::Blob => dst.push_str(ddl.blob),
            DataType::Unknown => {
                return Err(Error::unsupported_feature(format!(
                    "column {} of type UNKNOWN has no DDL type",
                    column.name
                )))
            }
        }

        Ok(())
    }
}
