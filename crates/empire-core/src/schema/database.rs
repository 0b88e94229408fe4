use super::{Column, ColumnDef, ColumnRef, Index, IndexKind, Relation, RowSet, RowSetId, RowSetKind};
use crate::{Command, Error, Result};

use std::sync::atomic::{AtomicUsize, Ordering};

static NEXT_DATABASE_ID: AtomicUsize = AtomicUsize::new(1);

/// Owns all metadata of one database: tables, views and relations.
#[derive(Debug)]
pub struct Database {
    /// Uniquely identifies the database within the process
    pub id: DatabaseId,

    /// Schema qualifier prepended to object names.
    pub schema: Option<String>,

    /// Database link appended to object names.
    pub link: Option<String>,

    rowsets: Vec<RowSet>,

    relations: Vec<Relation>,

    table_count: usize,

    view_count: usize,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct DatabaseId(pub usize);

impl Database {
    pub fn new() -> Self {
        Self {
            id: DatabaseId(NEXT_DATABASE_ID.fetch_add(1, Ordering::Relaxed)),
            schema: None,
            link: None,
            rowsets: vec![],
            relations: vec![],
            table_count: 0,
            view_count: 0,
        }
    }

    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    pub fn add_table(&mut self, name: impl Into<String>) -> Result<RowSetId> {
        self.table_count += 1;
        let alias = format!("t{}", self.table_count);
        self.add_rowset(name.into(), alias, RowSetKind::Table)
    }

    pub fn add_view(&mut self, name: impl Into<String>) -> Result<RowSetId> {
        self.view_count += 1;
        let alias = format!("v{}", self.view_count);
        self.add_rowset(name.into(), alias, RowSetKind::View)
    }

    fn add_rowset(&mut self, name: String, alias: String, kind: RowSetKind) -> Result<RowSetId> {
        if name.is_empty() {
            return Err(Error::invalid_schema("rowset name must not be empty"));
        }

        if self.rowset_by_name(&name).is_some() {
            return Err(Error::invalid_schema(format!(
                "duplicate rowset name `{name}`"
            )));
        }

        let id = RowSetId {
            db: self.id,
            index: self.rowsets.len(),
        };

        self.rowsets.push(RowSet::new(id, name, alias, kind));
        Ok(id)
    }

    pub fn add_column(&mut self, rowset: RowSetId, def: ColumnDef) -> Result<ColumnRef> {
        self.check_database(rowset.db, "rowset")?;

        let rowset = &mut self.rowsets[rowset.index];

        if def.name.is_empty() {
            return Err(Error::invalid_schema(format!(
                "column name must not be empty on `{}`",
                rowset.name
            )));
        }

        if rowset.column_by_name(&def.name).is_some() {
            return Err(Error::invalid_schema(format!(
                "duplicate column `{}.{}`",
                rowset.name, def.name
            )));
        }

        let id = ColumnRef {
            rowset: rowset.id,
            index: rowset.columns.len(),
            data_type: def.data_type,
        };

        rowset.columns.push(Column::new(id, def));
        Ok(id)
    }

    /// Sets the primary key of a table. The key index is named
    /// `PK_<TABLE>`.
    pub fn set_primary_key(&mut self, table: RowSetId, columns: &[ColumnRef]) -> Result<()> {
        let name = format!("PK_{}", self.table(table)?.name);
        self.check_columns(table, columns)?;

        let rowset = &mut self.rowsets[table.index];
        rowset.indexes.retain(|index| !index.is_primary_key());
        rowset.indexes.insert(
            0,
            Index {
                name,
                kind: IndexKind::PrimaryKey,
                columns: columns.to_vec(),
            },
        );

        for column in columns {
            rowset.columns[column.index].required = true;
        }

        Ok(())
    }

    pub fn add_index(
        &mut self,
        table: RowSetId,
        name: impl Into<String>,
        unique: bool,
        columns: &[ColumnRef],
    ) -> Result<()> {
        let name = name.into();
        self.table(table)?;
        self.check_columns(table, columns)?;

        if self.index_by_name(&name).is_some() {
            return Err(Error::invalid_schema(format!(
                "duplicate index name `{name}`"
            )));
        }

        self.rowsets[table.index].indexes.push(Index {
            name,
            kind: if unique {
                IndexKind::Unique
            } else {
                IndexKind::Standard
            },
            columns: columns.to_vec(),
        });

        Ok(())
    }

    /// Adds a foreign key relation. Each pair is `(source, target)`.
    pub fn add_relation(
        &mut self,
        name: impl Into<String>,
        references: &[(ColumnRef, ColumnRef)],
    ) -> Result<&mut Relation> {
        let name = name.into();

        let Some(&(first_source, first_target)) = references.first() else {
            return Err(Error::invalid_argument(
                "references",
                "a relation needs at least one column pair",
            ));
        };

        for (source, target) in references {
            self.check_database(source.rowset.db, "relation source")?;
            self.check_database(target.rowset.db, "relation target")?;

            if source.rowset != first_source.rowset || target.rowset != first_target.rowset {
                return Err(Error::invalid_schema(format!(
                    "relation `{name}` must reference exactly one source and one target table"
                )));
            }
        }

        self.table(first_source.rowset)?;
        self.table(first_target.rowset)?;

        if self.relations.iter().any(|relation| relation.name == name) {
            return Err(Error::invalid_schema(format!(
                "duplicate relation name `{name}`"
            )));
        }

        self.relations.push(Relation {
            name,
            references: references.to_vec(),
            on_delete_cascade: false,
        });

        let index = self.relations.len() - 1;
        Ok(&mut self.relations[index])
    }

    pub fn set_view_command(&mut self, view: RowSetId, command: Command) -> Result<()> {
        self.check_database(view.db, "view")?;
        command.check_database(self.id)?;

        let rowset = &mut self.rowsets[view.index];
        if !rowset.is_view() {
            return Err(Error::invalid_argument(
                "view",
                format!("`{}` is not a view", rowset.name),
            ));
        }

        rowset.view_command = Some(command);
        Ok(())
    }

    pub fn rowset(&self, id: impl Into<RowSetId>) -> &RowSet {
        let id = id.into();
        debug_assert_eq!(id.db, self.id, "rowset belongs to another database");
        &self.rowsets[id.index]
    }

    pub fn rowset_by_name(&self, name: &str) -> Option<&RowSet> {
        self.rowsets
            .iter()
            .find(|rowset| rowset.name.eq_ignore_ascii_case(name))
    }

    pub fn rowsets(&self) -> impl ExactSizeIterator<Item = &RowSet> + '_ {
        self.rowsets.iter()
    }

    pub fn tables(&self) -> impl Iterator<Item = &RowSet> + '_ {
        self.rowsets.iter().filter(|rowset| rowset.is_table())
    }

    pub fn views(&self) -> impl Iterator<Item = &RowSet> + '_ {
        self.rowsets.iter().filter(|rowset| rowset.is_view())
    }

    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    pub fn column(&self, id: ColumnRef) -> &Column {
        self.rowset(id.rowset).column(id)
    }

    /// Looks up a column by rowset and column name.
    pub fn column_by_name(&self, rowset: &str, column: &str) -> Option<&Column> {
        self.rowset_by_name(rowset)?.column_by_name(column)
    }

    pub fn index_by_name(&self, name: &str) -> Option<&Index> {
        self.rowsets
            .iter()
            .flat_map(|rowset| rowset.indexes.iter())
            .find(|index| index.name.eq_ignore_ascii_case(name))
    }

    /// Fails with a database mismatch when `id` is not this database.
    pub fn check_database(&self, id: DatabaseId, object: &str) -> Result<()> {
        if id == self.id {
            Ok(())
        } else {
            Err(Error::database_mismatch(object))
        }
    }

    fn table(&self, id: RowSetId) -> Result<&RowSet> {
        self.check_database(id.db, "table")?;
        let rowset = &self.rowsets[id.index];

        if !rowset.is_table() {
            return Err(Error::invalid_argument(
                "table",
                format!("`{}` is not a table", rowset.name),
            ));
        }

        Ok(rowset)
    }

    fn check_columns(&self, table: RowSetId, columns: &[ColumnRef]) -> Result<()> {
        if columns.is_empty() {
            return Err(Error::invalid_argument("columns", "no columns given"));
        }

        for column in columns {
            if column.rowset != table {
                return Err(Error::invalid_schema(format!(
                    "column `{}` does not belong to table `{}`",
                    self.column_name(*column),
                    self.rowsets[table.index].name
                )));
            }
        }

        Ok(())
    }

    /// Qualified `ROWSET.COLUMN` name, used in messages.
    pub fn column_name(&self, column: ColumnRef) -> String {
        if column.rowset.db != self.id {
            return format!("{column:?}");
        }
        let rowset = &self.rowsets[column.rowset.index];
        format!("{}.{}", rowset.name, rowset.columns[column.index].name)
    }
}

impl Default for Database {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DataType;
    use pretty_assertions::assert_eq;

    #[test]
    fn aliases_are_numbered_per_database() {
        let mut db = Database::new();
        let t1 = db.add_table("DEPARTMENTS").unwrap();
        let t2 = db.add_table("EMPLOYEES").unwrap();
        let v1 = db.add_view("EMPLOYEE_INFO").unwrap();

        assert_eq!(db.rowset(t1).alias, "t1");
        assert_eq!(db.rowset(t2).alias, "t2");
        assert_eq!(db.rowset(v1).alias, "v1");

        let mut other = Database::new();
        let t = other.add_table("DEPARTMENTS").unwrap();
        assert_eq!(other.rowset(t).alias, "t1");
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut db = Database::new();
        let t = db.add_table("EMPLOYEES").unwrap();
        assert!(db.add_table("employees").unwrap_err().is_invalid_schema());

        db.add_column(t, ColumnDef::new("ID", DataType::AutoInc))
            .unwrap();
        let err = db
            .add_column(t, ColumnDef::new("ID", DataType::Integer))
            .unwrap_err();
        assert_eq!(err.to_string(), "invalid schema: duplicate column `EMPLOYEES.ID`");
    }

    #[test]
    fn primary_key_index() {
        let mut db = Database::new();
        let t = db.add_table("EMPLOYEES").unwrap();
        let id = db
            .add_column(t, ColumnDef::new("ID", DataType::AutoInc))
            .unwrap();
        db.set_primary_key(t, &[id]).unwrap();

        let pk = db.rowset(t).primary_key().unwrap();
        assert_eq!(pk.name, "PK_EMPLOYEES");
        assert_eq!(pk.columns, vec![id]);
        assert!(db.column(id).required);
        assert!(db.column(id).read_only);
    }

    #[test]
    fn relation_requires_one_source_and_target_table() {
        let mut db = Database::new();
        let a = db.add_table("A").unwrap();
        let b = db.add_table("B").unwrap();
        let c = db.add_table("C").unwrap();
        let a_id = db.add_column(a, ColumnDef::new("ID", DataType::Integer)).unwrap();
        let b_a = db.add_column(b, ColumnDef::new("A_ID", DataType::Integer)).unwrap();
        let c_a = db.add_column(c, ColumnDef::new("A_ID", DataType::Integer)).unwrap();

        db.add_relation("FK_B_A", &[(b_a, a_id)]).unwrap();
        assert!(db
            .add_relation("FK_BAD", &[(b_a, a_id), (c_a, a_id)])
            .unwrap_err()
            .is_invalid_schema());
    }

    #[test]
    fn foreign_rowset_is_a_mismatch() {
        let mut db = Database::new();
        let mut other = Database::new();
        let t = other.add_table("T").unwrap();

        let err = db
            .add_column(t, ColumnDef::new("X", DataType::Text))
            .unwrap_err();
        assert!(err.is_database_mismatch());
    }
}
