use super::{Formatter, Params, ToSql};

use empire_core::{expr::Context, ColumnRef, Result, RowSetId};

/// An object name, quoted when the dialect requires it.
pub(super) struct Ident<S>(pub(super) S);

impl<S: AsRef<str>> ToSql for Ident<S> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) -> Result<()> {
        f.serializer
            .handler
            .append_object_name(f.dst, self.0.as_ref());
        Ok(())
    }
}

/// The qualified name of a table or view.
pub(super) struct RowSetName {
    pub(super) id: RowSetId,

    /// Followed by the rowset alias
    pub(super) alias: bool,
}

impl RowSetName {
    pub(super) fn plain(id: RowSetId) -> RowSetName {
        RowSetName { id, alias: false }
    }

    pub(super) fn aliased(id: RowSetId) -> RowSetName {
        RowSetName { id, alias: true }
    }
}

impl ToSql for RowSetName {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) -> Result<()> {
        let serializer = f.serializer;
        serializer
            .handler
            .append_rowset_name(f.dst, serializer.db, self.id, self.alias);
        Ok(())
    }
}

/// A column name, prefixed by its rowset alias in a `FULLNAME` context.
pub(super) struct ColumnName(pub(super) ColumnRef, pub(super) Context);

impl ToSql for ColumnName {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) -> Result<()> {
        let ColumnName(column, cx) = self;
        let db = f.serializer.db;

        if cx.contains(Context::FULLNAME) {
            let alias = &db.rowset(column.rowset).alias;
            fmt!(f, alias.as_str() ".");
        }

        fmt!(f, Ident(&db.column(column).name));
        Ok(())
    }
}
