mod column;
pub use column::{Column, ColumnDef, ColumnRef};

mod database;
pub use database::{Database, DatabaseId};

mod index;
pub use index::{Index, IndexKind};

mod relation;
pub use relation::Relation;

mod rowset;
pub use rowset::{RowSet, RowSetId, RowSetKind};
