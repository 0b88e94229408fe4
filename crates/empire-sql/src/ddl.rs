mod generator;
pub use generator::DdlGenerator;

mod script;
pub use script::SqlScript;

use empire_core::{schema::RowSetId, ColumnRef};

/// What a DDL script does to an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DdlAction {
    Create,
    Alter,
    Drop,
}

/// The schema object a DDL script is generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DdlObject<'a> {
    /// Every table, relation and view of the database
    Database,
    Table(RowSetId),
    View(RowSetId),

    /// A relation, by constraint name
    Relation(&'a str),
    Column(ColumnRef),
}
