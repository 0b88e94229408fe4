mod command;
pub use command::Command;

mod combined;
pub use combined::{CombineKeyword, CombinedCommand, CommandExpr};

mod data_type;
pub use data_type::DataType;

mod error;
pub use error::{Error, IntoError};

pub mod expr;
pub use expr::{ColumnExpr, CompareExpr, Context, JoinExpr, JoinType, Operand, Phrase};

pub mod record;
pub use record::{
    BeanListFactory, DataRecord, Field, FromRecord, FromValue, ListFactory, Record, RecordData,
    RecordListFactory, RecordState,
};

pub mod schema;
pub use schema::{Column, ColumnDef, ColumnRef, Database, DatabaseId, RowSet, RowSetId};

mod value;
pub use value::Value;

mod value_chrono;

/// A Result type alias that uses Empire's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
