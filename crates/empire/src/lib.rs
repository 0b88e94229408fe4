pub mod db;
pub use db::Connect;

pub use empire_core::{
    expr, record, schema, ColumnDef, ColumnExpr, ColumnRef, Command, CombinedCommand,
    CompareExpr, DataRecord, DataType, Database, Error, FromRecord, Record, RecordData,
    RecordState, Result, RowSetId, Value,
};

/// SQL rendering: dialect handlers, the serializer and DDL generation.
pub mod sql {
    pub use empire_sql::{
        DdlAction, DdlGenerator, DdlObject, DdlTypes, Dbms, Feature, Features, Handler,
        HandlerConfig, Params, Placeholder, Serializer, SqlScript,
    };
}

#[cfg(feature = "sqlite")]
pub use empire_driver_sqlite as sqlite;
