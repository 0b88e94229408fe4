use serde::{Deserialize, Serialize};

/// Settings that change how a dialect renders SQL.
///
/// Each [`Handler`](super::Handler) owns its configuration; there is no
/// process-wide state.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct HandlerConfig {
    /// Quote object names that are reserved words or contain special
    /// characters.
    pub quote_reserved_names: bool,

    /// Oracle: store booleans as `CHAR(1)` holding `Y` / `N` instead of
    /// `NUMBER(1,0)`.
    pub oracle_boolean_as_char: bool,

    /// SQL Server: use `DATETIME2` for timestamps.
    pub mssql_use_datetime2: bool,

    /// PostgreSQL: declare AUTOINC columns as `SERIAL`.
    pub postgres_serial_type: bool,

    /// Commands created by the handler send literal values as statement
    /// parameters.
    pub prepared_statements: bool,

    /// Additional names that must be quoted.
    pub extra_keywords: Vec<String>,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            quote_reserved_names: true,
            oracle_boolean_as_char: false,
            mssql_use_datetime2: true,
            postgres_serial_type: true,
            prepared_statements: false,
            extra_keywords: vec![],
        }
    }
}
