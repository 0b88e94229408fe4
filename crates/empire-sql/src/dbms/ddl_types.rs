/// Column type names and statement shapes used when generating DDL.
#[derive(Debug)]
pub struct DdlTypes {
    pub integer: &'static str,

    /// Integer generated by the database on insert
    pub auto_inc: &'static str,

    /// Variable length text, followed by `(size)`
    pub text: &'static str,

    /// Fixed length text, followed by `(size)`
    pub char: &'static str,

    pub date: &'static str,
    pub datetime: &'static str,
    pub bool: &'static str,
    pub double: &'static str,

    /// Fixed point number, followed by `(precision,scale)` when a
    /// precision is set
    pub decimal: &'static str,

    pub clob: &'static str,
    pub blob: &'static str,

    /// Placed between the table and column name when a column is changed.
    pub alter_column: &'static str,

    /// When set, a changed column is declared as `name<alter_type>TYPE`
    /// without default or nullability.
    pub alter_type: Option<&'static str>,

    /// Opens a `CREATE VIEW` statement.
    pub create_view: &'static str,

    /// The primary key clause carries the constraint name.
    pub named_primary_key: bool,

    /// Foreign keys are declared inside `CREATE TABLE` instead of by a
    /// separate `ALTER TABLE`.
    pub inline_foreign_keys: bool,

    /// Options following `CREATE SEQUENCE name`. Set when AUTOINC values
    /// come from a sequence created next to the table.
    pub sequence_options: Option<&'static str>,

    /// AUTOINC columns are declared with `DEFAULT nextval('sequence')`.
    pub sequence_default: bool,
}

impl DdlTypes {
    pub const DEFAULT: Self = Self {
        integer: "INTEGER",
        auto_inc: "INTEGER",
        text: "VARCHAR",
        char: "CHAR",
        date: "DATE",
        datetime: "DATETIME",
        bool: "BOOLEAN",
        double: "DOUBLE",
        decimal: "NUMBER",
        clob: "CLOB",
        blob: "BLOB",
        alter_column: " MODIFY ",
        alter_type: None,
        create_view: "CREATE OR REPLACE VIEW ",
        named_primary_key: true,
        inline_foreign_keys: false,
        sequence_options: None,
        sequence_default: false,
    };

    pub const DERBY: Self = Self {
        auto_inc: "INTEGER GENERATED BY DEFAULT AS IDENTITY",
        datetime: "TIMESTAMP",
        decimal: "DECIMAL",
        alter_column: " ALTER COLUMN ",
        create_view: "CREATE VIEW ",
        ..Self::DEFAULT
    };

    pub const HSQL: Self = Self {
        auto_inc: "INTEGER GENERATED BY DEFAULT AS IDENTITY",
        datetime: "TIMESTAMP",
        decimal: "DECIMAL",
        clob: "LONGVARCHAR",
        blob: "LONGVARBINARY",
        alter_column: " ALTER COLUMN ",
        ..Self::DEFAULT
    };

    pub const MSSQL: Self = Self {
        auto_inc: "INT IDENTITY(1, 1)",
        text: "NVARCHAR",
        char: "NCHAR",
        datetime: "DATETIME2",
        bool: "BIT",
        double: "FLOAT",
        decimal: "DECIMAL",
        clob: "NTEXT",
        blob: "IMAGE",
        alter_column: " ALTER COLUMN ",
        create_view: "CREATE VIEW ",
        ..Self::DEFAULT
    };

    pub const MSSQL_DATETIME: Self = Self {
        datetime: "DATETIME",
        ..Self::MSSQL
    };

    pub const MYSQL: Self = Self {
        auto_inc: "INT AUTO_INCREMENT",
        decimal: "DECIMAL",
        clob: "LONGTEXT",
        named_primary_key: false,
        ..Self::DEFAULT
    };

    pub const ORACLE: Self = Self {
        integer: "NUMBER",
        auto_inc: "NUMBER",
        text: "VARCHAR2",
        datetime: "DATE",
        bool: "NUMBER(1,0)",
        double: "FLOAT",
        sequence_options: Some(" INCREMENT BY 1 START WITH 1 MINVALUE 0 NOCYCLE NOCACHE NOORDER"),
        ..Self::DEFAULT
    };

    pub const ORACLE_BOOLEAN_AS_CHAR: Self = Self {
        bool: "CHAR(1)",
        ..Self::ORACLE
    };

    pub const POSTGRESQL: Self = Self {
        auto_inc: "SERIAL",
        datetime: "TIMESTAMP",
        double: "DOUBLE PRECISION",
        decimal: "DECIMAL",
        clob: "TEXT",
        blob: "BYTEA",
        alter_column: " ALTER COLUMN ",
        alter_type: Some(" TYPE "),
        ..Self::DEFAULT
    };

    pub const POSTGRESQL_NO_SERIAL: Self = Self {
        auto_inc: "INTEGER",
        sequence_options: Some(" INCREMENT BY 1 START WITH 1 MINVALUE 0"),
        sequence_default: true,
        ..Self::POSTGRESQL
    };

    pub const SQLITE: Self = Self {
        datetime: "DATETIME",
        double: "REAL",
        decimal: "DECIMAL",
        create_view: "CREATE VIEW ",
        inline_foreign_keys: true,
        ..Self::DEFAULT
    };
}
