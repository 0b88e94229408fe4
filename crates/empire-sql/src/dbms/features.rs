/// An optional capability of a database system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    /// `CREATE SCHEMA` is available.
    CreateSchema,

    /// The database has sequences.
    Sequences,

    /// Sequence values can be read with a `nextval` expression.
    SequenceNextval,

    /// Queries can limit the number of returned rows.
    QueryLimitRows,

    /// Queries can skip leading rows.
    QuerySkipRows,
}

#[derive(Debug)]
pub struct Features {
    pub create_schema: bool,
    pub sequences: bool,
    pub sequence_nextval: bool,
    pub query_limit_rows: bool,
    pub query_skip_rows: bool,
}

impl Features {
    pub const DERBY: Self = Self {
        create_schema: true,
        sequences: false,
        sequence_nextval: false,
        query_limit_rows: false,
        query_skip_rows: false,
    };

    pub const HSQL: Self = Self {
        create_schema: false,
        sequences: true,
        sequence_nextval: false,
        query_limit_rows: true,
        query_skip_rows: true,
    };

    pub const MSSQL: Self = Self {
        create_schema: true,
        sequences: false,
        sequence_nextval: false,
        query_limit_rows: true,
        query_skip_rows: true,
    };

    pub const MYSQL: Self = Self {
        create_schema: true,
        ..Self::MSSQL
    };

    pub const ORACLE: Self = Self {
        create_schema: false,
        sequences: true,
        sequence_nextval: true,
        query_limit_rows: true,
        query_skip_rows: true,
    };

    pub const POSTGRESQL: Self = Self {
        create_schema: true,
        ..Self::ORACLE
    };

    pub const SQLITE: Self = Self {
        create_schema: false,
        sequences: false,
        sequence_nextval: false,
        query_limit_rows: true,
        query_skip_rows: true,
    };

    pub fn is_supported(&self, feature: Feature) -> bool {
        match feature {
            Feature::CreateSchema => self.create_schema,
            Feature::Sequences => self.sequences,
            Feature::SequenceNextval => self.sequence_nextval,
            Feature::QueryLimitRows => self.query_limit_rows,
            Feature::QuerySkipRows => self.query_skip_rows,
        }
    }
}
