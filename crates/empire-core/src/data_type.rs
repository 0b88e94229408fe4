/// Logical column type.
///
/// Every dialect maps each variant to exactly one SQL type in its DDL
/// table. `Unknown` has no DDL mapping; columns of that type are skipped
/// when a table is created.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    #[default]
    Unknown,

    /// Integer number
    Integer,

    /// Integer generated by the database on insert
    AutoInc,

    /// Variable length text
    Text,

    /// Calendar date without time
    Date,

    /// Date and time
    DateTime,

    /// Fixed length text
    Char,

    /// Floating point number
    Double,

    /// Fixed point number with precision and scale
    Decimal,

    Bool,

    /// Character large object
    Clob,

    /// Binary large object
    Blob,
}

impl DataType {
    pub fn is_text(self) -> bool {
        matches!(self, Self::Text | Self::Char | Self::Clob)
    }

    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            Self::Integer | Self::AutoInc | Self::Double | Self::Decimal
        )
    }

    pub fn is_date(self) -> bool {
        matches!(self, Self::Date | Self::DateTime)
    }

    pub fn is_boolean(self) -> bool {
        matches!(self, Self::Bool)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Unknown => "UNKNOWN",
            Self::Integer => "INTEGER",
            Self::AutoInc => "AUTOINC",
            Self::Text => "TEXT",
            Self::Date => "DATE",
            Self::DateTime => "DATETIME",
            Self::Char => "CHAR",
            Self::Double => "DOUBLE",
            Self::Decimal => "DECIMAL",
            Self::Bool => "BOOL",
            Self::Clob => "CLOB",
            Self::Blob => "BLOB",
        }
    }
}

impl core::fmt::Display for DataType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}
