use super::Error;

/// Error when database metadata is inconsistent.
///
/// This occurs when:
/// - A table, view or column name is defined twice
/// - A lookup names a rowset or column that does not exist
/// - A relation spans more than two tables
/// - A key operation is requested on a table without a primary key
#[derive(Debug)]
pub(super) struct InvalidSchema {
    pub(super) message: Box<str>,
}

impl std::error::Error for InvalidSchema {}

impl core::fmt::Display for InvalidSchema {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid schema: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid schema error.
    pub fn invalid_schema(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidSchema(InvalidSchema {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid schema error.
    pub fn is_invalid_schema(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidSchema(_))
    }
}
