use super::Error;

/// Error when an expression is added to a command, or a relation is
/// defined, across two different databases.
#[derive(Debug)]
pub(super) struct DatabaseMismatch {
    pub(super) object: Box<str>,
}

impl std::error::Error for DatabaseMismatch {}

impl core::fmt::Display for DatabaseMismatch {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "database mismatch: {} belongs to another database",
            self.object
        )
    }
}

impl Error {
    /// Creates a database mismatch error for the named object.
    pub fn database_mismatch(object: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::DatabaseMismatch(DatabaseMismatch {
            object: object.into().into(),
        }))
    }

    /// Returns `true` if this error is a database mismatch.
    pub fn is_database_mismatch(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::DatabaseMismatch(_))
    }
}
