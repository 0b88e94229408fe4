use super::Error;

/// Error when a lookup by primary key, or a query expected to return a
/// row, returns nothing.
#[derive(Debug)]
pub(super) struct RecordNotFoundError {
    pub(super) lookup: Box<str>,
}

impl std::error::Error for RecordNotFoundError {}

impl core::fmt::Display for RecordNotFoundError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "record not found: {}", self.lookup)
    }
}

impl Error {
    /// Creates a record not found error. `lookup` names the rowset and key.
    pub fn record_not_found(lookup: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::RecordNotFound(RecordNotFoundError {
            lookup: lookup.into().into(),
        }))
    }

    /// Returns `true` if this error is a record not found error.
    pub fn is_record_not_found(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::RecordNotFound(_))
    }
}
