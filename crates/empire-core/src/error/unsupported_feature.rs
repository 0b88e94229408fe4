use super::Error;

/// Error when the selected dialect cannot express an operation.
///
/// Examples:
/// - Skipping rows on SQL Server without an ORDER BY clause
/// - Row limits on Derby
/// - BLOB values rendered as SQL literals
/// - DDL for a column of unknown data type
#[derive(Debug)]
pub(super) struct UnsupportedFeature {
    pub(super) message: Box<str>,
}

impl std::error::Error for UnsupportedFeature {}

impl core::fmt::Display for UnsupportedFeature {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "unsupported feature: {}", self.message)
    }
}

impl Error {
    /// Creates an unsupported feature error.
    pub fn unsupported_feature(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnsupportedFeature(UnsupportedFeature {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an unsupported feature error.
    pub fn is_unsupported_feature(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::UnsupportedFeature(_))
    }
}
