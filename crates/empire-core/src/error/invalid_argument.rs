use super::Error;

/// Error when a builder or accessor receives an argument it cannot use.
///
/// Examples are a read-only column passed to `Record::set_value`, a field
/// index out of range, or a non-numeric literal for an INTEGER column.
#[derive(Debug)]
pub(super) struct InvalidArgument {
    pub(super) name: Box<str>,
    pub(super) message: Box<str>,
}

impl std::error::Error for InvalidArgument {}

impl core::fmt::Display for InvalidArgument {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid argument `{}`: {}", self.name, self.message)
    }
}

impl Error {
    /// Creates an invalid argument error.
    pub fn invalid_argument(name: impl Into<String>, message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidArgument(InvalidArgument {
            name: name.into().into(),
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid argument error.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidArgument(_))
    }
}
