use super::Error;

/// Error when an object is asked for something it is not set up to do.
///
/// A command without select expressions cannot render a SELECT, a view
/// without a command cannot render its DDL, and a record without key
/// values cannot be updated.
#[derive(Debug)]
pub(super) struct ObjectNotValid {
    pub(super) message: Box<str>,
}

impl std::error::Error for ObjectNotValid {}

impl core::fmt::Display for ObjectNotValid {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "object not valid: {}", self.message)
    }
}

impl Error {
    pub fn object_not_valid(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::ObjectNotValid(ObjectNotValid {
            message: message.into().into(),
        }))
    }

    pub fn is_object_not_valid(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::ObjectNotValid(_))
    }
}
