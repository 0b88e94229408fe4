use super::Error;

/// Error when a connection URL cannot be parsed or names a scheme no
/// dialect is registered for.
///
/// Recognized schemes are `sqlite`, `postgresql`/`postgres`, `mysql`,
/// `mssql`/`sqlserver`, `oracle`, `hsqldb`/`hsql` and `derby`.
#[derive(Debug)]
pub(super) struct InvalidConnectionUrl {
    pub(super) reason: Box<str>,
}

impl std::error::Error for InvalidConnectionUrl {}

impl core::fmt::Display for InvalidConnectionUrl {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid connection URL: {}", self.reason)
    }
}

impl Error {
    /// Creates an invalid connection URL error. `reason` should include the
    /// offending URL.
    pub fn invalid_connection_url(reason: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidConnectionUrl(
            InvalidConnectionUrl {
                reason: reason.into().into(),
            },
        ))
    }

    /// Returns `true` if this error is an invalid connection URL error.
    pub fn is_invalid_connection_url(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidConnectionUrl(_))
    }
}
