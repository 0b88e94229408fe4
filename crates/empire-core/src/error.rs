mod adhoc;
mod database_mismatch;
mod driver_operation_failed;
mod invalid_argument;
mod invalid_connection_url;
mod invalid_schema;
mod object_not_valid;
mod record_not_found;
mod type_conversion;
mod unsupported_feature;

use adhoc::AdhocError;
use database_mismatch::DatabaseMismatch;
use driver_operation_failed::DriverOperationFailed;
use invalid_argument::InvalidArgument;
use invalid_connection_url::InvalidConnectionUrl;
use invalid_schema::InvalidSchema;
use object_not_valid::ObjectNotValid;
use record_not_found::RecordNotFoundError;
use std::sync::Arc;
use type_conversion::TypeConversionError;
use unsupported_feature::UnsupportedFeature;

/// Builds an ad-hoc error from a format string, typically as context for
/// [`Error::context`].
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        $crate::Error::from_args(format_args!($($arg)*))
    };
}

/// An error raised while building, rendering or executing a command.
///
/// The error is a single pointer wide. Causes are chained with
/// [`Error::context`] and displayed outermost first, joined by `": "`.
#[derive(Clone)]
pub struct Error {
    inner: Option<Arc<ErrorInner>>,
}

struct ErrorInner {
    kind: ErrorKind,
    cause: Option<Error>,
}

macro_rules! error_kinds {
    ($( $variant:ident($ty:ty), )*) => {
        enum ErrorKind {
            $( $variant($ty), )*
            Unknown,
        }

        impl ErrorKind {
            fn name(&self) -> &'static str {
                match self {
                    $( ErrorKind::$variant(_) => stringify!($variant), )*
                    ErrorKind::Unknown => "Unknown",
                }
            }
        }

        impl core::fmt::Display for ErrorKind {
            fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
                match self {
                    $( ErrorKind::$variant(err) => core::fmt::Display::fmt(err, f), )*
                    ErrorKind::Unknown => f.write_str("unknown empire error"),
                }
            }
        }
    };
}

error_kinds! {
    Adhoc(AdhocError),
    Anyhow(anyhow::Error),
    DatabaseMismatch(DatabaseMismatch),
    DriverOperationFailed(DriverOperationFailed),
    InvalidArgument(InvalidArgument),
    InvalidConnectionUrl(InvalidConnectionUrl),
    InvalidSchema(InvalidSchema),
    ObjectNotValid(ObjectNotValid),
    RecordNotFound(RecordNotFoundError),
    TypeConversion(TypeConversionError),
    UnsupportedFeature(UnsupportedFeature),
}

impl Error {
    /// Wraps this error as the cause of `consequent`.
    pub fn context(self, consequent: impl IntoError) -> Error {
        let consequent = consequent.into_error();

        let kind = match consequent.inner.map(Arc::try_unwrap) {
            Some(Ok(inner)) => {
                debug_assert!(
                    inner.cause.is_none(),
                    "consequent error must not already have a cause"
                );
                inner.kind
            }
            // still referenced elsewhere; keep its message only
            Some(Err(shared)) => ErrorKind::Adhoc(AdhocError::new(shared.kind.to_string())),
            None => ErrorKind::Unknown,
        };

        Error {
            inner: Some(Arc::new(ErrorInner {
                kind,
                cause: Some(self),
            })),
        }
    }

    /// This error followed by its causes.
    fn chain(&self) -> impl Iterator<Item = &Error> {
        let mut next = Some(self);
        core::iter::from_fn(move || {
            let err = next?;
            next = err.inner.as_ref().and_then(|inner| inner.cause.as_ref());
            Some(err)
        })
    }

    fn kind(&self) -> &ErrorKind {
        match &self.inner {
            Some(inner) => &inner.kind,
            None => &ErrorKind::Unknown,
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.kind() {
            ErrorKind::DriverOperationFailed(err) => Some(err),
            ErrorKind::Anyhow(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        for (i, err) in self.chain().enumerate() {
            if i > 0 {
                f.write_str(": ")?;
            }
            core::fmt::Display::fmt(err.kind(), f)?;
        }
        Ok(())
    }
}

/// `{:?}` prints the message, `{:#?}` lists every cause with its kind.
impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if !f.alternate() {
            return core::fmt::Display::fmt(self, f);
        }

        let mut list = f.debug_list();
        for err in self.chain() {
            list.entry(&format_args!("{}({})", err.kind().name(), err.kind()));
        }
        list.finish()
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            inner: Some(Arc::new(ErrorInner { kind, cause: None })),
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Error {
        Error::from(ErrorKind::Anyhow(err))
    }
}

/// Parse failures of literal text are reported through `anyhow`.
macro_rules! from_parse_error {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Error {
                fn from(err: $ty) -> Error {
                    Error::from(anyhow::Error::from(err))
                }
            }
        )*
    };
}

from_parse_error!(
    std::num::ParseIntError,
    std::num::ParseFloatError,
    chrono::ParseError,
    rust_decimal::Error
);

/// Anything usable as the context of an [`Error`].
pub trait IntoError {
    fn into_error(self) -> Error;
}

impl IntoError for Error {
    fn into_error(self) -> Error {
        self
    }
}

impl IntoError for &str {
    fn into_error(self) -> Error {
        Error::from(ErrorKind::Adhoc(AdhocError::new(self)))
    }
}

impl IntoError for String {
    fn into_error(self) -> Error {
        Error::from(ErrorKind::Adhoc(AdhocError::new(self)))
    }
}
