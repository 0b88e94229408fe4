mod connection;
pub use connection::Connection;

mod reader;
pub use reader::Reader;

mod transaction_manager;
use transaction_manager::TransactionManager;

mod value;
pub(crate) use value::Value;

use empire_core::{Error, Result};
use empire_sql::HandlerConfig;
use std::{
    borrow::Cow,
    path::{Path, PathBuf},
};
use url::Url;

#[derive(Debug)]
pub enum Sqlite {
    File(PathBuf),
    InMemory,
}

impl Sqlite {
    /// Create a new SQLite driver from a connection URL: `sqlite::memory:`
    /// or `sqlite:<path>`.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url_str = url.into();
        let url = Url::parse(&url_str)
            .map_err(|err| Error::invalid_connection_url(format!("{err}; url={url_str}")))?;

        if url.scheme() != "sqlite" {
            return Err(Error::invalid_connection_url(format!(
                "connection URL does not have a `sqlite` scheme; url={url_str}"
            )));
        }

        if url.path() == ":memory:" {
            Ok(Self::InMemory)
        } else {
            Ok(Self::File(PathBuf::from(url.path())))
        }
    }

    /// Create an in-memory SQLite database
    pub fn in_memory() -> Self {
        Self::InMemory
    }

    /// Open a SQLite database at the specified file path
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self::File(path.as_ref().to_path_buf())
    }

    pub fn url(&self) -> Cow<'_, str> {
        match self {
            Sqlite::InMemory => Cow::Borrowed("sqlite::memory:"),
            Sqlite::File(path) => Cow::Owned(format!("sqlite:{}", path.display())),
        }
    }

    /// Opens a connection rendering SQL with the default configuration.
    /// Every in-memory connection starts with an empty database.
    pub fn connect(&self) -> Result<Connection> {
        self.connect_with(HandlerConfig::default())
    }

    pub fn connect_with(&self, config: HandlerConfig) -> Result<Connection> {
        match self {
            Sqlite::File(path) => Connection::open(path, config),
            Sqlite::InMemory => Connection::in_memory(config),
        }
    }
}
