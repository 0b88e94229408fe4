use crate::{Error, Result};

use empire_sql::{Dbms, Handler, HandlerConfig};
use url::Url;

/// Where and how to connect: the dialect is taken from the URL scheme.
///
/// Any dialect can be used to render SQL. Opening a connection requires a
/// built-in driver for it, which currently exists for SQLite.
#[derive(Debug, Clone)]
pub struct Connect {
    url: Url,
    dbms: Dbms,
    config: HandlerConfig,
}

impl Connect {
    pub fn new(url: &str) -> Result<Self> {
        let dbms = Dbms::from_url(url)?;
        let url = Url::parse(url)
            .map_err(|err| Error::invalid_connection_url(format!("{err}; url={url}")))?;

        Ok(Self {
            url,
            dbms,
            config: HandlerConfig::default(),
        })
    }

    pub fn with_config(mut self, config: HandlerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn dbms(&self) -> Dbms {
        self.dbms
    }

    pub fn config(&self) -> &HandlerConfig {
        &self.config
    }

    /// A handler rendering SQL for the URL's dialect.
    pub fn handler(&self) -> Handler {
        Handler::new(self.dbms, self.config.clone())
    }

    #[cfg(feature = "sqlite")]
    pub fn connect(&self) -> Result<empire_driver_sqlite::Connection> {
        tracing::debug!(dbms = %self.dbms, url = %self.url, "connecting");

        match self.dbms {
            Dbms::Sqlite => empire_driver_sqlite::Sqlite::new(self.url.as_str())?
                .connect_with(self.config.clone()),
            dbms => Err(Error::unsupported_feature(format!(
                "no built-in driver for {dbms}; url={}",
                self.url
            ))),
        }
    }
}
