mod config;
pub use config::HandlerConfig;

mod ddl_types;
pub use ddl_types::DdlTypes;

mod defaults;

mod features;
pub use features::{Feature, Features};

mod handler;
pub use handler::Handler;

mod keywords;

mod literal;

// Dialect tables
mod derby;
mod hsql;
mod mssql;
mod mysql;
mod oracle;
mod postgresql;
mod sqlite;

use empire_core::{Error, Result};

/// A supported database system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dbms {
    Derby,
    Hsql,
    MsSql,
    MySql,
    Oracle,
    PostgreSql,
    Sqlite,
}

impl Dbms {
    pub const ALL: [Dbms; 7] = [
        Dbms::Derby,
        Dbms::Hsql,
        Dbms::MsSql,
        Dbms::MySql,
        Dbms::Oracle,
        Dbms::PostgreSql,
        Dbms::Sqlite,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Dbms::Derby => "derby",
            Dbms::Hsql => "hsql",
            Dbms::MsSql => "mssql",
            Dbms::MySql => "mysql",
            Dbms::Oracle => "oracle",
            Dbms::PostgreSql => "postgresql",
            Dbms::Sqlite => "sqlite",
        }
    }

    /// Maps a connection URL scheme to a dialect.
    pub fn from_scheme(scheme: &str) -> Option<Dbms> {
        Some(match &*scheme.to_ascii_lowercase() {
            "derby" => Dbms::Derby,
            "hsql" | "hsqldb" => Dbms::Hsql,
            "mssql" | "sqlserver" => Dbms::MsSql,
            "mysql" => Dbms::MySql,
            "oracle" => Dbms::Oracle,
            "postgres" | "postgresql" => Dbms::PostgreSql,
            "sqlite" => Dbms::Sqlite,
            _ => return None,
        })
    }

    /// Picks the dialect from the scheme of a connection URL, e.g.
    /// `postgresql://localhost/app` or `sqlite::memory:`.
    pub fn from_url(url: &str) -> Result<Dbms> {
        let url = url::Url::parse(url).map_err(|err| {
            Error::invalid_connection_url(format!("{url}: {err}"))
        })?;

        Dbms::from_scheme(url.scheme()).ok_or_else(|| {
            Error::invalid_connection_url(format!("unsupported scheme `{}`", url.scheme()))
        })
    }

    /// A handler for this dialect with the default configuration.
    pub fn handler(self) -> Handler {
        Handler::new(self, HandlerConfig::default())
    }
}

impl core::fmt::Display for Dbms {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}
