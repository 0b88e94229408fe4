use super::{
    derby, hsql, keywords, mssql, mysql, oracle, postgresql, sqlite, DdlTypes, Dbms, Feature,
    Features, HandlerConfig,
};
use crate::{DdlGenerator, Serializer};

use empire_core::{
    schema::{Column, RowSetId},
    Command, DataType, Database, Error, Phrase, Result, Value,
};
use std::{borrow::Cow, collections::HashSet};
use tracing::error;

/// Supplies the SQL differences of one database system.
///
/// A handler is cheap to share: create one per dialect and configuration
/// and pass it to whatever renders SQL.
#[derive(Debug, Clone)]
pub struct Handler {
    dbms: Dbms,
    config: HandlerConfig,
    reserved: HashSet<String>,
}

impl Handler {
    pub fn new(dbms: Dbms, config: HandlerConfig) -> Handler {
        let reserved = keywords::reserved(dbms, &config.extra_keywords);
        Handler {
            dbms,
            config,
            reserved,
        }
    }

    pub fn dbms(&self) -> Dbms {
        self.dbms
    }

    pub fn config(&self) -> &HandlerConfig {
        &self.config
    }

    /// The dialect's text for `phrase`, or `None` when the dialect cannot
    /// express it.
    pub fn try_phrase(&self, phrase: Phrase) -> Option<&'static str> {
        let config = &self.config;

        match self.dbms {
            Dbms::Derby => derby::phrase(phrase, config),
            Dbms::Hsql => hsql::phrase(phrase, config),
            Dbms::MsSql => mssql::phrase(phrase, config),
            Dbms::MySql => mysql::phrase(phrase, config),
            Dbms::Oracle => oracle::phrase(phrase, config),
            Dbms::PostgreSql => postgresql::phrase(phrase, config),
            Dbms::Sqlite => sqlite::phrase(phrase, config),
        }
    }

    /// Like [`try_phrase`](Self::try_phrase), but an unsupported phrase is
    /// logged and rendered as `?`.
    pub fn phrase(&self, phrase: Phrase) -> &'static str {
        match self.try_phrase(phrase) {
            Some(text) => text,
            None => {
                error!(?phrase, dbms = %self.dbms, "phrase is not supported");
                "?"
            }
        }
    }

    /// Template converting an expression of type `from` into `to`. The
    /// expression is substituted for `?`.
    pub fn convert_phrase(&self, to: DataType, from: DataType, format: Option<&Value>) -> Cow<'static, str> {
        let phrase = match self.dbms {
            Dbms::Derby => derby::convert(to, from, format),
            Dbms::Hsql => hsql::convert(to, from, format),
            Dbms::MsSql => mssql::convert(to, from, format),
            Dbms::MySql => mysql::convert(to, from, format),
            Dbms::Oracle => oracle::convert(to, from, format),
            Dbms::PostgreSql => postgresql::convert(to, from, format),
            Dbms::Sqlite => sqlite::convert(to, from, format),
        };

        phrase.unwrap_or_else(|| {
            error!(%to, %from, dbms = %self.dbms, "conversion is not supported");
            Cow::Borrowed("?")
        })
    }

    pub fn features(&self) -> &'static Features {
        match self.dbms {
            Dbms::Derby => &Features::DERBY,
            Dbms::Hsql => &Features::HSQL,
            Dbms::MsSql => &Features::MSSQL,
            Dbms::MySql => &Features::MYSQL,
            Dbms::Oracle => &Features::ORACLE,
            Dbms::PostgreSql => &Features::POSTGRESQL,
            Dbms::Sqlite => &Features::SQLITE,
        }
    }

    pub fn is_supported(&self, feature: Feature) -> bool {
        self.features().is_supported(feature)
    }

    pub fn ddl_types(&self) -> &'static DdlTypes {
        match self.dbms {
            Dbms::Derby => &DdlTypes::DERBY,
            Dbms::Hsql => &DdlTypes::HSQL,
            Dbms::MsSql if self.config.mssql_use_datetime2 => &DdlTypes::MSSQL,
            Dbms::MsSql => &DdlTypes::MSSQL_DATETIME,
            Dbms::MySql => &DdlTypes::MYSQL,
            Dbms::Oracle if self.config.oracle_boolean_as_char => &DdlTypes::ORACLE_BOOLEAN_AS_CHAR,
            Dbms::Oracle => &DdlTypes::ORACLE,
            Dbms::PostgreSql if self.config.postgres_serial_type => &DdlTypes::POSTGRESQL,
            Dbms::PostgreSql => &DdlTypes::POSTGRESQL_NO_SERIAL,
            Dbms::Sqlite => &DdlTypes::SQLITE,
        }
    }

    /// Returns `true` when `name` must be quoted: it is a reserved word or
    /// contains a character that is not allowed in plain names.
    pub fn detect_quote_name(&self, name: &str) -> bool {
        if !self.config.quote_reserved_names {
            return false;
        }

        keywords::has_illegal_char(name) || self.reserved.contains(&name.to_ascii_lowercase())
    }

    /// Appends `name`, quoted when necessary.
    pub fn append_object_name(&self, dst: &mut String, name: &str) {
        if self.detect_quote_name(name) {
            dst.push_str(self.phrase(Phrase::QuotesOpen));
            dst.push_str(name);
            dst.push_str(self.phrase(Phrase::QuotesClose));
        } else {
            dst.push_str(name);
        }
    }

    /// Appends the qualified name of a rowset: schema, name and database
    /// link, followed by its alias when `alias` is set.
    pub fn append_rowset_name(&self, dst: &mut String, db: &Database, rowset: RowSetId, alias: bool) {
        let rowset = db.rowset(rowset);

        if let Some(schema) = &db.schema {
            self.append_object_name(dst, schema);
            dst.push('.');
        }

        self.append_object_name(dst, &rowset.name);

        if let Some(link) = &db.link {
            dst.push_str(self.phrase(Phrase::DatabaseLink));
            dst.push_str(link);
        }

        if alias {
            dst.push_str(self.phrase(Phrase::RenameTable));
            dst.push_str(&rowset.alias);
        }
    }

    /// The sequence feeding an AUTOINC column: the column's default value
    /// when one is set, else `<TABLE>_<COLUMN>_SEQ`.
    pub fn column_sequence_name(&self, db: &Database, column: &Column) -> Result<String> {
        if column.data_type != DataType::AutoInc {
            return Err(Error::invalid_argument(
                "column",
                format!("{} is not an AUTOINC column", db.column_name(column.id)),
            ));
        }

        Ok(match &column.default {
            Some(Value::Null) | None => {
                format!("{}_{}_SEQ", db.rowset(column.id.rowset).name, column.name)
            }
            Some(name) => name.to_string(),
        })
    }

    /// A new command on `db`, prepared according to the handler
    /// configuration.
    pub fn create_command(&self, db: &Database) -> Command {
        let mut cmd = Command::new(db);
        cmd.set_auto_prepare(self.config.prepared_statements);
        cmd
    }

    pub fn serializer<'a>(&'a self, db: &'a Database) -> Serializer<'a> {
        Serializer::new(self, db)
    }

    pub fn ddl<'a>(&'a self, db: &'a Database) -> DdlGenerator<'a> {
        DdlGenerator::new(self, db)
    }
}
