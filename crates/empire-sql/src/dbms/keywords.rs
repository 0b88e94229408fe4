use super::Dbms;

use std::collections::HashSet;

/// Reserved by every dialect.
const GENERAL: &[&str] = &[
    "table",
    "column",
    "view",
    "index",
    "constraint",
    "select",
    "update",
    "insert",
    "alter",
    "delete",
    "join",
    "on",
    "group",
    "by",
    "order",
    "asc",
    "desc",
    "all",
    "with",
    "user",
];

const DERBY: &[&str] = &["count", "year"];

const HSQL: &[&str] = &["count"];

const MSSQL: &[&str] = &["case", "when", "type", "key", "plan"];

const MYSQL: &[&str] = &[
    "div", "interval", "key", "keys", "limit", "match", "range", "read", "rows", "usage",
];

const ORACLE: &[&str] = &["date", "number"];

const POSTGRESQL: &[&str] = &["limit", "offset"];

const SQLITE: &[&str] = &["limit", "offset"];

/// Names containing one of these must be quoted.
const ILLEGAL_CHARS: &[char] = &[
    '@', '?', '>', '=', '<', ';', ':', '/', '.', '-', ',', '+', '*', ')', '(', '\'', '&', '%',
    '!', ' ',
];

/// The lower-cased reserved words of a dialect.
pub(super) fn reserved(dbms: Dbms, extra: &[String]) -> HashSet<String> {
    let dialect = match dbms {
        Dbms::Derby => DERBY,
        Dbms::Hsql => HSQL,
        Dbms::MsSql => MSSQL,
        Dbms::MySql => MYSQL,
        Dbms::Oracle => ORACLE,
        Dbms::PostgreSql => POSTGRESQL,
        Dbms::Sqlite => SQLITE,
    };

    GENERAL
        .iter()
        .chain(dialect)
        .map(|word| word.to_string())
        .chain(extra.iter().map(|word| word.to_ascii_lowercase()))
        .collect()
}

pub(super) fn has_illegal_char(name: &str) -> bool {
    name.contains(ILLEGAL_CHARS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dialect_words_and_extras() {
        let words = reserved(Dbms::Oracle, &["Level".to_string()]);
        assert!(words.contains("order"));
        assert!(words.contains("number"));
        assert!(words.contains("level"));
        assert!(!words.contains("limit"));
    }

    #[test]
    fn illegal_chars() {
        assert!(has_illegal_char("FIRST NAME"));
        assert!(has_illegal_char("A-B"));
        assert!(!has_illegal_char("FIRST_NAME"));
    }
}
