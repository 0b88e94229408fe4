use super::Handler;

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use empire_core::{DataType, Error, Phrase, Result, Value};

impl Handler {
    /// Renders `value` as a SQL literal of type `data_type`.
    pub fn value_string(&self, value: &Value, data_type: DataType) -> Result<String> {
        if value.is_empty() {
            return Ok(self.phrase(Phrase::Null).to_string());
        }

        if let Value::SysDate = value {
            return Ok(match data_type {
                DataType::Date => self.phrase(Phrase::CurrentDate),
                _ => self.phrase(Phrase::CurrentTimestamp),
            }
            .to_string());
        }

        if let Value::List(items) = value {
            let items = items
                .iter()
                .map(|item| self.value_string(item, data_type))
                .collect::<Result<Vec<_>>>()?;
            return Ok(items.join(", "));
        }

        match data_type {
            DataType::Date => Ok(self.date_literal(value.to_date()?)),
            DataType::DateTime => match value {
                // a plain date keeps its date template
                Value::Date(date) => Ok(self.date_literal(*date)),
                _ => Ok(self.datetime_literal(value.to_datetime()?)),
            },
            DataType::Text | DataType::Char | DataType::Clob => {
                Ok(quote_text(&value.to_text()?))
            }
            DataType::Bool => Ok(self
                .phrase(if value.to_bool()? {
                    Phrase::BooleanTrue
                } else {
                    Phrase::BooleanFalse
                })
                .to_string()),
            DataType::Integer | DataType::Double | DataType::Decimal => {
                number_literal(value, data_type)
            }
            DataType::Blob => Err(Error::unsupported_feature(
                "BLOB values cannot be rendered as literals",
            )),
            DataType::AutoInc | DataType::Unknown => Ok(value.to_string()),
        }
    }

    fn date_literal(&self, value: NaiveDate) -> String {
        let formatted = value.format(self.phrase(Phrase::DatePattern)).to_string();
        self.phrase(Phrase::DateTemplate).replace("{0}", &formatted)
    }

    /// Values with fractional seconds use the timestamp template.
    fn datetime_literal(&self, value: NaiveDateTime) -> String {
        let (template, pattern) = if value.nanosecond() == 0 {
            (Phrase::DateTimeTemplate, Phrase::DateTimePattern)
        } else {
            (Phrase::TimestampTemplate, Phrase::TimestampPattern)
        };

        let formatted = value.format(self.phrase(pattern)).to_string();
        self.phrase(template).replace("{0}", &formatted)
    }
}

fn quote_text(text: &str) -> String {
    let mut ret = String::with_capacity(text.len() + 2);
    ret.push('\'');
    for c in text.chars() {
        if c == '\'' {
            ret.push('\'');
        }
        ret.push(c);
    }
    ret.push('\'');
    ret
}

/// Numbers are written as they are. Text is checked so that nothing but a
/// number ends up in the statement.
fn number_literal(value: &Value, data_type: DataType) -> Result<String> {
    let text = match value {
        Value::I64(v) => return Ok(v.to_string()),
        Value::F64(v) if data_type == DataType::Integer && v.fract() != 0.0 => {
            return Err(Error::invalid_argument(
                "value",
                format!("{v} is not an integer"),
            ))
        }
        Value::F64(v) => return Ok(v.to_string()),
        Value::Decimal(v) => return Ok(v.to_string()),
        Value::Bool(v) => return Ok(if *v { "1" } else { "0" }.to_string()),
        Value::String(s) => s.as_str(),
        other => {
            return Err(Error::invalid_argument(
                "value",
                format!("{} is not a number", other.kind_name()),
            ))
        }
    };

    // anything after a space is ignored, a leading space is not
    let end = text
        .char_indices()
        .find(|(i, c)| *c == ' ' && *i > 0)
        .map_or(text.len(), |(i, _)| i);
    let text = &text[..end];

    for c in text.chars() {
        match c {
            '0'..='9' | '-' | '+' => {}
            '.' | ',' if data_type != DataType::Integer => {}
            _ => {
                return Err(Error::invalid_argument(
                    "value",
                    format!("`{text}` is not a valid {data_type} literal"),
                ))
            }
        }
    }

    if text.is_empty() {
        return Err(Error::invalid_argument("value", "empty number"));
    }

    Ok(text.to_string())
}

#[cfg(test)]
mod tests {
    use crate::Dbms;

    use chrono::{NaiveDate, NaiveDateTime};
    use empire_core::{DataType, Value};
    use rust_decimal::Decimal;

    fn datetime(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f").unwrap()
    }

    #[test]
    fn text_is_quoted() {
        let handler = Dbms::Sqlite.handler();
        assert_eq!(
            handler.value_string(&Value::from("O'Neil"), DataType::Text).unwrap(),
            "'O''Neil'"
        );
        assert_eq!(
            handler.value_string(&Value::from(""), DataType::Text).unwrap(),
            "null"
        );
        assert_eq!(
            handler.value_string(&Value::from(12), DataType::Char).unwrap(),
            "'12'"
        );
    }

    #[test]
    fn numbers_are_validated() {
        let handler = Dbms::PostgreSql.handler();
        assert_eq!(
            handler.value_string(&Value::from("42 apples"), DataType::Integer).unwrap(),
            "42"
        );
        assert_eq!(
            handler
                .value_string(&Value::from(Decimal::new(1050, 2)), DataType::Decimal)
                .unwrap(),
            "10.50"
        );
        assert_eq!(
            handler.value_string(&Value::from("3.5"), DataType::Double).unwrap(),
            "3.5"
        );

        let err = handler
            .value_string(&Value::from("3.5"), DataType::Integer)
            .unwrap_err();
        assert!(err.is_invalid_argument());

        let err = handler
            .value_string(&Value::from("1; drop table x"), DataType::Decimal)
            .unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn number_text_is_not_trimmed() {
        let handler = Dbms::PostgreSql.handler();

        let err = handler
            .value_string(&Value::from(" 5"), DataType::Integer)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid argument `value`: ` 5` is not a valid INTEGER literal"
        );

        assert!(handler
            .value_string(&Value::from("5\t"), DataType::Integer)
            .unwrap_err()
            .is_invalid_argument());
        assert_eq!(
            handler.value_string(&Value::from("5 "), DataType::Integer).unwrap(),
            "5"
        );
    }

    #[test]
    fn booleans_use_phrases() {
        assert_eq!(
            Dbms::PostgreSql
                .handler()
                .value_string(&Value::from(true), DataType::Bool)
                .unwrap(),
            "TRUE"
        );
        assert_eq!(
            Dbms::Sqlite
                .handler()
                .value_string(&Value::from("Y"), DataType::Bool)
                .unwrap(),
            "1"
        );
    }

    #[test]
    fn dates_use_templates() {
        let date = Value::from(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());

        assert_eq!(
            Dbms::Oracle.handler().value_string(&date, DataType::Date).unwrap(),
            "TO_DATE('2024-03-01', 'YYYY-MM-DD')"
        );
        assert_eq!(
            Dbms::MySql.handler().value_string(&date, DataType::Date).unwrap(),
            "STR_TO_DATE('2024-03-01','%Y-%m-%d')"
        );
        assert_eq!(
            Dbms::Sqlite.handler().value_string(&date, DataType::DateTime).unwrap(),
            "date('2024-03-01')"
        );

        let dt = Value::from(datetime("2024-03-01 14:30:00"));
        assert_eq!(
            Dbms::MsSql.handler().value_string(&dt, DataType::DateTime).unwrap(),
            "convert(datetime2, '2024-03-01 14:30:00', 121)"
        );

        let ts = Value::from(datetime("2024-03-01 14:30:00.250"));
        assert_eq!(
            Dbms::Oracle.handler().value_string(&ts, DataType::DateTime).unwrap(),
            "TO_TIMESTAMP('2024.03.01 14:30:00.250', 'YYYY.MM.DD HH24:MI:SS.FF')"
        );

        assert_eq!(
            Dbms::PostgreSql
                .handler()
                .value_string(&Value::SysDate, DataType::Date)
                .unwrap(),
            "CURRENT_DATE"
        );
    }

    #[test]
    fn blobs_are_unsupported() {
        let err = Dbms::Sqlite
            .handler()
            .value_string(&Value::Bytes(vec![1, 2]), DataType::Blob)
            .unwrap_err();
        assert!(err.is_unsupported_feature());
    }

    #[test]
    fn unknown_type_is_verbatim() {
        assert_eq!(
            Dbms::Sqlite
                .handler()
                .value_string(&Value::from("t1.ID + 1"), DataType::Unknown)
                .unwrap(),
            "t1.ID + 1"
        );
    }
}
