use super::{defaults, HandlerConfig};

use empire_core::{DataType, Phrase, Value};
use std::borrow::Cow;

pub(super) fn phrase(phrase: Phrase, _config: &HandlerConfig) -> Option<&'static str> {
    use Phrase::*;

    Some(match phrase {
        ConcatExpr => "? || {0}",

        BooleanTrue => "TRUE",
        BooleanFalse => "FALSE",
        CurrentDate => "CURRENT_DATE",
        DateTemplate => "'{0}'",
        DateTimeTemplate => "'{0}'",
        TimestampPattern => "%Y-%m-%d %H:%M:%S%.6f",
        TimestampTemplate => "'{0}'",
        CurrentTimestamp => "NOW()",

        FuncSubstring => "substring(?, {0:INTEGER})",
        FuncSubstringEx => "substring(?, {0:INTEGER}, {1:INTEGER})",
        FuncStrIndex => "strpos(?, {0})",
        FuncStrIndexFrom => return None,
        FuncEscape => "? escape {0:VARCHAR}",
        FuncRound => "round(?,{0})",
        FuncTrunc => "trunc(?,{0})",
        FuncModulo => "mod(?,{0})",
        FuncFormat => "to_char(?, {0:VARCHAR})",
        FuncDay => "extract(day from ?)",
        FuncMonth => "extract(month from ?)",
        FuncYear => "extract(year from ?)",

        _ => return defaults::phrase(phrase),
    })
}

pub(super) fn convert(
    to: DataType,
    _from: DataType,
    _format: Option<&Value>,
) -> Option<Cow<'static, str>> {
    Some(Cow::Borrowed(match to {
        DataType::Bool => "CAST(? AS BOOL)",
        DataType::Integer | DataType::AutoInc => "CAST(? AS INTEGER)",
        DataType::Decimal => "CAST(? AS DECIMAL)",
        DataType::Double => "CAST(? AS DOUBLE PRECISION)",
        DataType::Date => "CAST(? AS DATE)",
        DataType::DateTime => "CAST(? AS TIMESTAMP)",
        DataType::Text | DataType::Clob => "CAST(? AS TEXT)",
        DataType::Char => "CAST(? AS CHAR)",
        DataType::Blob => "CAST(? AS BYTEA)",
        DataType::Unknown => return None,
    }))
}
