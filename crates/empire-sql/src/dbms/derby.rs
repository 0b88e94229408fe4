use super::{defaults, HandlerConfig};

use empire_core::{DataType, Phrase, Value};
use std::borrow::Cow;

pub(super) fn phrase(phrase: Phrase, _config: &HandlerConfig) -> Option<&'static str> {
    use Phrase::*;

    Some(match phrase {
        ConcatExpr => "? || {0}",

        CurrentDate => "CURRENT_DATE",
        DateTemplate => "'{0}'",
        DateTimeTemplate => "'{0}'",
        TimestampPattern => "%Y-%m-%d %H:%M:%S%.3f",
        TimestampTemplate => "'{0}'",
        CurrentTimestamp => "CURRENT_TIMESTAMP",

        FuncSubstring => "substr(?, {0})",
        FuncSubstringEx => "substr(?, {0}, {1})",
        FuncReverse => return None,
        FuncStrIndex => "locate({0}, ?)",
        FuncStrIndexFrom => "locate({0}, ?, {1})",
        FuncRound => "round(?,{0})",
        FuncTrunc => "truncate(?,{0})",
        FuncModulo => "mod(?,{0})",

        _ => return defaults::phrase(phrase),
    })
}

pub(super) fn convert(
    to: DataType,
    _from: DataType,
    _format: Option<&Value>,
) -> Option<Cow<'static, str>> {
    Some(Cow::Borrowed(match to {
        DataType::Bool => "CAST(? AS BOOLEAN)",
        DataType::Integer | DataType::AutoInc => "CAST(? AS INTEGER)",
        DataType::Decimal => "CAST(? AS DECIMAL)",
        DataType::Double => "CAST(? AS DOUBLE)",
        DataType::Date => "CAST(? AS DATE)",
        DataType::DateTime => "CAST(? AS TIMESTAMP)",
        DataType::Text | DataType::Char => "CAST(? AS VARCHAR(255))",
        DataType::Clob => "CAST(? AS CLOB)",
        DataType::Blob => "CAST(? AS BLOB)",
        DataType::Unknown => return None,
    }))
}
