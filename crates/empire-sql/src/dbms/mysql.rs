use super::{defaults, HandlerConfig};

use empire_core::{DataType, Phrase, Value};
use std::borrow::Cow;

pub(super) fn phrase(phrase: Phrase, _config: &HandlerConfig) -> Option<&'static str> {
    use Phrase::*;

    Some(match phrase {
        QuotesOpen | QuotesClose => "`",
        ConcatExpr => "concat(?, {0})",

        CurrentDate => "CURRENT_DATE()",
        DateTemplate => "STR_TO_DATE('{0}','%Y-%m-%d')",
        DateTimeTemplate => "STR_TO_DATE('{0}','%Y-%m-%d %H:%i:%s')",
        CurrentTimestamp => "CURRENT_TIMESTAMP()",
        TimestampPattern => "%Y-%m-%d %H:%M:%S%.6f",
        TimestampTemplate => "STR_TO_DATE('{0}','%Y-%m-%d %H:%i:%s.%f')",

        FuncSubstring => "substring(?, {0:INTEGER})",
        FuncSubstringEx => "substring(?, {0:INTEGER}, {1:INTEGER})",
        FuncStrIndex => "instr(?, {0})",
        FuncStrIndexFrom => "locate({0}, ?, {1})",
        FuncLower => "lcase(?)",
        FuncEscape => "? escape {0:VARCHAR}",
        FuncRound => "round(?,{0})",
        FuncTrunc => "truncate(?,{0})",
        FuncCeiling => "ceil(?)",
        FuncModulo => "mod(?,{0})",
        FuncFormat => "format(?, {0:INTEGER})",

        _ => return defaults::phrase(phrase),
    })
}

pub(super) fn convert(
    to: DataType,
    _from: DataType,
    format: Option<&Value>,
) -> Option<Cow<'static, str>> {
    Some(Cow::Borrowed(match to {
        DataType::Bool => "CAST(? AS UNSIGNED)",
        DataType::Integer | DataType::AutoInc => "CAST(? AS SIGNED)",
        DataType::Decimal | DataType::Double => "CAST(? AS DECIMAL)",
        DataType::Date => "CAST(? AS DATE)",
        DataType::DateTime => "CAST(? AS DATETIME)",
        DataType::Text | DataType::Char | DataType::Clob => match format {
            Some(format) => return Some(Cow::Owned(format!("CAST(? AS CHAR {format})"))),
            None => "CAST(? AS CHAR)",
        },
        DataType::Blob => "CAST(? AS BINARY)",
        DataType::Unknown => return None,
    }))
}
