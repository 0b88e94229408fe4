use super::{defaults, HandlerConfig};

use empire_core::{DataType, Phrase, Value};
use std::borrow::Cow;

pub(super) fn phrase(phrase: Phrase, _config: &HandlerConfig) -> Option<&'static str> {
    use Phrase::*;

    Some(match phrase {
        ConcatExpr => "concat(?, {0})",

        BooleanTrue => "true",
        BooleanFalse => "false",
        CurrentDate => "CURRENT_DATE",
        DateTemplate => "'{0}'",
        DateTimeTemplate => "'{0}'",
        TimestampPattern => "%Y-%m-%d %H:%M:%S%.3f",
        TimestampTemplate => "'{0}'",
        CurrentTimestamp => "CURRENT_TIMESTAMP",

        FuncSubstring => "substr(?, {0})",
        FuncSubstringEx => "substr(?, {0}, {1})",
        FuncStrIndex => "locate({0}, ?)",
        FuncStrIndexFrom => "locate({0}, ?, {1})",
        FuncUpper => "ucase(?)",
        FuncLower => "lcase(?)",
        FuncRound => "round(?,{0})",
        FuncTrunc => "truncate(?,{0})",
        FuncModulo => "mod(?,{0})",
        FuncFormat => "TO_CHAR(?, {0:VARCHAR})",

        _ => return defaults::phrase(phrase),
    })
}

pub(super) fn convert(
    to: DataType,
    from: DataType,
    format: Option<&Value>,
) -> Option<Cow<'static, str>> {
    Some(match to {
        DataType::Text | DataType::Char => match format {
            // a text pattern formats dates and numbers, not integers
            Some(Value::String(_)) if from == DataType::Integer => return None,
            Some(Value::String(pattern)) => {
                Cow::Owned(format!("to_char(?, '{}')", pattern.replace('\'', "''")))
            }
            Some(size) => Cow::Owned(format!("convert(?, VARCHAR({size}))")),
            None => Cow::Borrowed("convert(?, VARCHAR(255))"),
        },
        DataType::Integer => Cow::Borrowed("convert(?, BIGINT)"),
        DataType::Decimal => Cow::Borrowed("convert(?, DECIMAL)"),
        DataType::Double => Cow::Borrowed("convert(?, DOUBLE)"),
        _ => return None,
    })
}
