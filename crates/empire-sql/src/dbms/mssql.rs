use super::{defaults, HandlerConfig};

use empire_core::{DataType, Phrase, Value};
use std::borrow::Cow;

pub(super) fn phrase(phrase: Phrase, config: &HandlerConfig) -> Option<&'static str> {
    use Phrase::*;

    Some(match phrase {
        QuotesOpen => "[",
        QuotesClose => "]",
        ConcatExpr => " + ",

        CurrentDate => "convert(date, getdate())",
        DateTemplate => "convert(date, '{0}', 111)",
        DateTimeTemplate | TimestampTemplate if config.mssql_use_datetime2 => {
            "convert(datetime2, '{0}', 121)"
        }
        DateTimeTemplate | TimestampTemplate => "convert(datetime, '{0}', 121)",
        TimestampPattern => "%Y-%m-%d %H:%M:%S%.3f",
        CurrentTimestamp => "getdate()",

        FuncSubstring => "substring(?, {0}, 4000)",
        FuncStrIndex => "charindex({0}, ?)",
        FuncStrIndexFrom => "charindex({0}, ?, {1})",
        FuncLength => "len(?)",
        FuncEscape => "? escape {0:VARCHAR}",
        FuncRound => "round(?,{0})",
        FuncTrunc => "round(?,{0},1)",
        FuncFormat => "format(?, {0:VARCHAR})",

        _ => return defaults::phrase(phrase),
    })
}

pub(super) fn convert(
    to: DataType,
    from: DataType,
    format: Option<&Value>,
) -> Option<Cow<'static, str>> {
    Some(Cow::Borrowed(match to {
        DataType::Bool => "convert(bit, ?)",
        DataType::Integer | DataType::AutoInc => "convert(int, ?)",
        DataType::Decimal => match format {
            // precision and scale, given as `10.2` or `10,2`
            Some(format) => {
                let format = format.to_string().replace('.', ",");
                return Some(Cow::Owned(format!("convert(decimal({format}), ?)")));
            }
            None => "convert(decimal, ?)",
        },
        DataType::Double => "convert(float, ?)",
        DataType::Date => "convert(date, ?, 111)",
        DataType::DateTime => "convert(datetime2, ?, 121)",
        DataType::Text | DataType::Char | DataType::Clob => match from {
            DataType::Date => "convert(nvarchar, ?, 111)",
            DataType::DateTime => "convert(nvarchar, ?, 120)",
            _ => "convert(nvarchar, ?)",
        },
        DataType::Blob => "convert(varbinary, ?)",
        DataType::Unknown => return None,
    }))
}
