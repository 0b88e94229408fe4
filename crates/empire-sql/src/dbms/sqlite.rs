use super::{defaults, HandlerConfig};

use empire_core::{DataType, Phrase, Value};
use std::borrow::Cow;

pub(super) fn phrase(phrase: Phrase, _config: &HandlerConfig) -> Option<&'static str> {
    use Phrase::*;

    Some(match phrase {
        QuotesOpen | QuotesClose => "`",
        ConcatExpr => "? || {0}",

        CurrentDate => "date('now','localtime')",
        DateTemplate => "date('{0}')",
        DateTimeTemplate => "'{0}'",
        TimestampPattern => "%Y-%m-%d %H:%M:%S%.3f",
        TimestampTemplate => "'{0}'",
        CurrentTimestamp => "CURRENT_TIMESTAMP",

        FuncSubstring => "substr(?, {0})",
        FuncSubstringEx => "substr(?, {0}, {1})",
        FuncReverse => return None,
        FuncStrIndex => "instr(?, {0})",
        FuncStrIndexFrom => return None,
        FuncEscape => "? escape {0:VARCHAR}",
        FuncRound => "round(?,{0})",
        FuncTrunc => return None,
        FuncCeiling => "ceil(?)",
        FuncFormat => "printf({0:VARCHAR}, ?)",
        FuncDay => "CAST(strftime('%d', ?) AS INTEGER)",
        FuncMonth => "CAST(strftime('%m', ?) AS INTEGER)",
        FuncYear => "CAST(strftime('%Y', ?) AS INTEGER)",

        _ => return defaults::phrase(phrase),
    })
}

pub(super) fn convert(
    to: DataType,
    _from: DataType,
    _format: Option<&Value>,
) -> Option<Cow<'static, str>> {
    Some(Cow::Borrowed(match to {
        DataType::Bool | DataType::Integer | DataType::AutoInc => "CAST(? AS INTEGER)",
        DataType::Decimal => "CAST(? AS NUMERIC)",
        DataType::Double => "CAST(? AS REAL)",
        DataType::Text | DataType::Char | DataType::Clob => "CAST(? AS TEXT)",
        DataType::Date => "date(?)",
        DataType::DateTime => "datetime(?)",
        DataType::Blob => "CAST(? AS BLOB)",
        DataType::Unknown => return None,
    }))
}
