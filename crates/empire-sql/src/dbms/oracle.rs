use super::{defaults, HandlerConfig};

use empire_core::{DataType, Phrase, Value};
use std::borrow::Cow;

pub(super) fn phrase(phrase: Phrase, config: &HandlerConfig) -> Option<&'static str> {
    use Phrase::*;

    Some(match phrase {
        ConcatExpr => " || ",
        PseudoTable => "DUAL",

        BooleanTrue if config.oracle_boolean_as_char => "'Y'",
        BooleanFalse if config.oracle_boolean_as_char => "'N'",
        CurrentDate => "trunc(sysdate)",
        DateTimeTemplate => "TO_DATE('{0}', 'YYYY-MM-DD HH24:MI:SS')",

        FuncCoalesce => "nvl(?, {0})",
        FuncSubstring => "substr(?, {0})",
        FuncSubstringEx => "substr(?, {0}, {1})",
        FuncStrIndex => "instr(?, {0})",
        FuncStrIndexFrom => "instr(?, {0}, {1})",
        FuncEscape => "? escape {0:VARCHAR}",
        FuncCeiling => "ceil(?)",
        FuncRound => "round(?,{0})",
        FuncTrunc => "trunc(?,{0})",
        FuncModulo => "mod(?,{0})",
        FuncFormat => "TO_CHAR(?, {0:VARCHAR})",
        FuncDay => "extract(day from ?)",
        FuncMonth => "extract(month from ?)",
        FuncYear => "extract(year from ?)",

        FuncDecode => "decode(?{0})",
        FuncDecodeSep => ", ",
        FuncDecodePart => "{0}, {1}",
        FuncDecodeElse => "{0}",

        _ => return defaults::phrase(phrase),
    })
}

pub(super) fn convert(
    to: DataType,
    _from: DataType,
    format: Option<&Value>,
) -> Option<Cow<'static, str>> {
    let func = match to {
        DataType::Text | DataType::Char => "to_char",
        DataType::Clob => return Some(Cow::Borrowed("to_clob(?)")),
        DataType::Integer | DataType::AutoInc | DataType::Decimal | DataType::Double => {
            "to_number"
        }
        DataType::Date => "to_date",
        DataType::DateTime => "to_timestamp",
        DataType::Bool | DataType::Blob | DataType::Unknown => return None,
    };

    Some(Cow::Owned(match format {
        Some(format) => {
            let format = format.to_string().replace('\'', "''");
            format!("{func}(?, '{format}')")
        }
        None => format!("{func}(?)"),
    }))
}
