use empire_core::Phrase;

/// The phrase used when a dialect has no override.
///
/// Patterns are `chrono` format strings; templates receive the formatted
/// value as `{0}`.
pub(super) fn phrase(phrase: Phrase) -> Option<&'static str> {
    use Phrase::*;

    Some(match phrase {
        Null => "null",
        Parameter => "?",
        RenameTable => " ",
        RenameColumn => " AS ",
        DatabaseLink => "@",
        QuotesOpen | QuotesClose => "\"",
        ConcatExpr => "+",
        PseudoTable => "",

        BooleanTrue => "1",
        BooleanFalse => "0",
        CurrentDate => "sysdate",
        DatePattern => "%Y-%m-%d",
        DateTemplate => "TO_DATE('{0}', 'YYYY-MM-DD')",
        CurrentTimestamp => "systimestamp",
        DateTimePattern => "%Y-%m-%d %H:%M:%S",
        DateTimeTemplate => "TO_DATE('{0}', 'YYYY-MM-DD HH24:MI:SS')",
        TimestampPattern => "%Y.%m.%d %H:%M:%S%.3f",
        TimestampTemplate => "TO_TIMESTAMP('{0}', 'YYYY.MM.DD HH24:MI:SS.FF')",

        FuncCoalesce => "coalesce(?, {0})",
        FuncSubstring => "substring(?, {0})",
        FuncSubstringEx => "substring(?, {0}, {1})",
        FuncReplace => "replace(?, {0}, {1})",
        FuncReverse => "reverse(?)",
        FuncStrIndex => "charindex({0}, ?)",
        FuncStrIndexFrom => "charindex({0}, ?, {1})",
        FuncLength => "length(?)",
        FuncUpper => "upper(?)",
        FuncLower => "lower(?)",
        FuncTrim => "trim(?)",
        FuncLTrim => "ltrim(?)",
        FuncRTrim => "rtrim(?)",
        FuncEscape => "? escape {0}",
        FuncConcat => "concat(?)",

        FuncAbs => "abs(?)",
        FuncRound => "round(?, {0})",
        FuncTrunc => "trunc(?, {0})",
        FuncFloor => "floor(?)",
        FuncCeiling => "ceiling(?)",
        FuncModulo => "((?) % {0})",
        FuncFormat => "format(?, {0:VARCHAR})",

        FuncDay => "day(?)",
        FuncMonth => "month(?)",
        FuncYear => "year(?)",

        FuncSum => "sum(?)",
        FuncMax => "max(?)",
        FuncMin => "min(?)",
        FuncAvg => "avg(?)",

        FuncDecode => "case ?{0} end",
        FuncDecodeSep => " ",
        FuncDecodePart => "when {0} then {1}",
        FuncDecodeElse => "else {0}",
    })
}
