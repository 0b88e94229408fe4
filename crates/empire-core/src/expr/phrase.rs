/// Names a dialect-specific SQL fragment.
///
/// Function templates use `?` for the expression the function is applied to
/// and `{0}`, `{1}`, ... for its parameters. A parameter placeholder may
/// carry a type, as in `{0:INTEGER}`, which controls how a literal argument
/// is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phrase {
    // Generic
    Null,
    Parameter,
    RenameTable,
    RenameColumn,
    DatabaseLink,
    QuotesOpen,
    QuotesClose,
    ConcatExpr,
    PseudoTable,

    // Data types
    BooleanTrue,
    BooleanFalse,
    CurrentDate,
    DatePattern,
    DateTemplate,
    CurrentTimestamp,
    DateTimePattern,
    DateTimeTemplate,
    TimestampPattern,
    TimestampTemplate,

    // String functions
    FuncCoalesce,
    FuncSubstring,
    FuncSubstringEx,
    FuncReplace,
    FuncReverse,
    FuncStrIndex,
    FuncStrIndexFrom,
    FuncLength,
    FuncUpper,
    FuncLower,
    FuncTrim,
    FuncLTrim,
    FuncRTrim,
    FuncEscape,
    FuncConcat,

    // Numeric functions
    FuncAbs,
    FuncRound,
    FuncTrunc,
    FuncFloor,
    FuncCeiling,
    FuncModulo,
    FuncFormat,

    // Date functions
    FuncDay,
    FuncMonth,
    FuncYear,

    // Aggregates
    FuncSum,
    FuncMax,
    FuncMin,
    FuncAvg,

    // Decode
    FuncDecode,
    FuncDecodeSep,
    FuncDecodePart,
    FuncDecodeElse,
}

impl Phrase {
    /// Aggregate functions force a GROUP BY on the other select columns.
    pub fn is_aggregate(self) -> bool {
        matches!(
            self,
            Phrase::FuncSum | Phrase::FuncMax | Phrase::FuncMin | Phrase::FuncAvg
        )
    }

    /// Name used for expressions built from this phrase.
    pub fn function_name(self) -> &'static str {
        use Phrase::*;

        match self {
            FuncCoalesce => "coalesce",
            FuncSubstring | FuncSubstringEx => "substring",
            FuncReplace => "replace",
            FuncReverse => "reverse",
            FuncStrIndex | FuncStrIndexFrom => "indexof",
            FuncLength => "length",
            FuncUpper => "upper",
            FuncLower => "lower",
            FuncTrim => "trim",
            FuncLTrim => "ltrim",
            FuncRTrim => "rtrim",
            FuncEscape => "escape",
            FuncConcat => "concat",
            FuncAbs => "abs",
            FuncRound => "round",
            FuncTrunc => "trunc",
            FuncFloor => "floor",
            FuncCeiling => "ceiling",
            FuncModulo => "mod",
            FuncFormat => "format",
            FuncDay => "day",
            FuncMonth => "month",
            FuncYear => "year",
            FuncSum => "sum",
            FuncMax => "max",
            FuncMin => "min",
            FuncAvg => "avg",
            FuncDecode | FuncDecodeSep | FuncDecodePart | FuncDecodeElse => "decode",
            _ => "expr",
        }
    }
}
