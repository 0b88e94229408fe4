use super::{Arg, Cx, Formatter, Params, ToSql};

use empire_core::{ColumnExpr, DataType, Error, Result};
use tracing::warn;

/// A phrase template. The first `?` is replaced by the expression, `{n}`
/// by the n-th argument. `{n:TYPE}` renders the argument as `TYPE`.
pub(super) struct Template<'a> {
    pub(super) text: &'a str,
    pub(super) expr: Option<Cx<'a, ColumnExpr>>,
    pub(super) args: Vec<Arg<'a>>,
}

impl ToSql for Template<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) -> Result<()> {
        let Template {
            text,
            mut expr,
            args,
        } = self;

        let mut rest = text;
        let mut substituted = false;

        loop {
            let want_expr = expr.is_some();
            let Some(pos) = rest.find(|c: char| c == '{' || (want_expr && c == '?')) else {
                break;
            };

            fmt!(f, &rest[..pos]);

            if rest[pos..].starts_with('?') {
                expr.take().to_sql(f)?;
                rest = &rest[pos + 1..];
                continue;
            }

            let Some(len) = rest[pos..].find('}') else {
                return Err(Error::invalid_argument(
                    "template",
                    format!("unterminated placeholder in `{text}`"),
                ));
            };

            let placeholder = &rest[pos + 1..pos + len];
            let (index, hint) = match placeholder.split_once(':') {
                Some((index, hint)) => (index, Some(hint)),
                None => (placeholder, None),
            };

            let Some(arg) = index.trim().parse::<usize>().ok().and_then(|i| args.get(i)) else {
                return Err(Error::invalid_argument(
                    "template",
                    format!("no argument for `{{{placeholder}}}` in `{text}`"),
                ));
            };

            match hint {
                Some(hint) => arg.with_type(type_hint(hint)?).to_sql(f)?,
                None => arg.to_sql(f)?,
            }

            substituted = true;
            rest = &rest[pos + len + 1..];
        }

        fmt!(f, rest);

        if !substituted && !args.is_empty() {
            warn!(template = text, "template has no placeholder for its arguments");
        }

        Ok(())
    }
}

fn type_hint(name: &str) -> Result<DataType> {
    let name = name.trim();

    // VARCHAR is accepted for TEXT
    if name.eq_ignore_ascii_case("VARCHAR") {
        return Ok(DataType::Text);
    }

    const TYPES: [DataType; 12] = [
        DataType::Unknown,
        DataType::Integer,
        DataType::AutoInc,
        DataType::Text,
        DataType::Date,
        DataType::DateTime,
        DataType::Char,
        DataType::Double,
        DataType::Decimal,
        DataType::Bool,
        DataType::Clob,
        DataType::Blob,
    ];

    TYPES
        .into_iter()
        .find(|ty| ty.name().eq_ignore_ascii_case(name))
        .ok_or_else(|| Error::invalid_argument("template", format!("unknown type `{name}`")))
}
