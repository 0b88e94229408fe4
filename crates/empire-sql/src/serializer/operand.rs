use super::{Bind, Cx, Formatter, ParamRef, Params, Select, ToSql};

use empire_core::{expr::Context, DataType, Operand, Result, Value};

/// An operand rendered as the value of an expression of type `data_type`.
#[derive(Clone, Copy)]
pub(super) struct Arg<'a> {
    pub(super) operand: &'a Operand,

    /// Type literal values are rendered as. `Unknown` falls back to the type
    /// of the value itself.
    pub(super) data_type: DataType,

    pub(super) cx: Context,

    /// Placed between the items of a list
    pub(super) sep: &'a str,

    /// Bind a literal value instead of inlining it
    pub(super) prepare: bool,
}

impl<'a> Arg<'a> {
    pub(super) fn new(operand: &'a Operand, data_type: DataType, cx: Context) -> Arg<'a> {
        Arg {
            operand,
            data_type,
            cx,
            sep: ", ",
            prepare: false,
        }
    }

    pub(super) fn sep(self, sep: &'a str) -> Arg<'a> {
        Arg { sep, ..self }
    }

    pub(super) fn prepare(self, prepare: bool) -> Arg<'a> {
        Arg { prepare, ..self }
    }

    pub(super) fn with_type(self, data_type: DataType) -> Arg<'a> {
        Arg { data_type, ..self }
    }

    fn value<P: Params>(self, value: &Value, f: &mut Formatter<'_, P>) -> Result<()> {
        if self.prepare && is_bindable(value) {
            return Bind(value).to_sql(f);
        }

        let data_type = match self.data_type {
            DataType::Unknown => value.infer_data_type(),
            data_type => data_type,
        };

        let literal = f.handler().value_string(value, data_type)?;
        fmt!(f, literal.as_str());
        Ok(())
    }
}

impl ToSql for Arg<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) -> Result<()> {
        match self.operand {
            Operand::Value(Value::List(items)) => {
                let mut s = "";
                for item in items {
                    fmt!(f, s);
                    self.value(item, f)?;
                    s = self.sep;
                }
                Ok(())
            }
            Operand::Value(value) => self.value(value, f),
            Operand::Expr(expr) => Cx(&**expr, self.cx.without(Context::ALIAS)).to_sql(f),
            Operand::List(items) => {
                let mut s = "";
                for operand in items {
                    fmt!(f, s Arg { operand, ..self });
                    s = self.sep;
                }
                Ok(())
            }
            Operand::Command(cmd) if self.cx.contains(Context::NOPARENTHESES) => {
                Select::new(cmd).to_sql(f)
            }
            Operand::Command(cmd) => {
                fmt!(f, "(" Select::new(cmd) ")");
                Ok(())
            }
            Operand::Param(id) => ParamRef(*id).to_sql(f),
        }
    }
}

/// Null, lists and the current date stay in the statement text.
fn is_bindable(value: &Value) -> bool {
    !value.is_empty() && !matches!(value, Value::List(_) | Value::SysDate)
}
