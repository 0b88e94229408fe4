use super::{Formatter, ToSql};
use crate::Dbms;

use empire_core::{expr::ParamId, Error, Phrase, Result, Value};

/// Collects the values of a statement's placeholders.
pub trait Params {
    fn push(&mut self, param: &Value) -> Placeholder;
}

/// 1-based position of a bound value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder(pub usize);

impl Params for Vec<Value> {
    fn push(&mut self, value: &Value) -> Placeholder {
        self.push(value.clone());
        Placeholder(self.len())
    }
}

impl ToSql for Placeholder {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) -> Result<()> {
        let handler = f.serializer.handler;

        match handler.dbms() {
            Dbms::PostgreSql => fmt!(f, "$" self.0),
            Dbms::Sqlite => fmt!(f, "?" self.0),
            _ => fmt!(f, handler.phrase(Phrase::Parameter)),
        }

        Ok(())
    }
}

/// Binds the current value of a command parameter.
pub(super) struct ParamRef(pub(super) ParamId);

impl ToSql for ParamRef {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) -> Result<()> {
        let Some(value) = f.scope.params.get(self.0 .0) else {
            return Err(Error::invalid_argument(
                "param",
                format!("command has no parameter at index {}", self.0 .0),
            ));
        };

        let placeholder = f.params.push(value);
        placeholder.to_sql(f)
    }
}

/// Binds a literal value.
pub(super) struct Bind<'a>(pub(super) &'a Value);

impl ToSql for Bind<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) -> Result<()> {
        let placeholder = f.params.push(self.0);
        placeholder.to_sql(f)
    }
}
