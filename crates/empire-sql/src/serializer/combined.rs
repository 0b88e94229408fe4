use super::{Comma, Cx, Formatter, Params, Select, ToSql};

use empire_core::{expr::Context, CombinedCommand, CommandExpr, Result};

impl ToSql for &CombinedCommand {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) -> Result<()> {
        let keyword = self.keyword.as_sql();

        fmt!(f, Side(&self.left) "\r\n" keyword "\r\n" Side(&self.right));

        if !self.order_by.is_empty() {
            let order_by = self.order_by.iter().map(|expr| Cx(expr, Context::NAME));
            fmt!(f, "\r\nORDER BY " Comma(order_by));
        }

        Ok(())
    }
}

/// One operand of a set operation. Selects are parenthesized and lose
/// their ORDER BY.
struct Side<'a>(&'a CommandExpr);

impl ToSql for Side<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) -> Result<()> {
        match self.0 {
            CommandExpr::Select(cmd) => {
                fmt!(f, "(" Select::without_order(cmd) ")");
                Ok(())
            }
            CommandExpr::Combined(combined) => (&**combined).to_sql(f),
        }
    }
}
