use super::{ColumnName, Cx, Formatter, Params, RowSetName, ToSql};

use empire_core::{expr::Context, JoinExpr, Result};

impl ToSql for Cx<'_, JoinExpr> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) -> Result<()> {
        let Cx(join, cx) = self;

        if cx.contains(Context::NAME) {
            fmt!(f, RowSetName::aliased(join.left_table()));
        }

        if !cx.contains(Context::VALUE) {
            return Ok(());
        }

        match join {
            JoinExpr::Column(join) => {
                let join_type = join.join_type.as_sql();
                fmt!(
                    f,
                    join_type
                    RowSetName::aliased(join.right.rowset)
                    " ON "
                    ColumnName(join.right, Context::DEFAULT)
                    " = "
                    ColumnName(join.left, Context::DEFAULT)
                );

                if let Some(and) = &join.and {
                    fmt!(f, " AND " Cx(and, Context::DEFAULT));
                }
            }
            JoinExpr::Compare(join) => {
                let join_type = join.join_type.as_sql();
                fmt!(f, join_type RowSetName::aliased(join.right) " ON " Cx(&join.cmp, Context::DEFAULT));

                if let Some(and) = &join.and {
                    fmt!(f, " AND " Cx(and, Context::DEFAULT));
                }
            }
            JoinExpr::Cross(join) => {
                fmt!(f, " CROSS JOIN " RowSetName::aliased(join.right));
            }
        }

        Ok(())
    }
}
