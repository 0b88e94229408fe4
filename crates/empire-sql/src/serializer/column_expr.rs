use super::{Arg, ColumnName, Cx, Formatter, Ident, ParamRef, Params, Template, ToSql};

use empire_core::{
    expr::{
        Context, ExprCaseWhen, ExprConcat, ExprConcatFunc, ExprConvert, ExprCount, ExprDecode,
        OrderByExpr,
    },
    ColumnExpr, DataType, Operand, Phrase, Result, Value,
};

impl ToSql for Cx<'_, ColumnExpr> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) -> Result<()> {
        let Cx(expr, cx) = self;

        match expr {
            ColumnExpr::Column(column) => ColumnName(*column, cx).to_sql(f),
            ColumnExpr::Value(value) => {
                let literal = f.handler().value_string(&value.value, value.data_type)?;
                fmt!(f, literal.as_str());
                Ok(())
            }
            ColumnExpr::Func(func) => {
                let cx = cx.without(Context::ALIAS);

                Template {
                    text: f.handler().phrase(func.phrase),
                    expr: Some(Cx(&*func.expr, cx)),
                    args: func
                        .params
                        .iter()
                        .map(|param| Arg::new(param, param.data_type(), cx))
                        .collect(),
                }
                .to_sql(f)
            }
            ColumnExpr::Convert(convert) => Cx(convert, cx).to_sql(f),
            ColumnExpr::Calc(calc) => {
                let cx = cx.without(Context::ALIAS);
                let expr_type = calc.expr.data_type();

                // a number applied to a non-numeric expression is still a number
                let data_type = match calc.value.as_value() {
                    Some(Value::I64(_) | Value::F64(_) | Value::Decimal(_))
                        if !expr_type.is_numeric() =>
                    {
                        DataType::Decimal
                    }
                    _ => expr_type,
                };

                let op = calc.op.as_str();
                fmt!(f, Cx(&*calc.expr, cx) op Arg::new(&calc.value, data_type, cx).sep(op));
                Ok(())
            }
            ColumnExpr::Concat(concat) => Cx(concat, cx).to_sql(f),
            ColumnExpr::ConcatFunc(concat) => Cx(concat, cx).to_sql(f),
            ColumnExpr::Count(count) => Cx(count, cx).to_sql(f),
            ColumnExpr::Decode(decode) => Cx(decode, cx).to_sql(f),
            ColumnExpr::CaseWhen(case) => Cx(case, cx).to_sql(f),
            ColumnExpr::Alias(alias) if cx.contains(Context::ALIAS) => {
                let rename = f.handler().phrase(Phrase::RenameColumn);
                fmt!(f, Cx(&*alias.expr, cx.without(Context::ALIAS)) rename Ident(&alias.alias));
                Ok(())
            }
            ColumnExpr::Alias(alias) => Cx(&*alias.expr, cx).to_sql(f),
            ColumnExpr::Parenthesis(inner) => {
                fmt!(f, "(" Cx(&**inner, cx) ")");
                Ok(())
            }
            ColumnExpr::Param(id) => ParamRef(*id).to_sql(f),
        }
    }
}

impl ToSql for Cx<'_, ExprConvert> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) -> Result<()> {
        let Cx(convert, cx) = self;

        let phrase = f
            .handler()
            .convert_phrase(convert.to, convert.expr.data_type(), convert.format.as_ref());

        let inner = Cx(&*convert.expr, cx.without(Context::ALIAS));

        match phrase.split_once('?') {
            Some((prefix, postfix)) => fmt!(f, prefix inner postfix),
            None => fmt!(f, &*phrase),
        }

        Ok(())
    }
}

impl ToSql for Cx<'_, ExprConcat> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) -> Result<()> {
        let Cx(concat, cx) = self;
        let cx = cx.without(Context::ALIAS);
        let phrase = f.handler().phrase(Phrase::ConcatExpr);
        let left = Cx(&*concat.left, cx);

        if phrase.contains('?') {
            Template {
                text: phrase,
                expr: Some(left),
                args: vec![Arg::new(&concat.right, DataType::Text, cx)],
            }
            .to_sql(f)
        } else {
            fmt!(f, left phrase Arg::new(&concat.right, DataType::Text, cx).sep(phrase));
            Ok(())
        }
    }
}

impl ToSql for Cx<'_, ExprConcatFunc> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) -> Result<()> {
        let Cx(concat, cx) = self;
        let cx = cx.without(Context::ALIAS);
        let phrase = f.handler().phrase(Phrase::FuncConcat);

        let separator = match &concat.separator {
            Some(separator) => Some(
                f.handler()
                    .value_string(&Value::from(separator.as_str()), DataType::Text)?,
            ),
            None => None,
        };

        let (prefix, delim, postfix) = match phrase.split_once('?') {
            Some((prefix, postfix)) => (prefix, ", ", postfix),
            None => ("", phrase, ""),
        };

        fmt!(f, prefix Cx(&*concat.first, cx));

        for other in &concat.others {
            fmt!(f, delim);
            if let Some(separator) = &separator {
                fmt!(f, separator.as_str() delim);
            }
            fmt!(f, Arg::new(other, other.data_type(), cx));
        }

        fmt!(f, postfix);
        Ok(())
    }
}

impl ToSql for Cx<'_, ExprCount> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) -> Result<()> {
        let Cx(count, cx) = self;

        fmt!(f, "count(");

        match &count.expr {
            Some(expr) => {
                if count.distinct {
                    fmt!(f, "distinct ");
                }
                fmt!(f, Cx(&**expr, cx.without(Context::ALIAS)));
            }
            None => fmt!(f, "*"),
        }

        fmt!(f, ")");
        Ok(())
    }
}

impl ToSql for Cx<'_, ExprDecode> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) -> Result<()> {
        let Cx(decode, cx) = self;
        let cx = cx.without(Context::ALIAS);
        let handler = f.handler();
        let phrase = handler.phrase(Phrase::FuncDecode);

        let rest = match phrase.split_once('?') {
            Some((prefix, rest)) => {
                fmt!(f, prefix Cx(&*decode.expr, cx));
                rest
            }
            None => phrase,
        };

        let Some((before, after)) = rest.split_once("{0}") else {
            fmt!(f, rest);
            return Ok(());
        };

        fmt!(f, before);

        let key_type = decode.expr.data_type();
        let sep = handler.phrase(Phrase::FuncDecodeSep);

        for (key, value) in &decode.pairs {
            fmt!(f, sep Template {
                text: handler.phrase(Phrase::FuncDecodePart),
                expr: None,
                args: vec![
                    Arg::new(key, key_type, cx),
                    Arg::new(value, decode.data_type, cx),
                ],
            });
        }

        if let Some(otherwise) = &decode.otherwise {
            fmt!(f, sep Template {
                text: handler.phrase(Phrase::FuncDecodeElse),
                expr: None,
                args: vec![Arg::new(otherwise, decode.data_type, cx)],
            });
        }

        fmt!(f, after);
        Ok(())
    }
}

impl ToSql for Cx<'_, ExprCaseWhen> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) -> Result<()> {
        let Cx(case, cx) = self;
        let cx = cx.without(Context::ALIAS);
        let null = Operand::Value(Value::Null);

        if case.whens.is_empty() {
            let otherwise = case.otherwise.as_ref().unwrap_or(&null);
            return Arg::new(otherwise, case.data_type, cx).to_sql(f);
        }

        fmt!(f, "CASE");

        for (when, then) in &case.whens {
            fmt!(f, " WHEN " Cx(when, cx) " THEN " Arg::new(then, case.data_type, cx));
        }

        if let Some(otherwise) = &case.otherwise {
            fmt!(f, " ELSE " Arg::new(otherwise, case.data_type, cx));
        }

        fmt!(f, " END");
        Ok(())
    }
}

impl ToSql for Cx<'_, OrderByExpr> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) -> Result<()> {
        let Cx(order_by, cx) = self;

        fmt!(f, Cx(&order_by.expr, cx));

        if order_by.desc {
            fmt!(f, " DESC");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::Dbms;

    use empire_core::{
        expr::{case_when, count_all, CmpOp, Context},
        schema::ColumnDef,
        ColumnExpr, DataType, Database, Value,
    };
    use pretty_assertions::assert_eq;

    fn render(dbms: Dbms, db: &Database, expr: &ColumnExpr) -> String {
        let handler = dbms.handler();
        handler
            .serializer(db)
            .expr(expr, Context::ALL, &mut Vec::new())
            .unwrap()
    }

    #[test]
    fn decode_per_dialect() {
        let mut db = Database::new();
        let t = db.add_table("ORDERS").unwrap();
        let status = db
            .add_column(t, ColumnDef::new("STATUS", DataType::Integer))
            .unwrap();

        let expr = ColumnExpr::from(status).decode(
            [(1, "open"), (2, "closed")],
            Some("unknown".into()),
            DataType::Text,
        );

        assert_eq!(
            render(Dbms::Sqlite, &db, &expr),
            "case t1.STATUS when 1 then 'open' when 2 then 'closed' else 'unknown' end"
        );
        assert_eq!(
            render(Dbms::Oracle, &db, &expr),
            "decode(t1.STATUS, 1, 'open', 2, 'closed', 'unknown')"
        );
    }

    #[test]
    fn case_when_with_else() {
        let mut db = Database::new();
        let t = db.add_table("ORDERS").unwrap();
        let amount = db
            .add_column(t, ColumnDef::new("AMOUNT", DataType::Decimal))
            .unwrap();

        let expr = case_when(
            [(ColumnExpr::from(amount).cmp(CmpOp::Greater, 100), "big")],
            "small",
        );

        assert_eq!(
            render(Dbms::PostgreSql, &db, &expr),
            "CASE WHEN t1.AMOUNT>100 THEN 'big' ELSE 'small' END"
        );
    }

    #[test]
    fn count_forms() {
        let mut db = Database::new();
        let t = db.add_table("ORDERS").unwrap();
        let amount = db
            .add_column(t, ColumnDef::new("AMOUNT", DataType::Decimal))
            .unwrap();

        assert_eq!(render(Dbms::Sqlite, &db, &count_all(t)), "count(*)");
        assert_eq!(
            render(Dbms::Sqlite, &db, &ColumnExpr::from(amount).count_distinct()),
            "count(distinct t1.AMOUNT)"
        );
    }

    #[test]
    fn literal_values() {
        let db = Database::new();

        assert_eq!(
            render(Dbms::MySql, &db, &ColumnExpr::value("it's")),
            "'it''s'"
        );
        assert_eq!(
            render(Dbms::MySql, &db, &ColumnExpr::value(Value::Null)),
            "null"
        );
    }
}
