use super::{Comma, Delimited, Formatter, Ident, Placeholder, RawSql, ToSql};

use crate::stmt::{
    ColumnRef, Delete, Filter, Insert, Join, JoinKind, Select, Statement, TableRef, Update,
};

impl ToSql for &Statement {
    fn to_sql(self, f: &mut Formatter<'_>) {
        match self {
            Statement::Query(stmt) => stmt.to_sql(f),
            Statement::Insert(stmt) => stmt.to_sql(f),
            Statement::Update(stmt) => stmt.to_sql(f),
            Statement::Delete(stmt) => stmt.to_sql(f),
        }
    }
}

impl ToSql for &ColumnRef {
    fn to_sql(self, f: &mut Formatter<'_>) {
        fmt!(f, Ident(&self.table) "." Ident(&self.column));
    }
}

impl ToSql for &TableRef {
    fn to_sql(self, f: &mut Formatter<'_>) {
        fmt!(f, Ident(&self.name) " AS " Ident(&self.alias));
    }
}

impl ToSql for &Join {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let kind = match self.kind {
            JoinKind::Inner => " INNER JOIN ",
            JoinKind::LeftOuter => " LEFT OUTER JOIN ",
        };

        let table = &self.table;
        let on = Delimited(self.on.iter().map(Equality), " AND ");
        fmt!(f, kind table " ON " on);
    }
}

struct Equality<'a>(&'a (ColumnRef, ColumnRef));

impl ToSql for Equality<'_> {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let (lhs, rhs) = self.0;
        fmt!(f, lhs " = " rhs);
    }
}

impl ToSql for &Filter {
    fn to_sql(self, f: &mut Formatter<'_>) {
        match self {
            Filter::Eq(column) => fmt!(f, column " = " Placeholder),
            Filter::Raw(sql) => {
                fmt!(f, "(" RawSql(sql) ")");
            }
        }
    }
}

impl ToSql for &Select {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let columns = Comma(&self.columns);
        let from = &self.from;
        fmt!(f, "SELECT " columns " FROM " from);

        for join in &self.joins {
            join.to_sql(f);
        }

        if !self.filter.is_empty() {
            let filter = Delimited(&self.filter, " AND ");
            fmt!(f, " WHERE " filter);
        }

        if let Some(group_by) = &self.group_by {
            fmt!(f, " GROUP BY " group_by);
        }

        if let Some(order_by) = &self.order_by {
            fmt!(f, " ORDER BY " order_by);
        }
    }
}

impl ToSql for &Insert {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let verb = if self.replace { "REPLACE" } else { "INSERT" };
        let columns = Comma(self.columns.iter().map(Ident));
        let values = Comma(self.columns.iter().map(|_| Placeholder));

        fmt!(f, verb " INTO " Ident(&self.table) " (" columns ") VALUES (" values ")");
    }
}

impl ToSql for &Update {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let assignments = Comma(self.columns.iter().map(KeyEq));
        let key = Delimited(self.key.iter().map(KeyEq), " AND ");

        fmt!(f, "UPDATE " Ident(&self.table) " SET " assignments " WHERE " key);
    }
}

impl ToSql for &Delete {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let key = Delimited(self.key.iter().map(KeyEq), " AND ");

        fmt!(f, "DELETE FROM " Ident(&self.table) " WHERE " key);
    }
}

/// `"column" = ?`
struct KeyEq<'a>(&'a String);

impl ToSql for KeyEq<'_> {
    fn to_sql(self, f: &mut Formatter<'_>) {
        fmt!(f, Ident(self.0) " = " Placeholder);
    }
}
