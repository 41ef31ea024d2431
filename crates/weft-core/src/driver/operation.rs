use crate::stmt::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Execute a SQL statement
    QuerySql(QuerySql),

    /// Transaction control
    Transaction(Transaction),
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuerySql {
    /// SQL text, placeholders already in the driver's dialect
    pub sql: String,

    /// Positional parameters
    pub params: Vec<Value>,

    /// When `true` the statement returns rows, otherwise a count
    pub ret: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transaction {
    Start,
    Commit,
    Rollback,
}

impl Operation {
    pub fn query(sql: impl Into<String>, params: Vec<Value>) -> Self {
        Self::QuerySql(QuerySql {
            sql: sql.into(),
            params,
            ret: true,
        })
    }

    pub fn execute(sql: impl Into<String>, params: Vec<Value>) -> Self {
        Self::QuerySql(QuerySql {
            sql: sql.into(),
            params,
            ret: false,
        })
    }

    pub fn as_query_sql(&self) -> Option<&QuerySql> {
        match self {
            Self::QuerySql(op) => Some(op),
            _ => None,
        }
    }
}

impl From<QuerySql> for Operation {
    fn from(value: QuerySql) -> Self {
        Self::QuerySql(value)
    }
}

impl From<Transaction> for Operation {
    fn from(value: Transaction) -> Self {
        Self::Transaction(value)
    }
}
