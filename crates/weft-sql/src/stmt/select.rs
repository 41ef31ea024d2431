use super::{ColumnRef, Filter, Join, TableRef};

#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    /// Select list, in the order the row materializer consumes it
    pub columns: Vec<ColumnRef>,

    pub from: TableRef,

    /// Joins in emission order; each `ON` binds to its own join
    pub joins: Vec<Join>,

    /// ANDed together
    pub filter: Vec<Filter>,

    pub group_by: Option<String>,

    pub order_by: Option<String>,
}
