use super::{ColumnRef, TableRef};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Join {
    pub kind: JoinKind,

    pub table: TableRef,

    /// Equalities ANDed together in the `ON` clause, `(parent, child)`
    pub on: Vec<(ColumnRef, ColumnRef)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    LeftOuter,
}

impl JoinKind {
    pub fn is_outer(self) -> bool {
        matches!(self, Self::LeftOuter)
    }
}
