mod column_ref;
pub use column_ref::ColumnRef;

mod delete;
pub use delete::Delete;

mod filter;
pub use filter::Filter;
pub(crate) use filter::placeholder_offsets;

mod insert;
pub use insert::Insert;

mod join;
pub use join::{Join, JoinKind};

mod select;
pub use select::Select;

mod table_ref;
pub use table_ref::TableRef;

mod update;
pub use update::Update;

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Query(Select),
    Insert(Insert),
    Update(Update),
    Delete(Delete),
}

impl Statement {
    pub fn is_query(&self) -> bool {
        matches!(self, Self::Query(_))
    }
}

impl From<Select> for Statement {
    fn from(value: Select) -> Self {
        Self::Query(value)
    }
}

impl From<Insert> for Statement {
    fn from(value: Insert) -> Self {
        Self::Insert(value)
    }
}

impl From<Update> for Statement {
    fn from(value: Update) -> Self {
        Self::Update(value)
    }
}

impl From<Delete> for Statement {
    fn from(value: Delete) -> Self {
        Self::Delete(value)
    }
}
