/// A physical column and the logical field it populates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Name of the column in the table
    pub name: String,

    /// Name of the field on materialized nodes
    pub field: String,
}

impl Column {
    pub fn new(name: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field: field.into(),
        }
    }
}
