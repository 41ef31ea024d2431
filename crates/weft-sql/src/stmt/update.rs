#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    pub table: String,

    /// Columns assigned, one placeholder each
    pub columns: Vec<String>,

    /// Key columns matched by equality, after the assignments
    pub key: Vec<String>,
}
