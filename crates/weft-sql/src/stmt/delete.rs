#[derive(Debug, Clone, PartialEq)]
pub struct Delete {
    pub table: String,

    /// Key columns matched by equality
    pub key: Vec<String>,
}
