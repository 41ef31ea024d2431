#[derive(Debug, Clone, PartialEq)]
pub struct Insert {
    pub table: String,

    pub columns: Vec<String>,

    /// Emit `REPLACE INTO` instead of `INSERT INTO`
    pub replace: bool,
}
