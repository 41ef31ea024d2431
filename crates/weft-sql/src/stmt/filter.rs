use super::ColumnRef;

/// One conjunct of a WHERE clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// `column = ?`
    Eq(ColumnRef),

    /// Caller supplied SQL. Each `?` outside a quoted span becomes the next
    /// placeholder.
    Raw(String),
}

/// Byte offsets of the `?` markers in `sql`, skipping any inside single
/// quoted literals or double quoted identifiers. Doubled quotes (`''`) close
/// and reopen the span, so they need no special handling.
pub(crate) fn placeholder_offsets(sql: &str) -> Vec<usize> {
    let mut offsets = vec![];
    let mut quote = None;

    for (offset, c) in sql.char_indices() {
        match quote {
            Some(open) if c == open => quote = None,
            Some(_) => {}
            None if c == '\'' || c == '"' => quote = Some(c),
            None if c == '?' => offsets.push(offset),
            None => {}
        }
    }

    offsets
}
