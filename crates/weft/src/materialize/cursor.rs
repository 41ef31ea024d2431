use weft_core::{stmt::Value, Error, Result};

/// Read position within one result row.
///
/// The compiler fixes the column order; the materializer and the skip walker
/// consume it front to back through this cursor and nothing else.
#[derive(Debug)]
pub struct RowCursor<'a> {
    row: &'a [Value],
    pos: usize,
}

impl<'a> RowCursor<'a> {
    pub fn new(row: &'a [Value]) -> Self {
        Self { row, pos: 0 }
    }

    /// Take the value under the cursor and step past it.
    pub fn take(&mut self) -> Result<&'a Value> {
        let value = self.row.get(self.pos).ok_or_else(|| self.short_row(1))?;
        self.pos += 1;
        Ok(value)
    }

    /// Step past `n` values without reading them.
    pub fn advance(&mut self, n: usize) -> Result<()> {
        if self.remaining() < n {
            return Err(self.short_row(n));
        }
        self.pos += n;
        Ok(())
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.row.len() - self.pos
    }

    /// Fails unless every column was consumed.
    pub fn finish(&self) -> Result<()> {
        if self.remaining() != 0 {
            return Err(Error::model_incompatible(format!(
                "row has {} columns but only {} were consumed",
                self.row.len(),
                self.pos
            )));
        }
        Ok(())
    }

    fn short_row(&self, wanted: usize) -> Error {
        Error::model_incompatible(format!(
            "row has {} columns; needed {wanted} more at column {}",
            self.row.len(),
            self.pos
        ))
    }
}
