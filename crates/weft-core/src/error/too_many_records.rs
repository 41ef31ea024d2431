use super::Error;

/// A single-result lookup matched more than one root entity.
#[derive(Debug)]
pub(super) struct TooManyRecordsError {
    entity_type: Box<str>,
    found: usize,
}

impl std::error::Error for TooManyRecordsError {}

impl core::fmt::Display for TooManyRecordsError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "too many records: expected at most one `{}`, found {}",
            self.entity_type, self.found
        )
    }
}

impl Error {
    /// Creates a too many records error for a lookup on `entity_type` that
    /// matched `found` distinct keys.
    pub fn too_many_records(entity_type: impl Into<String>, found: usize) -> Error {
        Error::from(super::ErrorKind::TooManyRecords(TooManyRecordsError {
            entity_type: entity_type.into().into(),
            found,
        }))
    }

    pub fn is_too_many_records(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::TooManyRecords(_))
    }
}
