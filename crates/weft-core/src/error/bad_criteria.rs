use super::Error;

/// Error when a criteria map is malformed, e.g. a fragment whose placeholder
/// count does not match the number of values bound to it.
#[derive(Debug)]
pub(super) struct BadCriteria {
    message: Box<str>,
}

impl std::error::Error for BadCriteria {}

impl core::fmt::Display for BadCriteria {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "bad criteria: {}", self.message)
    }
}

impl Error {
    /// Creates a bad criteria error.
    pub fn bad_criteria(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::BadCriteria(BadCriteria {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is a bad criteria error.
    pub fn is_bad_criteria(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::BadCriteria(_))
    }
}
