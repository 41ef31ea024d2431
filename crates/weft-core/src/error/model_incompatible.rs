use super::Error;

/// Error when the rows returned by the database contradict the schema.
///
/// This occurs when:
/// - Rows sharing a parent disagree on the key of a one-to-one child
/// - A link that is not nullable produced a null-padded (outer joined) row
/// - A by-key load returned more than one distinct root
/// - A row is shorter or longer than the columns the schema describes
#[derive(Debug)]
pub(super) struct ModelIncompatible {
    message: Box<str>,
}

impl std::error::Error for ModelIncompatible {}

impl core::fmt::Display for ModelIncompatible {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "model incompatible: {}", self.message)
    }
}

impl Error {
    /// Creates a model incompatibility error.
    pub fn model_incompatible(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::ModelIncompatible(ModelIncompatible {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is a model incompatibility error.
    pub fn is_model_incompatible(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::ModelIncompatible(_))
    }
}
