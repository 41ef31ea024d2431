use super::Error;

/// Error when a caller supplies a parameter value of an unsupported type, or
/// the wrong number of key components.
#[derive(Debug)]
pub(super) struct BadParameter {
    message: Box<str>,
}

impl std::error::Error for BadParameter {}

impl core::fmt::Display for BadParameter {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "bad parameter: {}", self.message)
    }
}

impl Error {
    /// Creates a bad parameter error.
    pub fn bad_parameter(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::BadParameter(BadParameter {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is a bad parameter error.
    pub fn is_bad_parameter(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::BadParameter(_))
    }
}
