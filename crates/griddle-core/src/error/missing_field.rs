use super::Error;

/// Error when a required field is absent at save time.
#[derive(Debug)]
pub(super) struct MissingFieldError {
    pub(super) model: String,
    pub(super) field: String,
}

impl std::error::Error for MissingFieldError {}

impl core::fmt::Display for MissingFieldError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "Required field '{}' missing from '{}'",
            self.field, self.model
        )
    }
}

impl Error {
    /// Creates an error for a required field that is unset at save time.
    pub fn missing_field(model: impl Into<String>, field: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::MissingField(MissingFieldError {
            model: model.into(),
            field: field.into(),
        }))
    }

    /// Returns `true` if this error is a missing-required-field error.
    pub fn is_missing_field(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::MissingField(_))
    }
}
