use super::Error;

/// Error when an operation references a field name that is not declared in
/// the record's schema.
#[derive(Debug)]
pub(super) struct InvalidFieldError {
    pub(super) model: String,
    pub(super) field: String,
}

impl std::error::Error for InvalidFieldError {}

impl core::fmt::Display for InvalidFieldError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "Field '{}' does not exist in '{}'",
            self.field, self.model
        )
    }
}

impl Error {
    /// Creates an error for an access to an undeclared field.
    pub fn invalid_field(model: impl Into<String>, field: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidField(InvalidFieldError {
            model: model.into(),
            field: field.into(),
        }))
    }

    /// Returns `true` if this error is an invalid-field error.
    pub fn is_invalid_field(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidField(_))
    }
}
