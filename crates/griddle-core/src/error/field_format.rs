use super::Error;

/// Error when a value cannot be coerced to its declared field type.
#[derive(Debug)]
pub(super) struct FieldFormatError {
    pub(super) model: String,
    pub(super) field: String,
    pub(super) expected: String,
}

impl std::error::Error for FieldFormatError {}

impl core::fmt::Display for FieldFormatError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "Field '{}' in '{}' must be given as {}",
            self.field, self.model, self.expected
        )
    }
}

impl Error {
    /// Creates an error for a value that failed type coercion.
    pub fn field_format(
        model: impl Into<String>,
        field: impl Into<String>,
        expected: impl Into<String>,
    ) -> Error {
        Error::from(super::ErrorKind::FieldFormat(FieldFormatError {
            model: model.into(),
            field: field.into(),
            expected: expected.into(),
        }))
    }

    /// Returns `true` if this error is a field-format error.
    pub fn is_field_format(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::FieldFormat(_))
    }
}
