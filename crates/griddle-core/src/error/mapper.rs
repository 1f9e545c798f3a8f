use super::Error;

/// Error for mapper misuse: wrong record kind for a mapper, malformed
/// schema construction, or a statement result of an unexpected shape.
#[derive(Debug)]
pub(super) struct MapperError {
    pub(super) message: String,
}

impl std::error::Error for MapperError {}

impl core::fmt::Display for MapperError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error {
    /// Creates a mapper-misuse error.
    pub fn mapper(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::Mapper(MapperError {
            message: message.into(),
        }))
    }

    /// Returns `true` if this error is a mapper-misuse error.
    pub fn is_mapper(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::Mapper(_))
    }
}
