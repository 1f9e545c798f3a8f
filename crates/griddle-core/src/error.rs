mod driver;
mod field_format;
mod invalid_field;
mod mapper;
mod missing_field;

use driver::DriverError;
use field_format::FieldFormatError;
use invalid_field::InvalidFieldError;
use mapper::MapperError;
use missing_field::MissingFieldError;

/// An error that can occur in Griddle.
pub struct Error {
    kind: Box<ErrorKind>,
}

#[derive(Debug)]
enum ErrorKind {
    /// An operation referenced a field name absent from the schema.
    InvalidField(InvalidFieldError),

    /// A required field was absent at save time.
    MissingField(MissingFieldError),

    /// A value could not be coerced to its declared field type.
    FieldFormat(FieldFormatError),

    /// Mapper misuse, such as saving a record through the wrong mapper.
    Mapper(MapperError),

    /// The underlying execution capability rejected or failed a statement.
    Driver(DriverError),
}

impl Error {
    fn kind(&self) -> &ErrorKind {
        &self.kind
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            kind: Box::new(kind),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.kind() {
            ErrorKind::Driver(err) => Some(err),
            _ => None,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ErrorKind::*;

        match self.kind() {
            InvalidField(err) => core::fmt::Display::fmt(err, f),
            MissingField(err) => core::fmt::Display::fmt(err, f),
            FieldFormat(err) => core::fmt::Display::fmt(err, f),
            Mapper(err) => core::fmt::Display::fmt(err, f),
            Driver(err) => core::fmt::Display::fmt(err, f),
        }
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if !f.alternate() {
            core::fmt::Display::fmt(self, f)
        } else {
            f.debug_struct("Error").field("kind", &self.kind).finish()
        }
    }
}
