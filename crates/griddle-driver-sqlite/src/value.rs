use griddle_core::{value::TIME_FORMAT, Error, Result};
use rusqlite::types::{ToSqlOutput, ValueRef};

/// Bridges library values to SQLite's data model.
#[derive(Debug)]
pub(crate) struct Value(griddle_core::Value);

impl From<griddle_core::Value> for Value {
    fn from(value: griddle_core::Value) -> Self {
        Self(value)
    }
}

impl rusqlite::ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        use griddle_core::Value as Core;

        Ok(match &self.0 {
            Core::Null => ToSqlOutput::Owned(rusqlite::types::Value::Null),
            Core::Bool(value) => {
                ToSqlOutput::Owned(rusqlite::types::Value::Integer(i64::from(*value)))
            }
            Core::I64(value) => ToSqlOutput::Owned(rusqlite::types::Value::Integer(*value)),
            Core::F64(value) => ToSqlOutput::Owned(rusqlite::types::Value::Real(*value)),
            Core::String(value) => ToSqlOutput::Borrowed(ValueRef::Text(value.as_bytes())),
            Core::Timestamp(value) => ToSqlOutput::Owned(rusqlite::types::Value::Text(
                value.format(TIME_FORMAT).to_string(),
            )),
        })
    }
}

impl Value {
    /// Reads one column from a result row.
    pub(crate) fn read(row: &rusqlite::Row<'_>, index: usize) -> Result<griddle_core::Value> {
        let value = match row.get_ref(index).map_err(Error::driver)? {
            ValueRef::Null => griddle_core::Value::Null,
            ValueRef::Integer(value) => griddle_core::Value::I64(value),
            ValueRef::Real(value) => griddle_core::Value::F64(value),
            ValueRef::Text(text) => {
                griddle_core::Value::String(String::from_utf8_lossy(text).into_owned())
            }
            ValueRef::Blob(_) => return Err(Error::driver(UnsupportedColumn("BLOB"))),
        };
        Ok(value)
    }
}

/// SQLite storage class with no counterpart in the library's value model.
#[derive(Debug)]
struct UnsupportedColumn(&'static str);

impl std::error::Error for UnsupportedColumn {}

impl std::fmt::Display for UnsupportedColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} columns are not supported", self.0)
    }
}
