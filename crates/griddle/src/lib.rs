//! A lightweight record/mapper layer for SQL stores.
//!
//! A [`Record`] holds one row's worth of typed field values and tracks
//! which of them changed since the record was loaded. A [`Mapper`]
//! translates records into parameterized SQL against a caller-supplied
//! [`Connection`], hydrating query results back into records.
//!
//! ```
//! use griddle::{FieldType, Record, Schema};
//! use std::sync::Arc;
//!
//! # fn main() -> griddle::Result<()> {
//! let schema = Arc::new(
//!     Schema::builder("TVShow")
//!         .table("tv_show")
//!         .field("id", FieldType::Key)
//!         .field("title", FieldType::String)
//!         .field("points_worth", FieldType::Int)
//!         .required("title")
//!         .required("points_worth")
//!         .build()?,
//! );
//!
//! let mut show = Record::new(schema);
//! show.set("title", "Pilot")?;
//! show.set("points_worth", 10)?;
//!
//! assert_eq!(show.get("title")?.as_str(), Some("Pilot"));
//! assert_eq!(show.updated_fields().len(), 2);
//! # Ok(())
//! # }
//! ```
//!
//! Saving goes through a mapper bound to the same schema:
//!
//! ```ignore
//! let connection = griddle::Sqlite::in_memory().connect()?;
//! let mut mapper = Mapper::new(schema, connection);
//! let id = mapper.save(&mut show)?;
//! let loaded = mapper.fetch(id)?;
//! ```

mod mapper;
pub use mapper::Mapper;

mod model;
pub use model::Model;

mod record;
pub use record::{Fields, Record};

pub use griddle_core::{driver, schema, value, Connection, Error, FieldType, Result, Schema, Value};

/// Primary-key value marking a record as not currently persisted.
pub const UNSAVED_KEY: i64 = -1;

#[cfg(feature = "sqlite")]
pub use griddle_driver_sqlite as sqlite;
#[cfg(feature = "sqlite")]
pub use griddle_driver_sqlite::Sqlite;
