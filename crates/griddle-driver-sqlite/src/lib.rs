mod value;
pub(crate) use value::Value;

use griddle_core::{
    driver::{Response, Row},
    Error, Result,
};
use rusqlite::Connection as RusqliteConnection;
use std::path::{Path, PathBuf};
use url::Url;

/// SQLite driver entry point.
#[derive(Debug)]
pub enum Sqlite {
    File(PathBuf),
    InMemory,
}

impl Sqlite {
    /// Create a new SQLite driver with an arbitrary connection URL
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url_str = url.into();
        let url = Url::parse(&url_str).map_err(Error::driver)?;

        if url.scheme() != "sqlite" {
            return Err(Error::mapper(format!(
                "connection URL does not have a `sqlite` scheme; url={}",
                url_str
            )));
        }

        if url.path() == ":memory:" {
            Ok(Self::InMemory)
        } else {
            Ok(Self::File(PathBuf::from(url.path())))
        }
    }

    /// Create an in-memory SQLite database
    pub fn in_memory() -> Self {
        Self::InMemory
    }

    /// Open a SQLite database at the specified file path
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self::File(path.as_ref().to_path_buf())
    }

    /// Open a connection to the database.
    pub fn connect(&self) -> Result<Connection> {
        match self {
            Self::File(path) => Connection::open(path),
            Self::InMemory => Connection::in_memory(),
        }
    }
}

/// A live SQLite connection implementing the execution capability.
#[derive(Debug)]
pub struct Connection {
    connection: RusqliteConnection,
}

impl Connection {
    pub fn in_memory() -> Result<Self> {
        let connection = RusqliteConnection::open_in_memory().map_err(Error::driver)?;
        Ok(Self { connection })
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = RusqliteConnection::open(path).map_err(Error::driver)?;
        Ok(Self { connection })
    }
}

impl griddle_core::Connection for Connection {
    fn exec(&mut self, sql: &str, params: &[griddle_core::Value]) -> Result<Response> {
        let mut stmt = self.connection.prepare_cached(sql).map_err(Error::driver)?;
        let params: Vec<Value> = params.iter().cloned().map(Value::from).collect();

        // Statements that produce no columns report an affected count, and
        // the rowid generated by the most recent insert rides along.
        if stmt.column_count() == 0 {
            let count = stmt
                .execute(rusqlite::params_from_iter(params.iter()))
                .map_err(Error::driver)?;
            let last_insert_id = self.connection.last_insert_rowid();

            return Ok(Response::count(count as u64)
                .with_last_insert_id((last_insert_id > 0).then_some(last_insert_id)));
        }

        let column_names: Vec<String> = stmt
            .column_names()
            .into_iter()
            .map(str::to_string)
            .collect();

        let mut rows = stmt
            .query(rusqlite::params_from_iter(params.iter()))
            .map_err(Error::driver)?;

        let mut out = Vec::new();
        loop {
            match rows.next() {
                Ok(Some(row)) => {
                    let mut fetched = Row::new();
                    for (index, name) in column_names.iter().enumerate() {
                        fetched.insert(name.clone(), Value::read(row, index)?);
                    }
                    out.push(fetched);
                }
                Ok(None) => break,
                Err(err) => return Err(Error::driver(err)),
            }
        }

        Ok(Response::rows(out))
    }
}
