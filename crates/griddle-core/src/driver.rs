mod response;
pub use response::{Response, Row, Rows};

use crate::{value::Value, Result};

use std::fmt::Debug;

/// A synchronous query-execution capability.
///
/// This is the seam between the mapper layer and the actual store: one
/// parameterized statement in, one [`Response`] out. Implementations block
/// the caller until the store responds. The connection's lifecycle
/// (open/close) belongs to the caller; the core never constructs or tears
/// one down.
pub trait Connection: Debug {
    /// Execute a single parameterized statement.
    fn exec(&mut self, sql: &str, params: &[Value]) -> Result<Response>;
}

impl<C: Connection + ?Sized> Connection for &mut C {
    fn exec(&mut self, sql: &str, params: &[Value]) -> Result<Response> {
        (**self).exec(sql, params)
    }
}

impl<C: Connection + ?Sized> Connection for Box<C> {
    fn exec(&mut self, sql: &str, params: &[Value]) -> Result<Response> {
        (**self).exec(sql, params)
    }
}
