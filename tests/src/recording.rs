use griddle_core::{driver::Response, Connection, Result, Value};
use std::sync::{Arc, Mutex};

/// One executed statement: the SQL text and the values bound to it.
#[derive(Debug, Clone)]
pub struct ExecutedStatement {
    pub sql: String,
    pub params: Vec<Value>,
}

/// A `Connection` wrapper that records every statement passing through it,
/// so tests can assert on the exact SQL the mapper produced.
#[derive(Debug)]
pub struct RecordingConnection<C> {
    inner: C,
    log: Arc<Mutex<Vec<ExecutedStatement>>>,
}

impl<C> RecordingConnection<C> {
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get a handle to access the recorded statements
    pub fn log(&self) -> Recording {
        Recording {
            statements: self.log.clone(),
        }
    }
}

impl<C: Connection> Connection for RecordingConnection<C> {
    fn exec(&mut self, sql: &str, params: &[Value]) -> Result<Response> {
        self.log
            .lock()
            .expect("recording lock is not poisoned")
            .push(ExecutedStatement {
                sql: sql.to_string(),
                params: params.to_vec(),
            });

        self.inner.exec(sql, params)
    }
}

/// A wrapper around the statement log that provides a clean API for tests
#[derive(Debug, Clone)]
pub struct Recording {
    statements: Arc<Mutex<Vec<ExecutedStatement>>>,
}

impl Recording {
    pub fn len(&self) -> usize {
        self.statements.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.lock().unwrap().is_empty()
    }

    pub fn clear(&self) {
        self.statements.lock().unwrap().clear();
    }

    /// The most recently executed statement
    pub fn last(&self) -> Option<ExecutedStatement> {
        self.statements.lock().unwrap().last().cloned()
    }

    /// All recorded SQL texts, oldest first
    pub fn sql(&self) -> Vec<String> {
        self.statements
            .lock()
            .unwrap()
            .iter()
            .map(|statement| statement.sql.clone())
            .collect()
    }

    /// Check if any statement matches the given predicate
    pub fn any<F>(&self, predicate: F) -> bool
    where
        F: Fn(&ExecutedStatement) -> bool,
    {
        self.statements
            .lock()
            .unwrap()
            .iter()
            .any(|statement| predicate(statement))
    }
}
