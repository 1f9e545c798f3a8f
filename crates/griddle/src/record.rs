use griddle_core::{driver::Row, Error, Result, Schema, Value};

use indexmap::IndexMap;
use std::sync::Arc;

/// An in-memory representation of one table row.
///
/// Values live in two layers: `persisted` mirrors the last known database
/// state, `pending` holds fields written since construction or load. Reads
/// resolve pending first, so a record always shows its latest values while
/// the mapper can still extract the minimal set of columns an UPDATE must
/// touch.
///
/// A freshly constructed record is unsaved: both layers are empty and its
/// primary key reads as null until a mapper assigns one.
#[derive(Debug, Clone)]
pub struct Record {
    schema: Arc<Schema>,
    persisted: IndexMap<String, Value>,
    pending: IndexMap<String, Value>,
}

impl Record {
    /// Creates an empty, unsaved record of the given schema.
    pub fn new(schema: Arc<Schema>) -> Self {
        Self {
            schema,
            persisted: IndexMap::new(),
            pending: IndexMap::new(),
        }
    }

    /// Hydrates a record from a fetched row.
    ///
    /// Declared columns are coerced to their field types and land in
    /// persisted state; columns the schema does not declare are skipped.
    pub fn from_row(schema: Arc<Schema>, row: Row) -> Result<Self> {
        let mut persisted = IndexMap::new();

        for (column, value) in row {
            if !schema.contains(&column) {
                continue;
            }
            let value = schema.coerce(&column, value)?;
            persisted.insert(column, value);
        }

        Ok(Self {
            schema,
            persisted,
            pending: IndexMap::new(),
        })
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// The value a read resolves to: pending first, then persisted.
    fn visible(&self, field: &str) -> Option<&Value> {
        self.pending
            .get(field)
            .or_else(|| self.persisted.get(field))
    }

    /// Reads a field, resolving to null when declared but unset.
    pub fn get(&self, field: &str) -> Result<Value> {
        if !self.schema.contains(field) {
            return Err(Error::invalid_field(self.schema.model(), field));
        }
        Ok(self.visible(field).cloned().unwrap_or(Value::Null))
    }

    /// Writes a field, coercing the value to its declared type.
    ///
    /// Setting a field to its current visible value is not a modification
    /// and leaves the dirty set untouched.
    pub fn set(&mut self, field: &str, value: impl Into<Value>) -> Result<()> {
        let value = self.schema.coerce(field, value.into())?;

        let unchanged = match self.visible(field) {
            Some(current) => *current == value,
            None => value.is_null(),
        };
        if unchanged {
            return Ok(());
        }

        self.pending.insert(field.to_string(), value);
        Ok(())
    }

    /// Clears a field, equivalent to setting it to null.
    pub fn unset(&mut self, field: &str) -> Result<()> {
        self.set(field, Value::Null)
    }

    /// True iff the field resolves to a non-null value.
    pub fn has(&self, field: &str) -> bool {
        self.visible(field).is_some_and(|value| !value.is_null())
    }

    /// Merges raw field values into the record, coercing each the way
    /// [`set`](Self::set) does. Chainable.
    pub fn import<I, K, V>(&mut self, values: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        for (field, value) in values {
            self.set(field.as_ref(), value)?;
        }
        Ok(self)
    }

    /// Full storage-form snapshot: persisted merged with pending, pending
    /// winning on conflict. Time values become canonical text.
    pub fn to_map(&self) -> IndexMap<String, Value> {
        let tz = self.schema.timezone();
        let mut out = IndexMap::new();

        for (field, value) in self.persisted.iter().chain(self.pending.iter()) {
            out.insert(field.clone(), value.to_storage(tz));
        }
        out
    }

    /// Storage-form snapshot of pending fields only, the minimal column set
    /// an UPDATE must touch.
    pub fn updated_fields(&self) -> IndexMap<String, Value> {
        let tz = self.schema.timezone();
        self.pending
            .iter()
            .map(|(field, value)| (field.clone(), value.to_storage(tz)))
            .collect()
    }

    /// Default before-save validation: every required field must resolve to
    /// a non-null value.
    pub fn check_required(&self) -> Result<()> {
        for field in self.schema.required() {
            if !self.has(field) {
                return Err(Error::missing_field(self.schema.model(), field));
            }
        }
        Ok(())
    }

    /// Commits pending values into persisted state, establishing the clean
    /// post-save state. Idempotent once pending is empty.
    pub fn commit(&mut self) {
        let pending = std::mem::take(&mut self.pending);
        for (field, value) in pending {
            self.persisted.insert(field, value);
        }
    }

    /// Writes a store-confirmed value straight into persisted state,
    /// bypassing dirty tracking.
    pub(crate) fn set_persisted(&mut self, field: &str, value: Value) {
        self.pending.shift_remove(field);
        self.persisted.insert(field.to_string(), value);
    }

    /// Schema-ordered `(field, value)` cursor using `get` semantics.
    /// Restartable: each call starts a fresh pass.
    pub fn fields(&self) -> Fields<'_> {
        Fields {
            record: self,
            pos: 0,
        }
    }
}

impl<'a> IntoIterator for &'a Record {
    type Item = (&'a str, Value);
    type IntoIter = Fields<'a>;

    fn into_iter(self) -> Fields<'a> {
        self.fields()
    }
}

/// Lazy cursor over a record's fields in schema declaration order.
#[derive(Debug)]
pub struct Fields<'a> {
    record: &'a Record,
    pos: usize,
}

impl<'a> Iterator for Fields<'a> {
    type Item = (&'a str, Value);

    fn next(&mut self) -> Option<Self::Item> {
        let (field, _) = self.record.schema.fields().nth(self.pos)?;
        self.pos += 1;

        let value = self.record.visible(field).cloned().unwrap_or(Value::Null);
        Some((field, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.record.schema.len().saturating_sub(self.pos);
        (remaining, Some(remaining))
    }
}
