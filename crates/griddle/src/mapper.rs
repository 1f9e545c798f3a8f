use crate::{model::Model, record::Record, UNSAVED_KEY};
use griddle_core::{
    driver::{Response, Row},
    Connection, Error, Result, Schema, Value,
};
use griddle_sql::Serializer;

use std::{collections::HashMap, sync::Arc};

/// Translates record operations into SQL statements against one table.
///
/// A mapper is bound to one schema and holds the caller-supplied execution
/// capability. It never retains the records passed to its operations.
#[derive(Debug)]
pub struct Mapper<C> {
    schema: Arc<Schema>,
    connection: C,
}

impl<C: Connection> Mapper<C> {
    pub fn new(schema: Arc<Schema>, connection: C) -> Self {
        Self { schema, connection }
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Gives the execution capability back to the caller.
    pub fn into_connection(self) -> C {
        self.connection
    }

    fn serializer(&self) -> Serializer<'_> {
        Serializer::new(&self.schema)
    }

    /// Runs one statement. When the store rejects it, the SQL text and
    /// bound arguments are logged before the failure is re-raised.
    fn execute(&mut self, sql: &str, params: &[Value]) -> Result<Response> {
        match self.connection.exec(sql, params) {
            Ok(response) => Ok(response),
            Err(err) => {
                tracing::error!(sql, ?params, "statement failed");
                Err(err)
            }
        }
    }

    fn check_kind(&self, record: &Record) -> Result<()> {
        if Arc::ptr_eq(&self.schema, record.schema()) {
            return Ok(());
        }
        if record.schema().model() != self.schema.model() {
            return Err(Error::mapper(format!(
                "cannot use a '{}' record with the '{}' mapper",
                record.schema().model(),
                self.schema.model(),
            )));
        }
        Ok(())
    }

    /// Current primary-key value of a record, if it is an integer.
    fn key_of(&self, record: &Record) -> Result<Option<i64>> {
        Ok(record.get(self.schema.primary_key())?.as_i64())
    }

    /// Fetches one record by primary key.
    pub fn fetch(&mut self, id: i64) -> Result<Option<Record>> {
        let sql = self.serializer().select_by_key();
        let response = self.execute(&sql, &[Value::I64(id)])?;

        rows_of(response)?
            .into_iter()
            .next()
            .map(|row| Record::from_row(self.schema.clone(), row))
            .transpose()
    }

    /// Fetches many records in one query, keyed by each row's primary-key
    /// value. Row order is determined by the store.
    pub fn fetch_batch(&mut self, ids: &[i64]) -> Result<HashMap<i64, Record>> {
        // An empty id set would produce a malformed `IN ()` clause; it also
        // needs no round trip at all.
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let sql = self.serializer().select_by_keys(ids.len());
        let params: Vec<Value> = ids.iter().copied().map(Value::I64).collect();
        let response = self.execute(&sql, &params)?;

        let rows = rows_of(response)?;
        let mut out = HashMap::with_capacity(rows.len());

        for row in rows {
            let record = Record::from_row(self.schema.clone(), row)?;
            let Some(id) = self.key_of(&record)? else {
                return Err(Error::mapper(format!(
                    "row in '{}' is missing its primary key",
                    self.schema.table()
                )));
            };
            out.insert(id, record);
        }
        Ok(out)
    }

    /// Fetches one page of records in store order.
    pub fn fetch_page(&mut self, page: u64, page_size: u64) -> Result<Vec<Record>> {
        let offset = page.saturating_mul(page_size);
        let sql = self.serializer().select_page(offset, page_size);
        let response = self.execute(&sql, &[])?;

        rows_of(response)?
            .into_iter()
            .map(|row| Record::from_row(self.schema.clone(), row))
            .collect()
    }

    /// Runs an arbitrary query and hydrates every returned row as a record
    /// of this mapper's kind. The building block for kind-specific finders.
    pub fn query_records(&mut self, sql: &str, params: &[Value]) -> Result<Vec<Record>> {
        let response = self.execute(sql, params)?;

        rows_of(response)?
            .into_iter()
            .map(|row| Record::from_row(self.schema.clone(), row))
            .collect()
    }

    /// Like [`query_records`](Self::query_records), keeping only the first
    /// returned row.
    pub fn query_record(&mut self, sql: &str, params: &[Value]) -> Result<Option<Record>> {
        let response = self.execute(sql, params)?;

        rows_of(response)?
            .into_iter()
            .next()
            .map(|row| Record::from_row(self.schema.clone(), row))
            .transpose()
    }

    /// Saves a record, inserting or updating based on its primary key.
    ///
    /// A key that is null or not positive means the record has never been
    /// persisted: the full field map is inserted and the store-generated
    /// key is written back. A positive key updates exactly the dirty
    /// fields. Either way the key column itself is never client-assigned.
    /// An empty write set is a no-op. Returns the record's key.
    pub fn save(&mut self, record: &mut impl Model) -> Result<i64> {
        record.before_save()?;
        self.check_kind(record.record())?;

        let schema = self.schema.clone();
        let key = schema.primary_key();

        let current = record.record().get(key)?.as_i64();
        let is_insert = current.map_or(true, |id| id <= 0);

        let mut fields = if is_insert {
            record.record().to_map()
        } else {
            record.record().updated_fields()
        };
        fields.shift_remove(key);

        if fields.is_empty() {
            return Ok(current.unwrap_or(UNSAVED_KEY));
        }

        let columns: Vec<&str> = fields.keys().map(String::as_str).collect();
        let mut params: Vec<Value> = fields.values().cloned().collect();

        let sql = if is_insert {
            self.serializer().insert(&columns)
        } else {
            // The WHERE binding rides after the assignments.
            params.push(Value::I64(current.unwrap_or(UNSAVED_KEY)));
            self.serializer().update(&columns)
        };

        let response = self.execute(&sql, &params)?;

        if is_insert {
            if let Some(id) = response.last_insert_id.filter(|id| *id > 0) {
                record.record_mut().set_persisted(key, Value::I64(id));
            }
        }

        record.after_save();
        Ok(self.key_of(record.record())?.unwrap_or(UNSAVED_KEY))
    }

    /// Saves many records, combining the never-persisted ones into a single
    /// bulk upsert.
    ///
    /// Records with a positive key are routed through [`save`](Self::save)
    /// individually. The first new record's dirty field set is the
    /// authoritative column list for the whole bulk statement, so batches
    /// are expected to be homogeneous; a record missing one of those
    /// columns contributes null. A record failing its required-field check
    /// is logged and skipped rather than aborting the batch. Returns the
    /// affected-row count the store reported for the bulk statement.
    ///
    /// Records written through the bulk path do not receive generated keys
    /// and their save hooks do not run; use `save` when those matter.
    pub fn save_batch<M: Model>(&mut self, records: &mut [M]) -> Result<u64> {
        if records.is_empty() {
            return Ok(0);
        }

        let schema = self.schema.clone();
        let key = schema.primary_key();

        let mut columns: Option<Vec<String>> = None;
        let mut params: Vec<Value> = Vec::new();
        let mut batched = 0;

        for record in records.iter_mut() {
            self.check_kind(record.record())?;

            if let Err(err) = record.record().check_required() {
                tracing::warn!(error = %err, "skipping record in batch save");
                continue;
            }

            if self.key_of(record.record())?.is_some_and(|id| id > 0) {
                self.save(record)?;
                continue;
            }

            let updated = record.record().updated_fields();

            if columns.is_none() {
                let derived: Vec<String> = updated
                    .keys()
                    .filter(|field| field.as_str() != key)
                    .cloned()
                    .collect();
                if !derived.is_empty() {
                    columns = Some(derived);
                }
            }
            let Some(columns) = columns.as_ref() else {
                tracing::warn!(
                    model = schema.model(),
                    "skipping empty record in batch save"
                );
                continue;
            };

            for column in columns {
                params.push(updated.get(column).cloned().unwrap_or(Value::Null));
            }
            batched += 1;
        }

        let Some(columns) = columns else {
            return Ok(0);
        };

        let column_refs: Vec<&str> = columns.iter().map(String::as_str).collect();
        let sql = self.serializer().replace_batch(&column_refs, batched);
        let response = self.execute(&sql, &params)?;
        Ok(response.affected())
    }

    /// Deletes a record's row and resets its key to the unsaved sentinel.
    /// Returns whether at least one row was removed.
    pub fn trash(&mut self, record: &mut impl Model) -> Result<bool> {
        record.before_trash()?;

        let schema = self.schema.clone();
        let id = record.record().get(schema.primary_key())?;

        let sql = self.serializer().delete();
        let response = self.execute(&sql, &[id])?;

        record.after_trash();
        record
            .record_mut()
            .set_persisted(schema.primary_key(), Value::I64(UNSAVED_KEY));

        Ok(response.affected() > 0)
    }

    /// `CREATE TABLE` DDL for this mapper's schema.
    pub fn table_sql(&self) -> String {
        self.serializer().create_table()
    }

    /// Creates the backing table. Convenience for demos and tests.
    pub fn create_table(&mut self) -> Result<()> {
        let sql = self.table_sql();
        self.execute(&sql, &[])?;
        Ok(())
    }
}

fn rows_of(response: Response) -> Result<Vec<Row>> {
    response
        .into_rows()
        .ok_or_else(|| Error::mapper("statement did not return rows"))
}
