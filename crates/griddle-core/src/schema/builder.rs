use super::{FieldType, Schema};
use crate::{Error, Result};

use chrono::{FixedOffset, Offset, Utc};
use indexmap::{IndexMap, IndexSet};

/// Builds and validates a [`Schema`].
///
/// Validation happens at `build` time so that every constructed schema is
/// internally consistent: fields declared, required names resolvable, a
/// usable primary key.
#[derive(Debug)]
pub struct Builder {
    model: String,
    table: Option<String>,
    fields: IndexMap<String, FieldType>,
    duplicates: Vec<String>,
    required: IndexSet<String>,
    primary_key: Option<String>,
    timezone: FixedOffset,
}

impl Builder {
    pub(crate) fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            table: None,
            fields: IndexMap::new(),
            duplicates: Vec::new(),
            required: IndexSet::new(),
            primary_key: None,
            timezone: Utc.fix(),
        }
    }

    /// Sets the table backing this record kind.
    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    /// Declares a field. Declaration order is the schema's field order.
    pub fn field(mut self, name: impl Into<String>, ty: FieldType) -> Self {
        let name = name.into();
        if self.fields.insert(name.clone(), ty).is_some() {
            self.duplicates.push(name);
        }
        self
    }

    /// Marks a declared field as required at save time.
    pub fn required(mut self, name: impl Into<String>) -> Self {
        self.required.insert(name.into());
        self
    }

    /// Overrides primary-key resolution. Without this, the first
    /// `Key`-tagged field is used, falling back to a field named `id`.
    pub fn primary_key(mut self, name: impl Into<String>) -> Self {
        self.primary_key = Some(name.into());
        self
    }

    /// Zone for parsing naive date-time text and formatting storage text.
    /// Defaults to UTC.
    pub fn timezone(mut self, timezone: FixedOffset) -> Self {
        self.timezone = timezone;
        self
    }

    pub fn build(self) -> Result<Schema> {
        let model = self.model;

        if self.fields.is_empty() {
            return Err(Error::mapper(format!(
                "schema for '{model}' declares no fields"
            )));
        }
        if let Some(duplicate) = self.duplicates.first() {
            return Err(Error::mapper(format!(
                "schema for '{model}' declares field '{duplicate}' twice"
            )));
        }
        let Some(table) = self.table else {
            return Err(Error::mapper(format!(
                "schema for '{model}' has no table name"
            )));
        };

        for field in &self.required {
            if !self.fields.contains_key(field) {
                return Err(Error::mapper(format!(
                    "required field '{field}' is not declared in schema for '{model}'"
                )));
            }
        }

        let primary_key = match self.primary_key {
            Some(name) => name,
            None => self
                .fields
                .iter()
                .find(|(_, ty)| ty.is_key())
                .map(|(name, _)| name.clone())
                .or_else(|| self.fields.contains_key("id").then(|| "id".to_string()))
                .ok_or_else(|| {
                    Error::mapper(format!(
                        "schema for '{model}' has no primary key; tag a field as \
                         FieldType::Key or declare an 'id' field"
                    ))
                })?,
        };

        match self.fields.get(&primary_key) {
            None => {
                return Err(Error::mapper(format!(
                    "primary key '{primary_key}' is not declared in schema for '{model}'"
                )));
            }
            Some(FieldType::Key | FieldType::Int) => {}
            Some(_) => {
                return Err(Error::mapper(format!(
                    "primary key '{primary_key}' in schema for '{model}' must be an \
                     integer field"
                )));
            }
        }

        // The key is never client-assigned, so requiring it would fail
        // every insert's validation.
        if self.required.contains(&primary_key) {
            return Err(Error::mapper(format!(
                "primary key '{primary_key}' cannot be a required field in schema \
                 for '{model}'"
            )));
        }

        Ok(Schema {
            model,
            table,
            fields: self.fields,
            required: self.required,
            primary_key,
            timezone: self.timezone,
        })
    }
}
