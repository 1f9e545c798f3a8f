mod builder;
pub use builder::Builder;

use crate::{
    value::{Value, TIME_FORMAT},
    Error, Result,
};

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use indexmap::{IndexMap, IndexSet};

/// Field type tag. Drives both value coercion and the DDL column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// Auto-incremented integer primary key
    Key,

    /// Signed integer
    Int,

    /// Text
    String,

    /// Floating point number
    Float,

    /// Boolean
    Bool,

    /// Instant in time
    Time,
}

impl FieldType {
    pub const fn is_key(self) -> bool {
        matches!(self, Self::Key)
    }

    /// Accepted input shape, for field-format error messages.
    fn expected(self) -> &'static str {
        match self {
            Self::Key | Self::Int => "an integer",
            Self::String => "text",
            Self::Float => "a number",
            Self::Bool => "a boolean",
            Self::Time => "a unix timestamp or parseable date-time text",
        }
    }
}

/// The declared shape of one record kind: its table, its ordered fields,
/// which of them are required, and which one is the primary key.
///
/// Schemas are immutable once built; see [`Schema::builder`].
#[derive(Debug)]
pub struct Schema {
    model: String,
    table: String,
    fields: IndexMap<String, FieldType>,
    required: IndexSet<String>,
    primary_key: String,
    timezone: FixedOffset,
}

impl Schema {
    /// Starts building a schema for the named record kind.
    pub fn builder(model: impl Into<String>) -> Builder {
        Builder::new(model)
    }

    /// Name of the record kind, used in error messages.
    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn primary_key(&self) -> &str {
        &self.primary_key
    }

    /// Zone applied when parsing naive date-time text and when formatting
    /// storage text.
    pub fn timezone(&self) -> &FixedOffset {
        &self.timezone
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn field_type(&self, field: &str) -> Option<FieldType> {
        self.fields.get(field).copied()
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> impl ExactSizeIterator<Item = (&str, FieldType)> + '_ {
        self.fields.iter().map(|(name, ty)| (name.as_str(), *ty))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Required field names in declaration order.
    pub fn required(&self) -> impl Iterator<Item = &str> {
        self.required.iter().map(String::as_str)
    }

    pub fn is_required(&self, field: &str) -> bool {
        self.required.contains(field)
    }

    /// Normalizes a raw value to the field's declared type.
    ///
    /// This is the single input-side coercion point: `Record::set`, batch
    /// import, and row hydration all pass through here. Null passes through
    /// for every tag. Fails with `InvalidField` for undeclared names and
    /// `FieldFormat` for values that do not fit the tag.
    pub fn coerce(&self, field: &str, value: Value) -> Result<Value> {
        let Some(ty) = self.field_type(field) else {
            return Err(Error::invalid_field(&self.model, field));
        };

        if value.is_null() {
            return Ok(Value::Null);
        }

        match ty {
            FieldType::Key | FieldType::Int => self.coerce_int(field, ty, value),
            FieldType::String => Ok(self.coerce_string(value)),
            FieldType::Float => self.coerce_float(field, ty, value),
            FieldType::Bool => self.coerce_bool(field, ty, value),
            FieldType::Time => self.coerce_time(field, ty, value),
        }
    }

    fn coerce_int(&self, field: &str, ty: FieldType, value: Value) -> Result<Value> {
        match value {
            Value::I64(v) => Ok(Value::I64(v)),
            Value::Bool(v) => Ok(Value::I64(i64::from(v))),
            Value::F64(v) if v.fract() == 0.0 => Ok(Value::I64(v as i64)),
            Value::String(s) => s
                .trim()
                .parse::<i64>()
                .map(Value::I64)
                .map_err(|_| self.format_err(field, ty)),
            _ => Err(self.format_err(field, ty)),
        }
    }

    fn coerce_string(&self, value: Value) -> Value {
        match value {
            Value::String(s) => Value::String(s),
            Value::I64(v) => Value::String(v.to_string()),
            Value::F64(v) => Value::String(v.to_string()),
            Value::Bool(v) => Value::String(if v { "1" } else { "0" }.to_string()),
            Value::Timestamp(ts) => Value::String(
                ts.with_timezone(&self.timezone)
                    .format(TIME_FORMAT)
                    .to_string(),
            ),
            Value::Null => Value::Null,
        }
    }

    fn coerce_float(&self, field: &str, ty: FieldType, value: Value) -> Result<Value> {
        match value {
            Value::F64(v) => Ok(Value::F64(v)),
            Value::I64(v) => Ok(Value::F64(v as f64)),
            Value::Bool(v) => Ok(Value::F64(if v { 1.0 } else { 0.0 })),
            Value::String(s) => s
                .trim()
                .parse::<f64>()
                .map(Value::F64)
                .map_err(|_| self.format_err(field, ty)),
            _ => Err(self.format_err(field, ty)),
        }
    }

    fn coerce_bool(&self, field: &str, ty: FieldType, value: Value) -> Result<Value> {
        match value {
            Value::Bool(v) => Ok(Value::Bool(v)),
            Value::I64(0) => Ok(Value::Bool(false)),
            Value::I64(1) => Ok(Value::Bool(true)),
            Value::String(s) => match s.trim() {
                "1" => Ok(Value::Bool(true)),
                "0" => Ok(Value::Bool(false)),
                other if other.eq_ignore_ascii_case("true") => Ok(Value::Bool(true)),
                other if other.eq_ignore_ascii_case("false") => Ok(Value::Bool(false)),
                _ => Err(self.format_err(field, ty)),
            },
            _ => Err(self.format_err(field, ty)),
        }
    }

    fn coerce_time(&self, field: &str, ty: FieldType, value: Value) -> Result<Value> {
        match value {
            Value::Timestamp(ts) => Ok(Value::Timestamp(ts)),
            Value::I64(secs) => DateTime::from_timestamp(secs, 0)
                .map(Value::Timestamp)
                .ok_or_else(|| self.format_err(field, ty)),
            Value::F64(secs) => DateTime::from_timestamp(secs as i64, 0)
                .map(Value::Timestamp)
                .ok_or_else(|| self.format_err(field, ty)),
            Value::String(s) => self
                .parse_time(&s)
                .map(Value::Timestamp)
                .ok_or_else(|| self.format_err(field, ty)),
            _ => Err(self.format_err(field, ty)),
        }
    }

    /// Accepts epoch-second text, RFC 3339, canonical date-time text, and
    /// bare dates. Naive forms resolve in the schema's configured zone.
    fn parse_time(&self, s: &str) -> Option<DateTime<Utc>> {
        let s = s.trim();

        if let Ok(secs) = s.parse::<i64>() {
            return DateTime::from_timestamp(secs, 0);
        }
        if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
            return Some(ts.with_timezone(&Utc));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, TIME_FORMAT) {
            return self.resolve_local(naive);
        }
        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return self.resolve_local(date.and_hms_opt(0, 0, 0)?);
        }

        None
    }

    fn resolve_local(&self, naive: NaiveDateTime) -> Option<DateTime<Utc>> {
        self.timezone
            .from_local_datetime(&naive)
            .single()
            .map(|ts| ts.with_timezone(&Utc))
    }

    fn format_err(&self, field: &str, ty: FieldType) -> Error {
        Error::field_format(&self.model, field, ty.expected())
    }
}
