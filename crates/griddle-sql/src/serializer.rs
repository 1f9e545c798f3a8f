mod ident;
use ident::Ident;

use griddle_core::{FieldType, Schema};

/// Serializes mapper operations against one schema into SQL text.
///
/// Statements use positional `?` placeholders; the caller binds values in
/// the order it supplied columns. LIMIT values are interpolated from
/// unsigned integers rather than bound, since some drivers refuse LIMIT as
/// a parameter.
#[derive(Debug)]
pub struct Serializer<'a> {
    schema: &'a Schema,
}

impl<'a> Serializer<'a> {
    pub fn new(schema: &'a Schema) -> Self {
        Self { schema }
    }

    pub fn select_by_key(&self) -> String {
        format!(
            "SELECT * FROM {} WHERE {}=?",
            Ident(self.schema.table()),
            Ident(self.schema.primary_key())
        )
    }

    pub fn select_by_keys(&self, count: usize) -> String {
        format!(
            "SELECT * FROM {} WHERE {} IN ({})",
            Ident(self.schema.table()),
            Ident(self.schema.primary_key()),
            placeholders(count)
        )
    }

    pub fn select_page(&self, offset: u64, limit: u64) -> String {
        format!(
            "SELECT * FROM {} LIMIT {offset},{limit}",
            Ident(self.schema.table())
        )
    }

    pub fn insert(&self, columns: &[&str]) -> String {
        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            Ident(self.schema.table()),
            column_list(columns),
            placeholders(columns.len())
        )
    }

    pub fn update(&self, columns: &[&str]) -> String {
        let assignments: Vec<String> = columns
            .iter()
            .map(|column| format!("{}=?", Ident(column)))
            .collect();

        format!(
            "UPDATE {} SET {} WHERE {}=?",
            Ident(self.schema.table()),
            assignments.join(","),
            Ident(self.schema.primary_key())
        )
    }

    pub fn delete(&self) -> String {
        format!(
            "DELETE FROM {} WHERE {}=?",
            Ident(self.schema.table()),
            Ident(self.schema.primary_key())
        )
    }

    /// One bulk upsert over a homogeneous column list, one value tuple per
    /// row.
    pub fn replace_batch(&self, columns: &[&str], rows: usize) -> String {
        let tuple = format!("({})", placeholders(columns.len()));

        format!(
            "REPLACE INTO {} ({}) VALUES {}",
            Ident(self.schema.table()),
            column_list(columns),
            vec![tuple.as_str(); rows].join(",")
        )
    }

    /// `CREATE TABLE` DDL for the schema. Required fields are NOT NULL, the
    /// key field is an auto-incremented integer primary key.
    pub fn create_table(&self) -> String {
        let key = self.schema.primary_key();
        let mut columns = Vec::new();

        for (name, ty) in self.schema.fields() {
            let column = match ty {
                // SQLite only aliases the rowid for exactly INTEGER PRIMARY KEY
                FieldType::Key if name == key => {
                    columns.push(format!("{} INTEGER PRIMARY KEY AUTOINCREMENT", Ident(name)));
                    continue;
                }
                FieldType::Key | FieldType::Int => "INTEGER",
                FieldType::String => "VARCHAR(255)",
                FieldType::Float => "DOUBLE",
                FieldType::Bool => "TINYINT(1)",
                FieldType::Time => "DATETIME",
            };
            let null = if self.schema.is_required(name) {
                " NOT NULL"
            } else {
                " DEFAULT NULL"
            };
            columns.push(format!("{} {column}{null}", Ident(name)));
        }

        let mut sql = format!("CREATE TABLE {} (", Ident(self.schema.table()));
        sql.push_str(&columns.join(","));

        // A plain integer key still gets a primary-key constraint, just not
        // an auto-incremented one.
        if self.schema.field_type(key).is_some_and(|ty| !ty.is_key()) {
            sql.push_str(&format!(",PRIMARY KEY ({})", Ident(key)));
        }

        sql.push(')');
        sql
    }
}

fn placeholders(count: usize) -> String {
    vec!["?"; count].join(",")
}

fn column_list(columns: &[&str]) -> String {
    columns
        .iter()
        .map(|column| Ident(column).to_string())
        .collect::<Vec<_>>()
        .join(",")
}
